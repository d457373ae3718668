use axum::extract::{Query, State};
use axum::response::Json;
use serde::{Deserialize, Serialize};

use crate::db::queries::transactions;
use crate::error::AppResult;
use crate::services::ledger::{self, ViewMode};
use crate::services::trend;
use crate::state::AppState;

/// A point of the cumulative asset line, rounded to whole currency units.
#[derive(Debug, Serialize)]
pub struct TrendPointDto {
    pub date: String,
    pub value: i64,
}

/// One bar-chart day with raw income/expense sums.
#[derive(Debug, Serialize)]
pub struct DailyBarDto {
    pub date: String,
    pub income: i64,
    pub expense: i64,
    pub has_one_time: bool,
}

/// One slice of the per-item daily-cost donut.
#[derive(Debug, Serialize)]
pub struct BreakdownSlice {
    pub name: String,
    pub daily_value: i64,
}

#[derive(Debug, Serialize)]
pub struct PeriodBalanceDto {
    pub view: &'static str,
    pub income_total: i64,
    pub expense_total: i64,
    pub net_balance: i64,
}

#[derive(Debug, Default, Deserialize)]
pub struct BalanceParams {
    pub view: Option<String>,
}

pub async fn asset_trend(State(state): State<AppState>) -> AppResult<Json<Vec<TrendPointDto>>> {
    let conn = state.db.get()?;
    let settings = state.load_settings()?;

    let transaction_list = transactions::list_transactions(&conn)?;

    let today = chrono::Local::now().date_naive();
    let points = trend::asset_trend(&transaction_list, settings.initial_asset, today);

    let result = points
        .into_iter()
        .map(|p| TrendPointDto {
            date: p.date.format("%Y-%m-%d").to_string(),
            value: p.value.round() as i64,
        })
        .collect();

    Ok(Json(result))
}

pub async fn daily_balance(State(state): State<AppState>) -> AppResult<Json<Vec<DailyBarDto>>> {
    let conn = state.db.get()?;

    let transaction_list = transactions::list_transactions(&conn)?;

    let today = chrono::Local::now().date_naive();
    let bars = trend::daily_bars(&transaction_list, today);

    let result = bars
        .into_iter()
        .map(|b| DailyBarDto {
            date: b.date.format("%Y-%m-%d").to_string(),
            income: b.income,
            expense: b.expense,
            has_one_time: b.has_one_time,
        })
        .collect();

    Ok(Json(result))
}

/// Per-item daily-equivalent expense magnitudes. One-time entries normalize
/// to zero and drop out along with zero-amount items.
pub async fn expense_breakdown(
    State(state): State<AppState>,
) -> AppResult<Json<Vec<BreakdownSlice>>> {
    let conn = state.db.get()?;

    let transaction_list = transactions::list_transactions(&conn)?;

    let mut result: Vec<BreakdownSlice> = transaction_list
        .iter()
        .filter(|t| t.is_expense())
        .map(|t| BreakdownSlice {
            name: t.name.clone(),
            daily_value: t.daily_value().abs().round() as i64,
        })
        .filter(|s| s.daily_value > 0)
        .collect();

    result.sort_by(|a, b| b.daily_value.cmp(&a.daily_value));

    Ok(Json(result))
}

pub async fn period_balance(
    State(state): State<AppState>,
    Query(params): Query<BalanceParams>,
) -> AppResult<Json<PeriodBalanceDto>> {
    let conn = state.db.get()?;

    let view = params
        .view
        .as_deref()
        .and_then(ViewMode::parse)
        .unwrap_or(ViewMode::Monthly);

    let transaction_list = transactions::list_transactions(&conn)?;

    let totals = ledger::aggregate(&transaction_list, view);

    Ok(Json(PeriodBalanceDto {
        view: view.as_str(),
        income_total: totals.income_total.round() as i64,
        expense_total: totals.expense_total.round() as i64,
        net_balance: totals.net_balance.round() as i64,
    }))
}
