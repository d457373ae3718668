use askama::Template;
use axum::extract::{Query, State};
use axum::response::Html;
use serde::Deserialize;
use tracing::debug;

use crate::db::queries::transactions;
use crate::error::{AppResult, RenderHtml};
use crate::models::UserSettings;
use crate::services::ledger::{self, ViewMode};
use crate::services::statement::{self, BalanceSheet, ProfitLossStatement};
use crate::state::AppState;
use crate::VERSION;

#[derive(Debug, Default, Deserialize)]
pub struct AnalyticsParams {
    pub view: Option<String>,
}

#[derive(Template)]
#[template(path = "pages/analytics.html")]
pub struct AnalyticsTemplate {
    pub title: String,
    pub settings: UserSettings,
    pub version: &'static str,
    pub xsrf_token: String,
    pub view: ViewMode,
    pub view_modes: &'static [ViewMode],
    pub income_total: i64,
    pub expense_total: i64,
    pub net_balance: i64,
    pub statement: ProfitLossStatement,
    pub sheet: BalanceSheet,
    pub has_transactions: bool,
}

pub async fn index(
    State(state): State<AppState>,
    Query(params): Query<AnalyticsParams>,
) -> AppResult<Html<String>> {
    let conn = state.db.get()?;

    let settings = state.load_settings()?;
    let view = params
        .view
        .as_deref()
        .and_then(ViewMode::parse)
        .unwrap_or(ViewMode::Monthly);

    let transaction_list = transactions::list_transactions(&conn)?;

    let today = chrono::Local::now().date_naive();
    let totals = ledger::aggregate(&transaction_list, view);
    let pl = statement::month_to_date(&transaction_list, today);
    let sheet = statement::balance_sheet(&transaction_list, settings.initial_asset);

    debug!(
        view = view.as_str(),
        count = transaction_list.len(),
        net_balance = totals.net_balance,
        "Analytics data loaded"
    );

    let template = AnalyticsTemplate {
        title: "Analytics".into(),
        settings,
        version: VERSION,
        xsrf_token: state.xsrf_token.value().to_string(),
        view,
        view_modes: ViewMode::all(),
        income_total: totals.income_total.round() as i64,
        expense_total: totals.expense_total.round() as i64,
        net_balance: totals.net_balance.round() as i64,
        statement: pl,
        sheet,
        has_transactions: !transaction_list.is_empty(),
    };

    template.render_html()
}
