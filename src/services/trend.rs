//! Trailing-window trend series for the asset line chart and the daily
//! income/expense bar chart.
//!
//! Both builders materialize the full window on every call; nothing is
//! cached between invocations.

use chrono::{Duration, NaiveDate};
use serde::Serialize;
use std::collections::HashMap;

use crate::models::Transaction;

/// Days covered by the trend charts, today inclusive.
pub const TREND_WINDOW_DAYS: i64 = 30;

/// One point of the cumulative asset line.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrendPoint {
    pub date: NaiveDate,
    pub value: f64,
}

/// Cumulative asset value for each of the trailing `TREND_WINDOW_DAYS`
/// days ending on `today`.
pub fn asset_trend(
    transactions: &[Transaction],
    initial_asset: i64,
    today: NaiveDate,
) -> Vec<TrendPoint> {
    asset_trend_windowed(transactions, initial_asset, today, TREND_WINDOW_DAYS)
}

/// The window is the `window_days` calendar days ending on `today`.
///
/// The running total is seeded with the initial asset plus everything
/// anchored before the window. Inside the window each day first absorbs the
/// aggregate daily rate of all recurring items, then any one-time amounts
/// anchored to that exact day.
pub fn asset_trend_windowed(
    transactions: &[Transaction],
    initial_asset: i64,
    today: NaiveDate,
    window_days: i64,
) -> Vec<TrendPoint> {
    let window_start = today - Duration::days(window_days - 1);

    let mut cumulative = initial_asset as f64;
    for tx in transactions.iter().filter(|t| t.date < window_start) {
        cumulative += tx.signed_amount() as f64;
    }

    // Net daily drain/gain of all recurring items (one-time normalizes to 0)
    let daily_fixed: f64 = transactions.iter().map(|t| t.daily_value()).sum();

    let mut one_time_by_day: HashMap<NaiveDate, i64> = HashMap::new();
    for tx in transactions
        .iter()
        .filter(|t| t.is_one_time() && t.date >= window_start && t.date <= today)
    {
        *one_time_by_day.entry(tx.date).or_insert(0) += tx.signed_amount();
    }

    let mut points = Vec::with_capacity(window_days as usize);
    for offset in 0..window_days {
        let date = window_start + Duration::days(offset);

        cumulative += daily_fixed;
        if let Some(delta) = one_time_by_day.get(&date) {
            cumulative += *delta as f64;
        }

        points.push(TrendPoint {
            date,
            value: cumulative,
        });
    }

    points
}

/// One day of the income/expense bar chart. Amounts are raw magnitudes,
/// not amortized; days carrying a one-time entry are flagged so the chart
/// can render them distinctly.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DailyBar {
    pub date: NaiveDate,
    pub income: i64,
    pub expense: i64,
    pub has_one_time: bool,
}

/// Raw per-day income/expense sums over the trailing window, zero-filled
/// so every window day has an entry.
pub fn daily_bars(transactions: &[Transaction], today: NaiveDate) -> Vec<DailyBar> {
    let window_start = today - Duration::days(TREND_WINDOW_DAYS - 1);

    let mut by_day: HashMap<NaiveDate, (i64, i64, bool)> = HashMap::new();
    for tx in transactions
        .iter()
        .filter(|t| t.date >= window_start && t.date <= today)
    {
        let entry = by_day.entry(tx.date).or_insert((0, 0, false));
        if tx.is_income() {
            entry.0 += tx.amount;
        } else {
            entry.1 += tx.amount;
        }
        if tx.is_one_time() {
            entry.2 = true;
        }
    }

    (0..TREND_WINDOW_DAYS)
        .map(|offset| {
            let date = window_start + Duration::days(offset);
            let (income, expense, has_one_time) =
                by_day.get(&date).copied().unwrap_or((0, 0, false));
            DailyBar {
                date,
                income,
                expense,
                has_one_time,
            }
        })
        .collect()
}
