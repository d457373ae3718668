//! Daily-equivalent normalization and period aggregation.
//!
//! Recurring transactions of mixed frequencies become comparable by
//! normalizing each to its impact per calendar day, then scaling back up
//! to the requested viewing horizon. One-time entries never contribute to
//! these rates; they are handled by date bucketing in the trend builder
//! and the statements.

use crate::models::{Frequency, Transaction, TransactionKind};
use serde::Serialize;

/// Convert a transaction's magnitude into a signed per-day value.
///
/// Fixed divisors: a week is 7 days, a month 30, a year 365. One-time
/// entries normalize to zero.
pub fn normalize(amount: i64, frequency: Frequency, kind: TransactionKind) -> f64 {
    let per_day = match frequency {
        Frequency::OneTime => return 0.0,
        Frequency::Daily => amount as f64,
        Frequency::Weekly => amount as f64 / 7.0,
        Frequency::Monthly => amount as f64 / 30.0,
        Frequency::Yearly => amount as f64 / 365.0,
    };
    kind.sign() as f64 * per_day
}

/// Horizon for aggregate income/expense figures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ViewMode {
    Daily,
    Weekly,
    Monthly,
    Yearly,
}

impl ViewMode {
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "daily" => Some(Self::Daily),
            "weekly" => Some(Self::Weekly),
            "monthly" => Some(Self::Monthly),
            "yearly" => Some(Self::Yearly),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Daily => "daily",
            Self::Weekly => "weekly",
            Self::Monthly => "monthly",
            Self::Yearly => "yearly",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Daily => "Daily",
            Self::Weekly => "Weekly",
            Self::Monthly => "Monthly",
            Self::Yearly => "Yearly",
        }
    }

    /// Days covered by one unit of this horizon.
    pub fn multiplier(&self) -> f64 {
        match self {
            Self::Daily => 1.0,
            Self::Weekly => 7.0,
            Self::Monthly => 30.0,
            Self::Yearly => 365.0,
        }
    }

    pub fn all() -> &'static [ViewMode] {
        &[Self::Daily, Self::Weekly, Self::Monthly, Self::Yearly]
    }

    pub fn is(&self, other: &ViewMode) -> bool {
        self == other
    }
}

/// Aggregate recurring totals at a viewing horizon.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PeriodTotals {
    /// Recurring income scaled to the horizon, as a positive figure.
    pub income_total: f64,
    /// Recurring expenses scaled to the horizon, as a positive figure.
    pub expense_total: f64,
    /// income minus expense.
    pub net_balance: f64,
}

/// Sum the daily-equivalent values of recurring transactions and scale to
/// the requested horizon. One-time entries are excluded: a single event is
/// not representative of a steady-state rate.
pub fn aggregate(transactions: &[Transaction], view: ViewMode) -> PeriodTotals {
    let multiplier = view.multiplier();

    let mut income_total = 0.0;
    let mut expense_total = 0.0;

    for tx in transactions {
        if tx.is_one_time() {
            continue;
        }
        let daily = tx.daily_value();
        if tx.is_income() {
            income_total += daily * multiplier;
        } else {
            expense_total += daily.abs() * multiplier;
        }
    }

    PeriodTotals {
        income_total,
        expense_total,
        net_balance: income_total - expense_total,
    }
}

/// The canonical current-asset figure: initial asset plus the signed raw
/// sum of every transaction, one-time and recurring alike.
pub fn current_asset(transactions: &[Transaction], initial_asset: i64) -> i64 {
    initial_asset + transactions.iter().map(|t| t.signed_amount()).sum::<i64>()
}

/// Percentage of the savings goal reached. A zero or negative target yields
/// 0% rather than a division error.
pub fn progress_percent(current: i64, target: i64) -> f64 {
    if target <= 0 {
        return 0.0;
    }
    current as f64 / target as f64 * 100.0
}
