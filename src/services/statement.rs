//! Month-to-date profit/loss statement and the balance sheet.
//!
//! Recurring items are standing rates: the statement charges their
//! daily-equivalent value for every day of the statement month, regardless
//! of when the row was recorded. One-time items are scoped to the month
//! they are anchored in and split into running costs versus discretionary
//! spending by tag.

use chrono::{Datelike, NaiveDate};
use serde::Serialize;
use std::collections::HashMap;

use crate::models::{Tag, Transaction};
use crate::services::ledger;

/// Per-tag one-time spending total.
#[derive(Debug, Clone, Serialize)]
pub struct TagTotal {
    pub tag: Tag,
    pub total: i64,
}

#[derive(Debug, Clone, Serialize)]
pub struct ProfitLossStatement {
    pub year: i32,
    pub month: u32,
    pub days_in_month: u32,
    /// Recurring income prorated over the month plus one-time income.
    pub income_total: f64,
    /// Recurring expenses prorated over the month.
    pub fixed_costs: f64,
    /// One-time spending under living-cost tags.
    pub running_one_time: i64,
    /// fixed_costs + running_one_time.
    pub running_costs: f64,
    /// One-time spending under discretionary tags.
    pub discretionary: i64,
    pub total_expenses: f64,
    pub profit: f64,
    pub running_by_tag: Vec<TagTotal>,
    pub discretionary_by_tag: Vec<TagTotal>,
}

impl ProfitLossStatement {
    pub fn is_profitable(&self) -> bool {
        self.profit >= 0.0
    }

    pub fn month_name(&self) -> &'static str {
        match self.month {
            1 => "January",
            2 => "February",
            3 => "March",
            4 => "April",
            5 => "May",
            6 => "June",
            7 => "July",
            8 => "August",
            9 => "September",
            10 => "October",
            11 => "November",
            _ => "December",
        }
    }
}

/// Build the statement for the month containing `today`.
pub fn month_to_date(transactions: &[Transaction], today: NaiveDate) -> ProfitLossStatement {
    let month_start = today.with_day(1).expect("day 1 always exists");
    let days = days_in_month(today);

    // Standing rates, prorated over the actual month length
    let mut recurring_income = 0.0;
    let mut fixed_costs = 0.0;
    for tx in transactions.iter().filter(|t| !t.is_one_time()) {
        let monthly = tx.daily_value() * days as f64;
        if tx.is_income() {
            recurring_income += monthly;
        } else {
            fixed_costs += monthly.abs();
        }
    }

    // One-time items anchored in this month
    let mut one_time_income = 0i64;
    let mut running_by_tag: HashMap<Tag, i64> = HashMap::new();
    let mut discretionary_by_tag: HashMap<Tag, i64> = HashMap::new();

    for tx in transactions
        .iter()
        .filter(|t| t.is_one_time() && t.date >= month_start && t.date <= today)
    {
        if tx.is_income() {
            one_time_income += tx.amount;
            continue;
        }
        let tag = tx.tag.unwrap_or(Tag::Other);
        if tag.is_running_cost() {
            *running_by_tag.entry(tag).or_insert(0) += tx.amount;
        } else {
            *discretionary_by_tag.entry(tag).or_insert(0) += tx.amount;
        }
    }

    let running_one_time: i64 = running_by_tag.values().sum();
    let discretionary: i64 = discretionary_by_tag.values().sum();

    let income_total = recurring_income + one_time_income as f64;
    let running_costs = fixed_costs + running_one_time as f64;
    let total_expenses = running_costs + discretionary as f64;

    ProfitLossStatement {
        year: today.year(),
        month: today.month(),
        days_in_month: days,
        income_total,
        fixed_costs,
        running_one_time,
        running_costs,
        discretionary,
        total_expenses,
        profit: income_total - total_expenses,
        running_by_tag: sorted_tag_totals(running_by_tag),
        discretionary_by_tag: sorted_tag_totals(discretionary_by_tag),
    }
}

fn sorted_tag_totals(map: HashMap<Tag, i64>) -> Vec<TagTotal> {
    let mut totals: Vec<TagTotal> = map
        .into_iter()
        .map(|(tag, total)| TagTotal { tag, total })
        .collect();
    totals.sort_by(|a, b| b.total.cmp(&a.total).then(a.tag.as_str().cmp(b.tag.as_str())));
    totals
}

/// A T-account snapshot: cash on the asset side, retained earnings on the
/// equity side, both equal by construction.
#[derive(Debug, Clone, Serialize)]
pub struct BalanceSheet {
    pub cash_and_deposits: i64,
    pub retained_earnings: i64,
}

pub fn balance_sheet(transactions: &[Transaction], initial_asset: i64) -> BalanceSheet {
    let cash = ledger::current_asset(transactions, initial_asset);
    BalanceSheet {
        cash_and_deposits: cash,
        retained_earnings: cash,
    }
}

fn days_in_month(date: NaiveDate) -> u32 {
    let (next_year, next_month) = if date.month() == 12 {
        (date.year() + 1, 1)
    } else {
        (date.year(), date.month() + 1)
    };
    let first_of_next =
        NaiveDate::from_ymd_opt(next_year, next_month, 1).expect("first of month always exists");
    (first_of_next - date.with_day(1).expect("day 1 always exists")).num_days() as u32
}
