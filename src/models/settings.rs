use crate::filters;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// The single user's settings, stored as key/value rows and materialized
/// with defaults for anything missing. Saving upserts every key; there is
/// no history.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserSettings {
    /// Starting balance the asset trend and tank are seeded with.
    pub initial_asset: i64,
    /// Savings goal the tank fills toward.
    pub target_asset: i64,
    pub daily_budget_goal: i64,
    /// Display-only currency suffix.
    pub currency_unit: String,
}

impl Default for UserSettings {
    fn default() -> Self {
        Self {
            initial_asset: 0,
            target_asset: 1_000_000,
            daily_budget_goal: 3000,
            currency_unit: "円".into(),
        }
    }
}

impl UserSettings {
    pub fn from_map(map: HashMap<String, String>) -> Self {
        let defaults = Self::default();
        Self {
            initial_asset: map
                .get("initial_asset")
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.initial_asset),
            target_asset: map
                .get("target_asset")
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.target_asset),
            daily_budget_goal: map
                .get("daily_budget_goal")
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.daily_budget_goal),
            currency_unit: map
                .get("currency_unit")
                .cloned()
                .unwrap_or(defaults.currency_unit),
        }
    }

    pub fn to_map(&self) -> HashMap<String, String> {
        let mut map = HashMap::new();
        map.insert("initial_asset".into(), self.initial_asset.to_string());
        map.insert("target_asset".into(), self.target_asset.to_string());
        map.insert(
            "daily_budget_goal".into(),
            self.daily_budget_goal.to_string(),
        );
        map.insert("currency_unit".into(), self.currency_unit.clone());
        map
    }

    /// Format a whole-unit amount with thousands separators and the
    /// configured currency suffix.
    pub fn format_amount<T: std::borrow::Borrow<i64>>(&self, amount: T) -> String {
        filters::format_amount(*amount.borrow(), &self.currency_unit)
    }

    /// Format with an explicit +/- sign, for ledger rows.
    pub fn format_signed<T: std::borrow::Borrow<i64>>(&self, amount: T) -> String {
        filters::format_signed(*amount.borrow(), &self.currency_unit)
    }

    /// Format a fractional daily-equivalent value, rounded to whole units.
    pub fn format_daily<T: std::borrow::Borrow<f64>>(&self, value: T) -> String {
        filters::format_amount(value.borrow().round() as i64, &self.currency_unit)
    }
}
