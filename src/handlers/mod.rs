pub mod analytics;
pub mod api;
pub mod dashboard;
pub mod settings;
pub mod transactions;

use axum::routing::{get, post};
use axum::Router;

use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        // Pages
        .route("/", get(dashboard::index))
        .route("/transactions", get(transactions::index))
        .route("/analytics", get(analytics::index))
        .route("/settings", get(settings::index))
        // Transaction CRUD (edit-then-resubmit, no partial patch)
        .route("/transactions/create", post(transactions::create))
        .route("/transactions/:id/edit", get(transactions::edit_form))
        .route("/transactions/:id/update", post(transactions::update))
        .route("/transactions/:id/delete", post(transactions::delete))
        // Settings upsert
        .route("/settings/update", post(settings::update))
        // API (JSON for charts)
        .route("/api/charts/asset-trend", get(api::asset_trend))
        .route("/api/charts/daily-balance", get(api::daily_balance))
        .route("/api/charts/expense-breakdown", get(api::expense_breakdown))
        .route("/api/charts/balance", get(api::period_balance))
        // Health check
        .route("/health", get(health))
}

async fn health() -> &'static str {
    "OK"
}
