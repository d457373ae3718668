use askama::Template;
use axum::extract::State;
use axum::response::Html;
use tracing::debug;

use crate::db::queries::transactions;
use crate::error::{AppResult, RenderHtml};
use crate::filters;
use crate::models::{Category, Frequency, PaymentMethod, Tag, Transaction, UserSettings};
use crate::services::ledger;
use crate::state::AppState;
use crate::VERSION;

#[derive(Template)]
#[template(path = "pages/dashboard.html")]
pub struct DashboardTemplate {
    pub title: String,
    pub settings: UserSettings,
    pub version: &'static str,
    pub xsrf_token: String,
    pub current_asset: i64,
    pub remaining: i64,
    pub progress_display: String,
    /// Water surface y-coordinate inside the 200x200 tank viewBox.
    pub tank_level: i64,
    pub today: String,
    pub frequencies: &'static [Frequency],
    pub categories: &'static [Category],
    pub tags: &'static [Tag],
    pub payment_methods: &'static [PaymentMethod],
    pub recent_transactions: Vec<Transaction>,
    pub transaction_count: i64,
}

pub async fn index(State(state): State<AppState>) -> AppResult<Html<String>> {
    debug!("Loading dashboard");
    let conn = state.db.get()?;

    let settings = state.load_settings()?;

    let all_transactions = transactions::list_transactions(&conn)?;
    let transaction_count = all_transactions.len() as i64;

    let current_asset = ledger::current_asset(&all_transactions, settings.initial_asset);
    let progress = ledger::progress_percent(current_asset, settings.target_asset);
    let fill = progress.clamp(0.0, 100.0);
    let remaining = settings.target_asset - current_asset;

    let recent_transactions = transactions::list_recent_transactions(&conn, 8)?;

    debug!(
        transaction_count,
        current_asset,
        progress = %filters::format_percent(progress),
        "Dashboard data loaded"
    );

    let template = DashboardTemplate {
        title: "Dashboard".into(),
        settings,
        version: VERSION,
        xsrf_token: state.xsrf_token.value().to_string(),
        current_asset,
        remaining,
        progress_display: filters::format_percent(progress),
        tank_level: 200 - (fill * 2.0).round() as i64,
        today: chrono::Local::now().date_naive().format("%Y-%m-%d").to_string(),
        frequencies: Frequency::all(),
        categories: Category::all(),
        tags: Tag::all(),
        payment_methods: PaymentMethod::all(),
        recent_transactions,
        transaction_count,
    };

    template.render_html()
}
