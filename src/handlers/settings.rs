use askama::Template;
use axum::extract::{Query, State};
use axum::response::{Html, Redirect};
use axum::Form;
use serde::Deserialize;
use tracing::info;

use crate::db::queries::settings;
use crate::error::{AppError, AppResult, RenderHtml};
use crate::models::UserSettings;
use crate::state::AppState;
use crate::VERSION;

#[derive(Template)]
#[template(path = "pages/settings.html")]
pub struct SettingsTemplate {
    pub title: String,
    pub settings: UserSettings,
    pub version: &'static str,
    pub xsrf_token: String,
    pub saved: bool,
}

#[derive(Debug, Default, Deserialize)]
pub struct SettingsPageParams {
    pub saved: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct SettingsFormData {
    pub initial_asset: String,
    pub target_asset: String,
    pub daily_budget_goal: String,
    pub currency_unit: String,
}

impl SettingsFormData {
    fn to_user_settings(&self) -> Result<UserSettings, AppError> {
        let parse = |field: &str, value: &str| -> Result<i64, AppError> {
            value
                .trim()
                .parse()
                .map_err(|_| AppError::Validation(format!("Invalid {}", field)))
        };

        let currency_unit = self.currency_unit.trim();
        if currency_unit.is_empty() {
            return Err(AppError::Validation("Currency unit must not be empty".into()));
        }

        Ok(UserSettings {
            initial_asset: parse("initial asset", &self.initial_asset)?,
            target_asset: parse("target asset", &self.target_asset)?,
            daily_budget_goal: parse("daily budget goal", &self.daily_budget_goal)?,
            currency_unit: currency_unit.to_string(),
        })
    }
}

pub async fn index(
    State(state): State<AppState>,
    Query(params): Query<SettingsPageParams>,
) -> AppResult<Html<String>> {
    let settings = state.load_settings()?;

    let template = SettingsTemplate {
        title: "Settings".into(),
        settings,
        version: VERSION,
        xsrf_token: state.xsrf_token.value().to_string(),
        saved: params.saved.is_some(),
    };

    template.render_html()
}

pub async fn update(
    State(state): State<AppState>,
    Form(form): Form<SettingsFormData>,
) -> AppResult<Redirect> {
    let conn = state.db.get()?;

    let new_settings = form.to_user_settings()?;
    settings::save_user_settings(&conn, &new_settings)?;
    info!(
        initial_asset = new_settings.initial_asset,
        target_asset = new_settings.target_asset,
        "Settings saved"
    );

    Ok(Redirect::to("/settings?saved=1"))
}
