use crate::config::Config;
use crate::db::{queries::settings, DbPool};
use crate::error::AppResult;
use crate::models::UserSettings;
use crate::xsrf::XsrfToken;
use std::collections::HashSet;
use std::sync::{Arc, Mutex};

/// Server-side session store holding valid session tokens.
pub type SessionStore = Arc<Mutex<HashSet<String>>>;

#[derive(Clone)]
pub struct AppState {
    pub db: DbPool,
    pub config: Arc<Config>,
    pub xsrf_token: XsrfToken,
    pub sessions: SessionStore,
}

impl AppState {
    /// Load the single user's settings row-set from the database.
    pub fn load_settings(&self) -> AppResult<UserSettings> {
        let conn = self.db.get()?;
        settings::get_user_settings(&conn)
    }
}
