use askama::Template;
use axum::extract::{Path, State};
use axum::response::{Html, Redirect};
use axum::Form;
use chrono::NaiveDate;
use serde::Deserialize;
use tracing::{debug, info};

use crate::db::queries::transactions;
use crate::error::{AppError, AppResult, RenderHtml};
use crate::models::{
    Category, Frequency, NewTransaction, PaymentMethod, Tag, Transaction, TransactionKind,
    UserSettings,
};
use crate::state::AppState;
use crate::VERSION;

#[derive(Template)]
#[template(path = "pages/transactions.html")]
pub struct TransactionsTemplate {
    pub title: String,
    pub settings: UserSettings,
    pub version: &'static str,
    pub xsrf_token: String,
    pub transactions: Vec<Transaction>,
    pub transaction_count: i64,
}

#[derive(Template)]
#[template(path = "pages/transaction_edit.html")]
pub struct TransactionEditTemplate {
    pub title: String,
    pub settings: UserSettings,
    pub version: &'static str,
    pub xsrf_token: String,
    pub transaction: Transaction,
    pub frequencies: &'static [Frequency],
    pub categories: &'static [Category],
    pub tags: &'static [Tag],
    pub payment_methods: &'static [PaymentMethod],
}

#[derive(Debug, Deserialize)]
pub struct TransactionFormData {
    pub name: String,
    pub amount: String,
    pub kind: String,
    pub frequency: String,
    pub date: String,
    pub category: Option<String>,
    pub tag: Option<String>,
    pub payment_method: Option<String>,
}

impl TransactionFormData {
    fn to_new_transaction(&self) -> Result<NewTransaction, AppError> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err(AppError::Validation("Name must not be empty".into()));
        }

        let amount: i64 = self
            .amount
            .trim()
            .parse()
            .map_err(|_| AppError::Validation("Invalid amount".into()))?;
        if amount < 0 {
            return Err(AppError::Validation("Amount must not be negative".into()));
        }

        let kind = TransactionKind::parse(&self.kind)
            .ok_or_else(|| AppError::Validation(format!("Unknown kind: {}", self.kind)))?;

        let frequency = Frequency::parse(&self.frequency).ok_or_else(|| {
            AppError::Validation(format!("Unknown frequency: {}", self.frequency))
        })?;

        let date = NaiveDate::parse_from_str(&self.date, "%Y-%m-%d")
            .map_err(|_| AppError::Validation("Invalid date".into()))?;

        // Category, tag, and payment method only apply to expenses
        let (category, tag, payment_method) = if kind == TransactionKind::Expense {
            let category = match self.category.as_deref().filter(|s| !s.is_empty()) {
                Some(s) => Some(
                    Category::parse(s)
                        .ok_or_else(|| AppError::Validation(format!("Unknown category: {}", s)))?,
                ),
                None => None,
            };
            let tag = self
                .tag
                .as_deref()
                .filter(|s| !s.is_empty())
                .map(Tag::parse);
            let payment_method = match self.payment_method.as_deref().filter(|s| !s.is_empty()) {
                Some(s) => Some(PaymentMethod::parse(s).ok_or_else(|| {
                    AppError::Validation(format!("Unknown payment method: {}", s))
                })?),
                None => None,
            };
            (category, tag, payment_method)
        } else {
            (None, None, None)
        };

        Ok(NewTransaction {
            name: name.to_string(),
            amount,
            kind,
            frequency,
            category,
            tag,
            payment_method,
            date,
        })
    }
}

pub async fn index(State(state): State<AppState>) -> AppResult<Html<String>> {
    let conn = state.db.get()?;

    let settings = state.load_settings()?;
    let transaction_list = transactions::list_transactions(&conn)?;
    let transaction_count = transaction_list.len() as i64;

    let template = TransactionsTemplate {
        title: "History".into(),
        settings,
        version: VERSION,
        xsrf_token: state.xsrf_token.value().to_string(),
        transactions: transaction_list,
        transaction_count,
    };

    template.render_html()
}

pub async fn edit_form(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> AppResult<Html<String>> {
    let conn = state.db.get()?;

    let transaction = transactions::get_transaction(&conn, id)?
        .ok_or_else(|| AppError::NotFound(format!("Transaction {} not found", id)))?;

    let settings = state.load_settings()?;

    let template = TransactionEditTemplate {
        title: "Edit Transaction".into(),
        settings,
        version: VERSION,
        xsrf_token: state.xsrf_token.value().to_string(),
        transaction,
        frequencies: Frequency::all(),
        categories: Category::all(),
        tags: Tag::all(),
        payment_methods: PaymentMethod::all(),
    };

    template.render_html()
}

pub async fn create(
    State(state): State<AppState>,
    Form(form): Form<TransactionFormData>,
) -> AppResult<Redirect> {
    debug!(name = %form.name, amount = %form.amount, "Creating transaction");
    let conn = state.db.get()?;

    let new_transaction = form.to_new_transaction()?;
    let id = transactions::create_transaction(&conn, &new_transaction)?;
    info!(transaction_id = id, "Transaction created via web form");

    Ok(Redirect::to("/"))
}

pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Form(form): Form<TransactionFormData>,
) -> AppResult<Redirect> {
    debug!(transaction_id = id, "Updating transaction");
    let conn = state.db.get()?;

    let new_transaction = form.to_new_transaction()?;
    let updated = transactions::update_transaction(&conn, id, &new_transaction)?;
    if !updated {
        return Err(AppError::NotFound(format!("Transaction {} not found", id)));
    }
    info!(transaction_id = id, "Transaction updated");

    Ok(Redirect::to("/transactions"))
}

pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> AppResult<Redirect> {
    let conn = state.db.get()?;

    let deleted = transactions::delete_transaction(&conn, id)?;
    if !deleted {
        return Err(AppError::NotFound(format!("Transaction {} not found", id)));
    }
    info!(transaction_id = id, "Transaction deleted");

    Ok(Redirect::to("/transactions"))
}
