//! Integration tests for transaction CRUD through the web forms.

mod common;

use axum::http::StatusCode;
use common::TestClient;

fn today() -> String {
    chrono::Local::now().date_naive().format("%Y-%m-%d").to_string()
}

/// Creating a transaction through the form redirects back home.
#[tokio::test]
async fn test_create_transaction() {
    let client = TestClient::new();

    assert!(
        client
            .create_transaction("Salary", "280000", "income", "monthly", &today())
            .await
    );

    let (status, body) = client.get("/transactions").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("Salary"));
    assert!(body.contains("280,000"));
}

/// A non-numeric amount is rejected with a validation error.
#[tokio::test]
async fn test_create_rejects_bad_amount() {
    let client = TestClient::new();

    let (status, _) = client
        .post_form(
            "/transactions/create",
            &[
                ("name", "Broken"),
                ("amount", "lots"),
                ("kind", "expense"),
                ("frequency", "one_time"),
                ("date", &today()),
            ],
        )
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
}

/// An unrecognized frequency is rejected, not silently zeroed.
#[tokio::test]
async fn test_create_rejects_unknown_frequency() {
    let client = TestClient::new();

    let (status, body) = client
        .post_form(
            "/transactions/create",
            &[
                ("name", "Broken"),
                ("amount", "100"),
                ("kind", "expense"),
                ("frequency", "fortnightly"),
                ("date", &today()),
            ],
        )
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body.contains("frequency"));
}

/// An empty name is rejected.
#[tokio::test]
async fn test_create_rejects_empty_name() {
    let client = TestClient::new();

    let (status, _) = client
        .post_form(
            "/transactions/create",
            &[
                ("name", "   "),
                ("amount", "100"),
                ("kind", "expense"),
                ("frequency", "one_time"),
                ("date", &today()),
            ],
        )
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
}

/// Expense-only fields are dropped when the kind is income.
#[tokio::test]
async fn test_income_ignores_expense_fields() {
    let client = TestClient::new();

    let (status, _) = client
        .post_form(
            "/transactions/create",
            &[
                ("name", "Bonus"),
                ("amount", "50000"),
                ("kind", "income"),
                ("frequency", "one_time"),
                ("date", &today()),
                ("category", "consumption"),
                ("tag", "food"),
                ("payment_method", "cash"),
            ],
        )
        .await;
    assert_eq!(status, StatusCode::SEE_OTHER);

    let (_, body) = client.get("/transactions").await;
    assert!(body.contains("Bonus"));
    // The tag pill would render the food label if the tag had been kept
    assert!(!body.contains("🍱 Food"));
}

/// The edit form is prefilled with the stored values.
#[tokio::test]
async fn test_edit_form_prefilled() {
    let client = TestClient::new();
    assert!(
        client
            .create_tagged_expense("Rent", "60000", "monthly", &today(), "housing")
            .await
    );

    let (status, body) = client.get("/transactions/1/edit").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("Rent"));
    assert!(body.contains("60000"));
    assert!(body.contains("🏠 Housing"));
}

/// Editing a missing transaction is a 404.
#[tokio::test]
async fn test_edit_form_missing_transaction() {
    let client = TestClient::new();
    let (status, _) = client.get("/transactions/999/edit").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

/// Update resubmits every field and replaces the row.
#[tokio::test]
async fn test_update_transaction() {
    let client = TestClient::new();
    assert!(
        client
            .create_transaction("Gym", "8000", "expense", "monthly", &today())
            .await
    );

    let (status, _) = client
        .post_form(
            "/transactions/1/update",
            &[
                ("name", "Gym membership"),
                ("amount", "9000"),
                ("kind", "expense"),
                ("frequency", "monthly"),
                ("date", &today()),
                ("category", "investment"),
                ("tag", "other"),
                ("payment_method", "credit"),
            ],
        )
        .await;
    assert_eq!(status, StatusCode::SEE_OTHER);

    let (_, body) = client.get("/transactions").await;
    assert!(body.contains("Gym membership"));
    assert!(body.contains("9,000"));
    assert!(!body.contains("8,000"));
}

/// Updating a missing transaction is a 404.
#[tokio::test]
async fn test_update_missing_transaction() {
    let client = TestClient::new();

    let (status, _) = client
        .post_form(
            "/transactions/42/update",
            &[
                ("name", "Ghost"),
                ("amount", "1"),
                ("kind", "expense"),
                ("frequency", "one_time"),
                ("date", &today()),
            ],
        )
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

/// Delete removes the row; deleting again is a 404.
#[tokio::test]
async fn test_delete_transaction() {
    let client = TestClient::new();
    assert!(
        client
            .create_transaction("Coffee", "500", "expense", "one_time", &today())
            .await
    );

    let (status, _) = client.post_form("/transactions/1/delete", &[]).await;
    assert_eq!(status, StatusCode::SEE_OTHER);

    let (_, body) = client.get("/transactions").await;
    assert!(!body.contains("Coffee"));

    let (status, _) = client.post_form("/transactions/1/delete", &[]).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

/// The dashboard shows recent entries and the current asset total.
#[tokio::test]
async fn test_dashboard_shows_current_asset() {
    let client = TestClient::new();
    assert!(client.save_settings("100000", "1000000", "3000", "円").await);
    assert!(
        client
            .create_transaction("Deposit", "50000", "income", "one_time", &today())
            .await
    );

    let (status, body) = client.get("/").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("Deposit"));
    // 100000 initial + 50000 one-time income
    assert!(body.contains("150,000円"));
}
