//! Integration tests for the analytics page: view-mode tabs, the
//! month-to-date profit/loss statement, and the balance sheet.

mod common;

use axum::http::StatusCode;
use common::TestClient;

fn today() -> String {
    chrono::Local::now().date_naive().format("%Y-%m-%d").to_string()
}

/// The analytics page renders without any data.
#[tokio::test]
async fn test_analytics_empty() {
    let client = TestClient::new();

    let (status, body) = client.get("/analytics").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("No data to chart yet"));
    assert!(body.contains("Profit"));
}

/// The view tab defaults to monthly and follows the query parameter.
#[tokio::test]
async fn test_analytics_view_modes() {
    let client = TestClient::new();
    assert!(
        client
            .create_transaction("Rent", "3000", "expense", "monthly", &today())
            .await
    );

    let (_, body) = client.get("/analytics").await;
    assert!(body.contains("Expenses (Monthly)"));
    assert!(body.contains("3,000"));

    let (_, body) = client.get("/analytics?view=daily").await;
    assert!(body.contains("Expenses (Daily)"));
    assert!(body.contains("100円"));

    // Unknown view falls back to monthly
    let (_, body) = client.get("/analytics?view=hourly").await;
    assert!(body.contains("Expenses (Monthly)"));
}

/// One-time spending lands in the statement buckets split by tag.
#[tokio::test]
async fn test_statement_tag_split() {
    let client = TestClient::new();
    assert!(
        client
            .create_tagged_expense("Groceries", "4000", "one_time", &today(), "food")
            .await
    );
    assert!(
        client
            .create_tagged_expense("Drinks", "6000", "one_time", &today(), "social")
            .await
    );

    let (status, body) = client.get("/analytics").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("Running costs"));
    assert!(body.contains("🍱 Food"));
    assert!(body.contains("4,000"));
    assert!(body.contains("Discretionary"));
    assert!(body.contains("🍻 Social"));
    assert!(body.contains("6,000"));
}

/// The balance sheet shows initial asset plus the lifetime signed sum.
#[tokio::test]
async fn test_balance_sheet_totals() {
    let client = TestClient::new();
    assert!(client.save_settings("100000", "1000000", "3000", "円").await);
    assert!(
        client
            .create_transaction("Bonus", "50000", "income", "one_time", &today())
            .await
    );
    assert!(
        client
            .create_transaction("Dinner", "5000", "expense", "one_time", &today())
            .await
    );

    let (_, body) = client.get("/analytics").await;
    assert!(body.contains("Retained earnings"));
    // 100000 + 50000 - 5000
    assert!(body.contains("145,000円"));
}
