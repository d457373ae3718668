use crate::models::{NewTransaction, Transaction};
use rusqlite::{params, Connection, OptionalExtension, Row};
use tracing::{debug, trace};

const COLUMNS: &str =
    "id, name, amount, kind, frequency, category, tag, payment_method, date, created_at";

fn row_to_transaction(row: &Row<'_>) -> rusqlite::Result<Transaction> {
    Ok(Transaction {
        id: row.get(0)?,
        name: row.get(1)?,
        amount: row.get(2)?,
        kind: row.get(3)?,
        frequency: row.get(4)?,
        category: row.get(5)?,
        tag: row.get(6)?,
        payment_method: row.get(7)?,
        date: row.get(8)?,
        created_at: row.get(9)?,
    })
}

/// List every transaction, newest anchor date first. The whole ledger is one
/// user's rows; the calculation core wants them all in memory anyway.
pub fn list_transactions(conn: &Connection) -> rusqlite::Result<Vec<Transaction>> {
    let mut stmt = conn.prepare(&format!(
        "SELECT {} FROM transactions ORDER BY date DESC, id DESC",
        COLUMNS
    ))?;

    let transactions = stmt
        .query_map([], row_to_transaction)?
        .collect::<Result<Vec<_>, _>>()?;

    debug!(count = transactions.len(), "Listed transactions");
    Ok(transactions)
}

/// The most recent entries for the dashboard activity list.
pub fn list_recent_transactions(
    conn: &Connection,
    limit: i64,
) -> rusqlite::Result<Vec<Transaction>> {
    let mut stmt = conn.prepare(&format!(
        "SELECT {} FROM transactions ORDER BY date DESC, id DESC LIMIT ?",
        COLUMNS
    ))?;

    let transactions = stmt
        .query_map([limit], row_to_transaction)?
        .collect::<Result<Vec<_>, _>>()?;
    Ok(transactions)
}

pub fn get_transaction(conn: &Connection, id: i64) -> rusqlite::Result<Option<Transaction>> {
    trace!(transaction_id = id, "Fetching transaction");
    conn.query_row(
        &format!("SELECT {} FROM transactions WHERE id = ?", COLUMNS),
        [id],
        row_to_transaction,
    )
    .optional()
}

pub fn create_transaction(conn: &Connection, new: &NewTransaction) -> rusqlite::Result<i64> {
    conn.execute(
        "INSERT INTO transactions (name, amount, kind, frequency, category, tag, payment_method, date)
         VALUES (?, ?, ?, ?, ?, ?, ?, ?)",
        params![
            new.name,
            new.amount,
            new.kind,
            new.frequency,
            new.category,
            new.tag,
            new.payment_method,
            new.date.format("%Y-%m-%d").to_string(),
        ],
    )?;

    let id = conn.last_insert_rowid();
    debug!(transaction_id = id, name = %new.name, "Created transaction");
    Ok(id)
}

/// Full-field replace; the edit form resubmits every column.
pub fn update_transaction(
    conn: &Connection,
    id: i64,
    new: &NewTransaction,
) -> rusqlite::Result<bool> {
    let rows = conn.execute(
        "UPDATE transactions
         SET name = ?, amount = ?, kind = ?, frequency = ?, category = ?,
             tag = ?, payment_method = ?, date = ?
         WHERE id = ?",
        params![
            new.name,
            new.amount,
            new.kind,
            new.frequency,
            new.category,
            new.tag,
            new.payment_method,
            new.date.format("%Y-%m-%d").to_string(),
            id,
        ],
    )?;

    debug!(transaction_id = id, updated = rows > 0, "Updated transaction");
    Ok(rows > 0)
}

pub fn delete_transaction(conn: &Connection, id: i64) -> rusqlite::Result<bool> {
    let rows = conn.execute("DELETE FROM transactions WHERE id = ?", [id])?;
    debug!(transaction_id = id, deleted = rows > 0, "Deleted transaction");
    Ok(rows > 0)
}
