use r2d2::Pool;
use r2d2_sqlite::SqliteConnectionManager;
use std::path::Path;
use std::sync::atomic::{AtomicU64, Ordering};

pub type DbPool = Pool<SqliteConnectionManager>;

fn init_pragmas(conn: &mut rusqlite::Connection) -> Result<(), rusqlite::Error> {
    conn.execute_batch(
        "PRAGMA journal_mode = WAL;
         PRAGMA synchronous = NORMAL;
         PRAGMA foreign_keys = ON;
         PRAGMA busy_timeout = 5000;",
    )
}

pub fn create_pool(database_path: &Path) -> Result<DbPool, r2d2::Error> {
    if let Some(parent) = database_path.parent() {
        std::fs::create_dir_all(parent).ok();
    }

    let manager = SqliteConnectionManager::file(database_path).with_init(init_pragmas);

    Pool::builder().max_size(10).build(manager)
}

/// Counter that keeps concurrently created in-memory databases distinct.
static MEMORY_DB_SEQ: AtomicU64 = AtomicU64::new(0);

/// Create a pool over a private in-memory database, for tests.
///
/// Shared cache lets every pooled connection see the same data; the unique
/// URI name isolates one pool from another within the same process.
pub fn create_in_memory_pool() -> Result<DbPool, r2d2::Error> {
    let seq = MEMORY_DB_SEQ.fetch_add(1, Ordering::Relaxed);
    let uri = format!("file:tanker_mem_{}?mode=memory&cache=shared", seq);

    let manager = SqliteConnectionManager::file(uri)
        .with_flags(
            rusqlite::OpenFlags::SQLITE_OPEN_URI
                | rusqlite::OpenFlags::SQLITE_OPEN_READ_WRITE
                | rusqlite::OpenFlags::SQLITE_OPEN_CREATE,
        )
        .with_init(|conn| conn.execute_batch("PRAGMA foreign_keys = ON;"));

    Pool::builder().max_size(4).build(manager)
}
