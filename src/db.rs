use std::{env, str::FromStr, time::Duration};

use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions};
use sqlx::SqlitePool;

/// Default database files. The inventory and the credentials live in two
/// independent SQLite files; nothing ever joins across them.
pub const DEFAULT_INVENTORY_DB_URL: &str = "sqlite://inventory.db";
pub const DEFAULT_LOGIN_DB_URL: &str = "sqlite://login.db";

/// Resolve the inventory database URL from `INVENTORY_DATABASE_URL`,
/// falling back to the default file next to the process.
pub fn inventory_db_url() -> String {
    dotenvy::dotenv().ok();
    env::var("INVENTORY_DATABASE_URL").unwrap_or_else(|_| DEFAULT_INVENTORY_DB_URL.to_owned())
}

/// Resolve the credentials database URL from `LOGIN_DATABASE_URL`.
pub fn login_db_url() -> String {
    dotenvy::dotenv().ok();
    env::var("LOGIN_DATABASE_URL").unwrap_or_else(|_| DEFAULT_LOGIN_DB_URL.to_owned())
}

/// Open a pool over a database file, creating the file on first use.
/// WAL plus a busy timeout keeps a reader and a writer from tripping over
/// each other; SQLite itself serializes writers.
pub async fn connect(database_url: &str) -> Result<SqlitePool, sqlx::Error> {
    let opts = SqliteConnectOptions::from_str(database_url)?
        .create_if_missing(true)
        .journal_mode(SqliteJournalMode::Wal)
        .busy_timeout(Duration::from_secs(5));

    SqlitePool::connect_with(opts).await
}

/// Open a pool over a private in-memory database. Capped at one connection:
/// with SQLite, every new connection to `:memory:` would otherwise get its
/// own empty database.
pub async fn connect_in_memory() -> Result<SqlitePool, sqlx::Error> {
    let opts = SqliteConnectOptions::from_str("sqlite::memory:")?;

    SqlitePoolOptions::new()
        .max_connections(1)
        .connect_with(opts)
        .await
}
