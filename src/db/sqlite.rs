use std::str::FromStr;

use log::info;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};

use super::postgres::CREATE_EMAIL_INDEX;

pub const SQLITE_MEMORY_URL: &str = "sqlite::memory:";

/// Opens a SQLite pool. An in-memory database lives only as long as its
/// connection, so memory URLs get a single connection that never expires.
pub async fn create_sqlite_pool(
    database_url: &str,
    case_sensitive_search: bool,
) -> Result<SqlitePool, sqlx::Error> {
    let like = if case_sensitive_search { "ON" } else { "OFF" };
    let options = SqliteConnectOptions::from_str(database_url)?
        .create_if_missing(true)
        .pragma("case_sensitive_like", like);

    let pool_options = if is_memory_url(database_url) {
        info!("Opening in-memory SQLite database; data is lost on shutdown");
        SqlitePoolOptions::new()
            .max_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
    } else {
        info!("Opening SQLite database at {}", database_url);
        SqlitePoolOptions::new()
    };

    pool_options.connect_with(options).await
}

fn is_memory_url(database_url: &str) -> bool {
    database_url.contains(":memory:") || database_url.contains("mode=memory")
}

const CREATE_EMPLOYEES_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS employees (
    employee_id INTEGER PRIMARY KEY AUTOINCREMENT,
    first_name VARCHAR(50) NOT NULL,
    last_name VARCHAR(50) NOT NULL,
    email VARCHAR(100) NOT NULL,
    date_of_birth DATE,
    is_active BOOLEAN NOT NULL DEFAULT TRUE,
    created_date TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP
)
"#;

pub async fn ensure_sqlite_schema(pool: &SqlitePool) -> Result<(), sqlx::Error> {
    info!("Ensuring employees schema");
    sqlx::query(CREATE_EMPLOYEES_TABLE).execute(pool).await?;
    sqlx::query(CREATE_EMAIL_INDEX).execute(pool).await?;
    Ok(())
}
