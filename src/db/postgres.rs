use log::info;
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;

pub async fn create_pool(database_url: &str, max_connections: u32) -> Result<PgPool, sqlx::Error> {
    info!("Connecting to database (max_connections={})", max_connections);
    PgPoolOptions::new()
        .max_connections(max_connections)
        .connect(database_url)
        .await
}

const CREATE_EMPLOYEES_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS employees (
    employee_id SERIAL PRIMARY KEY,
    first_name VARCHAR(50) NOT NULL,
    last_name VARCHAR(50) NOT NULL,
    email VARCHAR(100) NOT NULL,
    date_of_birth DATE,
    is_active BOOLEAN NOT NULL DEFAULT TRUE,
    created_date TIMESTAMPTZ NOT NULL DEFAULT NOW()
)
"#;

pub(crate) const CREATE_EMAIL_INDEX: &str =
    "CREATE UNIQUE INDEX IF NOT EXISTS employees_email_key ON employees (LOWER(email))";

/// Creates the employees table and its unique email index if they are missing.
pub async fn ensure_schema(pool: &PgPool) -> Result<(), sqlx::Error> {
    info!("Ensuring employees schema");
    sqlx::query(CREATE_EMPLOYEES_TABLE).execute(pool).await?;
    sqlx::query(CREATE_EMAIL_INDEX).execute(pool).await?;
    Ok(())
}
