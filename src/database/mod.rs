use crate::config::{ConfigError, ConfigService};
use sea_orm::{ConnectOptions, ConnectionTrait, Database, DatabaseConnection, DbBackend, DbErr};
use thiserror::Error;

pub const IN_MEMORY_URL: &str = "sqlite::memory:";

const CREATE_PRODUCTS_POSTGRES: &str = "CREATE TABLE IF NOT EXISTS products (
    id BIGSERIAL PRIMARY KEY,
    name VARCHAR(255) NOT NULL,
    price TEXT NOT NULL
)";

const CREATE_PRODUCTS_MYSQL: &str = "CREATE TABLE IF NOT EXISTS products (
    id BIGINT NOT NULL AUTO_INCREMENT PRIMARY KEY,
    name VARCHAR(255) NOT NULL,
    price VARCHAR(64) NOT NULL
)";

// Prices are kept as decimal text on every backend so any value accepted
// at the API reads back digit for digit.
const CREATE_PRODUCTS_SQLITE: &str = "CREATE TABLE IF NOT EXISTS products (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL,
    price TEXT NOT NULL
)";

#[derive(Debug, Error)]
pub enum DatabaseError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("Database error: {0}")]
    Db(#[from] DbErr),
}

/// Open the connection pool described by `DATABASE_URL` and friends.
pub async fn connect(config: &ConfigService) -> Result<DatabaseConnection, DatabaseError> {
    let url = config.database_url();
    let max_connections = config.database_max_connections()?;
    let log_statements = config.database_log_statements()?;

    tracing::info!("📦 Database: Initializing connection pool...");
    let conn = connect_url(&url, max_connections, log_statements).await?;
    tracing::info!(
        backend = ?conn.get_database_backend(),
        max_connections,
        "✅ Database: Connection pool initialized"
    );
    Ok(conn)
}

pub async fn connect_url(
    url: &str,
    max_connections: u32,
    log_statements: bool,
) -> Result<DatabaseConnection, DbErr> {
    let mut options = ConnectOptions::new(url.to_string());
    options.sqlx_logging(log_statements);

    // Every pooled connection to `sqlite::memory:` is a separate database.
    if url.starts_with(IN_MEMORY_URL) {
        options.max_connections(1).min_connections(1);
    } else {
        options.max_connections(max_connections);
    }

    Database::connect(options).await
}

/// A fresh in-memory database with the schema already in place.
pub async fn connect_in_memory() -> Result<DatabaseConnection, DbErr> {
    let conn = connect_url(IN_MEMORY_URL, 1, false).await?;
    ensure_schema(&conn).await?;
    Ok(conn)
}

/// Create the `products` table when it does not exist yet.
pub async fn ensure_schema(conn: &DatabaseConnection) -> Result<(), DbErr> {
    let backend = conn.get_database_backend();
    let ddl = match backend {
        DbBackend::Postgres => CREATE_PRODUCTS_POSTGRES,
        DbBackend::MySql => CREATE_PRODUCTS_MYSQL,
        _ => CREATE_PRODUCTS_SQLITE,
    };

    conn.execute_unprepared(ddl).await?;
    tracing::debug!(?backend, "Database: products schema ready");
    Ok(())
}
