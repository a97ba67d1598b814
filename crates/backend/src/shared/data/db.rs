use sea_orm::{ConnectionTrait, Database, DatabaseBackend, DatabaseConnection, Statement};
use std::path::Path;

/// Открыть SQLite базу и создать недостающие таблицы
///
/// Соединение возвращается вызывающему коду и дальше передается
/// через состояние приложения.
pub async fn initialize_database(db_file: &Path) -> anyhow::Result<DatabaseConnection> {
    if let Some(parent) = db_file.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let absolute_path = if db_file.is_absolute() {
        db_file.to_path_buf()
    } else {
        std::env::current_dir()?.join(db_file)
    };
    // Normalize path separators and ensure proper URL form on Windows
    let normalized = absolute_path.to_string_lossy().replace('\\', "/");
    let needs_leading_slash = !normalized.starts_with('/') && normalized.contains(':');
    let prefix = if needs_leading_slash { "/" } else { "" };
    let db_url = format!("sqlite://{}{}?mode=rwc", prefix, normalized);

    tracing::info!("Opening database: {}", absolute_path.display());
    let conn = Database::connect(&db_url).await?;
    ensure_schema(&conn).await?;
    Ok(conn)
}

/// Minimal schema bootstrap
pub async fn ensure_schema(conn: &DatabaseConnection) -> anyhow::Result<()> {
    let check_config_table = r#"
        SELECT name FROM sqlite_master
        WHERE type='table' AND name='a026_merchant_config';
    "#;
    let config_table_exists = conn
        .query_all(Statement::from_string(
            DatabaseBackend::Sqlite,
            check_config_table.to_string(),
        ))
        .await?;

    if config_table_exists.is_empty() {
        tracing::info!("Creating a026_merchant_config table");
        let create_config_table_sql = r#"
            CREATE TABLE IF NOT EXISTS a026_merchant_config (
                company_id TEXT PRIMARY KEY NOT NULL,
                config_json TEXT NOT NULL,
                updated_at TEXT NOT NULL
            );
        "#;
        conn.execute(Statement::from_string(
            DatabaseBackend::Sqlite,
            create_config_table_sql.to_string(),
        ))
        .await?;
    }

    Ok(())
}

/// In-memory база для тестов (одно соединение, иначе у каждого своя БД)
#[cfg(test)]
pub async fn connect_in_memory() -> anyhow::Result<DatabaseConnection> {
    use sea_orm::ConnectOptions;

    let mut options = ConnectOptions::new("sqlite::memory:".to_string());
    options
        .max_connections(1)
        .min_connections(1)
        .sqlx_logging(false);
    let conn = Database::connect(options).await?;
    ensure_schema(&conn).await?;
    Ok(conn)
}
