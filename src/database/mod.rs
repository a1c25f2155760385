mod waitlist;

pub use waitlist::{InsertOutcome, NewWaitlistEntry, StoreError, StoreResult, WaitlistStore};

use std::time::Duration;

use sqlx::{postgres::PgPoolOptions, Connection, PgConnection, PgPool};
use tracing::info;
use uuid::Uuid;

use crate::config::DbConfig;

/// Owns the Postgres connection pool, cheap to clone.
#[derive(Clone, Debug)]
pub struct DbManager {
    db: PgPool,
}

impl DbManager {
    pub async fn init(db_config: &DbConfig) -> Result<Self> {
        info!("{:<20} - Initializing the DB pool", "init_db");
        let max_cons = if cfg!(test) { 1 } else { 5 };

        let db_pool = PgPoolOptions::new()
            .max_connections(max_cons)
            .acquire_timeout(Duration::from_millis(500))
            .connect_with(db_config.connection_options())
            .await
            .map_err(|ex| Error::FailToCreatePool(ex.to_string()))?;

        Ok(Self { db: db_pool })
    }

    /// Runs the embedded migrations against the pool.
    pub async fn migrate(&self) -> Result<()> {
        info!("{:<20} - Running migrations", "migrate_db");
        sqlx::migrate!("./migrations").run(&self.db).await?;
        Ok(())
    }

    /// Creates a fresh database with a random name, migrates it and connects to it.
    /// Meant for tests running against a local Postgres instance.
    pub async fn test_init(db_config: &DbConfig) -> Result<Self> {
        let mut db_config = db_config.clone();
        db_config.db_name = Uuid::new_v4().to_string();

        let mut connection =
            PgConnection::connect_with(&db_config.server_options()).await?;
        let sql = format!(r#"CREATE DATABASE "{}";"#, db_config.db_name);
        sqlx::query(&sql).execute(&mut connection).await?;

        let dm = Self::init(&db_config).await?;
        dm.migrate().await?;

        Ok(dm)
    }

    pub fn db(&self) -> &PgPool {
        &self.db
    }
}

// ###################################
// ->   ERROR
// ###################################
pub type Result<T> = core::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("failed to create db pool: {0}")]
    FailToCreatePool(String),
    #[error("sqlx error: {0}")]
    Sqlx(#[from] sqlx::Error),
    #[error("sqlx migration error: {0}")]
    SqlxMigrate(#[from] sqlx::migrate::MigrateError),
}
