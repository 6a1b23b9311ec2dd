//! SQLite persistence
//!
//! Handles the connection pool, migrations and the [`TemplateStore`]
//! implementation backed by it.

pub mod label_template;

use std::str::FromStr;

use shared::models::{LabelTemplate, LabelTemplateCreate, LabelTemplateUpdate, TemplateId};
use sqlx::SqlitePool;
use sqlx::migrate::Migrator;
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous};

use crate::{RepoError, RepoResult, TemplateStore};

static MIGRATOR: Migrator = sqlx::migrate!("./migrations");

/// Database service: owns a SQLite connection pool
#[derive(Clone)]
pub struct DbService {
    pub pool: SqlitePool,
}

impl DbService {
    /// Open (or create) a database file with WAL mode and run migrations
    pub async fn new(db_path: &str) -> RepoResult<Self> {
        let options = SqliteConnectOptions::from_str(&format!("sqlite:{db_path}"))
            .map_err(|e| RepoError::Database(format!("Invalid database path: {e}")))?
            .create_if_missing(true)
            .journal_mode(SqliteJournalMode::Wal)
            .synchronous(SqliteSynchronous::Normal)
            .foreign_keys(true)
            .busy_timeout(std::time::Duration::from_secs(5));

        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect_with(options)
            .await
            .map_err(|e| RepoError::Database(format!("Failed to open database: {e}")))?;

        tracing::info!(db_path, "Database connection established (SQLite WAL)");
        Self::migrate(pool).await
    }

    /// Private in-memory database on a single pinned connection
    pub async fn in_memory() -> RepoResult<Self> {
        let options = SqliteConnectOptions::from_str("sqlite::memory:")?.foreign_keys(true);

        // Every connection to :memory: is a separate database, so keep
        // exactly one alive for the lifetime of the pool.
        let pool = SqlitePoolOptions::new()
            .min_connections(1)
            .max_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect_with(options)
            .await?;

        Self::migrate(pool).await
    }

    async fn migrate(pool: SqlitePool) -> RepoResult<Self> {
        MIGRATOR.run(&pool).await?;
        tracing::debug!("Database migrations applied");
        Ok(Self { pool })
    }
}

/// [`TemplateStore`] over a SQLite pool
#[derive(Clone)]
pub struct SqliteTemplateStore {
    pool: SqlitePool,
}

impl SqliteTemplateStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

impl From<&DbService> for SqliteTemplateStore {
    fn from(db: &DbService) -> Self {
        Self::new(db.pool.clone())
    }
}

impl TemplateStore for SqliteTemplateStore {
    async fn list(&self, tenant_id: &str) -> RepoResult<Vec<LabelTemplate>> {
        label_template::list(&self.pool, tenant_id).await
    }

    async fn get(&self, tenant_id: &str, id: TemplateId) -> RepoResult<Option<LabelTemplate>> {
        label_template::get(&self.pool, tenant_id, id).await
    }

    async fn create(
        &self,
        tenant_id: &str,
        data: LabelTemplateCreate,
    ) -> RepoResult<LabelTemplate> {
        label_template::create(&self.pool, tenant_id, data).await
    }

    async fn update(
        &self,
        tenant_id: &str,
        id: TemplateId,
        data: LabelTemplateUpdate,
    ) -> RepoResult<LabelTemplate> {
        label_template::update(&self.pool, tenant_id, id, data).await
    }

    async fn delete(&self, tenant_id: &str, id: TemplateId) -> RepoResult<bool> {
        label_template::delete(&self.pool, tenant_id, id).await
    }
}
