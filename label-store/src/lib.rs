//! # label-store
//!
//! Tenant-scoped persistence for custom label templates.
//!
//! - [`TemplateStore`]: the store boundary (list / get / create / update / delete)
//! - [`MemoryTemplateStore`]: process-local store, used by tests and demos
//! - [`SqliteTemplateStore`]: SQLite store with embedded migrations
//!
//! Every operation is keyed by tenant. An id that exists under another
//! tenant behaves exactly like an absent id. Saves are full upserts of the
//! element list; there is no version token, so the last writer wins.

mod memory;
pub mod sqlite;

pub use memory::MemoryTemplateStore;
pub use sqlite::{DbService, SqliteTemplateStore};

use shared::error::{AppError, ErrorCode};
use shared::models::{
    LabelTemplate, LabelTemplateCreate, LabelTemplateUpdate, PREDEFINED_ID_LIMIT, TemplateId,
};
use shared::validation::ValidationError;
use thiserror::Error;

/// Repository error types
#[derive(Debug, Error)]
pub enum RepoError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Read-only: {0}")]
    ReadOnly(String),

    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error("Tenant id must not be empty")]
    MissingTenant,

    #[error("Database error: {0}")]
    Database(String),
}

impl From<sqlx::Error> for RepoError {
    fn from(err: sqlx::Error) -> Self {
        RepoError::Database(err.to_string())
    }
}

impl From<sqlx::migrate::MigrateError> for RepoError {
    fn from(err: sqlx::migrate::MigrateError) -> Self {
        RepoError::Database(format!("Failed to apply migrations: {err}"))
    }
}

impl From<RepoError> for AppError {
    fn from(err: RepoError) -> Self {
        match err {
            RepoError::NotFound(msg) => AppError::with_message(ErrorCode::LabelTemplateNotFound, msg),
            RepoError::ReadOnly(msg) => AppError::with_message(ErrorCode::LabelTemplateReadOnly, msg),
            RepoError::Validation(e) => e.into(),
            RepoError::MissingTenant => AppError::new(ErrorCode::TenantNotSelected),
            RepoError::Database(msg) => AppError::database(msg),
        }
    }
}

/// Result type for repository operations
pub type RepoResult<T> = Result<T, RepoError>;

/// Store boundary for custom label templates
#[allow(async_fn_in_trait)]
pub trait TemplateStore {
    /// The tenant's custom templates, oldest first
    async fn list(&self, tenant_id: &str) -> RepoResult<Vec<LabelTemplate>>;

    async fn get(&self, tenant_id: &str, id: TemplateId) -> RepoResult<Option<LabelTemplate>>;

    /// Persist a new template under a freshly generated id
    async fn create(&self, tenant_id: &str, data: LabelTemplateCreate)
    -> RepoResult<LabelTemplate>;

    /// Full replace of name, size and element list
    async fn update(
        &self,
        tenant_id: &str,
        id: TemplateId,
        data: LabelTemplateUpdate,
    ) -> RepoResult<LabelTemplate>;

    /// Returns whether a row was removed; absent ids are a no-op
    async fn delete(&self, tenant_id: &str, id: TemplateId) -> RepoResult<bool>;
}

// ── Shared guards ───────────────────────────────────────────────────────

pub(crate) fn ensure_tenant(tenant_id: &str) -> RepoResult<()> {
    if tenant_id.trim().is_empty() {
        return Err(RepoError::MissingTenant);
    }
    Ok(())
}

pub(crate) fn ensure_mutable(id: TemplateId) -> RepoResult<()> {
    if id < PREDEFINED_ID_LIMIT {
        return Err(RepoError::ReadOnly(format!(
            "Label template {id} is predefined"
        )));
    }
    Ok(())
}

pub(crate) fn not_found(id: TemplateId) -> RepoError {
    RepoError::NotFound(format!("Label template {id} not found"))
}
