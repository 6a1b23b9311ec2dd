//! Error types for editing and printing

use label_store::RepoError;
use shared::error::{AppError, ErrorCode};
use shared::validation::ValidationError;
use thiserror::Error;

/// Editor error types
#[derive(Debug, Error)]
pub enum EditorError {
    #[error("Element not found: {0}")]
    ElementNotFound(String),

    /// Attribute key not known to the registry
    #[error("Unknown attribute key: {0}")]
    UnknownAttribute(String),

    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// Template store rejected the save
    #[error("Store error: {0}")]
    Store(#[from] RepoError),
}

impl From<EditorError> for AppError {
    fn from(err: EditorError) -> Self {
        match err {
            EditorError::ElementNotFound(id) => AppError::with_message(
                ErrorCode::LabelElementNotFound,
                format!("Element {id} not found"),
            )
            .with_detail("element_id", id),
            EditorError::UnknownAttribute(key) => AppError::with_message(
                ErrorCode::LabelAttributeUnknown,
                format!("Unknown attribute key: {key}"),
            )
            .with_detail("attribute_key", key),
            EditorError::Validation(e) => e.into(),
            EditorError::Store(e) => e.into(),
        }
    }
}

/// Result type for editor operations
pub type EditorResult<T> = Result<T, EditorError>;

/// Print sink error types
#[derive(Debug, Error)]
pub enum PrintError {
    /// IO error while emitting pages
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl From<PrintError> for AppError {
    fn from(err: PrintError) -> Self {
        AppError::with_message(ErrorCode::PrintFailed, err.to_string())
    }
}

/// Result type for print operations
pub type PrintResult<T> = Result<T, PrintError>;
