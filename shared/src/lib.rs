//! Shared types for the label workspace
//!
//! Label template model, product/print context, geometry validation,
//! unified error codes and small utilities used by the store, the engine
//! and the studio binary.

pub mod error;
pub mod models;
pub mod util;
pub mod validation;

// Re-exports
pub use error::{AppError, AppResult, ErrorCategory, ErrorCode};
pub use serde::{Deserialize, Serialize};
