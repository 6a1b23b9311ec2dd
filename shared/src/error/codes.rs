//! Unified error codes
//!
//! Error codes are organized by category:
//! - 0xxx: General errors
//! - 3xxx: Tenant errors
//! - 6xxx: Label errors
//! - 9xxx: System errors

use serde::{Deserialize, Serialize};
use std::fmt;

/// Unified error code enum
///
/// All error codes are represented as u16 values for efficient serialization
/// and cross-language compatibility.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u16", try_from = "u16")]
#[repr(u16)]
pub enum ErrorCode {
    // ==================== 0xxx: General ====================
    /// Validation failed
    ValidationFailed = 2,
    /// Resource not found
    NotFound = 3,
    /// Required field missing
    RequiredField = 7,
    /// Value out of range
    ValueOutOfRange = 8,

    // ==================== 3xxx: Tenant ====================
    /// No tenant selected
    TenantNotSelected = 3001,

    // ==================== 6xxx: Label ====================
    /// Label template not found
    LabelTemplateNotFound = 6001,
    /// Predefined template cannot be modified or deleted
    LabelTemplateReadOnly = 6002,
    /// Template canvas size is invalid
    LabelTemplateInvalidSize = 6003,
    /// Element not found in template
    LabelElementNotFound = 6101,
    /// Element lies outside the canvas
    LabelElementOutOfBounds = 6102,
    /// Attribute key is not registered
    LabelAttributeUnknown = 6201,

    // ==================== 9xxx: System ====================
    /// Database error
    DatabaseError = 9002,
    /// Print operation failed
    PrintFailed = 9202,
}

impl ErrorCode {
    /// Get the numeric code value
    #[inline]
    pub const fn code(&self) -> u16 {
        *self as u16
    }

    /// Get the developer-facing English message for this error code
    pub const fn message(&self) -> &'static str {
        match self {
            // General
            ErrorCode::ValidationFailed => "Validation failed",
            ErrorCode::NotFound => "Resource not found",
            ErrorCode::RequiredField => "Required field is missing",
            ErrorCode::ValueOutOfRange => "Value is out of range",

            // Tenant
            ErrorCode::TenantNotSelected => "No tenant selected",

            // Label
            ErrorCode::LabelTemplateNotFound => "Label template not found",
            ErrorCode::LabelTemplateReadOnly => "Predefined label template is read-only",
            ErrorCode::LabelTemplateInvalidSize => "Label template size must be positive",
            ErrorCode::LabelElementNotFound => "Label element not found",
            ErrorCode::LabelElementOutOfBounds => "Label element lies outside the canvas",
            ErrorCode::LabelAttributeUnknown => "Unknown label attribute",

            // System
            ErrorCode::DatabaseError => "Database error",
            ErrorCode::PrintFailed => "Print operation failed",
        }
    }
}

impl From<ErrorCode> for u16 {
    #[inline]
    fn from(code: ErrorCode) -> Self {
        code.code()
    }
}

/// Error when converting from an invalid u16 to ErrorCode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidErrorCode(pub u16);

impl fmt::Display for InvalidErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid error code: {}", self.0)
    }
}

impl std::error::Error for InvalidErrorCode {}

impl TryFrom<u16> for ErrorCode {
    type Error = InvalidErrorCode;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        match value {
            // General
            2 => Ok(ErrorCode::ValidationFailed),
            3 => Ok(ErrorCode::NotFound),
            7 => Ok(ErrorCode::RequiredField),
            8 => Ok(ErrorCode::ValueOutOfRange),

            // Tenant
            3001 => Ok(ErrorCode::TenantNotSelected),

            // Label
            6001 => Ok(ErrorCode::LabelTemplateNotFound),
            6002 => Ok(ErrorCode::LabelTemplateReadOnly),
            6003 => Ok(ErrorCode::LabelTemplateInvalidSize),
            6101 => Ok(ErrorCode::LabelElementNotFound),
            6102 => Ok(ErrorCode::LabelElementOutOfBounds),
            6201 => Ok(ErrorCode::LabelAttributeUnknown),

            // System
            9002 => Ok(ErrorCode::DatabaseError),
            9202 => Ok(ErrorCode::PrintFailed),

            _ => Err(InvalidErrorCode(value)),
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}
