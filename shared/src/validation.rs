//! Template validation
//!
//! Geometry and text checks run before a template is persisted. Attribute
//! keys are only checked for presence here; the engine checks them against
//! its registry at authoring time.

use std::collections::HashSet;

use thiserror::Error;

use crate::error::{AppError, ErrorCode};
use crate::models::{Element, ElementKind, MAX_FONT_SIZE, MIN_FONT_SIZE};

/// Template names: same limit as other entity names
pub const MAX_NAME_LEN: usize = 200;

/// Literal text content
pub const MAX_CONTENT_LEN: usize = 500;

/// Validation failure, caller-correctable
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("{field} must not be empty")]
    Empty { field: &'static str },

    #[error("{field} is too long ({len} chars, max {max})")]
    TooLong {
        field: &'static str,
        len: usize,
        max: usize,
    },

    #[error("template size must be positive (got {width} x {height} mm)")]
    InvalidSize { width: f32, height: f32 },

    #[error("element {id}: {reason}")]
    InvalidElement { id: String, reason: String },

    #[error("element {id} lies outside the {width} x {height} mm canvas")]
    OutOfBounds { id: String, width: f32, height: f32 },

    #[error("element {id}: font size {font_size} outside {}..={}", MIN_FONT_SIZE, MAX_FONT_SIZE)]
    FontSize { id: String, font_size: i32 },

    #[error("duplicate element id {0}")]
    DuplicateElementId(String),
}

impl From<ValidationError> for AppError {
    fn from(err: ValidationError) -> Self {
        let code = match &err {
            ValidationError::InvalidSize { .. } => ErrorCode::LabelTemplateInvalidSize,
            ValidationError::OutOfBounds { .. } => ErrorCode::LabelElementOutOfBounds,
            ValidationError::TooLong { .. } | ValidationError::FontSize { .. } => {
                ErrorCode::ValueOutOfRange
            }
            ValidationError::Empty { .. } => ErrorCode::RequiredField,
            _ => ErrorCode::ValidationFailed,
        };
        AppError::with_message(code, err.to_string())
    }
}

/// Validate that a required string is non-empty and within the length limit.
pub fn validate_required_text(
    value: &str,
    field: &'static str,
    max_len: usize,
) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::Empty { field });
    }
    let len = value.chars().count();
    if len > max_len {
        return Err(ValidationError::TooLong {
            field,
            len,
            max: max_len,
        });
    }
    Ok(())
}

/// Validate a whole template before persistence
pub fn validate_template(
    name: &str,
    width: f32,
    height: f32,
    elements: &[Element],
) -> Result<(), ValidationError> {
    validate_required_text(name, "name", MAX_NAME_LEN)?;

    if !(width.is_finite() && height.is_finite() && width > 0.0 && height > 0.0) {
        return Err(ValidationError::InvalidSize { width, height });
    }

    let mut seen = HashSet::with_capacity(elements.len());
    for element in elements {
        if !seen.insert(element.id.as_str()) {
            return Err(ValidationError::DuplicateElementId(element.id.clone()));
        }
        validate_element(element, width, height)?;
    }
    Ok(())
}

fn validate_element(element: &Element, width: f32, height: f32) -> Result<(), ValidationError> {
    let invalid = |reason: &str| ValidationError::InvalidElement {
        id: element.id.clone(),
        reason: reason.to_string(),
    };

    if element.id.trim().is_empty() {
        return Err(invalid("id must not be empty"));
    }

    let (x, y) = element.origin();
    let (w, h) = element.extent();
    if ![x, y, w, h].iter().all(|v| v.is_finite()) {
        return Err(invalid("coordinates must be finite"));
    }

    match &element.kind {
        ElementKind::Text(t) => {
            if t.content.chars().count() > MAX_CONTENT_LEN {
                return Err(invalid("content is too long"));
            }
        }
        ElementKind::Attribute(a) => {
            if a.attribute_key.trim().is_empty() {
                return Err(invalid("attribute key must not be empty"));
            }
        }
        ElementKind::Barcode(b)
        | ElementKind::Line(b)
        | ElementKind::Rectangle(b)
        | ElementKind::Background(b) => {
            if b.width <= 0.0 || b.height <= 0.0 {
                return Err(invalid("width and height must be positive"));
            }
        }
    }

    if let Some(font_size) = element.font_size()
        && !(MIN_FONT_SIZE..=MAX_FONT_SIZE).contains(&font_size)
    {
        return Err(ValidationError::FontSize {
            id: element.id.clone(),
            font_size,
        });
    }

    if !element.fits_within(width, height) {
        return Err(ValidationError::OutOfBounds {
            id: element.id.clone(),
            width,
            height,
        });
    }
    Ok(())
}
