//! Label Template Model
//!
//! All coordinates and extents are millimetres in the template's own space
//! (origin top-left, x right, y down). Font sizes are points.

use serde::{Deserialize, Serialize};

/// Template identifier. Predefined catalog entries use ids below
/// [`PREDEFINED_ID_LIMIT`]; custom templates get snowflake ids.
pub type TemplateId = i64;

/// Ids below this value are reserved for the predefined catalog
pub const PREDEFINED_ID_LIMIT: TemplateId = 1000;

/// Millimetres per typographic point
pub const PT_TO_MM: f32 = 0.3528;

pub const DEFAULT_FONT_SIZE: i32 = 10;
/// Text never shrinks below this, so it stays legible on thermal stock
pub const MIN_FONT_SIZE: i32 = 6;
pub const MAX_FONT_SIZE: i32 = 72;

/// Height in mm of one text line at the given font size
pub fn line_height_mm(font_size: i32) -> f32 {
    font_size as f32 * PT_TO_MM
}

/// Template kind
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
#[cfg_attr(feature = "db", derive(sqlx::Type))]
#[cfg_attr(feature = "db", sqlx(rename_all = "lowercase"))]
pub enum TemplateKind {
    /// Read-only catalog entry, never persisted
    Predefined,
    /// Tenant-owned, fully mutable
    #[default]
    Custom,
}

/// Element discriminant without payload
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
#[cfg_attr(feature = "db", derive(sqlx::Type))]
#[cfg_attr(feature = "db", sqlx(rename_all = "lowercase"))]
pub enum ElementType {
    Text,
    Attribute,
    Barcode,
    Line,
    Rectangle,
    Background,
}

impl ElementType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ElementType::Text => "text",
            ElementType::Attribute => "attribute",
            ElementType::Barcode => "barcode",
            ElementType::Line => "line",
            ElementType::Rectangle => "rectangle",
            ElementType::Background => "background",
        }
    }

    /// Whether the element carries an explicit width/height
    pub fn is_boxed(&self) -> bool {
        !matches!(self, ElementType::Text | ElementType::Attribute)
    }
}

/// Literal label text
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextElement {
    pub x: f32,
    pub y: f32,
    pub content: String,
    #[serde(default = "default_font_size")]
    pub font_size: i32,
}

/// Text bound to an attribute of the print context
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttributeElement {
    pub x: f32,
    pub y: f32,
    pub attribute_key: String,
    #[serde(default = "default_font_size")]
    pub font_size: i32,
}

/// Geometry shared by barcode, line, rectangle and background elements
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoxElement {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

fn default_font_size() -> i32 {
    DEFAULT_FONT_SIZE
}

/// Element payload, discriminated by `type`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ElementKind {
    Text(TextElement),
    Attribute(AttributeElement),
    Barcode(BoxElement),
    /// A filled bar
    Line(BoxElement),
    /// An outlined box
    Rectangle(BoxElement),
    /// A filled area painted beneath later elements
    Background(BoxElement),
}

/// One positioned visual primitive
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Element {
    /// Client-generated UUID
    pub id: String,
    #[serde(flatten)]
    pub kind: ElementKind,
}

impl Element {
    pub fn new(kind: ElementKind) -> Self {
        Self {
            id: crate::util::element_id(),
            kind,
        }
    }

    pub fn element_type(&self) -> ElementType {
        match &self.kind {
            ElementKind::Text(_) => ElementType::Text,
            ElementKind::Attribute(_) => ElementType::Attribute,
            ElementKind::Barcode(_) => ElementType::Barcode,
            ElementKind::Line(_) => ElementType::Line,
            ElementKind::Rectangle(_) => ElementType::Rectangle,
            ElementKind::Background(_) => ElementType::Background,
        }
    }

    /// Top-left corner
    pub fn origin(&self) -> (f32, f32) {
        match &self.kind {
            ElementKind::Text(t) => (t.x, t.y),
            ElementKind::Attribute(a) => (a.x, a.y),
            ElementKind::Barcode(b)
            | ElementKind::Line(b)
            | ElementKind::Rectangle(b)
            | ElementKind::Background(b) => (b.x, b.y),
        }
    }

    pub fn set_origin(&mut self, x: f32, y: f32) {
        match &mut self.kind {
            ElementKind::Text(t) => {
                t.x = x;
                t.y = y;
            }
            ElementKind::Attribute(a) => {
                a.x = x;
                a.y = y;
            }
            ElementKind::Barcode(b)
            | ElementKind::Line(b)
            | ElementKind::Rectangle(b)
            | ElementKind::Background(b) => {
                b.x = x;
                b.y = y;
            }
        }
    }

    /// Width and height used for bounds checks.
    ///
    /// Text is anchored at its origin: zero horizontal extent (the print
    /// sink clips), one line of height.
    pub fn extent(&self) -> (f32, f32) {
        match &self.kind {
            ElementKind::Text(t) => (0.0, line_height_mm(t.font_size)),
            ElementKind::Attribute(a) => (0.0, line_height_mm(a.font_size)),
            ElementKind::Barcode(b)
            | ElementKind::Line(b)
            | ElementKind::Rectangle(b)
            | ElementKind::Background(b) => (b.width, b.height),
        }
    }

    pub fn font_size(&self) -> Option<i32> {
        match &self.kind {
            ElementKind::Text(t) => Some(t.font_size),
            ElementKind::Attribute(a) => Some(a.font_size),
            _ => None,
        }
    }

    pub fn font_size_mut(&mut self) -> Option<&mut i32> {
        match &mut self.kind {
            ElementKind::Text(t) => Some(&mut t.font_size),
            ElementKind::Attribute(a) => Some(&mut a.font_size),
            _ => None,
        }
    }

    pub fn as_box_mut(&mut self) -> Option<&mut BoxElement> {
        match &mut self.kind {
            ElementKind::Barcode(b)
            | ElementKind::Line(b)
            | ElementKind::Rectangle(b)
            | ElementKind::Background(b) => Some(b),
            _ => None,
        }
    }

    /// Whether position plus extent lies inside `[0, width] x [0, height]`
    pub fn fits_within(&self, width: f32, height: f32) -> bool {
        let (x, y) = self.origin();
        let (w, h) = self.extent();
        x >= 0.0 && y >= 0.0 && x + w <= width && y + h <= height
    }

    /// Move the element so that it lies inside the canvas.
    ///
    /// Boxes larger than the canvas are shrunk first; the origin is then
    /// clamped to `[0, canvas - extent]` on each axis.
    pub fn clamp_into(&mut self, width: f32, height: f32) {
        if let Some(b) = self.as_box_mut() {
            b.width = b.width.min(width);
            b.height = b.height.min(height);
        }
        let (x, y) = self.origin();
        let (w, h) = self.extent();
        let max_x = (width - w).max(0.0);
        let max_y = (height - h).max(0.0);
        self.set_origin(x.clamp(0.0, max_x), y.clamp(0.0, max_y));
    }
}

/// Label template entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct LabelTemplate {
    pub id: TemplateId,
    pub name: String,
    /// Canvas width in mm
    pub width: f32,
    /// Canvas height in mm
    pub height: f32,
    #[serde(default)]
    pub kind: TemplateKind,
    pub created_at: Option<i64>,
    pub updated_at: Option<i64>,

    // -- Relations (populated by application code, skipped by FromRow) --
    /// Paint order: later entries paint over earlier ones
    #[cfg_attr(feature = "db", sqlx(skip))]
    #[serde(default)]
    pub elements: Vec<Element>,
}

impl LabelTemplate {
    pub fn is_predefined(&self) -> bool {
        self.kind == TemplateKind::Predefined
    }

    pub fn element(&self, id: &str) -> Option<&Element> {
        self.elements.iter().find(|e| e.id == id)
    }
}

/// Create label template payload
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LabelTemplateCreate {
    pub name: String,
    pub width: f32,
    pub height: f32,
    #[serde(default)]
    pub elements: Vec<Element>,
}

/// Update label template payload (full replace, no partial fields)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LabelTemplateUpdate {
    pub name: String,
    pub width: f32,
    pub height: f32,
    #[serde(default)]
    pub elements: Vec<Element>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn boxed(x: f32, y: f32, width: f32, height: f32) -> Element {
        Element {
            id: "e1".to_string(),
            kind: ElementKind::Rectangle(BoxElement {
                x,
                y,
                width,
                height,
            }),
        }
    }

    #[test]
    fn test_element_json_is_flat_and_tagged() {
        let element = Element {
            id: "a1".to_string(),
            kind: ElementKind::Attribute(AttributeElement {
                x: 5.0,
                y: 5.0,
                attribute_key: "unit-price".to_string(),
                font_size: 12,
            }),
        };
        let json = serde_json::to_value(&element).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "id": "a1",
                "type": "attribute",
                "x": 5.0,
                "y": 5.0,
                "attribute_key": "unit-price",
                "font_size": 12
            })
        );
    }

    #[test]
    fn test_element_deserialize_defaults_font_size() {
        let element: Element = serde_json::from_str(
            r#"{"id":"t1","type":"text","x":1.0,"y":2.0,"content":"Hello"}"#,
        )
        .unwrap();
        assert_eq!(element.element_type(), ElementType::Text);
        assert_eq!(element.font_size(), Some(DEFAULT_FONT_SIZE));
    }

    #[test]
    fn test_unknown_element_type_rejected() {
        let result: Result<Element, _> =
            serde_json::from_str(r#"{"id":"q1","type":"qrcode","x":1.0,"y":2.0}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_extent_of_text_is_one_line() {
        let element = Element::new(ElementKind::Text(TextElement {
            x: 0.0,
            y: 0.0,
            content: "abc".to_string(),
            font_size: 10,
        }));
        let (w, h) = element.extent();
        assert_eq!(w, 0.0);
        assert!((h - 3.528).abs() < 1e-4);
    }

    #[test]
    fn test_clamp_into_moves_and_shrinks() {
        let mut element = boxed(35.0, -4.0, 10.0, 50.0);
        element.clamp_into(40.0, 30.0);
        assert_eq!(element.origin(), (30.0, 0.0));
        assert_eq!(element.extent(), (10.0, 30.0));
        assert!(element.fits_within(40.0, 30.0));
    }

    #[test]
    fn test_fits_within() {
        assert!(boxed(0.0, 0.0, 40.0, 30.0).fits_within(40.0, 30.0));
        assert!(!boxed(0.5, 0.0, 40.0, 30.0).fits_within(40.0, 30.0));
        assert!(!boxed(-0.1, 0.0, 1.0, 1.0).fits_within(40.0, 30.0));
    }

    #[test]
    fn test_element_type_is_boxed() {
        assert!(!ElementType::Text.is_boxed());
        assert!(!ElementType::Attribute.is_boxed());
        assert!(ElementType::Barcode.is_boxed());
        assert!(ElementType::Background.is_boxed());
    }
}
