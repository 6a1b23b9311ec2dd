//! Preview viewport
//!
//! The only place a display scale exists. It projects a resolved document
//! into pixel space for the editing surface and converts pointer positions
//! back to millimetres; nothing here is ever written into a template.

use serde::Serialize;
use shared::models::line_height_mm;

use crate::resolver::{ResolvedDocument, ResolvedKind};
use crate::units::{MM_PER_INCH, px_to_mm};

/// Pixels per millimetre used when none is configured (~100 dpi)
pub const DEFAULT_SCALE: f32 = 4.0;

/// Rough glyph advance relative to the font height, for hit testing only
const GLYPH_ASPECT: f32 = 0.55;

/// Display scale for the editing surface
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Viewport {
    scale: f32,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            scale: DEFAULT_SCALE,
        }
    }
}

impl Viewport {
    /// Non-finite or non-positive scales fall back to [`DEFAULT_SCALE`]
    pub fn new(scale: f32) -> Self {
        if scale.is_finite() && scale > 0.0 {
            Self { scale }
        } else {
            Self::default()
        }
    }

    pub fn from_dpi(dpi: f32) -> Self {
        Self::new(dpi / MM_PER_INCH)
    }

    /// Pixels per millimetre
    pub fn scale(&self) -> f32 {
        self.scale
    }

    pub fn to_px(&self, mm: f32) -> f32 {
        mm * self.scale
    }

    pub fn to_mm(&self, px: f32) -> f32 {
        px_to_mm(px, self.scale)
    }

    /// Project every element into pixel space, in paint order
    pub fn project(&self, doc: &ResolvedDocument) -> PreviewScene {
        let shapes = doc
            .elements
            .iter()
            .map(|element| {
                let (x, y) = element.origin();
                let (width, height, kind) = match &element.kind {
                    ResolvedKind::Text(t) => self.text_shape(&t.content, t.font_size),
                    ResolvedKind::Attribute { binding, text } => {
                        self.text_shape(text, binding.font_size)
                    }
                    ResolvedKind::Barcode {
                        geometry, pattern, ..
                    } => {
                        let bars = pattern
                            .layout(geometry.x, geometry.width)
                            .into_iter()
                            .map(|(bx, bw)| (self.to_px(bx), self.to_px(bw)))
                            .collect();
                        (geometry.width, geometry.height, ShapeKind::Bars { bars })
                    }
                    ResolvedKind::Line(b) | ResolvedKind::Background(b) => {
                        (b.width, b.height, ShapeKind::Fill)
                    }
                    ResolvedKind::Rectangle(b) => (b.width, b.height, ShapeKind::Outline),
                };
                PreviewShape {
                    element_id: element.id.clone(),
                    x: self.to_px(x),
                    y: self.to_px(y),
                    width: self.to_px(width),
                    height: self.to_px(height),
                    kind,
                }
            })
            .collect();

        PreviewScene {
            width: self.to_px(doc.width),
            height: self.to_px(doc.height),
            shapes,
        }
    }

    /// Text box in mm: estimated run width, one line high
    fn text_shape(&self, text: &str, font_size: i32) -> (f32, f32, ShapeKind) {
        let line = line_height_mm(font_size);
        let width = text.chars().count() as f32 * line * GLYPH_ASPECT;
        (
            width,
            line,
            ShapeKind::Text {
                text: text.to_string(),
                font_px: self.to_px(line),
            },
        )
    }
}

/// Pixel-space rendering of a resolved document
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PreviewScene {
    pub width: f32,
    pub height: f32,
    pub shapes: Vec<PreviewShape>,
}

impl PreviewScene {
    /// Topmost element under the pointer
    pub fn hit_test(&self, px: f32, py: f32) -> Option<&str> {
        self.shapes
            .iter()
            .rev()
            .find(|s| px >= s.x && px <= s.x + s.width && py >= s.y && py <= s.y + s.height)
            .map(|s| s.element_id.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PreviewShape {
    pub element_id: String,
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub kind: ShapeKind,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "shape", rename_all = "lowercase")]
pub enum ShapeKind {
    Text { text: String, font_px: f32 },
    /// Dark bars as `(x, width)` in pixels
    Bars { bars: Vec<(f32, f32)> },
    Fill,
    Outline,
}
