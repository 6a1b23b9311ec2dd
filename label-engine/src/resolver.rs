//! Render Resolver
//!
//! Turns a template plus a [`PrintContext`] into a [`ResolvedDocument`]:
//! attribute bindings become text, barcode elements get their bar pattern.
//! Preview and print both start from the resolved document, so they cannot
//! disagree about content.

use std::sync::LazyLock;

use serde::Serialize;
use shared::models::{
    AttributeElement, BoxElement, Element, ElementKind, LabelTemplate, PrintContext, TemplateId,
    TextElement,
};
use tracing::{debug, instrument, warn};

use crate::attribute::AttributeRegistry;
use crate::barcode::BarPattern;

static STANDARD: LazyLock<Resolver> = LazyLock::new(Resolver::standard);

/// Resolve against the standard attribute registry
pub fn resolve(template: &LabelTemplate, ctx: &PrintContext) -> ResolvedDocument {
    STANDARD.resolve(template, ctx)
}

/// A template with every binding computed into literal content
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResolvedDocument {
    pub template_id: TemplateId,
    pub name: String,
    pub width: f32,
    pub height: f32,
    /// Paint order
    pub elements: Vec<ResolvedElement>,
}

impl ResolvedDocument {
    pub fn element(&self, id: &str) -> Option<&ResolvedElement> {
        self.elements.iter().find(|e| e.id == id)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResolvedElement {
    pub id: String,
    #[serde(flatten)]
    pub kind: ResolvedKind,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ResolvedKind {
    Text(TextElement),
    Attribute {
        #[serde(flatten)]
        binding: AttributeElement,
        text: String,
    },
    Barcode {
        #[serde(flatten)]
        geometry: BoxElement,
        value: String,
        pattern: BarPattern,
    },
    Line(BoxElement),
    Rectangle(BoxElement),
    Background(BoxElement),
}

impl ResolvedElement {
    /// Displayed string for text and attribute elements
    pub fn text(&self) -> Option<&str> {
        match &self.kind {
            ResolvedKind::Text(t) => Some(&t.content),
            ResolvedKind::Attribute { text, .. } => Some(text),
            _ => None,
        }
    }

    pub fn font_size(&self) -> Option<i32> {
        match &self.kind {
            ResolvedKind::Text(t) => Some(t.font_size),
            ResolvedKind::Attribute { binding, .. } => Some(binding.font_size),
            _ => None,
        }
    }

    /// Top-left corner in mm
    pub fn origin(&self) -> (f32, f32) {
        match &self.kind {
            ResolvedKind::Text(t) => (t.x, t.y),
            ResolvedKind::Attribute { binding, .. } => (binding.x, binding.y),
            ResolvedKind::Barcode { geometry: b, .. }
            | ResolvedKind::Line(b)
            | ResolvedKind::Rectangle(b)
            | ResolvedKind::Background(b) => (b.x, b.y),
        }
    }

    /// Geometry of boxed kinds
    pub fn geometry(&self) -> Option<&BoxElement> {
        match &self.kind {
            ResolvedKind::Barcode { geometry: b, .. }
            | ResolvedKind::Line(b)
            | ResolvedKind::Rectangle(b)
            | ResolvedKind::Background(b) => Some(b),
            _ => None,
        }
    }
}

/// Resolver over a fixed attribute registry
#[derive(Debug, Clone)]
pub struct Resolver {
    registry: AttributeRegistry,
}

impl Resolver {
    pub fn new(registry: AttributeRegistry) -> Self {
        Self { registry }
    }

    pub fn standard() -> Self {
        Self::new(AttributeRegistry::standard())
    }

    pub fn registry(&self) -> &AttributeRegistry {
        &self.registry
    }

    /// Resolve every element of `template` against `ctx`.
    ///
    /// Never fails: unknown attribute keys render as the key itself and
    /// out-of-bounds elements are clamped into the canvas.
    #[instrument(skip_all, fields(template_id = template.id, elements = template.elements.len()))]
    pub fn resolve(&self, template: &LabelTemplate, ctx: &PrintContext) -> ResolvedDocument {
        let elements = template
            .elements
            .iter()
            .map(|element| self.resolve_element(template, element, ctx))
            .collect();

        debug!("Label template resolved");
        ResolvedDocument {
            template_id: template.id,
            name: template.name.clone(),
            width: template.width,
            height: template.height,
            elements,
        }
    }

    fn resolve_element(
        &self,
        template: &LabelTemplate,
        element: &Element,
        ctx: &PrintContext,
    ) -> ResolvedElement {
        let mut element = element.clone();
        if !element.fits_within(template.width, template.height) {
            warn!(element_id = %element.id, "Element outside canvas, clamping");
            element.clamp_into(template.width, template.height);
        }

        let kind = match element.kind {
            ElementKind::Text(t) => ResolvedKind::Text(t),
            ElementKind::Attribute(binding) => {
                let text = match self.registry.try_resolve(&binding.attribute_key, ctx) {
                    Some(text) => text,
                    None => {
                        warn!(
                            element_id = %element.id,
                            attribute_key = %binding.attribute_key,
                            "Unknown attribute key, rendering key as text"
                        );
                        binding.attribute_key.clone()
                    }
                };
                ResolvedKind::Attribute { binding, text }
            }
            ElementKind::Barcode(geometry) => {
                let value = ctx.product.barcode.clone();
                let pattern = BarPattern::from_value(&value);
                ResolvedKind::Barcode {
                    geometry,
                    value,
                    pattern,
                }
            }
            ElementKind::Line(b) => ResolvedKind::Line(b),
            ElementKind::Rectangle(b) => ResolvedKind::Rectangle(b),
            ElementKind::Background(b) => ResolvedKind::Background(b),
        };

        ResolvedElement {
            id: element.id,
            kind,
        }
    }
}
