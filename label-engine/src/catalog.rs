//! Predefined label templates
//!
//! Read-only, never persisted. Editing one starts an unsaved custom copy.

use shared::models::{
    AttributeElement, BoxElement, Element, ElementKind, LabelTemplate, TemplateId, TemplateKind,
};

pub const PRICE_TAG: TemplateId = 1;
pub const SHELF_LABEL: TemplateId = 2;
pub const BARCODE_STICKER: TemplateId = 3;

/// All predefined templates, ordered by id
pub fn predefined() -> Vec<LabelTemplate> {
    vec![price_tag(), shelf_label(), barcode_sticker()]
}

pub fn get(id: TemplateId) -> Option<LabelTemplate> {
    match id {
        PRICE_TAG => Some(price_tag()),
        SHELF_LABEL => Some(shelf_label()),
        BARCODE_STICKER => Some(barcode_sticker()),
        _ => None,
    }
}

fn template(id: TemplateId, name: &str, width: f32, height: f32, elements: Vec<Element>) -> LabelTemplate {
    LabelTemplate {
        id,
        name: name.to_string(),
        width,
        height,
        kind: TemplateKind::Predefined,
        created_at: None,
        updated_at: None,
        elements,
    }
}

fn attribute(id: &str, x: f32, y: f32, key: &str, font_size: i32) -> Element {
    Element {
        id: id.to_string(),
        kind: ElementKind::Attribute(AttributeElement {
            x,
            y,
            attribute_key: key.to_string(),
            font_size,
        }),
    }
}

fn boxed(id: &str, x: f32, y: f32, width: f32, height: f32) -> (String, BoxElement) {
    (
        id.to_string(),
        BoxElement {
            x,
            y,
            width,
            height,
        },
    )
}

fn barcode(id: &str, x: f32, y: f32, width: f32, height: f32) -> Element {
    let (id, b) = boxed(id, x, y, width, height);
    Element {
        id,
        kind: ElementKind::Barcode(b),
    }
}

fn price_tag() -> LabelTemplate {
    template(
        PRICE_TAG,
        "Price Tag",
        40.0,
        30.0,
        vec![
            attribute("price-tag-name", 2.0, 2.0, "product-name", 10),
            attribute("price-tag-price", 2.0, 9.0, "unit-price", 16),
            barcode("price-tag-barcode", 5.0, 19.0, 30.0, 8.0),
        ],
    )
}

fn shelf_label() -> LabelTemplate {
    let (header_id, header) = boxed("shelf-label-header", 0.0, 0.0, 60.0, 9.0);
    let (rule_id, rule) = boxed("shelf-label-rule", 2.0, 11.0, 56.0, 0.5);
    template(
        SHELF_LABEL,
        "Shelf Label",
        60.0,
        40.0,
        vec![
            Element {
                id: header_id,
                kind: ElementKind::Background(header),
            },
            attribute("shelf-label-name", 2.0, 2.0, "product-name", 12),
            Element {
                id: rule_id,
                kind: ElementKind::Line(rule),
            },
            attribute("shelf-label-price", 2.0, 14.0, "unit-price", 24),
            attribute("shelf-label-unit", 40.0, 16.0, "unit", 10),
            barcode("shelf-label-barcode", 2.0, 26.0, 40.0, 10.0),
            attribute("shelf-label-date", 44.0, 33.0, "production-date", 8),
        ],
    )
}

fn barcode_sticker() -> LabelTemplate {
    let (frame_id, frame) = boxed("barcode-sticker-frame", 0.5, 0.5, 49.0, 24.0);
    template(
        BARCODE_STICKER,
        "Barcode Sticker",
        50.0,
        25.0,
        vec![
            Element {
                id: frame_id,
                kind: ElementKind::Rectangle(frame),
            },
            barcode("barcode-sticker-barcode", 5.0, 3.0, 40.0, 12.0),
            attribute("barcode-sticker-code", 5.0, 16.0, "barcode", 10),
            attribute("barcode-sticker-name", 5.0, 20.5, "product-name", 8),
        ],
    )
}
