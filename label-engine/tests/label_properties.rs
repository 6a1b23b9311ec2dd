//! End-to-end behaviour of the label engine: resolve, preview, print

use label_engine::{
    Direction, Editor, JsonLinesSink, NewElement, PrintJob, PrintSink, ResolvedKind, Rotation,
    Viewport, build, catalog, resolve,
};
use label_store::{MemoryTemplateStore, TemplateStore};
use pretty_assertions::assert_eq;
use rust_decimal::Decimal;
use shared::models::{AttributeElement, Element, ElementKind, PrintContext, Product};

fn widget() -> PrintContext {
    let product = Product::new("Widget", Decimal::new(125, 1), "123");
    PrintContext::at_millis(product, 1_705_966_200_000, chrono_tz::Europe::Madrid)
}

fn price_tag_with(key: &str) -> Editor {
    let mut editor = Editor::new_custom("Price Tag", 40.0, 30.0).unwrap();
    editor.add(NewElement::Barcode).unwrap();
    editor.add(NewElement::Attribute("unit-price".into())).unwrap();
    // bypass the editor's key check to model a stored template with a stale key
    let mut template = editor.snapshot();
    template.elements.push(Element {
        id: "bound".to_string(),
        kind: ElementKind::Attribute(AttributeElement {
            x: 5.0,
            y: 5.0,
            attribute_key: key.to_string(),
            font_size: 10,
        }),
    });
    Editor::open(template)
}

#[test]
fn price_tag_resolves_formatted_price() {
    let doc = resolve(&price_tag_with("unit-price").snapshot(), &widget());
    assert_eq!(doc.element("bound").and_then(|e| e.text()), Some("12.50"));
}

#[test]
fn unknown_key_renders_literally() {
    let doc = resolve(&price_tag_with("discount-pct").snapshot(), &widget());
    assert_eq!(doc.element("bound").and_then(|e| e.text()), Some("discount-pct"));
}

#[test]
fn preview_scale_never_changes_document_or_pages() {
    let mut editor = price_tag_with("unit-price");
    let ctx = widget();

    editor.set_viewport(Viewport::new(2.0));
    let _ = editor.preview(&ctx);
    let doc_a = editor.resolve(&ctx);
    let pages_a = serde_json::to_string(&build(&doc_a, 2, false)).unwrap();

    editor.set_viewport(Viewport::from_dpi(300.0));
    let _ = editor.preview(&ctx);
    let doc_b = editor.resolve(&ctx);
    let pages_b = serde_json::to_string(&build(&doc_b, 2, false)).unwrap();

    assert_eq!(
        serde_json::to_string(&doc_a).unwrap(),
        serde_json::to_string(&doc_b).unwrap()
    );
    assert_eq!(pages_a, pages_b);
}

#[test]
fn barcode_pattern_depends_only_on_value() {
    let template = catalog::get(catalog::BARCODE_STICKER).unwrap();
    let pattern = |barcode: &str, name: &str| {
        let mut ctx = widget();
        ctx.product.barcode = barcode.to_string();
        ctx.product.name = name.to_string();
        let doc = resolve(&template, &ctx);
        doc.elements
            .iter()
            .find_map(|e| match &e.kind {
                ResolvedKind::Barcode { pattern, .. } => Some(pattern.clone()),
                _ => None,
            })
            .unwrap()
    };

    assert_eq!(pattern("4006381333931", "A"), pattern("4006381333931", "B"));
    assert_ne!(pattern("4006381333931", "A"), pattern("4006381333932", "A"));
}

#[test]
fn copies_are_independent() {
    let doc = resolve(&catalog::get(catalog::PRICE_TAG).unwrap(), &widget());
    let mut pages = build(&doc, 3, false);
    assert_eq!(pages.len(), 3);

    pages[0].page_break_after = true;
    pages[0].rotation = Rotation::Half;
    pages[0].elements.clear();

    assert!(!pages[1].page_break_after && !pages[2].page_break_after);
    assert_eq!(pages[1].rotation, Rotation::None);
    assert_eq!(pages[1].elements, doc.elements);
    assert_eq!(pages[2].elements, doc.elements);
}

#[test]
fn repeated_nudges_stay_on_canvas() {
    let mut editor = Editor::new_custom("Clamp", 40.0, 30.0).unwrap();
    editor.add(NewElement::Barcode).unwrap();
    editor.add(NewElement::Text("edge".into())).unwrap();
    let ids: Vec<String> = editor.elements().iter().map(|e| e.id.clone()).collect();

    for id in &ids {
        editor.select(id).unwrap();
        for direction in [Direction::Left, Direction::Up, Direction::Right, Direction::Down] {
            for _ in 0..60 {
                editor.nudge(direction);
                let element = editor.selected().unwrap();
                let (x, y) = element.origin();
                let (w, h) = element.extent();
                assert!(x >= 0.0 && y >= 0.0, "{direction:?}: ({x}, {y})");
                assert!(x + w <= 40.0 && y + h <= 30.0, "{direction:?}: ({x}, {y})");
            }
        }
    }
}

#[tokio::test]
async fn edit_save_print_round_trip() {
    let store = MemoryTemplateStore::new();

    let mut editor = Editor::open(catalog::get(catalog::SHELF_LABEL).unwrap());
    editor.rename("Shelf Label (bakery)").unwrap();
    let saved = editor.save(&store, "bakery").await.unwrap();
    assert!(saved.id >= 1000);

    editor.nudge(Direction::Right);
    editor.add(NewElement::Attribute("expiry-date".into())).unwrap();
    editor.save(&store, "bakery").await.unwrap();

    let listed = store.list("bakery").await.unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].elements.len(), saved.elements.len() + 1);
    assert!(store.list("butcher").await.unwrap().is_empty());

    let doc = resolve(&listed[0], &widget());
    let job = PrintJob::new(&doc, 2, true);
    let sink = JsonLinesSink::new(Vec::new());
    sink.print(&job).await.unwrap();

    let out = String::from_utf8(sink.into_inner()).unwrap();
    let pages: Vec<serde_json::Value> = out
        .lines()
        .map(|l| serde_json::from_str(l).unwrap())
        .collect();
    assert_eq!(pages.len(), 2);
    assert_eq!(pages[0]["name"], "Shelf Label (bakery)");
    assert_eq!(pages[1]["rotation"], "half");
}
