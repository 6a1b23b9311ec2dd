//! Template Editor
//!
//! One editing session over one template. Every operation mutates the
//! in-memory element list directly; nothing touches the store until
//! [`Editor::save`]. At most one element is selected, and operations that
//! act on the selection are no-ops (returning `false`) without one.
//!
//! Coordinates stay in millimetres. The viewport scale is only used to
//! convert pointer positions and never reaches the stored elements.

use label_store::TemplateStore;
use shared::models::{
    AttributeElement, BoxElement, DEFAULT_FONT_SIZE, Element, ElementKind, LabelTemplate,
    LabelTemplateCreate, LabelTemplateUpdate, MAX_FONT_SIZE, MIN_FONT_SIZE, PrintContext,
    TemplateId, TemplateKind, TextElement, line_height_mm,
};
use shared::util::element_id;
use shared::validation::{
    MAX_NAME_LEN, ValidationError, validate_required_text, validate_template,
};
use tracing::{debug, info, instrument};

use crate::error::{EditorError, EditorResult};
use crate::preview::{PreviewScene, Viewport};
use crate::resolver::{ResolvedDocument, Resolver};

/// Nudge distance in mm
pub const NUDGE_STEP: f32 = 1.0;
/// Resize step in mm
pub const RESIZE_STEP: f32 = 1.0;
/// Smallest box edge in mm
pub const MIN_BOX_SIZE: f32 = 1.0;
/// Where new elements land, in mm
pub const DEFAULT_POSITION: (f32, f32) = (2.0, 2.0);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    Width,
    Height,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    Increase,
    Decrease,
}

impl Step {
    fn sign(self) -> f32 {
        match self {
            Step::Increase => 1.0,
            Step::Decrease => -1.0,
        }
    }
}

/// Element requested by [`Editor::add`]
#[derive(Debug, Clone, PartialEq)]
pub enum NewElement {
    Text(String),
    /// Must name a key known to the attribute registry
    Attribute(String),
    Barcode,
    Line,
    Rectangle,
    Background,
}

impl NewElement {
    fn default_box(&self) -> Option<BoxElement> {
        let (x, y) = DEFAULT_POSITION;
        let (width, height) = match self {
            NewElement::Barcode => (30.0, 10.0),
            NewElement::Line => (30.0, 1.0),
            NewElement::Rectangle | NewElement::Background => (20.0, 10.0),
            NewElement::Text(_) | NewElement::Attribute(_) => return None,
        };
        Some(BoxElement {
            x,
            y,
            width,
            height,
        })
    }
}

/// Editing session
#[derive(Debug, Clone)]
pub struct Editor {
    /// `None` until the first save
    id: Option<TemplateId>,
    name: String,
    width: f32,
    height: f32,
    elements: Vec<Element>,
    selected: Option<String>,
    dirty: bool,
    viewport: Viewport,
    resolver: Resolver,
}

impl Editor {
    fn session(id: Option<TemplateId>, name: String, width: f32, height: f32) -> Self {
        Self {
            id,
            name,
            width,
            height,
            elements: Vec::new(),
            selected: None,
            dirty: id.is_none(),
            viewport: Viewport::default(),
            resolver: Resolver::standard(),
        }
    }

    /// Empty, unsaved custom template
    pub fn new_custom(name: &str, width: f32, height: f32) -> EditorResult<Self> {
        validate_template(name, width, height, &[])?;
        Ok(Self::session(None, name.to_string(), width, height))
    }

    /// Edit an existing template.
    ///
    /// Predefined templates are read-only: they open as an unsaved custom
    /// copy that is created on first save.
    pub fn open(template: LabelTemplate) -> Self {
        let id = (!template.is_predefined()).then_some(template.id);
        let mut editor = Self::session(id, template.name, template.width, template.height);
        editor.elements = template.elements;
        editor
    }

    /// Unsaved copy of `template` under a new name, with fresh element ids
    pub fn duplicate(template: &LabelTemplate, name: &str) -> EditorResult<Self> {
        validate_required_text(name, "name", MAX_NAME_LEN)?;
        let mut editor = Self::session(None, name.to_string(), template.width, template.height);
        editor.elements = template
            .elements
            .iter()
            .map(|e| Element {
                id: element_id(),
                kind: e.kind.clone(),
            })
            .collect();
        Ok(editor)
    }

    /// Use a different resolver (custom attribute registry) for key checks and preview
    pub fn with_resolver(mut self, resolver: Resolver) -> Self {
        self.resolver = resolver;
        self
    }

    pub fn id(&self) -> Option<TemplateId> {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn size(&self) -> (f32, f32) {
        (self.width, self.height)
    }

    pub fn elements(&self) -> &[Element] {
        &self.elements
    }

    pub fn selected_id(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    pub fn selected(&self) -> Option<&Element> {
        let id = self.selected.as_deref()?;
        self.elements.iter().find(|e| e.id == id)
    }

    /// Unsaved changes exist
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn set_viewport(&mut self, viewport: Viewport) {
        self.viewport = viewport;
    }

    // ── Elements ────────────────────────────────────────────────────────

    /// Append a new element at the default position and select it
    pub fn add(&mut self, new: NewElement) -> EditorResult<String> {
        let (x, y) = DEFAULT_POSITION;
        let kind = match &new {
            NewElement::Text(content) => ElementKind::Text(TextElement {
                x,
                y,
                content: if content.is_empty() {
                    "Text".to_string()
                } else {
                    content.clone()
                },
                font_size: DEFAULT_FONT_SIZE,
            }),
            NewElement::Attribute(key) => {
                self.ensure_known_key(key)?;
                ElementKind::Attribute(AttributeElement {
                    x,
                    y,
                    attribute_key: key.clone(),
                    font_size: DEFAULT_FONT_SIZE,
                })
            }
            NewElement::Barcode => ElementKind::Barcode(self.fitted_box(&new)),
            NewElement::Line => ElementKind::Line(self.fitted_box(&new)),
            NewElement::Rectangle => ElementKind::Rectangle(self.fitted_box(&new)),
            NewElement::Background => ElementKind::Background(self.fitted_box(&new)),
        };

        let mut element = Element::new(kind);
        let id = element.id.clone();
        if let Some(size) = element.font_size_mut() {
            *size = fitting_font_size(self.height).ok_or_else(|| ValidationError::OutOfBounds {
                id: id.clone(),
                width: self.width,
                height: self.height,
            })?;
        }
        element.clamp_into(self.width, self.height);
        debug!(element_id = %id, element_type = element.element_type().as_str(), "Element added");

        self.elements.push(element);
        self.selected = Some(id.clone());
        self.dirty = true;
        Ok(id)
    }

    fn fitted_box(&self, new: &NewElement) -> BoxElement {
        let mut b = new.default_box().unwrap_or(BoxElement {
            x: DEFAULT_POSITION.0,
            y: DEFAULT_POSITION.1,
            width: MIN_BOX_SIZE,
            height: MIN_BOX_SIZE,
        });
        b.width = b.width.min(self.width - b.x).max(MIN_BOX_SIZE);
        b.height = b.height.min(self.height - b.y).max(MIN_BOX_SIZE);
        b
    }

    fn ensure_known_key(&self, key: &str) -> EditorResult<()> {
        if self.resolver.registry().contains(key) {
            Ok(())
        } else {
            Err(EditorError::UnknownAttribute(key.to_string()))
        }
    }

    pub fn select(&mut self, id: &str) -> EditorResult<()> {
        if !self.elements.iter().any(|e| e.id == id) {
            return Err(EditorError::ElementNotFound(id.to_string()));
        }
        self.selected = Some(id.to_string());
        Ok(())
    }

    pub fn deselect(&mut self) {
        self.selected = None;
    }

    /// Select the topmost element under a preview pointer position
    pub fn select_at(&mut self, scene: &PreviewScene, px: f32, py: f32) -> bool {
        match scene.hit_test(px, py) {
            Some(id) if self.elements.iter().any(|e| e.id == id) => {
                self.selected = Some(id.to_string());
                true
            }
            _ => {
                self.selected = None;
                false
            }
        }
    }

    fn selected_index(&self) -> Option<usize> {
        let id = self.selected.as_deref()?;
        self.elements.iter().position(|e| e.id == id)
    }

    /// Apply `f` to the selected element, then clamp it into the canvas.
    /// Returns whether anything changed.
    fn edit_selected(&mut self, f: impl FnOnce(&mut Element, f32, f32)) -> bool {
        let Some(i) = self.selected_index() else {
            return false;
        };
        let (width, height) = (self.width, self.height);
        let element = &mut self.elements[i];
        let before = element.clone();
        f(element, width, height);
        element.clamp_into(width, height);

        let changed = *element != before;
        self.dirty |= changed;
        changed
    }

    /// Shift the selection by one step, stopping at the canvas edge
    pub fn nudge(&mut self, direction: Direction) -> bool {
        self.edit_selected(|element, _, _| {
            let (x, y) = element.origin();
            let (x, y) = match direction {
                Direction::Up => (x, y - NUDGE_STEP),
                Direction::Down => (x, y + NUDGE_STEP),
                Direction::Left => (x - NUDGE_STEP, y),
                Direction::Right => (x + NUDGE_STEP, y),
            };
            element.set_origin(x, y);
        })
    }

    /// Grow or shrink a boxed selection by one step along `axis`
    pub fn resize(&mut self, axis: Axis, step: Step) -> bool {
        self.edit_selected(|element, width, height| {
            let Some(b) = element.as_box_mut() else {
                return;
            };
            let delta = step.sign() * RESIZE_STEP;
            let (edge, room) = match axis {
                Axis::Width => (&mut b.width, width - b.x),
                Axis::Height => (&mut b.height, height - b.y),
            };
            // the origin never moves; without room for a minimal box, leave it
            let next = (*edge + delta).max(MIN_BOX_SIZE).min(room);
            if next >= MIN_BOX_SIZE {
                *edge = next;
            }
        })
    }

    /// Change the selection's font size by one point, within the legible range.
    ///
    /// Growing stops once the line would pass the bottom of the canvas.
    pub fn adjust_font_size(&mut self, step: Step) -> bool {
        self.edit_selected(|element, _, height| {
            let (_, y) = element.origin();
            if let Some(size) = element.font_size_mut() {
                let next = match step {
                    Step::Increase => *size + 1,
                    Step::Decrease => *size - 1,
                }
                .clamp(MIN_FONT_SIZE, MAX_FONT_SIZE);
                if next <= *size || y + line_height_mm(next) <= height {
                    *size = next;
                }
            }
        })
    }

    /// Drag: place the selection's origin at a screen position
    pub fn move_to_screen(&mut self, px: f32, py: f32) -> bool {
        let (x, y) = (self.viewport.to_mm(px), self.viewport.to_mm(py));
        self.edit_selected(|element, _, _| element.set_origin(x, y))
    }

    /// Replace the literal content of a selected text element
    pub fn set_text(&mut self, content: &str) -> bool {
        self.edit_selected(|element, _, _| {
            if let ElementKind::Text(t) = &mut element.kind {
                t.content = content.to_string();
            }
        })
    }

    /// Rebind a selected attribute element to another registry key
    pub fn set_attribute_key(&mut self, key: &str) -> EditorResult<bool> {
        self.ensure_known_key(key)?;
        Ok(self.edit_selected(|element, _, _| {
            if let ElementKind::Attribute(a) = &mut element.kind {
                a.attribute_key = key.to_string();
            }
        }))
    }

    /// Paint the selection one step later (above its next sibling)
    pub fn bring_forward(&mut self) -> bool {
        match self.selected_index() {
            Some(i) if i + 1 < self.elements.len() => {
                self.elements.swap(i, i + 1);
                self.dirty = true;
                true
            }
            _ => false,
        }
    }

    /// Paint the selection one step earlier
    pub fn send_backward(&mut self) -> bool {
        match self.selected_index() {
            Some(i) if i > 0 => {
                self.elements.swap(i, i - 1);
                self.dirty = true;
                true
            }
            _ => false,
        }
    }

    /// Remove the selected element and clear the selection
    pub fn delete(&mut self) -> Option<Element> {
        let i = self.selected_index()?;
        self.selected = None;
        self.dirty = true;
        let removed = self.elements.remove(i);
        debug!(element_id = %removed.id, "Element deleted");
        Some(removed)
    }

    pub fn rename(&mut self, name: &str) -> EditorResult<()> {
        validate_required_text(name, "name", MAX_NAME_LEN)?;
        if self.name != name {
            self.name = name.to_string();
            self.dirty = true;
        }
        Ok(())
    }

    // ── Rendering ───────────────────────────────────────────────────────

    /// Immutable copy of the current state, safe to resolve concurrently.
    ///
    /// Unsaved sessions carry id 0.
    pub fn snapshot(&self) -> LabelTemplate {
        LabelTemplate {
            id: self.id.unwrap_or_default(),
            name: self.name.clone(),
            width: self.width,
            height: self.height,
            kind: TemplateKind::Custom,
            created_at: None,
            updated_at: None,
            elements: self.elements.clone(),
        }
    }

    pub fn resolve(&self, ctx: &PrintContext) -> ResolvedDocument {
        self.resolver.resolve(&self.snapshot(), ctx)
    }

    /// Resolve against `ctx` and project through the current viewport
    pub fn preview(&self, ctx: &PrintContext) -> PreviewScene {
        self.viewport.project(&self.resolve(ctx))
    }

    // ── Persistence ─────────────────────────────────────────────────────

    /// Persist the full element list: create on first save, full replace after.
    ///
    /// On failure the session is unchanged and stays dirty.
    #[instrument(skip(self, store), fields(template_id = ?self.id, name = %self.name))]
    pub async fn save<S: TemplateStore>(
        &mut self,
        store: &S,
        tenant_id: &str,
    ) -> EditorResult<LabelTemplate> {
        validate_template(&self.name, self.width, self.height, &self.elements)?;
        for element in &self.elements {
            if let ElementKind::Attribute(a) = &element.kind {
                self.ensure_known_key(&a.attribute_key)?;
            }
        }

        let saved = match self.id {
            Some(id) => {
                store
                    .update(
                        tenant_id,
                        id,
                        LabelTemplateUpdate {
                            name: self.name.clone(),
                            width: self.width,
                            height: self.height,
                            elements: self.elements.clone(),
                        },
                    )
                    .await?
            }
            None => {
                store
                    .create(
                        tenant_id,
                        LabelTemplateCreate {
                            name: self.name.clone(),
                            width: self.width,
                            height: self.height,
                            elements: self.elements.clone(),
                        },
                    )
                    .await?
            }
        };

        self.id = Some(saved.id);
        self.dirty = false;
        info!(saved_id = saved.id, elements = saved.elements.len(), "Label template saved");
        Ok(saved)
    }
}

/// Largest font size up to the default whose line fits in `height` mm
fn fitting_font_size(height: f32) -> Option<i32> {
    (MIN_FONT_SIZE..=DEFAULT_FONT_SIZE)
        .rev()
        .find(|&size| line_height_mm(size) <= height)
}

#[cfg(test)]
mod tests {
    use super::*;
    use label_store::{MemoryTemplateStore, RepoError};
    use pretty_assertions::assert_eq;
    use rust_decimal::Decimal;
    use shared::models::Product;

    fn editor() -> Editor {
        Editor::new_custom("Price Tag", 40.0, 30.0).unwrap()
    }

    fn origin(editor: &Editor) -> (f32, f32) {
        editor.selected().unwrap().origin()
    }

    fn ctx() -> PrintContext {
        PrintContext::at_millis(Product::new("Widget", Decimal::ONE, "1"), 0, chrono_tz::UTC)
    }

    #[test]
    fn test_add_selects_new_element_at_default_position() {
        let mut ed = editor();
        let id = ed.add(NewElement::Barcode).unwrap();
        assert_eq!(ed.selected_id(), Some(id.as_str()));
        assert_eq!(origin(&ed), DEFAULT_POSITION);
        assert_eq!(ed.selected().unwrap().extent(), (30.0, 10.0));
        assert!(ed.is_dirty());
    }

    #[test]
    fn test_add_shrinks_to_small_canvas() {
        let mut ed = Editor::new_custom("Tiny", 20.0, 8.0).unwrap();
        ed.add(NewElement::Barcode).unwrap();
        let e = ed.selected().unwrap();
        assert!(e.fits_within(20.0, 8.0));
        assert_eq!(e.extent(), (18.0, 6.0));
    }

    #[test]
    fn test_add_attribute_requires_known_key() {
        let mut ed = editor();
        let err = ed.add(NewElement::Attribute("discount-pct".into())).unwrap_err();
        assert!(matches!(err, EditorError::UnknownAttribute(k) if k == "discount-pct"));
        assert!(ed.elements().is_empty());

        ed.add(NewElement::Attribute("unit-price".into())).unwrap();
        assert_eq!(ed.elements().len(), 1);
    }

    #[test]
    fn test_operations_without_selection_are_noops() {
        let mut ed = editor();
        ed.add(NewElement::Rectangle).unwrap();
        ed.deselect();
        let before = ed.elements().to_vec();

        assert!(!ed.nudge(Direction::Right));
        assert!(!ed.resize(Axis::Width, Step::Increase));
        assert!(!ed.adjust_font_size(Step::Increase));
        assert!(!ed.bring_forward());
        assert!(ed.delete().is_none());
        assert_eq!(ed.elements(), &before[..]);
    }

    #[test]
    fn test_select_unknown_element() {
        let mut ed = editor();
        assert!(matches!(
            ed.select("missing"),
            Err(EditorError::ElementNotFound(_))
        ));
    }

    #[test]
    fn test_nudge_clamps_at_edges() {
        let mut ed = editor();
        ed.add(NewElement::Rectangle).unwrap();

        for _ in 0..100 {
            ed.nudge(Direction::Right);
            ed.nudge(Direction::Down);
        }
        assert_eq!(origin(&ed), (20.0, 20.0));
        assert!(!ed.nudge(Direction::Right));

        for _ in 0..100 {
            ed.nudge(Direction::Left);
            ed.nudge(Direction::Up);
        }
        assert_eq!(origin(&ed), (0.0, 0.0));
    }

    #[test]
    fn test_resize_has_floor_and_ceiling() {
        let mut ed = editor();
        ed.add(NewElement::Line).unwrap();

        for _ in 0..10 {
            ed.resize(Axis::Height, Step::Decrease);
        }
        assert_eq!(ed.selected().unwrap().extent().1, MIN_BOX_SIZE);

        for _ in 0..100 {
            ed.resize(Axis::Width, Step::Increase);
        }
        // x = 2, so 38 mm of room
        assert_eq!(ed.selected().unwrap().extent().0, 38.0);
    }

    #[test]
    fn test_resize_without_room_keeps_origin() {
        let mut template = editor().snapshot();
        let sliver = Element::new(ElementKind::Rectangle(BoxElement {
            x: 39.5,
            y: 5.0,
            width: 0.5,
            height: 4.0,
        }));
        let id = sliver.id.clone();
        template.elements.push(sliver);

        let mut ed = Editor::open(template);
        ed.select(&id).unwrap();
        assert!(!ed.resize(Axis::Width, Step::Increase));
        assert_eq!(origin(&ed), (39.5, 5.0));
        assert_eq!(ed.selected().unwrap().extent(), (0.5, 4.0));
    }

    #[test]
    fn test_resize_ignores_text() {
        let mut ed = editor();
        ed.add(NewElement::Text("SALE".into())).unwrap();
        assert!(!ed.resize(Axis::Width, Step::Increase));
    }

    #[test]
    fn test_font_size_clamped() {
        let mut ed = editor();
        ed.add(NewElement::Text("SALE".into())).unwrap();
        for _ in 0..20 {
            ed.adjust_font_size(Step::Decrease);
        }
        assert_eq!(ed.selected().unwrap().font_size(), Some(MIN_FONT_SIZE));

        assert!(ed.adjust_font_size(Step::Increase));
        assert_eq!(ed.selected().unwrap().font_size(), Some(MIN_FONT_SIZE + 1));
    }

    #[test]
    fn test_font_size_stops_at_canvas_bottom() {
        let mut ed = Editor::new_custom("Strip", 40.0, 10.0).unwrap();
        ed.add(NewElement::Text("SALE".into())).unwrap();
        for _ in 0..40 {
            ed.adjust_font_size(Step::Increase);
            assert!(ed.selected().unwrap().fits_within(40.0, 10.0));
        }
        // y = 2 leaves 8 mm, which holds 22 pt but not 23 pt
        assert_eq!(ed.selected().unwrap().font_size(), Some(22));
        assert_eq!(origin(&ed), DEFAULT_POSITION);
        assert!(!ed.adjust_font_size(Step::Increase));
        assert!(ed.adjust_font_size(Step::Decrease));
    }

    #[test]
    fn test_add_text_shrinks_font_to_short_canvas() {
        let mut ed = Editor::new_custom("Ribbon", 20.0, 3.0).unwrap();
        ed.add(NewElement::Attribute("product-name".into())).unwrap();
        let e = ed.selected().unwrap();
        assert_eq!(e.font_size(), Some(8));
        assert!(e.fits_within(20.0, 3.0));

        let mut ed = Editor::new_custom("Sliver", 20.0, 1.5).unwrap();
        let err = ed.add(NewElement::Text("SALE".into())).unwrap_err();
        assert!(matches!(
            err,
            EditorError::Validation(ValidationError::OutOfBounds { .. })
        ));
        assert!(ed.elements().is_empty());
        assert!(ed.selected_id().is_none());
    }

    #[test]
    fn test_move_to_screen_uses_viewport_scale() {
        let mut ed = editor();
        ed.set_viewport(Viewport::new(5.0));
        ed.add(NewElement::Rectangle).unwrap();

        assert!(ed.move_to_screen(50.0, 25.0));
        assert_eq!(origin(&ed), (10.0, 5.0));

        // dragging past the edge stops at the canvas
        ed.move_to_screen(1000.0, -30.0);
        assert_eq!(origin(&ed), (20.0, 0.0));
    }

    #[test]
    fn test_z_order() {
        let mut ed = editor();
        let bg = ed.add(NewElement::Background).unwrap();
        let text = ed.add(NewElement::Text("A".into())).unwrap();

        ed.select(&bg).unwrap();
        assert!(ed.bring_forward());
        let ids: Vec<&str> = ed.elements().iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, vec![text.as_str(), bg.as_str()]);
        assert!(!ed.bring_forward());

        assert!(ed.send_backward());
        assert_eq!(ed.elements()[0].id, bg);
    }

    #[test]
    fn test_delete_clears_selection() {
        let mut ed = editor();
        let id = ed.add(NewElement::Line).unwrap();
        let removed = ed.delete().unwrap();
        assert_eq!(removed.id, id);
        assert!(ed.selected_id().is_none());
        assert!(ed.elements().is_empty());
    }

    #[test]
    fn test_set_text_and_attribute_key() {
        let mut ed = editor();
        ed.add(NewElement::Text("A".into())).unwrap();
        assert!(ed.set_text("B"));
        assert_eq!(ed.selected().unwrap().kind, ElementKind::Text(TextElement {
            x: 2.0,
            y: 2.0,
            content: "B".to_string(),
            font_size: DEFAULT_FONT_SIZE,
        }));

        ed.add(NewElement::Attribute("product-name".into())).unwrap();
        assert!(ed.set_attribute_key("unit-price").unwrap());
        assert!(ed.set_attribute_key("nope").is_err());
    }

    #[test]
    fn test_open_predefined_starts_unsaved_copy() {
        let ed = Editor::open(crate::catalog::get(1).unwrap());
        assert_eq!(ed.id(), None);
        assert!(ed.is_dirty());
        assert_eq!(ed.elements().len(), 3);
        assert_eq!(ed.snapshot().kind, TemplateKind::Custom);
    }

    #[test]
    fn test_duplicate_regenerates_element_ids() {
        let source = crate::catalog::get(2).unwrap();
        let ed = Editor::duplicate(&source, "My Shelf Label").unwrap();
        assert_eq!(ed.name(), "My Shelf Label");
        assert_eq!(ed.size(), (60.0, 40.0));
        assert_eq!(ed.elements().len(), source.elements.len());
        for (copy, original) in ed.elements().iter().zip(&source.elements) {
            assert_ne!(copy.id, original.id);
            assert_eq!(copy.kind, original.kind);
        }
    }

    #[test]
    fn test_rename_rejects_blank() {
        let mut ed = editor();
        assert!(ed.rename("  ").is_err());
        assert_eq!(ed.name(), "Price Tag");
    }

    #[test]
    fn test_preview_is_scaled_but_model_is_not() {
        let mut ed = editor();
        ed.add(NewElement::Rectangle).unwrap();
        ed.set_viewport(Viewport::new(10.0));

        let scene = ed.preview(&ctx());
        assert_eq!(scene.shapes[0].x, 20.0);
        assert_eq!(origin(&ed), DEFAULT_POSITION);
    }

    #[test]
    fn test_select_at_uses_preview_hit_test() {
        let mut ed = editor();
        let rect = ed.add(NewElement::Rectangle).unwrap();
        ed.deselect();

        // default viewport: 4 px/mm, rectangle spans 8..88 x 8..48 px
        let scene = ed.preview(&ctx());
        assert!(ed.select_at(&scene, 10.0, 10.0));
        assert_eq!(ed.selected_id(), Some(rect.as_str()));

        assert!(!ed.select_at(&scene, 150.0, 110.0));
        assert!(ed.selected_id().is_none());
    }

    #[tokio::test]
    async fn test_save_creates_then_updates() {
        let store = MemoryTemplateStore::new();
        let mut ed = editor();
        ed.add(NewElement::Attribute("unit-price".into())).unwrap();

        let created = ed.save(&store, "shop-1").await.unwrap();
        assert_eq!(ed.id(), Some(created.id));
        assert!(!ed.is_dirty());

        ed.nudge(Direction::Down);
        assert!(ed.is_dirty());
        let updated = ed.save(&store, "shop-1").await.unwrap();
        assert_eq!(updated.id, created.id);
        assert_eq!(store.list("shop-1").await.unwrap().len(), 1);
        assert_eq!(updated.elements[0].origin(), (2.0, 3.0));
    }

    #[tokio::test]
    async fn test_save_rejects_unknown_attribute_key() {
        let store = MemoryTemplateStore::new();
        let mut template = editor().snapshot();
        template
            .elements
            .push(Element::new(ElementKind::Attribute(AttributeElement {
                x: 2.0,
                y: 2.0,
                attribute_key: "discount-pct".to_string(),
                font_size: DEFAULT_FONT_SIZE,
            })));

        let mut ed = Editor::open(template);
        let err = ed.save(&store, "shop-1").await.unwrap_err();
        assert!(matches!(err, EditorError::UnknownAttribute(k) if k == "discount-pct"));
        assert!(store.list("shop-1").await.unwrap().is_empty());
        assert!(ed.is_dirty());
    }

    #[tokio::test]
    async fn test_failed_save_leaves_session_dirty() {
        let store = MemoryTemplateStore::new();
        let mut ed = editor();
        ed.add(NewElement::Line).unwrap();
        ed.save(&store, "shop-1").await.unwrap();
        let id = ed.id().unwrap();

        ed.nudge(Direction::Down);
        let before = ed.elements().to_vec();
        let err = ed.save(&store, "shop-2").await.unwrap_err();
        assert!(matches!(err, EditorError::Store(RepoError::NotFound(_))));
        assert!(ed.is_dirty());
        assert_eq!(ed.id(), Some(id));
        assert_eq!(ed.elements(), &before[..]);
    }
}
