//! Print Job Builder
//!
//! Replicates a resolved document into physical pages. Geometry stays in
//! millimetres; conversion to the output medium belongs to the sink.

use serde::Serialize;
use shared::models::TemplateId;
use tracing::{debug, instrument};

use crate::resolver::{ResolvedDocument, ResolvedElement};

/// Presentation rotation applied by the sink at emission time
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Rotation {
    #[default]
    None,
    /// 180°, for labels fed upside down
    Half,
}

impl Rotation {
    pub fn degrees(self) -> u16 {
        match self {
            Rotation::None => 0,
            Rotation::Half => 180,
        }
    }
}

/// One physical copy of a resolved document
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Page {
    /// Zero-based position in the job
    pub index: usize,
    pub width: f32,
    pub height: f32,
    pub elements: Vec<ResolvedElement>,
    pub rotation: Rotation,
    /// Set by the sink between pages
    pub page_break_after: bool,
}

/// Build `copies` independent pages (at least one) from `doc`
pub fn build(doc: &ResolvedDocument, copies: u32, reversed: bool) -> Vec<Page> {
    let copies = copies.max(1) as usize;
    let rotation = if reversed {
        Rotation::Half
    } else {
        Rotation::None
    };

    (0..copies)
        .map(|index| Page {
            index,
            width: doc.width,
            height: doc.height,
            elements: doc.elements.clone(),
            rotation,
            page_break_after: false,
        })
        .collect()
}

/// Pages plus the identity of the template they came from
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PrintJob {
    pub template_id: TemplateId,
    pub name: String,
    pub pages: Vec<Page>,
}

impl PrintJob {
    #[instrument(skip(doc), fields(template_id = doc.template_id))]
    pub fn new(doc: &ResolvedDocument, copies: u32, reversed: bool) -> Self {
        let pages = build(doc, copies, reversed);
        debug!(pages = pages.len(), "Print job built");
        Self {
            template_id: doc.template_id,
            name: doc.name.clone(),
            pages,
        }
    }

    pub fn copies(&self) -> usize {
        self.pages.len()
    }
}
