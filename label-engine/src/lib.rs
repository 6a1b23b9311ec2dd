//! # label-engine
//!
//! Label design and print generation.
//!
//! ## Scope
//!
//! - [`attribute`]: symbolic attribute keys and how they read a [`PrintContext`]
//! - [`resolver`]: template + context into a [`ResolvedDocument`] (preview and print share it)
//! - [`barcode`]: deterministic bar pattern for a barcode value
//! - [`editor`]: in-memory editing session over one template
//! - [`preview`]: millimetre to pixel projection for the editing surface
//! - [`job`]: copies and rotation, producing pages for a [`PrintSink`]
//! - [`catalog`]: predefined read-only templates
//!
//! Persistence lives in `label-store`; physical output belongs to the sink.
//!
//! ## Example
//!
//! ```ignore
//! use label_engine::{PrintJob, Resolver, catalog};
//!
//! let template = catalog::get(1).unwrap();
//! let doc = Resolver::standard().resolve(&template, &ctx);
//! let job = PrintJob::new(&doc, 3, false);
//! sink.print(&job).await?;
//! ```
//!
//! [`PrintContext`]: shared::models::PrintContext

pub mod attribute;
pub mod barcode;
pub mod catalog;
pub mod editor;
mod error;
pub mod job;
pub mod preview;
pub mod resolver;
mod sink;
mod units;

// Re-exports
pub use attribute::{AttributeDef, AttributeRegistry};
pub use barcode::BarPattern;
pub use editor::{Axis, Direction, Editor, NewElement, Step};
pub use error::{EditorError, EditorResult, PrintError, PrintResult};
pub use job::{Page, PrintJob, Rotation, build};
pub use preview::{PreviewScene, PreviewShape, ShapeKind, Viewport};
pub use resolver::{ResolvedDocument, ResolvedElement, ResolvedKind, Resolver, resolve};
pub use sink::{JsonLinesSink, PrintSink};
pub use units::{mm_to_px, px_to_mm};
