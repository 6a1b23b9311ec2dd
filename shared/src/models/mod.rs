//! Data models
//!
//! `label_template` is the persisted layout model; `product` and
//! `print_context` describe the external data a render reads.

pub mod label_template;
pub mod print_context;
pub mod product;

pub use label_template::*;
pub use print_context::PrintContext;
pub use product::Product;
