//! Product Model
//!
//! The product-shaped record a label is printed for. Owned by the host
//! application; the label engine only reads it.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Product data available to attribute bindings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub name: String,
    pub price: Decimal,
    #[serde(default)]
    pub barcode: String,
    #[serde(default)]
    pub category: Option<String>,
    /// Sales unit (e.g. "kg", "pcs")
    #[serde(default)]
    pub unit: Option<String>,
    /// Product number
    #[serde(default)]
    pub external_id: Option<i64>,
    #[serde(default)]
    pub shelf_life_days: Option<u32>,
}

impl Product {
    pub fn new(name: impl Into<String>, price: Decimal, barcode: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            price,
            barcode: barcode.into(),
            category: None,
            unit: None,
            external_id: None,
            shelf_life_days: None,
        }
    }
}
