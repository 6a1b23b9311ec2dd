//! Attribute Registry
//!
//! Maps symbolic attribute keys to functions reading a [`PrintContext`].
//! Lookups are total: an unknown key resolves to the key itself, so one bad
//! binding never aborts a render.

use std::collections::HashMap;

use chrono::{DateTime, Days};
use chrono_tz::Tz;
use rust_decimal::RoundingStrategy;
use shared::models::PrintContext;

/// Shelf life used when the product does not carry one
pub const DEFAULT_SHELF_LIFE_DAYS: u32 = 3;

pub type ResolveFn = fn(&PrintContext) -> String;

/// One resolvable attribute
#[derive(Debug, Clone, Copy)]
pub struct AttributeDef {
    pub key: &'static str,
    /// Human-readable name shown in the editor picker
    pub label: &'static str,
    pub resolve: ResolveFn,
}

/// Lookup table of attribute keys, in registration order
#[derive(Debug, Clone, Default)]
pub struct AttributeRegistry {
    defs: Vec<AttributeDef>,
    index: HashMap<&'static str, usize>,
}

impl AttributeRegistry {
    /// Empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry with every built-in product and time attribute
    pub fn standard() -> Self {
        let mut registry = Self::new();
        for def in STANDARD {
            registry.register(*def);
        }
        registry
    }

    /// Add an attribute, replacing any existing one with the same key
    pub fn register(&mut self, def: AttributeDef) {
        match self.index.get(def.key) {
            Some(&i) => self.defs[i] = def,
            None => {
                self.index.insert(def.key, self.defs.len());
                self.defs.push(def);
            }
        }
    }

    pub fn get(&self, key: &str) -> Option<&AttributeDef> {
        self.index.get(key).map(|&i| &self.defs[i])
    }

    pub fn contains(&self, key: &str) -> bool {
        self.index.contains_key(key)
    }

    /// Known keys in registration order
    pub fn keys(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.defs.iter().map(|d| d.key)
    }

    pub fn defs(&self) -> &[AttributeDef] {
        &self.defs
    }

    /// Resolve a known key, `None` otherwise
    pub fn try_resolve(&self, key: &str, ctx: &PrintContext) -> Option<String> {
        self.get(key).map(|def| (def.resolve)(ctx))
    }

    /// Resolve a key; unknown keys come back verbatim
    pub fn resolve(&self, key: &str, ctx: &PrintContext) -> String {
        self.try_resolve(key, ctx)
            .unwrap_or_else(|| key.to_string())
    }
}

const STANDARD: &[AttributeDef] = &[
    AttributeDef {
        key: "product-name",
        label: "Product name",
        resolve: |ctx| ctx.product.name.clone(),
    },
    AttributeDef {
        key: "unit-price",
        label: "Unit price",
        resolve: unit_price,
    },
    AttributeDef {
        key: "barcode",
        label: "Barcode",
        resolve: |ctx| ctx.product.barcode.clone(),
    },
    AttributeDef {
        key: "production-date",
        label: "Production date",
        resolve: |ctx| format_date(&ctx.now),
    },
    AttributeDef {
        key: "production-time",
        label: "Production time",
        resolve: |ctx| ctx.now.format("%H:%M").to_string(),
    },
    AttributeDef {
        key: "shelf-life",
        label: "Shelf life",
        resolve: |ctx| format!("{} days", shelf_life_days(ctx)),
    },
    AttributeDef {
        key: "expiry-date",
        label: "Expiry date",
        resolve: expiry_date,
    },
    AttributeDef {
        key: "category",
        label: "Category",
        resolve: |ctx| ctx.product.category.clone().unwrap_or_default(),
    },
    AttributeDef {
        key: "unit",
        label: "Unit",
        resolve: |ctx| ctx.product.unit.clone().unwrap_or_default(),
    },
    AttributeDef {
        key: "external-id",
        label: "Product number",
        resolve: |ctx| {
            ctx.product
                .external_id
                .map(|n| n.to_string())
                .unwrap_or_default()
        },
    },
];

fn unit_price(ctx: &PrintContext) -> String {
    let price = ctx
        .product
        .price
        .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    format!("{price:.2}")
}

fn shelf_life_days(ctx: &PrintContext) -> u32 {
    ctx.product
        .shelf_life_days
        .unwrap_or(DEFAULT_SHELF_LIFE_DAYS)
}

fn expiry_date(ctx: &PrintContext) -> String {
    let days = Days::new(u64::from(shelf_life_days(ctx)));
    match ctx.now.checked_add_days(days) {
        Some(expiry) => format_date(&expiry),
        None => format_date(&ctx.now),
    }
}

fn format_date(at: &DateTime<Tz>) -> String {
    at.format("%Y-%m-%d").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;
    use shared::models::Product;

    fn ctx(price: &str) -> PrintContext {
        let mut product = Product::new("Widget", price.parse::<Decimal>().unwrap(), "123");
        product.category = Some("Bakery".into());
        product.external_id = Some(42);
        // 2024-01-22 23:30:00 UTC, already the 23rd in Madrid
        PrintContext::at_millis(product, 1_705_966_200_000, chrono_tz::Europe::Madrid)
    }

    #[test]
    fn test_unit_price_two_decimals() {
        let registry = AttributeRegistry::standard();
        assert_eq!(registry.resolve("unit-price", &ctx("12.5")), "12.50");
        assert_eq!(registry.resolve("unit-price", &ctx("3")), "3.00");
        assert_eq!(registry.resolve("unit-price", &ctx("0.125")), "0.13");
    }

    #[test]
    fn test_time_attributes_use_context_timezone() {
        let registry = AttributeRegistry::standard();
        let ctx = ctx("1");
        assert_eq!(registry.resolve("production-date", &ctx), "2024-01-23");
        assert_eq!(registry.resolve("production-time", &ctx), "00:30");
        assert_eq!(registry.resolve("shelf-life", &ctx), "3 days");
        assert_eq!(registry.resolve("expiry-date", &ctx), "2024-01-26");
    }

    #[test]
    fn test_product_shelf_life_overrides_default() {
        let registry = AttributeRegistry::standard();
        let mut ctx = ctx("1");
        ctx.product.shelf_life_days = Some(10);
        assert_eq!(registry.resolve("shelf-life", &ctx), "10 days");
        assert_eq!(registry.resolve("expiry-date", &ctx), "2024-02-02");
    }

    #[test]
    fn test_optional_fields() {
        let registry = AttributeRegistry::standard();
        let ctx = ctx("1");
        assert_eq!(registry.resolve("category", &ctx), "Bakery");
        assert_eq!(registry.resolve("unit", &ctx), "");
        assert_eq!(registry.resolve("external-id", &ctx), "42");
        assert_eq!(registry.resolve("barcode", &ctx), "123");
        assert_eq!(registry.resolve("product-name", &ctx), "Widget");
    }

    #[test]
    fn test_unknown_key_falls_back_to_key() {
        let registry = AttributeRegistry::standard();
        assert_eq!(registry.resolve("discount-pct", &ctx("1")), "discount-pct");
        assert!(registry.try_resolve("discount-pct", &ctx("1")).is_none());
    }

    #[test]
    fn test_register_replaces_in_place() {
        let mut registry = AttributeRegistry::standard();
        let before: Vec<_> = registry.keys().collect();

        registry.register(AttributeDef {
            key: "unit-price",
            label: "Price",
            resolve: |ctx| format!("EUR {}", ctx.product.price),
        });
        registry.register(AttributeDef {
            key: "discount-pct",
            label: "Discount",
            resolve: |_| "10%".to_string(),
        });

        let after: Vec<_> = registry.keys().collect();
        assert_eq!(&after[..before.len()], &before[..]);
        assert_eq!(after.last(), Some(&"discount-pct"));
        assert_eq!(registry.resolve("unit-price", &ctx("2.5")), "EUR 2.5");
        assert_eq!(registry.resolve("discount-pct", &ctx("1")), "10%");
    }
}
