//! Print context: the external data a render reads

use chrono::{DateTime, Utc};
use chrono_tz::Tz;

use super::Product;

/// Product plus the moment of printing, in the business timezone.
///
/// Supplied by the caller for each render and never stored.
#[derive(Debug, Clone)]
pub struct PrintContext {
    pub product: Product,
    pub now: DateTime<Tz>,
}

impl PrintContext {
    pub fn new(product: Product, now: DateTime<Tz>) -> Self {
        Self { product, now }
    }

    /// Build from Unix millis; out-of-range values fall back to the epoch
    pub fn at_millis(product: Product, millis: i64, tz: Tz) -> Self {
        let utc = DateTime::<Utc>::from_timestamp_millis(millis).unwrap_or_default();
        Self::new(product, utc.with_timezone(&tz))
    }

    /// Context for "now" in the given timezone
    pub fn now(product: Product, tz: Tz) -> Self {
        Self::new(product, Utc::now().with_timezone(&tz))
    }
}
