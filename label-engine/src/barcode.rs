//! Barcode pattern synthesis
//!
//! Produces a bar-like visual from an arbitrary string. This is a
//! placeholder, not a symbology: scanners cannot read it.
//!
//! Layout: start guard `1010`, then each byte of the value followed by a
//! checksum byte (sum of bytes mod 256), eight bits MSB first where a set
//! bit is a wide bar `110` and a clear bit a narrow bar `10`, then stop
//! guard `0101`. Every bit maps to a self-delimiting code, so distinct
//! strings give distinct patterns.

use serde::{Deserialize, Serialize};

const START_GUARD: [bool; 4] = [true, false, true, false];
const STOP_GUARD: [bool; 4] = [false, true, false, true];
const WIDE: [bool; 3] = [true, true, false];
const NARROW: [bool; 2] = [true, false];

/// Bar modules, `true` = dark
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BarPattern(Vec<bool>);

impl BarPattern {
    /// Deterministic pattern for `value`
    pub fn from_value(value: &str) -> Self {
        let bytes = value.as_bytes();
        let checksum = bytes.iter().fold(0u8, |acc, b| acc.wrapping_add(*b));

        let mut modules = Vec::with_capacity(8 + (bytes.len() + 1) * 8 * 3);
        modules.extend_from_slice(&START_GUARD);
        for byte in bytes.iter().copied().chain(std::iter::once(checksum)) {
            for bit in (0..8).rev() {
                if (byte >> bit) & 1 == 1 {
                    modules.extend_from_slice(&WIDE);
                } else {
                    modules.extend_from_slice(&NARROW);
                }
            }
        }
        modules.extend_from_slice(&STOP_GUARD);
        Self(modules)
    }

    pub fn modules(&self) -> &[bool] {
        &self.0
    }

    /// Number of modules
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Dark runs as `(offset, width)` in module units
    pub fn bars(&self) -> Vec<(usize, usize)> {
        let mut bars = Vec::new();
        let mut start = None;
        for (i, &dark) in self.0.iter().enumerate() {
            match (dark, start) {
                (true, None) => start = Some(i),
                (false, Some(s)) => {
                    bars.push((s, i - s));
                    start = None;
                }
                _ => {}
            }
        }
        if let Some(s) = start {
            bars.push((s, self.0.len() - s));
        }
        bars
    }

    /// Dark runs as `(x, width)` in millimetres, spread over an element
    /// starting at `x` that is `width` mm wide
    pub fn layout(&self, x: f32, width: f32) -> Vec<(f32, f32)> {
        if self.0.is_empty() || width <= 0.0 {
            return Vec::new();
        }
        let module = width / self.0.len() as f32;
        self.bars()
            .into_iter()
            .map(|(offset, run)| (x + offset as f32 * module, run as f32 * module))
            .collect()
    }
}
