//! Millimetre / pixel conversion

pub const MM_PER_INCH: f32 = 25.4;

/// Millimetres to device pixels at `dpi`, rounded.
///
/// Positive lengths never collapse to zero so hairlines stay visible;
/// non-finite or non-positive input maps to 0.
pub fn mm_to_px(mm: f32, dpi: f32) -> i32 {
    if !mm.is_finite() || mm <= 0.0 {
        return 0;
    }
    let px = mm * dpi / MM_PER_INCH;
    px.round().max(1.0) as i32
}

/// Screen pixels back to millimetres for a given pixels-per-mm scale
pub fn px_to_mm(px: f32, scale: f32) -> f32 {
    if !px.is_finite() || !scale.is_finite() || scale <= 0.0 {
        return 0.0;
    }
    px / scale
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mm_to_px_at_203_dpi() {
        // 40 mm label on a 203 dpi thermal head
        assert_eq!(mm_to_px(40.0, 203.0), 320);
        assert_eq!(mm_to_px(0.01, 203.0), 1);
        assert_eq!(mm_to_px(0.0, 203.0), 0);
        assert_eq!(mm_to_px(f32::NAN, 203.0), 0);
    }

    #[test]
    fn test_px_to_mm() {
        assert_eq!(px_to_mm(40.0, 4.0), 10.0);
        assert_eq!(px_to_mm(40.0, 0.0), 0.0);
    }
}
