//! Real-world scale parsing, calibration and conversion.
//!
//! Every scale notation is normalized to pixels-per-foot internally:
//! - bare number: pixels-per-foot directly
//! - `pixels/feet` ratio
//! - architectural: `1/4" = 1'-0"` (paper inches = real feet/inches)
//! - civil: `1" = 20'`
//! - metric ratio: `1:100`
//!
//! Parsing never fails hard: a malformed or unrecognized string resolves to
//! "no scale" (`None`) and measurement labels fall back or disappear.

use serde::{Deserialize, Serialize};

use crate::constants::scale::{
    BASE_DPI, FEET_PER_METER, INCHES_PER_FOOT, INCHES_PER_METER, LETTER_WIDTH_IN,
};

// ============================================================================
// Units
// ============================================================================

/// Real-world unit for calibration input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Unit {
    Feet,
    Inches,
    Meters,
    Centimeters,
}

impl Unit {
    /// Convert a value in this unit to feet.
    pub fn to_feet(&self, value: f32) -> f32 {
        match self {
            Unit::Feet => value,
            Unit::Inches => value / INCHES_PER_FOOT,
            Unit::Meters => value * FEET_PER_METER,
            Unit::Centimeters => value * FEET_PER_METER / 100.0,
        }
    }

    /// Convert a value in this unit to inches.
    pub fn to_inches(&self, value: f32) -> f32 {
        self.to_feet(value) * INCHES_PER_FOOT
    }
}

// ============================================================================
// Scale String Parsing
// ============================================================================

/// Estimated DPI of the page bitmap, assuming a US-Letter-width sheet.
fn estimated_dpi(page_width_px: f32) -> f32 {
    page_width_px / LETTER_WIDTH_IN
}

/// Parse a persisted scale string into pixels-per-foot.
///
/// Forms are attempted in a fixed order and the first match wins. A matched
/// form with a malformed segment yields an unresolved result (`None`), never
/// an error: already-saved drawings must keep loading even if their scale
/// text has rotted.
pub fn parse_scale(scale: &str, page_width_px: f32) -> Option<f32> {
    let s = scale.trim();
    if s.is_empty() {
        return None;
    }

    // 1. Bare number: already pixels-per-foot.
    if let Ok(value) = s.parse::<f32>() {
        return positive(value);
    }

    // 2. pixels/feet ratio, only when no quote characters are present.
    if s.contains('/') && !s.contains('"') && !s.contains('\'') {
        let (px, ft) = s.split_once('/')?;
        let px: f32 = px.trim().parse().ok()?;
        let ft: f32 = ft.trim().parse().ok()?;
        if ft <= 0.0 {
            return None;
        }
        return positive(px / ft);
    }

    // 3. Architectural/civil: paper inches = real feet/inches.
    if s.contains('"') && s.contains('=') {
        let (paper, real) = s.split_once('=')?;
        let paper_inches = parse_paper_inches(paper).unwrap_or(0.0);
        let real_feet = parse_real_feet(real).unwrap_or(0.0);
        if paper_inches <= 0.0 || real_feet <= 0.0 {
            return None;
        }
        return positive(paper_inches / real_feet * estimated_dpi(page_width_px));
    }

    // 4. Metric ratio A:B (paper:real, unitless).
    if s.contains(':') {
        let (a, b) = s.split_once(':')?;
        let a: f32 = a.trim().parse().ok()?;
        let b: f32 = b.trim().parse().ok()?;
        if a <= 0.0 || b <= 0.0 {
            return None;
        }
        // One real meter spans (a/b) paper meters; convert through the page
        // DPI, then meters to feet.
        let pixels_per_meter = (a / b) * INCHES_PER_METER * estimated_dpi(page_width_px);
        return positive(pixels_per_meter / FEET_PER_METER);
    }

    None
}

/// Format pixels-per-foot as the bare-number canonical scale string.
pub fn format_scale(pixels_per_foot: f32) -> String {
    format!("{}", pixels_per_foot)
}

fn positive(value: f32) -> Option<f32> {
    (value.is_finite() && value > 0.0).then_some(value)
}

/// Parse the paper side of an architectural scale: inches, with simple
/// fractions like `1/4"` or mixed `1-1/2"`.
fn parse_paper_inches(text: &str) -> Option<f32> {
    let t = text.trim().trim_end_matches('"').trim();
    if t.is_empty() {
        return None;
    }

    // Mixed number: 1-1/2
    if let Some((whole, frac)) = t.split_once('-') {
        let whole: f32 = whole.trim().parse().ok()?;
        return Some(whole + parse_fraction(frac)?);
    }
    if t.contains('/') {
        return parse_fraction(t);
    }
    t.parse().ok()
}

fn parse_fraction(text: &str) -> Option<f32> {
    let (num, den) = text.split_once('/')?;
    let num: f32 = num.trim().parse().ok()?;
    let den: f32 = den.trim().parse().ok()?;
    if den == 0.0 {
        return None;
    }
    Some(num / den)
}

/// Parse the real side of an architectural scale: `Y'-Z"`, `Y'`, or a bare
/// number of feet.
fn parse_real_feet(text: &str) -> Option<f32> {
    let t = text.trim();
    if t.is_empty() {
        return None;
    }

    if let Some((feet, rest)) = t.split_once('\'') {
        let feet: f32 = feet.trim().parse().ok()?;
        let inches_part = rest.trim().trim_start_matches('-').trim();
        let inches_part = inches_part.trim_end_matches('"').trim();
        if inches_part.is_empty() {
            return Some(feet);
        }
        let inches: f32 = inches_part.parse().ok()?;
        return Some(feet + inches / INCHES_PER_FOOT);
    }

    t.trim_end_matches('"').trim().parse().ok()
}

// ============================================================================
// Calibration
// ============================================================================

/// Derive pixels-per-foot from a user-drawn reference segment.
///
/// `pixel_distance` is measured in screen pixels at the current `zoom`; the
/// result is expressed in page pixels (zoom 1) per real foot.
pub fn calibrate(pixel_distance: f32, zoom: f32, real_distance: f32, unit: Unit) -> Option<f32> {
    if zoom <= 0.0 {
        return None;
    }
    let real_feet = unit.to_feet(real_distance);
    if real_feet <= 0.0 {
        return None;
    }
    positive((pixel_distance / zoom) / real_feet)
}

// ============================================================================
// Standard Scale Inference
// ============================================================================

/// A standard drawing scale with its persisted string form.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScaleEntry {
    /// Canonical scale string, persisted and re-parseable.
    pub scale_string: &'static str,
    /// Unitless paper/real length ratio.
    pub ratio: f32,
}

/// Architectural ladder: paper inches per one real foot.
pub const ARCHITECTURAL_SCALES: &[ScaleEntry] = &[
    ScaleEntry { scale_string: "1/16\" = 1'-0\"", ratio: 1.0 / 16.0 / 12.0 },
    ScaleEntry { scale_string: "1/8\" = 1'-0\"", ratio: 1.0 / 8.0 / 12.0 },
    ScaleEntry { scale_string: "3/16\" = 1'-0\"", ratio: 3.0 / 16.0 / 12.0 },
    ScaleEntry { scale_string: "1/4\" = 1'-0\"", ratio: 1.0 / 4.0 / 12.0 },
    ScaleEntry { scale_string: "3/8\" = 1'-0\"", ratio: 3.0 / 8.0 / 12.0 },
    ScaleEntry { scale_string: "1/2\" = 1'-0\"", ratio: 1.0 / 2.0 / 12.0 },
    ScaleEntry { scale_string: "3/4\" = 1'-0\"", ratio: 3.0 / 4.0 / 12.0 },
    ScaleEntry { scale_string: "1\" = 1'-0\"", ratio: 1.0 / 12.0 },
    ScaleEntry { scale_string: "1-1/2\" = 1'-0\"", ratio: 1.5 / 12.0 },
    ScaleEntry { scale_string: "3\" = 1'-0\"", ratio: 3.0 / 12.0 },
];

/// Civil ladder: one paper inch per N real feet.
pub const CIVIL_SCALES: &[ScaleEntry] = &[
    ScaleEntry { scale_string: "1\" = 10'", ratio: 1.0 / 120.0 },
    ScaleEntry { scale_string: "1\" = 20'", ratio: 1.0 / 240.0 },
    ScaleEntry { scale_string: "1\" = 30'", ratio: 1.0 / 360.0 },
    ScaleEntry { scale_string: "1\" = 40'", ratio: 1.0 / 480.0 },
    ScaleEntry { scale_string: "1\" = 50'", ratio: 1.0 / 600.0 },
    ScaleEntry { scale_string: "1\" = 60'", ratio: 1.0 / 720.0 },
    ScaleEntry { scale_string: "1\" = 100'", ratio: 1.0 / 1200.0 },
    ScaleEntry { scale_string: "1\" = 200'", ratio: 1.0 / 2400.0 },
    ScaleEntry { scale_string: "1\" = 300'", ratio: 1.0 / 3600.0 },
    ScaleEntry { scale_string: "1\" = 400'", ratio: 1.0 / 4800.0 },
    ScaleEntry { scale_string: "1\" = 500'", ratio: 1.0 / 6000.0 },
];

/// Infer the nearest standard scale from a calibration gesture.
///
/// `pixel_distance` is in screen pixels at `zoom`; `real_inches` is the
/// user-entered real length of the reference line. Both ladders are searched
/// in declaration order and the strict comparison keeps the first enumerated
/// entry on ties.
pub fn infer_scale(pixel_distance: f32, zoom: f32, real_inches: f32) -> Option<&'static ScaleEntry> {
    if pixel_distance <= 0.0 || zoom <= 0.0 || real_inches <= 0.0 {
        return None;
    }
    let drawing_inches = pixel_distance / (BASE_DPI * zoom);
    let measured_ratio = drawing_inches / real_inches;

    let mut best: Option<(&'static ScaleEntry, f32)> = None;
    for entry in ARCHITECTURAL_SCALES.iter().chain(CIVIL_SCALES.iter()) {
        let distance = (entry.ratio - measured_ratio).abs();
        if best.map(|(_, d)| distance < d).unwrap_or(true) {
            best = Some((entry, distance));
        }
    }
    best.map(|(entry, _)| entry)
}

/// Default scale when no measurement has been taken yet.
///
/// The drawing's discipline tag picks this fallback only; it never overrides
/// the nearest-match search above.
pub fn default_scale_for(discipline: Option<&str>) -> &'static ScaleEntry {
    let civil = discipline
        .map(|d| {
            let d = d.to_ascii_lowercase();
            d.contains("civil") || d.contains("site") || d.contains("survey")
        })
        .unwrap_or(false);
    if civil {
        &CIVIL_SCALES[1] // 1" = 20'
    } else {
        &ARCHITECTURAL_SCALES[3] // 1/4" = 1'-0"
    }
}

// ============================================================================
// Distance and Area Conversion
// ============================================================================

/// Convert a pixel distance (page pixels at zoom 1) to real feet.
pub fn pixels_to_feet(pixel_distance: f32, pixels_per_foot: f32) -> Option<f32> {
    if pixels_per_foot <= 0.0 {
        return None;
    }
    Some(pixel_distance / pixels_per_foot)
}

/// Polygon area in square pixels via the shoelace formula.
pub fn polygon_pixel_area(points: &[(f32, f32)]) -> f32 {
    if points.len() < 3 {
        return 0.0;
    }
    let mut sum = 0.0;
    let n = points.len();
    for i in 0..n {
        let (x1, y1) = points[i];
        let (x2, y2) = points[(i + 1) % n];
        sum += x1 * y2 - x2 * y1;
    }
    (sum / 2.0).abs()
}

/// Convert a pixel² area to square feet.
pub fn pixel_area_to_square_feet(pixel_area: f32, pixels_per_foot: f32) -> Option<f32> {
    if pixels_per_foot <= 0.0 {
        return None;
    }
    Some(pixel_area / (pixels_per_foot * pixels_per_foot))
}

/// Format a distance label, one decimal: `13.3 ft`.
pub fn format_feet(feet: f32) -> String {
    format!("{:.1} ft", feet)
}

/// Format an area label, one decimal: `250.0 sq ft`.
pub fn format_square_feet(square_feet: f32) -> String {
    format!("{:.1} sq ft", square_feet)
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f32 = 0.001;

    fn approx_eq(a: f32, b: f32) -> bool {
        (a - b).abs() < EPSILON
    }

    // Page width of 850 px gives an estimated DPI of exactly 100.
    const PAGE_W: f32 = 850.0;

    #[test]
    fn test_parse_bare_number() {
        assert!(approx_eq(parse_scale("40", PAGE_W).unwrap(), 40.0));
        assert!(approx_eq(parse_scale(" 12.5 ", PAGE_W).unwrap(), 12.5));
    }

    #[test]
    fn test_parse_pixels_per_feet_ratio() {
        assert!(approx_eq(parse_scale("200/5", PAGE_W).unwrap(), 40.0));
        assert!(parse_scale("200/0", PAGE_W).is_none());
    }

    #[test]
    fn test_parse_architectural_quarter_inch() {
        // 1/4 paper inch per real foot at 100 DPI = 25 px/ft
        let ppf = parse_scale("1/4\" = 1'-0\"", PAGE_W).unwrap();
        assert!(approx_eq(ppf, 25.0));
    }

    #[test]
    fn test_parse_architectural_feet_and_inches() {
        // 1" = 1'-6" -> 1 / 1.5 ft * 100 dpi
        let ppf = parse_scale("1\" = 1'-6\"", PAGE_W).unwrap();
        assert!(approx_eq(ppf, 100.0 / 1.5));
    }

    #[test]
    fn test_parse_civil_form() {
        let ppf = parse_scale("1\" = 20'", PAGE_W).unwrap();
        assert!(approx_eq(ppf, 5.0));
    }

    #[test]
    fn test_parse_mixed_fraction_paper_side() {
        // 1-1/2" = 1'-0" -> 1.5 * 100 px/ft
        let ppf = parse_scale("1-1/2\" = 1'-0\"", PAGE_W).unwrap();
        assert!(approx_eq(ppf, 150.0));
    }

    #[test]
    fn test_parse_metric_ratio() {
        // 1:100 at 100 DPI: dpi * 12 / 100
        let ppf = parse_scale("1:100", PAGE_W).unwrap();
        assert!(approx_eq(ppf, 12.0));
    }

    #[test]
    fn test_malformed_strings_resolve_to_none() {
        for s in ["", "abc", "x\" = y'", "1:", ":100", "/", "1/4\" ="] {
            assert!(parse_scale(s, PAGE_W).is_none(), "should not parse: {s:?}");
        }
    }

    #[test]
    fn test_format_parse_round_trip() {
        for ppf in [1.0_f32, 40.0, 33.3333, 250.0] {
            let s = format_scale(ppf);
            let back = parse_scale(&s, PAGE_W).unwrap();
            assert!(approx_eq(back, ppf), "{ppf} -> {s} -> {back}");
        }
    }

    #[test]
    fn test_calibrate_exact() {
        // 200 px over 5 real feet at zoom 1 -> exactly 40 px/ft
        assert_eq!(calibrate(200.0, 1.0, 5.0, Unit::Feet), Some(40.0));
    }

    #[test]
    fn test_calibrate_divides_out_zoom() {
        assert!(approx_eq(
            calibrate(400.0, 2.0, 5.0, Unit::Feet).unwrap(),
            40.0
        ));
    }

    #[test]
    fn test_calibrate_unit_conversions() {
        assert!(approx_eq(
            calibrate(120.0, 1.0, 24.0, Unit::Inches).unwrap(),
            60.0
        ));
        assert!(approx_eq(
            calibrate(328.084, 1.0, 1.0, Unit::Meters).unwrap(),
            100.0
        ));
        assert!(approx_eq(
            calibrate(328.084, 1.0, 100.0, Unit::Centimeters).unwrap(),
            100.0
        ));
    }

    #[test]
    fn test_measurement_after_calibration() {
        // Calibrate 300 px = 10 ft, then measure a 400 px gesture
        let ppf = calibrate(300.0, 1.0, 10.0, Unit::Feet).unwrap();
        assert_eq!(ppf, 30.0);
        let feet = pixels_to_feet(400.0, ppf).unwrap();
        assert_eq!(format_feet(feet), "13.3 ft");
    }

    #[test]
    fn test_unscaled_measurement_is_absent() {
        assert!(pixels_to_feet(400.0, 0.0).is_none());
    }

    #[test]
    fn test_infer_architectural_scale() {
        // 72 px at zoom 1 = 1 drawing inch; 48 real inches -> 1/4" per foot
        let entry = infer_scale(72.0, 1.0, 48.0).unwrap();
        assert_eq!(entry.scale_string, "1/4\" = 1'-0\"");
    }

    #[test]
    fn test_infer_civil_scale() {
        // 1 drawing inch covering 20 real feet
        let entry = infer_scale(72.0, 1.0, 240.0).unwrap();
        assert_eq!(entry.scale_string, "1\" = 20'");
    }

    #[test]
    fn test_infer_accounts_for_zoom() {
        // Same gesture at 2x zoom covers half the drawing inches
        let entry = infer_scale(144.0, 2.0, 240.0).unwrap();
        assert_eq!(entry.scale_string, "1\" = 20'");
    }

    #[test]
    fn test_inferred_strings_reparse() {
        for entry in ARCHITECTURAL_SCALES.iter().chain(CIVIL_SCALES.iter()) {
            assert!(
                parse_scale(entry.scale_string, PAGE_W).is_some(),
                "ladder entry must round-trip: {}",
                entry.scale_string
            );
        }
    }

    #[test]
    fn test_default_scale_by_discipline() {
        assert_eq!(
            default_scale_for(Some("Civil")).scale_string,
            "1\" = 20'"
        );
        assert_eq!(
            default_scale_for(Some("Architectural")).scale_string,
            "1/4\" = 1'-0\""
        );
        assert_eq!(default_scale_for(None).scale_string, "1/4\" = 1'-0\"");
    }

    #[test]
    fn test_shoelace_area() {
        let square = [(0.0, 0.0), (100.0, 0.0), (100.0, 100.0), (0.0, 100.0)];
        assert!(approx_eq(polygon_pixel_area(&square), 10_000.0));
        assert_eq!(polygon_pixel_area(&square[..2]), 0.0);
    }

    #[test]
    fn test_area_conversion() {
        let sq_ft = pixel_area_to_square_feet(10_000.0, 10.0).unwrap();
        assert!(approx_eq(sq_ft, 100.0));
        assert_eq!(format_square_feet(sq_ft), "100.0 sq ft");
    }
}
