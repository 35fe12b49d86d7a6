//! Engine constants for zoom, interaction thresholds, scale math and rendering.
//!
//! This module centralizes all hardcoded values so the per-platform shells
//! and the core agree on the same numbers.

/// Zoom constants.
pub mod zoom {
    /// Zoom increment/decrement factor for button zoom
    pub const FACTOR: f32 = 1.2;
    /// Maximum zoom level
    pub const MAX: f32 = 5.0;
    /// Minimum zoom level
    pub const MIN: f32 = 0.2;
}

/// Interaction threshold constants.
pub mod threshold {
    /// Minimum width/height/length for a drag-created shape, as a fraction
    /// of the normalized page dimension. Smaller attempts are discarded.
    pub const MIN_EXTENT: f32 = 0.01;
    /// Minimum sampled points for a freehand/markup path to finalize
    pub const MIN_PATH_POINTS: usize = 3;
    /// Minimum vertices for a stored polygon to be renderable
    pub const MIN_POLYGON_POINTS: usize = 3;
    /// Minimum stored points for a polyline to be renderable
    pub const MIN_POLYLINE_POINTS: usize = 2;
    /// Hit test tolerance in screen pixels
    pub const HIT_TOLERANCE_PX: f32 = 8.0;
    /// Epsilon for float comparison
    pub const FLOAT_EPSILON: f32 = 0.001;
}

/// Real-world scale constants.
pub mod scale {
    /// Nominal screen DPI used by scale inference
    pub const BASE_DPI: f32 = 72.0;
    /// US Letter page width in inches, used to estimate the page DPI
    pub const LETTER_WIDTH_IN: f32 = 8.5;
    /// Feet per meter
    pub const FEET_PER_METER: f32 = 3.28084;
    /// Inches per meter
    pub const INCHES_PER_METER: f32 = 39.3701;
    /// Inches per foot
    pub const INCHES_PER_FOOT: f32 = 12.0;
}

/// Annotation defaults.
pub mod annotation {
    /// Default stroke color (hex) for newly created annotations
    pub const DEFAULT_COLOR: &str = "#E53935";
    /// Default fill color for highlight boxes
    pub const HIGHLIGHT_COLOR: &str = "#FFEB3B";
    /// Default stroke width in screen pixels
    pub const DEFAULT_STROKE_WIDTH: f32 = 2.0;
    /// Maximum commands kept on the undo stack
    pub const MAX_UNDO_HISTORY: usize = 100;
}

/// Renderer geometry constants.
pub mod render {
    /// Marker radius for point annotations (pin, comment, callout badge)
    pub const MARKER_RADIUS: f32 = 6.0;
    /// Number of perimeter points for the cloud outline (alternating radius)
    pub const CLOUD_POINTS: usize = 16;
    /// Inward pull of every other cloud perimeter point
    pub const CLOUD_INNER_SCALE: f32 = 0.85;
    /// Outward push of the cloud arc control points
    pub const CLOUD_BULGE: f32 = 1.15;
    /// Arrowhead segment length in screen pixels
    pub const ARROWHEAD_LEN: f32 = 12.0;
    /// Arrowhead half-angle in radians (30 degrees off the shaft)
    pub const ARROWHEAD_ANGLE: f32 = std::f32::consts::PI / 6.0;
    /// Measurement end tick half-length in screen pixels
    pub const TICK_HALF_LEN: f32 = 6.0;
    /// Label text size in screen pixels
    pub const LABEL_SIZE: f32 = 12.0;
}
