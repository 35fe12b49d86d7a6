//! Annotation data model for drawing markups.
//!
//! This module provides the core types for drawing annotations, including:
//! - Page-normalized geometry ([0,1] coordinates, independent of zoom)
//! - The closed set of 13 markup shapes as a tagged union
//! - The shared annotation record with author/timestamp metadata

use serde::{Deserialize, Serialize};

use crate::constants::threshold;

/// Unique identifier for an annotation.
pub type AnnotationId = u64;

// ============================================================================
// Core Geometry Types
// ============================================================================

/// A 2D point in page-normalized coordinates.
///
/// Both components live in [0,1] relative to the drawing page, so a stored
/// annotation is independent of zoom, scroll and canvas size.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NormalizedPoint {
    pub x: f32,
    pub y: f32,
}

impl NormalizedPoint {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Create a point clamped to the page. Out-of-page input saturates
    /// rather than being rejected.
    pub fn clamped(x: f32, y: f32) -> Self {
        Self {
            x: x.clamp(0.0, 1.0),
            y: y.clamp(0.0, 1.0),
        }
    }

    /// Calculate distance to another point.
    pub fn distance_to(&self, other: &NormalizedPoint) -> f32 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }
}

/// An axis-aligned box in normalized coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NormalizedRect {
    /// Top-left corner X coordinate
    pub x: f32,
    /// Top-left corner Y coordinate
    pub y: f32,
    /// Width as a fraction of the page width
    pub width: f32,
    /// Height as a fraction of the page height
    pub height: f32,
}

impl NormalizedRect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Create a box from two corner points.
    pub fn from_corners(p1: NormalizedPoint, p2: NormalizedPoint) -> Self {
        Self {
            x: p1.x.min(p2.x),
            y: p1.y.min(p2.y),
            width: (p1.x - p2.x).abs(),
            height: (p1.y - p2.y).abs(),
        }
    }

    /// Check if a point is inside the box, inflated by `tolerance` on all sides.
    pub fn contains_with_tolerance(&self, point: &NormalizedPoint, tolerance: f32) -> bool {
        point.x >= self.x - tolerance
            && point.x <= self.x + self.width + tolerance
            && point.y >= self.y - tolerance
            && point.y <= self.y + self.height + tolerance
    }
}

// ============================================================================
// Annotation Shapes
// ============================================================================

/// The closed set of markup shapes, one variant per annotation type.
///
/// The shared anchor point lives on [`Annotation::position`]; each variant
/// carries only its extra geometry/payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Shape {
    /// Single-point location marker with an optional label.
    Pin { label: Option<String> },
    /// Single-point discussion marker with optional text.
    Comment { text: Option<String> },
    /// Axis-aligned rectangle outline.
    Rectangle { width: f32, height: f32 },
    /// Ellipse inscribed in an axis-aligned box.
    Circle { width: f32, height: f32 },
    /// Revision cloud around an axis-aligned box.
    Cloud { width: f32, height: f32 },
    /// Translucent filled box.
    Highlight { width: f32, height: f32 },
    /// Segment with an arrowhead at the end point.
    Arrow { end: NormalizedPoint },
    /// Plain segment.
    Line { end: NormalizedPoint },
    /// Scaled distance measurement between two points.
    Measurement {
        end: NormalizedPoint,
        /// Label frozen at creation time, shown when no scale resolves
        display_value: Option<String>,
        /// Segment length in page pixels at zoom 1, captured at creation
        raw_pixel_distance: f32,
    },
    /// Numbered marker with an optional leader line.
    Callout {
        number: u32,
        leader_end: Option<NormalizedPoint>,
    },
    /// Closed polygon whose real-world area can be computed.
    Area { points: Vec<NormalizedPoint> },
    /// Open freehand path.
    Freehand { points: Vec<NormalizedPoint> },
    /// Open markup path (freehand styled as redline markup).
    Markup { points: Vec<NormalizedPoint> },
}

impl Shape {
    /// Get the discriminant kind of this shape.
    pub fn kind(&self) -> AnnotationKind {
        match self {
            Shape::Pin { .. } => AnnotationKind::Pin,
            Shape::Comment { .. } => AnnotationKind::Comment,
            Shape::Rectangle { .. } => AnnotationKind::Rectangle,
            Shape::Circle { .. } => AnnotationKind::Circle,
            Shape::Cloud { .. } => AnnotationKind::Cloud,
            Shape::Highlight { .. } => AnnotationKind::Highlight,
            Shape::Arrow { .. } => AnnotationKind::Arrow,
            Shape::Line { .. } => AnnotationKind::Line,
            Shape::Measurement { .. } => AnnotationKind::Measurement,
            Shape::Callout { .. } => AnnotationKind::Callout,
            Shape::Area { .. } => AnnotationKind::Area,
            Shape::Freehand { .. } => AnnotationKind::Freehand,
            Shape::Markup { .. } => AnnotationKind::Markup,
        }
    }

    /// Check whether this shape has enough geometry to draw.
    ///
    /// Degenerate shapes (sub-threshold boxes, polygons with fewer than 3
    /// vertices, paths with fewer than 2 points) are never created by the
    /// tool state machine, but data loaded from the store is re-checked here.
    pub fn is_renderable(&self) -> bool {
        match self {
            Shape::Pin { .. } | Shape::Comment { .. } | Shape::Callout { .. } => true,
            Shape::Rectangle { width, height }
            | Shape::Circle { width, height }
            | Shape::Cloud { width, height }
            | Shape::Highlight { width, height } => {
                *width >= threshold::MIN_EXTENT && *height >= threshold::MIN_EXTENT
            }
            Shape::Arrow { end } | Shape::Line { end } | Shape::Measurement { end, .. } => {
                end.x.is_finite() && end.y.is_finite()
            }
            Shape::Area { points } => points.len() >= threshold::MIN_POLYGON_POINTS,
            Shape::Freehand { points } | Shape::Markup { points } => {
                points.len() >= threshold::MIN_POLYLINE_POINTS
            }
        }
    }

    /// Get the bounding box of this shape, anchored at `position`.
    pub fn bounding_box(&self, position: NormalizedPoint) -> NormalizedRect {
        match self {
            Shape::Pin { .. } | Shape::Comment { .. } => {
                NormalizedRect::new(position.x, position.y, 0.0, 0.0)
            }
            Shape::Callout { leader_end, .. } => match leader_end {
                Some(end) => NormalizedRect::from_corners(position, *end),
                None => NormalizedRect::new(position.x, position.y, 0.0, 0.0),
            },
            Shape::Rectangle { width, height }
            | Shape::Circle { width, height }
            | Shape::Cloud { width, height }
            | Shape::Highlight { width, height } => {
                NormalizedRect::new(position.x, position.y, *width, *height)
            }
            Shape::Arrow { end } | Shape::Line { end } | Shape::Measurement { end, .. } => {
                NormalizedRect::from_corners(position, *end)
            }
            Shape::Area { points } | Shape::Freehand { points } | Shape::Markup { points } => {
                bounding_box_of(position, points)
            }
        }
    }
}

/// Bounding box over an anchor point plus a point list.
fn bounding_box_of(anchor: NormalizedPoint, points: &[NormalizedPoint]) -> NormalizedRect {
    let mut min_x = anchor.x;
    let mut min_y = anchor.y;
    let mut max_x = anchor.x;
    let mut max_y = anchor.y;
    for p in points {
        min_x = min_x.min(p.x);
        min_y = min_y.min(p.y);
        max_x = max_x.max(p.x);
        max_y = max_y.max(p.y);
    }
    NormalizedRect::new(min_x, min_y, max_x - min_x, max_y - min_y)
}

// ============================================================================
// Annotation Kinds
// ============================================================================

/// Discriminant for the 13 annotation types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AnnotationKind {
    Pin,
    Comment,
    Rectangle,
    Circle,
    Cloud,
    Highlight,
    Arrow,
    Line,
    Measurement,
    Callout,
    Area,
    Freehand,
    Markup,
}

impl AnnotationKind {
    /// Get the display name for this kind.
    pub fn name(&self) -> &'static str {
        match self {
            AnnotationKind::Pin => "Pin",
            AnnotationKind::Comment => "Comment",
            AnnotationKind::Rectangle => "Rectangle",
            AnnotationKind::Circle => "Circle",
            AnnotationKind::Cloud => "Cloud",
            AnnotationKind::Highlight => "Highlight",
            AnnotationKind::Arrow => "Arrow",
            AnnotationKind::Line => "Line",
            AnnotationKind::Measurement => "Measurement",
            AnnotationKind::Callout => "Callout",
            AnnotationKind::Area => "Area",
            AnnotationKind::Freehand => "Freehand",
            AnnotationKind::Markup => "Markup",
        }
    }

    /// All annotation kinds in declaration order.
    pub fn all() -> &'static [AnnotationKind] {
        &[
            AnnotationKind::Pin,
            AnnotationKind::Comment,
            AnnotationKind::Rectangle,
            AnnotationKind::Circle,
            AnnotationKind::Cloud,
            AnnotationKind::Highlight,
            AnnotationKind::Arrow,
            AnnotationKind::Line,
            AnnotationKind::Measurement,
            AnnotationKind::Callout,
            AnnotationKind::Area,
            AnnotationKind::Freehand,
            AnnotationKind::Markup,
        ]
    }

    /// Whether resolution state is meaningful for this kind.
    pub fn is_resolvable(&self) -> bool {
        matches!(self, AnnotationKind::Pin | AnnotationKind::Comment)
    }
}

// ============================================================================
// Annotation
// ============================================================================

/// A single markup on a drawing page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Annotation {
    /// Unique identifier for this annotation.
    pub id: AnnotationId,
    /// The page of the drawing this markup belongs to (1-based).
    pub page_number: u32,
    /// Anchor or start point in page-normalized coordinates.
    pub position: NormalizedPoint,
    /// The shape geometry and per-type payload.
    pub shape: Shape,
    /// Stroke color as a hex string (e.g. "#E53935").
    pub color: String,
    /// Stroke width in screen pixels.
    pub stroke_width: f32,
    /// Creation time in epoch milliseconds.
    pub created_at: u64,
    /// Author identifier, opaque to this engine.
    pub created_by: String,
    /// Resolution time; only meaningful for Pin/Comment.
    #[serde(default)]
    pub resolved_at: Option<u64>,
    /// Optional reference to an external entity, opaque to this engine.
    #[serde(default)]
    pub linked_entity: Option<String>,
}

impl Annotation {
    /// Create a new annotation stamped with the current time.
    pub fn new(
        id: AnnotationId,
        page_number: u32,
        position: NormalizedPoint,
        shape: Shape,
        color: impl Into<String>,
        stroke_width: f32,
        created_by: impl Into<String>,
    ) -> Self {
        Self {
            id,
            page_number,
            position,
            shape,
            color: color.into(),
            stroke_width,
            created_at: now_millis(),
            created_by: created_by.into(),
            resolved_at: None,
            linked_entity: None,
        }
    }

    /// Attach a linked external entity reference.
    pub fn with_linked_entity(mut self, entity: impl Into<String>) -> Self {
        self.linked_entity = Some(entity.into());
        self
    }

    /// Get the discriminant kind of this annotation.
    pub fn kind(&self) -> AnnotationKind {
        self.shape.kind()
    }

    /// Get the bounding box of this annotation.
    pub fn bounding_box(&self) -> NormalizedRect {
        self.shape.bounding_box(self.position)
    }
}

/// Current time in epoch milliseconds (wasm-safe).
pub fn now_millis() -> u64 {
    web_time::SystemTime::now()
        .duration_since(web_time::UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}

// ============================================================================
// Tests
// ============================================================================
