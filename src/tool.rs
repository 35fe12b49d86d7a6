//! Annotation tools and the interactive gesture state machine's states.

use crate::model::{AnnotationKind, NormalizedPoint};

/// Tools the user can activate. Selection/panning is the absence of a tool
/// (`Option<Tool>::None` on the editor).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tool {
    Pin,
    Comment,
    Rectangle,
    Circle,
    Cloud,
    Highlight,
    Arrow,
    Line,
    Callout,
    Area,
    Freehand,
    Markup,
    Measure,
    Calibrate,
}

/// How a tool's pointer gesture works.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Gesture {
    /// Single press-release creates the annotation immediately
    ClickToPlace,
    /// Press records the start, move previews, release finalizes
    TwoPointDrag,
    /// Press starts a path, moves append sampled points, release finalizes
    MultiPointPath,
    /// First click sets the start, second click finalizes
    TwoClick,
}

impl Tool {
    /// Get the display name for this tool.
    pub fn name(&self) -> &'static str {
        match self {
            Tool::Pin => "Pin",
            Tool::Comment => "Comment",
            Tool::Rectangle => "Rectangle",
            Tool::Circle => "Circle",
            Tool::Cloud => "Cloud",
            Tool::Highlight => "Highlight",
            Tool::Arrow => "Arrow",
            Tool::Line => "Line",
            Tool::Callout => "Callout",
            Tool::Area => "Area",
            Tool::Freehand => "Freehand",
            Tool::Markup => "Markup",
            Tool::Measure => "Measure",
            Tool::Calibrate => "Calibrate",
        }
    }

    /// All tools in toolbar order.
    pub fn all() -> &'static [Tool] {
        &[
            Tool::Pin,
            Tool::Comment,
            Tool::Rectangle,
            Tool::Circle,
            Tool::Cloud,
            Tool::Highlight,
            Tool::Arrow,
            Tool::Line,
            Tool::Callout,
            Tool::Area,
            Tool::Freehand,
            Tool::Markup,
            Tool::Measure,
            Tool::Calibrate,
        ]
    }

    /// The gesture class this tool uses.
    pub fn gesture(&self) -> Gesture {
        match self {
            Tool::Pin | Tool::Comment => Gesture::ClickToPlace,
            Tool::Rectangle
            | Tool::Circle
            | Tool::Cloud
            | Tool::Highlight
            | Tool::Arrow
            | Tool::Line
            | Tool::Callout
            | Tool::Area => Gesture::TwoPointDrag,
            Tool::Freehand | Tool::Markup => Gesture::MultiPointPath,
            Tool::Measure | Tool::Calibrate => Gesture::TwoClick,
        }
    }

    /// The annotation kind this tool produces. Calibrate produces none: it
    /// mutates the drawing's scale instead.
    pub fn annotation_kind(&self) -> Option<AnnotationKind> {
        match self {
            Tool::Pin => Some(AnnotationKind::Pin),
            Tool::Comment => Some(AnnotationKind::Comment),
            Tool::Rectangle => Some(AnnotationKind::Rectangle),
            Tool::Circle => Some(AnnotationKind::Circle),
            Tool::Cloud => Some(AnnotationKind::Cloud),
            Tool::Highlight => Some(AnnotationKind::Highlight),
            Tool::Arrow => Some(AnnotationKind::Arrow),
            Tool::Line => Some(AnnotationKind::Line),
            Tool::Callout => Some(AnnotationKind::Callout),
            Tool::Area => Some(AnnotationKind::Area),
            Tool::Freehand => Some(AnnotationKind::Freehand),
            Tool::Markup => Some(AnnotationKind::Markup),
            Tool::Measure => Some(AnnotationKind::Measurement),
            Tool::Calibrate => None,
        }
    }
}

/// State of the in-progress pointer gesture.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum ToolState {
    /// No gesture in progress.
    #[default]
    Idle,
    /// Drawing an annotation with the active tool.
    Drawing {
        tool: Tool,
        start: NormalizedPoint,
        current: NormalizedPoint,
        /// Sampled points for multi-point path tools, empty otherwise.
        path: Vec<NormalizedPoint>,
    },
    /// Measuring: first click placed, live preview until the second click.
    Measuring {
        start: NormalizedPoint,
        current: NormalizedPoint,
    },
    /// Calibrating: geometrically a measurement, but feeds scale inference.
    /// `locked` is set after the second click while the real-world length
    /// prompt is outstanding.
    Calibrating {
        start: NormalizedPoint,
        current: NormalizedPoint,
        locked: bool,
    },
    /// Panning the viewport; tracks the previous pointer position.
    Panning { last_x: f32, last_y: f32 },
}

impl ToolState {
    /// Check if a draft gesture is in progress (anything but idle/panning).
    pub fn has_draft(&self) -> bool {
        !matches!(self, ToolState::Idle | ToolState::Panning { .. })
    }
}
