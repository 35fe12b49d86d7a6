//! drawmark: platform-independent markup engine for scaled construction
//! drawings.
//!
//! The engine owns everything about annotating a drawing page except the
//! pixels: the annotation model, page-normalized coordinates, real-world
//! scale math, the interactive tool state machine, hit testing, undo/redo
//! and a pure renderer that emits primitive draw commands. Per-platform
//! shells feed it pointer and keyboard events and replay the commands onto
//! their own canvas.
//!
//! Typical flow:
//! 1. Construct a [`MarkupEditor`] with the drawing's [`DrawingMeta`] and a
//!    [`PersistenceSink`].
//! 2. Forward pointer events; activate tools with [`MarkupEditor::set_tool`].
//! 3. Each frame, call [`render`] over the visible annotations and draft.

pub mod constants;
pub mod editor;
pub mod error;
pub mod model;
pub mod persist;
pub mod render;
pub mod scale;
pub mod tool;
pub mod undo;
pub mod viewport;

pub use editor::{DrawingMeta, EscapeOutcome, MarkupEditor};
pub use error::MarkupError;
pub use model::{
    Annotation, AnnotationId, AnnotationKind, AnnotationStore, NormalizedPoint, NormalizedRect,
    Shape,
};
pub use persist::{NullSink, PersistenceSink};
pub use render::{render, DrawCommand, RenderParams};
pub use scale::Unit;
pub use tool::{Gesture, Tool, ToolState};
pub use undo::{Command, UndoStack};
pub use viewport::Viewport;
