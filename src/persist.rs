//! Seam to the external persistence store.
//!
//! The engine mutates its local annotation list optimistically and forwards
//! each mutation here fire-and-forget; failures are logged by the editor and
//! not rolled back locally.

use crate::error::MarkupError;
use crate::model::{Annotation, AnnotationId};

/// External persistence API for annotations and the drawing's scale string.
pub trait PersistenceSink {
    /// A finalized annotation was created locally.
    fn create(&mut self, annotation: &Annotation) -> Result<(), MarkupError>;

    /// An annotation was deleted locally.
    fn delete(&mut self, id: AnnotationId) -> Result<(), MarkupError>;

    /// All annotations of the drawing were cleared locally.
    fn clear_all(&mut self) -> Result<(), MarkupError>;

    /// A calibration produced a new scale string for the drawing.
    fn save_scale(&mut self, scale: &str) -> Result<(), MarkupError>;
}

/// Sink that drops everything; useful for tests and read-only viewers.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSink;

impl PersistenceSink for NullSink {
    fn create(&mut self, _annotation: &Annotation) -> Result<(), MarkupError> {
        Ok(())
    }

    fn delete(&mut self, _id: AnnotationId) -> Result<(), MarkupError> {
        Ok(())
    }

    fn clear_all(&mut self) -> Result<(), MarkupError> {
        Ok(())
    }

    fn save_scale(&mut self, _scale: &str) -> Result<(), MarkupError> {
        Ok(())
    }
}
