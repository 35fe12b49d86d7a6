//! Data models for the markup engine.

mod annotation;
mod store;

pub use annotation::{
    now_millis, Annotation, AnnotationId, AnnotationKind, NormalizedPoint, NormalizedRect, Shape,
};
pub use store::AnnotationStore;
