//! In-memory annotation list for the drawing currently open.
//!
//! The authoritative copy lives in the external persistence store; this is
//! the optimistic local mirror the editor mutates synchronously. Order is
//! creation order, which the hit tester walks in reverse (topmost-last wins).

use serde::{Deserialize, Serialize};

use super::annotation::{Annotation, AnnotationId, Shape};

/// Ordered storage for the annotations of one drawing file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AnnotationStore {
    /// All annotations in creation order.
    annotations: Vec<Annotation>,
    /// Counter for generating unique annotation IDs.
    next_id: AnnotationId,
}

impl AnnotationStore {
    pub fn new() -> Self {
        Self {
            annotations: Vec::new(),
            next_id: 1,
        }
    }

    /// Allocate the next annotation ID without inserting anything.
    pub fn allocate_id(&mut self) -> AnnotationId {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Add an annotation created elsewhere (id already allocated).
    pub fn add(&mut self, annotation: Annotation) {
        debug_assert!(self.get(annotation.id).is_none());
        self.next_id = self.next_id.max(annotation.id + 1);
        self.annotations.push(annotation);
    }

    /// Re-insert an annotation with its original ID at its creation-order
    /// position. Used by undo/redo so the list is restored exactly.
    pub fn restore(&mut self, annotation: Annotation) {
        self.next_id = self.next_id.max(annotation.id + 1);
        let index = self
            .annotations
            .iter()
            .position(|a| a.id > annotation.id)
            .unwrap_or(self.annotations.len());
        self.annotations.insert(index, annotation);
    }

    /// Remove an annotation by ID, returning it if present.
    pub fn remove(&mut self, id: AnnotationId) -> Option<Annotation> {
        let index = self.annotations.iter().position(|a| a.id == id)?;
        Some(self.annotations.remove(index))
    }

    /// Get an annotation by ID.
    pub fn get(&self, id: AnnotationId) -> Option<&Annotation> {
        self.annotations.iter().find(|a| a.id == id)
    }

    /// Get a mutable reference to an annotation by ID.
    pub fn get_mut(&mut self, id: AnnotationId) -> Option<&mut Annotation> {
        self.annotations.iter_mut().find(|a| a.id == id)
    }

    /// Replace the shape of an annotation. Returns false if the ID is unknown.
    pub fn update_shape(&mut self, id: AnnotationId, shape: Shape) -> bool {
        match self.get_mut(id) {
            Some(ann) => {
                ann.shape = shape;
                true
            }
            None => false,
        }
    }

    /// All annotations in creation order.
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &Annotation> {
        self.annotations.iter()
    }

    /// Annotations on a given page, in creation order.
    pub fn on_page(&self, page_number: u32) -> impl DoubleEndedIterator<Item = &Annotation> {
        self.annotations
            .iter()
            .filter(move |a| a.page_number == page_number)
    }

    /// Get the number of annotations.
    pub fn len(&self) -> usize {
        self.annotations.len()
    }

    /// Check if there are no annotations.
    pub fn is_empty(&self) -> bool {
        self.annotations.is_empty()
    }

    /// Remove all annotations, returning them for the undo record.
    pub fn clear(&mut self) -> Vec<Annotation> {
        std::mem::take(&mut self.annotations)
    }

    // ========================================================================
    // Import/Export
    // ========================================================================

    /// Export the store to a JSON string.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Import a store from a JSON string.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}
