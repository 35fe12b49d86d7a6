//! Undo/Redo system for annotation mutations.
//!
//! Implements the Command pattern: every tracked mutation stores enough
//! state to reverse itself. The editor performs the mutation first, then
//! records the command; undo applies the inverse against the store.

use crate::model::{Annotation, AnnotationId, AnnotationStore, Shape};

// ============================================================================
// Command Types
// ============================================================================

/// A reversible annotation mutation.
#[derive(Debug, Clone)]
pub enum Command {
    /// An annotation was created
    Create {
        /// The annotation that was added
        annotation: Annotation,
    },
    /// An annotation was deleted
    Delete {
        /// The annotation that was removed (stored for undo)
        annotation: Annotation,
    },
    /// An annotation's geometry was updated
    UpdateShape {
        /// The annotation ID
        id: AnnotationId,
        /// The shape before the update
        old_shape: Shape,
        /// The shape after the update
        new_shape: Shape,
    },
    /// All annotations were cleared
    Clear {
        /// Everything that was removed (stored for undo)
        annotations: Vec<Annotation>,
    },
}

impl Command {
    /// Get a human-readable description of this command.
    pub fn description(&self) -> String {
        match self {
            Command::Create { annotation } => {
                format!("Create {}", annotation.kind().name())
            }
            Command::Delete { annotation } => {
                format!("Delete {}", annotation.kind().name())
            }
            Command::UpdateShape { .. } => "Update geometry".to_string(),
            Command::Clear { annotations } => {
                format!("Clear {} annotations", annotations.len())
            }
        }
    }
}

// ============================================================================
// Undo Stack
// ============================================================================

/// The undo/redo history.
///
/// Two stacks, most recent at the end. Recording a new command clears the
/// redo stack; undo moves the command across; redo moves it back. History is
/// capped to bound memory.
#[derive(Debug, Clone, Default)]
pub struct UndoStack {
    undo_stack: Vec<Command>,
    redo_stack: Vec<Command>,
    max_history: usize,
}

impl UndoStack {
    pub fn new(max_history: usize) -> Self {
        Self {
            undo_stack: Vec::new(),
            redo_stack: Vec::new(),
            max_history,
        }
    }

    /// Record an already-performed mutation. Clears the redo stack.
    pub fn record(&mut self, command: Command) {
        log::debug!("📝 Undo: recorded '{}'", command.description());
        self.undo_stack.push(command);
        self.redo_stack.clear();

        while self.max_history > 0 && self.undo_stack.len() > self.max_history {
            self.undo_stack.remove(0);
        }
    }

    /// Check if undo is available.
    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    /// Check if redo is available.
    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    /// Undo the most recent mutation against the store.
    /// Returns the undone command, or None if there was nothing to undo.
    pub fn undo(&mut self, store: &mut AnnotationStore) -> Option<Command> {
        let cmd = self.undo_stack.pop()?;
        log::debug!("⏪ Undo: '{}'", cmd.description());
        apply_inverse(&cmd, store);
        self.redo_stack.push(cmd.clone());
        Some(cmd)
    }

    /// Re-apply the most recently undone mutation.
    /// Returns the redone command, or None if there was nothing to redo.
    pub fn redo(&mut self, store: &mut AnnotationStore) -> Option<Command> {
        let cmd = self.redo_stack.pop()?;
        log::debug!("⏩ Redo: '{}'", cmd.description());
        apply_forward(&cmd, store);
        self.undo_stack.push(cmd.clone());
        Some(cmd)
    }

    /// Description of the command that would be undone.
    pub fn undo_description(&self) -> Option<String> {
        self.undo_stack.last().map(|c| c.description())
    }

    /// Description of the command that would be redone.
    pub fn redo_description(&self) -> Option<String> {
        self.redo_stack.last().map(|c| c.description())
    }

    /// Clear all history.
    pub fn clear(&mut self) {
        self.undo_stack.clear();
        self.redo_stack.clear();
    }

    /// Number of commands in undo history.
    pub fn undo_count(&self) -> usize {
        self.undo_stack.len()
    }
}

// ============================================================================
// Command Application
// ============================================================================

/// Apply the inverse of a command (undo direction).
fn apply_inverse(cmd: &Command, store: &mut AnnotationStore) {
    match cmd {
        Command::Create { annotation } => {
            store.remove(annotation.id);
        }
        Command::Delete { annotation } => {
            store.restore(annotation.clone());
        }
        Command::UpdateShape { id, old_shape, .. } => {
            store.update_shape(*id, old_shape.clone());
        }
        Command::Clear { annotations } => {
            for ann in annotations {
                store.restore(ann.clone());
            }
        }
    }
}

/// Re-apply a command (redo direction).
fn apply_forward(cmd: &Command, store: &mut AnnotationStore) {
    match cmd {
        Command::Create { annotation } => {
            store.restore(annotation.clone());
        }
        Command::Delete { annotation } => {
            store.remove(annotation.id);
        }
        Command::UpdateShape { id, new_shape, .. } => {
            store.update_shape(*id, new_shape.clone());
        }
        Command::Clear { .. } => {
            store.clear();
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::NormalizedPoint;

    fn create_pin(store: &mut AnnotationStore, stack: &mut UndoStack, x: f32) -> AnnotationId {
        let id = store.allocate_id();
        let ann = Annotation::new(
            id,
            1,
            NormalizedPoint::new(x, 0.5),
            Shape::Pin { label: None },
            "#E53935",
            2.0,
            "tester",
        );
        store.add(ann.clone());
        stack.record(Command::Create { annotation: ann });
        id
    }

    #[test]
    fn test_undo_create_restores_prior_list_exactly() {
        let mut store = AnnotationStore::new();
        let mut stack = UndoStack::new(100);

        create_pin(&mut store, &mut stack, 0.1);
        let before: Vec<Annotation> = store.iter().cloned().collect();

        let id = create_pin(&mut store, &mut stack, 0.2);
        let created = store.get(id).cloned().unwrap();

        stack.undo(&mut store);
        let after: Vec<Annotation> = store.iter().cloned().collect();
        assert_eq!(before, after);

        // Redo restores the created annotation byte-for-byte
        stack.redo(&mut store);
        assert_eq!(store.get(id), Some(&created));
    }

    #[test]
    fn test_undo_delete_restores_annotation() {
        let mut store = AnnotationStore::new();
        let mut stack = UndoStack::new(100);
        let id = create_pin(&mut store, &mut stack, 0.4);

        let removed = store.remove(id).unwrap();
        stack.record(Command::Delete {
            annotation: removed.clone(),
        });

        stack.undo(&mut store);
        assert_eq!(store.get(id), Some(&removed));
    }

    #[test]
    fn test_undo_shape_update() {
        let mut store = AnnotationStore::new();
        let mut stack = UndoStack::new(100);
        let id = create_pin(&mut store, &mut stack, 0.4);

        let old_shape = store.get(id).unwrap().shape.clone();
        let new_shape = Shape::Pin {
            label: Some("bent".to_string()),
        };
        store.update_shape(id, new_shape.clone());
        stack.record(Command::UpdateShape {
            id,
            old_shape: old_shape.clone(),
            new_shape,
        });

        stack.undo(&mut store);
        assert_eq!(store.get(id).unwrap().shape, old_shape);
    }

    #[test]
    fn test_undo_clear_restores_everything() {
        let mut store = AnnotationStore::new();
        let mut stack = UndoStack::new(100);
        create_pin(&mut store, &mut stack, 0.1);
        create_pin(&mut store, &mut stack, 0.2);

        let drained = store.clear();
        stack.record(Command::Clear {
            annotations: drained,
        });
        assert!(store.is_empty());

        stack.undo(&mut store);
        assert_eq!(store.len(), 2);

        stack.redo(&mut store);
        assert!(store.is_empty());
    }

    #[test]
    fn test_record_clears_redo() {
        let mut store = AnnotationStore::new();
        let mut stack = UndoStack::new(100);

        create_pin(&mut store, &mut stack, 0.1);
        stack.undo(&mut store);
        assert!(stack.can_redo());

        create_pin(&mut store, &mut stack, 0.2);
        assert!(!stack.can_redo());
    }

    #[test]
    fn test_max_history_evicts_oldest() {
        let mut store = AnnotationStore::new();
        let mut stack = UndoStack::new(3);

        for i in 0..5 {
            create_pin(&mut store, &mut stack, i as f32 / 10.0);
        }
        assert_eq!(stack.undo_count(), 3);
    }
}
