//! The markup editor controller.
//!
//! Owns the one mutable surface state the per-platform shells share: the
//! annotation list mirror, viewport, active tool, gesture state, selection
//! and undo history. Pointer and keyboard events are reduced synchronously;
//! finalized mutations go through the undo stack and are forwarded to the
//! persistence sink fire-and-forget.

use crate::constants::{annotation as ann_const, threshold};
use crate::hit_test;
use crate::model::{Annotation, AnnotationId, AnnotationStore, NormalizedPoint, NormalizedRect, Shape};
use crate::persist::PersistenceSink;
use crate::scale::{self, Unit};
use crate::tool::{Gesture, Tool, ToolState};
use crate::undo::{Command, UndoStack};
use crate::viewport::{to_normalized, Viewport};

// ============================================================================
// Drawing Metadata
// ============================================================================

/// Metadata of the drawing being marked up, provided by the collaborator
/// that owns the drawing record.
#[derive(Debug, Clone)]
pub struct DrawingMeta {
    /// Page bitmap width in pixels at zoom 1.
    pub page_width_px: f32,
    /// Page bitmap height in pixels at zoom 1.
    pub page_height_px: f32,
    /// Persisted scale string, if the drawing has been calibrated.
    pub scale: Option<String>,
    /// Discipline/subcategory tag (selects the default inference fallback).
    pub discipline: Option<String>,
}

/// What pressing Escape did, in priority order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EscapeOutcome {
    /// An in-progress draw/measurement/calibration was discarded.
    CancelledDraft,
    /// The current selection was cleared.
    ClearedSelection,
    /// Nothing to cancel locally; the shell should close the surface.
    CloseRequested,
}

// ============================================================================
// Editor
// ============================================================================

/// Interactive markup editor for one drawing page.
pub struct MarkupEditor<S: PersistenceSink> {
    store: AnnotationStore,
    undo: UndoStack,
    viewport: Viewport,
    tool: Option<Tool>,
    state: ToolState,
    selection: Option<AnnotationId>,
    meta: DrawingMeta,
    page_number: u32,
    author: String,
    color: String,
    stroke_width: f32,
    next_callout_number: u32,
    canvas_width: f32,
    canvas_height: f32,
    sink: S,
}

impl<S: PersistenceSink> MarkupEditor<S> {
    pub fn new(meta: DrawingMeta, author: impl Into<String>, sink: S) -> Self {
        let canvas_width = meta.page_width_px;
        let canvas_height = meta.page_height_px;
        Self {
            store: AnnotationStore::new(),
            undo: UndoStack::new(ann_const::MAX_UNDO_HISTORY),
            viewport: Viewport::new(canvas_width, canvas_height),
            tool: None,
            state: ToolState::Idle,
            selection: None,
            meta,
            page_number: 1,
            author: author.into(),
            color: ann_const::DEFAULT_COLOR.to_string(),
            stroke_width: ann_const::DEFAULT_STROKE_WIDTH,
            next_callout_number: 1,
            canvas_width,
            canvas_height,
            sink,
        }
    }

    /// Replace the local annotation list with the persisted one.
    pub fn load_annotations(&mut self, store: AnnotationStore) {
        self.store = store;
        self.undo.clear();
        self.selection = None;
        self.next_callout_number = self.next_callout_max() + 1;
    }

    fn next_callout_max(&self) -> u32 {
        self.store
            .iter()
            .filter_map(|a| match &a.shape {
                Shape::Callout { number, .. } => Some(*number),
                _ => None,
            })
            .max()
            .unwrap_or(0)
    }

    // ========================================================================
    // Accessors (exposed to UI collaborators)
    // ========================================================================

    pub fn store(&self) -> &AnnotationStore {
        &self.store
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn viewport_mut(&mut self) -> &mut Viewport {
        &mut self.viewport
    }

    pub fn tool(&self) -> Option<Tool> {
        self.tool
    }

    pub fn state(&self) -> &ToolState {
        &self.state
    }

    pub fn selection(&self) -> Option<AnnotationId> {
        self.selection
    }

    pub fn page_number(&self) -> u32 {
        self.page_number
    }

    pub fn set_page_number(&mut self, page: u32) {
        self.page_number = page;
    }

    pub fn set_color(&mut self, color: impl Into<String>) {
        self.color = color.into();
    }

    pub fn set_stroke_width(&mut self, width: f32) {
        self.stroke_width = width;
    }

    /// Annotations visible on the current page, in creation order.
    pub fn visible_annotations(&self) -> impl DoubleEndedIterator<Item = &Annotation> {
        self.store.on_page(self.page_number)
    }

    /// The drawing's persisted scale string, if any.
    pub fn scale_string(&self) -> Option<&str> {
        self.meta.scale.as_deref()
    }

    /// Resolved pixels-per-foot of the current scale, if it parses.
    pub fn pixels_per_foot(&self) -> Option<f32> {
        self.meta
            .scale
            .as_deref()
            .and_then(|s| scale::parse_scale(s, self.meta.page_width_px))
    }

    /// Whether a calibration gesture is in progress (for hint banners).
    pub fn is_calibrating(&self) -> bool {
        matches!(self.state, ToolState::Calibrating { .. })
    }

    /// Screen-pixel length of the locked calibration segment, if the second
    /// click has been placed and the real-world length prompt is pending.
    pub fn pending_calibration_px(&self) -> Option<f32> {
        match &self.state {
            ToolState::Calibrating {
                start,
                current,
                locked: true,
            } => Some(self.screen_distance(start, current)),
            _ => None,
        }
    }

    /// Update the canvas size the overlay is rendered into.
    pub fn set_canvas_size(&mut self, width: f32, height: f32) {
        self.canvas_width = width;
        self.canvas_height = height;
        self.viewport.set_view_size(width, height);
    }

    // ========================================================================
    // Tool Activation
    // ========================================================================

    /// Activate a tool (or `None` for select/pan). Clears the selection and
    /// discards any in-progress draft of a different tool.
    pub fn set_tool(&mut self, tool: Option<Tool>) {
        if self.state.has_draft() {
            log::debug!("❌ Draft discarded by tool switch");
        }
        self.state = ToolState::Idle;
        self.selection = None;
        self.tool = tool;
        log::debug!(
            "🖌️ Tool: {}",
            tool.map(|t| t.name()).unwrap_or("Select")
        );
    }

    // ========================================================================
    // Coordinate Helpers
    // ========================================================================

    fn page_size_at_zoom(&self) -> (f32, f32) {
        (
            self.meta.page_width_px * self.viewport.zoom,
            self.meta.page_height_px * self.viewport.zoom,
        )
    }

    fn normalize(&self, x: f32, y: f32) -> NormalizedPoint {
        let (pw, ph) = self.page_size_at_zoom();
        to_normalized(x, y, pw, ph, self.canvas_width, self.canvas_height)
    }

    /// Distance between two normalized points in screen pixels at the
    /// current zoom.
    fn screen_distance(&self, a: &NormalizedPoint, b: &NormalizedPoint) -> f32 {
        let (pw, ph) = self.page_size_at_zoom();
        let dx = (a.x - b.x) * pw;
        let dy = (a.y - b.y) * ph;
        (dx * dx + dy * dy).sqrt()
    }

    /// Hit tolerance in normalized units at the current canvas scale.
    fn hit_tolerance(&self) -> f32 {
        threshold::HIT_TOLERANCE_PX / (self.meta.page_width_px * self.viewport.zoom)
    }

    // ========================================================================
    // Pointer Events
    // ========================================================================

    /// Pointer pressed at canvas coordinates.
    pub fn pointer_pressed(&mut self, x: f32, y: f32) {
        self.viewport.note_pointer(x, y);
        let point = self.normalize(x, y);

        match self.tool {
            None => self.press_select(x, y, point),
            Some(tool) => match tool.gesture() {
                Gesture::ClickToPlace => self.place_point_annotation(tool, point),
                Gesture::TwoPointDrag => {
                    self.state = ToolState::Drawing {
                        tool,
                        start: point,
                        current: point,
                        path: Vec::new(),
                    };
                    log::debug!("✏️ Started {} at ({:.3}, {:.3})", tool.name(), point.x, point.y);
                }
                Gesture::MultiPointPath => {
                    self.state = ToolState::Drawing {
                        tool,
                        start: point,
                        current: point,
                        path: vec![point],
                    };
                    log::debug!("✏️ Started {} path", tool.name());
                }
                Gesture::TwoClick => self.press_two_click(tool, point),
            },
        }
    }

    /// Pointer moved to canvas coordinates (while pressed or hovering).
    pub fn pointer_moved(&mut self, x: f32, y: f32) {
        self.viewport.note_pointer(x, y);
        let point = self.normalize(x, y);

        match &mut self.state {
            ToolState::Drawing { current, path, .. } => {
                *current = point;
                if !path.is_empty() {
                    path.push(point);
                }
            }
            ToolState::Measuring { current, .. } => *current = point,
            ToolState::Calibrating {
                current, locked, ..
            } => {
                if !*locked {
                    *current = point;
                }
            }
            ToolState::Panning { last_x, last_y } => {
                let (dx, dy) = (x - *last_x, y - *last_y);
                *last_x = x;
                *last_y = y;
                // Content follows the pointer: scroll moves the other way
                self.viewport.scroll_by(-dx, -dy);
            }
            ToolState::Idle => {}
        }
    }

    /// Pointer released at canvas coordinates.
    pub fn pointer_released(&mut self, x: f32, y: f32) {
        let point = self.normalize(x, y);

        match std::mem::take(&mut self.state) {
            ToolState::Drawing {
                tool,
                start,
                path,
                ..
            } => self.finalize_drawing(tool, start, point, path),
            ToolState::Panning { .. } => {
                log::debug!("🖐️ Pan ended");
            }
            // Two-click gestures survive the release between clicks
            other => self.state = other,
        }
    }

    fn press_select(&mut self, x: f32, y: f32, point: NormalizedPoint) {
        // Hit testing is evaluated before falling back to panning
        let hit = hit_test::find_at(point, self.hit_tolerance(), self.visible_annotations());
        match hit {
            Some(id) => {
                self.selection = Some(id);
                log::debug!("🔍 Selected annotation {}", id);
            }
            None => {
                self.selection = None;
                self.state = ToolState::Panning {
                    last_x: x,
                    last_y: y,
                };
            }
        }
    }

    fn press_two_click(&mut self, tool: Tool, point: NormalizedPoint) {
        match (tool, std::mem::take(&mut self.state)) {
            (Tool::Measure, ToolState::Measuring { start, .. }) => {
                self.finalize_measurement(start, point);
            }
            (Tool::Measure, _) => {
                self.state = ToolState::Measuring {
                    start: point,
                    current: point,
                };
                log::debug!("📏 Measurement started");
            }
            (Tool::Calibrate, ToolState::Calibrating { start, locked, current }) => {
                if locked {
                    // Waiting on the real-length prompt; ignore further clicks
                    self.state = ToolState::Calibrating {
                        start,
                        current,
                        locked,
                    };
                } else {
                    self.state = ToolState::Calibrating {
                        start,
                        current: point,
                        locked: true,
                    };
                    log::debug!("📐 Calibration segment locked");
                }
            }
            (Tool::Calibrate, _) => {
                self.state = ToolState::Calibrating {
                    start: point,
                    current: point,
                    locked: false,
                };
                log::debug!("📐 Calibration started");
            }
            _ => {}
        }
    }

    // ========================================================================
    // Finalization
    // ========================================================================

    fn place_point_annotation(&mut self, tool: Tool, point: NormalizedPoint) {
        let shape = match tool {
            Tool::Pin => Shape::Pin { label: None },
            Tool::Comment => Shape::Comment { text: None },
            _ => return,
        };
        self.create_annotation(point, shape);
    }

    fn finalize_drawing(
        &mut self,
        tool: Tool,
        start: NormalizedPoint,
        end: NormalizedPoint,
        path: Vec<NormalizedPoint>,
    ) {
        match tool {
            Tool::Rectangle | Tool::Circle | Tool::Cloud | Tool::Highlight => {
                let rect = NormalizedRect::from_corners(start, end);
                if rect.width < threshold::MIN_EXTENT || rect.height < threshold::MIN_EXTENT {
                    log::debug!("❌ {} discarded: below minimum extent", tool.name());
                    return;
                }
                let shape = match tool {
                    Tool::Rectangle => Shape::Rectangle {
                        width: rect.width,
                        height: rect.height,
                    },
                    Tool::Circle => Shape::Circle {
                        width: rect.width,
                        height: rect.height,
                    },
                    Tool::Cloud => Shape::Cloud {
                        width: rect.width,
                        height: rect.height,
                    },
                    _ => Shape::Highlight {
                        width: rect.width,
                        height: rect.height,
                    },
                };
                self.create_annotation(NormalizedPoint::new(rect.x, rect.y), shape);
            }
            Tool::Area => {
                let rect = NormalizedRect::from_corners(start, end);
                if rect.width < threshold::MIN_EXTENT || rect.height < threshold::MIN_EXTENT {
                    log::debug!("❌ Area discarded: below minimum extent");
                    return;
                }
                // The drag rectangle's corners become the stored polygon
                let points = vec![
                    NormalizedPoint::new(rect.x, rect.y),
                    NormalizedPoint::new(rect.x + rect.width, rect.y),
                    NormalizedPoint::new(rect.x + rect.width, rect.y + rect.height),
                    NormalizedPoint::new(rect.x, rect.y + rect.height),
                ];
                self.create_annotation(points[0], Shape::Area { points });
            }
            Tool::Arrow | Tool::Line => {
                if start.distance_to(&end) < threshold::MIN_EXTENT {
                    log::debug!("❌ {} discarded: below minimum length", tool.name());
                    return;
                }
                let shape = if tool == Tool::Arrow {
                    Shape::Arrow { end }
                } else {
                    Shape::Line { end }
                };
                self.create_annotation(start, shape);
            }
            Tool::Callout => {
                if start.distance_to(&end) < threshold::MIN_EXTENT {
                    log::debug!("❌ Callout discarded: below minimum length");
                    return;
                }
                let number = self.next_callout_number;
                self.next_callout_number += 1;
                self.create_annotation(
                    start,
                    Shape::Callout {
                        number,
                        leader_end: Some(end),
                    },
                );
            }
            Tool::Freehand | Tool::Markup => {
                if path.len() < threshold::MIN_PATH_POINTS {
                    log::debug!("❌ {} discarded: only {} points", tool.name(), path.len());
                    return;
                }
                let position = path[0];
                let shape = if tool == Tool::Freehand {
                    Shape::Freehand { points: path }
                } else {
                    Shape::Markup { points: path }
                };
                self.create_annotation(position, shape);
            }
            _ => {}
        }
    }

    fn finalize_measurement(&mut self, start: NormalizedPoint, end: NormalizedPoint) {
        if start.distance_to(&end) < threshold::MIN_EXTENT {
            log::debug!("❌ Measurement discarded: below minimum length");
            return;
        }
        let screen_px = self.screen_distance(&start, &end);
        // Frozen at page pixels (zoom 1) so the value survives zoom changes
        let raw_pixel_distance = screen_px / self.viewport.zoom;
        let display_value = self
            .pixels_per_foot()
            .and_then(|ppf| scale::pixels_to_feet(raw_pixel_distance, ppf))
            .map(scale::format_feet);

        log::info!(
            "📏 Measurement finalized: {:.1} px -> {}",
            raw_pixel_distance,
            display_value.as_deref().unwrap_or("(no scale)")
        );
        self.create_annotation(
            start,
            Shape::Measurement {
                end,
                display_value,
                raw_pixel_distance,
            },
        );
    }

    fn create_annotation(&mut self, position: NormalizedPoint, shape: Shape) {
        let id = self.store.allocate_id();
        let annotation = Annotation::new(
            id,
            self.page_number,
            position,
            shape,
            self.color.clone(),
            self.stroke_width,
            self.author.clone(),
        );
        log::info!("✅ Created {} annotation {}", annotation.kind().name(), id);

        self.store.add(annotation.clone());
        self.undo.record(Command::Create {
            annotation: annotation.clone(),
        });
        // Optimistic: local list is already updated, sink failure is logged
        if let Err(e) = self.sink.create(&annotation) {
            log::warn!("⚠️ Persistence create failed for {}: {}", id, e);
        }
    }

    // ========================================================================
    // Measurement Preview & Calibration
    // ========================================================================

    /// Live label of an in-progress measurement, recomputed from the current
    /// scale and zoom every call. None when no gesture or no scale.
    pub fn measurement_preview(&self) -> Option<String> {
        let ToolState::Measuring { start, current } = &self.state else {
            return None;
        };
        let ppf = self.pixels_per_foot()?;
        let raw = self.screen_distance(start, current) / self.viewport.zoom;
        scale::pixels_to_feet(raw, ppf).map(scale::format_feet)
    }

    /// Complete a locked calibration by snapping to the nearest standard
    /// scale. Persists and returns the inferred scale string.
    pub fn complete_calibration(&mut self, real_distance: f32, unit: Unit) -> Option<String> {
        let px = self.pending_calibration_px()?;
        let entry = scale::infer_scale(px, self.viewport.zoom, unit.to_inches(real_distance))
            .unwrap_or_else(|| scale::default_scale_for(self.meta.discipline.as_deref()));
        self.state = ToolState::Idle;
        self.apply_scale(entry.scale_string.to_string())
    }

    /// Complete a locked calibration with the exact measured ratio, persisted
    /// as the bare pixels-per-foot canonical string.
    pub fn complete_calibration_exact(&mut self, real_distance: f32, unit: Unit) -> Option<String> {
        let px = self.pending_calibration_px()?;
        let ppf = scale::calibrate(px, self.viewport.zoom, real_distance, unit)?;
        self.state = ToolState::Idle;
        self.apply_scale(scale::format_scale(ppf))
    }

    fn apply_scale(&mut self, scale_string: String) -> Option<String> {
        log::info!("📐 Scale calibrated: {}", scale_string);
        if let Err(e) = self.sink.save_scale(&scale_string) {
            log::warn!("⚠️ Persistence save_scale failed: {}", e);
        }
        self.meta.scale = Some(scale_string.clone());
        Some(scale_string)
    }

    // ========================================================================
    // Keyboard / Commands
    // ========================================================================

    /// Escape, in priority order: cancel draft, then clear selection, then
    /// ask the shell to close the surface.
    pub fn escape(&mut self) -> EscapeOutcome {
        if self.state.has_draft() {
            self.state = ToolState::Idle;
            log::debug!("❌ Draft cancelled");
            return EscapeOutcome::CancelledDraft;
        }
        if self.selection.take().is_some() {
            log::debug!("🔍 Selection cleared");
            return EscapeOutcome::ClearedSelection;
        }
        EscapeOutcome::CloseRequested
    }

    /// Undo the most recent mutation. Returns false if nothing to undo.
    pub fn undo(&mut self) -> bool {
        let Some(cmd) = self.undo.undo(&mut self.store) else {
            return false;
        };
        self.mirror_to_sink(&cmd, false);
        self.drop_stale_selection();
        true
    }

    /// Redo the most recently undone mutation. Returns false if nothing to redo.
    pub fn redo(&mut self) -> bool {
        let Some(cmd) = self.undo.redo(&mut self.store) else {
            return false;
        };
        self.mirror_to_sink(&cmd, true);
        self.drop_stale_selection();
        true
    }

    pub fn can_undo(&self) -> bool {
        self.undo.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.undo.can_redo()
    }

    fn drop_stale_selection(&mut self) {
        if let Some(id) = self.selection {
            if self.store.get(id).is_none() {
                self.selection = None;
            }
        }
    }

    /// Forward the net effect of an undo/redo to the persistence sink.
    fn mirror_to_sink(&mut self, cmd: &Command, forward: bool) {
        let result = match (cmd, forward) {
            (Command::Create { annotation }, true) | (Command::Delete { annotation }, false) => {
                self.sink.create(annotation)
            }
            (Command::Create { annotation }, false) | (Command::Delete { annotation }, true) => {
                self.sink.delete(annotation.id)
            }
            (Command::Clear { annotations }, false) => annotations
                .iter()
                .try_for_each(|ann| self.sink.create(ann)),
            (Command::Clear { .. }, true) => self.sink.clear_all(),
            // Geometry updates have no dedicated persistence operation
            (Command::UpdateShape { .. }, _) => Ok(()),
        };
        if let Err(e) = result {
            log::warn!("⚠️ Persistence mirror failed: {}", e);
        }
    }

    /// Delete the currently selected annotation, if any.
    pub fn delete_selected(&mut self) -> bool {
        let Some(id) = self.selection.take() else {
            return false;
        };
        let Some(annotation) = self.store.remove(id) else {
            return false;
        };
        log::info!("🗑️ Deleted annotation {}", id);
        self.undo.record(Command::Delete {
            annotation: annotation.clone(),
        });
        if let Err(e) = self.sink.delete(id) {
            log::warn!("⚠️ Persistence delete failed for {}: {}", id, e);
        }
        true
    }

    /// Update the geometry of an annotation through the undo history.
    pub fn update_shape(&mut self, id: AnnotationId, new_shape: Shape) -> bool {
        let Some(old_shape) = self.store.get(id).map(|a| a.shape.clone()) else {
            return false;
        };
        if old_shape == new_shape {
            return false;
        }
        self.store.update_shape(id, new_shape.clone());
        self.undo.record(Command::UpdateShape {
            id,
            old_shape,
            new_shape,
        });
        true
    }

    /// Remove every annotation of the drawing.
    pub fn clear_all(&mut self) {
        let annotations = self.store.clear();
        if annotations.is_empty() {
            return;
        }
        log::info!("🗑️ Cleared {} annotations", annotations.len());
        self.selection = None;
        self.undo.record(Command::Clear { annotations });
        if let Err(e) = self.sink.clear_all() {
            log::warn!("⚠️ Persistence clear failed: {}", e);
        }
    }

    /// Mark a pin/comment resolved. Untracked metadata change.
    pub fn resolve(&mut self, id: AnnotationId) -> bool {
        let Some(ann) = self.store.get_mut(id) else {
            return false;
        };
        if !ann.kind().is_resolvable() {
            return false;
        }
        ann.resolved_at = Some(crate::model::now_millis());
        true
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::MarkupError;
    use crate::model::AnnotationKind;
    use std::cell::RefCell;
    use std::rc::Rc;

    /// Sink that records the operations it receives.
    #[derive(Default, Clone)]
    struct RecordingSink {
        ops: Rc<RefCell<Vec<String>>>,
    }

    impl PersistenceSink for RecordingSink {
        fn create(&mut self, annotation: &Annotation) -> Result<(), MarkupError> {
            self.ops
                .borrow_mut()
                .push(format!("create:{}", annotation.id));
            Ok(())
        }
        fn delete(&mut self, id: AnnotationId) -> Result<(), MarkupError> {
            self.ops.borrow_mut().push(format!("delete:{}", id));
            Ok(())
        }
        fn clear_all(&mut self) -> Result<(), MarkupError> {
            self.ops.borrow_mut().push("clear".to_string());
            Ok(())
        }
        fn save_scale(&mut self, scale: &str) -> Result<(), MarkupError> {
            self.ops.borrow_mut().push(format!("scale:{}", scale));
            Ok(())
        }
    }

    fn meta() -> DrawingMeta {
        DrawingMeta {
            page_width_px: 1000.0,
            page_height_px: 800.0,
            scale: None,
            discipline: None,
        }
    }

    fn editor() -> MarkupEditor<RecordingSink> {
        let _ = env_logger::builder().is_test(true).try_init();
        MarkupEditor::new(meta(), "tester", RecordingSink::default())
    }

    fn drag(ed: &mut MarkupEditor<RecordingSink>, from: (f32, f32), to: (f32, f32)) {
        ed.pointer_pressed(from.0, from.1);
        ed.pointer_moved(to.0, to.1);
        ed.pointer_released(to.0, to.1);
    }

    #[test]
    fn test_rectangle_drag_creates_annotation() {
        let mut ed = editor();
        ed.set_tool(Some(Tool::Rectangle));
        drag(&mut ed, (100.0, 100.0), (300.0, 250.0));

        assert_eq!(ed.store().len(), 1);
        let ann = ed.store().iter().next().unwrap();
        assert_eq!(ann.kind(), AnnotationKind::Rectangle);
        let Shape::Rectangle { width, height } = ann.shape else {
            panic!("expected rectangle");
        };
        assert!((width - 0.2).abs() < 0.001);
        assert!((height - 0.1875).abs() < 0.001);
    }

    #[test]
    fn test_sub_threshold_drag_creates_nothing() {
        let mut ed = editor();
        ed.set_tool(Some(Tool::Rectangle));
        // 5 px wide on a 1000 px page: width 0.005 < 0.01
        drag(&mut ed, (100.0, 100.0), (105.0, 300.0));

        assert_eq!(ed.store().len(), 0);
        assert!(!ed.can_undo());
    }

    #[test]
    fn test_pin_click_places_immediately() {
        let mut ed = editor();
        ed.set_tool(Some(Tool::Pin));
        ed.pointer_pressed(500.0, 400.0);
        ed.pointer_released(500.0, 400.0);

        assert_eq!(ed.store().len(), 1);
        let ann = ed.store().iter().next().unwrap();
        assert_eq!(ann.kind(), AnnotationKind::Pin);
        assert!((ann.position.x - 0.5).abs() < 0.001);
    }

    #[test]
    fn test_area_drag_stores_four_corners() {
        let mut ed = editor();
        ed.set_tool(Some(Tool::Area));
        drag(&mut ed, (200.0, 200.0), (600.0, 600.0));

        let ann = ed.store().iter().next().unwrap();
        let id = ann.id;
        let Shape::Area { points } = &ann.shape else {
            panic!("expected area");
        };
        assert_eq!(points.len(), 4);

        // Select tool hit test: center is inside, far corner is not
        ed.set_tool(None);
        ed.pointer_pressed(400.0, 350.0);
        ed.pointer_released(400.0, 350.0);
        assert_eq!(ed.selection(), Some(id));

        ed.pointer_pressed(900.0, 700.0);
        ed.pointer_released(900.0, 700.0);
        assert_eq!(ed.selection(), None);
    }

    #[test]
    fn test_freehand_needs_three_points() {
        let mut ed = editor();
        ed.set_tool(Some(Tool::Freehand));
        ed.pointer_pressed(100.0, 100.0);
        ed.pointer_moved(120.0, 110.0);
        ed.pointer_released(120.0, 110.0);
        assert_eq!(ed.store().len(), 0);

        ed.pointer_pressed(100.0, 100.0);
        ed.pointer_moved(120.0, 110.0);
        ed.pointer_moved(140.0, 130.0);
        ed.pointer_released(140.0, 130.0);
        assert_eq!(ed.store().len(), 1);
    }

    #[test]
    fn test_measurement_without_scale_has_no_display_value() {
        let mut ed = editor();
        ed.set_tool(Some(Tool::Measure));
        ed.pointer_pressed(100.0, 400.0);
        ed.pointer_moved(500.0, 400.0);
        assert!(ed.measurement_preview().is_none());
        ed.pointer_pressed(500.0, 400.0);

        let ann = ed.store().iter().next().unwrap();
        let Shape::Measurement {
            display_value,
            raw_pixel_distance,
            ..
        } = &ann.shape
        else {
            panic!("expected measurement");
        };
        assert!(display_value.is_none());
        assert!((raw_pixel_distance - 400.0).abs() < 0.01);
    }

    #[test]
    fn test_measurement_after_calibration_shows_feet() {
        let mut ed = editor();

        // Calibrate: 300 px segment = 10 ft (exact, bare ppf string)
        ed.set_tool(Some(Tool::Calibrate));
        ed.pointer_pressed(100.0, 400.0);
        ed.pointer_moved(400.0, 400.0);
        ed.pointer_pressed(400.0, 400.0);
        assert!(ed.pending_calibration_px().is_some());
        let saved = ed.complete_calibration_exact(10.0, Unit::Feet).unwrap();
        assert_eq!(saved, "30");
        assert_eq!(ed.pixels_per_foot(), Some(30.0));
        assert_eq!(ed.store().len(), 0); // calibration creates no annotation

        // Now a 400 px measurement reads 13.3 ft
        ed.set_tool(Some(Tool::Measure));
        ed.pointer_pressed(100.0, 200.0);
        ed.pointer_moved(500.0, 200.0);
        assert_eq!(ed.measurement_preview().as_deref(), Some("13.3 ft"));
        ed.pointer_pressed(500.0, 200.0);

        let ann = ed.store().iter().next().unwrap();
        let Shape::Measurement { display_value, .. } = &ann.shape else {
            panic!("expected measurement");
        };
        assert_eq!(display_value.as_deref(), Some("13.3 ft"));
    }

    #[test]
    fn test_calibration_infers_standard_scale() {
        let mut ed = editor();
        ed.set_tool(Some(Tool::Calibrate));
        // 72 px at zoom 1 = 1 drawing inch; 20 real feet -> civil 1" = 20'
        ed.pointer_pressed(100.0, 400.0);
        ed.pointer_moved(172.0, 400.0);
        ed.pointer_pressed(172.0, 400.0);
        let saved = ed.complete_calibration(20.0, Unit::Feet).unwrap();
        assert_eq!(saved, "1\" = 20'");
        assert_eq!(ed.scale_string(), Some("1\" = 20'"));
    }

    #[test]
    fn test_undo_create_then_redo_restores_exactly() {
        let mut ed = editor();
        ed.set_tool(Some(Tool::Pin));
        ed.pointer_pressed(500.0, 400.0);
        ed.pointer_released(500.0, 400.0);
        let created = ed.store().iter().next().cloned().unwrap();

        assert!(ed.undo());
        assert!(ed.store().is_empty());

        assert!(ed.redo());
        assert_eq!(ed.store().iter().next(), Some(&created));
    }

    #[test]
    fn test_escape_priority_order() {
        let mut ed = editor();

        // Draft first
        ed.set_tool(Some(Tool::Rectangle));
        ed.pointer_pressed(100.0, 100.0);
        ed.pointer_moved(300.0, 300.0);
        assert_eq!(ed.escape(), EscapeOutcome::CancelledDraft);
        assert_eq!(ed.store().len(), 0);

        // Then selection
        drag(&mut ed, (100.0, 100.0), (400.0, 400.0));
        ed.set_tool(None);
        ed.pointer_pressed(250.0, 250.0);
        ed.pointer_released(250.0, 250.0);
        assert!(ed.selection().is_some());
        assert_eq!(ed.escape(), EscapeOutcome::ClearedSelection);
        assert_eq!(ed.selection(), None);

        // Then escalate to the shell
        assert_eq!(ed.escape(), EscapeOutcome::CloseRequested);
    }

    #[test]
    fn test_tool_switch_discards_draft_and_selection() {
        let mut ed = editor();
        ed.set_tool(Some(Tool::Rectangle));
        drag(&mut ed, (100.0, 100.0), (400.0, 400.0));
        ed.set_tool(None);
        ed.pointer_pressed(250.0, 250.0);
        ed.pointer_released(250.0, 250.0);
        assert!(ed.selection().is_some());

        ed.set_tool(Some(Tool::Line));
        assert_eq!(ed.selection(), None);

        ed.pointer_pressed(100.0, 100.0);
        ed.pointer_moved(200.0, 200.0);
        ed.set_tool(Some(Tool::Arrow));
        assert_eq!(*ed.state(), ToolState::Idle);
        // The abandoned line was never finalized
        assert_eq!(ed.store().len(), 1);
    }

    #[test]
    fn test_empty_press_pans_the_viewport() {
        let mut ed = editor();
        ed.pointer_pressed(500.0, 400.0);
        ed.pointer_moved(540.0, 430.0);
        ed.pointer_released(540.0, 430.0);

        assert!((ed.viewport().scroll_x - (-40.0)).abs() < 0.001);
        assert!((ed.viewport().scroll_y - (-30.0)).abs() < 0.001);
        assert_eq!(ed.selection(), None);
    }

    #[test]
    fn test_delete_selected_and_undo() {
        let mut ed = editor();
        ed.set_tool(Some(Tool::Rectangle));
        drag(&mut ed, (100.0, 100.0), (400.0, 400.0));
        let id = ed.store().iter().next().unwrap().id;

        ed.set_tool(None);
        ed.pointer_pressed(250.0, 250.0);
        ed.pointer_released(250.0, 250.0);
        assert!(ed.delete_selected());
        assert!(ed.store().is_empty());

        assert!(ed.undo());
        assert!(ed.store().get(id).is_some());
    }

    #[test]
    fn test_clear_all_is_one_undo_step() {
        let mut ed = editor();
        ed.set_tool(Some(Tool::Pin));
        for x in [100.0, 300.0, 500.0] {
            ed.pointer_pressed(x, 400.0);
            ed.pointer_released(x, 400.0);
        }
        ed.clear_all();
        assert!(ed.store().is_empty());

        assert!(ed.undo());
        assert_eq!(ed.store().len(), 3);
    }

    #[test]
    fn test_mutations_are_forwarded_to_sink() {
        let sink = RecordingSink::default();
        let ops = sink.ops.clone();
        let mut ed = MarkupEditor::new(meta(), "tester", sink);

        ed.set_tool(Some(Tool::Pin));
        ed.pointer_pressed(500.0, 400.0);
        ed.pointer_released(500.0, 400.0);
        ed.undo();

        let recorded = ops.borrow().clone();
        assert_eq!(recorded, vec!["create:1", "delete:1"]);
    }

    #[test]
    fn test_resolve_only_applies_to_pins_and_comments() {
        let mut ed = editor();
        ed.set_tool(Some(Tool::Pin));
        ed.pointer_pressed(500.0, 400.0);
        ed.pointer_released(500.0, 400.0);
        ed.set_tool(Some(Tool::Rectangle));
        drag(&mut ed, (100.0, 100.0), (400.0, 400.0));

        let ids: Vec<_> = ed.store().iter().map(|a| a.id).collect();
        assert!(ed.resolve(ids[0]));
        assert!(!ed.resolve(ids[1]));
        assert!(ed.store().get(ids[0]).unwrap().resolved_at.is_some());
    }
}
