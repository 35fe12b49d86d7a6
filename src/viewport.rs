//! Coordinate spaces and viewport mathematics.
//!
//! Three spaces coexist: page-normalized ([0,1]² on the drawing page), canvas
//! (the rendered page bitmap, centered inside a possibly larger canvas), and
//! the scrollable viewport above it. This module converts between them and
//! keeps zoom changes anchored to the pointer.

use crate::constants::zoom as zoom_const;
use crate::model::NormalizedPoint;

// ============================================================================
// Page <-> Canvas Transforms
// ============================================================================

/// Centering offset of the page inside the canvas.
fn centering_offset(page_w: f32, page_h: f32, canvas_w: f32, canvas_h: f32) -> (f32, f32) {
    ((canvas_w - page_w) / 2.0, (canvas_h - page_h) / 2.0)
}

/// Convert a page-normalized point to canvas coordinates.
///
/// `page_w`/`page_h` are the rendered page size in pixels at the current
/// zoom; the page is centered inside the (possibly larger) canvas.
pub fn to_screen(
    point: NormalizedPoint,
    page_w: f32,
    page_h: f32,
    canvas_w: f32,
    canvas_h: f32,
) -> (f32, f32) {
    let (off_x, off_y) = centering_offset(page_w, page_h, canvas_w, canvas_h);
    (off_x + point.x * page_w, off_y + point.y * page_h)
}

/// Convert a canvas coordinate back to a page-normalized point.
///
/// Exact inverse of [`to_screen`], except the result is clamped to [0,1]²:
/// clicks outside the page saturate to the page edge rather than failing.
pub fn to_normalized(
    x: f32,
    y: f32,
    page_w: f32,
    page_h: f32,
    canvas_w: f32,
    canvas_h: f32,
) -> NormalizedPoint {
    let (off_x, off_y) = centering_offset(page_w, page_h, canvas_w, canvas_h);
    NormalizedPoint::clamped((x - off_x) / page_w, (y - off_y) / page_h)
}

// ============================================================================
// Viewport
// ============================================================================

/// Scroll/zoom state of the drawing surface.
#[derive(Debug, Clone, PartialEq)]
pub struct Viewport {
    /// Current zoom level (1.0 = 100%).
    pub zoom: f32,
    /// Horizontal scroll offset in screen pixels.
    pub scroll_x: f32,
    /// Vertical scroll offset in screen pixels.
    pub scroll_y: f32,
    /// Visible viewport size in screen pixels.
    pub view_width: f32,
    pub view_height: f32,
    /// Last-known pointer position, used as the button-zoom anchor.
    last_pointer: Option<(f32, f32)>,
}

impl Viewport {
    pub fn new(view_width: f32, view_height: f32) -> Self {
        Self {
            zoom: 1.0,
            scroll_x: 0.0,
            scroll_y: 0.0,
            view_width,
            view_height,
            last_pointer: None,
        }
    }

    /// Record the pointer position so button zoom can anchor to it.
    pub fn note_pointer(&mut self, x: f32, y: f32) {
        self.last_pointer = Some((x, y));
    }

    /// Update the visible viewport size.
    pub fn set_view_size(&mut self, width: f32, height: f32) {
        self.view_width = width;
        self.view_height = height;
    }

    /// Top-left position of the annotation overlay in viewport coordinates.
    ///
    /// The overlay must track the page bitmap exactly: it is placed at the
    /// bitmap offset minus the current scroll, so scrolling never desyncs
    /// the markups from the drawing underneath.
    pub fn overlay_origin(&self, pdf_offset_x: f32, pdf_offset_y: f32) -> (f32, f32) {
        (pdf_offset_x - self.scroll_x, pdf_offset_y - self.scroll_y)
    }

    /// Apply a pan delta to the scroll offsets.
    pub fn scroll_by(&mut self, dx: f32, dy: f32) {
        self.scroll_x += dx;
        self.scroll_y += dy;
    }

    /// Reset to 100% zoom at the origin.
    pub fn reset(&mut self) {
        self.zoom = 1.0;
        self.scroll_x = 0.0;
        self.scroll_y = 0.0;
    }

    /// Change zoom while keeping the content under `(anchor_x, anchor_y)`
    /// (viewport coordinates) fixed on screen.
    ///
    /// The content coordinate under the anchor is captured before the change
    /// and the scroll is recomputed afterwards so the same point stays put.
    pub fn zoom_at(&mut self, new_zoom: f32, anchor_x: f32, anchor_y: f32) {
        let new_zoom = new_zoom.clamp(zoom_const::MIN, zoom_const::MAX);
        if (new_zoom - self.zoom).abs() < f32::EPSILON {
            return;
        }

        let content_x = (anchor_x + self.scroll_x) / self.zoom;
        let content_y = (anchor_y + self.scroll_y) / self.zoom;

        self.zoom = new_zoom;
        self.scroll_x = content_x * new_zoom - anchor_x;
        self.scroll_y = content_y * new_zoom - anchor_y;

        log::debug!(
            "🔍 Zoom-to-anchor: {:.2}x at ({:.1}, {:.1}), scroll: ({:.1}, {:.1})",
            self.zoom,
            anchor_x,
            anchor_y,
            self.scroll_x,
            self.scroll_y
        );
    }

    /// Button-triggered zoom in. Anchors to the last-known pointer position,
    /// or the viewport center if the pointer has never been seen.
    pub fn zoom_in(&mut self) {
        let (ax, ay) = self.button_anchor();
        self.zoom_at(self.zoom * zoom_const::FACTOR, ax, ay);
    }

    /// Button-triggered zoom out.
    pub fn zoom_out(&mut self) {
        let (ax, ay) = self.button_anchor();
        self.zoom_at(self.zoom / zoom_const::FACTOR, ax, ay);
    }

    fn button_anchor(&self) -> (f32, f32) {
        self.last_pointer
            .unwrap_or((self.view_width / 2.0, self.view_height / 2.0))
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(0.0, 0.0)
    }
}

// ============================================================================
// Tests
// ============================================================================
