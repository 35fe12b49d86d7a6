//! Pure renderer: annotations and the in-progress draft to draw commands.
//!
//! The engine never touches a canvas. Each frame the shell asks for a flat
//! list of primitive [`DrawCommand`]s in screen pixels and replays them onto
//! whatever surface it owns (HTML canvas, skia, a test buffer). Rendering is
//! a pure function of the annotation list, the draft state and the page
//! geometry, so it is deterministic and testable without any UI.

use serde::{Deserialize, Serialize};

use crate::constants::{annotation as ann_const, render as geom};
use crate::model::{Annotation, AnnotationId, NormalizedPoint, Shape};
use crate::scale;
use crate::tool::{Tool, ToolState};

// ============================================================================
// Draw Commands
// ============================================================================

/// One primitive drawing operation, in screen pixels.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum DrawCommand {
    Line {
        from: (f32, f32),
        to: (f32, f32),
        color: String,
        width: f32,
    },
    Polyline {
        points: Vec<(f32, f32)>,
        color: String,
        width: f32,
    },
    /// Closed polygon outline.
    Polygon {
        points: Vec<(f32, f32)>,
        color: String,
        width: f32,
    },
    Rect {
        x: f32,
        y: f32,
        width: f32,
        height: f32,
        color: String,
        stroke_width: f32,
        /// Filled translucent instead of stroked (highlights).
        filled: bool,
    },
    Ellipse {
        cx: f32,
        cy: f32,
        rx: f32,
        ry: f32,
        color: String,
        stroke_width: f32,
        filled: bool,
    },
    /// Quadratic Bezier arc segment.
    QuadCurve {
        from: (f32, f32),
        control: (f32, f32),
        to: (f32, f32),
        color: String,
        width: f32,
    },
    Text {
        x: f32,
        y: f32,
        text: String,
        color: String,
        size: f32,
    },
}

/// Page geometry and scale context for one render pass.
#[derive(Debug, Clone, Copy)]
pub struct RenderParams {
    /// Rendered page width in screen pixels (page pixels times zoom).
    pub page_width: f32,
    /// Rendered page height in screen pixels.
    pub page_height: f32,
    /// Current zoom, needed to restate stored distances in page pixels.
    pub zoom: f32,
    /// Resolved scale of the drawing, if calibrated.
    pub pixels_per_foot: Option<f32>,
}

impl RenderParams {
    fn project(&self, p: &NormalizedPoint) -> (f32, f32) {
        (p.x * self.page_width, p.y * self.page_height)
    }
}

// ============================================================================
// Entry Point
// ============================================================================

/// Render visible annotations plus the draft gesture to draw commands.
///
/// `annotations` must already be filtered to the current page and in creation
/// order; drawing order equals iteration order so later annotations paint on
/// top, matching hit testing. Shapes whose stored geometry is degenerate are
/// skipped.
pub fn render<'a, I>(
    annotations: I,
    selection: Option<AnnotationId>,
    draft: &ToolState,
    params: &RenderParams,
) -> Vec<DrawCommand>
where
    I: Iterator<Item = &'a Annotation>,
{
    let mut out = Vec::new();
    for ann in annotations {
        if !ann.shape.is_renderable() {
            continue;
        }
        render_annotation(ann, params, &mut out);
        if selection == Some(ann.id) {
            render_selection_halo(ann, params, &mut out);
        }
    }
    render_draft(draft, params, &mut out);
    out
}

fn render_annotation(ann: &Annotation, params: &RenderParams, out: &mut Vec<DrawCommand>) {
    let pos = params.project(&ann.position);
    let color = ann.color.clone();
    let width = ann.stroke_width;

    match &ann.shape {
        Shape::Pin { label } => {
            marker(pos, &color, width, true, out);
            if let Some(text) = label {
                out.push(DrawCommand::Text {
                    x: pos.0 + geom::MARKER_RADIUS + 2.0,
                    y: pos.1,
                    text: text.clone(),
                    color,
                    size: geom::LABEL_SIZE,
                });
            }
        }
        Shape::Comment { .. } => {
            // Comment body text lives in the side panel, only the anchor
            // marker is drawn on the page
            marker(pos, &color, width, false, out);
        }
        Shape::Rectangle { width: w, height: h } => {
            out.push(DrawCommand::Rect {
                x: pos.0,
                y: pos.1,
                width: w * params.page_width,
                height: h * params.page_height,
                color,
                stroke_width: width,
                filled: false,
            });
        }
        Shape::Circle { width: w, height: h } => {
            let rx = w * params.page_width / 2.0;
            let ry = h * params.page_height / 2.0;
            out.push(DrawCommand::Ellipse {
                cx: pos.0 + rx,
                cy: pos.1 + ry,
                rx,
                ry,
                color,
                stroke_width: width,
                filled: false,
            });
        }
        Shape::Cloud { width: w, height: h } => {
            cloud_outline(
                pos,
                (w * params.page_width, h * params.page_height),
                &color,
                width,
                out,
            );
        }
        Shape::Highlight { width: w, height: h } => {
            out.push(DrawCommand::Rect {
                x: pos.0,
                y: pos.1,
                width: w * params.page_width,
                height: h * params.page_height,
                color,
                stroke_width: width,
                filled: true,
            });
        }
        Shape::Arrow { end } => {
            let to = params.project(end);
            out.push(DrawCommand::Line {
                from: pos,
                to,
                color: color.clone(),
                width,
            });
            arrowhead(pos, to, &color, width, out);
        }
        Shape::Line { end } => {
            out.push(DrawCommand::Line {
                from: pos,
                to: params.project(end),
                color,
                width,
            });
        }
        Shape::Measurement {
            end,
            display_value,
            raw_pixel_distance,
        } => {
            let to = params.project(end);
            measurement_line(pos, to, &color, width, out);
            // The label tracks the live scale; the frozen display value is
            // only a fallback for drawings calibrated elsewhere
            let label = params
                .pixels_per_foot
                .and_then(|ppf| scale::pixels_to_feet(*raw_pixel_distance, ppf))
                .map(scale::format_feet)
                .or_else(|| display_value.clone());
            if let Some(text) = label {
                let mid = midpoint(pos, to);
                out.push(DrawCommand::Text {
                    x: mid.0,
                    y: mid.1 - geom::LABEL_SIZE / 2.0,
                    text,
                    color,
                    size: geom::LABEL_SIZE,
                });
            }
        }
        Shape::Callout { number, leader_end } => {
            if let Some(end) = leader_end {
                let to = params.project(end);
                out.push(DrawCommand::Line {
                    from: pos,
                    to,
                    color: color.clone(),
                    width,
                });
                arrowhead(pos, to, &color, width, out);
            }
            marker(pos, &color, width, false, out);
            out.push(DrawCommand::Text {
                x: pos.0,
                y: pos.1,
                text: number.to_string(),
                color,
                size: geom::LABEL_SIZE,
            });
        }
        Shape::Area { points } => {
            let screen: Vec<(f32, f32)> = points.iter().map(|p| params.project(p)).collect();
            out.push(DrawCommand::Polygon {
                points: screen.clone(),
                color: color.clone(),
                width,
            });
            if let Some(text) = area_label(points, params) {
                let (cx, cy) = centroid(&screen);
                out.push(DrawCommand::Text {
                    x: cx,
                    y: cy,
                    text,
                    color,
                    size: geom::LABEL_SIZE,
                });
            }
        }
        Shape::Freehand { points } | Shape::Markup { points } => {
            out.push(DrawCommand::Polyline {
                points: points.iter().map(|p| params.project(p)).collect(),
                color,
                width,
            });
        }
    }
}

/// Bounding box outline around the selected annotation.
fn render_selection_halo(ann: &Annotation, params: &RenderParams, out: &mut Vec<DrawCommand>) {
    let bb = ann.bounding_box();
    let pad = geom::MARKER_RADIUS;
    out.push(DrawCommand::Rect {
        x: bb.x * params.page_width - pad,
        y: bb.y * params.page_height - pad,
        width: bb.width * params.page_width + 2.0 * pad,
        height: bb.height * params.page_height + 2.0 * pad,
        color: ann_const::HIGHLIGHT_COLOR.to_string(),
        stroke_width: 1.0,
        filled: false,
    });
}

// ============================================================================
// Draft Previews
// ============================================================================

fn render_draft(draft: &ToolState, params: &RenderParams, out: &mut Vec<DrawCommand>) {
    let color = ann_const::DEFAULT_COLOR.to_string();
    let width = ann_const::DEFAULT_STROKE_WIDTH;

    match draft {
        ToolState::Idle | ToolState::Panning { .. } => {}
        ToolState::Drawing {
            tool,
            start,
            current,
            path,
        } => {
            let a = params.project(start);
            let b = params.project(current);
            match tool {
                Tool::Rectangle | Tool::Highlight | Tool::Area => {
                    let (x, y, w, h) = corner_rect(a, b);
                    out.push(DrawCommand::Rect {
                        x,
                        y,
                        width: w,
                        height: h,
                        color,
                        stroke_width: width,
                        filled: *tool == Tool::Highlight,
                    });
                }
                Tool::Circle => {
                    let (x, y, w, h) = corner_rect(a, b);
                    out.push(DrawCommand::Ellipse {
                        cx: x + w / 2.0,
                        cy: y + h / 2.0,
                        rx: w / 2.0,
                        ry: h / 2.0,
                        color,
                        stroke_width: width,
                        filled: false,
                    });
                }
                Tool::Cloud => {
                    let (x, y, w, h) = corner_rect(a, b);
                    cloud_outline((x, y), (w, h), &color, width, out);
                }
                Tool::Arrow | Tool::Callout => {
                    out.push(DrawCommand::Line {
                        from: a,
                        to: b,
                        color: color.clone(),
                        width,
                    });
                    arrowhead(a, b, &color, width, out);
                }
                Tool::Line => {
                    out.push(DrawCommand::Line {
                        from: a,
                        to: b,
                        color,
                        width,
                    });
                }
                Tool::Freehand | Tool::Markup => {
                    out.push(DrawCommand::Polyline {
                        points: path.iter().map(|p| params.project(p)).collect(),
                        color,
                        width,
                    });
                }
                _ => {}
            }
        }
        ToolState::Measuring { start, current } => {
            let a = params.project(start);
            let b = params.project(current);
            measurement_line(a, b, &color, width, out);
            let raw = dist(a, b) / params.zoom;
            let label = params
                .pixels_per_foot
                .and_then(|ppf| scale::pixels_to_feet(raw, ppf))
                .map(scale::format_feet);
            if let Some(text) = label {
                let mid = midpoint(a, b);
                out.push(DrawCommand::Text {
                    x: mid.0,
                    y: mid.1 - geom::LABEL_SIZE / 2.0,
                    text,
                    color,
                    size: geom::LABEL_SIZE,
                });
            }
        }
        ToolState::Calibrating { start, current, .. } => {
            let a = params.project(start);
            let b = params.project(current);
            measurement_line(a, b, &color, width, out);
        }
    }
}

// ============================================================================
// Geometry Helpers
// ============================================================================

fn dist(a: (f32, f32), b: (f32, f32)) -> f32 {
    let dx = b.0 - a.0;
    let dy = b.1 - a.1;
    (dx * dx + dy * dy).sqrt()
}

fn midpoint(a: (f32, f32), b: (f32, f32)) -> (f32, f32) {
    ((a.0 + b.0) / 2.0, (a.1 + b.1) / 2.0)
}

fn corner_rect(a: (f32, f32), b: (f32, f32)) -> (f32, f32, f32, f32) {
    (
        a.0.min(b.0),
        a.1.min(b.1),
        (a.0 - b.0).abs(),
        (a.1 - b.1).abs(),
    )
}

/// Arithmetic-mean centroid of a screen-space polygon.
fn centroid(points: &[(f32, f32)]) -> (f32, f32) {
    if points.is_empty() {
        return (0.0, 0.0);
    }
    let n = points.len() as f32;
    let (sx, sy) = points
        .iter()
        .fold((0.0, 0.0), |(sx, sy), p| (sx + p.0, sy + p.1));
    (sx / n, sy / n)
}

/// Square-footage label for an area polygon, if the drawing is calibrated.
fn area_label(points: &[NormalizedPoint], params: &RenderParams) -> Option<String> {
    let ppf = params.pixels_per_foot?;
    // Area is computed in page pixels at zoom 1 so it matches the stored
    // pixels-per-foot
    let page_pts: Vec<(f32, f32)> = points
        .iter()
        .map(|p| {
            (
                p.x * params.page_width / params.zoom,
                p.y * params.page_height / params.zoom,
            )
        })
        .collect();
    let sq_ft = scale::pixel_area_to_square_feet(scale::polygon_pixel_area(&page_pts), ppf)?;
    Some(scale::format_square_feet(sq_ft))
}

/// Circular marker for point annotations.
fn marker(pos: (f32, f32), color: &str, width: f32, filled: bool, out: &mut Vec<DrawCommand>) {
    out.push(DrawCommand::Ellipse {
        cx: pos.0,
        cy: pos.1,
        rx: geom::MARKER_RADIUS,
        ry: geom::MARKER_RADIUS,
        color: color.to_string(),
        stroke_width: width,
        filled,
    });
}

/// Two barbs at the tip of a segment, angled off the shaft.
fn arrowhead(from: (f32, f32), to: (f32, f32), color: &str, width: f32, out: &mut Vec<DrawCommand>) {
    if dist(from, to) == 0.0 {
        return;
    }
    let shaft = (to.1 - from.1).atan2(to.0 - from.0);
    for side in [-1.0f32, 1.0] {
        let angle = shaft + std::f32::consts::PI + side * geom::ARROWHEAD_ANGLE;
        out.push(DrawCommand::Line {
            from: to,
            to: (
                to.0 + geom::ARROWHEAD_LEN * angle.cos(),
                to.1 + geom::ARROWHEAD_LEN * angle.sin(),
            ),
            color: color.to_string(),
            width,
        });
    }
}

/// Measurement segment with perpendicular end ticks.
fn measurement_line(a: (f32, f32), b: (f32, f32), color: &str, width: f32, out: &mut Vec<DrawCommand>) {
    out.push(DrawCommand::Line {
        from: a,
        to: b,
        color: color.to_string(),
        width,
    });
    let len = dist(a, b);
    if len == 0.0 {
        return;
    }
    // Unit normal of the segment
    let nx = -(b.1 - a.1) / len;
    let ny = (b.0 - a.0) / len;
    for end in [a, b] {
        out.push(DrawCommand::Line {
            from: (
                end.0 - nx * geom::TICK_HALF_LEN,
                end.1 - ny * geom::TICK_HALF_LEN,
            ),
            to: (
                end.0 + nx * geom::TICK_HALF_LEN,
                end.1 + ny * geom::TICK_HALF_LEN,
            ),
            color: color.to_string(),
            width,
        });
    }
}

/// Revision cloud: perimeter points of alternating radius around the box
/// center, joined with outward-bulging quadratic arcs.
fn cloud_outline(
    origin: (f32, f32),
    size: (f32, f32),
    color: &str,
    width: f32,
    out: &mut Vec<DrawCommand>,
) {
    let cx = origin.0 + size.0 / 2.0;
    let cy = origin.1 + size.1 / 2.0;
    let rx = size.0 / 2.0;
    let ry = size.1 / 2.0;

    let n = geom::CLOUD_POINTS;
    let step = std::f32::consts::TAU / n as f32;
    let point_at = |i: usize| -> (f32, f32) {
        let angle = i as f32 * step;
        let r = if i % 2 == 0 {
            1.0
        } else {
            geom::CLOUD_INNER_SCALE
        };
        (cx + rx * r * angle.cos(), cy + ry * r * angle.sin())
    };

    for i in 0..n {
        let from = point_at(i);
        let to = point_at((i + 1) % n);
        let control_angle = (i as f32 + 0.5) * step;
        let control = (
            cx + rx * geom::CLOUD_BULGE * control_angle.cos(),
            cy + ry * geom::CLOUD_BULGE * control_angle.sin(),
        );
        out.push(DrawCommand::QuadCurve {
            from,
            control,
            to,
            color: color.to_string(),
            width,
        });
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::AnnotationStore;

    const EPSILON: f32 = 0.01;

    fn approx_eq(a: f32, b: f32) -> bool {
        (a - b).abs() < EPSILON
    }

    fn params() -> RenderParams {
        RenderParams {
            page_width: 1000.0,
            page_height: 800.0,
            zoom: 1.0,
            pixels_per_foot: None,
        }
    }

    fn single(shape: Shape, position: NormalizedPoint) -> AnnotationStore {
        let mut store = AnnotationStore::new();
        let id = store.allocate_id();
        store.add(Annotation::new(
            id, 1, position, shape, "#E53935", 2.0, "tester",
        ));
        store
    }

    fn render_single(shape: Shape, position: NormalizedPoint) -> Vec<DrawCommand> {
        let store = single(shape, position);
        render(store.iter(), None, &ToolState::Idle, &params())
    }

    #[test]
    fn test_rectangle_projects_to_screen_pixels() {
        let cmds = render_single(
            Shape::Rectangle {
                width: 0.2,
                height: 0.25,
            },
            NormalizedPoint::new(0.1, 0.5),
        );
        assert_eq!(cmds.len(), 1);
        let DrawCommand::Rect {
            x,
            y,
            width,
            height,
            filled,
            ..
        } = &cmds[0]
        else {
            panic!("expected rect");
        };
        assert!(approx_eq(*x, 100.0));
        assert!(approx_eq(*y, 400.0));
        assert!(approx_eq(*width, 200.0));
        assert!(approx_eq(*height, 200.0));
        assert!(!filled);
    }

    #[test]
    fn test_highlight_is_filled() {
        let cmds = render_single(
            Shape::Highlight {
                width: 0.2,
                height: 0.2,
            },
            NormalizedPoint::new(0.1, 0.1),
        );
        assert!(matches!(cmds[0], DrawCommand::Rect { filled: true, .. }));
    }

    #[test]
    fn test_cloud_emits_one_arc_per_perimeter_point() {
        let cmds = render_single(
            Shape::Cloud {
                width: 0.3,
                height: 0.3,
            },
            NormalizedPoint::new(0.2, 0.2),
        );
        assert_eq!(cmds.len(), geom::CLOUD_POINTS);
        assert!(cmds
            .iter()
            .all(|c| matches!(c, DrawCommand::QuadCurve { .. })));
        // The loop closes: last arc ends where the first begins
        let DrawCommand::QuadCurve { from: first, .. } = &cmds[0] else {
            unreachable!();
        };
        let DrawCommand::QuadCurve { to: last, .. } = &cmds[cmds.len() - 1] else {
            unreachable!();
        };
        assert!(approx_eq(first.0, last.0));
        assert!(approx_eq(first.1, last.1));
    }

    #[test]
    fn test_arrow_has_shaft_and_two_barbs() {
        let cmds = render_single(
            Shape::Arrow {
                end: NormalizedPoint::new(0.5, 0.5),
            },
            NormalizedPoint::new(0.1, 0.5),
        );
        assert_eq!(cmds.len(), 3);
        // Both barbs start at the tip and have the configured length
        for barb in &cmds[1..] {
            let DrawCommand::Line { from, to, .. } = barb else {
                panic!("expected line");
            };
            assert!(approx_eq(from.0, 500.0));
            assert!(approx_eq(from.1, 400.0));
            assert!(approx_eq(dist(*from, *to), geom::ARROWHEAD_LEN));
            // Pointing back along the shaft
            assert!(to.0 < from.0);
        }
    }

    #[test]
    fn test_measurement_has_ticks_and_live_label() {
        let mut p = params();
        p.pixels_per_foot = Some(30.0);
        let store = single(
            Shape::Measurement {
                end: NormalizedPoint::new(0.5, 0.5),
                display_value: Some("99.9 ft".to_string()),
                raw_pixel_distance: 400.0,
            },
            NormalizedPoint::new(0.1, 0.5),
        );
        let cmds = render(store.iter(), None, &ToolState::Idle, &p);

        // Shaft, two end ticks, label
        assert_eq!(cmds.len(), 4);
        let DrawCommand::Text { text, .. } = &cmds[3] else {
            panic!("expected label");
        };
        // Recomputed from the live scale, not the stale stored value
        assert_eq!(text, "13.3 ft");
    }

    #[test]
    fn test_measurement_falls_back_to_stored_label() {
        let store = single(
            Shape::Measurement {
                end: NormalizedPoint::new(0.5, 0.5),
                display_value: Some("12.0 ft".to_string()),
                raw_pixel_distance: 400.0,
            },
            NormalizedPoint::new(0.1, 0.5),
        );
        let cmds = render(store.iter(), None, &ToolState::Idle, &params());
        let DrawCommand::Text { text, .. } = cmds.last().unwrap() else {
            panic!("expected label");
        };
        assert_eq!(text, "12.0 ft");
    }

    #[test]
    fn test_uncalibrated_measurement_without_stored_label_has_no_text() {
        let cmds = render_single(
            Shape::Measurement {
                end: NormalizedPoint::new(0.5, 0.5),
                display_value: None,
                raw_pixel_distance: 400.0,
            },
            NormalizedPoint::new(0.1, 0.5),
        );
        assert!(!cmds.iter().any(|c| matches!(c, DrawCommand::Text { .. })));
    }

    #[test]
    fn test_area_label_at_centroid() {
        let mut p = params();
        p.pixels_per_foot = Some(10.0);
        // 200 x 160 px square at zoom 1: 32000 px^2 / 100 = 320 sq ft
        let points = vec![
            NormalizedPoint::new(0.2, 0.2),
            NormalizedPoint::new(0.4, 0.2),
            NormalizedPoint::new(0.4, 0.4),
            NormalizedPoint::new(0.2, 0.4),
        ];
        let store = single(
            Shape::Area {
                points: points.clone(),
            },
            points[0],
        );
        let cmds = render(store.iter(), None, &ToolState::Idle, &p);

        assert!(matches!(cmds[0], DrawCommand::Polygon { .. }));
        let DrawCommand::Text { x, y, text, .. } = &cmds[1] else {
            panic!("expected label");
        };
        assert_eq!(text, "320.0 sq ft");
        assert!(approx_eq(*x, 300.0));
        assert!(approx_eq(*y, 240.0));
    }

    #[test]
    fn test_area_without_scale_has_no_label() {
        let points = vec![
            NormalizedPoint::new(0.2, 0.2),
            NormalizedPoint::new(0.4, 0.2),
            NormalizedPoint::new(0.4, 0.4),
        ];
        let cmds = render_single(Shape::Area { points }, NormalizedPoint::new(0.2, 0.2));
        assert_eq!(cmds.len(), 1);
    }

    #[test]
    fn test_callout_draws_leader_badge_and_number() {
        let cmds = render_single(
            Shape::Callout {
                number: 7,
                leader_end: Some(NormalizedPoint::new(0.5, 0.5)),
            },
            NormalizedPoint::new(0.2, 0.2),
        );
        // Leader, two barbs, badge, number
        assert_eq!(cmds.len(), 5);
        let DrawCommand::Text { text, .. } = cmds.last().unwrap() else {
            panic!("expected number");
        };
        assert_eq!(text, "7");
    }

    #[test]
    fn test_degenerate_shapes_are_skipped() {
        let cmds = render_single(
            Shape::Rectangle {
                width: 0.001,
                height: 0.5,
            },
            NormalizedPoint::new(0.2, 0.2),
        );
        assert!(cmds.is_empty());
    }

    #[test]
    fn test_selection_halo_wraps_bounding_box() {
        let store = single(
            Shape::Rectangle {
                width: 0.2,
                height: 0.2,
            },
            NormalizedPoint::new(0.3, 0.3),
        );
        let id = store.iter().next().unwrap().id;
        let cmds = render(store.iter(), Some(id), &ToolState::Idle, &params());

        assert_eq!(cmds.len(), 2);
        let DrawCommand::Rect { x, color, .. } = &cmds[1] else {
            panic!("expected halo");
        };
        assert!(*x < 300.0);
        assert_eq!(color, ann_const::HIGHLIGHT_COLOR);
    }

    #[test]
    fn test_measuring_draft_renders_preview_with_label() {
        let mut p = params();
        p.pixels_per_foot = Some(30.0);
        let draft = ToolState::Measuring {
            start: NormalizedPoint::new(0.1, 0.5),
            current: NormalizedPoint::new(0.5, 0.5),
        };
        let cmds = render(std::iter::empty(), None, &draft, &p);

        let DrawCommand::Text { text, .. } = cmds.last().unwrap() else {
            panic!("expected preview label");
        };
        assert_eq!(text, "13.3 ft");
    }

    #[test]
    fn test_panning_draws_nothing() {
        let draft = ToolState::Panning {
            last_x: 10.0,
            last_y: 10.0,
        };
        assert!(render(std::iter::empty(), None, &draft, &params()).is_empty());
    }
}
