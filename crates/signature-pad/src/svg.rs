//! SVG serialization of finalized strokes

use crate::stroke::Stroke;
use serde::{Deserialize, Serialize};
use std::fmt::Write;

/// Padding added around the stroke bounding box in trimmed exports,
/// in surface pixels.
pub const BOUNDS_PADDING: f32 = 8.0;

/// Serialized signature handed to the caller and to the change callback.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignatureExport {
    /// Resolution-independent SVG markup. Always well-formed; blank
    /// signatures serialize to an empty path group.
    pub svg: String,
    pub is_empty: bool,
}

/// Controls the view window of the exported SVG.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ExportOptions {
    /// When true, the viewBox is the padded stroke bounding box;
    /// otherwise it is the full surface.
    pub trim: bool,
    pub padding: f32,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            trim: true,
            padding: BOUNDS_PADDING,
        }
    }
}

/// Axis-aligned bounding box over all points of all strokes.
/// Returns `None` when there are no points.
fn bounding_box(strokes: &[Stroke]) -> Option<(f32, f32, f32, f32)> {
    let mut bounds: Option<(f32, f32, f32, f32)> = None;
    for stroke in strokes {
        for p in &stroke.points {
            bounds = Some(match bounds {
                None => (p.x, p.y, p.x, p.y),
                Some((min_x, min_y, max_x, max_y)) => (
                    min_x.min(p.x),
                    min_y.min(p.y),
                    max_x.max(p.x),
                    max_y.max(p.y),
                ),
            });
        }
    }
    bounds
}

/// Path data for one stroke: move-to the first point, then one quadratic
/// per following point with the previous raw point as control and the
/// midpoint between previous and current as endpoint.
fn path_data(stroke: &Stroke) -> String {
    let mut d = String::new();
    let first = stroke.points[0];
    let _ = write!(d, "M {:.2} {:.2}", first.x, first.y);
    for pair in stroke.points.windows(2) {
        let (prev, cur) = (pair[0], pair[1]);
        let mid = prev.midpoint(&cur);
        let _ = write!(
            d,
            " Q {:.2} {:.2} {:.2} {:.2}",
            prev.x, prev.y, mid.x, mid.y
        );
    }
    d
}

/// Serialize `strokes` to an SVG document.
///
/// Deterministic: identical strokes and options produce byte-identical
/// markup.
pub(crate) fn export(
    strokes: &[Stroke],
    surface_width: f32,
    surface_height: f32,
    options: &ExportOptions,
) -> SignatureExport {
    let bounds = bounding_box(strokes);

    let (vx, vy, vw, vh) = match bounds {
        Some((min_x, min_y, max_x, max_y)) if options.trim => {
            let pad = options.padding;
            (
                min_x - pad,
                min_y - pad,
                (max_x - min_x) + 2.0 * pad,
                (max_y - min_y) + 2.0 * pad,
            )
        }
        _ => (0.0, 0.0, surface_width, surface_height),
    };

    let mut svg = String::new();
    let _ = writeln!(
        svg,
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{vw:.2}" height="{vh:.2}" viewBox="{vx:.2} {vy:.2} {vw:.2} {vh:.2}">"#
    );
    let _ = writeln!(
        svg,
        r#"<g fill="none" stroke-linecap="round" stroke-linejoin="round">"#
    );
    for stroke in strokes {
        let _ = writeln!(
            svg,
            r#"<path d="{}" stroke="{}" stroke-width="{:.2}"/>"#,
            path_data(stroke),
            stroke.color,
            stroke.width
        );
    }
    let _ = writeln!(svg, "</g>");
    let _ = write!(svg, "</svg>");

    SignatureExport {
        svg,
        is_empty: strokes.is_empty(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stroke::{PenStyle, Point};
    use pretty_assertions::assert_eq;

    fn stroke(points: &[(f32, f32)]) -> Stroke {
        let mut s = Stroke::start(
            Point::new(points[0].0, points[0].1, 0.0),
            &PenStyle::default(),
        );
        for (i, &(x, y)) in points.iter().enumerate().skip(1) {
            s.points.push(Point::new(x, y, i as f64 * 16.0));
        }
        s
    }

    #[test]
    fn test_empty_export_has_empty_path_group() {
        let export = export(&[], 400.0, 200.0, &ExportOptions::default());
        assert!(export.is_empty);
        assert!(export.svg.contains("<g fill=\"none\""));
        assert!(!export.svg.contains("<path"));
        assert!(export.svg.ends_with("</svg>"));
    }

    #[test]
    fn test_empty_export_uses_surface_viewbox() {
        let export = export(&[], 400.0, 200.0, &ExportOptions::default());
        assert!(export.svg.contains(r#"viewBox="0.00 0.00 400.00 200.00""#));
    }

    #[test]
    fn test_trimmed_viewbox_is_padded_bounding_box() {
        let strokes = vec![stroke(&[(20.0, 30.0), (60.0, 50.0)])];
        let export = export(&strokes, 400.0, 200.0, &ExportOptions::default());
        // Bounds (20,30)-(60,50), padded by 8 on every side.
        assert!(export.svg.contains(r#"viewBox="12.00 22.00 56.00 36.00""#));
    }

    #[test]
    fn test_untrimmed_viewbox_is_full_surface() {
        let strokes = vec![stroke(&[(20.0, 30.0), (60.0, 50.0)])];
        let opts = ExportOptions {
            trim: false,
            ..Default::default()
        };
        let export = export(&strokes, 400.0, 200.0, &opts);
        assert!(export.svg.contains(r#"viewBox="0.00 0.00 400.00 200.00""#));
    }

    #[test]
    fn test_path_uses_quadratic_midpoint_smoothing() {
        let strokes = vec![stroke(&[(0.0, 0.0), (10.0, 0.0), (10.0, 10.0)])];
        let export = export(&strokes, 400.0, 200.0, &ExportOptions::default());
        // M first point, Q prev -> midpoint for each following point.
        assert!(export
            .svg
            .contains("M 0.00 0.00 Q 0.00 0.00 5.00 0.00 Q 10.00 0.00 10.00 5.00"));
    }

    #[test]
    fn test_one_path_per_stroke_with_style() {
        let mut second = stroke(&[(5.0, 5.0), (6.0, 6.0)]);
        second.color = "#1d4ed8".to_string();
        second.width = 4.0;
        let strokes = vec![stroke(&[(0.0, 0.0), (1.0, 1.0)]), second];

        let export = export(&strokes, 400.0, 200.0, &ExportOptions::default());
        assert_eq!(export.svg.matches("<path").count(), 2);
        assert!(export
            .svg
            .contains(r##"stroke="#1d4ed8" stroke-width="4.00""##));
    }

    #[test]
    fn test_export_is_deterministic() {
        let strokes = vec![stroke(&[(0.0, 0.0), (10.0, 20.0), (30.0, 5.0)])];
        let a = export(&strokes, 400.0, 200.0, &ExportOptions::default());
        let b = export(&strokes, 400.0, 200.0, &ExportOptions::default());
        assert_eq!(a, b);
    }
}
