//! Stroke and point data types

use serde::{Deserialize, Serialize};

/// One sampled pointer position, in the drawing surface's local pixel
/// space at capture time. The surface must not be resized between capture
/// and render without re-deriving coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f32,
    pub y: f32,
    /// Capture timestamp, milliseconds since session epoch.
    pub time_ms: f64,
    /// Stylus pressure in [0, 1]; `None` when the device does not report it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pressure: Option<f32>,
}

impl Point {
    pub fn new(x: f32, y: f32, time_ms: f64) -> Self {
        Self {
            x,
            y,
            time_ms,
            pressure: None,
        }
    }

    pub fn with_pressure(x: f32, y: f32, time_ms: f64, pressure: f32) -> Self {
        Self {
            x,
            y,
            time_ms,
            pressure: Some(pressure),
        }
    }

    /// Midpoint with another point, keeping this point's timestamp.
    pub(crate) fn midpoint(&self, other: &Point) -> Point {
        Point {
            x: (self.x + other.x) / 2.0,
            y: (self.y + other.y) / 2.0,
            time_ms: self.time_ms,
            pressure: self.pressure,
        }
    }
}

/// Current pen configuration applied to new strokes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PenStyle {
    /// CSS color string, e.g. `#1d4ed8`.
    pub color: String,
    /// Base stroke width in surface pixels.
    pub width: f32,
}

impl Default for PenStyle {
    fn default() -> Self {
        Self {
            color: "#000000".to_string(),
            width: 2.5,
        }
    }
}

/// One continuous pointer-down-to-pointer-up gesture.
///
/// Points are append-only. A stroke with fewer than 2 points is not
/// renderable and is discarded when the gesture ends.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stroke {
    pub points: Vec<Point>,
    pub color: String,
    pub width: f32,
}

impl Stroke {
    pub(crate) fn start(first: Point, pen: &PenStyle) -> Self {
        // Width scales with the first point's pressure; 1.0 when the
        // device reports none.
        let pressure = first.pressure.unwrap_or(1.0);
        Self {
            points: vec![first],
            color: pen.color.clone(),
            width: pen.width * pressure,
        }
    }

    pub fn is_renderable(&self) -> bool {
        self.points.len() >= 2
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stroke_width_scales_with_pressure() {
        let pen = PenStyle {
            color: "#000000".to_string(),
            width: 4.0,
        };
        let stroke = Stroke::start(Point::with_pressure(0.0, 0.0, 0.0, 0.5), &pen);
        assert_eq!(stroke.width, 2.0);
    }

    #[test]
    fn test_stroke_width_defaults_to_full_pressure() {
        let pen = PenStyle::default();
        let stroke = Stroke::start(Point::new(0.0, 0.0, 0.0), &pen);
        assert_eq!(stroke.width, pen.width);
    }

    #[test]
    fn test_single_point_stroke_is_not_renderable() {
        let stroke = Stroke::start(Point::new(1.0, 1.0, 0.0), &PenStyle::default());
        assert!(!stroke.is_renderable());
    }

    #[test]
    fn test_midpoint() {
        let a = Point::new(0.0, 0.0, 0.0);
        let b = Point::new(10.0, 4.0, 16.0);
        let mid = a.midpoint(&b);
        assert_eq!((mid.x, mid.y), (5.0, 2.0));
    }

    #[test]
    fn test_point_serializes_without_absent_pressure() {
        let json = serde_json::to_string(&Point::new(1.0, 2.0, 3.0)).unwrap();
        assert!(!json.contains("pressure"));
    }
}
