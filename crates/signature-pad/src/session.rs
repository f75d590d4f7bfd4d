//! Stateful signature capture session
//!
//! Holds the stroke state in Rust, minimizing host-side state management.
//! The host forwards pointer events; the session renders live feedback
//! through an attached [`DrawSurface`] and reports state changes through a
//! callback carrying the current export.

use crate::stroke::{PenStyle, Point, Stroke};
use crate::svg::{self, ExportOptions, SignatureExport};

/// Rendering seam for live feedback while drawing.
///
/// `draw_segment` receives the smoothed quadratic segment for the newest
/// point; `clear` wipes the surface before a full replay.
pub trait DrawSurface {
    fn clear(&mut self);
    fn draw_segment(&mut self, from: Point, ctrl: Point, to: Point, color: &str, width: f32);
}

type ChangeCallback = Box<dyn FnMut(&SignatureExport)>;

/// Signature capture session.
///
/// Per-stroke state machine: Idle -> Drawing -> Idle. The session itself
/// has no terminal state; it lives as long as the hosting widget. Pointer
/// events for one pointer arrive strictly ordered (down, moves, up), and
/// at most one stroke is in progress at a time.
pub struct SignatureSession {
    surface_width: f32,
    surface_height: f32,
    strokes: Vec<Stroke>,
    current: Option<Stroke>,
    pen: PenStyle,
    disabled: bool,
    surface: Option<Box<dyn DrawSurface>>,
    on_change: Option<ChangeCallback>,
}

impl SignatureSession {
    /// Create an empty session for a drawing surface of the given pixel
    /// dimensions.
    pub fn new(surface_width: f32, surface_height: f32) -> Self {
        Self {
            surface_width,
            surface_height,
            strokes: Vec::new(),
            current: None,
            pen: PenStyle::default(),
            disabled: false,
            surface: None,
            on_change: None,
        }
    }

    /// Attach the live-rendering surface.
    pub fn attach_surface(&mut self, surface: Box<dyn DrawSurface>) {
        self.surface = Some(surface);
    }

    /// Register the change callback, fired after `end`, `undo`, and
    /// `clear` with the current (untrimmed) export.
    pub fn set_on_change(&mut self, callback: ChangeCallback) {
        self.on_change = Some(callback);
    }

    pub fn set_pen(&mut self, pen: PenStyle) {
        self.pen = pen;
    }

    /// Disable or re-enable input. While disabled every operation is a
    /// silent no-op.
    pub fn set_disabled(&mut self, disabled: bool) {
        self.disabled = disabled;
    }

    pub fn is_disabled(&self) -> bool {
        self.disabled
    }

    pub fn is_empty(&self) -> bool {
        self.strokes.is_empty()
    }

    pub fn stroke_count(&self) -> usize {
        self.strokes.len()
    }

    pub fn strokes(&self) -> &[Stroke] {
        &self.strokes
    }

    /// Pointer down: start a new in-progress stroke.
    ///
    /// No-op while disabled or if a stroke is already in progress
    /// (multi-touch is out of scope).
    pub fn begin(&mut self, point: Point) {
        if self.disabled || self.current.is_some() {
            return;
        }
        self.current = Some(Stroke::start(point, &self.pen));
    }

    /// Pointer move: append to the in-progress stroke and draw the
    /// incremental smoothed segment. No-op when idle or disabled.
    pub fn extend(&mut self, point: Point) {
        if self.disabled {
            return;
        }
        let Some(current) = self.current.as_mut() else {
            return;
        };
        current.points.push(point);

        let n = current.points.len();
        let prev = current.points[n - 2];
        // The pen resumes from the previous segment's midpoint endpoint,
        // except for the very first segment which starts at the raw
        // first point.
        let from = if n >= 3 {
            current.points[n - 3].midpoint(&prev)
        } else {
            current.points[0]
        };
        let (color, width) = (current.color.clone(), current.width);
        let mid = prev.midpoint(&point);
        if let Some(surface) = self.surface.as_mut() {
            surface.draw_segment(from, prev, mid, &color, width);
        }
    }

    /// Pointer up: finalize the in-progress stroke.
    ///
    /// A stroke with at least 2 points joins the finalized list and the
    /// change callback fires; a shorter stroke is discarded. The
    /// in-progress slot is cleared either way.
    pub fn end(&mut self) {
        if self.disabled {
            return;
        }
        let Some(stroke) = self.current.take() else {
            return;
        };
        if stroke.is_renderable() {
            self.strokes.push(stroke);
            self.notify();
        }
    }

    /// Remove the most recently finalized stroke. No-op when there are
    /// none. The surface is redrawn by full clear + replay so the visual
    /// state always matches the remaining strokes.
    pub fn undo(&mut self) {
        if self.disabled || self.strokes.is_empty() {
            return;
        }
        self.strokes.pop();
        self.replay();
        self.notify();
    }

    /// Remove every stroke, including any in progress, and wipe the
    /// surface.
    pub fn clear(&mut self) {
        if self.disabled {
            return;
        }
        self.strokes.clear();
        self.current = None;
        if let Some(surface) = self.surface.as_mut() {
            surface.clear();
        }
        self.notify();
    }

    /// Serialize the finalized strokes (the in-progress stroke is
    /// ignored). Idempotent: two calls with no mutation in between return
    /// byte-identical markup.
    pub fn export_vector(&self, options: &ExportOptions) -> SignatureExport {
        svg::export(
            &self.strokes,
            self.surface_width,
            self.surface_height,
            options,
        )
    }

    /// Full redraw: clear the surface and replay every finalized stroke
    /// with the same smoothing used during capture.
    fn replay(&mut self) {
        let Some(surface) = self.surface.as_mut() else {
            return;
        };
        surface.clear();
        for stroke in &self.strokes {
            let points = &stroke.points;
            for i in 1..points.len() {
                let prev = points[i - 1];
                let from = if i >= 2 {
                    points[i - 2].midpoint(&prev)
                } else {
                    points[0]
                };
                let mid = prev.midpoint(&points[i]);
                surface.draw_segment(from, prev, mid, &stroke.color, stroke.width);
            }
        }
    }

    fn notify(&mut self) {
        if self.on_change.is_none() {
            return;
        }
        let export = svg::export(
            &self.strokes,
            self.surface_width,
            self.surface_height,
            &ExportOptions {
                trim: false,
                ..Default::default()
            },
        );
        if let Some(callback) = self.on_change.as_mut() {
            callback(&export);
        }
    }
}
