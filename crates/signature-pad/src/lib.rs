//! Freehand signature capture
//!
//! Converts raw pointer input into vector signature images. The session owns
//! the stroke state that the original drawing widget kept in UI state: the
//! host feeds it pointer events (`begin` / `extend` / `end`), it maintains
//! the finalized stroke list, drives an optional [`DrawSurface`] for live
//! feedback, and serializes to SVG on demand.
//!
//! All operations are local, synchronous, and infallible; invalid calls
//! (drawing while disabled, extending with no stroke in progress) are
//! silent no-ops rather than errors.

pub mod session;
pub mod stroke;
pub mod svg;

pub use session::{DrawSurface, SignatureSession};
pub use stroke::{PenStyle, Point, Stroke};
pub use svg::{ExportOptions, SignatureExport};
