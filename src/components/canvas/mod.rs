//! Drawing surface, its canvas backend, and the host-supplied style.

mod render;
mod style;
mod surface;

pub use render::{CanvasSurface, cancel_frame, context_2d, event_position, request_frame};
pub use style::{CellSizing, MorphConfig, StyleConfig, TimingConfig};
pub use surface::{DrawOp, Paint, Rect, RecordingSurface, Surface, TextAlign};
