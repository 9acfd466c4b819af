//! Pointer gestures as delivered by the host.

use crate::geometry::Point;
use crate::graph::Vertex;

/// Stage of a drag gesture.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GesturePhase {
	/// Button pressed on the subject.
	Start,
	/// Pointer moved while pressed.
	Drag,
	/// Button released.
	End,
}

/// A gesture on a vertex or label.
#[derive(Clone, Debug, PartialEq)]
pub struct PointerEvent {
	/// Vertex or label under the gesture.
	pub subject: Vertex,
	/// Pointer position in canvas space.
	pub position: Point,
	/// Gesture stage.
	pub phase: GesturePhase,
}

impl PointerEvent {
	/// Build an event.
	pub fn new(subject: impl Into<Vertex>, position: Point, phase: GesturePhase) -> Self {
		Self {
			subject: subject.into(),
			position,
			phase,
		}
	}
}
