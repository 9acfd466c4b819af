use crate::geometry::Point;

/// Linear interpolation of a point over `[0, duration]` ticks.
///
/// Immutable: build a new scale when either endpoint changes. Inputs are not
/// clamped, so ticks outside the domain extrapolate.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TransitionScale {
	from: Point,
	to: Point,
	duration: f64,
}

impl TransitionScale {
	/// Scale from `(from_x, from_y)` to `(to_x, to_y)`.
	pub fn new(from_x: f64, from_y: f64, to_x: f64, to_y: f64, duration: f64) -> Self {
		Self::between(Point::new(from_x, from_y), Point::new(to_x, to_y), duration)
	}

	/// Scale between two points.
	pub fn between(from: Point, to: Point, duration: f64) -> Self {
		Self { from, to, duration }
	}

	/// One-dimensional scale; only [`TransitionScale::x`] is meaningful.
	pub fn scalar(from: f64, to: f64, duration: f64) -> Self {
		Self::new(from, 0.0, to, 0.0, duration)
	}

	fn progress(&self, t: f64) -> f64 {
		if self.duration <= 0.0 {
			1.0
		} else {
			t / self.duration
		}
	}

	/// Interpolated x.
	pub fn x(&self, t: f64) -> f64 {
		self.from.x + (self.to.x - self.from.x) * self.progress(t)
	}

	/// Interpolated y.
	pub fn y(&self, t: f64) -> f64 {
		self.from.y + (self.to.y - self.from.y) * self.progress(t)
	}

	/// Interpolated point.
	pub fn point(&self, t: f64) -> Point {
		Point::new(self.x(t), self.y(t))
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn interpolates_and_extrapolates() {
		let s = TransitionScale::new(0.0, 10.0, 100.0, 20.0, 10.0);
		assert_eq!(s.point(0.0), Point::new(0.0, 10.0));
		assert_eq!(s.point(5.0), Point::new(50.0, 15.0));
		assert_eq!(s.point(10.0), Point::new(100.0, 20.0));
		assert_eq!(s.x(20.0), 200.0);
	}

	#[test]
	fn zero_duration_jumps_to_the_end() {
		let s = TransitionScale::scalar(3.0, 7.0, 0.0);
		assert_eq!(s.x(0.0), 7.0);
	}
}
