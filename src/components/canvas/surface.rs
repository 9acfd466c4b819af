use crate::geometry::{Color, Point};

/// Axis-aligned rectangle.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rect {
	/// Left edge.
	pub x: f64,
	/// Top edge.
	pub y: f64,
	/// Width.
	pub width: f64,
	/// Height.
	pub height: f64,
}

impl Rect {
	/// Square of side `size` centered on `center`.
	pub fn centered(center: Point, size: f64) -> Self {
		Self {
			x: center.x - size / 2.0,
			y: center.y - size / 2.0,
			width: size,
			height: size,
		}
	}

	/// Center point.
	pub fn center(&self) -> Point {
		Point::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
	}
}

/// Fill and stroke for one primitive. Transparency lives in the colours.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Paint {
	/// Fill colour.
	pub fill: Option<Color>,
	/// Stroke colour.
	pub stroke: Option<Color>,
	/// Stroke width.
	pub line_width: f64,
}

impl Paint {
	/// Fill only.
	pub fn fill(color: Color) -> Self {
		Self {
			fill: Some(color),
			..Self::default()
		}
	}

	/// Stroke only.
	pub fn stroke(color: Color, line_width: f64) -> Self {
		Self {
			stroke: Some(color),
			line_width,
			..Self::default()
		}
	}

	/// Multiply the opacity of both fill and stroke.
	pub fn faded(self, alpha: f64) -> Self {
		Self {
			fill: self.fill.map(|c| c.with_alpha(alpha)),
			stroke: self.stroke.map(|c| c.with_alpha(alpha)),
			..self
		}
	}

	/// Nothing would be drawn.
	pub fn is_invisible(&self) -> bool {
		let hidden = |c: Option<Color>| c.is_none_or(|c| c.a <= 0.0);
		hidden(self.fill) && hidden(self.stroke)
	}
}

/// Horizontal text anchoring.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TextAlign {
	/// Text starts at the anchor.
	Start,
	/// Text is centered on the anchor.
	Center,
	/// Text ends at the anchor.
	End,
}

/// The primitive operations a frame is made of.
pub trait Surface {
	/// Wipe the frame.
	fn clear(&mut self, background: Color);
	/// Straight segment.
	fn draw_line(&mut self, from: Point, to: Point, paint: &Paint);
	/// Rectangle with rounded corners; `radius` of half the side draws a circle.
	fn draw_rounded_rect(&mut self, rect: Rect, radius: f64, paint: &Paint);
	/// Quadratic curve from `from` to `to` bent through `control`.
	fn draw_curve(&mut self, from: Point, control: Point, to: Point, paint: &Paint);
	/// Text, vertically centered on `at`.
	fn draw_text(&mut self, text: &str, at: Point, size: f64, align: TextAlign, paint: &Paint);
}

/// A recorded primitive.
#[derive(Clone, Debug, PartialEq)]
pub enum DrawOp {
	/// See [`Surface::clear`].
	Clear(Color),
	/// See [`Surface::draw_line`].
	Line {
		/// Start.
		from: Point,
		/// End.
		to: Point,
		/// Paint.
		paint: Paint,
	},
	/// See [`Surface::draw_rounded_rect`].
	RoundedRect {
		/// Bounds.
		rect: Rect,
		/// Corner radius.
		radius: f64,
		/// Paint.
		paint: Paint,
	},
	/// See [`Surface::draw_curve`].
	Curve {
		/// Start.
		from: Point,
		/// Control point.
		control: Point,
		/// End.
		to: Point,
		/// Paint.
		paint: Paint,
	},
	/// See [`Surface::draw_text`].
	Text {
		/// Content.
		text: String,
		/// Anchor.
		at: Point,
		/// Font size.
		size: f64,
		/// Anchoring.
		align: TextAlign,
		/// Paint.
		paint: Paint,
	},
}

/// Headless surface that keeps every operation.
#[derive(Debug, Default)]
pub struct RecordingSurface {
	/// Operations in call order.
	pub ops: Vec<DrawOp>,
}

impl RecordingSurface {
	/// Operations issued since the last clear.
	pub fn frame(&self) -> &[DrawOp] {
		let start = self
			.ops
			.iter()
			.rposition(|op| matches!(op, DrawOp::Clear(_)))
			.map_or(0, |i| i + 1);
		&self.ops[start..]
	}

	/// Number of clears, i.e. frames drawn.
	pub fn frames(&self) -> usize {
		self.ops.iter().filter(|op| matches!(op, DrawOp::Clear(_))).count()
	}

	/// Text drawn in the current frame.
	pub fn texts(&self) -> Vec<&str> {
		self.frame()
			.iter()
			.filter_map(|op| match op {
				DrawOp::Text { text, .. } => Some(text.as_str()),
				_ => None,
			})
			.collect()
	}
}

impl Surface for RecordingSurface {
	fn clear(&mut self, background: Color) {
		self.ops.push(DrawOp::Clear(background));
	}

	fn draw_line(&mut self, from: Point, to: Point, paint: &Paint) {
		self.ops.push(DrawOp::Line { from, to, paint: *paint });
	}

	fn draw_rounded_rect(&mut self, rect: Rect, radius: f64, paint: &Paint) {
		self.ops.push(DrawOp::RoundedRect {
			rect,
			radius,
			paint: *paint,
		});
	}

	fn draw_curve(&mut self, from: Point, control: Point, to: Point, paint: &Paint) {
		self.ops.push(DrawOp::Curve {
			from,
			control,
			to,
			paint: *paint,
		});
	}

	fn draw_text(&mut self, text: &str, at: Point, size: f64, align: TextAlign, paint: &Paint) {
		self.ops.push(DrawOp::Text {
			text: text.into(),
			at,
			size,
			align,
			paint: *paint,
		});
	}
}
