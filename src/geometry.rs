//! Points and colours shared by the layout, timeline and drawing code.

use std::fmt;

use serde::Deserialize;

use crate::error::Error;

/// A 2D point in canvas space.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Point {
	/// Horizontal coordinate.
	pub x: f64,
	/// Vertical coordinate.
	pub y: f64,
}

impl Point {
	/// Build a point.
	pub const fn new(x: f64, y: f64) -> Self {
		Self { x, y }
	}

	/// Euclidean distance to `other`.
	pub fn distance(self, other: Point) -> f64 {
		let (dx, dy) = (other.x - self.x, other.y - self.y);
		(dx * dx + dy * dy).sqrt()
	}

	/// Midpoint of the segment to `other`.
	pub fn midpoint(self, other: Point) -> Point {
		Point::new((self.x + other.x) / 2.0, (self.y + other.y) / 2.0)
	}

	/// True when both coordinates are finite.
	pub fn is_finite(self) -> bool {
		self.x.is_finite() && self.y.is_finite()
	}
}

/// Control point bending the segment `a -> b` into an arc.
///
/// The point sits on the perpendicular bisector, offset by `curvature` times
/// the straight-line distance, so longer links bend proportionally more.
pub fn control_point(a: Point, b: Point, curvature: f64) -> Point {
	let dist = a.distance(b);
	let mid = a.midpoint(b);
	if dist < 1e-9 {
		return mid;
	}
	let (ux, uy) = ((b.x - a.x) / dist, (b.y - a.y) / dist);
	let offset = dist * curvature;
	Point::new(mid.x - uy * offset, mid.y + ux * offset)
}

/// An RGBA colour; channels are 0-255, alpha is 0.0-1.0.
#[derive(Clone, Copy, Debug, PartialEq, Deserialize)]
#[serde(try_from = "String")]
pub struct Color {
	/// Red channel.
	pub r: u8,
	/// Green channel.
	pub g: u8,
	/// Blue channel.
	pub b: u8,
	/// Opacity.
	pub a: f64,
}

impl Color {
	/// Opaque colour from channels.
	pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
		Self { r, g, b, a: 1.0 }
	}

	/// Parse `#rrggbb` or `#rgb`.
	pub fn from_hex(hex: &str) -> Result<Self, Error> {
		let digits = hex.strip_prefix('#').unwrap_or(hex);
		if !digits.is_ascii() {
			return Err(Error::InvalidColor(hex.into()));
		}
		let channel = |s: &str| u8::from_str_radix(s, 16).map_err(|_| Error::InvalidColor(hex.into()));
		match digits.len() {
			6 => Ok(Self::rgb(
				channel(&digits[0..2])?,
				channel(&digits[2..4])?,
				channel(&digits[4..6])?,
			)),
			3 => {
				let expand = |i: usize| channel(&digits[i..i + 1]).map(|v| v * 17);
				Ok(Self::rgb(expand(0)?, expand(1)?, expand(2)?))
			}
			_ => Err(Error::InvalidColor(hex.into())),
		}
	}

	/// Same colour with its alpha multiplied by `alpha`.
	pub fn with_alpha(self, alpha: f64) -> Self {
		Self {
			a: (self.a * alpha).clamp(0.0, 1.0),
			..self
		}
	}
}

impl TryFrom<String> for Color {
	type Error = Error;

	fn try_from(value: String) -> Result<Self, Self::Error> {
		Self::from_hex(&value)
	}
}

impl fmt::Display for Color {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "rgba({}, {}, {}, {})", self.r, self.g, self.b, self.a)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn control_point_is_perpendicular_to_the_link() {
		let c = control_point(Point::new(0.0, 0.0), Point::new(10.0, 0.0), 0.2);
		assert_eq!(c, Point::new(5.0, 2.0));
	}

	#[test]
	fn control_point_of_coincident_ends_is_the_end() {
		let p = Point::new(3.0, 4.0);
		assert_eq!(control_point(p, p, 0.5), p);
	}

	#[test]
	fn parses_hex_colors() {
		assert_eq!(Color::from_hex("#1f77b4").unwrap(), Color::rgb(0x1f, 0x77, 0xb4));
		assert_eq!(Color::from_hex("#fff").unwrap(), Color::rgb(255, 255, 255));
		assert!(Color::from_hex("#12345").is_err());
		assert_eq!(Color::rgb(1, 2, 3).with_alpha(0.5).to_string(), "rgba(1, 2, 3, 0.5)");
	}
}
