use crate::error::{Error, Result};

/// Easing curve over `[0, 1]`.
pub type Ease = fn(f64) -> f64;

/// Identity easing.
pub fn linear(t: f64) -> f64 {
	t
}

/// Decelerating cubic.
pub fn ease_out_cubic(t: f64) -> f64 {
	1.0 - (1.0 - t).powi(3)
}

/// Symmetric cubic.
pub fn ease_in_out_cubic(t: f64) -> f64 {
	if t < 0.5 {
		4.0 * t * t * t
	} else {
		1.0 - (-2.0 * t + 2.0).powi(3) / 2.0
	}
}

/// Symmetric quadratic.
pub fn ease_in_out_quad(t: f64) -> f64 {
	if t < 0.5 {
		2.0 * t * t
	} else {
		1.0 - (-2.0 * t + 2.0).powi(2) / 2.0
	}
}

/// When, as fractions of a phase, an attribute animates.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Timeline {
	/// Active from the start until the given fraction.
	Until(f64),
	/// Active between two fractions.
	Window(f64, f64),
}

impl Timeline {
	fn bounds(self) -> (f64, f64) {
		match self {
			Self::Until(end) => (0.0, end),
			Self::Window(start, end) => (start, end),
		}
	}
}

impl From<f64> for Timeline {
	fn from(end: f64) -> Self {
		Self::Until(end)
	}
}

impl From<[f64; 2]> for Timeline {
	fn from([start, end]: [f64; 2]) -> Self {
		Self::Window(start, end)
	}
}

/// Tick-to-value mapping produced by [`animation_scale`].
#[derive(Clone, Debug)]
pub struct AnimationScale {
	start: f64,
	end: f64,
	range: Vec<f64>,
	ease: Ease,
}

impl AnimationScale {
	/// Value at `tick`: first stop before the window, last stop after it.
	pub fn at(&self, tick: f64) -> f64 {
		let (Some(&first), Some(&last)) = (self.range.first(), self.range.last()) else {
			return 0.0;
		};
		if tick < self.start {
			return first;
		}
		if tick >= self.end {
			return last;
		}
		let t = (self.ease)((tick - self.start) / (self.end - self.start));
		let segments = (self.range.len() - 1) as f64;
		if segments == 0.0 {
			return first;
		}
		let pos = (t * segments).clamp(0.0, segments);
		let i = (pos.floor() as usize).min(self.range.len() - 2);
		let local = pos - i as f64;
		self.range[i] + (self.range[i + 1] - self.range[i]) * local
	}
}

/// Interpolate `range` over the part of `total_duration` selected by `timeline`.
///
/// Ranges with more than two stops are split into equal sub-windows.
pub fn animation_scale(
	timeline: impl Into<Timeline>,
	total_duration: f64,
	range: &[f64],
	ease: Option<Ease>,
) -> AnimationScale {
	let (start, end) = timeline.into().bounds();
	AnimationScale {
		start: start * total_duration,
		end: end * total_duration,
		range: range.to_vec(),
		ease: ease.unwrap_or(linear),
	}
}

/// Split `[0, 1]` into contiguous windows at `breakpoints`.
///
/// `1.0` is appended as the final breakpoint when missing.
pub fn timeline_slices(breakpoints: &[f64]) -> Result<Vec<[f64; 2]>> {
	let in_range = breakpoints.iter().all(|b| (0.0..=1.0).contains(b));
	let sorted = breakpoints.windows(2).all(|w| w[0] <= w[1]);
	if !in_range || !sorted {
		return Err(Error::UnsortedBreakpoints(breakpoints.to_vec()));
	}

	let mut slices = Vec::with_capacity(breakpoints.len() + 1);
	let mut prev = 0.0;
	for &b in breakpoints {
		slices.push([prev, b]);
		prev = b;
	}
	if prev < 1.0 || slices.is_empty() {
		slices.push([prev, 1.0]);
	}
	Ok(slices)
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn single_fraction_clamps_to_the_range_ends() {
		let s = animation_scale(0.5, 100.0, &[0.0, 10.0], None);
		assert_eq!(s.at(0.0), 0.0);
		assert_eq!(s.at(25.0), 5.0);
		assert_eq!(s.at(50.0), 10.0);
		assert_eq!(s.at(200.0), 10.0);
	}

	#[test]
	fn window_holds_its_start_value_until_it_opens() {
		let s = animation_scale([0.2, 0.6], 100.0, &[5.0, 15.0], None);
		assert_eq!(s.at(10.0), 5.0);
		assert_eq!(s.at(40.0), 10.0);
		assert_eq!(s.at(80.0), 15.0);
	}

	#[test]
	fn easing_is_applied_inside_the_window() {
		let s = animation_scale(1.0, 10.0, &[0.0, 1.0], Some(ease_out_cubic));
		assert!((s.at(5.0) - 0.875).abs() < 1e-12);
	}

	#[test]
	fn multi_stop_ranges_are_piecewise() {
		let s = animation_scale(1.0, 100.0, &[0.0, 1.0, 0.0], None);
		assert_eq!(s.at(25.0), 0.5);
		assert_eq!(s.at(50.0), 1.0);
		assert_eq!(s.at(75.0), 0.5);
	}

	#[test]
	fn zero_duration_reports_the_terminal_value() {
		let s = animation_scale(0.5, 0.0, &[1.0, 0.0], None);
		assert_eq!(s.at(0.0), 0.0);
	}

	#[test]
	fn slices_partition_the_unit_interval() {
		assert_eq!(
			timeline_slices(&[0.3, 0.7]).unwrap(),
			vec![[0.0, 0.3], [0.3, 0.7], [0.7, 1.0]]
		);
		assert_eq!(timeline_slices(&[]).unwrap(), vec![[0.0, 1.0]]);
		assert_eq!(timeline_slices(&[0.5, 1.0]).unwrap(), vec![[0.0, 0.5], [0.5, 1.0]]);
	}

	#[test]
	fn slices_reject_unsorted_breakpoints() {
		assert!(timeline_slices(&[0.7, 0.3]).is_err());
		assert!(timeline_slices(&[1.5]).is_err());
	}
}
