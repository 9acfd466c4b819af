/// Frame counter owned by a single phase.
///
/// Monotonic only by convention: callers advance it once per frame and the
/// owning phase resets it from `prepare`.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Ticker {
	tick: u32,
}

impl Ticker {
	/// Current tick.
	pub fn tick(&self) -> u32 {
		self.tick
	}

	/// Advance by `n` ticks.
	pub fn increment(&mut self, n: u32) {
		self.tick = self.tick.saturating_add(n);
	}

	/// Advance by one tick.
	pub fn advance(&mut self) {
		self.increment(1);
	}

	/// Back to tick zero.
	pub fn reset(&mut self) {
		self.tick = 0;
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn counts_and_resets_to_zero() {
		let mut t = Ticker::default();
		t.advance();
		t.increment(3);
		assert_eq!(t.tick(), 4);
		t.reset();
		assert_eq!(t.tick(), 0);
		t.increment(u32::MAX);
		t.advance();
		assert_eq!(t.tick(), u32::MAX);
	}
}
