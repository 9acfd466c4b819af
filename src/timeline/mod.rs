//! Frame-counted timeline primitives used by every animation phase.

mod scale;
mod ticker;
mod transition;

pub use scale::{
	AnimationScale, Ease, Timeline, animation_scale, ease_in_out_cubic, ease_in_out_quad,
	ease_out_cubic, linear, timeline_slices,
};
pub use ticker::Ticker;
pub use transition::TransitionScale;
