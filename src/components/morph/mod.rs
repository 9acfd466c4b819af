//! The graph-to-matrix morph: shared scene, phases, and the player that
//! sequences them.

mod component;
mod phases;
mod player;
mod scene;

pub use component::MorphCanvas;
pub use phases::{Lifecycle, Phase, PhaseKind};
pub use player::PhasePlayer;
pub use scene::Scene;
