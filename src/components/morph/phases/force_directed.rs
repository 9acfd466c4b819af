use super::{Lifecycle, physics};
use crate::components::canvas::Surface;
use crate::components::morph::scene::Scene;
use crate::error::Result;

/// Free physics layout of the starting graph.
#[derive(Debug, Default)]
pub struct ForceDirected {
	pub(super) life: Lifecycle,
}

impl ForceDirected {
	pub(super) fn prepare(&mut self, scene: &mut Scene) -> Result<()> {
		let snapshot = if scene.layout_required { None } else { scene.snapshot.as_ref() };
		scene.simulation_mut().layout(snapshot);
		scene.layout_required = false;
		self.life.begin(scene.config.timing.force_ticks);
		Ok(())
	}

	pub(super) fn play(&self, scene: &Scene, surface: &mut dyn Surface) -> Result<()> {
		physics::draw(scene, surface);
		Ok(())
	}
}
