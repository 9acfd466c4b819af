use log::info;

use super::{Lifecycle, physics};
use crate::components::canvas::Surface;
use crate::components::morph::scene::Scene;
use crate::error::Result;

/// Supplementary vertices join and settle around the existing layout.
#[derive(Debug, Default)]
pub struct AddMoreNodes {
	pub(super) life: Lifecycle,
}

impl AddMoreNodes {
	pub(super) fn prepare(&mut self, scene: &mut Scene) -> Result<()> {
		let before = scene.graph.vertex_count();
		scene.extend()?;
		info!(
			"add-more-nodes: {} supplementary vertices",
			scene.graph.vertex_count() - before
		);
		let snapshot = if scene.layout_required { None } else { scene.snapshot.as_ref() };
		scene.simulation_mut().layout(snapshot);
		scene.layout_required = false;
		self.life.begin(scene.config.timing.add_nodes_ticks);
		Ok(())
	}

	pub(super) fn play(&self, scene: &Scene, surface: &mut dyn Surface) -> Result<()> {
		physics::draw(scene, surface);
		Ok(())
	}
}
