use log::{debug, info};

use super::phases::{Phase, PhaseKind};
use super::scene::Scene;
use crate::components::canvas::Surface;
use crate::components::pointer::PointerEvent;
use crate::error::{Error, Result};
use crate::geometry::Point;
use crate::graph::Vertex;

/// Plays the phase sequence over one [`Scene`].
///
/// Transitions are strictly ordered: the current phase is finished before
/// the next one is prepared, and nothing is drawn until a phase has been
/// prepared.
pub struct PhasePlayer {
	scene: Scene,
	phases: Vec<Phase>,
	current: usize,
	started: bool,
	running: bool,
}

impl PhasePlayer {
	/// A stopped player over the full phase sequence.
	pub fn new(scene: Scene) -> Self {
		Self {
			scene,
			phases: Phase::sequence(),
			current: 0,
			started: false,
			running: false,
		}
	}

	/// Leave the current phase (if started) and enter phase `index`.
	pub fn set_phase(&mut self, index: usize) -> Result<()> {
		if index >= self.phases.len() {
			return Err(Error::PhaseOutOfRange {
				index,
				len: self.phases.len(),
			});
		}
		if self.started {
			self.phases[self.current].finish(&mut self.scene);
			self.started = false;
		}
		self.current = index;
		let phase = &mut self.phases[index];
		phase.prepare(&mut self.scene)?;
		self.started = true;
		info!(
			"player: entered {} ({} ticks)",
			phase.kind(),
			phase.lifecycle().duration()
		);
		Ok(())
	}

	/// Restore the starting graph and play from the first phase.
	pub fn play(&mut self) -> Result<()> {
		if self.started {
			self.phases[self.current].finish(&mut self.scene);
			self.started = false;
		}
		self.scene.restore_base()?;
		self.scene.layout_required = true;
		self.scene.snapshot = None;
		self.set_phase(0)?;
		self.running = true;
		Ok(())
	}

	/// Same as [`PhasePlayer::play`].
	pub fn restart(&mut self) -> Result<()> {
		self.play()
	}

	/// Move to the next phase; false (and no change) at the last one.
	pub fn play_next(&mut self) -> Result<bool> {
		if !self.can_continue() {
			debug!("player: already at the last phase");
			return Ok(false);
		}
		self.set_phase(self.current + 1)?;
		Ok(true)
	}

	/// Draw one frame and advance the current phase.
	pub fn frame(&mut self, surface: &mut dyn Surface) -> Result<()> {
		if !self.running {
			return Err(Error::PlayerNotStarted);
		}
		surface.clear(self.scene.config.style.background);
		let phase = &mut self.phases[self.current];
		phase.play(&self.scene, surface)?;
		phase.step(&mut self.scene);
		Ok(())
	}

	/// Forward a drag gesture to the current phase.
	pub fn pointer(&mut self, event: &PointerEvent) {
		if self.started {
			self.phases[self.current].pointer(&mut self.scene, event);
		}
	}

	/// Vertex under `at`, only while nodes are draggable.
	pub fn hit_test(&self, at: Point) -> Option<Vertex> {
		let phase = self.phases.get(self.current)?;
		if !self.started || !phase.is_interactive() {
			return None;
		}
		let radius = self.scene.config.style.hit_radius;
		self.scene.simulation().node_at(at, radius)
	}

	/// True unless the last phase is current.
	pub fn can_continue(&self) -> bool {
		self.current + 1 < self.phases.len()
	}

	/// Index of the current phase.
	pub fn current_index(&self) -> usize {
		self.current
	}

	/// Kind of the current phase.
	pub fn current_kind(&self) -> PhaseKind {
		self.phases[self.current].kind()
	}

	/// The current phase.
	pub fn current_phase(&self) -> &Phase {
		&self.phases[self.current]
	}

	/// True once `play` has run.
	pub fn is_running(&self) -> bool {
		self.running
	}

	/// Shared scenario state.
	pub fn scene(&self) -> &Scene {
		&self.scene
	}

	/// Finish the current phase and stop drawing.
	pub fn stop(&mut self) {
		if self.started {
			self.phases[self.current].finish(&mut self.scene);
			self.started = false;
		}
		self.running = false;
	}
}
