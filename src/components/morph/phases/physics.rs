//! Shared behaviour of the two physics phases.

use log::debug;

use super::{MatrixFrame, draw_label, draw_link, draw_node, node_color};
use crate::components::canvas::{Surface, TextAlign};
use crate::components::morph::scene::Scene;
use crate::components::pointer::{GesturePhase, PointerEvent};
use crate::geometry::{Point, control_point};

pub(super) fn step(scene: &mut Scene) {
	scene.simulation_mut().tick();
}

/// Stop the physics and hand the resting positions to the next phase.
pub(super) fn finish(scene: &mut Scene) {
	let (snapshot, energy) = {
		let mut sim = scene.simulation_mut();
		sim.stop();
		(sim.snapshot(), sim.energy())
	};
	debug!("physics: recorded {} positions (energy {energy:.4})", snapshot.len());
	scene.snapshot = Some(snapshot);
	scene.layout_required = false;
}

pub(super) fn pointer(scene: &mut Scene, event: &PointerEvent) {
	let mut sim = scene.simulation_mut();
	match event.phase {
		GesturePhase::Start | GesturePhase::Drag => {
			sim.fix(&event.subject, event.position);
		}
		GesturePhase::End => {
			sim.release(&event.subject);
		}
	}
}

/// Draw the live layout: curved links, then nodes, then labels.
pub(super) fn draw(scene: &Scene, surface: &mut dyn Surface) {
	let style = &scene.config.style;
	let frame = MatrixFrame::new(scene);
	let sim = scene.simulation();
	let positions = sim.snapshot();

	for link in sim.links() {
		let (a, b) = frame.oriented(&link.edge);
		let (Some(&from), Some(&to)) = (positions.get(a), positions.get(b)) else {
			continue;
		};
		if link.edge.is_reflexive() {
			continue;
		}
		draw_link(surface, style, (from, to), control_point(from, to, style.curvature), 1.0);
	}

	for vertex in sim.vertices() {
		let color = node_color(scene, &vertex.id);
		draw_node(surface, vertex.position, style.node_radius, color, 1.0);
		let at = Point::new(
			vertex.position.x,
			vertex.position.y - style.node_radius - style.label_gap,
		);
		draw_label(surface, style, &vertex.id, at, TextAlign::Center, 1.0);
	}
}
