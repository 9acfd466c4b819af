use indexmap::IndexMap;
use log::debug;

use super::{Lifecycle, MatrixFrame, draw_label, draw_link, draw_node, node_color};
use crate::components::canvas::{Surface, TextAlign};
use crate::components::force_graph::PositionSnapshot;
use crate::components::morph::scene::Scene;
use crate::error::Result;
use crate::geometry::{Point, control_point};
use crate::graph::Vertex;
use crate::timeline::{AnimationScale, TransitionScale, animation_scale, ease_in_out_quad};

/// Node radius at the diagonal, as a fraction of the cell side.
pub(super) const DIAGONAL_RADIUS: f64 = 0.4;

#[derive(Clone, Debug)]
struct LinkTrack {
	ends: (Vertex, Vertex),
	control: TransitionScale,
}

#[derive(Clone, Debug)]
struct Tracks {
	nodes: IndexMap<Vertex, TransitionScale>,
	links: Vec<LinkTrack>,
	radius: AnimationScale,
	label_alpha: AnimationScale,
}

/// Every node travels from its resting force position to its diagonal cell,
/// while links bend into the arcs they keep in the matrix.
#[derive(Debug, Default)]
pub struct NodeToMatrix {
	pub(super) life: Lifecycle,
	tracks: Option<Tracks>,
}

impl NodeToMatrix {
	pub(super) fn prepare(&mut self, scene: &mut Scene) -> Result<()> {
		let start = Self::start_positions(scene);
		let frame = MatrixFrame::new(scene);
		let style = &scene.config.style;
		let duration = scene.config.timing.node_to_matrix_ticks;
		let d = duration as f64;

		let sim = scene.simulation();
		let from = |v: &str| start.get(v).copied().or_else(|| sim.position(v));

		let mut nodes = IndexMap::new();
		for v in &frame.labels {
			let Some(target) = frame.diagonal(v) else {
				continue;
			};
			let origin = from(v).unwrap_or(target);
			nodes.insert(v.clone(), TransitionScale::between(origin, target, d));
		}

		let mut links = Vec::new();
		for edge in scene.graph.edges().filter(|e| !e.is_reflexive()) {
			let (a, b) = frame.oriented(edge);
			let (Some(pa), Some(pb), Some(arc)) = (from(a), from(b), frame.arc_control(a, b)) else {
				continue;
			};
			links.push(LinkTrack {
				ends: (a.into(), b.into()),
				control: TransitionScale::between(control_point(pa, pb, style.curvature), arc, d),
			});
		}

		let tracks = Tracks {
			nodes,
			links,
			radius: animation_scale(
				[0.5, 1.0],
				d,
				&[style.node_radius, frame.cell * DIAGONAL_RADIUS],
				Some(ease_in_out_quad),
			),
			label_alpha: animation_scale(0.3, d, &[1.0, 0.0], None),
		};
		debug!(
			"node-to-matrix: {} node tracks, {} link tracks",
			tracks.nodes.len(),
			tracks.links.len()
		);
		self.tracks = Some(tracks);
		self.life.begin(duration);
		Ok(())
	}

	/// Resting positions from the previous phase, computing a layout first if
	/// none is available.
	fn start_positions(scene: &mut Scene) -> PositionSnapshot {
		if !scene.layout_required {
			if let Some(snapshot) = &scene.snapshot {
				scene.simulation_mut().stop();
				return snapshot.clone();
			}
		}
		let snapshot = {
			let mut sim = scene.simulation_mut();
			sim.layout(None);
			sim.settle(scene.config.timing.force_ticks);
			sim.stop();
			sim.snapshot()
		};
		scene.snapshot = Some(snapshot.clone());
		scene.layout_required = false;
		snapshot
	}

	pub(super) fn play(&self, scene: &Scene, surface: &mut dyn Surface) -> Result<()> {
		let Some(tracks) = &self.tracks else {
			return Ok(());
		};
		let style = &scene.config.style;
		let t = self.life.t();
		let at = |v: &str| tracks.nodes.get(v).map(|s| s.point(t));

		for link in &tracks.links {
			if let (Some(a), Some(b)) = (at(&link.ends.0), at(&link.ends.1)) {
				draw_link(surface, style, (a, b), link.control.point(t), 1.0);
			}
		}

		let radius = tracks.radius.at(t);
		let label_alpha = tracks.label_alpha.at(t);
		for (v, scale) in &tracks.nodes {
			let p = scale.point(t);
			draw_node(surface, p, radius, node_color(scene, v), 1.0);
			let above = Point::new(p.x, p.y - radius - style.label_gap);
			draw_label(surface, style, v, above, TextAlign::Center, label_alpha);
		}
		Ok(())
	}
}
