use super::node_to_matrix::DIAGONAL_RADIUS;
use super::{Lifecycle, MatrixFrame, draw_label, draw_link, draw_node, node_color};
use crate::components::canvas::{Surface, TextAlign};
use crate::components::morph::scene::Scene;
use crate::error::Result;
use crate::timeline::{AnimationScale, TransitionScale, animation_scale, ease_in_out_cubic};

#[derive(Clone, Debug)]
struct LabelTrack {
	row: TransitionScale,
	column: TransitionScale,
}

/// Each diagonal node sheds a row label and a column label that slide out
/// to the matrix margins.
#[derive(Debug, Default)]
pub struct LabelGeneration {
	pub(super) life: Lifecycle,
	frame: Option<MatrixFrame>,
	tracks: Vec<LabelTrack>,
	alpha: Option<AnimationScale>,
}

impl LabelGeneration {
	pub(super) fn prepare(&mut self, scene: &mut Scene) -> Result<()> {
		scene.simulation_mut().stop();
		let frame = MatrixFrame::new(scene);
		let duration = scene.config.timing.label_ticks;
		let d = duration as f64;

		self.tracks = (0..frame.labels.len())
			.map(|i| {
				let diagonal = frame.center(i, i);
				LabelTrack {
					row: TransitionScale::between(diagonal, frame.row_label(i), d),
					column: TransitionScale::between(diagonal, frame.column_label(i), d),
				}
			})
			.collect();
		self.alpha = Some(animation_scale(0.3, d, &[0.0, 1.0], Some(ease_in_out_cubic)));
		self.frame = Some(frame);
		self.life.begin(duration);
		Ok(())
	}

	pub(super) fn play(&self, scene: &Scene, surface: &mut dyn Surface) -> Result<()> {
		let (Some(frame), Some(alpha)) = (&self.frame, &self.alpha) else {
			return Ok(());
		};
		let style = &scene.config.style;
		let t = self.life.t();

		for edge in scene.graph.edges().filter(|e| !e.is_reflexive()) {
			let (a, b) = frame.oriented(edge);
			if let (Some(pa), Some(pb), Some(arc)) = (frame.diagonal(a), frame.diagonal(b), frame.arc_control(a, b)) {
				draw_link(surface, style, (pa, pb), arc, 1.0);
			}
		}

		let radius = frame.cell * DIAGONAL_RADIUS;
		let alpha = alpha.at(t);
		for (i, (label, track)) in frame.labels.iter().zip(&self.tracks).enumerate() {
			draw_node(surface, frame.center(i, i), radius, node_color(scene, label), 1.0);
			draw_label(surface, style, label, track.row.point(t), TextAlign::End, alpha);
			draw_label(surface, style, label, track.column.point(t), TextAlign::Center, alpha);
		}
		Ok(())
	}
}
