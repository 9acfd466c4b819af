use log::debug;

use super::node_to_matrix::DIAGONAL_RADIUS;
use super::{Lifecycle, MatrixFrame, draw_label, draw_link, draw_node, node_color};
use crate::components::canvas::{Paint, Rect, Surface, TextAlign};
use crate::components::morph::scene::Scene;
use crate::error::Result;
use crate::timeline::{
	AnimationScale, animation_scale, ease_in_out_cubic, ease_out_cubic, timeline_slices,
};

#[derive(Clone, Debug)]
struct MergeScales {
	/// Diagonal nodes and links fade out.
	diagonal_alpha: AnimationScale,
	/// Connected cells grow from nothing.
	filled_size: AnimationScale,
	/// Corner radius as a fraction of the side: circle to square.
	filled_roundness: AnimationScale,
	/// Disconnected cells grow and fade in last.
	empty_size: AnimationScale,
	empty_alpha: AnimationScale,
}

/// Nodes and links give way to square matrix cells.
///
/// The phase is split into consecutive windows at the configured breakpoints:
/// the diagonal fades, then connected cells grow, then empty cells appear.
#[derive(Debug, Default)]
pub struct CellMerge {
	pub(super) life: Lifecycle,
	frame: Option<MatrixFrame>,
	scales: Option<MergeScales>,
}

impl CellMerge {
	pub(super) fn prepare(&mut self, scene: &mut Scene) -> Result<()> {
		scene.simulation_mut().stop();
		let timing = &scene.config.timing;
		let slices = timeline_slices(&timing.merge_breakpoints)?;
		let window = |i: usize| slices.get(i).or(slices.last()).copied().unwrap_or([0.0, 1.0]);
		let (diagonal, filled, empty) = (window(0), window(1), window(2));

		let frame = MatrixFrame::new(scene);
		let d = timing.cell_merge_ticks as f64;
		let side = frame.cell * scene.config.style.cell_fill;
		self.scales = Some(MergeScales {
			diagonal_alpha: animation_scale(diagonal, d, &[1.0, 0.0], Some(ease_in_out_cubic)),
			filled_size: animation_scale(filled, d, &[0.0, side], Some(ease_out_cubic)),
			filled_roundness: animation_scale(filled, d, &[0.5, 0.0], Some(ease_in_out_cubic)),
			empty_size: animation_scale(empty, d, &[0.0, side], Some(ease_out_cubic)),
			empty_alpha: animation_scale(empty, d, &[0.0, 1.0], Some(ease_in_out_cubic)),
		});
		debug!("cell-merge: windows {diagonal:?} {filled:?} {empty:?}");
		self.frame = Some(frame);
		self.life.begin(timing.cell_merge_ticks);
		Ok(())
	}

	pub(super) fn play(&self, scene: &Scene, surface: &mut dyn Surface) -> Result<()> {
		let (Some(frame), Some(scales)) = (&self.frame, &self.scales) else {
			return Ok(());
		};
		let style = &scene.config.style;
		let t = self.life.t();

		let filled = scales.filled_size.at(t);
		let roundness = scales.filled_roundness.at(t);
		let empty = scales.empty_size.at(t);
		let empty_paint = Paint::fill(style.empty_cell_color).faded(scales.empty_alpha.at(t));
		let filled_paint = Paint::fill(style.filled_cell_color);
		for cell in scene.graph.to_drawing_instructions(&frame.labels) {
			let center = frame.center(cell.row_index, cell.column_index);
			let (side, radius, paint) = match cell.value {
				Some(_) => (filled, filled * roundness, &filled_paint),
				None => (empty, 0.0, &empty_paint),
			};
			if side > 0.0 && !paint.is_invisible() {
				surface.draw_rounded_rect(Rect::centered(center, side), radius, paint);
			}
		}

		let fade = scales.diagonal_alpha.at(t);
		if fade > 0.0 {
			for edge in scene.graph.edges().filter(|e| !e.is_reflexive()) {
				let (a, b) = frame.oriented(edge);
				if let (Some(pa), Some(pb), Some(arc)) = (frame.diagonal(a), frame.diagonal(b), frame.arc_control(a, b)) {
					draw_link(surface, style, (pa, pb), arc, fade);
				}
			}
			let radius = frame.cell * DIAGONAL_RADIUS;
			for (i, label) in frame.labels.iter().enumerate() {
				draw_node(surface, frame.center(i, i), radius, node_color(scene, label), fade);
			}
		}

		for (i, label) in frame.labels.iter().enumerate() {
			draw_label(surface, style, label, frame.row_label(i), TextAlign::End, 1.0);
			draw_label(surface, style, label, frame.column_label(i), TextAlign::Center, 1.0);
		}
		Ok(())
	}
}
