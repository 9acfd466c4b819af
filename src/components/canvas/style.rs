use serde::Deserialize;

use crate::components::force_graph::GraphData;
use crate::error::Result;
use crate::geometry::{Color, Point};

/// How big one matrix cell is.
#[derive(Clone, Copy, Debug, PartialEq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CellSizing {
	/// Fixed side length in pixels.
	Fixed(f64),
	/// Divide the frame (less margins) by the vertex count.
	Fit,
}

/// Read-only drawing configuration supplied by the host.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct StyleConfig {
	/// Frame width.
	pub width: f64,
	/// Frame height.
	pub height: f64,
	/// Frame background.
	pub background: Color,
	/// Node circle radius in the node-link view.
	pub node_radius: f64,
	/// Pointer hit radius around a node.
	pub hit_radius: f64,
	/// Node fill.
	pub node_color: Color,
	/// Link stroke.
	pub link_color: Color,
	/// Link stroke width.
	pub link_width: f64,
	/// Control-point offset as a fraction of link length.
	pub curvature: f64,
	/// Label text colour.
	pub label_color: Color,
	/// Label font size.
	pub font_size: f64,
	/// Label font family.
	pub font_family: String,
	/// Space left of and above the matrix for labels.
	pub margin: f64,
	/// Gap between a label and the matrix edge.
	pub label_gap: f64,
	/// Connected cell fill.
	pub filled_cell_color: Color,
	/// Disconnected cell fill.
	pub empty_cell_color: Color,
	/// Tint for rows similar to the dragged one.
	pub highlight_color: Color,
	/// Cell sizing rule.
	pub cell_size: CellSizing,
	/// Fraction of a cell covered by its square.
	pub cell_fill: f64,
}

impl Default for StyleConfig {
	fn default() -> Self {
		Self {
			width: 720.0,
			height: 720.0,
			background: Color::rgb(0x1a, 0x1a, 0x2e),
			node_radius: 10.0,
			hit_radius: 12.0,
			node_color: Color::rgb(0x1f, 0x77, 0xb4),
			link_color: Color::rgb(100, 180, 255),
			link_width: 1.5,
			curvature: 0.2,
			label_color: Color::rgb(255, 255, 255),
			font_size: 12.0,
			font_family: "sans-serif".into(),
			margin: 60.0,
			label_gap: 8.0,
			filled_cell_color: Color::rgb(0xff, 0x7f, 0x0e),
			empty_cell_color: Color::rgb(0x2a, 0x2a, 0x40),
			highlight_color: Color::rgb(0x2c, 0xa0, 0x2c),
			cell_size: CellSizing::Fit,
			cell_fill: 0.9,
		}
	}
}

impl StyleConfig {
	/// Side of one cell for an `n` x `n` matrix.
	pub fn cell_size(&self, n: usize) -> f64 {
		match self.cell_size {
			CellSizing::Fixed(size) => size,
			CellSizing::Fit => {
				let available = (self.width.min(self.height) - 2.0 * self.margin).max(1.0);
				available / n.max(1) as f64
			}
		}
	}

	/// Top-left corner of the matrix.
	pub fn matrix_origin(&self) -> Point {
		Point::new(self.margin, self.margin)
	}

	/// Center of cell `(row, column)` in an `n` x `n` matrix.
	pub fn cell_center(&self, row: usize, column: usize, n: usize) -> Point {
		let (origin, size) = (self.matrix_origin(), self.cell_size(n));
		Point::new(
			origin.x + (column as f64 + 0.5) * size,
			origin.y + (row as f64 + 0.5) * size,
		)
	}

	/// Center of the frame.
	pub fn center(&self) -> Point {
		Point::new(self.width / 2.0, self.height / 2.0)
	}
}

/// Phase durations, in ticks (frames).
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct TimingConfig {
	/// Upper bound on the free force layout.
	pub force_ticks: u32,
	/// Upper bound on settling the supplementary nodes.
	pub add_nodes_ticks: u32,
	/// Node-to-matrix morph.
	pub node_to_matrix_ticks: u32,
	/// Label split and slide.
	pub label_ticks: u32,
	/// Cell merge.
	pub cell_merge_ticks: u32,
	/// Breakpoints splitting the cell merge into sub-transitions.
	pub merge_breakpoints: Vec<f64>,
	/// Neighbour slide after a drag swap in the matrix view.
	pub swap_slide_ticks: u32,
}

impl Default for TimingConfig {
	fn default() -> Self {
		Self {
			force_ticks: 300,
			add_nodes_ticks: 300,
			node_to_matrix_ticks: 90,
			label_ticks: 60,
			cell_merge_ticks: 120,
			merge_breakpoints: vec![0.3, 0.7],
			swap_slide_ticks: 12,
		}
	}
}

/// Everything a scene needs besides the graph itself.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct MorphConfig {
	/// Drawing style.
	pub style: StyleConfig,
	/// Phase timing.
	pub timing: TimingConfig,
	/// Seed for the initial layout.
	pub seed: u64,
	/// Vertices and edges added by the add-more-nodes phase.
	pub supplement: GraphData,
}

impl MorphConfig {
	/// Parse a (possibly partial) JSON object; missing keys take defaults.
	pub fn from_json(json: &str) -> Result<Self> {
		Ok(serde_json::from_str(json)?)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn partial_json_fills_in_defaults() {
		let cfg = MorphConfig::from_json(
			r##"{
				"seed": 9,
				"style": { "node_color": "#ff0000", "cell_size": { "fixed": 20 } },
				"timing": { "label_ticks": 5 },
				"supplement": { "nodes": [{ "id": "x" }] }
			}"##,
		)
		.unwrap();
		assert_eq!(cfg.seed, 9);
		assert_eq!(cfg.style.node_color, Color::rgb(255, 0, 0));
		assert_eq!(cfg.style.cell_size(100), 20.0);
		assert_eq!(cfg.style.margin, StyleConfig::default().margin);
		assert_eq!(cfg.timing.label_ticks, 5);
		assert_eq!(cfg.timing.merge_breakpoints, vec![0.3, 0.7]);
		assert_eq!(cfg.supplement.nodes[0].id, "x");
	}

	#[test]
	fn invalid_colors_are_config_errors() {
		assert!(MorphConfig::from_json(r#"{ "style": { "background": "blue" } }"#).is_err());
	}

	#[test]
	fn fit_sizing_divides_the_frame() {
		let style = StyleConfig::default();
		assert_eq!(style.cell_size(6), 100.0);
		assert_eq!(style.cell_center(0, 1, 6), Point::new(210.0, 110.0));
	}
}
