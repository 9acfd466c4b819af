//! The five phases that morph a force layout into a matrix.
//!
//! Every phase follows the same lifecycle: `prepare` once on entry (builds
//! its scales and resets its ticker), `play` once per frame (draws from the
//! current tick and owned state only), `step` once per frame after drawing
//! (advances the ticker and, for the physics phases, the simulation), and
//! `finish` once on exit (stops the physics and hands the final layout to
//! the next phase through the [`Scene`]).

mod add_nodes;
mod cell_merge;
mod force_directed;
mod labels;
mod node_to_matrix;
mod physics;

use std::fmt;

use indexmap::IndexMap;

pub use add_nodes::AddMoreNodes;
pub use cell_merge::CellMerge;
pub use force_directed::ForceDirected;
pub use labels::LabelGeneration;
pub use node_to_matrix::NodeToMatrix;

use super::scene::Scene;
use crate::components::canvas::{Paint, Rect, StyleConfig, Surface, TextAlign};
use crate::components::pointer::PointerEvent;
use crate::error::{Error, Result};
use crate::geometry::{Color, Point, control_point};
use crate::graph::{Edge, Vertex};
use crate::timeline::Ticker;

/// Names of the phases, in playing order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PhaseKind {
	/// Free physics layout; nodes can be dragged.
	ForceDirected,
	/// Supplementary nodes join and settle.
	AddMoreNodes,
	/// Nodes travel to the matrix diagonal.
	NodeToMatrix,
	/// Each node splits into a row and a column label.
	LabelGeneration,
	/// Nodes and links give way to matrix cells.
	CellMerge,
}

impl fmt::Display for PhaseKind {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(match self {
			Self::ForceDirected => "force-directed",
			Self::AddMoreNodes => "add-more-nodes",
			Self::NodeToMatrix => "node-to-matrix",
			Self::LabelGeneration => "label-generation",
			Self::CellMerge => "cell-merge",
		})
	}
}

/// Ticker, duration and prepared flag common to every phase.
#[derive(Clone, Debug, Default)]
pub struct Lifecycle {
	ticker: Ticker,
	duration: u32,
	prepared: bool,
}

impl Lifecycle {
	fn begin(&mut self, duration: u32) {
		self.ticker.reset();
		self.duration = duration;
		self.prepared = true;
	}

	fn end(&mut self) {
		self.prepared = false;
	}

	fn advance(&mut self) {
		if self.ticker.tick() < self.duration {
			self.ticker.advance();
		}
	}

	fn t(&self) -> f64 {
		self.ticker.tick() as f64
	}

	fn check(&self, kind: PhaseKind) -> Result<()> {
		if self.prepared {
			Ok(())
		} else {
			Err(Error::PhaseNotPrepared(kind))
		}
	}

	/// Current tick.
	pub fn tick(&self) -> u32 {
		self.ticker.tick()
	}

	/// Length of the phase in ticks.
	pub fn duration(&self) -> u32 {
		self.duration
	}

	/// True between `prepare` and `finish`.
	pub fn is_prepared(&self) -> bool {
		self.prepared
	}

	/// The ticker has reached the duration; zero-length phases start complete.
	pub fn is_complete(&self) -> bool {
		self.ticker.tick() >= self.duration
	}
}

/// One stage of the morph, dispatched over a closed set of kinds.
#[derive(Debug)]
pub enum Phase {
	/// See [`ForceDirected`].
	ForceDirected(ForceDirected),
	/// See [`AddMoreNodes`].
	AddMoreNodes(AddMoreNodes),
	/// See [`NodeToMatrix`].
	NodeToMatrix(NodeToMatrix),
	/// See [`LabelGeneration`].
	LabelGeneration(LabelGeneration),
	/// See [`CellMerge`].
	CellMerge(CellMerge),
}

impl Phase {
	/// All five phases, in the order they always play.
	pub fn sequence() -> Vec<Phase> {
		vec![
			Phase::ForceDirected(ForceDirected::default()),
			Phase::AddMoreNodes(AddMoreNodes::default()),
			Phase::NodeToMatrix(NodeToMatrix::default()),
			Phase::LabelGeneration(LabelGeneration::default()),
			Phase::CellMerge(CellMerge::default()),
		]
	}

	/// Which phase this is.
	pub fn kind(&self) -> PhaseKind {
		match self {
			Phase::ForceDirected(_) => PhaseKind::ForceDirected,
			Phase::AddMoreNodes(_) => PhaseKind::AddMoreNodes,
			Phase::NodeToMatrix(_) => PhaseKind::NodeToMatrix,
			Phase::LabelGeneration(_) => PhaseKind::LabelGeneration,
			Phase::CellMerge(_) => PhaseKind::CellMerge,
		}
	}

	/// Ticker, duration and prepared state.
	pub fn lifecycle(&self) -> &Lifecycle {
		match self {
			Phase::ForceDirected(p) => &p.life,
			Phase::AddMoreNodes(p) => &p.life,
			Phase::NodeToMatrix(p) => &p.life,
			Phase::LabelGeneration(p) => &p.life,
			Phase::CellMerge(p) => &p.life,
		}
	}

	fn lifecycle_mut(&mut self) -> &mut Lifecycle {
		match self {
			Phase::ForceDirected(p) => &mut p.life,
			Phase::AddMoreNodes(p) => &mut p.life,
			Phase::NodeToMatrix(p) => &mut p.life,
			Phase::LabelGeneration(p) => &mut p.life,
			Phase::CellMerge(p) => &mut p.life,
		}
	}

	/// Enter the phase: build scales and reset the ticker.
	pub fn prepare(&mut self, scene: &mut Scene) -> Result<()> {
		match self {
			Phase::ForceDirected(p) => p.prepare(scene),
			Phase::AddMoreNodes(p) => p.prepare(scene),
			Phase::NodeToMatrix(p) => p.prepare(scene),
			Phase::LabelGeneration(p) => p.prepare(scene),
			Phase::CellMerge(p) => p.prepare(scene),
		}
	}

	/// Draw the current frame.
	pub fn play(&self, scene: &Scene, surface: &mut dyn Surface) -> Result<()> {
		self.lifecycle().check(self.kind())?;
		match self {
			Phase::ForceDirected(p) => p.play(scene, surface),
			Phase::AddMoreNodes(p) => p.play(scene, surface),
			Phase::NodeToMatrix(p) => p.play(scene, surface),
			Phase::LabelGeneration(p) => p.play(scene, surface),
			Phase::CellMerge(p) => p.play(scene, surface),
		}
	}

	/// Advance one frame.
	pub fn step(&mut self, scene: &mut Scene) {
		if !self.lifecycle().is_prepared() {
			return;
		}
		self.lifecycle_mut().advance();
		if self.is_interactive() {
			physics::step(scene);
		}
	}

	/// Leave the phase, stopping any physics.
	pub fn finish(&mut self, scene: &mut Scene) {
		if self.is_interactive() {
			physics::finish(scene);
		} else {
			scene.simulation_mut().stop();
		}
		self.lifecycle_mut().end();
	}

	/// Route a drag gesture; only the physics phases react.
	pub fn pointer(&mut self, scene: &mut Scene, event: &PointerEvent) {
		if self.is_interactive() && self.lifecycle().is_prepared() {
			physics::pointer(scene, event);
		}
	}

	/// True for the phases whose nodes can be dragged.
	pub fn is_interactive(&self) -> bool {
		matches!(self, Phase::ForceDirected(_) | Phase::AddMoreNodes(_))
	}
}

/// Where the matrix puts each label, for the current order.
#[derive(Clone, Debug)]
struct MatrixFrame {
	labels: Vec<Vertex>,
	slots: IndexMap<Vertex, usize>,
	cell: f64,
	origin: Point,
	gap: f64,
	curvature: f64,
}

impl MatrixFrame {
	fn new(scene: &Scene) -> Self {
		let labels = scene.labels();
		let style = &scene.config.style;
		Self {
			slots: labels.iter().enumerate().map(|(i, l)| (l.clone(), i)).collect(),
			cell: style.cell_size(labels.len()),
			origin: style.matrix_origin(),
			gap: style.label_gap,
			curvature: style.curvature,
			labels,
		}
	}

	fn center(&self, row: usize, column: usize) -> Point {
		Point::new(
			self.origin.x + (column as f64 + 0.5) * self.cell,
			self.origin.y + (row as f64 + 0.5) * self.cell,
		)
	}

	fn diagonal(&self, v: &str) -> Option<Point> {
		self.slots.get(v).map(|&i| self.center(i, i))
	}

	fn row_label(&self, i: usize) -> Point {
		Point::new(self.origin.x - self.gap, self.center(i, i).y)
	}

	fn column_label(&self, i: usize) -> Point {
		Point::new(self.center(i, i).x, self.origin.y - self.gap)
	}

	/// Endpoints with the lower matrix slot first, so every arc bends the same way.
	fn oriented<'e>(&self, e: &'e Edge) -> (&'e str, &'e str) {
		let slot = |v: &str| self.slots.get(v).copied().unwrap_or(usize::MAX);
		if slot(&e.source) <= slot(&e.target) {
			(&e.source, &e.target)
		} else {
			(&e.target, &e.source)
		}
	}

	fn arc_control(&self, a: &str, b: &str) -> Option<Point> {
		Some(control_point(self.diagonal(a)?, self.diagonal(b)?, self.curvature))
	}
}

/// Supplementary vertices keep their highlight through every phase.
fn node_color(scene: &Scene, v: &str) -> Color {
	let style = &scene.config.style;
	if scene.is_supplementary(v) {
		style.highlight_color
	} else {
		style.node_color
	}
}

fn draw_node(surface: &mut dyn Surface, at: Point, radius: f64, color: Color, alpha: f64) {
	if radius <= 0.0 {
		return;
	}
	let paint = Paint::fill(color).faded(alpha);
	surface.draw_rounded_rect(Rect::centered(at, radius * 2.0), radius, &paint);
}

fn draw_link(surface: &mut dyn Surface, style: &StyleConfig, ends: (Point, Point), control: Point, alpha: f64) {
	let paint = Paint::stroke(style.link_color, style.link_width).faded(alpha);
	surface.draw_curve(ends.0, control, ends.1, &paint);
}

fn draw_label(surface: &mut dyn Surface, style: &StyleConfig, text: &str, at: Point, align: TextAlign, alpha: f64) {
	if alpha <= 0.0 {
		return;
	}
	let paint = Paint::fill(style.label_color).faded(alpha);
	surface.draw_text(text, at, style.font_size, align, &paint);
}
