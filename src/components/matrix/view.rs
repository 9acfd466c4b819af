use std::cell::{Ref, RefCell};
use std::rc::Rc;

use super::order::{LabelOrder, Swap};
use super::seriation::Seriation;
use crate::components::canvas::{Paint, Rect, StyleConfig, Surface, TextAlign};
use crate::components::pointer::{GesturePhase, PointerEvent};
use crate::error::{Error, Result};
use crate::geometry::Point;
use crate::graph::{Graph, Vertex};
use crate::timeline::{Ticker, TransitionScale};

/// Rows at least this similar to the dragged one are highlighted.
const SIMILAR_THRESHOLD: f64 = 0.75;

/// Which axis a label is dragged along.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Axis {
	/// Row labels, moving vertically.
	Row,
	/// Column labels, moving horizontally.
	Column,
}

#[derive(Clone, Debug)]
struct MatrixDrag {
	label: Vertex,
	axis: Axis,
	cursor: f64,
}

/// A swapped neighbour sliding into its new slot.
#[derive(Clone, Debug)]
struct Slide {
	label: Vertex,
	scale: TransitionScale,
	ticker: Ticker,
	duration: u32,
}

/// Interactive, reorderable adjacency matrix.
pub struct MatrixView {
	order: Rc<RefCell<LabelOrder>>,
	style: StyleConfig,
	slide_ticks: u32,
	drag: Option<MatrixDrag>,
	slides: Vec<Slide>,
}

impl MatrixView {
	/// Seed the order from `graph` and follow its vertex events.
	pub fn new(graph: &mut Graph, style: StyleConfig, slide_ticks: u32) -> Self {
		let order = Rc::new(RefCell::new(LabelOrder::from_graph(graph)));
		let weak = Rc::downgrade(&order);
		graph.subscribe(move |event| {
			if let Some(order) = weak.upgrade() {
				order.borrow_mut().apply(event);
			}
		});
		Self {
			order,
			style,
			slide_ticks,
			drag: None,
			slides: Vec::new(),
		}
	}

	/// Current label order.
	pub fn order(&self) -> Ref<'_, LabelOrder> {
		self.order.borrow()
	}

	fn cell_size(&self) -> f64 {
		self.style.cell_size(self.order.borrow().len())
	}

	fn axis_origin(&self, axis: Axis) -> f64 {
		let origin = self.style.matrix_origin();
		match axis {
			Axis::Row => origin.y,
			Axis::Column => origin.x,
		}
	}

	/// Label under `at` in the row or column margin.
	pub fn label_at(&self, at: Point) -> Option<(Vertex, Axis)> {
		let order = self.order.borrow();
		let (origin, size) = (self.style.matrix_origin(), self.cell_size());
		let labels = order.labels();
		let span = size * labels.len() as f64;
		// Rounding can put the far edge of the last slot at `len`.
		let slot = |offset: f64| {
			if offset < 0.0 || offset >= span {
				return None;
			}
			labels.get(((offset / size) as usize).min(labels.len() - 1))
		};
		if at.x < origin.x && at.y >= origin.y {
			let label = slot(at.y - origin.y)?;
			return Some((label.clone(), Axis::Row));
		}
		if at.y < origin.y && at.x >= origin.x {
			let label = slot(at.x - origin.x)?;
			return Some((label.clone(), Axis::Column));
		}
		None
	}

	/// Handle a label drag gesture; reports the swap a drag step caused.
	pub fn pointer(&mut self, event: &PointerEvent, axis: Axis) -> Result<Option<Swap>> {
		let coordinate = match axis {
			Axis::Row => event.position.y,
			Axis::Column => event.position.x,
		};
		match event.phase {
			GesturePhase::Start => {
				if self.order.borrow().index_of(&event.subject).is_none() {
					return Err(Error::UnknownLabel(event.subject.clone()));
				}
				self.drag = Some(MatrixDrag {
					label: event.subject.clone(),
					axis,
					cursor: coordinate,
				});
				Ok(None)
			}
			GesturePhase::Drag => {
				if let Some(drag) = &mut self.drag {
					drag.cursor = coordinate;
				}
				let (size, origin) = (self.cell_size(), self.axis_origin(axis));
				let swap = self
					.order
					.borrow_mut()
					.drag_step(&event.subject, coordinate, size, origin)?;
				if let Some(swap) = &swap {
					self.start_slide(swap, size, origin);
				}
				Ok(swap)
			}
			GesturePhase::End => {
				self.drag = None;
				Ok(None)
			}
		}
	}

	fn start_slide(&mut self, swap: &Swap, size: f64, origin: f64) {
		let center = |i: usize| origin + (i as f64 + 0.5) * size;
		let scale = TransitionScale::scalar(
			center(swap.dragged_index),
			center(swap.index),
			self.slide_ticks as f64,
		);
		self.slides.retain(|s| s.label != swap.label);
		self.slides.push(Slide {
			label: swap.label.clone(),
			scale,
			ticker: Ticker::default(),
			duration: self.slide_ticks,
		});
	}

	/// Seriate the order with `seriation`.
	pub fn auto_reorder(&mut self, graph: &Graph, seriation: &dyn Seriation) -> Result<()> {
		self.slides.clear();
		self.order.borrow_mut().auto_reorder(graph, seriation)
	}

	/// True while a label is being dragged.
	pub fn is_dragging(&self) -> bool {
		self.drag.is_some()
	}

	/// Advance slide animations by one frame.
	pub fn advance(&mut self) {
		for slide in &mut self.slides {
			if slide.ticker.tick() < slide.duration {
				slide.ticker.advance();
			}
		}
		self.slides.retain(|s| s.ticker.tick() < s.duration);
	}

	/// Center of `label` along `axis`, following drags and slides.
	pub fn label_center(&self, label: &str, index: usize, axis: Axis) -> f64 {
		if let Some(drag) = &self.drag {
			if drag.label == label && drag.axis == axis {
				return drag.cursor;
			}
		}
		if let Some(slide) = self.slides.iter().find(|s| s.label == label) {
			return slide.scale.x(slide.ticker.tick() as f64);
		}
		self.axis_origin(axis) + (index as f64 + 0.5) * self.cell_size()
	}

	/// Draw labels and cells; cells are rebuilt from the graph every call.
	pub fn render(&self, graph: &Graph, surface: &mut dyn Surface) -> Result<()> {
		let style = &self.style;
		surface.clear(style.background);
		let order = self.order.borrow();
		let labels = order.labels();
		let size = style.cell_size(labels.len());
		let origin = style.matrix_origin();

		let similar = match &self.drag {
			Some(drag) => order.similar_to(graph, &drag.label, SIMILAR_THRESHOLD)?,
			None => Vec::new(),
		};

		for cell in graph.to_drawing_instructions(labels) {
			let at = Point::new(
				self.label_center(&cell.column, cell.column_index, Axis::Column),
				self.label_center(&cell.row, cell.row_index, Axis::Row),
			);
			let color = if cell.value.is_some() {
				style.filled_cell_color
			} else {
				style.empty_cell_color
			};
			let mut paint = Paint::fill(color);
			if similar.contains(&cell.row) {
				paint.stroke = Some(style.highlight_color);
				paint.line_width = 1.0;
			}
			surface.draw_rounded_rect(Rect::centered(at, size * style.cell_fill), 0.0, &paint);
		}

		let text = Paint::fill(style.label_color);
		let highlight = Paint::fill(style.highlight_color);
		for (i, label) in labels.iter().enumerate() {
			let paint = if similar.contains(label) { &highlight } else { &text };
			let row = Point::new(origin.x - style.label_gap, self.label_center(label, i, Axis::Row));
			surface.draw_text(label, row, style.font_size, TextAlign::End, paint);
			let column = Point::new(self.label_center(label, i, Axis::Column), origin.y - style.label_gap);
			surface.draw_text(label, column, style.font_size, TextAlign::Center, paint);
		}
		Ok(())
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::components::canvas::{CellSizing, DrawOp, RecordingSurface};
	use crate::graph::Edge;

	fn setup() -> (Graph, MatrixView) {
		let mut g = Graph::new(
			["1", "2", "3", "4"],
			[Edge::new("1", "2"), Edge::new("2", "3"), Edge::new("3", "4")],
		)
		.unwrap();
		let style = StyleConfig {
			cell_size: CellSizing::Fixed(20.0),
			margin: 40.0,
			..StyleConfig::default()
		};
		let view = MatrixView::new(&mut g, style, 4);
		(g, view)
	}

	#[test]
	fn hit_tests_row_and_column_labels() {
		let (_, view) = setup();
		assert_eq!(view.label_at(Point::new(10.0, 45.0)), Some(("1".into(), Axis::Row)));
		assert_eq!(view.label_at(Point::new(85.0, 10.0)), Some(("3".into(), Axis::Column)));
		assert_eq!(view.label_at(Point::new(10.0, 500.0)), None);
		assert_eq!(view.label_at(Point::new(100.0, 100.0)), None);
	}

	#[test]
	fn far_edge_of_the_last_slot_hits_the_last_label() {
		let mut g = Graph::new(["1", "2", "3"], [Edge::new("1", "2"), Edge::new("2", "3")]).unwrap();
		let style = StyleConfig {
			cell_size: CellSizing::Fixed(1.1781),
			margin: 0.0,
			..StyleConfig::default()
		};
		let view = MatrixView::new(&mut g, style, 4);
		// One ulp below the matrix span of 3 * 1.1781.
		let edge = 3.5342999999999996;
		assert_eq!(view.label_at(Point::new(-1.0, edge)), Some(("3".into(), Axis::Row)));
		assert_eq!(view.label_at(Point::new(edge, -1.0)), Some(("3".into(), Axis::Column)));
		assert_eq!(view.label_at(Point::new(-1.0, 3.6)), None);
	}

	#[test]
	fn swapped_neighbor_slides_into_the_vacated_slot() {
		let (_, mut view) = setup();
		let start = PointerEvent::new("1", Point::new(10.0, 50.0), GesturePhase::Start);
		view.pointer(&start, Axis::Row).unwrap();
		let drag = PointerEvent::new("1", Point::new(10.0, 70.0), GesturePhase::Drag);
		let swap = view.pointer(&drag, Axis::Row).unwrap().unwrap();
		assert_eq!(swap.label, "2");

		// "2" starts where "1" now is and ends in slot 0.
		assert_eq!(view.label_center("2", 0, Axis::Row), 70.0);
		for _ in 0..4 {
			view.advance();
		}
		assert_eq!(view.label_center("2", 0, Axis::Row), 50.0);
		// The dragged label follows the cursor on its axis only.
		assert_eq!(view.label_center("1", 1, Axis::Row), 70.0);
		assert_eq!(view.label_center("1", 1, Axis::Column), 70.0);
	}

	#[test]
	fn renders_a_cell_per_pair_and_two_labels_per_vertex() {
		let (g, view) = setup();
		let mut surface = RecordingSurface::default();
		view.render(&g, &mut surface).unwrap();
		let cells = surface
			.frame()
			.iter()
			.filter(|op| matches!(op, DrawOp::RoundedRect { .. }))
			.count();
		assert_eq!(cells, 16);
		assert_eq!(surface.texts().len(), 8);
	}

	#[test]
	fn follows_vertex_additions() {
		let (mut g, view) = setup();
		g.add_vertex("5").unwrap();
		assert_eq!(view.order().labels(), ["1", "2", "3", "4", "5"]);
	}
}
