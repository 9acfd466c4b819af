use std::cell::{Ref, RefCell, RefMut};
use std::rc::Rc;

use log::debug;

use crate::components::canvas::MorphConfig;
use crate::components::force_graph::{PositionSnapshot, Simulation};
use crate::components::matrix::LabelOrder;
use crate::error::Result;
use crate::graph::{Edge, Graph, Vertex};

/// State shared by all phases of one scenario.
///
/// The graph is the source of truth; the simulation and the label order
/// follow it through graph events. `layout_required` and `snapshot` are the
/// hand-off between consecutive phases: a phase that ends a physics run
/// records where every node came to rest, and the next phase either resumes
/// from that snapshot or, if `layout_required` is set, computes one first.
pub struct Scene {
	/// The graph being morphed.
	pub graph: Graph,
	/// Set when no usable layout exists yet.
	pub layout_required: bool,
	/// Node positions at the end of the last physics phase.
	pub snapshot: Option<PositionSnapshot>,
	/// Style, timing and supplementary data.
	pub config: MorphConfig,
	simulation: Rc<RefCell<Simulation>>,
	order: Rc<RefCell<LabelOrder>>,
	base_vertices: Vec<Vertex>,
	base_edges: Vec<Edge>,
}

impl Scene {
	/// Wire a simulation and a label order to `graph`.
	pub fn new(mut graph: Graph, config: MorphConfig) -> Self {
		let simulation = Rc::new(RefCell::new(Simulation::new(
			&graph,
			config.style.center(),
			config.seed,
		)));
		let order = Rc::new(RefCell::new(LabelOrder::from_graph(&graph)));

		let (sim, ord) = (Rc::downgrade(&simulation), Rc::downgrade(&order));
		graph.subscribe(move |event| {
			if let Some(sim) = sim.upgrade() {
				sim.borrow_mut().apply(event);
			}
			if let Some(ord) = ord.upgrade() {
				ord.borrow_mut().apply(event);
			}
		});

		Self {
			base_vertices: graph.vertices().cloned().collect(),
			base_edges: graph.edges().cloned().collect(),
			graph,
			layout_required: true,
			snapshot: None,
			config,
			simulation,
			order,
		}
	}

	/// The force simulation.
	pub fn simulation(&self) -> Ref<'_, Simulation> {
		self.simulation.borrow()
	}

	/// The force simulation, mutably.
	pub fn simulation_mut(&self) -> RefMut<'_, Simulation> {
		self.simulation.borrow_mut()
	}

	/// The matrix label order.
	pub fn order(&self) -> Ref<'_, LabelOrder> {
		self.order.borrow()
	}

	/// Matrix labels as an owned list.
	pub fn labels(&self) -> Vec<Vertex> {
		self.order.borrow().labels().to_vec()
	}

	/// True if `v` was not part of the scenario's starting graph.
	pub fn is_supplementary(&self, v: &str) -> bool {
		!self.base_vertices.iter().any(|b| b == v)
	}

	/// Add the configured supplementary vertices and edges.
	pub fn extend(&mut self) -> Result<()> {
		let supplement = self.config.supplement.clone();
		for node in &supplement.nodes {
			if !self.graph.has_vertex(&node.id) {
				self.graph.add_vertex(node.id.clone())?;
			}
		}
		for edge in supplement.edges() {
			self.graph.add_edge(edge)?;
		}
		Ok(())
	}

	/// Undo every edit since construction, through the graph's event channel.
	pub fn restore_base(&mut self) -> Result<()> {
		let extra_edges: Vec<Edge> = self
			.graph
			.edges()
			.filter(|e| !self.base_edges.contains(e))
			.cloned()
			.collect();
		for e in &extra_edges {
			self.graph.remove_edge(e);
		}
		let extra_vertices: Vec<Vertex> = self
			.graph
			.vertices()
			.filter(|v| !self.base_vertices.contains(v))
			.cloned()
			.collect();
		for v in &extra_vertices {
			self.graph.remove_vertex(v)?;
		}
		for v in &self.base_vertices {
			if !self.graph.has_vertex(v) {
				self.graph.add_vertex(v.clone())?;
			}
		}
		for e in &self.base_edges {
			self.graph.add_edge(e.clone())?;
		}
		debug!(
			"scene: restored base graph ({} extra vertices, {} extra edges removed)",
			extra_vertices.len(),
			extra_edges.len()
		);
		Ok(())
	}
}
