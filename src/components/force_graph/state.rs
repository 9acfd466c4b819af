use std::f64::consts::PI;

use force_graph::{DefaultNodeIdx, EdgeData, ForceGraph, NodeData, SimulationParameters};
use indexmap::IndexMap;
use log::debug;

use super::types::{PositionSnapshot, PositionedLink, PositionedVertex};
use crate::geometry::Point;
use crate::graph::{Edge, Graph, GraphEvent, Vertex};

/// Seconds of physics per frame at full heat.
const FRAME_DT: f64 = 0.016;
const ALPHA_DECAY: f64 = 0.0228;
const ALPHA_MIN: f64 = 0.001;
const ALPHA_REHEAT: f64 = 0.3;
const ENERGY_MIN: f64 = 1e-4;
const SEED_RADIUS: f64 = 100.0;

fn parameters() -> SimulationParameters {
	SimulationParameters {
		force_charge: 150.0,
		force_spring: 0.05,
		force_max: 100.0,
		node_speed: 3000.0,
		damping_factor: 0.9,
	}
}

/// Simple pseudo-random number generator (deterministic for a given seed).
fn rand_simple(seed: u64) -> f64 {
	let x = (seed.wrapping_add(1).wrapping_mul(9301).wrapping_add(49297)) % 233280;
	(x as f64) / 233280.0
}

/// Payload carried by each physics node.
#[derive(Clone, Debug, Default)]
pub struct NodeInfo {
	/// Vertex id.
	pub id: Vertex,
}

/// Positioned mirror of a [`Graph`] advanced by a force model.
///
/// Charge repulsion and spring attraction come from `force_graph`; a
/// centering pass keeps the layout on the frame center. Heat (`alpha`)
/// decays every tick so the layout always comes to rest.
pub struct Simulation {
	graph: ForceGraph<NodeInfo, ()>,
	nodes: IndexMap<Vertex, DefaultNodeIdx>,
	links: Vec<Edge>,
	center: Point,
	seed: u64,
	alpha: f64,
	energy: f64,
	running: bool,
}

impl Simulation {
	/// Mirror `graph` with seeded initial positions around `center`.
	pub fn new(graph: &Graph, center: Point, seed: u64) -> Self {
		let mut sim = Self {
			graph: ForceGraph::new(parameters()),
			nodes: IndexMap::new(),
			links: Vec::new(),
			center,
			seed,
			alpha: 1.0,
			energy: f64::INFINITY,
			running: true,
		};
		for v in graph.vertices() {
			sim.add_node(v);
		}
		for e in graph.edges() {
			sim.add_link(e);
		}
		sim
	}

	fn seeded_position(&self, slot: usize, count: usize) -> Point {
		let angle = (slot as f64) * 2.0 * PI / count.max(1) as f64;
		let jitter = rand_simple(self.seed.wrapping_add(slot as u64)) - 0.5;
		let radius = SEED_RADIUS * (1.0 + 0.2 * jitter);
		Point::new(
			self.center.x + radius * angle.cos(),
			self.center.y + radius * angle.sin(),
		)
	}

	fn insert_node(&mut self, id: &str, at: Point, anchored: bool) {
		let idx = self.graph.add_node(NodeData {
			x: at.x as f32,
			y: at.y as f32,
			mass: 10.0,
			is_anchor: anchored,
			user_data: NodeInfo { id: id.into() },
		});
		self.nodes.insert(id.into(), idx);
	}

	fn insert_link(&mut self, edge: &Edge) {
		// A self-link carries no force, and force_graph cannot borrow one node twice.
		if edge.is_reflexive() {
			return;
		}
		if let (Some(&a), Some(&b)) = (self.nodes.get(&edge.source), self.nodes.get(&edge.target)) {
			self.graph.add_edge(a, b, EdgeData::default());
		}
	}

	/// Add a node; returns false if it is already mirrored.
	pub fn add_node(&mut self, id: &str) -> bool {
		if self.nodes.contains_key(id) {
			return false;
		}
		let slot = self.nodes.len();
		let at = self.seeded_position(slot, slot + 1);
		self.insert_node(id, at, false);
		true
	}

	/// Remove a node and its links.
	pub fn remove_node(&mut self, id: &str) -> bool {
		if !self.nodes.contains_key(id) {
			return false;
		}
		let mut positions = self.snapshot();
		positions.shift_remove(id);
		self.links.retain(|l| !l.touches(id));
		self.rebuild(&positions);
		true
	}

	/// Add a link between mirrored nodes; returns false if it is missing an endpoint or already present.
	pub fn add_link(&mut self, edge: &Edge) -> bool {
		if !self.nodes.contains_key(&edge.source) || !self.nodes.contains_key(&edge.target) {
			return false;
		}
		if self.links.contains(edge) {
			return false;
		}
		self.insert_link(edge);
		self.links.push(edge.clone());
		true
	}

	/// Remove a link; the physics graph is rebuilt in place.
	pub fn remove_link(&mut self, edge: &Edge) -> bool {
		let before = self.links.len();
		self.links.retain(|l| l != edge);
		if self.links.len() == before {
			return false;
		}
		let positions = self.snapshot();
		self.rebuild(&positions);
		true
	}

	fn rebuild(&mut self, positions: &PositionSnapshot) {
		let anchored: Vec<Vertex> = self.vertices().into_iter().filter(|v| v.fixed).map(|v| v.id).collect();
		self.graph = ForceGraph::new(parameters());
		self.nodes.clear();
		for (id, at) in positions {
			self.insert_node(id, *at, anchored.contains(id));
		}
		let links = std::mem::take(&mut self.links);
		for l in &links {
			self.insert_link(l);
		}
		self.links = links;
	}

	/// Re-seed positions and restart the physics.
	///
	/// Without a snapshot every node is placed from scratch. With one, known
	/// nodes resume from their recorded position and new nodes start at the
	/// centroid of their already-placed neighbours.
	pub fn layout(&mut self, snapshot: Option<&PositionSnapshot>) {
		let ids: Vec<Vertex> = self.nodes.keys().cloned().collect();
		let count = ids.len();
		let mut positions = PositionSnapshot::new();
		match snapshot {
			None => {
				for (slot, id) in ids.iter().enumerate() {
					positions.insert(id.clone(), self.seeded_position(slot, count));
				}
			}
			Some(prior) => {
				let known: PositionSnapshot = ids
					.iter()
					.filter_map(|id| prior.get(id).map(|at| (id.clone(), *at)))
					.collect();
				for (slot, id) in ids.iter().enumerate() {
					let at = match known.get(id) {
						Some(&at) => at,
						None => self
							.neighbor_centroid(id, &known)
							.map(|c| {
								let jitter = rand_simple(self.seed.wrapping_add(slot as u64)) - 0.5;
								Point::new(c.x + 20.0 * jitter, c.y + 20.0 * (0.5 - jitter.abs()))
							})
							.unwrap_or_else(|| self.seeded_position(slot, count)),
					};
					positions.insert(id.clone(), at);
				}
			}
		}
		self.rebuild(&positions);
		debug!("simulation: layout of {count} nodes (from snapshot: {})", snapshot.is_some());
		self.alpha = 1.0;
		self.energy = f64::INFINITY;
		self.running = true;
	}

	fn neighbor_centroid(&self, id: &str, placed: &PositionSnapshot) -> Option<Point> {
		let near: Vec<Point> = self
			.links
			.iter()
			.filter(|l| l.touches(id) && !l.is_reflexive())
			.filter_map(|l| {
				let other = if l.source == id { &l.target } else { &l.source };
				placed.get(other).copied()
			})
			.collect();
		if near.is_empty() {
			return None;
		}
		let n = near.len() as f64;
		Some(Point::new(
			near.iter().map(|p| p.x).sum::<f64>() / n,
			near.iter().map(|p| p.y).sum::<f64>() / n,
		))
	}

	/// Advance one frame; returns false once the layout has come to rest.
	pub fn tick(&mut self) -> bool {
		if !self.running {
			return false;
		}
		let before = self.snapshot();
		self.graph.update((FRAME_DT * self.alpha) as f32);
		self.recenter();
		let after = self.snapshot();
		self.energy = before
			.iter()
			.zip(after.values())
			.map(|((_, a), b)| {
				let d = a.distance(*b);
				d * d
			})
			.sum();

		self.alpha *= 1.0 - ALPHA_DECAY;
		if self.alpha < ALPHA_MIN || self.energy < ENERGY_MIN {
			self.running = false;
			debug!("simulation: at rest (alpha {:.4}, energy {:.6})", self.alpha, self.energy);
		}
		true
	}

	fn recenter(&mut self) {
		let (mut sx, mut sy, mut n) = (0.0, 0.0, 0.0);
		self.graph.visit_nodes(|node| {
			sx += node.x() as f64;
			sy += node.y() as f64;
			n += 1.0;
		});
		if n == 0.0 {
			return;
		}
		let (dx, dy) = ((self.center.x - sx / n) as f32, (self.center.y - sy / n) as f32);
		self.graph.visit_nodes_mut(|node| {
			if !node.data.is_anchor {
				node.data.x += dx;
				node.data.y += dy;
			}
		});
	}

	/// Tick until at rest or `max_ticks` elapse; returns the ticks taken.
	pub fn settle(&mut self, max_ticks: u32) -> u32 {
		let mut ticks = 0;
		while ticks < max_ticks && self.tick() {
			ticks += 1;
		}
		ticks
	}

	/// Halt the physics until the next `layout` or `reheat`.
	pub fn stop(&mut self) {
		self.running = false;
	}

	/// Resume the physics with some heat.
	pub fn reheat(&mut self) {
		self.alpha = self.alpha.max(ALPHA_REHEAT);
		self.energy = f64::INFINITY;
		self.running = true;
	}

	/// True while the physics is advancing.
	pub fn is_running(&self) -> bool {
		self.running
	}

	/// Kinetic proxy: summed squared displacement over the last tick.
	pub fn energy(&self) -> f64 {
		self.energy
	}

	/// Pin a node at `at` (drag).
	pub fn fix(&mut self, id: &str, at: Point) -> bool {
		let Some(&idx) = self.nodes.get(id) else {
			return false;
		};
		self.graph.visit_nodes_mut(|node| {
			if node.index() == idx {
				node.data.x = at.x as f32;
				node.data.y = at.y as f32;
				node.data.is_anchor = true;
			}
		});
		self.reheat();
		true
	}

	/// Unpin a node.
	pub fn release(&mut self, id: &str) -> bool {
		let Some(&idx) = self.nodes.get(id) else {
			return false;
		};
		self.graph.visit_nodes_mut(|node| {
			if node.index() == idx {
				node.data.is_anchor = false;
			}
		});
		true
	}

	/// The node nearest to `at`, if any lies within `radius`.
	pub fn node_at(&self, at: Point, radius: f64) -> Option<Vertex> {
		let mut nearest: Option<(f64, Vertex)> = None;
		self.graph.visit_nodes(|node| {
			let d = Point::new(node.x() as f64, node.y() as f64).distance(at);
			if d < radius && nearest.as_ref().is_none_or(|(best, _)| d < *best) {
				nearest = Some((d, node.data.user_data.id.clone()));
			}
		});
		nearest.map(|(_, id)| id)
	}

	/// Current position of `id`.
	pub fn position(&self, id: &str) -> Option<Point> {
		let idx = *self.nodes.get(id)?;
		let mut found = None;
		self.graph.visit_nodes(|node| {
			if node.index() == idx {
				found = Some(Point::new(node.x() as f64, node.y() as f64));
			}
		});
		found
	}

	/// Positions of every node, in vertex order.
	pub fn snapshot(&self) -> PositionSnapshot {
		let mut by_idx = IndexMap::new();
		self.graph.visit_nodes(|node| {
			by_idx.insert(node.index(), Point::new(node.x() as f64, node.y() as f64));
		});
		self.nodes
			.iter()
			.filter_map(|(id, idx)| by_idx.get(idx).map(|p| (id.clone(), *p)))
			.collect()
	}

	/// Positioned vertices, in vertex order.
	pub fn vertices(&self) -> Vec<PositionedVertex> {
		let mut anchors = IndexMap::new();
		self.graph.visit_nodes(|node| {
			anchors.insert(node.index(), node.data.is_anchor);
		});
		self.snapshot()
			.into_iter()
			.map(|(id, position)| {
				let fixed = self
					.nodes
					.get(&id)
					.and_then(|idx| anchors.get(idx).copied())
					.unwrap_or(false);
				PositionedVertex { id, position, fixed }
			})
			.collect()
	}

	/// Positioned links.
	pub fn links(&self) -> Vec<PositionedLink> {
		let positions = self.snapshot();
		self.links
			.iter()
			.filter_map(|edge| {
				Some(PositionedLink {
					source: *positions.get(&edge.source)?,
					target: *positions.get(&edge.target)?,
					edge: edge.clone(),
				})
			})
			.collect()
	}

	/// Number of mirrored nodes.
	pub fn node_count(&self) -> usize {
		self.nodes.len()
	}

	/// Number of mirrored links.
	pub fn link_count(&self) -> usize {
		self.links.len()
	}

	/// Follow a graph mutation.
	pub fn apply(&mut self, event: &GraphEvent) {
		match event {
			GraphEvent::VertexAdded(v) => {
				self.add_node(v);
			}
			GraphEvent::VertexRemoved(v) => {
				self.remove_node(v);
			}
			GraphEvent::EdgeAdded(e) => {
				self.add_link(e);
			}
			GraphEvent::EdgeRemoved(e) => {
				self.remove_link(e);
			}
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn path() -> Graph {
		Graph::new(
			["1", "2", "3", "4"],
			[Edge::new("1", "2"), Edge::new("2", "3"), Edge::new("3", "4")],
		)
		.unwrap()
	}

	const CENTER: Point = Point::new(200.0, 150.0);

	#[test]
	fn mirrors_every_vertex_and_edge() {
		let sim = Simulation::new(&path(), CENTER, 7);
		assert_eq!(sim.node_count(), 4);
		assert_eq!(sim.link_count(), 3);
		assert_eq!(sim.links()[0].edge, Edge::new("1", "2"));
	}

	#[test]
	fn same_seed_gives_the_same_layout() {
		let mut a = Simulation::new(&path(), CENTER, 42);
		let mut b = Simulation::new(&path(), CENTER, 42);
		a.settle(500);
		b.settle(500);
		assert_eq!(a.snapshot(), b.snapshot());
	}

	#[test]
	fn settles_in_bounded_ticks_without_diverging() {
		let mut sim = Simulation::new(&path(), CENTER, 1);
		let ticks = sim.settle(10_000);
		assert!(ticks < 1_000, "took {ticks} ticks");
		assert!(!sim.is_running());
		assert!(sim.snapshot().values().all(|p| p.is_finite()));
	}

	#[test]
	fn layout_from_snapshot_keeps_known_positions() {
		let mut sim = Simulation::new(&path(), CENTER, 3);
		sim.settle(500);
		let before = sim.snapshot();
		sim.add_node("5");
		sim.add_link(&Edge::new("4", "5"));
		sim.layout(Some(&before));
		for (id, p) in &before {
			assert_eq!(sim.position(id), Some(*p));
		}
		let placed = sim.position("5").unwrap();
		assert!(placed.distance(before["4"]) < 20.0);
	}

	#[test]
	fn fixed_nodes_stay_put() {
		let mut sim = Simulation::new(&path(), CENTER, 3);
		let pin = Point::new(10.0, 10.0);
		assert!(sim.fix("1", pin));
		sim.settle(50);
		let p = sim.position("1").unwrap();
		assert!((p.x - pin.x).abs() < 1e-3 && (p.y - pin.y).abs() < 1e-3);
		assert!(sim.vertices()[0].fixed);
		sim.release("1");
		assert!(!sim.vertices()[0].fixed);
	}

	#[test]
	fn follows_graph_events() {
		let mut sim = Simulation::new(&path(), CENTER, 3);
		sim.apply(&GraphEvent::EdgeRemoved(Edge::new("2", "3")));
		assert_eq!(sim.link_count(), 2);
		sim.apply(&GraphEvent::EdgeRemoved(Edge::new("3", "4")));
		sim.apply(&GraphEvent::VertexRemoved("4".into()));
		assert_eq!(sim.node_count(), 3);
		assert!(sim.position("4").is_none());
	}

	#[test]
	fn self_links_are_mirrored_but_exert_no_force() {
		let g = Graph::new(["a", "b"], [Edge::new("a", "a"), Edge::new("a", "b")]).unwrap();
		let mut sim = Simulation::new(&g, CENTER, 3);
		assert_eq!(sim.link_count(), 2);
		sim.settle(20);
		assert!(sim.snapshot().values().all(|p| p.is_finite()));
	}

	#[test]
	fn hit_testing_finds_the_nearest_node() {
		let sim = Simulation::new(&path(), CENTER, 3);
		let p = sim.position("3").unwrap();
		assert_eq!(sim.node_at(Point::new(p.x + 1.0, p.y), 5.0).as_deref(), Some("3"));
		assert_eq!(sim.node_at(Point::new(-500.0, -500.0), 5.0), None);
	}
}
