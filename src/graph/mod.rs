//! The relational structure shared by the node-link and matrix views.
//!
//! A [`Graph`] owns an ordered vertex set and an undirected edge set. Every
//! applied mutation is announced to registered observers as a
//! [`GraphEvent`]; that is how the force simulation and the matrix label
//! order stay in sync with edits.

mod matrix;

use std::fmt;
use std::hash::{Hash, Hasher};

use indexmap::{IndexMap, IndexSet};
use log::debug;

use crate::error::{Error, Result};

pub use matrix::DrawingInstruction;

/// Vertex identifier.
pub type Vertex = String;

/// An undirected, optionally weighted edge.
#[derive(Clone, Debug)]
pub struct Edge {
	/// One endpoint.
	pub source: Vertex,
	/// The other endpoint.
	pub target: Vertex,
	/// Optional weight; unweighted edges count as `1.0`.
	pub weight: Option<f64>,
}

impl Edge {
	/// Unweighted edge.
	pub fn new(source: impl Into<Vertex>, target: impl Into<Vertex>) -> Self {
		Self {
			source: source.into(),
			target: target.into(),
			weight: None,
		}
	}

	/// Weighted edge.
	pub fn weighted(source: impl Into<Vertex>, target: impl Into<Vertex>, weight: f64) -> Self {
		Self {
			weight: Some(weight),
			..Self::new(source, target)
		}
	}

	/// Self-link.
	pub fn is_reflexive(&self) -> bool {
		self.source == self.target
	}

	/// Connection value stored in matrices.
	pub fn value(&self) -> f64 {
		self.weight.unwrap_or(1.0)
	}

	/// True if `v` is one of the endpoints.
	pub fn touches(&self, v: &str) -> bool {
		self.source == v || self.target == v
	}

	fn key(&self) -> EdgeKey {
		EdgeKey::new(&self.source, &self.target)
	}
}

impl PartialEq for Edge {
	fn eq(&self, other: &Self) -> bool {
		self.key() == other.key() && self.weight.map(f64::to_bits) == other.weight.map(f64::to_bits)
	}
}

impl Eq for Edge {}

impl Hash for Edge {
	fn hash<H: Hasher>(&self, state: &mut H) {
		self.key().hash(state);
		self.weight.map(f64::to_bits).hash(state);
	}
}

impl fmt::Display for Edge {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self.weight {
			Some(w) => write!(f, "{} -- {} ({w})", self.source, self.target),
			None => write!(f, "{} -- {}", self.source, self.target),
		}
	}
}

/// Endpoint pair with a canonical (sorted) orientation.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
struct EdgeKey(Vertex, Vertex);

impl EdgeKey {
	fn new(a: &str, b: &str) -> Self {
		if a <= b {
			Self(a.into(), b.into())
		} else {
			Self(b.into(), a.into())
		}
	}
}

/// A mutation that has been applied to a [`Graph`].
#[derive(Clone, Debug, PartialEq)]
pub enum GraphEvent {
	/// A vertex was appended.
	VertexAdded(Vertex),
	/// A vertex was removed (its edges were removed before it).
	VertexRemoved(Vertex),
	/// An edge was inserted.
	EdgeAdded(Edge),
	/// An edge was removed.
	EdgeRemoved(Edge),
}

/// Handle returned by [`Graph::subscribe`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ObserverId(usize);

type Observer = Box<dyn FnMut(&GraphEvent)>;

/// Vertices plus an undirected edge set.
#[derive(Default)]
pub struct Graph {
	vertices: IndexSet<Vertex>,
	edges: IndexMap<EdgeKey, Edge>,
	observers: Vec<(ObserverId, Observer)>,
	next_observer: usize,
}

impl Graph {
	/// Build a graph, failing on duplicate vertices or edges with unknown endpoints.
	pub fn new<V, E>(vertices: V, edges: E) -> Result<Self>
	where
		V: IntoIterator,
		V::Item: Into<Vertex>,
		E: IntoIterator<Item = Edge>,
	{
		let mut graph = Self::default();
		for v in vertices {
			graph.add_vertex(v)?;
		}
		for e in edges {
			graph.add_edge(e)?;
		}
		Ok(graph)
	}

	/// Vertices in insertion order.
	pub fn vertices(&self) -> impl ExactSizeIterator<Item = &Vertex> {
		self.vertices.iter()
	}

	/// All edges.
	pub fn edges(&self) -> impl ExactSizeIterator<Item = &Edge> {
		self.edges.values()
	}

	/// Number of vertices.
	pub fn vertex_count(&self) -> usize {
		self.vertices.len()
	}

	/// Number of edges.
	pub fn edge_count(&self) -> usize {
		self.edges.len()
	}

	/// True if `v` is a vertex of this graph.
	pub fn has_vertex(&self, v: &str) -> bool {
		self.vertices.contains(v)
	}

	/// True if an edge equal to `e` (either orientation) is present.
	pub fn has_edge(&self, e: &Edge) -> bool {
		self.edges.get(&e.key()).is_some_and(|stored| stored == e)
	}

	/// Register an observer; it is called after every applied mutation.
	///
	/// Observers must not mutate the graph from inside the callback.
	pub fn subscribe<F>(&mut self, observer: F) -> ObserverId
	where
		F: FnMut(&GraphEvent) + 'static,
	{
		let id = ObserverId(self.next_observer);
		self.next_observer += 1;
		self.observers.push((id, Box::new(observer)));
		id
	}

	/// Drop an observer. Returns false if it was not registered.
	pub fn unsubscribe(&mut self, id: ObserverId) -> bool {
		let before = self.observers.len();
		self.observers.retain(|(oid, _)| *oid != id);
		self.observers.len() != before
	}

	fn emit(&mut self, event: GraphEvent) {
		debug!("graph: {event:?}");
		for (_, observer) in &mut self.observers {
			observer(&event);
		}
	}

	/// Append a vertex.
	pub fn add_vertex(&mut self, v: impl Into<Vertex>) -> Result<()> {
		let v = v.into();
		if self.vertices.contains(&v) {
			return Err(Error::DuplicateVertex(v));
		}
		self.vertices.insert(v.clone());
		self.emit(GraphEvent::VertexAdded(v));
		Ok(())
	}

	/// Remove a vertex together with its incident edges.
	pub fn remove_vertex(&mut self, v: &str) -> Result<()> {
		if !self.vertices.contains(v) {
			return Err(Error::UnknownVertex(v.into()));
		}
		let incident: Vec<Edge> = self.edges.values().filter(|e| e.touches(v)).cloned().collect();
		for e in incident {
			self.edges.shift_remove(&e.key());
			self.emit(GraphEvent::EdgeRemoved(e));
		}
		self.vertices.shift_remove(v);
		self.emit(GraphEvent::VertexRemoved(v.into()));
		Ok(())
	}

	/// Insert an edge. Returns `Ok(false)` if the endpoint pair is already connected.
	pub fn add_edge(&mut self, e: Edge) -> Result<bool> {
		for end in [&e.source, &e.target] {
			if !self.vertices.contains(end) {
				return Err(Error::UnknownVertex(end.clone()));
			}
		}
		let key = e.key();
		if self.edges.contains_key(&key) {
			return Ok(false);
		}
		self.edges.insert(key, e.clone());
		self.emit(GraphEvent::EdgeAdded(e));
		Ok(true)
	}

	/// Remove an edge equal to `e`. Returns false if no such edge exists.
	pub fn remove_edge(&mut self, e: &Edge) -> bool {
		if !self.has_edge(e) {
			return false;
		}
		let removed = self.edges.shift_remove(&e.key());
		match removed {
			Some(removed) => {
				self.emit(GraphEvent::EdgeRemoved(removed));
				true
			}
			None => false,
		}
	}

	/// Weight of the edge between `a` and `b`, `None` when disconnected.
	pub fn is_connected(&self, a: &str, b: &str) -> Option<f64> {
		self.edges.get(&EdgeKey::new(a, b)).map(Edge::value)
	}

	/// Vertices sharing an edge with `v`, in vertex order.
	pub fn neighbors<'a>(&'a self, v: &'a str) -> impl Iterator<Item = &'a Vertex> + 'a {
		self.vertices
			.iter()
			.filter(move |u| self.is_connected(v, u).is_some())
	}

	/// Number of edges touching `v`; a self-link counts once.
	pub fn degree(&self, v: &str) -> usize {
		self.edges.values().filter(|e| e.touches(v)).count()
	}
}

impl fmt::Debug for Graph {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("Graph")
			.field("vertices", &self.vertices)
			.field("edges", &self.edges.values().collect::<Vec<_>>())
			.field("observers", &self.observers.len())
			.finish()
	}
}

#[cfg(test)]
mod tests {
	use std::cell::RefCell;
	use std::rc::Rc;

	use super::*;

	fn path() -> Graph {
		Graph::new(
			["1", "2", "3", "4"],
			[Edge::new("1", "2"), Edge::new("2", "3"), Edge::new("3", "4")],
		)
		.unwrap()
	}

	#[test]
	fn edges_compare_regardless_of_orientation() {
		assert_eq!(Edge::new("a", "b"), Edge::new("b", "a"));
		assert_ne!(Edge::weighted("a", "b", 2.0), Edge::new("b", "a"));
		assert!(Edge::new("a", "a").is_reflexive());
	}

	#[test]
	fn duplicate_vertices_fail_construction() {
		let err = Graph::new(["a", "b", "a"], Vec::new()).unwrap_err();
		assert!(matches!(err, Error::DuplicateVertex(v) if v == "a"));
	}

	#[test]
	fn edges_must_reference_known_vertices() {
		let err = Graph::new(["a"], [Edge::new("a", "z")]).unwrap_err();
		assert!(matches!(err, Error::UnknownVertex(v) if v == "z"));
	}

	#[test]
	fn is_connected_is_symmetric() {
		let g = path();
		for a in g.vertices() {
			for b in g.vertices() {
				assert_eq!(g.is_connected(a, b), g.is_connected(b, a));
			}
		}
		assert_eq!(g.is_connected("2", "1"), Some(1.0));
		assert_eq!(g.is_connected("1", "3"), None);
	}

	#[test]
	fn duplicate_edges_are_idempotent() {
		let mut g = path();
		assert!(!g.add_edge(Edge::new("2", "1")).unwrap());
		assert_eq!(g.edge_count(), 3);
	}

	#[test]
	fn every_mutation_emits_one_event() {
		let mut g = path();
		let seen = Rc::new(RefCell::new(Vec::new()));
		let sink = seen.clone();
		let id = g.subscribe(move |e| sink.borrow_mut().push(e.clone()));

		g.add_vertex("5").unwrap();
		g.add_edge(Edge::new("4", "5")).unwrap();
		g.add_edge(Edge::new("5", "4")).unwrap();
		assert!(g.remove_edge(&Edge::new("5", "4")));
		assert!(!g.remove_edge(&Edge::new("5", "4")));
		assert_eq!(
			*seen.borrow(),
			vec![
				GraphEvent::VertexAdded("5".into()),
				GraphEvent::EdgeAdded(Edge::new("4", "5")),
				GraphEvent::EdgeRemoved(Edge::new("4", "5")),
			]
		);

		assert!(g.unsubscribe(id));
		g.add_vertex("6").unwrap();
		assert_eq!(seen.borrow().len(), 3);
	}

	#[test]
	fn removing_a_vertex_removes_its_edges_first() {
		let mut g = path();
		let seen = Rc::new(RefCell::new(Vec::new()));
		let sink = seen.clone();
		g.subscribe(move |e| sink.borrow_mut().push(e.clone()));

		g.remove_vertex("2").unwrap();
		assert_eq!(
			*seen.borrow(),
			vec![
				GraphEvent::EdgeRemoved(Edge::new("1", "2")),
				GraphEvent::EdgeRemoved(Edge::new("2", "3")),
				GraphEvent::VertexRemoved("2".into()),
			]
		);
		assert_eq!(g.vertices().collect::<Vec<_>>(), ["1", "3", "4"]);
		assert!(g.remove_vertex("2").is_err());
	}

	#[test]
	fn neighbors_and_degree() {
		let g = path();
		assert_eq!(g.neighbors("2").collect::<Vec<_>>(), ["1", "3"]);
		assert_eq!(g.degree("4"), 1);
	}
}
