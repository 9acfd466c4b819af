use indexmap::IndexMap;
use serde::Deserialize;

use crate::error::Result;
use crate::geometry::Point;
use crate::graph::{Edge, Graph, Vertex};

/// Node as supplied by the host page or configuration.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct GraphNode {
	/// Vertex id.
	pub id: String,
}

/// Link as supplied by the host page or configuration.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct GraphLink {
	/// One endpoint id.
	pub source: String,
	/// The other endpoint id.
	pub target: String,
	/// Optional weight.
	#[serde(default)]
	pub weight: Option<f64>,
}

/// Plain node/link lists, convertible into a [`Graph`].
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct GraphData {
	/// Nodes in display order.
	#[serde(default)]
	pub nodes: Vec<GraphNode>,
	/// Links.
	#[serde(default)]
	pub links: Vec<GraphLink>,
}

impl GraphData {
	/// Build from `(ids, pairs)`.
	pub fn from_pairs(ids: &[&str], pairs: &[(&str, &str)]) -> Self {
		Self {
			nodes: ids.iter().map(|id| GraphNode { id: (*id).into() }).collect(),
			links: pairs
				.iter()
				.map(|(s, t)| GraphLink {
					source: (*s).into(),
					target: (*t).into(),
					weight: None,
				})
				.collect(),
		}
	}

	/// Links as graph edges.
	pub fn edges(&self) -> impl Iterator<Item = Edge> + '_ {
		self.links.iter().map(|l| Edge {
			source: l.source.clone(),
			target: l.target.clone(),
			weight: l.weight,
		})
	}

	/// Build a graph; fails on duplicate ids or dangling links.
	pub fn to_graph(&self) -> Result<Graph> {
		Graph::new(self.nodes.iter().map(|n| n.id.clone()), self.edges())
	}
}

/// A vertex with its current layout position.
#[derive(Clone, Debug, PartialEq)]
pub struct PositionedVertex {
	/// Vertex id.
	pub id: Vertex,
	/// Current position.
	pub position: Point,
	/// Pinned by a drag gesture.
	pub fixed: bool,
}

/// An edge with the current positions of its endpoints.
#[derive(Clone, Debug, PartialEq)]
pub struct PositionedLink {
	/// The mirrored edge.
	pub edge: Edge,
	/// Position of `edge.source`.
	pub source: Point,
	/// Position of `edge.target`.
	pub target: Point,
}

/// Vertex positions keyed by id, in vertex order.
pub type PositionSnapshot = IndexMap<Vertex, Point>;
