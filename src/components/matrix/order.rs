use log::{debug, warn};

use super::seriation::Seriation;
use crate::error::{Error, Result};
use crate::graph::{Graph, GraphEvent, Vertex};

/// A drag step's adjacent transposition.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Swap {
	/// The neighbour that was displaced.
	pub label: Vertex,
	/// The neighbour's new index (the dragged label's old slot).
	pub index: usize,
	/// The dragged label's new index.
	pub dragged_index: usize,
}

/// Current row/column order of the matrix.
///
/// Always a permutation of the graph's vertices: every reorder either
/// swaps two adjacent labels or applies a validated permutation.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct LabelOrder {
	labels: Vec<Vertex>,
}

impl LabelOrder {
	/// Order from explicit labels; duplicates are rejected.
	pub fn new(labels: Vec<Vertex>) -> Result<Self> {
		for (i, l) in labels.iter().enumerate() {
			if labels[..i].contains(l) {
				return Err(Error::InvalidPermutation(format!("duplicate label {l}")));
			}
		}
		Ok(Self { labels })
	}

	/// Order seeded from the graph's vertex order.
	pub fn from_graph(graph: &Graph) -> Self {
		Self {
			labels: graph.vertices().cloned().collect(),
		}
	}

	/// Labels, first row first.
	pub fn labels(&self) -> &[Vertex] {
		&self.labels
	}

	/// Number of labels.
	pub fn len(&self) -> usize {
		self.labels.len()
	}

	/// No labels.
	pub fn is_empty(&self) -> bool {
		self.labels.is_empty()
	}

	/// Slot of `label`.
	pub fn index_of(&self, label: &str) -> Option<usize> {
		self.labels.iter().position(|l| l == label)
	}

	fn require(&self, label: &str) -> Result<usize> {
		self.index_of(label).ok_or_else(|| Error::UnknownLabel(label.into()))
	}

	/// One step of an interactive drag along a row or column axis.
	///
	/// `coordinate` is the cursor position on that axis, `origin` the matrix
	/// edge on the same axis. A displacement of at least one cell from the
	/// dragged label's slot center swaps it with the neighbour in that
	/// direction; smaller displacements, and moves past either end, do
	/// nothing.
	pub fn drag_step(
		&mut self,
		dragged: &str,
		coordinate: f64,
		cell_size: f64,
		origin: f64,
	) -> Result<Option<Swap>> {
		let index = self.require(dragged)?;
		let center = origin + (index as f64 + 0.5) * cell_size;
		let displacement = coordinate - center;

		let neighbor = if displacement >= cell_size && index + 1 < self.labels.len() {
			index + 1
		} else if displacement <= -cell_size && index > 0 {
			index - 1
		} else {
			return Ok(None);
		};

		self.labels.swap(index, neighbor);
		let swap = Swap {
			label: self.labels[index].clone(),
			index,
			dragged_index: neighbor,
		};
		debug!("reorder: {dragged} {index} -> {neighbor}, {} -> {index}", swap.label);
		Ok(Some(swap))
	}

	/// Replace the order with `labels[permutation[i]]` for each `i`.
	pub fn apply_permutation(&mut self, permutation: &[usize]) -> Result<()> {
		let n = self.labels.len();
		if permutation.len() != n {
			return Err(Error::InvalidPermutation(format!(
				"expected {n} indices, got {}",
				permutation.len()
			)));
		}
		let mut seen = vec![false; n];
		for &i in permutation {
			if i >= n {
				return Err(Error::InvalidPermutation(format!("index {i} out of range")));
			}
			if std::mem::replace(&mut seen[i], true) {
				return Err(Error::InvalidPermutation(format!("index {i} repeated")));
			}
		}
		self.labels = permutation.iter().map(|&i| self.labels[i].clone()).collect();
		Ok(())
	}

	/// Reorder with `seriation`, fed the adjacency matrix in the current order.
	///
	/// An invalid permutation is rejected and leaves the order untouched.
	pub fn auto_reorder(&mut self, graph: &Graph, seriation: &dyn Seriation) -> Result<()> {
		let matrix = graph.to_adjacency_matrix(&self.labels);
		let permutation = seriation.reorder(&matrix);
		self.apply_permutation(&permutation).inspect_err(|e| {
			warn!("reorder: rejected seriation output: {e}");
		})?;
		debug!("reorder: seriated to {:?}", self.labels);
		Ok(())
	}

	/// Fraction of the other labels connected to both or to neither of `a` and `b`.
	///
	/// Symmetric in `a` and `b`; a label is fully similar to itself.
	pub fn similarity(&self, graph: &Graph, a: &str, b: &str) -> Result<f64> {
		self.require(a)?;
		self.require(b)?;
		let others: Vec<&Vertex> = self.labels.iter().filter(|l| *l != a && *l != b).collect();
		if others.is_empty() {
			return Ok(1.0);
		}
		let equal = others
			.iter()
			.filter(|o| graph.is_connected(a, o).is_some() == graph.is_connected(b, o).is_some())
			.count();
		Ok(equal as f64 / others.len() as f64)
	}

	/// Labels other than `label` whose similarity to it reaches `threshold`.
	pub fn similar_to(&self, graph: &Graph, label: &str, threshold: f64) -> Result<Vec<Vertex>> {
		let mut similar = Vec::new();
		for other in &self.labels {
			if other != label && self.similarity(graph, label, other)? >= threshold {
				similar.push(other.clone());
			}
		}
		Ok(similar)
	}

	/// Follow a graph mutation: new vertices go last, removed ones drop out.
	pub fn apply(&mut self, event: &GraphEvent) {
		match event {
			GraphEvent::VertexAdded(v) => {
				if self.index_of(v).is_none() {
					self.labels.push(v.clone());
				}
			}
			GraphEvent::VertexRemoved(v) => self.labels.retain(|l| l != v),
			GraphEvent::EdgeAdded(_) | GraphEvent::EdgeRemoved(_) => {}
		}
	}
}
