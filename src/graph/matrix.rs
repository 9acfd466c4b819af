//! Matrix views of a [`Graph`] under a caller-supplied label order.

use super::{Edge, Graph, Vertex};
use crate::error::{Error, Result};

/// One matrix cell: the row and column labels and the connection value.
#[derive(Clone, Debug, PartialEq)]
pub struct DrawingInstruction {
	/// Row label.
	pub row: Vertex,
	/// Column label.
	pub column: Vertex,
	/// Row index in the supplied order.
	pub row_index: usize,
	/// Column index in the supplied order.
	pub column_index: usize,
	/// Edge weight, `None` when the pair is not connected.
	pub value: Option<f64>,
}

impl Graph {
	/// Build a graph from a square matrix.
	///
	/// Only the upper triangle (diagonal included) is read: `0` means no edge,
	/// `1` an unweighted edge, anything else a weighted edge.
	pub fn from_matrix<S: AsRef<str>>(matrix: &[Vec<f64>], labels: &[S]) -> Result<Self> {
		let n = matrix.len();
		if labels.len() != n {
			return Err(Error::LabelCountMismatch {
				expected: n,
				got: labels.len(),
			});
		}
		if let Some((row, r)) = matrix.iter().enumerate().find(|(_, r)| r.len() != n) {
			return Err(Error::NonSquareMatrix {
				row,
				len: r.len(),
				expected: n,
			});
		}

		let mut edges = Vec::new();
		for (i, row) in matrix.iter().enumerate() {
			for (j, &value) in row.iter().enumerate().skip(i) {
				let (a, b) = (labels[i].as_ref(), labels[j].as_ref());
				if value == 0.0 {
					continue;
				}
				edges.push(if value == 1.0 {
					Edge::new(a, b)
				} else {
					Edge::weighted(a, b, value)
				});
			}
		}
		Graph::new(labels.iter().map(|l| l.as_ref().to_owned()), edges)
	}

	/// Square connectivity matrix in `order`; absent edges are `0.0`.
	pub fn to_adjacency_matrix<S: AsRef<str>>(&self, order: &[S]) -> Vec<Vec<f64>> {
		order
			.iter()
			.map(|r| {
				order
					.iter()
					.map(|c| self.is_connected(r.as_ref(), c.as_ref()).unwrap_or(0.0))
					.collect()
			})
			.collect()
	}

	/// Row-major cell list in `order`.
	pub fn to_drawing_instructions<S: AsRef<str>>(&self, order: &[S]) -> Vec<DrawingInstruction> {
		let mut cells = Vec::with_capacity(order.len() * order.len());
		for (row_index, r) in order.iter().enumerate() {
			for (column_index, c) in order.iter().enumerate() {
				cells.push(DrawingInstruction {
					row: r.as_ref().to_owned(),
					column: c.as_ref().to_owned(),
					row_index,
					column_index,
					value: self.is_connected(r.as_ref(), c.as_ref()),
				});
			}
		}
		cells
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn matrix_round_trip_keeps_self_links() {
		let m = vec![
			vec![1.0, 1.0, 0.0],
			vec![1.0, 0.0, 1.0],
			vec![0.0, 1.0, 0.0],
		];
		let labels = ["a", "b", "c"];
		let g = Graph::from_matrix(&m, &labels).unwrap();
		assert!(g.has_edge(&Edge::new("a", "a")));
		assert_eq!(g.to_adjacency_matrix(&labels), m);
	}

	#[test]
	fn weights_survive_the_round_trip() {
		let m = vec![vec![0.0, 2.5], vec![2.5, 0.0]];
		let g = Graph::from_matrix(&m, &["x", "y"]).unwrap();
		assert_eq!(g.is_connected("y", "x"), Some(2.5));
		assert_eq!(g.to_adjacency_matrix(&["x", "y"]), m);
	}

	#[test]
	fn rejects_malformed_matrices() {
		let err = Graph::from_matrix(&[vec![0.0, 1.0], vec![1.0]], &["a", "b"]).unwrap_err();
		assert!(matches!(err, Error::NonSquareMatrix { row: 1, len: 1, expected: 2 }));
		let err = Graph::from_matrix(&[vec![0.0]], &["a", "b"]).unwrap_err();
		assert!(matches!(err, Error::LabelCountMismatch { expected: 1, got: 2 }));
	}

	#[test]
	fn drawing_instructions_follow_the_label_order() {
		let g = Graph::new(["a", "b", "c"], [Edge::new("a", "c")]).unwrap();
		let cells = g.to_drawing_instructions(&["c", "b", "a"]);
		assert_eq!(cells.len(), 9);
		assert_eq!(cells[0].row, "c");
		assert_eq!(cells[2].column, "a");
		assert_eq!(cells[2].value, Some(1.0));
		assert_eq!(cells[4].value, None);
		assert_eq!((cells[5].row_index, cells[5].column_index), (1, 2));
	}

	#[test]
	fn matrix_is_independent_of_edge_insertion_order() {
		let a = Graph::new(["1", "2", "3"], [Edge::new("1", "2"), Edge::new("3", "2")]).unwrap();
		let b = Graph::new(["1", "2", "3"], [Edge::new("2", "3"), Edge::new("2", "1")]).unwrap();
		let order = ["3", "1", "2"];
		assert_eq!(a.to_adjacency_matrix(&order), b.to_adjacency_matrix(&order));
	}
}
