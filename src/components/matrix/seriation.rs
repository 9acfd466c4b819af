//! Automatic row/column ordering.

/// Computes a row order for a square connectivity matrix.
///
/// Implementations return a permutation of `0..matrix.len()`; the caller
/// validates it before applying.
pub trait Seriation {
	/// Permutation of row indices, new position first.
	fn reorder(&self, matrix: &[Vec<f64>]) -> Vec<usize>;
}

impl<F> Seriation for F
where
	F: Fn(&[Vec<f64>]) -> Vec<usize>,
{
	fn reorder(&self, matrix: &[Vec<f64>]) -> Vec<usize> {
		self(matrix)
	}
}

/// Iterated barycenter ordering.
///
/// Each sweep moves every row to the weighted mean of its own position and
/// the positions of the rows it is connected to, then stable-sorts. Rows
/// without connections keep their position. Stops early once a sweep changes
/// nothing.
#[derive(Clone, Copy, Debug)]
pub struct BarycenterSeriation {
	/// Maximum number of sweeps.
	pub sweeps: usize,
}

impl Default for BarycenterSeriation {
	fn default() -> Self {
		Self { sweeps: 24 }
	}
}

impl Seriation for BarycenterSeriation {
	fn reorder(&self, matrix: &[Vec<f64>]) -> Vec<usize> {
		let n = matrix.len();
		let mut order: Vec<usize> = (0..n).collect();
		let mut pos = vec![0.0; n];

		for _ in 0..self.sweeps {
			for (slot, &row) in order.iter().enumerate() {
				pos[row] = slot as f64;
			}
			let barycenter: Vec<f64> = (0..n)
				.map(|row| {
					let (mut sum, mut weight) = (pos[row], 1.0);
					for (col, &w) in matrix[row].iter().enumerate().take(n) {
						if col != row && w != 0.0 {
							let w = w.abs();
							sum += w * pos[col];
							weight += w;
						}
					}
					sum / weight
				})
				.collect();

			let mut next = order.clone();
			next.sort_by(|&a, &b| {
				barycenter[a]
					.partial_cmp(&barycenter[b])
					.unwrap_or(std::cmp::Ordering::Equal)
					.then(pos[a].total_cmp(&pos[b]))
			});
			if next == order {
				break;
			}
			order = next;
		}
		order
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn is_permutation(p: &[usize], n: usize) -> bool {
		let mut seen = vec![false; n];
		p.len() == n && p.iter().all(|&i| i < n && !std::mem::replace(&mut seen[i], true))
	}

	#[test]
	fn returns_a_permutation() {
		let m = vec![
			vec![0.0, 0.0, 1.0, 0.0],
			vec![0.0, 0.0, 0.0, 1.0],
			vec![1.0, 0.0, 0.0, 0.0],
			vec![0.0, 1.0, 0.0, 0.0],
		];
		let p = BarycenterSeriation::default().reorder(&m);
		assert!(is_permutation(&p, 4));
	}

	#[test]
	fn pulls_connected_rows_together() {
		// a-c and b-d are connected; in the input order they interleave.
		let m = vec![
			vec![0.0, 0.0, 1.0, 0.0],
			vec![0.0, 0.0, 0.0, 1.0],
			vec![1.0, 0.0, 0.0, 0.0],
			vec![0.0, 1.0, 0.0, 0.0],
		];
		let p = BarycenterSeriation::default().reorder(&m);
		let at = |row: usize| p.iter().position(|&r| r == row).unwrap() as i64;
		assert_eq!((at(0) - at(2)).abs(), 1);
		assert_eq!((at(1) - at(3)).abs(), 1);
	}

	#[test]
	fn empty_and_disconnected_matrices_keep_their_order() {
		assert!(BarycenterSeriation::default().reorder(&[]).is_empty());
		let m = vec![vec![0.0; 3]; 3];
		assert_eq!(BarycenterSeriation::default().reorder(&m), vec![0, 1, 2]);
	}

	#[test]
	fn closures_are_seriations() {
		let reverse = |m: &[Vec<f64>]| (0..m.len()).rev().collect::<Vec<_>>();
		assert_eq!(reverse.reorder(&[vec![0.0], vec![0.0]]), vec![1, 0]);
	}
}
