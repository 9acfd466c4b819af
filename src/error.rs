//! Crate error type.

use crate::components::morph::PhaseKind;

/// Errors raised by the graph model, timeline, reorder engine and phase player.
#[derive(Debug, thiserror::Error)]
pub enum Error {
	/// A vertex id was added twice.
	#[error("duplicate vertex: {0}")]
	DuplicateVertex(String),
	/// An operation named a vertex the graph does not contain.
	#[error("unknown vertex: {0}")]
	UnknownVertex(String),
	/// A matrix row had a different length than the matrix height.
	#[error("matrix is not square: row {row} has {len} entries, expected {expected}")]
	NonSquareMatrix {
		/// Offending row.
		row: usize,
		/// Length of that row.
		len: usize,
		/// Number of rows.
		expected: usize,
	},
	/// The label list does not match the matrix dimension.
	#[error("expected {expected} labels, got {got}")]
	LabelCountMismatch {
		/// Matrix dimension.
		expected: usize,
		/// Number of labels supplied.
		got: usize,
	},
	/// Timeline breakpoints were not sorted or fell outside `[0, 1]`.
	#[error("timeline breakpoints must be sorted within [0, 1]: {0:?}")]
	UnsortedBreakpoints(Vec<f64>),
	/// A label sequence would have been left with duplicates or missing labels.
	#[error("invalid permutation: {0}")]
	InvalidPermutation(String),
	/// A reorder request named a label that is not in the sequence.
	#[error("label not in sequence: {0}")]
	UnknownLabel(String),
	/// `play` was invoked on a phase before `prepare`.
	#[error("phase {0} played before prepare")]
	PhaseNotPrepared(PhaseKind),
	/// `set_phase` was given an index past the last phase.
	#[error("phase index {index} out of range (phases: {len})")]
	PhaseOutOfRange {
		/// Requested index.
		index: usize,
		/// Number of phases.
		len: usize,
	},
	/// A frame was requested before the player was started.
	#[error("player has not been started")]
	PlayerNotStarted,
	/// Invalid colour in the configuration.
	#[error("invalid color: {0}")]
	InvalidColor(String),
	/// Configuration could not be parsed.
	#[error(transparent)]
	Config(#[from] serde_json::Error),
}

/// Crate result alias.
pub type Result<T> = std::result::Result<T, Error>;
