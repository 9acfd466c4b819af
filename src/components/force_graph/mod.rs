//! Force-directed layout of the node-link view.

mod state;
mod types;

pub use state::Simulation;
pub use types::{GraphData, GraphLink, GraphNode, PositionSnapshot, PositionedLink, PositionedVertex};
