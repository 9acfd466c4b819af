//! The reorderable matrix view and its reorder engine.

mod component;
mod order;
mod seriation;
mod view;

pub use component::MatrixCanvas;
pub use order::{LabelOrder, Swap};
pub use seriation::{BarycenterSeriation, Seriation};
pub use view::{Axis, MatrixView};
