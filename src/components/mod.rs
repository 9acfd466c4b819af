//! Core components: the node-link simulation, the matrix view, the morph
//! player and the drawing surface they share.

pub mod canvas;
pub mod force_graph;
pub mod matrix;
pub mod morph;
pub mod pointer;
