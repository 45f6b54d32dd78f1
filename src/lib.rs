//! Graph search and combinatorial enumeration toolkit for puzzle solvers.
//!
//! Solvers parse their input into a [`graph::Graph`] (an adjacency list, a
//! [`grid::Grid`], or a [`space::OpenSpace`]) and ask [`search`] for
//! reachable sets or path costs, or feed value lists into [`enumerate`] for
//! subset-sum combinations and fixed-size selections.

pub mod cancel;
pub mod enumerate;
pub mod error;
pub mod geometry;
pub mod graph;
pub mod grid;
pub mod logging;
pub mod search;
pub mod space;

pub use cancel::{CancelToken, Cancelled};
pub use enumerate::{combinations, selections, Selections};
pub use error::{Error, Result};
pub use graph::{AdjacencyGraph, Graph, GraphBuilder, WeightedGraph, WithCost};
pub use grid::Grid;
pub use search::{
    breadth_first, components, connected, cost_between, farthest_on_loop, reachable, UNREACHABLE,
};
pub use space::OpenSpace;
