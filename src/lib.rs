//! Approximate traveling salesman tours over metric point sets.
//!
//! Prim's algorithm builds a minimum spanning tree with an indexed priority queue,
//! and a shortcut walk around the tree yields a tour at most twice the optimal length
//! whenever the distance satisfies the triangle inequality.

pub mod error;
pub mod graph;
pub mod map;
pub mod math;

pub use error::Error;
pub use graph::solver::TspGraph;
pub use map::{DistanceMetric, Link, PointMap, PointSet};
