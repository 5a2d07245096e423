//! # Lights Out Solver Library
//!
//! This library provides a state-space search engine for the generalized Lights Out
//! puzzle: on an N×N grid of binary cells, toggling a cell also toggles its
//! up/down/left/right neighbours, and the goal is to turn the all-zeros grid into the
//! all-ones grid (or into an explicit target grid).
//!
//! It is used by two binaries:
//! - `lights_out`: Takes a grid size and a strategy, then prints the solution path.
//! - `heuristic_evaluator`: Compares best-first heuristics against BFS on seeded
//!   random reachable goals.
//!
//! ## Modules
//! - `engine`: Grid representation (`GridState`), the transition operator and the
//!   precomputed `TransitionSet`.
//! - `node`: `SearchNode`, the goal test and path reconstruction.
//! - `heuristics`: Pluggable estimates of distance to the goal for best-first search.
//! - `solver`: The BFS, iterative-deepening and best-first strategies.
//! - `utils`: Parsing grids from text.
//! - `error`: The `SearchError` type shared by all of the above.

pub mod engine;
pub mod error;
pub mod heuristics;
pub mod node;
pub mod solver;
pub mod utils;

pub use error::{SearchError, SearchResult};
