//! Evolutionary search for Minimum Labeling Spanning Trees.
//!
//! Candidate solutions are spanning trees built by a randomized DFS. The
//! same DFS repairs merged or perturbed edge sets back into trees, so every
//! operator output is a valid tree by construction.
//!
//! # Key Types
//!
//! - [`MlstConfig`]: Algorithm parameters (population size, rates, caps, presets)
//! - [`EvolutionEngine`]: Executes the generational loop
//! - [`MlstResult`]: First-generation best, overall best, statistics
//! - [`SpanningTreeBuilder`]: Randomized iterative DFS tree construction
//!
//! # Submodules
//!
//! - [`fitness`]: Label counting and population evaluation
//! - [`operators`]: Elitism, roulette crossover, edge-injection mutation
//!
//! # References
//!
//! - Chang & Leu (1997), "The minimum labeling spanning trees"
//! - Xiong, Golden & Wasil (2005), "A one-parameter genetic algorithm for the
//!   minimum labeling spanning tree problem"

mod config;
pub mod fitness;
pub mod operators;
mod runner;
mod selection;
mod tree;
mod types;

pub use config::{IncompleteTreePolicy, MlstConfig};
pub use runner::{EvolutionEngine, MlstResult, StopReason, OPTIMAL_FITNESS};
pub use selection::Selection;
pub use tree::SpanningTreeBuilder;
pub use types::{EvaluatedSolution, Solution};
