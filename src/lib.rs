//! Evolutionary search for the Minimum Labeling Spanning Tree problem.
//!
//! Given an undirected graph whose edges carry labels ("colors"), find a
//! spanning tree that uses as few distinct labels as possible. The search
//! is a generational genetic algorithm over spanning trees:
//!
//! - **Instance** ([`graph`]): immutable node, edge and label sets with an
//!   adjacency index, read from a `u v label` edge list.
//! - **Trees** ([`mlst::SpanningTreeBuilder`]): randomized iterative DFS that
//!   builds initial solutions and repairs merged edge sets into trees.
//! - **Search** ([`mlst::EvolutionEngine`]): fitness evaluation, elitism,
//!   roulette crossover, edge-injection mutation, stopping rules.
//!
//! Runs are reproducible for a fixed seed, with or without the `parallel`
//! feature.
//!
//! # Features
//!
//! - `parallel`: build trees of a generation on rayon workers
//! - `serde`: `Serialize`/`Deserialize` for configuration and result types

pub mod error;
pub mod graph;
pub mod mlst;
pub mod random;

pub use error::{MlstError, Result};
