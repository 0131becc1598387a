//! Evolutionary operators over spanning trees.
//!
//! - [`elitism`]: carry the best solutions forward unchanged
//! - [`crossover`]: roulette-select two parents, rebuild a tree over the
//!   union of their edges from a random root
//! - [`mutate`]: inject a sample of outside edges into a tree and rebuild it
//!   from a random root
//!
//! Every tree construction draws from its own child random stream, seeded
//! from the caller's generator in population order. Construction may then
//! run on rayon workers (feature `parallel`) without changing results.

use super::config::IncompleteTreePolicy;
use super::selection::Selection;
use super::tree::SpanningTreeBuilder;
use super::types::{EvaluatedSolution, Solution};
use crate::error::{MlstError, Result};
use crate::graph::{Edge, GraphInstance, Node};
use crate::random::{derive_rng, MlstRng};
use rand::seq::index;
use rand::Rng;
use std::collections::BTreeSet;
use tracing::warn;

/// Returns the first `elite_size` solutions of a sorted evaluated population.
///
/// # Errors
/// [`MlstError::Configuration`] if `elite_size` exceeds the population.
pub fn elitism(evaluated: &[EvaluatedSolution], elite_size: usize) -> Result<Vec<Solution>> {
    if elite_size > evaluated.len() {
        return Err(MlstError::Configuration(format!(
            "elite size {elite_size} exceeds population of {}",
            evaluated.len()
        )));
    }
    Ok(evaluated[..elite_size]
        .iter()
        .map(|e| e.solution.clone())
        .collect())
}

/// Builds a child tree from `root` over the union of two parents' edges.
///
/// The child's edges are a subset of `parent1 ∪ parent2`.
pub fn recombine<R: Rng + ?Sized>(
    parent1: &Solution,
    parent2: &Solution,
    root: Node,
    rng: &mut R,
) -> Solution {
    let union: BTreeSet<Edge> = parent1.edges().union(parent2.edges()).copied().collect();
    SpanningTreeBuilder::build(root, &union, rng)
}

/// Produces `new_solutions_size` children.
///
/// For each child two parents are drawn independently (with replacement)
/// by `selection`, a root is drawn uniformly from the instance's nodes, and
/// the union of the parents is repaired into a tree with [`recombine`].
pub fn crossover<R: Rng + ?Sized>(
    instance: &GraphInstance,
    evaluated: &[EvaluatedSolution],
    new_solutions_size: usize,
    selection: Selection,
    parallel: bool,
    rng: &mut R,
) -> Vec<Solution> {
    let tasks: Vec<(usize, usize, Node, MlstRng)> = (0..new_solutions_size)
        .map(|_| {
            let p1 = selection.select(evaluated, rng);
            let p2 = selection.select(evaluated, rng);
            let root = random_node(instance, rng);
            (p1, p2, root, derive_rng(rng))
        })
        .collect();

    run_tasks(tasks, parallel, |(p1, p2, root, mut task_rng)| {
        recombine(
            &evaluated[p1].solution,
            &evaluated[p2].solution,
            root,
            &mut task_rng,
        )
    })
}

/// Pending mutation decision for one solution.
enum MutationTask {
    Keep(Solution),
    Rebuild(Solution, Node, MlstRng),
}

/// Mutates each solution independently with probability `mutation_rate`.
///
/// A mutated solution receives `ceil(injection_fraction * k)` edges drawn
/// uniformly without replacement from the `k` instance edges it does not
/// use, and is rebuilt from a fresh uniformly random root. Solutions that
/// are not mutated are returned as they are.
///
/// # Errors
/// [`MlstError::Configuration`] if `mutation_rate` or `injection_fraction`
/// lies outside `[0, 1]` or is NaN.
pub fn mutate<R: Rng + ?Sized>(
    instance: &GraphInstance,
    population: Vec<Solution>,
    mutation_rate: f64,
    injection_fraction: f64,
    parallel: bool,
    rng: &mut R,
) -> Result<Vec<Solution>> {
    if !(0.0..=1.0).contains(&mutation_rate) {
        return Err(MlstError::Configuration(format!(
            "mutation rate {mutation_rate} must be within [0, 1]"
        )));
    }
    if !(0.0..=1.0).contains(&injection_fraction) {
        return Err(MlstError::Configuration(format!(
            "injection fraction {injection_fraction} must be within [0, 1]"
        )));
    }

    let tasks: Vec<MutationTask> = population
        .into_iter()
        .map(|solution| {
            if rng.random_bool(mutation_rate) {
                let root = random_node(instance, rng);
                MutationTask::Rebuild(solution, root, derive_rng(rng))
            } else {
                MutationTask::Keep(solution)
            }
        })
        .collect();

    Ok(run_tasks(tasks, parallel, |task| match task {
        MutationTask::Keep(solution) => solution,
        MutationTask::Rebuild(solution, root, mut task_rng) => {
            let outside: Vec<Edge> = instance
                .edges()
                .difference(solution.edges())
                .copied()
                .collect();
            let amount = (injection_fraction * outside.len() as f64).ceil() as usize;
            let amount = amount.min(outside.len());

            let mut merged = solution.edges().clone();
            for i in index::sample(&mut task_rng, outside.len(), amount).iter() {
                merged.insert(outside[i]);
            }
            SpanningTreeBuilder::build(root, &merged, &mut task_rng)
        }
    }))
}

/// Builds `population_size` trees over the whole instance, each from an
/// independently drawn random root.
pub fn initial_population<R: Rng + ?Sized>(
    instance: &GraphInstance,
    population_size: usize,
    parallel: bool,
    rng: &mut R,
) -> Vec<Solution> {
    let tasks: Vec<(Node, MlstRng)> = (0..population_size)
        .map(|_| {
            let root = random_node(instance, rng);
            (root, derive_rng(rng))
        })
        .collect();

    run_tasks(tasks, parallel, |(root, mut task_rng)| {
        SpanningTreeBuilder::build_over_instance(root, instance, &mut task_rng)
    })
}

/// Applies `policy` to trees that do not reach every instance node.
///
/// # Errors
/// [`MlstError::IncompleteTree`] for the first such tree under
/// [`IncompleteTreePolicy::Reject`].
pub fn check_coverage(
    solutions: &[Solution],
    instance: &GraphInstance,
    policy: IncompleteTreePolicy,
) -> Result<()> {
    let Some(first) = solutions.iter().find(|s| !s.covers(instance)) else {
        return Ok(());
    };

    match policy {
        IncompleteTreePolicy::Reject => Err(MlstError::IncompleteTree {
            root: first.root(),
            covered: first.nodes().len(),
            expected: instance.node_count(),
        }),
        IncompleteTreePolicy::Accept => {
            warn!(
                count = solutions.iter().filter(|s| !s.covers(instance)).count(),
                nodes = instance.node_count(),
                "accepting trees that do not span the instance"
            );
            Ok(())
        }
    }
}

fn random_node<R: Rng + ?Sized>(instance: &GraphInstance, rng: &mut R) -> Node {
    let nodes = instance.node_list();
    nodes[rng.random_range(0..nodes.len())]
}

#[cfg(feature = "parallel")]
fn run_tasks<T, F>(tasks: Vec<T>, parallel: bool, build: F) -> Vec<Solution>
where
    T: Send,
    F: Fn(T) -> Solution + Send + Sync,
{
    use rayon::prelude::*;

    if parallel {
        tasks.into_par_iter().map(build).collect()
    } else {
        tasks.into_iter().map(build).collect()
    }
}

#[cfg(not(feature = "parallel"))]
fn run_tasks<T, F>(tasks: Vec<T>, _parallel: bool, build: F) -> Vec<Solution>
where
    F: Fn(T) -> Solution,
{
    tasks.into_iter().map(build).collect()
}
