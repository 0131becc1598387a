//! Evolutionary loop execution.
//!
//! [`EvolutionEngine`] orchestrates the complete search:
//! initialization → evaluation → elitism → crossover → mutation → repeat,
//! until the optimum (a single-label tree), stagnation, the generation cap,
//! cancellation or the time limit stops it.

use super::config::MlstConfig;
use super::fitness::{evaluate, mean_fitness};
use super::operators::{check_coverage, crossover, elitism, initial_population, mutate};
use super::types::{EvaluatedSolution, Solution};
use crate::error::Result;
use crate::graph::GraphInstance;
use crate::random::{create_rng, MlstRng};
use rand::Rng;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info};

/// Fitness of a tree that uses a single label; no tree can do better.
pub const OPTIMAL_FITNESS: usize = 1;

/// Why a run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum StopReason {
    /// A single-label tree was found.
    OptimumReached,
    /// No strict improvement for `max_stagnant_generations` generations.
    Stagnated,
    /// `max_generations` reached.
    MaxGenerations,
    /// The cancellation flag was raised.
    Cancelled,
    /// The wall-clock limit elapsed.
    TimeLimit,
}

/// Result of an MLST search.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MlstResult {
    /// Best solution of the first generation.
    pub first_generation_best: EvaluatedSolution,

    /// Best solution found during the entire run.
    pub best: EvaluatedSolution,

    /// Number of generations evaluated (the first generation counts as 1).
    pub generations: usize,

    /// Why the run ended.
    pub stop_reason: StopReason,

    /// Best-ever fitness after each evaluated generation.
    ///
    /// Monotone non-increasing; one entry per generation.
    pub fitness_history: Vec<usize>,
}

impl MlstResult {
    /// Labels saved between the first generation's best and the overall best.
    pub fn improvement(&self) -> usize {
        self.first_generation_best.fitness - self.best.fitness
    }

    /// Relative deviation of the best fitness from a best-known solution,
    /// in percent: `100 * (best - best_known) / best_known`.
    pub fn percentage_deviation(&self, best_known: usize) -> f64 {
        100.0 * (self.best.fitness as f64 - best_known as f64) / best_known as f64
    }
}

/// Executes the MLST evolutionary search on one instance.
///
/// The engine owns its random generator; every random decision of a run
/// (roots, shuffles, parent draws, mutation trials) is drawn from it, so a
/// fixed seed reproduces the run exactly.
///
/// # Usage
///
/// ```
/// use u_mlst::graph::{Edge, GraphInstance};
/// use u_mlst::mlst::{EvolutionEngine, MlstConfig};
///
/// let instance = GraphInstance::from_edges([
///     Edge::new(0, 1, 5),
///     Edge::new(1, 2, 5),
///     Edge::new(0, 2, 7),
/// ])?;
/// let config = MlstConfig::default()
///     .with_population_size(5)
///     .with_max_generations(50)
///     .with_seed(1);
///
/// let result = EvolutionEngine::new(&instance, config)?.run()?;
/// assert_eq!(result.best.fitness, 1);
/// # Ok::<(), u_mlst::MlstError>(())
/// ```
pub struct EvolutionEngine<'a, R: Rng = MlstRng> {
    instance: &'a GraphInstance,
    config: MlstConfig,
    rng: R,
}

impl<'a> EvolutionEngine<'a, MlstRng> {
    /// Creates an engine seeded from `config.seed` (random when `None`).
    ///
    /// # Errors
    /// [`MlstError::Configuration`](crate::MlstError::Configuration) if the
    /// configuration is invalid.
    pub fn new(instance: &'a GraphInstance, config: MlstConfig) -> Result<Self> {
        let seed = config.seed.unwrap_or_else(rand::random);
        Self::with_rng(instance, config, create_rng(seed))
    }
}

impl<'a, R: Rng> EvolutionEngine<'a, R> {
    /// Creates an engine that draws from the given generator.
    ///
    /// `config.seed` is ignored.
    pub fn with_rng(instance: &'a GraphInstance, config: MlstConfig, rng: R) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            instance,
            config,
            rng,
        })
    }

    /// The validated configuration.
    pub fn config(&self) -> &MlstConfig {
        &self.config
    }

    /// Runs the search to completion.
    pub fn run(self) -> Result<MlstResult> {
        self.run_with_cancel(None)
    }

    /// Runs the search with an optional cancellation token.
    ///
    /// The flag is checked once per generation, after evaluation. When it
    /// is set the best solution found so far is returned with
    /// [`StopReason::Cancelled`].
    ///
    /// # Errors
    /// [`MlstError::IncompleteTree`](crate::MlstError::IncompleteTree) if a
    /// tree misses instance nodes under
    /// [`IncompleteTreePolicy::Reject`](super::IncompleteTreePolicy::Reject).
    pub fn run_with_cancel(mut self, cancel: Option<Arc<AtomicBool>>) -> Result<MlstResult> {
        let start = Instant::now();
        let config = &self.config;
        let instance = self.instance;

        info!(
            nodes = instance.node_count(),
            edges = instance.edge_count(),
            labels = instance.label_count(),
            population_size = config.population_size,
            max_generations = config.max_generations,
            "starting MLST search"
        );

        let elite_size = config.elite_size();
        let new_solutions_size = config.new_solutions_size();

        let population = initial_population(
            instance,
            config.population_size,
            config.parallel,
            &mut self.rng,
        );
        check_coverage(&population, instance, config.incomplete_tree)?;

        let mut evaluated = evaluate(population);
        let first_generation_best = evaluated[0].clone();
        let mut best = first_generation_best.clone();
        let mut last_improvement = 1usize;
        let mut generation = 1usize;
        let mut fitness_history = vec![best.fitness];

        let stop_reason = loop {
            debug!(
                generation,
                best = best.fitness,
                generation_best = evaluated[0].fitness,
                mean = mean_fitness(&evaluated),
                "generation evaluated"
            );

            if let Some(reason) =
                self.should_stop(best.fitness, generation, last_improvement, start, &cancel)
            {
                break reason;
            }

            let elite = elitism(&evaluated, elite_size)?;
            let children = crossover(
                instance,
                &evaluated,
                new_solutions_size,
                config.selection,
                config.parallel,
                &mut self.rng,
            );
            let offspring = mutate(
                instance,
                children,
                config.mutation_rate,
                config.mutation_injection_fraction,
                config.parallel,
                &mut self.rng,
            )?;
            check_coverage(&offspring, instance, config.incomplete_tree)?;

            let mut population: Vec<Solution> = elite;
            population.extend(offspring);
            evaluated = evaluate(population);
            generation += 1;

            if evaluated[0].fitness < best.fitness {
                best = evaluated[0].clone();
                last_improvement = generation;
            }
            fitness_history.push(best.fitness);
        };

        info!(
            ?stop_reason,
            generations = generation,
            first_fitness = first_generation_best.fitness,
            best_fitness = best.fitness,
            elapsed_ms = start.elapsed().as_millis() as u64,
            "MLST search finished"
        );

        Ok(MlstResult {
            first_generation_best,
            best,
            generations: generation,
            stop_reason,
            fitness_history,
        })
    }

    fn should_stop(
        &self,
        best_fitness: usize,
        generation: usize,
        last_improvement: usize,
        start: Instant,
        cancel: &Option<Arc<AtomicBool>>,
    ) -> Option<StopReason> {
        let config = &self.config;

        if best_fitness <= OPTIMAL_FITNESS {
            return Some(StopReason::OptimumReached);
        }
        if cancel
            .as_ref()
            .is_some_and(|flag| flag.load(Ordering::Relaxed))
        {
            return Some(StopReason::Cancelled);
        }
        if let Some(limit) = config.time_limit_ms {
            if start.elapsed().as_millis() >= u128::from(limit) {
                return Some(StopReason::TimeLimit);
            }
        }
        if config.max_stagnant_generations > 0
            && generation - last_improvement >= config.max_stagnant_generations
        {
            return Some(StopReason::Stagnated);
        }
        if generation >= config.max_generations {
            return Some(StopReason::MaxGenerations);
        }
        None
    }
}

// ============================================================================
// Tests
// ============================================================================
