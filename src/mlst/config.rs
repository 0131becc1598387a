//! Engine configuration.
//!
//! [`MlstConfig`] holds all parameters that control the evolutionary loop.

use super::selection::Selection;
use crate::error::{MlstError, Result};

/// What to do when a built tree does not reach every instance node.
///
/// On a connected instance this never happens: the initial trees span the
/// whole graph, the union of two spanning trees is connected, and adding
/// edges to a spanning tree keeps it connected. It does happen when the
/// instance itself is disconnected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum IncompleteTreePolicy {
    /// Abort the run with [`MlstError::IncompleteTree`].
    #[default]
    Reject,

    /// Keep the partial tree as a regular solution and log a warning.
    Accept,
}

/// Configuration for the MLST evolutionary search.
///
/// # Defaults
///
/// ```
/// use u_mlst::mlst::MlstConfig;
///
/// let config = MlstConfig::default();
/// assert_eq!(config.population_size, 50);
/// assert_eq!(config.max_generations, 2000);
/// ```
///
/// # Builder Pattern
///
/// ```
/// use u_mlst::mlst::MlstConfig;
///
/// let config = MlstConfig::default()
///     .with_population_size(20)
///     .with_mutation_rate(0.2)
///     .with_elitism_rate(0.2)
///     .with_max_generations(500)
///     .with_seed(1);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MlstConfig {
    /// Number of solutions per generation.
    pub population_size: usize,

    /// Generation cap. Generation numbering starts at 1.
    pub max_generations: usize,

    /// Generations without a strict improvement of the best-ever fitness
    /// before stopping.
    ///
    /// Set to 0 to disable stagnation-based termination.
    pub max_stagnant_generations: usize,

    /// Per-solution probability of mutation (0.0–1.0).
    pub mutation_rate: f64,

    /// Fraction of the population carried over unchanged (0.0–1.0).
    ///
    /// The elite size is `ceil(elitism_rate * population_size)`.
    pub elitism_rate: f64,

    /// Fraction of the edges outside a mutated tree that are injected
    /// before it is rebuilt (0.0–1.0).
    pub mutation_injection_fraction: f64,

    /// Parent selection strategy for crossover.
    pub selection: Selection,

    /// Handling of trees that miss instance nodes.
    pub incomplete_tree: IncompleteTreePolicy,

    /// Whether to build trees on rayon workers.
    ///
    /// Only effective with the `parallel` feature. Results are identical
    /// either way for a fixed seed.
    pub parallel: bool,

    /// Random seed for reproducibility.
    ///
    /// `None` uses a random seed.
    pub seed: Option<u64>,

    /// Optional wall-clock time limit in milliseconds.
    ///
    /// Checked at generation boundaries; when exceeded the best solution
    /// found so far is returned.
    pub time_limit_ms: Option<u64>,
}

impl Default for MlstConfig {
    fn default() -> Self {
        Self {
            population_size: 50,
            max_generations: 2000,
            max_stagnant_generations: 2000,
            mutation_rate: 0.2,
            elitism_rate: 0.2,
            mutation_injection_fraction: 0.1,
            selection: Selection::default(),
            incomplete_tree: IncompleteTreePolicy::default(),
            parallel: false,
            seed: None,
            time_limit_ms: None,
        }
    }
}

impl MlstConfig {
    /// Sets the population size.
    pub fn with_population_size(mut self, n: usize) -> Self {
        self.population_size = n;
        self
    }

    /// Sets the generation cap.
    pub fn with_max_generations(mut self, n: usize) -> Self {
        self.max_generations = n;
        self
    }

    /// Sets the stagnation limit (0 to disable).
    pub fn with_max_stagnant_generations(mut self, n: usize) -> Self {
        self.max_stagnant_generations = n;
        self
    }

    /// Sets the mutation rate.
    pub fn with_mutation_rate(mut self, rate: f64) -> Self {
        self.mutation_rate = rate.clamp(0.0, 1.0);
        self
    }

    /// Sets the elitism rate.
    pub fn with_elitism_rate(mut self, rate: f64) -> Self {
        self.elitism_rate = rate.clamp(0.0, 1.0);
        self
    }

    /// Sets the fraction of outside edges injected by a mutation.
    pub fn with_mutation_injection_fraction(mut self, fraction: f64) -> Self {
        self.mutation_injection_fraction = fraction.clamp(0.0, 1.0);
        self
    }

    /// Sets the selection strategy.
    pub fn with_selection(mut self, sel: Selection) -> Self {
        self.selection = sel;
        self
    }

    /// Sets the incomplete tree policy.
    pub fn with_incomplete_tree(mut self, policy: IncompleteTreePolicy) -> Self {
        self.incomplete_tree = policy;
        self
    }

    /// Enables or disables parallel tree construction.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Sets the random seed for reproducibility.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Sets the wall-clock time limit in milliseconds.
    pub fn with_time_limit_ms(mut self, ms: u64) -> Self {
        self.time_limit_ms = Some(ms);
        self
    }

    /// Preset for quick runs on small instances.
    ///
    /// - Population: 20, Generations: 100, Stagnation limit: 200
    ///
    /// The stagnation limit exceeds the generation cap, so only the cap or
    /// the optimum ends a run.
    pub fn fast() -> Self {
        Self {
            population_size: 20,
            max_generations: 100,
            max_stagnant_generations: 200,
            ..Self::default()
        }
    }

    /// Preset balancing quality and time.
    ///
    /// - Population: 50, Generations: 500, Stagnation limit: 500
    pub fn balanced() -> Self {
        Self {
            population_size: 50,
            max_generations: 500,
            max_stagnant_generations: 500,
            ..Self::default()
        }
    }

    /// Preset for long runs on large instances.
    ///
    /// - Population: 100, Generations: 2000, Stagnation limit: 2000
    pub fn quality() -> Self {
        Self {
            population_size: 100,
            max_generations: 2000,
            max_stagnant_generations: 2000,
            ..Self::default()
        }
    }

    /// Selects a preset from the instance's node count.
    ///
    /// - `node_count < 50` → [`fast()`](Self::fast)
    /// - `50 ≤ node_count < 200` → [`balanced()`](Self::balanced)
    /// - `node_count ≥ 200` → [`quality()`](Self::quality)
    pub fn auto_select(node_count: usize) -> Self {
        if node_count < 50 {
            Self::fast()
        } else if node_count < 200 {
            Self::balanced()
        } else {
            Self::quality()
        }
    }

    /// Number of solutions carried over unchanged each generation.
    pub fn elite_size(&self) -> usize {
        (self.elitism_rate * self.population_size as f64).ceil() as usize
    }

    /// Number of offspring produced by crossover each generation.
    pub fn new_solutions_size(&self) -> usize {
        self.population_size.saturating_sub(self.elite_size())
    }

    /// Validates the configuration.
    ///
    /// # Errors
    /// [`MlstError::Configuration`] describing the first invalid parameter.
    pub fn validate(&self) -> Result<()> {
        let fail = |msg: &str| Err(MlstError::Configuration(msg.into()));

        if self.population_size == 0 {
            return fail("population_size must be at least 1");
        }
        if self.max_generations == 0 {
            return fail("max_generations must be at least 1");
        }
        if !(0.0..=1.0).contains(&self.mutation_rate) {
            return fail("mutation_rate must be within [0, 1]");
        }
        if !(0.0..=1.0).contains(&self.elitism_rate) {
            return fail("elitism_rate must be within [0, 1]");
        }
        if !(0.0..=1.0).contains(&self.mutation_injection_fraction) {
            return fail("mutation_injection_fraction must be within [0, 1]");
        }
        if self.elite_size() > self.population_size {
            return fail("elite size exceeds population_size");
        }
        if self.time_limit_ms == Some(0) {
            return fail("time_limit_ms must be positive or None");
        }
        Ok(())
    }
}
