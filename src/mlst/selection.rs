//! Parent selection strategies.
//!
//! Selection operates on an evaluated population (sorted ascending by
//! fitness) and returns an index into it.
//!
//! # References
//!
//! - Blickle & Thiele (1996), "A Comparison of Selection Schemes used in
//!   Evolutionary Algorithms"
//! - Goldberg & Deb (1991), "A Comparative Analysis of Selection Schemes
//!   Used in Genetic Algorithms"

use super::types::EvaluatedSolution;
use rand::Rng;

/// Selection strategy for choosing crossover parents.
///
/// # Examples
///
/// ```
/// use u_mlst::mlst::Selection;
///
/// // Fitness-proportionate wheel on the raw relative weight
/// let sel = Selection::Roulette;
///
/// // Tournament with size 3
/// let sel = Selection::Tournament(3);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Selection {
    /// Roulette wheel on [`EvaluatedSolution::relative_weight`] as-is.
    ///
    /// The weight is `fitness / Σ fitness`, so solutions using **more**
    /// labels are drawn more often. This reproduces the reference
    /// behavior of the MLST search and is the default.
    #[default]
    Roulette,

    /// Roulette wheel on `1 / fitness`, favoring solutions with fewer labels.
    InverseRoulette,

    /// Tournament selection: pick `k` solutions at random, keep the best.
    ///
    /// # Complexity
    /// O(k) per selection
    Tournament(usize),

    /// Linear rank selection: weight `n - rank`, best rank 0.
    ///
    /// Reference: Baker (1985), "Adaptive Selection Methods for Genetic
    /// Algorithms"
    Rank,
}

impl Selection {
    /// Selects a parent index from `population`.
    ///
    /// `population` must be sorted ascending by fitness, as returned by
    /// [`evaluate`](super::fitness::evaluate).
    ///
    /// # Panics
    /// Panics if `population` is empty.
    pub fn select<R: Rng + ?Sized>(&self, population: &[EvaluatedSolution], rng: &mut R) -> usize {
        assert!(
            !population.is_empty(),
            "cannot select from empty population"
        );

        match self {
            Selection::Roulette => {
                roulette(population.iter().map(|e| e.relative_weight), rng)
            }
            Selection::InverseRoulette => {
                roulette(population.iter().map(|e| 1.0 / e.fitness as f64), rng)
            }
            Selection::Tournament(k) => tournament(population, *k, rng),
            Selection::Rank => rank(population.len(), rng),
        }
    }
}

/// Cumulative-weight wheel: draws `t ∈ [0, Σw)` and returns the first index
/// whose running sum exceeds `t`.
fn roulette<I, R>(weights: I, rng: &mut R) -> usize
where
    I: ExactSizeIterator<Item = f64> + Clone,
    R: Rng + ?Sized,
{
    let n = weights.len();
    if n == 1 {
        return 0;
    }

    let total: f64 = weights.clone().sum();
    if total <= 0.0 {
        return rng.random_range(0..n);
    }

    let threshold = rng.random_range(0.0..total);
    let mut cumulative = 0.0;
    for (i, w) in weights.enumerate() {
        cumulative += w;
        if cumulative > threshold {
            return i;
        }
    }

    n - 1 // floating-point fallback
}

fn tournament<R: Rng + ?Sized>(population: &[EvaluatedSolution], k: usize, rng: &mut R) -> usize {
    let k = k.max(1);
    let n = population.len();

    let mut best_idx = rng.random_range(0..n);
    for _ in 1..k {
        let idx = rng.random_range(0..n);
        if population[idx].fitness < population[best_idx].fitness {
            best_idx = idx;
        }
    }
    best_idx
}

/// Population is already sorted best-first, so rank equals index.
fn rank<R: Rng + ?Sized>(n: usize, rng: &mut R) -> usize {
    if n == 1 {
        return 0;
    }

    let total = (n * (n + 1)) as f64 / 2.0;
    let threshold = rng.random_range(0.0..total);
    let mut cumulative = 0.0;
    for idx in 0..n {
        cumulative += (n - idx) as f64;
        if cumulative > threshold {
            return idx;
        }
    }
    n - 1
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mlst::fitness::evaluate;
    use crate::mlst::types::Solution;
    use crate::graph::Edge;
    use crate::random::create_rng;

    /// Population with fitness 1, 2, 3, 4 (sorted).
    fn population() -> Vec<EvaluatedSolution> {
        let pop = (1..=4u32)
            .map(|labels| {
                let edges = (0..4u32).map(|i| Edge::new(i, i + 1, i % labels)).collect();
                Solution::new(0, edges)
            })
            .collect();
        evaluate(pop)
    }

    fn counts(sel: Selection, pop: &[EvaluatedSolution], draws: usize) -> Vec<usize> {
        let mut rng = create_rng(42);
        let mut counts = vec![0usize; pop.len()];
        for _ in 0..draws {
            counts[sel.select(pop, &mut rng)] += 1;
        }
        counts
    }

    #[test]
    fn test_population_fixture() {
        let fits: Vec<usize> = population().iter().map(|e| e.fitness).collect();
        assert_eq!(fits, vec![1, 2, 3, 4]);
    }

    #[test]
    fn test_roulette_follows_raw_weight() {
        let pop = population();
        let c = counts(Selection::Roulette, &pop, 20_000);
        // Expected shares 0.1, 0.2, 0.3, 0.4: the worst is drawn most.
        assert!(c[3] > c[0] * 2, "counts {c:?}");
        assert!((c[0] as f64 / 20_000.0 - 0.1).abs() < 0.02, "counts {c:?}");
        assert!((c[3] as f64 / 20_000.0 - 0.4).abs() < 0.02, "counts {c:?}");
    }

    #[test]
    fn test_inverse_roulette_favors_best() {
        let pop = population();
        let c = counts(Selection::InverseRoulette, &pop, 20_000);
        assert!(c[0] > c[3] * 2, "counts {c:?}");
    }

    #[test]
    fn test_tournament_favors_best() {
        let pop = population();
        let c = counts(Selection::Tournament(4), &pop, 10_000);
        assert!(c[0] > c[3], "counts {c:?}");
    }

    #[test]
    fn test_rank_favors_best() {
        let pop = population();
        let c = counts(Selection::Rank, &pop, 10_000);
        assert!(c[0] > c[3], "counts {c:?}");
    }

    #[test]
    fn test_single_individual() {
        let pop = evaluate(vec![Solution::new(0, [Edge::new(0, 1, 1)].into_iter().collect())]);
        let mut rng = create_rng(42);
        for sel in [
            Selection::Roulette,
            Selection::InverseRoulette,
            Selection::Tournament(3),
            Selection::Rank,
        ] {
            assert_eq!(sel.select(&pop, &mut rng), 0);
        }
    }

    #[test]
    #[should_panic(expected = "cannot select from empty population")]
    fn test_empty_population_panics() {
        let mut rng = create_rng(42);
        Selection::Roulette.select(&[], &mut rng);
    }
}
