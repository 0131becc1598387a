//! Population evaluation.

use super::types::{EvaluatedSolution, Solution};

/// Number of distinct labels in `solution`, at least 1.
///
/// The floor only matters for an empty tree (single-node component), which
/// trivially needs one label.
pub fn label_count(solution: &Solution) -> usize {
    solution.labels().len().max(1)
}

/// Evaluates a population.
///
/// Returns one [`EvaluatedSolution`] per input, sorted ascending by fitness.
/// The sort is stable, so solutions with equal fitness keep population
/// order. Each `relative_weight` is `fitness / Σ fitness`, computed after
/// the full sweep; note that it grows with fitness.
pub fn evaluate(population: Vec<Solution>) -> Vec<EvaluatedSolution> {
    let fitnesses: Vec<usize> = population.iter().map(label_count).collect();
    let total: usize = fitnesses.iter().sum();

    let mut evaluated: Vec<EvaluatedSolution> = population
        .into_iter()
        .zip(fitnesses)
        .map(|(solution, fitness)| EvaluatedSolution {
            solution,
            fitness,
            relative_weight: fitness as f64 / total as f64,
        })
        .collect();

    evaluated.sort_by_key(|e| e.fitness);
    evaluated
}

/// Mean fitness of an evaluated population; `0.0` when empty.
pub(crate) fn mean_fitness(evaluated: &[EvaluatedSolution]) -> f64 {
    if evaluated.is_empty() {
        return 0.0;
    }
    evaluated.iter().map(|e| e.fitness as f64).sum::<f64>() / evaluated.len() as f64
}
