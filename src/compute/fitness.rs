//! Fitness aggregation and ranking.
//!
//! Every fitness comparison in the crate goes through [`aggregate_fitness`],
//! including per-species average fitness.

use crate::schema::{Agent, FitnessMetrics};

/// Reduce a fitness record to a single scalar: the arithmetic mean of the
/// five dimensions.
pub fn aggregate_fitness(metrics: &FitnessMetrics) -> f64 {
    metrics.as_array().iter().sum::<f64>() / FitnessMetrics::DIMENSIONS as f64
}

impl FitnessMetrics {
    /// Aggregate fitness of this record.
    pub fn aggregate(&self) -> f64 {
        aggregate_fitness(self)
    }
}

impl Agent {
    /// Aggregate fitness of this agent.
    pub fn aggregate_fitness(&self) -> f64 {
        aggregate_fitness(&self.fitness)
    }
}

/// Agents ordered by descending aggregate fitness.
///
/// The sort is stable, so agents with equal fitness keep their input order.
pub fn rank_by_fitness<'a, I>(population: I) -> Vec<&'a Agent>
where
    I: IntoIterator<Item = &'a Agent>,
{
    let mut ranked: Vec<(&Agent, f64)> = population
        .into_iter()
        .map(|a| (a, a.aggregate_fitness()))
        .collect();
    ranked.sort_by(|a, b| b.1.total_cmp(&a.1));
    ranked.into_iter().map(|(a, _)| a).collect()
}

/// Mean aggregate fitness, or 0 for no agents.
pub fn mean_fitness<'a, I>(agents: I) -> f64
where
    I: IntoIterator<Item = &'a Agent>,
{
    let (sum, count) = agents
        .into_iter()
        .fold((0.0, 0usize), |(sum, count), a| {
            (sum + a.aggregate_fitness(), count + 1)
        });
    if count == 0 { 0.0 } else { sum / count as f64 }
}

/// Aggregate fitness statistics over a population.
#[derive(Debug, Clone, Copy, PartialEq, Default, serde::Serialize, serde::Deserialize)]
pub struct PopulationStats {
    /// Number of agents.
    pub size: usize,
    /// Highest aggregate fitness.
    pub best_fitness: f64,
    /// Mean aggregate fitness.
    pub avg_fitness: f64,
    /// Population standard deviation of aggregate fitness.
    pub fitness_std: f64,
}

impl PopulationStats {
    /// Compute statistics; all zero for an empty population.
    pub fn from_population(population: &[Agent]) -> Self {
        if population.is_empty() {
            return Self::default();
        }

        let scores: Vec<f64> = population.iter().map(Agent::aggregate_fitness).collect();
        let n = scores.len() as f64;
        let avg = scores.iter().sum::<f64>() / n;
        let variance = scores.iter().map(|s| (s - avg).powi(2)).sum::<f64>() / n;
        let best = scores.iter().copied().fold(f64::NEG_INFINITY, f64::max);

        Self {
            size: population.len(),
            best_fitness: best,
            avg_fitness: avg,
            fitness_std: variance.sqrt(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn agent(id: &str, fitness: f64) -> Agent {
        Agent::new(id).with_fitness(FitnessMetrics::uniform(fitness))
    }

    #[test]
    fn test_aggregate_is_mean() {
        let metrics = FitnessMetrics {
            survival: 1.5,
            earnings: 0.5,
            offspring: 0.0,
            adaptation: 0.25,
            innovation: 0.25,
        };
        assert!((aggregate_fitness(&metrics) - 0.5).abs() < 1e-12);
        assert!((metrics.aggregate() - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_aggregate_uniform() {
        assert!((FitnessMetrics::uniform(0.8).aggregate() - 0.8).abs() < 1e-12);
        assert_eq!(FitnessMetrics::default().aggregate(), 0.0);
    }

    #[test]
    fn test_rank_by_fitness_stable() {
        let population = vec![
            agent("low", 0.1),
            agent("tie-a", 0.5),
            agent("high", 0.9),
            agent("tie-b", 0.5),
        ];

        let ranked: Vec<&str> = rank_by_fitness(&population)
            .iter()
            .map(|a| a.id.as_str())
            .collect();
        assert_eq!(ranked, vec!["high", "tie-a", "tie-b", "low"]);
    }

    #[test]
    fn test_mean_fitness() {
        let population = vec![agent("a", 0.2), agent("b", 0.4)];
        assert!((mean_fitness(&population) - 0.3).abs() < 1e-12);
        assert_eq!(mean_fitness(std::iter::empty::<&Agent>()), 0.0);
    }

    #[test]
    fn test_population_stats() {
        let population = vec![agent("a", 0.2), agent("b", 0.4), agent("c", 0.6)];
        let stats = PopulationStats::from_population(&population);

        assert_eq!(stats.size, 3);
        assert!((stats.best_fitness - 0.6).abs() < 1e-12);
        assert!((stats.avg_fitness - 0.4).abs() < 1e-12);
        assert!((stats.fitness_std - (0.08f64 / 3.0).sqrt()).abs() < 1e-12);

        assert_eq!(
            PopulationStats::from_population(&[]),
            PopulationStats::default()
        );
    }
}
