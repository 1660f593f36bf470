//! Selection algorithms for choosing which agents reproduce.
//!
//! All methods borrow the population and return references into it; the
//! population itself is never reordered or modified. Sampling methods retry
//! until they have collected `count` agents with distinct ids, bounded by
//! [`ATTEMPTS_PER_SELECTION`] attempts per requested agent.

use std::collections::HashSet;

use crate::schema::{Agent, SelectionConfig, SelectionError, SelectionMethod, SelectionResult};

use super::fitness::rank_by_fitness;
use super::rng::SelectionRng;

/// Sampling attempts allowed per requested agent.
pub const ATTEMPTS_PER_SELECTION: usize = 100;

/// Tournament selection returns the top agents directly once the requested
/// count reaches this share of the population.
pub const TOURNAMENT_SHORTCUT_RATIO: f64 = 0.8;

/// Selection engine owning its random source.
#[derive(Debug)]
pub struct SelectionEngine {
    rng: SelectionRng,
}

impl SelectionEngine {
    /// Create an engine with a seeded random source.
    pub fn new(seed: u64) -> Self {
        Self::from_rng(SelectionRng::new(seed))
    }

    /// Create an engine with an entropy-seeded random source.
    pub fn random() -> Self {
        Self::from_rng(SelectionRng::random())
    }

    /// Create an engine around an existing random source.
    pub fn from_rng(rng: SelectionRng) -> Self {
        Self { rng }
    }

    /// Tournament selection.
    ///
    /// Each tournament draws `tournament_size` distinct agents and keeps the
    /// fittest (the first drawn wins ties). Winners accumulate until `count`
    /// distinct agents are held.
    pub fn tournament_selection<'a>(
        &mut self,
        population: &'a [Agent],
        count: usize,
        tournament_size: usize,
    ) -> Result<Vec<&'a Agent>, SelectionError> {
        let pool: Vec<&Agent> = population.iter().collect();
        self.tournament_from_pool(&pool, count, tournament_size)
    }

    /// Roulette-wheel selection, proportional to aggregate fitness.
    ///
    /// Negative fitness is treated as zero. A population whose total fitness
    /// is zero is shuffled uniformly instead.
    pub fn roulette_wheel_selection<'a>(
        &mut self,
        population: &'a [Agent],
        count: usize,
    ) -> Result<Vec<&'a Agent>, SelectionError> {
        let pool: Vec<&Agent> = population.iter().collect();
        self.roulette_from_pool(&pool, count)
    }

    /// The `count` fittest agents in descending order.
    pub fn elite_selection<'a>(&self, population: &'a [Agent], count: usize) -> Vec<&'a Agent> {
        elite_selection(population, count)
    }

    /// Select `count` agents for reproduction.
    ///
    /// Up to `config.elite_count` elites are taken first; the configured method
    /// fills the remainder from the agents that were not taken as elites.
    pub fn select_for_reproduction(
        &mut self,
        population: &[Agent],
        count: usize,
        config: &SelectionConfig,
    ) -> Result<SelectionResult, SelectionError> {
        config.validate()?;

        if population.is_empty() || count == 0 {
            return Ok(SelectionResult::empty(config.method, population.len()));
        }

        if count > population.len() {
            return Err(SelectionError::CountExceedsPopulation {
                requested: count,
                available: population.len(),
            });
        }

        let elites = elite_selection(population, config.elite_count.min(count));
        let elite_ids: HashSet<&str> = elites.iter().map(|a| a.id.as_str()).collect();
        let remainder: Vec<&Agent> = population
            .iter()
            .filter(|a| !elite_ids.contains(a.id.as_str()))
            .collect();

        let needed = count - elites.len();
        let rest = if needed == 0 {
            Vec::new()
        } else {
            match config.method {
                SelectionMethod::Tournament => {
                    self.tournament_from_pool(&remainder, needed, config.tournament_size)?
                }
                SelectionMethod::Roulette => self.roulette_from_pool(&remainder, needed)?,
            }
        };

        log::debug!(
            "Selected {} elites and {} by {:?} from {} agents",
            elites.len(),
            rest.len(),
            config.method,
            population.len()
        );

        let selected = elites.into_iter().chain(rest).cloned().collect();
        Ok(SelectionResult::new(selected, config.method, population.len()))
    }

    fn tournament_from_pool<'a>(
        &mut self,
        pool: &[&'a Agent],
        count: usize,
        tournament_size: usize,
    ) -> Result<Vec<&'a Agent>, SelectionError> {
        if tournament_size == 0 {
            return Err(SelectionError::InvalidTournamentSize(tournament_size));
        }
        check_count(count, pool.len())?;
        if count == 0 {
            return Ok(Vec::new());
        }

        if count as f64 >= TOURNAMENT_SHORTCUT_RATIO * pool.len() as f64 {
            log::debug!(
                "Tournament shortcut: taking top {} of {} agents",
                count,
                pool.len()
            );
            let mut ranked = rank_by_fitness(pool.iter().copied());
            ranked.truncate(count);
            return Ok(ranked);
        }

        let mut picker = UniquePicker::new(count);
        let budget = ATTEMPTS_PER_SELECTION * count;
        let mut attempts = 0;

        while picker.len() < count {
            if attempts >= budget {
                return Err(exhausted(count, picker.len(), attempts));
            }
            attempts += 1;

            let mut winner: Option<(&Agent, f64)> = None;
            for idx in self.rng.sample_indices(pool.len(), tournament_size) {
                let contender = pool[idx];
                let fitness = contender.aggregate_fitness();
                if winner.is_none_or(|(_, best)| fitness > best) {
                    winner = Some((contender, fitness));
                }
            }

            if let Some((agent, _)) = winner {
                picker.offer(agent);
            }
        }

        log::debug!("Tournament selection used {} attempts", attempts);
        Ok(picker.into_selected())
    }

    fn roulette_from_pool<'a>(
        &mut self,
        pool: &[&'a Agent],
        count: usize,
    ) -> Result<Vec<&'a Agent>, SelectionError> {
        check_count(count, pool.len())?;
        if count == 0 {
            return Ok(Vec::new());
        }

        // Negative fitness gets no slot on the wheel.
        let weights: Vec<f64> = pool
            .iter()
            .map(|a| a.aggregate_fitness().max(0.0))
            .collect();
        let total: f64 = weights.iter().sum();

        if total <= 0.0 || !total.is_finite() {
            log::warn!(
                "Total fitness is {}; falling back to uniform shuffle of {} agents",
                total,
                pool.len()
            );
            let mut shuffled = pool.to_vec();
            self.rng.shuffle(&mut shuffled);
            shuffled.truncate(count);
            return Ok(shuffled);
        }

        let mut cumulative = 0.0;
        let wheel: Vec<f64> = weights
            .iter()
            .map(|w| {
                cumulative += w / total;
                cumulative
            })
            .collect();

        let mut picker = UniquePicker::new(count);
        let budget = ATTEMPTS_PER_SELECTION * count;
        let mut attempts = 0;

        while picker.len() < count {
            if attempts >= budget {
                return Err(exhausted(count, picker.len(), attempts));
            }
            attempts += 1;

            let spin = self.rng.unit();
            let slot = wheel
                .iter()
                .position(|&edge| spin < edge)
                .unwrap_or(pool.len() - 1);
            picker.offer(pool[slot]);
        }

        log::debug!("Roulette selection used {} attempts", attempts);
        Ok(picker.into_selected())
    }
}

/// The `count` fittest agents in descending order; equal fitness keeps input
/// order.
pub fn elite_selection(population: &[Agent], count: usize) -> Vec<&Agent> {
    if count == 0 {
        return Vec::new();
    }
    let mut ranked = rank_by_fitness(population);
    ranked.truncate(count);
    ranked
}

fn check_count(count: usize, available: usize) -> Result<(), SelectionError> {
    if count > available {
        Err(SelectionError::CountExceedsPopulation {
            requested: count,
            available,
        })
    } else {
        Ok(())
    }
}

fn exhausted(requested: usize, selected: usize, attempts: usize) -> SelectionError {
    log::warn!(
        "Selection budget exhausted: {} of {} agents after {} attempts",
        selected,
        requested,
        attempts
    );
    SelectionError::AttemptsExhausted {
        requested,
        selected,
        attempts,
    }
}

/// Accumulates agents with distinct ids in selection order.
struct UniquePicker<'a> {
    seen: HashSet<&'a str>,
    selected: Vec<&'a Agent>,
}

impl<'a> UniquePicker<'a> {
    fn new(capacity: usize) -> Self {
        Self {
            seen: HashSet::with_capacity(capacity),
            selected: Vec::with_capacity(capacity),
        }
    }

    fn offer(&mut self, agent: &'a Agent) {
        if self.seen.insert(agent.id.as_str()) {
            self.selected.push(agent);
        }
    }

    fn len(&self) -> usize {
        self.selected.len()
    }

    fn into_selected(self) -> Vec<&'a Agent> {
        self.selected
    }
}
