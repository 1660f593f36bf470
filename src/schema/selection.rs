//! Selection configuration and result types.

use serde::{Deserialize, Serialize};

use super::Agent;

/// Selection method used to fill the non-elite part of a selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SelectionMethod {
    /// Repeated best-of-k tournaments.
    #[default]
    Tournament,
    /// Fitness-proportionate wheel.
    Roulette,
}

/// Selection configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SelectionConfig {
    /// Method used after elites are taken.
    #[serde(default)]
    pub method: SelectionMethod,
    /// Agents drawn per tournament.
    #[serde(default = "default_tournament_size")]
    pub tournament_size: usize,
    /// Top agents copied into the selection before sampling.
    #[serde(default)]
    pub elite_count: usize,
}

impl Default for SelectionConfig {
    fn default() -> Self {
        Self {
            method: SelectionMethod::default(),
            tournament_size: default_tournament_size(),
            elite_count: 0,
        }
    }
}

pub(crate) fn default_tournament_size() -> usize {
    3
}

impl SelectionConfig {
    /// Validate selection configuration.
    pub fn validate(&self) -> Result<(), SelectionError> {
        if self.tournament_size == 0 {
            return Err(SelectionError::InvalidTournamentSize(self.tournament_size));
        }
        Ok(())
    }
}

/// Outcome of a selection for reproduction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SelectionResult {
    /// Selected agents, unique by id.
    pub selected: Vec<Agent>,
    /// Method used for the non-elite remainder.
    pub method: SelectionMethod,
    /// Size of the population selected from.
    pub total_population: usize,
    /// `selected.len() / total_population`, or 0 for an empty population.
    pub selection_pressure: f64,
}

impl SelectionResult {
    /// Build a result, computing selection pressure.
    pub fn new(selected: Vec<Agent>, method: SelectionMethod, total_population: usize) -> Self {
        let selection_pressure = if total_population == 0 {
            0.0
        } else {
            selected.len() as f64 / total_population as f64
        };

        Self {
            selected,
            method,
            total_population,
            selection_pressure,
        }
    }

    /// Empty result for an empty population or a zero count.
    pub fn empty(method: SelectionMethod, total_population: usize) -> Self {
        Self::new(Vec::new(), method, total_population)
    }

    /// Ids of the selected agents, in selection order.
    pub fn selected_ids(&self) -> Vec<&str> {
        self.selected.iter().map(|a| a.id.as_str()).collect()
    }
}

/// Selection errors.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SelectionError {
    #[error("Cannot select {requested} agents from a population of {available}")]
    CountExceedsPopulation { requested: usize, available: usize },
    #[error("Tournament size must be at least 1, got {0}")]
    InvalidTournamentSize(usize),
    #[error(
        "Selection gave up after {attempts} attempts with {selected} of {requested} unique agents"
    )]
    AttemptsExhausted {
        requested: usize,
        selected: usize,
        attempts: usize,
    },
}
