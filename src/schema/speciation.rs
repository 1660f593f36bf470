//! Species, niche and speciation result types.
//!
//! Species are recomputed views over a population. Identity across detections
//! is carried by the caller passing the previous result back in; nothing here
//! is stored between calls.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Minimum number of members for a cluster to count as a species.
pub const MIN_SPECIES_SIZE: usize = 3;

/// Speciation configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpeciationConfig {
    /// Minimum trait similarity for two agents to share a cluster.
    #[serde(default = "default_similarity_threshold")]
    pub similarity_threshold: f64,
}

impl Default for SpeciationConfig {
    fn default() -> Self {
        Self {
            similarity_threshold: default_similarity_threshold(),
        }
    }
}

pub(crate) fn default_similarity_threshold() -> f64 {
    0.7
}

impl SpeciationConfig {
    /// Validate speciation configuration.
    pub fn validate(&self) -> Result<(), SpeciationError> {
        validate_threshold(self.similarity_threshold)
    }
}

/// Check that a similarity threshold lies in `[0, 1]`.
pub fn validate_threshold(threshold: f64) -> Result<(), SpeciationError> {
    if (0.0..=1.0).contains(&threshold) {
        Ok(())
    } else {
        Err(SpeciationError::InvalidThreshold(threshold))
    }
}

/// Summary statistics describing a niche.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NicheCharacteristics {
    /// Mean lifetime earnings of the cluster.
    pub avg_earnings: f64,
    /// Mean balance of the cluster.
    pub avg_balance: f64,
    /// Most frequent skill, if any member has skills.
    pub primary_skill: Option<String>,
    /// Occurrences of each skill across all members.
    pub skill_frequency: BTreeMap<String, usize>,
    /// Number of agents in the cluster.
    pub cluster_size: usize,
}

/// Inferred ecological role of a cluster.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Niche {
    pub name: String,
    pub description: String,
    /// Specialization tag used to match species across detections.
    pub specialization: String,
    pub characteristics: NicheCharacteristics,
}

/// A detected species.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Species {
    /// Stable across detections for the same specialization.
    pub id: String,
    pub name: String,
    pub niche: Niche,
    /// Member agent ids.
    pub population: Vec<String>,
    /// Generation in which the species was first detected.
    pub emergence_generation: u32,
    /// Mean aggregate fitness of the members.
    pub avg_fitness: f64,
}

impl Species {
    /// Number of members.
    pub fn size(&self) -> usize {
        self.population.len()
    }

    /// Specialization tag of the niche.
    pub fn specialization(&self) -> &str {
        &self.niche.specialization
    }
}

/// Result of one speciation detection.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SpeciationResult {
    pub species: Vec<Species>,
    /// Size of the whole population, including agents in no species.
    pub total_population: usize,
    /// Shannon entropy of species population shares.
    pub diversity_index: f64,
    /// Species whose specialization was absent from the previous detection.
    pub speciation_events: usize,
}

/// One timestamped detection in a species history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryEntry {
    /// Milliseconds since the Unix epoch.
    pub timestamp: u64,
    pub generation: u32,
    pub result: SpeciationResult,
}

/// Time-ordered detections, oldest first.
pub type SpeciesHistory = Vec<HistoryEntry>;

/// Niche classification between the last two detections of a history.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SpeciesTrends {
    /// Specializations present only in the latest detection.
    pub emerging: Vec<String>,
    /// Specializations present in both that did not shrink by more than 20%.
    pub stable: Vec<String>,
    /// Specializations present in both that shrank by more than 20%.
    pub declining: Vec<String>,
    /// Specializations present only in the prior detection.
    pub extinct: Vec<String>,
}

impl SpeciesTrends {
    /// True when no specialization was classified.
    pub fn is_empty(&self) -> bool {
        self.emerging.is_empty()
            && self.stable.is_empty()
            && self.declining.is_empty()
            && self.extinct.is_empty()
    }
}

/// Speciation errors.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SpeciationError {
    #[error("Similarity threshold must be within [0, 1], got {0}")]
    InvalidThreshold(f64),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_threshold_valid() {
        let config = SpeciationConfig::default();
        assert_eq!(config.similarity_threshold, 0.7);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_threshold_bounds() {
        assert!(validate_threshold(0.0).is_ok());
        assert!(validate_threshold(1.0).is_ok());
        assert_eq!(
            validate_threshold(1.5),
            Err(SpeciationError::InvalidThreshold(1.5))
        );
        assert!(validate_threshold(-0.1).is_err());
        assert!(validate_threshold(f64::NAN).is_err());
    }

    #[test]
    fn test_trends_is_empty() {
        let mut trends = SpeciesTrends::default();
        assert!(trends.is_empty());
        trends.extinct.push("trading".to_string());
        assert!(!trends.is_empty());
    }
}
