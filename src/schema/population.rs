//! Loading agent populations from JSON.

use std::collections::HashSet;
use std::fs;
use std::io;
use std::path::Path;

use super::Agent;

/// Population loading errors.
#[derive(Debug, thiserror::Error)]
pub enum PopulationError {
    #[error("Failed to read population: {0}")]
    Io(#[from] io::Error),
    #[error("Failed to parse population: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("Duplicate agent id: {0}")]
    DuplicateId(String),
}

/// Load a population from a JSON array of agent records.
pub fn load_population<P: AsRef<Path>>(path: P) -> Result<Vec<Agent>, PopulationError> {
    let content = fs::read_to_string(path)?;
    let population: Vec<Agent> = serde_json::from_str(&content)?;
    log::debug!("Loaded population of {} agents", population.len());
    Ok(population)
}

/// Report the first id that appears more than once.
pub fn validate_unique_ids(population: &[Agent]) -> Result<(), PopulationError> {
    let mut seen = HashSet::with_capacity(population.len());
    for agent in population {
        if !seen.insert(agent.id.as_str()) {
            return Err(PopulationError::DuplicateId(agent.id.clone()));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_load_population() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("population.json");
        let population = vec![
            Agent::new("a").with_skills(["trading"]),
            Agent::new("b").with_trait("risk", 0.3),
        ];
        fs::write(&path, serde_json::to_string_pretty(&population).unwrap()).unwrap();

        let loaded = load_population(&path).unwrap();
        assert_eq!(loaded, population);
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempdir().unwrap();
        let result = load_population(dir.path().join("missing.json"));
        assert!(matches!(result, Err(PopulationError::Io(_))));
    }

    #[test]
    fn test_load_malformed() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("bad.json");
        fs::write(&path, "{not json").unwrap();
        assert!(matches!(
            load_population(&path),
            Err(PopulationError::Parse(_))
        ));
    }

    #[test]
    fn test_duplicate_ids() {
        let population = vec![Agent::new("a"), Agent::new("b"), Agent::new("a")];
        match validate_unique_ids(&population) {
            Err(PopulationError::DuplicateId(id)) => assert_eq!(id, "a"),
            other => panic!("expected duplicate id error, got {:?}", other),
        }
        assert!(validate_unique_ids(&population[..2]).is_ok());
    }
}
