//! Top-level engine configuration.

use serde::{Deserialize, Serialize};

use super::{SelectionConfig, SelectionError, SpeciationConfig, SpeciationError};

/// Configuration for a selection and speciation pass.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Selection settings.
    #[serde(default)]
    pub selection: SelectionConfig,
    /// Speciation settings.
    #[serde(default)]
    pub speciation: SpeciationConfig,
    /// Random seed for reproducibility.
    #[serde(default)]
    pub random_seed: Option<u64>,
}

/// Engine configuration validation errors.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum EngineConfigError {
    #[error("Selection config validation failed: {0}")]
    Selection(#[from] SelectionError),
    #[error("Speciation config validation failed: {0}")]
    Speciation(#[from] SpeciationError),
}

impl EngineConfig {
    /// Validate engine configuration.
    pub fn validate(&self) -> Result<(), EngineConfigError> {
        self.selection.validate()?;
        self.speciation.validate()?;
        Ok(())
    }

    /// Parse a configuration from JSON.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::SelectionMethod;

    #[test]
    fn test_default_config_valid() {
        assert!(EngineConfig::default().validate().is_ok());
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config = EngineConfig::from_json(
            r#"{"selection":{"method":"roulette","elite_count":2},"random_seed":7}"#,
        )
        .unwrap();

        assert_eq!(config.selection.method, SelectionMethod::Roulette);
        assert_eq!(config.selection.elite_count, 2);
        assert_eq!(config.selection.tournament_size, 3);
        assert_eq!(config.speciation.similarity_threshold, 0.7);
        assert_eq!(config.random_seed, Some(7));
    }

    #[test]
    fn test_invalid_threshold() {
        let mut config = EngineConfig::default();
        config.speciation.similarity_threshold = 2.0;
        assert!(matches!(
            config.validate(),
            Err(EngineConfigError::Speciation(_))
        ));
    }

    #[test]
    fn test_serialization() {
        let config = EngineConfig::default();
        let json = serde_json::to_string(&config).unwrap();
        let parsed = EngineConfig::from_json(&json).unwrap();
        assert_eq!(parsed, config);
    }
}
