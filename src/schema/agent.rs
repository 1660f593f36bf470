//! Agent records read by the selection and speciation engines.
//!
//! Agents are owned by an external lifecycle subsystem. This crate only reads
//! them; nothing here mutates an agent.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// A single trait value.
///
/// Trait vocabularies are open, so values are restricted to the three scalar
/// kinds the similarity metric knows how to compare.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TraitValue {
    /// Boolean flag.
    Bool(bool),
    /// Numeric trait, compared by relative difference.
    Number(f64),
    /// Categorical trait, compared by equality.
    Text(String),
}

impl From<f64> for TraitValue {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<bool> for TraitValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<&str> for TraitValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for TraitValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

/// Trait mapping keyed by trait name.
pub type Traits = BTreeMap<String, TraitValue>;

/// Five-dimensional fitness record.
///
/// Each dimension is conventionally in `[0, 1]`. `survival` may exceed 1 when
/// an agent outlives its expected lifespan.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct FitnessMetrics {
    pub survival: f64,
    pub earnings: f64,
    pub offspring: f64,
    pub adaptation: f64,
    pub innovation: f64,
}

impl FitnessMetrics {
    /// Number of fitness dimensions.
    pub const DIMENSIONS: usize = 5;

    /// Create a record with every dimension set to `value`.
    pub fn uniform(value: f64) -> Self {
        Self {
            survival: value,
            earnings: value,
            offspring: value,
            adaptation: value,
            innovation: value,
        }
    }

    /// Dimensions in declaration order.
    pub fn as_array(&self) -> [f64; Self::DIMENSIONS] {
        [
            self.survival,
            self.earnings,
            self.offspring,
            self.adaptation,
            self.innovation,
        ]
    }
}

/// An agent as seen by the engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Agent {
    /// Identifier assigned by the lifecycle subsystem.
    pub id: String,
    /// Generation number (0 for genesis agents).
    #[serde(default)]
    pub generation: u32,
    /// Open trait vocabulary.
    #[serde(default)]
    pub traits: Traits,
    /// Skill tags.
    #[serde(default)]
    pub skills: Vec<String>,
    /// Fitness record.
    #[serde(default)]
    pub fitness: FitnessMetrics,
    /// Current balance.
    #[serde(default)]
    pub balance: f64,
    /// Lifetime earnings.
    #[serde(default)]
    pub total_earnings: f64,
}

impl Agent {
    /// Create an agent with no traits, skills or fitness.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            generation: 0,
            traits: Traits::new(),
            skills: Vec::new(),
            fitness: FitnessMetrics::default(),
            balance: 0.0,
            total_earnings: 0.0,
        }
    }

    /// Set the generation.
    pub fn with_generation(mut self, generation: u32) -> Self {
        self.generation = generation;
        self
    }

    /// Add or replace a trait.
    pub fn with_trait(mut self, key: impl Into<String>, value: impl Into<TraitValue>) -> Self {
        self.traits.insert(key.into(), value.into());
        self
    }

    /// Replace the skill list.
    pub fn with_skills<I, S>(mut self, skills: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.skills = skills.into_iter().map(Into::into).collect();
        self
    }

    /// Set the fitness record.
    pub fn with_fitness(mut self, fitness: FitnessMetrics) -> Self {
        self.fitness = fitness;
        self
    }

    /// Set balance and lifetime earnings.
    pub fn with_economics(mut self, balance: f64, total_earnings: f64) -> Self {
        self.balance = balance;
        self.total_earnings = total_earnings;
        self
    }
}
