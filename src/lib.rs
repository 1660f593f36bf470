//! Agent Evolution - Selection pressure and speciation for agent populations.
//!
//! This crate decides which agents of a simulated population reproduce and
//! detects emergent sub-populations ("species") by trait similarity. It never
//! creates offspring or persists anything; every operation is a pure function
//! over a caller-owned population snapshot.
//!
//! # Architecture
//!
//! The crate is split into two main modules:
//!
//! - `schema`: Agent records, configuration and result types
//! - `compute`: Fitness aggregation, selection, clustering and trend analysis
//!
//! # Example
//!
//! ```rust,no_run
//! use agent_evolution::{
//!     compute::{SelectionEngine, analyze_species_trends, detect_speciation},
//!     schema::{Agent, FitnessMetrics, HistoryEntry, SelectionConfig},
//! };
//!
//! let population: Vec<Agent> = (0..10)
//!     .map(|i| {
//!         Agent::new(format!("agent-{}", i))
//!             .with_trait("risk", if i % 2 == 0 { 0.8 } else { 0.2 })
//!             .with_skills([if i % 2 == 0 { "trading" } else { "research" }])
//!             .with_fitness(FitnessMetrics::uniform(i as f64 / 10.0))
//!     })
//!     .collect();
//!
//! // Choose parents for the next generation
//! let mut engine = SelectionEngine::new(42);
//! let selection = engine
//!     .select_for_reproduction(&population, 4, &SelectionConfig::default())
//!     .unwrap();
//! println!("Selection pressure: {:.2}", selection.selection_pressure);
//!
//! // Detect species, then re-detect with the previous species for continuity
//! let first = detect_speciation(&population, None, 0.7).unwrap();
//! let second = detect_speciation(&population, Some(&first.species), 0.7).unwrap();
//! assert_eq!(second.speciation_events, 0);
//!
//! let history = vec![
//!     HistoryEntry { timestamp: 0, generation: 0, result: first },
//!     HistoryEntry { timestamp: 1, generation: 1, result: second },
//! ];
//! println!("{:?}", analyze_species_trends(&history));
//! ```

pub mod compute;
pub mod schema;

// Re-export commonly used types
pub use compute::{
    PopulationStats, SelectionEngine, aggregate_fitness, analyze_species_trends,
    calculate_diversity_index, detect_speciation, trait_similarity,
};
pub use schema::{
    Agent, EngineConfig, FitnessMetrics, SelectionConfig, SelectionMethod, SelectionResult,
    SpeciationResult, Species, SpeciesTrends,
};
