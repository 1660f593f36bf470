//! Niche trend classification across speciation history.

use std::collections::HashMap;

use crate::schema::{HistoryEntry, SpeciationResult, SpeciesTrends};

/// A niche is declining when its population falls below this share of its
/// previous population.
pub const DECLINE_RATIO: f64 = 0.8;

/// Classify niches by comparing the last two entries of a history.
///
/// Earlier entries are ignored. Growth counts as stable. Histories with fewer
/// than two entries produce empty trends.
pub fn analyze_species_trends(history: &[HistoryEntry]) -> SpeciesTrends {
    let [.., prior, latest] = history else {
        return SpeciesTrends::default();
    };

    let before = niche_populations(&prior.result);
    let after = niche_populations(&latest.result);

    let mut trends = SpeciesTrends::default();

    for (specialization, current) in &after {
        match before.iter().find(|(s, _)| s == specialization) {
            None => trends.emerging.push(specialization.to_string()),
            Some((_, previous)) if (*current as f64) < *previous as f64 * DECLINE_RATIO => {
                trends.declining.push(specialization.to_string())
            }
            Some(_) => trends.stable.push(specialization.to_string()),
        }
    }

    for (specialization, _) in &before {
        if !after.iter().any(|(s, _)| s == specialization) {
            trends.extinct.push(specialization.to_string());
        }
    }

    log::debug!(
        "Trends from generation {} to {}: {} emerging, {} stable, {} declining, {} extinct",
        prior.generation,
        latest.generation,
        trends.emerging.len(),
        trends.stable.len(),
        trends.declining.len(),
        trends.extinct.len()
    );

    trends
}

/// Total members per specialization, in first-seen order.
fn niche_populations(result: &SpeciationResult) -> Vec<(&str, usize)> {
    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut totals: Vec<(&str, usize)> = Vec::new();

    for species in &result.species {
        let specialization = species.specialization();
        match index.get(specialization) {
            Some(&slot) => totals[slot].1 += species.size(),
            None => {
                index.insert(specialization, totals.len());
                totals.push((specialization, species.size()));
            }
        }
    }

    totals
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{Niche, NicheCharacteristics, Species};

    fn species(specialization: &str, size: usize) -> Species {
        Species {
            id: format!("{}-g0-0", specialization),
            name: specialization.to_string(),
            niche: Niche {
                name: specialization.to_string(),
                description: String::new(),
                specialization: specialization.to_string(),
                characteristics: NicheCharacteristics {
                    avg_earnings: 0.0,
                    avg_balance: 0.0,
                    primary_skill: Some(specialization.to_string()),
                    skill_frequency: Default::default(),
                    cluster_size: size,
                },
            },
            population: (0..size).map(|i| format!("{}-{}", specialization, i)).collect(),
            emergence_generation: 0,
            avg_fitness: 0.5,
        }
    }

    fn entry(generation: u32, species: Vec<Species>) -> HistoryEntry {
        let total_population = species.iter().map(Species::size).sum();
        HistoryEntry {
            timestamp: 1_700_000_000_000 + generation as u64,
            generation,
            result: SpeciationResult {
                species,
                total_population,
                diversity_index: 0.0,
                speciation_events: 0,
            },
        }
    }

    #[test]
    fn test_short_history_is_empty() {
        assert!(analyze_species_trends(&[]).is_empty());
        let single = vec![entry(0, vec![species("trading", 5)])];
        assert!(analyze_species_trends(&single).is_empty());
    }

    #[test]
    fn test_classification() {
        let history = vec![
            entry(
                1,
                vec![
                    species("trading", 10),
                    species("research", 10),
                    species("writing", 5),
                ],
            ),
            entry(
                2,
                vec![
                    species("trading", 12),
                    species("research", 7),
                    species("building", 4),
                ],
            ),
        ];

        let trends = analyze_species_trends(&history);
        assert_eq!(trends.emerging, vec!["building"]);
        assert_eq!(trends.stable, vec!["trading"]);
        assert_eq!(trends.declining, vec!["research"]);
        assert_eq!(trends.extinct, vec!["writing"]);
    }

    #[test]
    fn test_exact_twenty_percent_drop_is_stable() {
        let history = vec![
            entry(1, vec![species("trading", 10)]),
            entry(2, vec![species("trading", 8)]),
        ];
        let trends = analyze_species_trends(&history);
        assert_eq!(trends.stable, vec!["trading"]);
        assert!(trends.declining.is_empty());
    }

    #[test]
    fn test_only_last_two_entries_used() {
        let history = vec![
            entry(1, vec![species("ancient", 9)]),
            entry(2, vec![species("trading", 5)]),
            entry(3, vec![species("trading", 5)]),
        ];
        let trends = analyze_species_trends(&history);
        assert_eq!(trends.stable, vec!["trading"]);
        assert!(trends.extinct.is_empty());
    }

    #[test]
    fn test_shared_specialization_sums_members() {
        let history = vec![
            entry(1, vec![species("trading", 5), species("trading", 5)]),
            entry(2, vec![species("trading", 7)]),
        ];
        let trends = analyze_species_trends(&history);
        assert_eq!(trends.declining, vec!["trading"]);
    }
}
