//! Trait-based speciation.
//!
//! Agents are grouped by greedy single-link clustering over trait similarity.
//! Clusters with at least [`MIN_SPECIES_SIZE`] members become species, each
//! labelled with a niche inferred from its members' skills and economics.
//!
//! Clustering walks the population in input order, so the same agents in a
//! different order may cluster differently. Callers that need stable output
//! across orderings should sort the population by a stable key first.

use std::collections::{BTreeMap, HashMap};

use crate::schema::{
    Agent, MIN_SPECIES_SIZE, Niche, NicheCharacteristics, Species, SpeciationError,
    SpeciationResult, validate_threshold,
};

use super::fitness::mean_fitness;
use super::similarity::trait_similarity;

/// Average lifetime earnings above which a cluster is a high-earner niche.
pub const HIGH_EARNER_THRESHOLD: f64 = 50.0;
/// Average balance above which a cluster is an accumulator niche.
pub const ACCUMULATOR_THRESHOLD: f64 = 20.0;
/// Generation beyond which a cluster's first member marks a survivor niche.
pub const SURVIVOR_GENERATION: u32 = 5;

/// Specialization used when nothing else applies.
pub const GENERALIST: &str = "generalist";

/// Group agents into clusters of similar traits.
///
/// Each unassigned agent opens a cluster, which then absorbs every later
/// unassigned agent whose similarity to any current member reaches
/// `threshold`. Every agent lands in exactly one cluster.
pub fn cluster_by_trait_similarity(
    population: &[Agent],
    threshold: f64,
) -> Result<Vec<Vec<&Agent>>, SpeciationError> {
    validate_threshold(threshold)?;

    let mut assigned = vec![false; population.len()];
    let mut clusters = Vec::new();

    for (i, seed) in population.iter().enumerate() {
        if assigned[i] {
            continue;
        }
        assigned[i] = true;
        let mut cluster = vec![seed];

        for (j, candidate) in population.iter().enumerate().skip(i + 1) {
            if assigned[j] {
                continue;
            }
            if cluster
                .iter()
                .any(|member| trait_similarity(member, candidate) >= threshold)
            {
                assigned[j] = true;
                cluster.push(candidate);
            }
        }

        clusters.push(cluster);
    }

    Ok(clusters)
}

/// Infer the niche a cluster occupies.
///
/// The most frequent skill wins, ties going to the skill seen first. Clusters
/// without skills fall back, in order, to high-earner, accumulator, survivor
/// and generalist.
pub fn identify_niche(cluster: &[&Agent]) -> Niche {
    let size = cluster.len();
    let avg_earnings = average(cluster.iter().map(|a| a.total_earnings), size);
    let avg_balance = average(cluster.iter().map(|a| a.balance), size);

    let mut skill_frequency: BTreeMap<String, usize> = BTreeMap::new();
    let mut first_seen: Vec<&str> = Vec::new();
    for skill in cluster.iter().flat_map(|a| a.skills.iter()) {
        let count = skill_frequency.entry(skill.clone()).or_insert(0);
        if *count == 0 {
            first_seen.push(skill);
        }
        *count += 1;
    }

    let mut primary_skill: Option<(&str, usize)> = None;
    for skill in first_seen {
        let count = skill_frequency[skill];
        if primary_skill.is_none_or(|(_, best)| count > best) {
            primary_skill = Some((skill, count));
        }
    }
    let primary_skill = primary_skill.map(|(skill, _)| skill.to_string());

    let first_generation = cluster.first().map(|a| a.generation).unwrap_or(0);

    let (specialization, name, description) = match &primary_skill {
        Some(skill) => (
            skill.clone(),
            format!("{} specialists", capitalize(skill)),
            format!("Agents concentrating on {}", skill),
        ),
        None if avg_earnings > HIGH_EARNER_THRESHOLD => (
            "high-earner".to_string(),
            "High earners".to_string(),
            format!("Agents averaging {:.1} in lifetime earnings", avg_earnings),
        ),
        None if avg_balance > ACCUMULATOR_THRESHOLD => (
            "accumulator".to_string(),
            "Accumulators".to_string(),
            format!("Agents holding an average balance of {:.1}", avg_balance),
        ),
        None if first_generation > SURVIVOR_GENERATION => (
            "survivor".to_string(),
            "Survivors".to_string(),
            format!("Lineage persisting to generation {}", first_generation),
        ),
        None => (
            GENERALIST.to_string(),
            "Generalists".to_string(),
            "Agents without a distinct specialization".to_string(),
        ),
    };

    Niche {
        name,
        description,
        specialization,
        characteristics: NicheCharacteristics {
            avg_earnings,
            avg_balance,
            primary_skill,
            skill_frequency,
            cluster_size: size,
        },
    }
}

/// Shannon entropy of species population shares.
///
/// Zero for no species or a single species.
pub fn calculate_diversity_index(species: &[Species]) -> f64 {
    if species.len() <= 1 {
        return 0.0;
    }

    let total: usize = species.iter().map(Species::size).sum();
    if total == 0 {
        return 0.0;
    }

    -species
        .iter()
        .filter(|s| s.size() > 0)
        .map(|s| {
            let p = s.size() as f64 / total as f64;
            p * p.ln()
        })
        .sum::<f64>()
}

/// Detect species in a population.
///
/// Species whose specialization already appears in `previous` keep that
/// species' id and emergence generation; all others are new and count as
/// speciation events. Without `previous`, every species is an event.
pub fn detect_speciation(
    population: &[Agent],
    previous: Option<&[Species]>,
    threshold: f64,
) -> Result<SpeciationResult, SpeciationError> {
    if population.is_empty() {
        return Ok(SpeciationResult::default());
    }

    let clusters = cluster_by_trait_similarity(population, threshold)?;
    let cluster_count = clusters.len();

    let known: HashMap<&str, &Species> = previous
        .unwrap_or_default()
        .iter()
        .rev()
        .map(|s| (s.specialization(), s))
        .collect();

    let mut species = Vec::new();
    let mut speciation_events = 0;

    for cluster in clusters
        .into_iter()
        .filter(|c| c.len() >= MIN_SPECIES_SIZE)
    {
        let niche = identify_niche(&cluster);
        let avg_fitness = mean_fitness(cluster.iter().copied());

        let (id, emergence_generation) = match known.get(niche.specialization.as_str()) {
            Some(existing) => (existing.id.clone(), existing.emergence_generation),
            None => {
                speciation_events += 1;
                let generation = cluster.iter().map(|a| a.generation).max().unwrap_or(0);
                let id = format!(
                    "{}-g{}-{}",
                    niche.specialization,
                    generation,
                    species.len()
                );
                (id, generation)
            }
        };

        species.push(Species {
            id,
            name: format!("{} (gen {})", niche.name, emergence_generation),
            niche,
            population: cluster.iter().map(|a| a.id.clone()).collect(),
            emergence_generation,
            avg_fitness,
        });
    }

    if previous.is_none() {
        speciation_events = species.len();
    }

    let diversity_index = calculate_diversity_index(&species);

    log::debug!(
        "Detected {} species from {} clusters over {} agents ({} new, diversity {:.3})",
        species.len(),
        cluster_count,
        population.len(),
        speciation_events,
        diversity_index
    );

    Ok(SpeciationResult {
        species,
        total_population: population.len(),
        diversity_index,
        speciation_events,
    })
}

fn average<I: Iterator<Item = f64>>(values: I, count: usize) -> f64 {
    if count == 0 {
        0.0
    } else {
        values.sum::<f64>() / count as f64
    }
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
