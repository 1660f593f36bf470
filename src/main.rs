//! Agent Evolution CLI - Run selection and speciation over a JSON population.

use std::fs;
use std::path::PathBuf;

use agent_evolution::{
    compute::{PopulationStats, SelectionEngine, detect_speciation},
    schema::{Agent, EngineConfig, FitnessMetrics, load_population},
};

fn main() {
    env_logger::init();

    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 {
        eprintln!("Usage: {} <population.json> [count]", args[0]);
        eprintln!();
        eprintln!("Select agents for reproduction and detect species.");
        eprintln!();
        eprintln!("Arguments:");
        eprintln!("  population.json  JSON array of agent records");
        eprintln!("  count            Agents to select (default: half the population)");
        eprintln!();
        eprintln!("An optional <population>.config.json next to the population");
        eprintln!("overrides the default engine configuration.");
        eprintln!("Example files are printed with the --example flag.");
        std::process::exit(1);
    }

    if args[1] == "--example" {
        print_example();
        return;
    }

    let population_path = PathBuf::from(&args[1]);

    let population = load_population(&population_path).unwrap_or_else(|e| {
        eprintln!("Error loading population: {}", e);
        std::process::exit(1);
    });

    // Load or default engine config
    let config_path = population_path.with_extension("config.json");
    let config: EngineConfig = if config_path.exists() {
        let config_str = fs::read_to_string(&config_path).unwrap_or_else(|e| {
            eprintln!("Error reading config file: {}", e);
            std::process::exit(1);
        });
        EngineConfig::from_json(&config_str).unwrap_or_else(|e| {
            eprintln!("Error parsing config: {}", e);
            std::process::exit(1);
        })
    } else {
        EngineConfig::default()
    };

    if let Err(e) = config.validate() {
        eprintln!("Invalid config: {}", e);
        std::process::exit(1);
    }

    let count: usize = args
        .get(2)
        .and_then(|s| s.parse().ok())
        .unwrap_or(population.len() / 2);

    let stats = PopulationStats::from_population(&population);

    println!("Agent Evolution");
    println!("===============");
    println!("Population: {} agents", stats.size);
    println!(
        "Fitness: best={:.4}, avg={:.4}, std={:.4}",
        stats.best_fitness, stats.avg_fitness, stats.fitness_std
    );
    println!();

    let mut engine = match config.random_seed {
        Some(seed) => SelectionEngine::new(seed),
        None => SelectionEngine::random(),
    };

    let selection = engine
        .select_for_reproduction(&population, count, &config.selection)
        .unwrap_or_else(|e| {
            eprintln!("Selection failed: {}", e);
            std::process::exit(1);
        });

    println!("Selection ({:?}):", selection.method);
    println!("  Selected: {}", selection.selected_ids().join(", "));
    println!("  Pressure: {:.4}", selection.selection_pressure);
    println!();

    let speciation = detect_speciation(
        &population,
        None,
        config.speciation.similarity_threshold,
    )
    .unwrap_or_else(|e| {
        eprintln!("Speciation failed: {}", e);
        std::process::exit(1);
    });

    println!("Species: {}", speciation.species.len());
    for species in &speciation.species {
        println!(
            "  {} [{}]: {} members, avg fitness {:.4}, emerged gen {}",
            species.name,
            species.niche.specialization,
            species.size(),
            species.avg_fitness,
            species.emergence_generation
        );
    }
    println!("Diversity index: {:.4}", speciation.diversity_index);
    println!("Speciation events: {}", speciation.speciation_events);
}

fn print_example() {
    let population: Vec<Agent> = (0..6)
        .map(|i| {
            let (skill, risk) = if i % 2 == 0 {
                ("trading", 0.8)
            } else {
                ("research", 0.3)
            };
            Agent::new(format!("agent-{}", i))
                .with_generation(1)
                .with_trait("risk", risk)
                .with_trait("style", skill)
                .with_skills([skill])
                .with_fitness(FitnessMetrics::uniform(0.1 * (i + 1) as f64))
                .with_economics(10.0, 25.0)
        })
        .collect();

    let config = EngineConfig {
        random_seed: Some(42),
        ..Default::default()
    };

    match (
        serde_json::to_string_pretty(&population),
        serde_json::to_string_pretty(&config),
    ) {
        (Ok(population), Ok(config)) => {
            println!("Example population (population.json):");
            println!("{}", population);
            println!();
            println!("Example configuration (population.config.json):");
            println!("{}", config);
        }
        (Err(e), _) | (_, Err(e)) => {
            eprintln!("Error serializing example: {}", e);
            std::process::exit(1);
        }
    }
}
