//! Benchmarks for selection and speciation.

use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};

use agent_evolution::{
    compute::{SelectionEngine, detect_speciation},
    schema::{Agent, FitnessMetrics, SelectionConfig, SelectionMethod},
};

const SKILLS: [&str; 4] = ["trading", "research", "writing", "building"];

fn population(size: usize) -> Vec<Agent> {
    (0..size)
        .map(|i| {
            let group = i % SKILLS.len();
            Agent::new(format!("agent-{}", i))
                .with_generation((i / 10) as u32)
                .with_trait(format!("focus-{}", group), 0.5 + 0.01 * (i % 7) as f64)
                .with_trait("style", SKILLS[group])
                .with_skills([SKILLS[group]])
                .with_fitness(FitnessMetrics::uniform((i % 100) as f64 / 100.0))
                .with_economics((i % 30) as f64, (i % 60) as f64)
        })
        .collect()
}

fn bench_selection(c: &mut Criterion) {
    let mut group = c.benchmark_group("select_for_reproduction");

    for method in [SelectionMethod::Tournament, SelectionMethod::Roulette] {
        for size in [100, 1000] {
            let pop = population(size);
            let config = SelectionConfig {
                method,
                elite_count: 2,
                ..Default::default()
            };
            let mut engine = SelectionEngine::new(42);

            group.bench_with_input(
                BenchmarkId::new(format!("{:?}", method), size),
                &size,
                |b, _| {
                    b.iter(|| {
                        engine
                            .select_for_reproduction(black_box(&pop), size / 4, &config)
                            .ok()
                    });
                },
            );
        }
    }

    group.finish();
}

fn bench_speciation(c: &mut Criterion) {
    let mut group = c.benchmark_group("detect_speciation");

    for size in [50, 200, 500] {
        let pop = population(size);

        group.bench_with_input(BenchmarkId::from_parameter(size), &size, |b, _| {
            b.iter(|| detect_speciation(black_box(&pop), None, 0.7).ok());
        });
    }

    group.finish();
}

criterion_group!(benches, bench_selection, bench_speciation);
criterion_main!(benches);
