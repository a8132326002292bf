mod common;

use patternomatic::config::{
    EvolutionConfig, FitnessConfig, FitnessFunctionType, GrammarConfig, ReplacementType,
    SelectionType,
};
use patternomatic::engines::evaluation::FitnessEvaluator;
use patternomatic::engines::generation::{
    Genotype, Individual, Population, ProgressCallback, StopSignal,
};
use patternomatic::grammar::{bnf, dynamic_grammar, Grammar, Production};
use patternomatic::types::Value;
use patternomatic::PatternomaticError;
use std::sync::Arc;

fn setup(fitness_function_type: FitnessFunctionType) -> (Arc<Grammar>, FitnessEvaluator) {
    setup_with(FitnessConfig {
        fitness_function_type,
        ..FitnessConfig::default()
    })
}

fn setup_with(config: FitnessConfig) -> (Arc<Grammar>, FitnessEvaluator) {
    let samples = common::annotate(&common::ANIMAL_TEXTS);
    let (_, grammar) = dynamic_grammar(&samples, &GrammarConfig::default()).unwrap();
    (
        Arc::new(grammar),
        FitnessEvaluator::with_token_matcher(samples, &config),
    )
}

fn seeded(replacement_type: ReplacementType) -> EvolutionConfig {
    EvolutionConfig {
        replacement_type,
        seed: Some(1234),
        ..EvolutionConfig::default()
    }
}

fn position(grammar: &Grammar, symbol: &str, wanted: &Production) -> u32 {
    grammar
        .alternatives(symbol)
        .and_then(|alternatives| alternatives.iter().position(|p| p == wanted))
        .expect("alternative should exist") as u32
}

/// Codons deriving the single-token pattern `[{ORTH: "a"}]`
fn article_genotype(grammar: &Grammar) -> Genotype {
    let orth = position(grammar, bnf::F, &Production::symbol("ORTH"));
    let article = position(grammar, "ORTH", &Production::value(Value::from("a")));
    Genotype::from_codons(&[0, 0, 0, orth, article], 8)
}

#[test]
fn test_initial_generation_is_scored() {
    let (grammar, evaluator) = setup(FitnessFunctionType::Basic);
    let population = Population::new(grammar, evaluator, &seeded(ReplacementType::MuPlusLambda)).unwrap();

    assert_eq!(population.generation().len(), 10);
    assert!(population.generation().iter().all(|i| i.fitness().is_some()));
    assert!(population.offspring().is_empty());
    assert_eq!(population.generation_count(), 0);
}

#[test]
fn test_replacements_keep_population_size() {
    for replacement_type in [
        ReplacementType::MuPlusLambda,
        ReplacementType::MuLambdaWithElitism,
        ReplacementType::MuLambdaWithoutElitism,
    ] {
        let (grammar, evaluator) = setup(FitnessFunctionType::Fullmatch);
        let mut population = Population::new(grammar, evaluator, &seeded(replacement_type)).unwrap();

        let mating_pool = population.selection().unwrap();
        assert_eq!(mating_pool.len(), 10);

        population.recombination(mating_pool).unwrap();
        assert_eq!(population.offspring().len(), 10);

        population.mutation();
        population.replacement().unwrap();

        assert_eq!(population.generation().len(), 10, "{:?}", replacement_type);
        assert!(population.offspring().is_empty(), "{:?}", replacement_type);
    }
}

#[test]
fn test_odd_population_copies_trailing_individual() {
    let (grammar, evaluator) = setup(FitnessFunctionType::Basic);
    let config = EvolutionConfig {
        population_size: 5,
        ..seeded(ReplacementType::MuLambdaWithoutElitism)
    };
    let mut population = Population::new(grammar, evaluator, &config).unwrap();

    let mating_pool = population.selection().unwrap();
    population.recombination(mating_pool).unwrap();
    assert_eq!(population.offspring().len(), 5);

    population.replacement().unwrap();
    assert_eq!(population.generation().len(), 5);
}

#[test]
fn test_k_tournament_is_not_supported() {
    let (grammar, evaluator) = setup(FitnessFunctionType::Basic);
    let config = EvolutionConfig {
        selection_type: SelectionType::KTournament,
        ..seeded(ReplacementType::MuPlusLambda)
    };
    let mut population = Population::new(grammar, evaluator, &config).unwrap();

    assert!(matches!(
        population.selection(),
        Err(PatternomaticError::NotSupported(_))
    ));
    assert!(matches!(
        population.evolve(),
        Err(PatternomaticError::NotSupported(_))
    ));
}

struct Recorder {
    best: Vec<f64>,
}

impl ProgressCallback for Recorder {
    fn on_generation_start(&mut self, _generation: usize) {}

    fn on_generation_complete(&mut self, _generation: usize, best_fitness: f64, _mean_fitness: f64) {
        self.best.push(best_fitness);
    }
}

#[test]
fn test_best_fitness_never_decreases() {
    let (grammar, evaluator) = setup(FitnessFunctionType::Basic);
    let config = EvolutionConfig {
        max_generations: 8,
        ..seeded(ReplacementType::MuLambdaWithoutElitism)
    };
    let mut population = Population::new(grammar, evaluator, &config).unwrap();
    let mut recorder = Recorder { best: Vec::new() };

    population.evolve_with(&mut recorder).unwrap();

    assert_eq!(recorder.best.len(), 8);
    assert_eq!(population.generation_count(), 8);
    assert!(recorder.best.windows(2).all(|w| w[0] <= w[1]));
}

#[test]
fn test_seeded_pattern_carries_evolution() {
    let (grammar, evaluator) = setup(FitnessFunctionType::Basic);
    let genotype = article_genotype(&grammar);
    let config = EvolutionConfig {
        population_size: 10,
        max_generations: 3,
        mutation_probability: 0.5,
        ..seeded(ReplacementType::MuPlusLambda)
    };
    let mut population = Population::new(grammar, evaluator, &config).unwrap();

    population.seed_individual(genotype).unwrap();
    population.evolve().unwrap();

    assert!(population.best_individual().fitness_value() >= 0.4);
    assert!(population.generation()[0].fitness_value() >= 0.4);
    assert_eq!(population.generation_count(), 3);
}

#[test]
fn test_stop_on_max_fitness() {
    let (grammar, evaluator) = setup(FitnessFunctionType::Basic);
    let genotype = article_genotype(&grammar);
    let config = EvolutionConfig {
        stop_on_max_fitness: true,
        ..seeded(ReplacementType::MuPlusLambda)
    };
    let mut population = Population::new(grammar, evaluator, &config).unwrap();

    population.seed_individual(genotype).unwrap();
    population.evolve().unwrap();

    assert_eq!(population.best_individual().fitness_value(), 1.0);
    assert_eq!(population.generation_count(), 0);
}

#[test]
fn test_stop_signal_is_checked_between_generations() {
    let (grammar, evaluator) = setup(FitnessFunctionType::Basic);
    let stop = StopSignal::new();
    let mut population = Population::new(grammar, evaluator, &seeded(ReplacementType::MuPlusLambda))
        .unwrap()
        .with_stop_signal(stop.clone());

    population.step().unwrap();
    stop.stop();
    population.evolve().unwrap();

    assert_eq!(population.generation_count(), 1);
}

#[test]
fn test_same_seed_same_result() {
    let run = || {
        let (grammar, evaluator) = setup(FitnessFunctionType::Basic);
        let mut population =
            Population::new(grammar, evaluator, &seeded(ReplacementType::MuLambdaWithElitism)).unwrap();
        population.evolve().unwrap();
        population
            .generation()
            .iter()
            .map(|i| i.genotype().to_string())
            .collect::<Vec<_>>()
    };

    assert_eq!(run(), run());
}

fn genotypes(individuals: &[Individual]) -> Vec<Genotype> {
    individuals.iter().map(|i| i.genotype().clone()).collect()
}

#[test]
fn test_uncrossed_pairs_skip_mutation_when_disabled() {
    let (grammar, evaluator) = setup(FitnessFunctionType::Basic);
    let config = EvolutionConfig {
        crossover_probability: 0.0,
        mutation_probability: 1.0,
        mutate_uncrossed: false,
        ..seeded(ReplacementType::MuPlusLambda)
    };
    let mut population = Population::new(grammar, evaluator, &config).unwrap();

    let mating_pool = population.selection().unwrap();
    let expected = genotypes(&mating_pool);
    population.recombination(mating_pool).unwrap();
    population.mutation();

    assert_eq!(genotypes(population.offspring()), expected);
    assert!(population.offspring().iter().all(|i| i.fitness().is_some()));
}

#[test]
fn test_uncrossed_pairs_mutate_when_enabled() {
    let (grammar, evaluator) = setup(FitnessFunctionType::Basic);
    let config = EvolutionConfig {
        crossover_probability: 0.0,
        mutation_probability: 1.0,
        mutate_uncrossed: true,
        ..seeded(ReplacementType::MuPlusLambda)
    };
    let mut population = Population::new(grammar, evaluator, &config).unwrap();

    let mating_pool = population.selection().unwrap();
    let expected = genotypes(&mating_pool);
    population.recombination(mating_pool).unwrap();
    population.mutation();

    let mutated = genotypes(population.offspring());
    assert!(mutated.iter().zip(&expected).all(|(after, before)| after != before));
}

#[test]
fn test_elitism_keeps_previous_best() {
    let (grammar, evaluator) = setup(FitnessFunctionType::Basic);
    let genotype = article_genotype(&grammar);
    let config = EvolutionConfig {
        elite_count: 2,
        ..seeded(ReplacementType::MuLambdaWithElitism)
    };
    let mut population = Population::new(grammar, evaluator, &config).unwrap();
    population.seed_individual(genotype).unwrap();

    let mut ranked: Vec<&Individual> = population.generation().iter().collect();
    ranked.sort_by(|a, b| b.fitness_value().total_cmp(&a.fitness_value()));
    let elites: Vec<Genotype> = ranked[..2].iter().map(|i| i.genotype().clone()).collect();
    let best = ranked[0].fitness_value();

    let mating_pool = population.selection().unwrap();
    population.recombination(mating_pool).unwrap();
    population.mutation();
    population.replacement().unwrap();

    assert_eq!(genotypes(&population.generation()[..2]), elites);
    assert_eq!(population.generation()[0].fitness_value(), best);
}

#[test]
fn test_worker_count_does_not_change_result() {
    let run = |workers: usize| {
        let (grammar, evaluator) = setup_with(FitnessConfig {
            workers,
            ..FitnessConfig::default()
        });
        let config = EvolutionConfig {
            max_generations: 4,
            ..seeded(ReplacementType::MuLambdaWithElitism)
        };
        let mut population = Population::new(grammar, evaluator, &config).unwrap();
        population.evolve().unwrap();
        (
            genotypes(population.generation()),
            population.best_individual().fitness_value(),
        )
    };

    assert_eq!(run(1), run(4));
}
