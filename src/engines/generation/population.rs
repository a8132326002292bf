use crate::config::{
    ConfigSection, EvolutionConfig, RecombinationType, ReplacementType, SelectionType,
};
use crate::engines::evaluation::FitnessEvaluator;
use crate::engines::generation::{
    codec::GenotypeCodec,
    genome::Genotype,
    individual::Individual,
    operators::{binary_tournament, one_point_crossover},
    progress::{LogProgressCallback, ProgressCallback, StopSignal},
};
use crate::error::{PatternomaticError, Result};
use crate::grammar::Grammar;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rayon::prelude::*;
use rayon::{ThreadPool, ThreadPoolBuilder};
use std::sync::Arc;

/// A generation of individuals and the evolutionary loop over it.
///
/// All random draws happen on the thread driving the population, from one
/// seeded generator; only fitness evaluation fans out to the worker pool.
pub struct Population {
    config: EvolutionConfig,
    codec: GenotypeCodec,
    evaluator: FitnessEvaluator,
    pool: ThreadPool,
    rng: StdRng,
    generation: Vec<Individual>,
    offspring: Vec<Individual>,
    crossed: Vec<bool>,
    best_individual: Individual,
    generation_count: usize,
    stop: StopSignal,
}

impl Population {
    /// Create and score the initial random generation
    pub fn new(
        grammar: Arc<Grammar>,
        evaluator: FitnessEvaluator,
        config: &EvolutionConfig,
    ) -> Result<Self> {
        config.validate()?;

        let pool = ThreadPoolBuilder::new()
            .num_threads(evaluator.workers())
            .build()
            .map_err(|e| {
                PatternomaticError::Configuration(format!("Failed to start worker pool: {}", e))
            })?;

        let mut rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        let genotype_length = config.genotype_codons * config.codon_width;
        let mut generation: Vec<Individual> = (0..config.population_size)
            .map(|_| Individual::random(genotype_length, &mut rng))
            .collect();

        let codec = GenotypeCodec::from_config(grammar, config);
        evaluate_all(&pool, &codec, &evaluator, &mut generation)?;

        let best_individual = fittest(&generation)
            .cloned()
            .ok_or_else(|| PatternomaticError::Configuration("Population is empty".to_string()))?;

        Ok(Self {
            config: config.clone(),
            codec,
            evaluator,
            pool,
            rng,
            generation,
            offspring: Vec::new(),
            crossed: Vec::new(),
            best_individual,
            generation_count: 0,
            stop: StopSignal::new(),
        })
    }

    pub fn with_stop_signal(mut self, stop: StopSignal) -> Self {
        self.stop = stop;
        self
    }

    /// Replace the first member with `genotype`, scored immediately
    pub fn seed_individual(&mut self, genotype: Genotype) -> Result<()> {
        let mut individual = Individual::new(genotype);
        individual.evaluate(&self.codec, &self.evaluator)?;

        if individual.fitness_value() > self.best_individual.fitness_value() {
            self.best_individual = individual.clone();
        }
        match self.generation.first_mut() {
            Some(first) => *first = individual,
            None => self.generation.push(individual),
        }
        Ok(())
    }

    /// Run until the generation limit, a perfect score when requested, or a stop request
    pub fn evolve(&mut self) -> Result<()> {
        self.evolve_with(&mut LogProgressCallback)
    }

    pub fn evolve_with<C: ProgressCallback>(&mut self, callback: &mut C) -> Result<()> {
        while self.generation_count < self.config.max_generations {
            if self.stop.is_stopped() {
                log::info!("Stop requested after {} generations", self.generation_count);
                break;
            }
            if self.config.stop_on_max_fitness && self.best_individual.fitness_value() >= 1.0 {
                log::info!("Maximum fitness reached after {} generations", self.generation_count);
                break;
            }

            callback.on_generation_start(self.generation_count);
            self.step()?;
            callback.on_generation_complete(
                self.generation_count - 1,
                self.best_individual.fitness_value(),
                self.mean_fitness(),
            );
        }
        Ok(())
    }

    /// One full generation: selection, recombination, mutation, replacement
    pub fn step(&mut self) -> Result<()> {
        let mating_pool = self.selection()?;
        self.recombination(mating_pool)?;
        self.mutation();
        self.replacement()?;
        self.update_best();
        self.generation_count += 1;
        Ok(())
    }

    /// Mating pool of `population_size` individuals drawn from the current generation
    pub fn selection(&mut self) -> Result<Vec<Individual>> {
        match self.config.selection_type {
            SelectionType::BinaryTournament => {
                let fitness: Vec<f64> = self.generation.iter().map(Individual::fitness_value).collect();
                Ok((0..self.config.population_size)
                    .map(|_| self.generation[binary_tournament(&fitness, &mut self.rng)].clone())
                    .collect())
            }
            SelectionType::KTournament => Err(PatternomaticError::NotSupported(
                "K_TOURNAMENT selection".to_string(),
            )),
        }
    }

    /// Fill the offspring from consecutive mating-pool pairs
    pub fn recombination(&mut self, mating_pool: Vec<Individual>) -> Result<()> {
        match self.config.recombination_type {
            RecombinationType::RandomOnePointCrossover => {
                self.offspring.clear();
                self.crossed.clear();

                for pair in mating_pool.chunks(2) {
                    match pair {
                        [first, second] if self.rng.gen::<f64>() < self.config.crossover_probability => {
                            let (child1, child2) =
                                one_point_crossover(first.genotype(), second.genotype(), &mut self.rng);
                            self.offspring.push(Individual::new(child1));
                            self.offspring.push(Individual::new(child2));
                            self.crossed.extend([true, true]);
                        }
                        _ => {
                            self.offspring.extend(pair.iter().cloned());
                            self.crossed.extend(pair.iter().map(|_| false));
                        }
                    }
                }
                Ok(())
            }
        }
    }

    /// Bit-flip the offspring; copied pairs only when `mutate_uncrossed` is set
    pub fn mutation(&mut self) {
        let probability = self.config.mutation_probability;
        for (index, individual) in self.offspring.iter_mut().enumerate() {
            let crossed = self.crossed.get(index).copied().unwrap_or(false);
            if crossed || self.config.mutate_uncrossed {
                individual.mutate(probability, &mut self.rng);
            }
        }
    }

    /// Score the offspring and form the next generation of exactly
    /// `population_size` members. Leaves the offspring empty.
    pub fn replacement(&mut self) -> Result<()> {
        evaluate_all(&self.pool, &self.codec, &self.evaluator, &mut self.offspring)?;

        let size = self.config.population_size;
        let mut offspring = std::mem::take(&mut self.offspring);
        self.crossed.clear();

        let mut next = match self.config.replacement_type {
            ReplacementType::MuPlusLambda => {
                let mut combined = std::mem::take(&mut self.generation);
                combined.append(&mut offspring);
                sort_by_fitness(&mut combined);
                combined
            }
            ReplacementType::MuLambdaWithElitism => {
                let mut elites = std::mem::take(&mut self.generation);
                sort_by_fitness(&mut elites);
                elites.truncate(self.config.elite_count.min(size));

                sort_by_fitness(&mut offspring);
                offspring.truncate(size - elites.len());
                elites.append(&mut offspring);
                elites
            }
            ReplacementType::MuLambdaWithoutElitism => {
                sort_by_fitness(&mut offspring);
                offspring
            }
        };
        next.truncate(size);

        if next.len() < size {
            let genotype_length = self.config.genotype_codons * self.config.codon_width;
            let mut padding: Vec<Individual> = (next.len()..size)
                .map(|_| Individual::random(genotype_length, &mut self.rng))
                .collect();
            evaluate_all(&self.pool, &self.codec, &self.evaluator, &mut padding)?;
            next.append(&mut padding);
        }

        self.generation = next;
        Ok(())
    }

    fn update_best(&mut self) {
        if let Some(candidate) = fittest(&self.generation) {
            if candidate.fitness_value() > self.best_individual.fitness_value() {
                self.best_individual = candidate.clone();
            }
        }
    }

    pub fn mean_fitness(&self) -> f64 {
        if self.generation.is_empty() {
            return 0.0;
        }
        self.generation.iter().map(Individual::fitness_value).sum::<f64>()
            / self.generation.len() as f64
    }

    pub fn generation(&self) -> &[Individual] {
        &self.generation
    }

    pub fn offspring(&self) -> &[Individual] {
        &self.offspring
    }

    pub fn best_individual(&self) -> &Individual {
        &self.best_individual
    }

    pub fn generation_count(&self) -> usize {
        self.generation_count
    }

    pub fn stop_signal(&self) -> StopSignal {
        self.stop.clone()
    }
}

fn evaluate_all(
    pool: &ThreadPool,
    codec: &GenotypeCodec,
    evaluator: &FitnessEvaluator,
    individuals: &mut [Individual],
) -> Result<()> {
    pool.install(|| {
        individuals
            .par_iter_mut()
            .try_for_each(|individual| individual.evaluate(codec, evaluator).map(|_| ()))
    })
}

/// Fitness descending; equal fitness keeps generation order
fn sort_by_fitness(individuals: &mut [Individual]) {
    individuals.sort_by(|a, b| b.fitness_value().total_cmp(&a.fitness_value()));
}

/// First individual with the highest fitness
fn fittest(individuals: &[Individual]) -> Option<&Individual> {
    individuals.iter().fold(None, |best, candidate| match best {
        Some(current) if current.fitness_value() >= candidate.fitness_value() => Some(current),
        _ => Some(candidate),
    })
}
