use super::traits::{check_probability, ConfigSection};
use crate::error::PatternomaticError;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EvolutionConfig {
    pub population_size: usize,
    pub max_generations: usize,
    pub mutation_probability: f64,
    pub crossover_probability: f64,
    pub selection_type: SelectionType,
    pub recombination_type: RecombinationType,
    pub replacement_type: ReplacementType,
    /// Elites carried over by `MuLambdaWithElitism`
    pub elite_count: usize,
    /// Bits per codon
    pub codon_width: usize,
    /// Codons in a freshly drawn genotype
    pub genotype_codons: usize,
    pub max_wraps: usize,
    /// Whether pairs that skipped crossover still go through bit-flip mutation
    pub mutate_uncrossed: bool,
    pub stop_on_max_fitness: bool,
    /// Independent runs performed by the pattern finder
    pub runs: usize,
    pub hall_of_fame_size: usize,
    pub seed: Option<u64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SelectionType {
    BinaryTournament,
    KTournament,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RecombinationType {
    RandomOnePointCrossover,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ReplacementType {
    MuPlusLambda,
    MuLambdaWithElitism,
    MuLambdaWithoutElitism,
}

impl Default for EvolutionConfig {
    fn default() -> Self {
        Self {
            population_size: 10,
            max_generations: 3,
            mutation_probability: 0.5,
            crossover_probability: 0.5,
            selection_type: SelectionType::BinaryTournament,
            recombination_type: RecombinationType::RandomOnePointCrossover,
            replacement_type: ReplacementType::MuPlusLambda,
            elite_count: 1,
            codon_width: 8,
            genotype_codons: 32,
            max_wraps: 3,
            mutate_uncrossed: true,
            stop_on_max_fitness: false,
            runs: 1,
            hall_of_fame_size: 5,
            seed: None,
        }
    }
}

impl ConfigSection for EvolutionConfig {
    fn section_name() -> &'static str {
        "evolution"
    }

    fn validate(&self) -> Result<(), PatternomaticError> {
        if self.population_size == 0 {
            return Err(PatternomaticError::Configuration(
                "Population size must be at least 1".to_string()
            ));
        }
        check_probability("Mutation probability", self.mutation_probability)?;
        check_probability("Crossover probability", self.crossover_probability)?;
        if self.codon_width == 0 || self.codon_width > 32 {
            return Err(PatternomaticError::Configuration(format!(
                "Codon width must be between 1 and 32 bits, got {}",
                self.codon_width
            )));
        }
        if self.genotype_codons == 0 {
            return Err(PatternomaticError::Configuration(
                "Genotypes need at least one codon".to_string()
            ));
        }
        if self.elite_count > self.population_size {
            return Err(PatternomaticError::Configuration(format!(
                "Elite count {} exceeds population size {}",
                self.elite_count, self.population_size
            )));
        }
        if self.runs == 0 {
            return Err(PatternomaticError::Configuration(
                "At least one run is required".to_string()
            ));
        }
        Ok(())
    }
}
