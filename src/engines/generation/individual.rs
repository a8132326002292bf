use crate::engines::evaluation::FitnessEvaluator;
use crate::engines::generation::{
    codec::GenotypeCodec, genome::Genotype, operators::bit_flip_mutation, phenotype::Phenotype,
};
use crate::error::Result;
use rand::Rng;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IndividualState {
    Unevaluated,
    Decoded,
    Scored,
}

#[derive(Debug, Clone)]
enum Decoded {
    Pattern(Phenotype),
    Failed,
}

/// One genotype with its memoized phenotype and fitness
#[derive(Debug, Clone)]
pub struct Individual {
    genotype: Genotype,
    decoded: Option<Decoded>,
    fitness: Option<f64>,
}

impl Individual {
    pub fn new(genotype: Genotype) -> Self {
        Self {
            genotype,
            decoded: None,
            fitness: None,
        }
    }

    pub fn random<R: Rng>(length: usize, rng: &mut R) -> Self {
        Self::new(Genotype::random(length, rng))
    }

    pub fn state(&self) -> IndividualState {
        if self.fitness.is_some() {
            IndividualState::Scored
        } else if self.decoded.is_some() {
            IndividualState::Decoded
        } else {
            IndividualState::Unevaluated
        }
    }

    pub fn genotype(&self) -> &Genotype {
        &self.genotype
    }

    /// The cached phenotype, `None` until decoded or when decoding failed
    pub fn phenotype(&self) -> Option<&Phenotype> {
        match &self.decoded {
            Some(Decoded::Pattern(phenotype)) => Some(phenotype),
            _ => None,
        }
    }

    pub fn fitness(&self) -> Option<f64> {
        self.fitness
    }

    /// Fitness used for ordering; unscored counts as the minimum
    pub fn fitness_value(&self) -> f64 {
        self.fitness.unwrap_or(0.0)
    }

    pub fn decode(&mut self, codec: &GenotypeCodec) -> Result<Option<&Phenotype>> {
        if self.decoded.is_none() {
            let decoded = match codec.decode(&self.genotype) {
                Ok(phenotype) => Decoded::Pattern(phenotype),
                Err(e) if e.is_local() => {
                    log::debug!("Genotype {} did not decode: {}", self.genotype, e);
                    Decoded::Failed
                }
                Err(e) => return Err(e),
            };
            self.decoded = Some(decoded);
        }
        Ok(self.phenotype())
    }

    /// Decode and score once; local failures degrade to 0.0
    pub fn evaluate(&mut self, codec: &GenotypeCodec, evaluator: &FitnessEvaluator) -> Result<f64> {
        if let Some(fitness) = self.fitness {
            return Ok(fitness);
        }

        self.decode(codec)?;
        let fitness = match &self.decoded {
            Some(Decoded::Pattern(phenotype)) => match evaluator.evaluate(phenotype) {
                Ok(fitness) => fitness,
                Err(e) if e.is_local() => {
                    log::debug!("Pattern {} scored 0.0: {}", phenotype, e);
                    0.0
                }
                Err(e) => return Err(e),
            },
            _ => 0.0,
        };

        self.fitness = Some(fitness);
        Ok(fitness)
    }

    /// Bit-flip mutation; caches are dropped only when a bit changed
    pub fn mutate<R: Rng>(&mut self, probability: f64, rng: &mut R) -> usize {
        let flipped = bit_flip_mutation(&mut self.genotype, probability, rng);
        if flipped > 0 {
            self.reset();
        }
        flipped
    }

    pub fn flip(&mut self, index: usize) {
        self.genotype.flip(index);
        self.reset();
    }

    fn reset(&mut self) {
        self.decoded = None;
        self.fitness = None;
    }
}
