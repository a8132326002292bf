use crate::error::{PatternomaticError, Result};

/// Deterministically consumes codons from a genotype, wrapping around to the
/// start a bounded number of times
pub struct GeneConsumer<'a> {
    codons: &'a [u32],
    position: usize,
    wraps: usize,
    max_wraps: usize,
}

impl<'a> GeneConsumer<'a> {
    pub fn new(codons: &'a [u32], max_wraps: usize) -> Self {
        Self {
            codons,
            position: 0,
            wraps: 0,
            max_wraps,
        }
    }

    /// Consume next codon and return value
    pub fn consume(&mut self) -> Result<u32> {
        if self.codons.is_empty() {
            return Err(PatternomaticError::DerivationExhausted { wraps: 0 });
        }

        if self.position >= self.codons.len() {
            self.wraps += 1;
            if self.wraps > self.max_wraps {
                return Err(PatternomaticError::DerivationExhausted { wraps: self.max_wraps });
            }
            self.position = 0;
        }

        let codon = self.codons[self.position];
        self.position += 1;
        Ok(codon)
    }

    /// Consume codon and map to choice index
    pub fn choose(&mut self, num_choices: usize) -> Result<usize> {
        if num_choices == 0 {
            return Err(PatternomaticError::Grammar(
                "Rule has no alternatives to choose from".to_string(),
            ));
        }
        Ok(self.consume()? as usize % num_choices)
    }

    pub fn wraps(&self) -> usize {
        self.wraps
    }
}
