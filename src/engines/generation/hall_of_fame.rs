use crate::engines::generation::{genome::Genotype, phenotype::Phenotype};
use serde::Serialize;
use std::collections::HashSet;

#[derive(Clone, Debug, Serialize)]
pub struct ElitePattern {
    pub pattern: serde_json::Value,
    pub canonical_string: String, // For deduplication
    pub fitness: f64,
    pub genotype: Genotype,
    pub run: usize,
    pub generations: usize,
}

impl ElitePattern {
    pub fn new(
        phenotype: &Phenotype,
        genotype: Genotype,
        fitness: f64,
        run: usize,
        generations: usize,
    ) -> Self {
        Self {
            pattern: phenotype.to_json(),
            canonical_string: phenotype.to_string(),
            fitness,
            genotype,
            run,
            generations,
        }
    }
}

pub struct HallOfFame {
    patterns: Vec<ElitePattern>,
    max_size: usize,
    seen_signatures: HashSet<String>,
}

impl HallOfFame {
    pub fn new(max_size: usize) -> Self {
        Self {
            patterns: Vec::new(),
            max_size,
            seen_signatures: HashSet::new(),
        }
    }

    /// Attempt to add a pattern; duplicates of a kept pattern are rejected
    pub fn try_add(&mut self, pattern: ElitePattern) -> bool {
        if self.max_size == 0 || self.seen_signatures.contains(&pattern.canonical_string) {
            return false;
        }

        self.seen_signatures.insert(pattern.canonical_string.clone());
        self.patterns.push(pattern);

        // Fitness descending, earlier entries first on ties
        self.patterns.sort_by(|a, b| b.fitness.total_cmp(&a.fitness));

        while self.patterns.len() > self.max_size {
            if let Some(removed) = self.patterns.pop() {
                self.seen_signatures.remove(&removed.canonical_string);
            }
        }

        true
    }

    pub fn get_all(&self) -> &[ElitePattern] {
        &self.patterns
    }

    pub fn get_top_n(&self, n: usize) -> &[ElitePattern] {
        &self.patterns[..n.min(self.patterns.len())]
    }

    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }
}
