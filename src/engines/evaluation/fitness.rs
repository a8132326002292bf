use crate::{
    config::{FitnessConfig, FitnessFunctionType},
    engines::evaluation::matcher::{PatternMatcher, TokenMatcher},
    engines::generation::phenotype::Phenotype,
    error::{PatternomaticError, Result},
    types::{Sample, Span},
};
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Scores phenotypes against the corpus through a pattern matcher
#[derive(Clone)]
pub struct FitnessEvaluator {
    samples: Arc<[Sample]>,
    matcher: Arc<dyn PatternMatcher>,
    fitness_function_type: FitnessFunctionType,
    timeout: Option<Duration>,
    workers: usize,
}

impl FitnessEvaluator {
    pub fn new(
        samples: impl Into<Arc<[Sample]>>,
        matcher: Arc<dyn PatternMatcher>,
        config: &FitnessConfig,
    ) -> Self {
        Self {
            samples: samples.into(),
            matcher,
            fitness_function_type: config.fitness_function_type,
            timeout: config.timeout(),
            workers: config.workers,
        }
    }

    pub fn with_token_matcher(samples: impl Into<Arc<[Sample]>>, config: &FitnessConfig) -> Self {
        Self::new(samples, Arc::new(TokenMatcher::new()), config)
    }

    /// Fraction of samples the pattern hits, in `[0, 1]`.
    ///
    /// BASIC counts samples with any span, FULLMATCH only those with a span
    /// covering every token. The time budget is checked after every sample.
    pub fn evaluate(&self, phenotype: &Phenotype) -> Result<f64> {
        if self.samples.is_empty() {
            return Err(PatternomaticError::Configuration(
                "Cannot score patterns against an empty corpus".to_string(),
            ));
        }

        let pattern = self.matcher.compile(phenotype)?;
        let started = Instant::now();
        let mut hits = 0usize;

        for sample in self.samples.iter() {
            let spans = self.matcher.find_spans(&pattern, sample)?;
            self.check_budget(started)?;

            if self.is_hit(&spans, sample) {
                hits += 1;
            }
        }

        Ok(hits as f64 / self.samples.len() as f64)
    }

    fn check_budget(&self, started: Instant) -> Result<()> {
        match self.timeout {
            Some(budget) if started.elapsed() > budget => Err(PatternomaticError::Timeout {
                budget_ms: budget.as_millis() as u64,
            }),
            _ => Ok(()),
        }
    }

    fn is_hit(&self, spans: &[Span], sample: &Sample) -> bool {
        match self.fitness_function_type {
            FitnessFunctionType::Basic => !spans.is_empty(),
            FitnessFunctionType::Fullmatch => spans
                .iter()
                .any(|span| span.start == 0 && span.end == sample.len()),
        }
    }

    pub fn workers(&self) -> usize {
        self.workers
    }
}
