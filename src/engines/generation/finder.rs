use crate::config::AppConfig;
use crate::engines::evaluation::{FitnessEvaluator, PatternMatcher, TokenMatcher};
use crate::engines::generation::{
    hall_of_fame::{ElitePattern, HallOfFame},
    population::Population,
    progress::{LogProgressCallback, ProgressCallback, StopSignal},
};
use crate::error::Result;
use crate::grammar::dynamic_grammar;
use crate::types::Sample;
use std::sync::Arc;

/// Runs independent seeded evolutions over one corpus and collects the best
/// pattern of each run
pub struct PatternFinder {
    config: AppConfig,
    matcher: Arc<dyn PatternMatcher>,
    stop: StopSignal,
}

impl PatternFinder {
    pub fn new(config: AppConfig) -> Self {
        Self::with_matcher(config, Arc::new(TokenMatcher::new()))
    }

    pub fn with_matcher(config: AppConfig, matcher: Arc<dyn PatternMatcher>) -> Self {
        Self {
            config,
            matcher,
            stop: StopSignal::new(),
        }
    }

    pub fn stop_signal(&self) -> StopSignal {
        self.stop.clone()
    }

    pub fn find(&self, samples: &[Sample]) -> Result<Vec<ElitePattern>> {
        self.find_with(samples, &mut LogProgressCallback)
    }

    pub fn find_with<C: ProgressCallback>(
        &self,
        samples: &[Sample],
        callback: &mut C,
    ) -> Result<Vec<ElitePattern>> {
        self.config.validate()?;

        let (inventory, grammar) = dynamic_grammar(samples, &self.config.grammar)?;
        log::info!(
            "Grammar ready: {} features, {} rules, patterns of {}..{} tokens",
            inventory.len(),
            grammar.len(),
            inventory.min_doc_length,
            inventory.max_doc_length
        );

        let grammar = Arc::new(grammar);
        let evaluator =
            FitnessEvaluator::new(samples.to_vec(), self.matcher.clone(), &self.config.fitness);
        let mut hall_of_fame = HallOfFame::new(self.config.evolution.hall_of_fame_size);

        for run in 0..self.config.evolution.runs {
            if self.stop.is_stopped() {
                break;
            }

            let mut evolution = self.config.evolution.clone();
            evolution.seed = evolution.seed.map(|seed| seed.wrapping_add(run as u64));

            let mut population = Population::new(grammar.clone(), evaluator.clone(), &evolution)?
                .with_stop_signal(self.stop.clone());
            population.evolve_with(callback)?;

            let best = population.best_individual();
            log::info!(
                "Run {} finished after {} generations with fitness {:.4}",
                run + 1,
                population.generation_count(),
                best.fitness_value()
            );

            match best.phenotype() {
                Some(phenotype) => {
                    hall_of_fame.try_add(ElitePattern::new(
                        phenotype,
                        best.genotype().clone(),
                        best.fitness_value(),
                        run,
                        population.generation_count(),
                    ));
                }
                None => log::warn!("Run {} produced no decodable pattern", run + 1),
            }
        }

        Ok(hall_of_fame.get_all().to_vec())
    }
}
