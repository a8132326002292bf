use super::features::{is_matcher_native, FeatureKey};
use super::inventory::FeatureInventory;
use crate::config::GrammarConfig;
use crate::error::{PatternomaticError, Result};
use crate::types::{BoolFlag, CustomAttributes, Sample, Value};
use std::collections::BTreeMap;

/// Scans annotated samples and records every feature value they expose
pub struct AnnotationCollector<'a> {
    config: &'a GrammarConfig,
}

impl<'a> AnnotationCollector<'a> {
    pub fn new(config: &'a GrammarConfig) -> Self {
        Self { config }
    }

    pub fn collect(&self, samples: &[Sample]) -> Result<FeatureInventory> {
        if samples.is_empty() {
            return Err(PatternomaticError::Configuration(
                "Cannot collect features from an empty corpus".to_string(),
            ));
        }
        if let Some(index) = samples.iter().position(Sample::is_empty) {
            return Err(PatternomaticError::Configuration(format!(
                "Sample {} has no tokens",
                index
            )));
        }

        let lexical = FeatureKey::lexical();
        let mut observed: Vec<Vec<Value>> = vec![Vec::new(); lexical.len()];
        let mut custom: BTreeMap<String, Vec<Value>> = BTreeMap::new();

        let mut min_doc_length = usize::MAX;
        let mut max_doc_length = 0;

        for sample in samples {
            min_doc_length = min_doc_length.min(sample.len());
            max_doc_length = max_doc_length.max(sample.len());

            for token in &sample.tokens {
                for (key, values) in lexical.iter().zip(observed.iter_mut()) {
                    if let Some(value) = key.value_of(token) {
                        values.push(value);
                    }
                }

                if self.config.use_custom_attributes {
                    for (name, value) in token.custom_attributes() {
                        if is_matcher_native(&name) {
                            continue;
                        }
                        custom.entry(name).or_default().push(value);
                    }
                }
            }
        }

        let mut inventory = FeatureInventory::new(min_doc_length, max_doc_length);

        for (key, values) in lexical.into_iter().zip(observed) {
            inventory.insert(key, self.normalize(values));
        }

        if self.config.use_boolean_features {
            for flag in BoolFlag::all() {
                inventory.insert(
                    FeatureKey::Flag(flag),
                    vec![Value::Bool(true), Value::Bool(false)],
                );
            }
        }

        for (name, values) in custom {
            inventory.insert(FeatureKey::Custom(name), self.normalize(values));
        }

        let dropped = inventory.drop_empty();
        if !dropped.is_empty() {
            log::debug!(
                "Dropped features with no observed values: {}",
                dropped.iter().map(|k| k.name()).collect::<Vec<_>>().join(", ")
            );
        }

        log::info!(
            "Collected {} features ({} terminals) from {} samples, token counts {}..={}",
            inventory.len(),
            inventory.terminal_count(),
            samples.len(),
            inventory.min_doc_length,
            inventory.max_doc_length
        );

        Ok(inventory)
    }

    fn normalize(&self, mut values: Vec<Value>) -> Vec<Value> {
        values.sort();
        if self.config.use_uniques {
            values.dedup();
        }
        values
    }
}
