use super::features::FeatureKey;
use crate::types::Value;

/// Observed terminal values per feature, in collection order, plus the
/// token-count bounds of the corpus.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeatureInventory {
    features: Vec<(FeatureKey, Vec<Value>)>,
    pub min_doc_length: usize,
    pub max_doc_length: usize,
}

impl FeatureInventory {
    pub fn new(min_doc_length: usize, max_doc_length: usize) -> Self {
        Self {
            features: Vec::new(),
            min_doc_length,
            max_doc_length,
        }
    }

    /// Register a feature, replacing any previous values for the same key
    pub fn insert(&mut self, key: FeatureKey, values: Vec<Value>) {
        match self.features.iter_mut().find(|(k, _)| *k == key) {
            Some((_, existing)) => *existing = values,
            None => self.features.push((key, values)),
        }
    }

    /// Drop every feature whose distinct values are exactly the empty string
    pub fn drop_empty(&mut self) -> Vec<FeatureKey> {
        let mut dropped = Vec::new();
        self.features.retain(|(key, values)| {
            let only_empty = !values.is_empty() && values.iter().all(Value::is_empty_text);
            if only_empty {
                dropped.push(key.clone());
            }
            !only_empty
        });
        dropped
    }

    pub fn iter(&self) -> impl Iterator<Item = (&FeatureKey, &[Value])> {
        self.features.iter().map(|(k, v)| (k, v.as_slice()))
    }

    pub fn keys(&self) -> impl Iterator<Item = &FeatureKey> {
        self.features.iter().map(|(k, _)| k)
    }

    pub fn values(&self, key: &FeatureKey) -> Option<&[Value]> {
        self.features
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_slice())
    }

    pub fn contains(&self, key: &FeatureKey) -> bool {
        self.values(key).is_some()
    }

    pub fn len(&self) -> usize {
        self.features.len()
    }

    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }

    /// Total number of terminal values across all features
    pub fn terminal_count(&self) -> usize {
        self.features.iter().map(|(_, v)| v.len()).sum()
    }
}
