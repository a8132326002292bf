use super::bnf::*;
use crate::annotation::{FeatureInventory, FeatureKey};
use crate::config::GrammarConfig;
use crate::error::{PatternomaticError, Result};
use crate::types::Value;
use std::collections::BTreeMap;

/// Turns a feature inventory into a grammar, as a pure function of its inputs
pub struct GrammarBuilder<'a> {
    config: &'a GrammarConfig,
}

impl<'a> GrammarBuilder<'a> {
    pub fn new(config: &'a GrammarConfig) -> Self {
        Self { config }
    }

    pub fn build(&self, inventory: &FeatureInventory) -> Result<Grammar> {
        if inventory.is_empty() {
            return Err(PatternomaticError::Configuration(
                "No features left to build a grammar from".to_string(),
            ));
        }
        if inventory.max_doc_length == 0 {
            return Err(PatternomaticError::Configuration(
                "Corpus samples have no tokens".to_string(),
            ));
        }

        let mut rules: BTreeMap<String, Vec<Production>> = BTreeMap::new();
        let features: Vec<FeatureKey> = inventory.keys().cloned().collect();

        rules.insert(S.to_string(), vec![Production::symbol(P)]);

        let lengths = if self.config.pattern_length_from_corpus {
            symbol_stacker_from(T, inventory.max_doc_length, inventory.min_doc_length)
        } else {
            symbol_stacker(T, inventory.max_doc_length)
        };
        rules.insert(P.to_string(), stacked(lengths));

        let per_token = effective_features_per_token(self.config.features_per_token, features.len());
        let mut token = stacked(symbol_stacker(F, per_token));
        if self.config.use_token_wildcard {
            token.push(Production::Terminal(Terminal::Wildcard));
        }
        rules.insert(T.to_string(), token);

        let operators = self.config.use_grammar_operators;
        let extended = self.config.use_extended_pattern_syntax && !operators;

        let mut feature_alternatives = Vec::with_capacity(features.len() * 2);
        for key in &features {
            feature_alternatives.push(Production::symbol(&key.name()));
            if operators {
                feature_alternatives.push(Production::Symbols(vec![key.name(), OP.to_string()]));
            }
        }
        rules.insert(F.to_string(), feature_alternatives);

        if operators {
            rules.insert(
                OP.to_string(),
                Operator::quantifiers()
                    .into_iter()
                    .map(|op| Production::Terminal(Terminal::Operator(op)))
                    .collect(),
            );
        }

        if extended {
            let lengths = inventory.values(&FeatureKey::Length).ok_or_else(|| {
                PatternomaticError::Configuration(
                    "Extended pattern syntax needs the LENGTH feature".to_string(),
                )
            })?;

            rules.insert(
                XPS.to_string(),
                [IN, NOT_IN, EQQ, GEQ, LEQ, GTH, LTH]
                    .into_iter()
                    .map(Production::symbol)
                    .collect(),
            );

            let prefixes: Vec<Production> = cumulative_prefixes(inventory)
                .into_iter()
                .map(|list| Production::Terminal(Terminal::List(list)))
                .collect();
            rules.insert(IN.to_string(), prefixes.clone());
            rules.insert(NOT_IN.to_string(), prefixes);

            let length_terminals: Vec<Production> =
                lengths.iter().cloned().map(Production::value).collect();
            for symbol in [EQQ, GEQ, LEQ, GTH, LTH] {
                rules.insert(symbol.to_string(), length_terminals.clone());
            }
        }

        for (key, values) in inventory.iter() {
            let mut alternatives: Vec<Production> =
                values.iter().cloned().map(Production::value).collect();
            if extended {
                alternatives.push(Production::symbol(XPS));
            }
            rules.insert(key.name(), alternatives);
        }

        let grammar = Grammar::new(rules, features);
        log::debug!("Built grammar with {} rules:\n{}", grammar.len(), grammar);
        Ok(grammar)
    }
}

fn stacked(entries: Vec<String>) -> Vec<Production> {
    entries.iter().map(|e| Production::from_stacked(e)).collect()
}

/// `n` entries where entry `i` is `symbol` repeated `i + 1` times, comma-joined
pub fn symbol_stacker(symbol: &str, max_length: usize) -> Vec<String> {
    symbol_stacker_from(symbol, max_length, 1)
}

/// Like [`symbol_stacker`] but the first entry holds `min_length` copies.
/// A `min_length` of zero or above `max_length` falls back to 1.
pub fn symbol_stacker_from(symbol: &str, max_length: usize, min_length: usize) -> Vec<String> {
    let start = if min_length == 0 || min_length > max_length {
        1
    } else {
        min_length
    };

    (start..=max_length)
        .map(|times| vec![symbol; times].join(","))
        .collect()
}

/// Repetition bound for `F` inside `T`
pub fn effective_features_per_token(features_per_token: i64, feature_count: usize) -> usize {
    if features_per_token <= 0 || features_per_token as u64 >= feature_count as u64 {
        feature_count
    } else {
        features_per_token as usize
    }
}

/// Every non-empty prefix of every feature's value list, features in
/// inventory order. Grows linearly with the number of terminal values.
pub fn cumulative_prefixes(inventory: &FeatureInventory) -> Vec<Vec<Value>> {
    let mut prefixes = Vec::with_capacity(inventory.terminal_count());

    for (_, values) in inventory.iter() {
        for end in 1..=values.len() {
            prefixes.push(values[..end].to_vec());
        }
    }

    prefixes
}
