pub mod bnf;
pub mod builder;

pub use bnf::{Grammar, Operator, Production, Terminal};
pub use builder::{
    cumulative_prefixes, effective_features_per_token, symbol_stacker, symbol_stacker_from,
    GrammarBuilder,
};

use crate::annotation::{AnnotationCollector, FeatureInventory};
use crate::config::GrammarConfig;
use crate::error::Result;
use crate::types::Sample;

/// Collect the corpus features and build the grammar over them
pub fn dynamic_grammar(samples: &[Sample], config: &GrammarConfig) -> Result<(FeatureInventory, Grammar)> {
    let inventory = AnnotationCollector::new(config).collect(samples)?;
    let grammar = GrammarBuilder::new(config).build(&inventory)?;
    Ok((inventory, grammar))
}
