use super::traits::ConfigSection;
use crate::error::PatternomaticError;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GrammarConfig {
    pub use_boolean_features: bool,
    pub use_custom_attributes: bool,
    pub use_token_wildcard: bool,
    pub use_grammar_operators: bool,
    pub use_extended_pattern_syntax: bool,
    /// Upper bound on constraints per token; zero or negative means "all features"
    pub features_per_token: i64,
    pub use_uniques: bool,
    /// Start pattern lengths at the shortest sample instead of 1
    pub pattern_length_from_corpus: bool,
}

impl Default for GrammarConfig {
    fn default() -> Self {
        Self {
            use_boolean_features: false,
            use_custom_attributes: false,
            use_token_wildcard: false,
            use_grammar_operators: false,
            use_extended_pattern_syntax: false,
            features_per_token: 1,
            use_uniques: true,
            pattern_length_from_corpus: false,
        }
    }
}

impl ConfigSection for GrammarConfig {
    fn section_name() -> &'static str {
        "grammar"
    }

    fn validate(&self) -> Result<(), PatternomaticError> {
        if self.use_grammar_operators && self.use_extended_pattern_syntax {
            log::warn!(
                "use_grammar_operators and use_extended_pattern_syntax are exclusive; grammar operators take precedence"
            );
        }
        Ok(())
    }
}
