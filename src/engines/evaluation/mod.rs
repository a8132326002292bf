pub mod fitness;
pub mod matcher;

pub use fitness::FitnessEvaluator;
pub use matcher::{CompiledPattern, PatternMatcher, Predicate, Quantifier, Test, TokenMatcher, TokenSpec};
