use crate::{
    annotation::FeatureKey,
    engines::generation::phenotype::{PatternValue, Phenotype},
    error::{PatternomaticError, Result},
    grammar::Operator,
    types::{Sample, Span, Token, Value},
};
use std::collections::BTreeSet;

/// Pattern-matching engine consumed by the fitness evaluator.
///
/// Implementations are shared across evaluation threads and must not keep
/// per-call state.
pub trait PatternMatcher: Send + Sync {
    fn compile(&self, phenotype: &Phenotype) -> Result<CompiledPattern> {
        CompiledPattern::compile(phenotype)
    }

    /// Every non-empty span of `sample` the pattern matches
    fn find_spans(&self, pattern: &CompiledPattern, sample: &Sample) -> Result<Vec<Span>>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Quantifier {
    One,
    Negation,
    ZeroOrOne,
    OneOrMore,
    ZeroOrMore,
}

impl Quantifier {
    fn from_operator(op: Operator) -> Option<Quantifier> {
        match op {
            Operator::Negation => Some(Self::Negation),
            Operator::ZeroOrOne => Some(Self::ZeroOrOne),
            Operator::OneOrMore => Some(Self::OneOrMore),
            Operator::ZeroOrMore => Some(Self::ZeroOrMore),
            _ => None,
        }
    }

    fn is_optional(&self) -> bool {
        matches!(self, Self::ZeroOrOne | Self::ZeroOrMore)
    }

    fn is_repeating(&self) -> bool {
        matches!(self, Self::OneOrMore | Self::ZeroOrMore)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Test {
    Equals(Value),
    In(Vec<Value>),
    NotIn(Vec<Value>),
    Compare(Operator, f64),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Predicate {
    pub feature: FeatureKey,
    pub test: Test,
}

impl Predicate {
    pub fn matches(&self, token: &Token) -> bool {
        let value = self.feature.value_of(token);
        match (&self.test, value) {
            (Test::Equals(expected), Some(actual)) => *expected == actual,
            (Test::In(values), Some(actual)) => values.contains(&actual),
            (Test::NotIn(values), actual) => actual.map_or(true, |a| !values.contains(&a)),
            (Test::Compare(op, threshold), Some(actual)) => match actual.as_f64() {
                Some(x) => compare(*op, x, *threshold),
                None => false,
            },
            (_, None) => false,
        }
    }
}

fn compare(op: Operator, x: f64, threshold: f64) -> bool {
    match op {
        Operator::Eq => x == threshold,
        Operator::Geq => x >= threshold,
        Operator::Leq => x <= threshold,
        Operator::Gt => x > threshold,
        Operator::Lt => x < threshold,
        _ => false,
    }
}

/// Conjunction of predicates plus how many tokens it may consume
#[derive(Debug, Clone, PartialEq)]
pub struct TokenSpec {
    pub predicates: Vec<Predicate>,
    pub quantifier: Quantifier,
}

impl TokenSpec {
    fn accepts(&self, token: &Token) -> bool {
        let all = self.predicates.iter().all(|p| p.matches(token));
        match self.quantifier {
            Quantifier::Negation => !all,
            _ => all,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CompiledPattern {
    tokens: Vec<TokenSpec>,
}

impl CompiledPattern {
    /// Validate a phenotype and lower it to token specs
    pub fn compile(phenotype: &Phenotype) -> Result<CompiledPattern> {
        if phenotype.is_empty() {
            return Err(PatternomaticError::InvalidPattern("Empty pattern".to_string()));
        }

        let mut tokens = Vec::with_capacity(phenotype.len());
        for token in &phenotype.tokens {
            let mut quantifier: Option<Quantifier> = None;
            let mut predicates = Vec::with_capacity(token.constraints.len());

            for constraint in &token.constraints {
                let test = match constraint.operator {
                    None => Test::Equals(single(&constraint.value)?),
                    Some(op) if op.is_quantifier() => {
                        let wanted = Quantifier::from_operator(op);
                        if quantifier.is_some() && quantifier != wanted {
                            return Err(PatternomaticError::InvalidPattern(format!(
                                "Conflicting quantifiers in token {}",
                                token
                            )));
                        }
                        quantifier = wanted;
                        Test::Equals(single(&constraint.value)?)
                    }
                    Some(Operator::In) => Test::In(list(&constraint.value)),
                    Some(Operator::NotIn) => Test::NotIn(list(&constraint.value)),
                    Some(op) => {
                        if !matches!(constraint.feature, FeatureKey::Length | FeatureKey::Custom(_)) {
                            return Err(PatternomaticError::InvalidPattern(format!(
                                "{} does not support {}",
                                constraint.feature, op
                            )));
                        }
                        let threshold = single(&constraint.value)?.as_f64().ok_or_else(|| {
                            PatternomaticError::InvalidPattern(format!(
                                "{} needs a numeric value, got {}",
                                op, constraint.value
                            ))
                        })?;
                        Test::Compare(op, threshold)
                    }
                };
                predicates.push(Predicate {
                    feature: constraint.feature.clone(),
                    test,
                });
            }

            tokens.push(TokenSpec {
                predicates,
                quantifier: quantifier.unwrap_or(Quantifier::One),
            });
        }

        Ok(CompiledPattern { tokens })
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    fn close(&self, states: &mut BTreeSet<usize>) {
        let mut frontier: Vec<usize> = states.iter().copied().collect();
        while let Some(state) = frontier.pop() {
            if let Some(spec) = self.tokens.get(state) {
                if spec.quantifier.is_optional() && states.insert(state + 1) {
                    frontier.push(state + 1);
                }
            }
        }
    }

    fn advance(&self, states: &BTreeSet<usize>, token: &Token) -> BTreeSet<usize> {
        let mut next = BTreeSet::new();
        for &state in states {
            let Some(spec) = self.tokens.get(state) else {
                continue;
            };
            if spec.accepts(token) {
                next.insert(state + 1);
                if spec.quantifier.is_repeating() {
                    next.insert(state);
                }
            }
        }
        self.close(&mut next);
        next
    }
}

fn single(value: &PatternValue) -> Result<Value> {
    match value {
        PatternValue::Single(value) => Ok(value.clone()),
        PatternValue::List(_) => Err(PatternomaticError::InvalidPattern(format!(
            "List value {} outside of a set operator",
            value
        ))),
    }
}

fn list(value: &PatternValue) -> Vec<Value> {
    match value {
        PatternValue::Single(value) => vec![value.clone()],
        PatternValue::List(values) => values.clone(),
    }
}

/// Reference matcher: simulates the pattern over each start position with a
/// set of live pattern positions
#[derive(Debug, Clone, Copy, Default)]
pub struct TokenMatcher;

impl TokenMatcher {
    pub fn new() -> Self {
        Self
    }
}

impl PatternMatcher for TokenMatcher {
    fn find_spans(&self, pattern: &CompiledPattern, sample: &Sample) -> Result<Vec<Span>> {
        let accept = pattern.len();
        let mut spans = Vec::new();

        for start in 0..sample.tokens.len() {
            let mut states = BTreeSet::from([0]);
            pattern.close(&mut states);

            for (offset, token) in sample.tokens[start..].iter().enumerate() {
                states = pattern.advance(&states, token);
                if states.is_empty() {
                    break;
                }
                if states.contains(&accept) {
                    spans.push(Span::new(start, start + offset + 1));
                }
            }
        }

        Ok(spans)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::annotation::{Annotator, SimpleAnnotator};
    use crate::engines::generation::phenotype::{Constraint, TokenPattern};

    fn token(constraints: Vec<(FeatureKey, Option<Operator>, PatternValue)>) -> TokenPattern {
        TokenPattern {
            constraints: constraints
                .into_iter()
                .map(|(feature, operator, value)| Constraint { feature, operator, value })
                .collect(),
        }
    }

    fn text(value: &str) -> PatternValue {
        PatternValue::Single(Value::from(value))
    }

    fn spans(tokens: Vec<TokenPattern>, sentence: &str) -> Vec<(usize, usize)> {
        let pattern = TokenMatcher.compile(&Phenotype { tokens }).unwrap();
        let sample = SimpleAnnotator::new().annotate(sentence);
        TokenMatcher
            .find_spans(&pattern, &sample)
            .unwrap()
            .into_iter()
            .map(|s| (s.start, s.end))
            .collect()
    }

    #[test]
    fn test_exact_sequence() {
        let found = spans(
            vec![
                token(vec![(FeatureKey::Lower, None, text("a"))]),
                token(vec![(FeatureKey::Orth, None, text("cat"))]),
            ],
            "You are a cat !",
        );
        assert_eq!(found, vec![(2, 4)]);
    }

    #[test]
    fn test_one_or_more_reports_every_end() {
        let found = spans(
            vec![token(vec![(FeatureKey::Orth, Some(Operator::OneOrMore), text("ha"))])],
            "ha ha",
        );
        assert_eq!(found, vec![(0, 1), (0, 2), (1, 2)]);
    }

    #[test]
    fn test_optional_token_never_yields_empty_span() {
        let found = spans(
            vec![token(vec![(FeatureKey::Orth, Some(Operator::ZeroOrOne), text("x"))])],
            "a b",
        );
        assert!(found.is_empty());
    }

    #[test]
    fn test_negation_consumes_one_token() {
        let found = spans(
            vec![token(vec![(FeatureKey::Orth, Some(Operator::Negation), text("a"))])],
            "a b",
        );
        assert_eq!(found, vec![(1, 2)]);
    }

    #[test]
    fn test_length_comparison_and_sets() {
        let found = spans(
            vec![token(vec![(
                FeatureKey::Length,
                Some(Operator::Geq),
                PatternValue::Single(Value::Int(4)),
            )])],
            "This is a test",
        );
        assert_eq!(found, vec![(0, 1), (3, 4)]);

        let found = spans(
            vec![token(vec![(
                FeatureKey::Lower,
                Some(Operator::NotIn),
                PatternValue::List(vec![Value::from("this"), Value::from("is")]),
            )])],
            "This is a test",
        );
        assert_eq!(found, vec![(2, 3), (3, 4)]);
    }

    #[test]
    fn test_rejections() {
        assert!(matches!(
            CompiledPattern::compile(&Phenotype::default()),
            Err(PatternomaticError::InvalidPattern(_))
        ));

        let conflicting = Phenotype {
            tokens: vec![token(vec![
                (FeatureKey::Orth, Some(Operator::OneOrMore), text("a")),
                (FeatureKey::Lower, Some(Operator::Negation), text("a")),
            ])],
        };
        assert!(matches!(
            CompiledPattern::compile(&conflicting),
            Err(PatternomaticError::InvalidPattern(_))
        ));

        let textual_comparison = Phenotype {
            tokens: vec![token(vec![(FeatureKey::Orth, Some(Operator::Gt), text("a"))])],
        };
        assert!(matches!(
            CompiledPattern::compile(&textual_comparison),
            Err(PatternomaticError::InvalidPattern(_))
        ));
    }
}
