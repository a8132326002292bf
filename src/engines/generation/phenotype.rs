use crate::annotation::FeatureKey;
use crate::grammar::Operator;
use crate::types::Value;
use serde_json::{json, Map};
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PatternValue {
    Single(Value),
    List(Vec<Value>),
}

impl PatternValue {
    fn to_json(&self) -> serde_json::Value {
        match self {
            PatternValue::Single(value) => json!(value),
            PatternValue::List(values) => json!(values),
        }
    }
}

impl fmt::Display for PatternValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PatternValue::Single(value) => write!(f, "{}", value),
            PatternValue::List(values) => {
                let items: Vec<String> = values.iter().map(|v| v.to_string()).collect();
                write!(f, "[{}]", items.join(", "))
            }
        }
    }
}

/// One (feature, operator, value) test inside a token
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Constraint {
    pub feature: FeatureKey,
    pub operator: Option<Operator>,
    pub value: PatternValue,
}

impl fmt::Display for Constraint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.operator {
            Some(op) if op.is_quantifier() => {
                write!(f, "{}: {}, OP: {}", self.feature, self.value, op)
            }
            Some(op) => write!(f, "{}: {{{}: {}}}", self.feature, op, self.value),
            None => write!(f, "{}: {}", self.feature, self.value),
        }
    }
}

/// Constraints one token must satisfy; no constraints is the wildcard token
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TokenPattern {
    pub constraints: Vec<Constraint>,
}

impl TokenPattern {
    pub fn is_wildcard(&self) -> bool {
        self.constraints.is_empty()
    }

    /// Matcher-style dictionary. Repeated keys keep the last value.
    pub fn to_json(&self) -> serde_json::Value {
        let mut map = Map::new();
        for constraint in &self.constraints {
            let key = constraint.feature.name();
            match constraint.operator {
                Some(op) if op.is_quantifier() => {
                    map.insert(key, constraint.value.to_json());
                    map.insert("OP".to_string(), json!(op.symbol()));
                }
                Some(op) => {
                    let mut inner = Map::new();
                    inner.insert(op.symbol().to_string(), constraint.value.to_json());
                    map.insert(key, serde_json::Value::Object(inner));
                }
                None => {
                    map.insert(key, constraint.value.to_json());
                }
            }
        }
        serde_json::Value::Object(map)
    }
}

impl fmt::Display for TokenPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self.constraints.iter().map(|c| c.to_string()).collect();
        write!(f, "{{{}}}", parts.join(", "))
    }
}

/// Decoded pattern: an ordered list of token constraint-sets
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Phenotype {
    pub tokens: Vec<TokenPattern>,
}

impl Phenotype {
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    pub fn to_json(&self) -> serde_json::Value {
        serde_json::Value::Array(self.tokens.iter().map(TokenPattern::to_json).collect())
    }
}

impl fmt::Display for Phenotype {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self.tokens.iter().map(|t| t.to_string()).collect();
        write!(f, "[{}]", parts.join(", "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn constraint(feature: FeatureKey, operator: Option<Operator>, value: PatternValue) -> Constraint {
        Constraint { feature, operator, value }
    }

    #[test]
    fn test_json_rendering() {
        let phenotype = Phenotype {
            tokens: vec![
                TokenPattern {
                    constraints: vec![constraint(
                        FeatureKey::Pos,
                        Some(Operator::OneOrMore),
                        PatternValue::Single(Value::from("NOUN")),
                    )],
                },
                TokenPattern {
                    constraints: vec![constraint(
                        FeatureKey::Length,
                        Some(Operator::Geq),
                        PatternValue::Single(Value::Int(3)),
                    )],
                },
                TokenPattern::default(),
            ],
        };

        assert_eq!(
            phenotype.to_json(),
            json!([{"POS": "NOUN", "OP": "+"}, {"LENGTH": {">=": 3}}, {}])
        );
    }

    #[test]
    fn test_canonical_string() {
        let phenotype = Phenotype {
            tokens: vec![TokenPattern {
                constraints: vec![
                    constraint(FeatureKey::Orth, None, PatternValue::Single(Value::from("a"))),
                    constraint(
                        FeatureKey::Lower,
                        Some(Operator::In),
                        PatternValue::List(vec![Value::from("a"), Value::from("b")]),
                    ),
                ],
            }],
        };

        assert_eq!(
            phenotype.to_string(),
            r#"[{ORTH: "a", LOWER: {IN: ["a", "b"]}}]"#
        );
    }
}
