use crate::annotation::FeatureKey;
use crate::types::Value;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

pub const S: &str = "S";
pub const P: &str = "P";
pub const T: &str = "T";
pub const F: &str = "F";
pub const OP: &str = "OP";
pub const XPS: &str = "XPS";
pub const IN: &str = "IN";
pub const NOT_IN: &str = "NOT_IN";
pub const EQQ: &str = "EQQ";
pub const GEQ: &str = "GEQ";
pub const LEQ: &str = "LEQ";
pub const GTH: &str = "GTH";
pub const LTH: &str = "LTH";

/// Fixed nonterminals, in rendering order
const STRUCTURAL: [&str; 13] = [S, P, T, F, OP, XPS, IN, NOT_IN, EQQ, GEQ, LEQ, GTH, LTH];

/// Quantifiers and extended relational/set operators
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Operator {
    Negation,
    ZeroOrOne,
    OneOrMore,
    ZeroOrMore,
    In,
    NotIn,
    Eq,
    Geq,
    Leq,
    Gt,
    Lt,
}

impl Operator {
    pub fn quantifiers() -> [Operator; 4] {
        [Self::Negation, Self::ZeroOrOne, Self::OneOrMore, Self::ZeroOrMore]
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            Self::Negation => "!",
            Self::ZeroOrOne => "?",
            Self::OneOrMore => "+",
            Self::ZeroOrMore => "*",
            Self::In => "IN",
            Self::NotIn => "NOT_IN",
            Self::Eq => "==",
            Self::Geq => ">=",
            Self::Leq => "<=",
            Self::Gt => ">",
            Self::Lt => "<",
        }
    }

    pub fn is_quantifier(&self) -> bool {
        matches!(
            self,
            Self::Negation | Self::ZeroOrOne | Self::OneOrMore | Self::ZeroOrMore
        )
    }

    pub fn is_set(&self) -> bool {
        matches!(self, Self::In | Self::NotIn)
    }

    pub fn is_comparison(&self) -> bool {
        matches!(self, Self::Eq | Self::Geq | Self::Leq | Self::Gt | Self::Lt)
    }

    /// The operator a nonterminal below `XPS` stands for
    pub fn from_nonterminal(symbol: &str) -> Option<Operator> {
        match symbol {
            IN => Some(Self::In),
            NOT_IN => Some(Self::NotIn),
            EQQ => Some(Self::Eq),
            GEQ => Some(Self::Geq),
            LEQ => Some(Self::Leq),
            GTH => Some(Self::Gt),
            LTH => Some(Self::Lt),
            _ => None,
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Terminal {
    Value(Value),
    List(Vec<Value>),
    Operator(Operator),
    Wildcard,
}

impl fmt::Display for Terminal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Terminal::Value(value) => write!(f, "{}", value),
            Terminal::List(values) => {
                let items: Vec<String> = values.iter().map(|v| v.to_string()).collect();
                write!(f, "[{}]", items.join(", "))
            }
            Terminal::Operator(op) => write!(f, "\"{}\"", op),
            Terminal::Wildcard => write!(f, "{{}}"),
        }
    }
}

/// One alternative on the right-hand side of a rule
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Production {
    Symbols(Vec<String>),
    Terminal(Terminal),
}

impl Production {
    /// Parse a comma-joined symbol sequence such as `T,T,T`
    pub fn from_stacked(stacked: &str) -> Self {
        Production::Symbols(stacked.split(',').map(str::to_string).collect())
    }

    pub fn symbol(symbol: &str) -> Self {
        Production::Symbols(vec![symbol.to_string()])
    }

    pub fn value(value: Value) -> Self {
        Production::Terminal(Terminal::Value(value))
    }
}

impl fmt::Display for Production {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Production::Symbols(symbols) => {
                let parts: Vec<String> = symbols.iter().map(|s| format!("<{}>", s)).collect();
                write!(f, "{}", parts.join(" "))
            }
            Production::Terminal(terminal) => write!(f, "{}", terminal),
        }
    }
}

/// Immutable BNF grammar over pattern structure and feature values
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grammar {
    rules: BTreeMap<String, Vec<Production>>,
    features: Vec<FeatureKey>,
}

impl Grammar {
    pub(crate) fn new(rules: BTreeMap<String, Vec<Production>>, features: Vec<FeatureKey>) -> Self {
        Self { rules, features }
    }

    pub fn alternatives(&self, symbol: &str) -> Option<&[Production]> {
        self.rules.get(symbol).map(Vec::as_slice)
    }

    pub fn contains(&self, symbol: &str) -> bool {
        self.rules.contains_key(symbol)
    }

    /// Retained feature keys, in inventory order
    pub fn features(&self) -> &[FeatureKey] {
        &self.features
    }

    /// The feature a nonterminal names, if it names one
    pub fn feature(&self, symbol: &str) -> Option<&FeatureKey> {
        self.features.iter().find(|key| key.name() == symbol)
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    fn ordered_symbols(&self) -> Vec<String> {
        STRUCTURAL
            .iter()
            .map(|s| s.to_string())
            .chain(self.features.iter().map(FeatureKey::name))
            .filter(|s| self.rules.contains_key(s))
            .collect()
    }
}

impl fmt::Display for Grammar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for symbol in self.ordered_symbols() {
            let alternatives: Vec<String> = self.rules[&symbol]
                .iter()
                .map(|p| p.to_string())
                .collect();
            writeln!(f, "<{}> ::= {}", symbol, alternatives.join(" | "))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stacked_production() {
        assert_eq!(
            Production::from_stacked("T,T,T"),
            Production::Symbols(vec!["T".to_string(); 3])
        );
        assert_eq!(Production::from_stacked("T,T,T").to_string(), "<T> <T> <T>");
    }

    #[test]
    fn test_operator_lookup() {
        assert_eq!(Operator::from_nonterminal(GEQ), Some(Operator::Geq));
        assert_eq!(Operator::from_nonterminal(S), None);
        assert!(Operator::Negation.is_quantifier());
        assert!(Operator::NotIn.is_set());
        assert!(Operator::Lt.is_comparison());
    }

    #[test]
    fn test_terminal_rendering() {
        let list = Terminal::List(vec![Value::from("a"), Value::Int(2)]);
        assert_eq!(list.to_string(), r#"["a", 2]"#);
        assert_eq!(Terminal::Wildcard.to_string(), "{}");
        assert_eq!(Terminal::Operator(Operator::OneOrMore).to_string(), "\"+\"");
    }
}
