use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::fmt;

/// Terminal value observed on a token attribute
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
}

impl Value {
    fn rank(&self) -> u8 {
        match self {
            Value::Bool(_) => 0,
            Value::Int(_) => 1,
            Value::Float(_) => 2,
            Value::Text(_) => 3,
        }
    }

    pub fn is_empty_text(&self) -> bool {
        matches!(self, Value::Text(t) if t.is_empty())
    }

    /// Numeric view used by the comparison operators
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Int(i) => Some(*i as f64),
            Value::Float(f) => Some(*f),
            _ => None,
        }
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Value {}

impl PartialOrd for Value {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Value {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Value::Bool(a), Value::Bool(b)) => a.cmp(b),
            (Value::Int(a), Value::Int(b)) => a.cmp(b),
            (Value::Float(a), Value::Float(b)) => a.total_cmp(b),
            (Value::Text(a), Value::Text(b)) => a.cmp(b),
            _ => self.rank().cmp(&other.rank()),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Bool(b) => write!(f, "{}", b),
            Value::Int(i) => write!(f, "{}", i),
            Value::Float(x) => write!(f, "{}", x),
            Value::Text(t) => write!(f, "{:?}", t),
        }
    }
}

impl From<&str> for Value {
    fn from(text: &str) -> Self {
        Value::Text(text.to_string())
    }
}

impl From<String> for Value {
    fn from(text: String) -> Self {
        Value::Text(text)
    }
}

/// The twelve boolean lexical flags every token carries
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum BoolFlag {
    IsAlpha,
    IsAscii,
    IsDigit,
    IsLower,
    IsUpper,
    IsTitle,
    IsPunct,
    IsSpace,
    IsStop,
    LikeNum,
    LikeUrl,
    LikeEmail,
}

impl BoolFlag {
    pub fn all() -> [BoolFlag; 12] {
        [
            Self::IsAlpha,
            Self::IsAscii,
            Self::IsDigit,
            Self::IsLower,
            Self::IsUpper,
            Self::IsTitle,
            Self::IsPunct,
            Self::IsSpace,
            Self::IsStop,
            Self::LikeNum,
            Self::LikeUrl,
            Self::LikeEmail,
        ]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::IsAlpha => "IS_ALPHA",
            Self::IsAscii => "IS_ASCII",
            Self::IsDigit => "IS_DIGIT",
            Self::IsLower => "IS_LOWER",
            Self::IsUpper => "IS_UPPER",
            Self::IsTitle => "IS_TITLE",
            Self::IsPunct => "IS_PUNCT",
            Self::IsSpace => "IS_SPACE",
            Self::IsStop => "IS_STOP",
            Self::LikeNum => "LIKE_NUM",
            Self::LikeUrl => "LIKE_URL",
            Self::LikeEmail => "LIKE_EMAIL",
        }
    }

    pub fn parse(name: &str) -> Option<BoolFlag> {
        Self::all().into_iter().find(|flag| flag.as_str() == name)
    }

    fn index(&self) -> usize {
        *self as usize
    }
}

/// Serialises the flag array as a map keyed by flag name. Absent names read
/// as `false`, unknown names are rejected.
mod flag_map {
    use super::BoolFlag;
    use serde::de::Error;
    use serde::{Deserialize, Deserializer, Serialize, Serializer};
    use std::collections::BTreeMap;

    pub fn serialize<S: Serializer>(flags: &[bool; 12], serializer: S) -> Result<S::Ok, S::Error> {
        let map: BTreeMap<&str, bool> = BoolFlag::all()
            .into_iter()
            .map(|flag| (flag.as_str(), flags[flag.index()]))
            .collect();
        map.serialize(serializer)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<[bool; 12], D::Error> {
        let map = BTreeMap::<String, bool>::deserialize(deserializer)?;
        let mut flags = [false; 12];
        for (name, value) in map {
            let flag = BoolFlag::parse(&name)
                .ok_or_else(|| D::Error::custom(format!("unknown token flag `{}`", name)))?;
            flags[flag.index()] = value;
        }
        Ok(flags)
    }
}

/// One annotated token, as handed over by the annotation provider
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Token {
    pub orth: String,
    pub text: String,
    pub lower: String,
    pub length: usize,
    pub pos: String,
    pub tag: String,
    pub dep: String,
    pub lemma: String,
    pub shape: String,
    pub ent_type: String,
    #[serde(with = "flag_map")]
    pub flags: [bool; 12],
    pub custom: BTreeMap<String, Value>,
}

impl Token {
    pub fn flag(&self, flag: BoolFlag) -> bool {
        self.flags[flag.index()]
    }

    pub fn set_flag(&mut self, flag: BoolFlag, value: bool) {
        self.flags[flag.index()] = value;
    }
}

/// Capability through which a token exposes attributes beyond the fixed set.
///
/// Implementations must return a deterministic listing: the same token always
/// yields the same names in the same order.
pub trait CustomAttributes {
    fn custom_attributes(&self) -> Vec<(String, Value)>;
}

impl CustomAttributes for Token {
    fn custom_attributes(&self) -> Vec<(String, Value)> {
        self.custom
            .iter()
            .map(|(name, value)| (name.clone(), value.clone()))
            .collect()
    }
}

/// An annotated sample: the raw text and its ordered tokens
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Sample {
    #[serde(default)]
    pub text: String,
    pub tokens: Vec<Token>,
}

impl Sample {
    pub fn new(text: impl Into<String>, tokens: Vec<Token>) -> Self {
        Self {
            text: text.into(),
            tokens,
        }
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }
}

/// Half-open token range `[start, end)` matched within a sample
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.end <= self.start
    }
}
