use crate::types::{BoolFlag, Token, Value};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Prefix that keeps custom attribute features apart from native ones
pub const CUSTOM_PREFIX: &str = "custom_";

/// Attribute names the matcher understands natively. Custom attributes with
/// one of these names are never registered as extra features.
pub const MATCHER_SUPPORTED_ATTRIBUTES: &[&str] = &[
    "orth", "text", "lower", "length", "pos", "tag", "dep", "lemma", "shape", "ent_type",
    "is_alpha", "is_ascii", "is_digit", "is_lower", "is_upper", "is_title", "is_punct",
    "is_space", "is_stop", "like_num", "like_url", "like_email", "norm", "morph",
    "is_sent_start", "sent_start", "spacy", "ent_iob", "ent_id", "ent_kb_id", "prefix",
    "suffix", "op", "_",
];

/// A linguistic feature a token constraint can test
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum FeatureKey {
    Orth,
    Text,
    Lower,
    Length,
    Pos,
    Tag,
    Dep,
    Lemma,
    Shape,
    EntType,
    Flag(BoolFlag),
    Custom(String),
}

impl FeatureKey {
    /// The ten string/integer features collected from every token
    pub fn lexical() -> [FeatureKey; 10] {
        [
            Self::Orth,
            Self::Text,
            Self::Lower,
            Self::Length,
            Self::Pos,
            Self::Tag,
            Self::Dep,
            Self::Lemma,
            Self::Shape,
            Self::EntType,
        ]
    }

    pub fn name(&self) -> String {
        match self {
            Self::Orth => "ORTH".to_string(),
            Self::Text => "TEXT".to_string(),
            Self::Lower => "LOWER".to_string(),
            Self::Length => "LENGTH".to_string(),
            Self::Pos => "POS".to_string(),
            Self::Tag => "TAG".to_string(),
            Self::Dep => "DEP".to_string(),
            Self::Lemma => "LEMMA".to_string(),
            Self::Shape => "SHAPE".to_string(),
            Self::EntType => "ENT_TYPE".to_string(),
            Self::Flag(flag) => flag.as_str().to_string(),
            Self::Custom(name) => format!("{}{}", CUSTOM_PREFIX, name),
        }
    }

    pub fn parse(name: &str) -> Option<FeatureKey> {
        if let Some(custom) = name.strip_prefix(CUSTOM_PREFIX) {
            return Some(Self::Custom(custom.to_string()));
        }
        Self::lexical()
            .into_iter()
            .find(|key| key.name() == name)
            .or_else(|| BoolFlag::parse(name).map(Self::Flag))
    }

    /// Read this feature off a token
    pub fn value_of(&self, token: &Token) -> Option<Value> {
        let value = match self {
            Self::Orth => Value::from(token.orth.as_str()),
            Self::Text => Value::from(token.text.as_str()),
            Self::Lower => Value::from(token.lower.as_str()),
            Self::Length => Value::Int(token.length as i64),
            Self::Pos => Value::from(token.pos.as_str()),
            Self::Tag => Value::from(token.tag.as_str()),
            Self::Dep => Value::from(token.dep.as_str()),
            Self::Lemma => Value::from(token.lemma.as_str()),
            Self::Shape => Value::from(token.shape.as_str()),
            Self::EntType => Value::from(token.ent_type.as_str()),
            Self::Flag(flag) => Value::Bool(token.flag(*flag)),
            Self::Custom(name) => return token.custom.get(name).cloned(),
        };
        Some(value)
    }
}

impl fmt::Display for FeatureKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

pub fn is_matcher_native(attribute: &str) -> bool {
    let lowered = attribute.to_lowercase();
    MATCHER_SUPPORTED_ATTRIBUTES.contains(&lowered.as_str())
}
