use crate::types::{BoolFlag, Sample, Token};

/// Produces annotated samples from raw text
pub trait Annotator: Send + Sync {
    fn annotate(&self, text: &str) -> Sample;

    fn annotate_all(&self, texts: &[String]) -> Vec<Sample> {
        texts.iter().map(|text| self.annotate(text)).collect()
    }
}

const STOP_WORDS: &[&str] = &[
    "a", "about", "above", "after", "again", "all", "am", "an", "and", "any", "are", "as", "at",
    "be", "because", "been", "before", "being", "below", "between", "both", "but", "by", "can",
    "could", "did", "do", "does", "doing", "down", "during", "each", "few", "for", "from",
    "further", "had", "has", "have", "having", "he", "her", "here", "hers", "herself", "him",
    "himself", "his", "how", "i", "if", "in", "into", "is", "it", "its", "itself", "just", "me",
    "more", "most", "my", "myself", "no", "nor", "not", "now", "of", "off", "on", "once", "only",
    "or", "other", "our", "ours", "out", "over", "own", "same", "she", "should", "so", "some",
    "such", "than", "that", "the", "their", "them", "then", "there", "these", "they", "this",
    "those", "through", "to", "too", "under", "until", "up", "very", "was", "we", "were", "what",
    "when", "where", "which", "while", "who", "whom", "why", "will", "with", "would", "you",
    "your", "yours",
];

const NUMBER_WORDS: &[&str] = &[
    "zero", "one", "two", "three", "four", "five", "six", "seven", "eight", "nine", "ten",
    "eleven", "twelve", "hundred", "thousand", "million", "billion",
];

/// Tokenizer-level annotator.
///
/// Fills the orthographic attributes, the word shape and the boolean flags.
/// Syntactic attributes (POS, TAG, DEP, LEMMA, ENT_TYPE) are left empty, so
/// the collector drops them from the grammar.
#[derive(Debug, Clone, Copy, Default)]
pub struct SimpleAnnotator;

impl SimpleAnnotator {
    pub fn new() -> Self {
        Self
    }

    pub fn tokenize(text: &str) -> Vec<String> {
        let mut pieces = Vec::new();

        for chunk in text.split_whitespace() {
            if chunk.chars().all(is_punct) {
                pieces.push(chunk.to_string());
                continue;
            }

            let chars: Vec<char> = chunk.chars().collect();
            let start = chars.iter().take_while(|c| is_punct(**c)).count();
            let trailing = chars.iter().rev().take_while(|c| is_punct(**c)).count();
            let end = chars.len() - trailing;

            pieces.extend(chars[..start].iter().map(|c| c.to_string()));
            pieces.push(chars[start..end].iter().collect());
            pieces.extend(chars[end..].iter().map(|c| c.to_string()));
        }

        pieces
    }

    pub fn token(text: &str) -> Token {
        let lower = text.to_lowercase();
        let mut token = Token {
            orth: text.to_string(),
            text: text.to_string(),
            lower: lower.clone(),
            length: text.chars().count(),
            shape: word_shape(text),
            ..Token::default()
        };

        let non_empty = !text.is_empty();
        token.set_flag(BoolFlag::IsAlpha, non_empty && text.chars().all(char::is_alphabetic));
        token.set_flag(BoolFlag::IsAscii, text.is_ascii());
        token.set_flag(BoolFlag::IsDigit, non_empty && text.chars().all(|c| c.is_ascii_digit()));
        token.set_flag(BoolFlag::IsLower, is_lower(text));
        token.set_flag(BoolFlag::IsUpper, is_upper(text));
        token.set_flag(BoolFlag::IsTitle, is_title(text));
        token.set_flag(BoolFlag::IsPunct, non_empty && text.chars().all(is_punct));
        token.set_flag(BoolFlag::IsSpace, non_empty && text.chars().all(char::is_whitespace));
        token.set_flag(BoolFlag::IsStop, STOP_WORDS.contains(&lower.as_str()));
        token.set_flag(BoolFlag::LikeNum, like_num(&lower));
        token.set_flag(BoolFlag::LikeUrl, like_url(&lower));
        token.set_flag(BoolFlag::LikeEmail, like_email(text));
        token
    }
}

impl Annotator for SimpleAnnotator {
    fn annotate(&self, text: &str) -> Sample {
        let tokens = Self::tokenize(text)
            .iter()
            .map(|piece| Self::token(piece))
            .collect();
        Sample::new(text, tokens)
    }
}

fn is_punct(c: char) -> bool {
    c.is_ascii_punctuation() || matches!(c, '¡' | '¿' | '«' | '»' | '…' | '“' | '”' | '‘' | '’')
}

/// Word shape: `X` upper, `x` lower, `d` digit, other characters kept.
/// Runs of the same shape character are capped at four.
pub fn word_shape(text: &str) -> String {
    let mut shape = String::with_capacity(text.len());
    let mut last = None;
    let mut run = 0;

    for c in text.chars() {
        let shape_char = if c.is_alphabetic() {
            if c.is_uppercase() { 'X' } else { 'x' }
        } else if c.is_ascii_digit() {
            'd'
        } else {
            c
        };

        if Some(shape_char) == last {
            run += 1;
        } else {
            run = 0;
            last = Some(shape_char);
        }

        if run < 4 {
            shape.push(shape_char);
        }
    }

    shape
}

fn is_lower(text: &str) -> bool {
    text.chars().any(char::is_lowercase) && !text.chars().any(char::is_uppercase)
}

fn is_upper(text: &str) -> bool {
    text.chars().any(char::is_uppercase) && !text.chars().any(char::is_lowercase)
}

fn is_title(text: &str) -> bool {
    let mut seen_cased = false;
    let mut previous_cased = false;

    for c in text.chars() {
        if c.is_uppercase() {
            if previous_cased {
                return false;
            }
            previous_cased = true;
            seen_cased = true;
        } else if c.is_lowercase() {
            if !previous_cased {
                return false;
            }
            previous_cased = true;
            seen_cased = true;
        } else {
            previous_cased = false;
        }
    }

    seen_cased
}

fn like_num(lower: &str) -> bool {
    let stripped = lower.trim_start_matches(&['+', '-', '±', '~'][..]);
    let digits: String = stripped.chars().filter(|c| *c != ',' && *c != '.').collect();
    if !digits.is_empty() && digits.chars().all(|c| c.is_ascii_digit()) {
        return true;
    }
    if let Some((numerator, denominator)) = stripped.split_once('/') {
        let is_int = |s: &str| !s.is_empty() && s.chars().all(|c| c.is_ascii_digit());
        if is_int(numerator) && is_int(denominator) {
            return true;
        }
    }
    NUMBER_WORDS.contains(&stripped)
}

fn like_url(lower: &str) -> bool {
    lower.starts_with("http://")
        || lower.starts_with("https://")
        || lower.starts_with("www.")
        || lower.starts_with("ftp://")
}

fn like_email(text: &str) -> bool {
    match text.split_once('@') {
        Some((user, domain)) => {
            !user.is_empty() && domain.contains('.') && !domain.starts_with('.') && !domain.ends_with('.')
        }
        None => false,
    }
}
