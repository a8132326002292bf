#![allow(dead_code)]

use patternomatic::annotation::{Annotator, SimpleAnnotator};
use patternomatic::types::{Sample, Value};

pub const GRAMMAR_TEXTS: [&str; 2] = ["This is a test.", "Checks for Backus Naur Form grammars"];

pub const ANIMAL_TEXTS: [&str; 4] = [
    "I am a raccoon!",
    "You are a cat!",
    "Is she a rabbit?",
    "This is a test",
];

/// (pos, tag, dep, lemma) per token of `GRAMMAR_TEXTS`
const SYNTAX: [(&str, &str, &str, &str); 11] = [
    ("PRON", "DT", "nsubj", "this"),
    ("AUX", "VBZ", "ROOT", "be"),
    ("DET", "DT", "det", "a"),
    ("NOUN", "NN", "attr", "test"),
    ("PUNCT", ".", "punct", "."),
    ("VERB", "VBZ", "ROOT", "check"),
    ("ADP", "IN", "prep", "for"),
    ("PROPN", "NNP", "compound", "Backus"),
    ("PROPN", "NNP", "compound", "Naur"),
    ("PROPN", "NNP", "compound", "Form"),
    ("NOUN", "NNS", "pobj", "grammar"),
];

pub fn annotate(texts: &[&str]) -> Vec<Sample> {
    let annotator = SimpleAnnotator::new();
    texts.iter().map(|text| annotator.annotate(text)).collect()
}

/// The grammar corpus with syntactic attributes filled in and no entities
pub fn parsed_grammar_corpus() -> Vec<Sample> {
    let mut samples = annotate(&GRAMMAR_TEXTS);
    let tokens = samples.iter_mut().flat_map(|sample| sample.tokens.iter_mut());

    for (token, (pos, tag, dep, lemma)) in tokens.zip(SYNTAX) {
        token.pos = pos.to_string();
        token.tag = tag.to_string();
        token.dep = dep.to_string();
        token.lemma = lemma.to_string();
    }
    samples
}

/// Grammar corpus whose tokens carry custom attributes
pub fn custom_grammar_corpus() -> Vec<Sample> {
    let mut samples = annotate(&GRAMMAR_TEXTS);
    for sample in &mut samples {
        for token in &mut sample.tokens {
            token
                .custom
                .insert("has_vector".to_string(), Value::Bool(token.length > 2));
            token
                .custom
                .insert("Lemma".to_string(), Value::from(token.lower.as_str()));
        }
    }
    samples
}
