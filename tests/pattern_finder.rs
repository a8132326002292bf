mod common;

use patternomatic::config::{AppConfig, ConfigManager};
use patternomatic::engines::generation::PatternFinder;
use patternomatic::types::Sample;
use std::io::Write;

#[test]
fn test_finder_on_json_corpus() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    let corpus = common::annotate(&common::ANIMAL_TEXTS);
    write!(file, "{}", serde_json::to_string(&corpus).unwrap()).unwrap();

    let raw = std::fs::read_to_string(file.path()).unwrap();
    let samples: Vec<Sample> = serde_json::from_str(&raw).unwrap();
    assert_eq!(samples.len(), 4);
    assert_eq!(samples[3].tokens[3].orth, "test");

    let mut config = AppConfig::default();
    config.evolution.runs = 2;
    config.evolution.seed = Some(9);
    config.grammar.use_grammar_operators = true;

    let elites = PatternFinder::new(config).find(&samples).unwrap();

    assert!(!elites.is_empty());
    for elite in &elites {
        assert!((0.0..=1.0).contains(&elite.fitness));
        assert!(elite.pattern.is_array());
        assert_eq!(elite.generations, 3);
    }

    let json = serde_json::to_value(&elites).unwrap();
    assert!(json[0]["pattern"].is_array());
    assert!(json[0]["genotype"].is_string());
}

#[test]
fn test_config_file_drives_finder() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("patternomatic.toml");
    std::fs::write(
        &path,
        "[evolution]\npopulation_size = 4\nmax_generations = 1\nseed = 5\n\n[fitness]\nfitness_function_type = \"FULLMATCH\"\n",
    )
    .unwrap();

    let manager = ConfigManager::new();
    manager.load_from_file(&path).unwrap();
    let config = manager.get();
    assert_eq!(config.evolution.population_size, 4);

    let samples = common::annotate(&["a cat", "a dog"]);
    let elites = PatternFinder::new(config).find(&samples).unwrap();

    assert!(elites.iter().all(|e| e.generations == 1));
}
