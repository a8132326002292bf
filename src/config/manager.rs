use super::{
    evolution::EvolutionConfig,
    fitness::FitnessConfig,
    grammar::GrammarConfig,
    traits::ConfigSection,
};
use crate::error::PatternomaticError;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::{Arc, RwLock};

/// Environment variables overriding file settings, e.g. `PATTERNOMATIC__EVOLUTION__SEED=7`
pub const ENV_PREFIX: &str = "PATTERNOMATIC";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub evolution: EvolutionConfig,
    pub grammar: GrammarConfig,
    pub fitness: FitnessConfig,
}

impl AppConfig {
    pub fn validate(&self) -> Result<(), PatternomaticError> {
        self.evolution.validate()?;
        self.grammar.validate()?;
        self.fitness.validate()?;
        Ok(())
    }

    /// Layer defaults, an optional file and the environment, in that order
    pub fn load(path: Option<&Path>) -> Result<Self, PatternomaticError> {
        let mut builder = config::Config::builder()
            .add_source(config::Config::try_from(&AppConfig::default())?);

        if let Some(path) = path {
            builder = builder.add_source(config::File::from(path));
        }

        let settings = builder
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        let config: AppConfig = settings.try_deserialize()?;
        config.validate()?;

        log::debug!(
            "Loaded configuration sections [{}, {}, {}]",
            EvolutionConfig::section_name(),
            GrammarConfig::section_name(),
            FitnessConfig::section_name()
        );
        Ok(config)
    }
}

pub struct ConfigManager {
    config: Arc<RwLock<AppConfig>>,
}

impl Default for ConfigManager {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigManager {
    pub fn new() -> Self {
        Self {
            config: Arc::new(RwLock::new(AppConfig::default())),
        }
    }

    pub fn load_from_file<P: AsRef<Path>>(&self, path: P) -> Result<(), PatternomaticError> {
        let config = AppConfig::load(Some(path.as_ref()))?;

        let mut guard = self
            .config
            .write()
            .map_err(|_| PatternomaticError::Configuration("Config lock poisoned".to_string()))?;
        *guard = config;
        Ok(())
    }

    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<(), PatternomaticError> {
        let config = self.get();
        let toml_str = toml::to_string_pretty(&config)?;

        std::fs::write(path, toml_str)?;

        Ok(())
    }

    pub fn get(&self) -> AppConfig {
        match self.config.read() {
            Ok(config) => config.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    pub fn update<F>(&self, f: F) -> Result<(), PatternomaticError>
    where
        F: FnOnce(&mut AppConfig),
    {
        let mut config = self
            .config
            .write()
            .map_err(|_| PatternomaticError::Configuration("Config lock poisoned".to_string()))?;
        let mut candidate = config.clone();
        f(&mut candidate);
        candidate.validate()?;
        *config = candidate;
        Ok(())
    }
}
