use super::traits::ConfigSection;
use crate::error::PatternomaticError;
use serde::{Deserialize, Serialize};
use std::time::Duration;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FitnessConfig {
    pub fitness_function_type: FitnessFunctionType,
    /// Per-individual evaluation budget in milliseconds, no limit when unset
    pub timeout_ms: Option<u64>,
    /// Evaluation worker threads, 0 lets rayon decide
    pub workers: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FitnessFunctionType {
    Basic,
    Fullmatch,
}

impl Default for FitnessConfig {
    fn default() -> Self {
        Self {
            fitness_function_type: FitnessFunctionType::Basic,
            timeout_ms: None,
            workers: 0,
        }
    }
}

impl FitnessConfig {
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_ms.map(Duration::from_millis)
    }
}

impl ConfigSection for FitnessConfig {
    fn section_name() -> &'static str {
        "fitness"
    }

    fn validate(&self) -> Result<(), PatternomaticError> {
        if self.timeout_ms == Some(0) {
            return Err(PatternomaticError::Configuration(
                "Fitness timeout must be positive".to_string()
            ));
        }
        Ok(())
    }
}
