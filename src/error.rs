use thiserror::Error;

#[derive(Error, Debug)]
pub enum PatternomaticError {
    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Derivation exhausted after {wraps} genotype wraps")]
    DerivationExhausted { wraps: usize },

    #[error("Grammar error: {0}")]
    Grammar(String),

    #[error("Invalid pattern: {0}")]
    InvalidPattern(String),

    #[error("Fitness evaluation exceeded its {budget_ms} ms budget")]
    Timeout { budget_ms: u64 },

    #[error("Not supported: {0}")]
    NotSupported(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serde error: {0}")]
    Serde(#[from] serde_json::Error),

    #[error("Config error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("TOML error: {0}")]
    TomlSer(#[from] toml::ser::Error),
}

impl PatternomaticError {
    /// Failures that only cost an individual its fitness rather than the run.
    pub fn is_local(&self) -> bool {
        matches!(
            self,
            Self::DerivationExhausted { .. }
                | Self::InvalidPattern(_)
                | Self::Timeout { .. }
        )
    }
}

pub type Result<T> = std::result::Result<T, PatternomaticError>;
