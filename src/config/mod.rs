pub mod traits;
pub mod evolution;
pub mod grammar;
pub mod fitness;
pub mod manager;

pub use manager::{ConfigManager, AppConfig};
pub use evolution::{EvolutionConfig, SelectionType, RecombinationType, ReplacementType};
pub use grammar::GrammarConfig;
pub use fitness::{FitnessConfig, FitnessFunctionType};
pub use traits::ConfigSection;
