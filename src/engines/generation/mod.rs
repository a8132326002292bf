pub mod codec;
pub mod finder;
pub mod gene_consumer;
pub mod genome;
pub mod hall_of_fame;
pub mod individual;
pub mod operators;
pub mod phenotype;
pub mod population;
pub mod progress;

pub use codec::GenotypeCodec;
pub use finder::PatternFinder;
pub use gene_consumer::GeneConsumer;
pub use genome::Genotype;
pub use hall_of_fame::{ElitePattern, HallOfFame};
pub use individual::{Individual, IndividualState};
pub use phenotype::{Constraint, PatternValue, Phenotype, TokenPattern};
pub use population::Population;
pub use progress::{LogProgressCallback, ProgressCallback, StopSignal};
