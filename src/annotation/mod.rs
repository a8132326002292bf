pub mod collector;
pub mod features;
pub mod inventory;
pub mod tokenizer;

pub use collector::AnnotationCollector;
pub use features::{FeatureKey, CUSTOM_PREFIX, MATCHER_SUPPORTED_ATTRIBUTES};
pub use inventory::FeatureInventory;
pub use tokenizer::{Annotator, SimpleAnnotator};
