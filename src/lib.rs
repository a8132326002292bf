pub mod annotation;
pub mod config;
pub mod engines;
pub mod error;
pub mod grammar;
pub mod types;

pub use error::{PatternomaticError, Result};
