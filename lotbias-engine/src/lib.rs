pub mod bonus;
pub mod combiner;
pub mod config;
pub mod engine;
pub mod error;
pub mod lines;
pub mod pairs;
pub mod preset;
pub mod ranking;
pub mod sampler;
pub mod signals;
pub mod weights;

pub use engine::BiasEngine;
pub use error::{EngineError, EngineResult, LockError};
pub use preset::Preset;

#[cfg(test)]
pub(crate) mod testutil;
