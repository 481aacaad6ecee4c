//! Common types and utilities shared across the crossover workspace.

pub mod crossover;
pub mod dataset_id;
pub mod error;
pub mod time;

pub use crossover::Crossover;
pub use dataset_id::{
    DatasetId, DEFAULT_PLATFORM_PREFIX_LEN, MAX_DATASET_ID_LENGTH, MIN_DATASET_ID_LENGTH,
};
pub use error::{CrossoverError, CrossoverResult};
pub use time::{format_epoch, round_epoch};
