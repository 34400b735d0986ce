//! Errors raised while assembling a convoy.
//!
//! Ticking never fails; only construction and resumption do.

use crate::builder::BuildError;
use crate::checkpoint::CheckpointError;
use crate::config::ConfigError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConvoyError {
    #[error("Invalid convoy config: {0}")]
    Config(#[from] ConfigError),

    #[error("Convoy state machine failed to build: {0}")]
    Machine(#[from] BuildError),

    #[error("Cannot resume convoy: {0}")]
    Checkpoint(#[from] CheckpointError),

    #[error("Path source not specified. Call .source(..) before .build()")]
    MissingPathSource,

    #[error("Fleet accounting not specified. Call .accounting(..) before .build()")]
    MissingAccounting,
}
