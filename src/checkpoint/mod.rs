//! Checkpoint and resume for convoys.
//!
//! A checkpoint holds everything the simulation needs to pick a convoy back
//! up: its state, progress, cargo, removal bookkeeping and transition
//! history. Collaborators (path source, trailing units, visuals) are not
//! captured; they are wired up again when the convoy is rebuilt with
//! [`ConvoyBuilder::resume`](crate::convoy::ConvoyBuilder::resume).

use crate::convoy::{Cargo, ConvoyId, ConvoyState, RemovalState, ServicePointView};
use crate::core::StateHistory;
use crate::path::{ProgressCursor, Vec2};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub mod error;

pub use error::CheckpointError;

pub const CHECKPOINT_VERSION: u32 = 1;

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Checkpoint {
    pub version: u32,

    pub id: ConvoyId,

    pub timestamp: DateTime<Utc>,

    pub state: ConvoyState,

    pub position: Vec2,

    pub cursor: ProgressCursor,

    pub cargo: Cargo,

    pub service_point: Option<ServicePointView>,

    pub removal: RemovalState,

    /// Trailing units coupled when the checkpoint was taken.
    pub trailing_units: usize,

    pub ticks: u64,

    pub history: StateHistory<ConvoyState>,
}

impl Checkpoint {
    pub fn to_json(&self) -> Result<String, CheckpointError> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn from_json(json: &str) -> Result<Self, CheckpointError> {
        let checkpoint: Self = serde_json::from_str(json)?;
        checkpoint.validate()?;
        Ok(checkpoint)
    }

    pub fn to_bytes(&self) -> Result<Vec<u8>, CheckpointError> {
        Ok(bincode::serialize(self)?)
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self, CheckpointError> {
        let checkpoint: Self = bincode::deserialize(bytes)?;
        checkpoint.validate()?;
        Ok(checkpoint)
    }

    /// Reject checkpoints from other versions, or whose wind-down counter
    /// runs without a pending removal.
    pub fn validate(&self) -> Result<(), CheckpointError> {
        if self.version != CHECKPOINT_VERSION {
            return Err(CheckpointError::UnsupportedVersion {
                found: self.version,
                supported: CHECKPOINT_VERSION,
            });
        }

        if !self.removal.is_pending() && self.removal.ticks_without_service() > 0 {
            return Err(CheckpointError::Inconsistent {
                reason: "wind-down counter set without a pending removal",
            });
        }

        Ok(())
    }
}
