//! Errors raised while saving or restoring a convoy checkpoint.

use thiserror::Error;

/// Why a checkpoint could not be written or read back.
#[derive(Debug, Error)]
pub enum CheckpointError {
    /// The JSON encoding could not be produced or parsed
    #[error("Checkpoint JSON encoding failed: {0}")]
    Json(#[from] serde_json::Error),

    /// The bincode encoding could not be produced or parsed
    #[error("Checkpoint binary encoding failed: {0}")]
    Binary(#[from] bincode::Error),

    /// The checkpoint was written by an incompatible format version
    #[error("Checkpoint format {found} cannot be resumed (expected {supported})")]
    UnsupportedVersion { found: u32, supported: u32 },

    /// Decoded fields contradict each other, so the convoy cannot resume
    #[error("Checkpoint for convoy is inconsistent: {reason}")]
    Inconsistent { reason: &'static str },
}
