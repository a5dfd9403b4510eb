//! Error types for catalog lookups and the audio output

use thiserror::Error;

/// Failures surfaced by the audio output and the playback controller.
///
/// Load and start failures are consumed by the fallback chain; they only
/// reach the UI once every tier has been exhausted.
#[derive(Debug, Error)]
pub enum PlayerError {
    /// The source could not be fetched or decoded
    #[error("Failed to load {source_desc}: {reason}")]
    LoadFailure { source_desc: String, reason: String },

    /// The output rejected the start of playback
    #[error("Playback could not start: {0}")]
    PlaybackStartFailure(String),

    /// Catalog lookup miss
    #[error("Song not found: {0}")]
    NotFound(String),

    /// The output device itself misbehaved
    #[error("Audio output error: {0}")]
    Output(String),
}

impl PlayerError {
    pub fn load(source_desc: impl ToString, reason: impl ToString) -> Self {
        Self::LoadFailure {
            source_desc: source_desc.to_string(),
            reason: reason.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, PlayerError>;
