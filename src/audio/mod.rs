//! Audio module - the output handle the playback controller drives
//!
//! - `output`: the `AudioOutput` trait, sources and output events
//! - `fetch`: reading sources from disk or over HTTP
//! - `rodio_output`: rodio-backed implementation for the local sound device

mod fetch;
mod output;
mod rodio_output;

pub use fetch::{SourceFetcher, StandardFetcher};
pub use output::{AudioOutput, AudioSource, OutputEvent};
pub use rodio_output::RodioOutput;

/// Output volume when none is configured
pub const DEFAULT_VOLUME: f32 = 0.7;
