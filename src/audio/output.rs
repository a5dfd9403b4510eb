//! Output handle abstraction

use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

use crate::error::Result;

/// Where a load attempt reads its audio from
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AudioSource {
    File(PathBuf),
    Remote(String),
}

impl fmt::Display for AudioSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AudioSource::File(path) => write!(f, "{}", path.display()),
            AudioSource::Remote(url) => write!(f, "{}", url),
        }
    }
}

/// Notifications the output produces while a source is playing
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum OutputEvent {
    /// Current position in seconds
    TimeUpdate(f64),
    /// The source played to its natural end
    Ended,
}

/// A single playback handle.
///
/// `load` replaces whatever was loaded before and leaves the new source
/// paused; nothing is audible until `play` succeeds.
pub trait AudioOutput: Send {
    /// Decode the fetched bytes of `source`. Succeeds once the source can play through.
    fn load(&mut self, source: &AudioSource, bytes: Vec<u8>) -> Result<()>;

    /// Start or resume the loaded source
    fn play(&mut self) -> Result<()>;

    fn pause(&mut self);

    /// Drop the loaded source
    fn stop(&mut self);

    fn seek(&mut self, position: Duration) -> Result<()>;

    fn position(&self) -> Duration;

    /// True once a loaded source has run out of samples
    fn is_finished(&self) -> bool;

    fn set_volume(&mut self, volume: f32);
}
