//! Playback state published by the playback controller

use super::song::Song;

/// Where the controller is in its load/play cycle
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum PlaybackStatus {
    #[default]
    Idle,
    Loading,
    Playing,
    Paused,
    /// Every fallback tier failed; only a new song or a toggle retries
    Error,
}

/// Snapshot of the controller state handed to subscribers.
///
/// `is_playing` and `is_loading` are derived from `status`, so they can never
/// both be true.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PlaybackState {
    pub current_song: Option<Song>,
    pub status: PlaybackStatus,
    /// Seconds into the current song
    pub elapsed: f64,
    pub shuffle: bool,
}

impl PlaybackState {
    pub fn is_playing(&self) -> bool {
        self.status == PlaybackStatus::Playing
    }

    pub fn is_loading(&self) -> bool {
        self.status == PlaybackStatus::Loading
    }

    pub fn duration(&self) -> f64 {
        self.current_song.as_ref().map(Song::duration).unwrap_or(0.0)
    }

    pub fn current_song_id(&self) -> Option<&str> {
        self.current_song.as_ref().map(|song| song.id.as_str())
    }
}
