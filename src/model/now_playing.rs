//! Root view mirror of the playback state

use super::images::{CoverImage, ImageResolver};
use super::playback::{PlaybackState, PlaybackStatus};
use super::song::Song;

pub fn progress_percentage(elapsed: f64, duration: f64) -> f64 {
    if duration > 0.0 {
        elapsed / duration * 100.0
    } else {
        0.0
    }
}

/// Displayable copy of everything the transport bar shows
#[derive(Clone, Debug, Default)]
pub struct NowPlaying {
    pub song: Option<Song>,
    pub cover: Option<CoverImage>,
    pub is_playing: bool,
    pub is_loading: bool,
    pub is_shuffle: bool,
    pub has_error: bool,
    pub current_time: f64,
    pub duration: f64,
    pub progress_percentage: f64,
}

impl NowPlaying {
    /// Mirror a playback snapshot. The cover is only resolved again when the song changes.
    pub fn apply(&mut self, state: &PlaybackState, images: &ImageResolver) {
        let song_changed = self.song.as_ref().map(|s| &s.id) != state.current_song.as_ref().map(|s| &s.id);
        if song_changed {
            self.cover = state.current_song.as_ref().map(|song| images.load_cover(song));
            self.song = state.current_song.clone();
        }

        self.is_playing = state.is_playing();
        self.is_loading = state.is_loading();
        self.is_shuffle = state.shuffle;
        self.has_error = state.status == PlaybackStatus::Error;
        self.duration = state.duration();
        self.current_time = state.elapsed;
        self.progress_percentage = progress_percentage(self.current_time, self.duration);
    }

    /// Seek target for a click `offset` cells/pixels into a bar `width` wide
    pub fn seek_target(&self, offset: f64, width: f64) -> Option<f64> {
        if self.song.is_none() || self.duration <= 0.0 || width <= 0.0 {
            return None;
        }
        let ratio = (offset / width).clamp(0.0, 1.0);
        Some(self.duration * ratio)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state_with(song: Song, elapsed: f64, status: PlaybackStatus) -> PlaybackState {
        PlaybackState {
            current_song: Some(song),
            status,
            elapsed,
            shuffle: false,
        }
    }

    fn song() -> Song {
        Song::new("2", "Caught Somewhere in Time", "Iron Maiden", "Somewhere in Time", 441, "c.mp3", "missing.webp", "Heavy Metal", Some(1986))
    }

    #[test]
    fn progress_guards_zero_duration() {
        assert_eq!(progress_percentage(10.0, 0.0), 0.0);
        assert_eq!(progress_percentage(60.0, 240.0), 25.0);
    }

    #[test]
    fn mirrors_playback_state() {
        let images = ImageResolver::new();
        let mut now = NowPlaying::default();

        now.apply(&state_with(song(), 0.0, PlaybackStatus::Loading), &images);
        assert!(now.is_loading);
        assert!(!now.is_playing);
        assert_eq!(now.duration, 441.0);
        assert!(now.cover.as_ref().unwrap().is_placeholder);

        now.apply(&state_with(song(), 220.5, PlaybackStatus::Playing), &images);
        assert!(now.is_playing);
        assert_eq!(now.current_time, 220.5);
        assert!((now.progress_percentage - 50.0).abs() < 1e-9);

        now.apply(&state_with(song(), 0.0, PlaybackStatus::Error), &images);
        assert!(now.has_error);
        assert!(!now.is_playing && !now.is_loading);

        now.apply(&PlaybackState::default(), &images);
        assert!(now.song.is_none());
        assert!(now.cover.is_none());
        assert_eq!(now.progress_percentage, 0.0);
    }

    #[test]
    fn seek_target_is_proportional_and_clamped() {
        let images = ImageResolver::new();
        let mut now = NowPlaying::default();
        assert_eq!(now.seek_target(10.0, 100.0), None);

        now.apply(&state_with(song(), 0.0, PlaybackStatus::Playing), &images);
        assert_eq!(now.seek_target(50.0, 100.0), Some(220.5));
        assert_eq!(now.seek_target(-5.0, 100.0), Some(0.0));
        assert_eq!(now.seek_target(150.0, 100.0), Some(441.0));
        assert_eq!(now.seek_target(5.0, 0.0), None);
    }
}
