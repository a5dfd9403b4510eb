//! Playback controller - owns the output handle and the playback state
//!
//! State is published through a `tokio::sync::watch` channel; views only
//! ever see snapshots. Commands come in through the async methods below.
//!
//! - `fallback`: the tiered load chain run for every `play_song`
//! - `events`: output polling and end-of-track handling

mod events;
mod fallback;

#[cfg(test)]
pub(crate) mod testing;

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use rand::seq::SliceRandom;
use tokio::sync::{watch, Mutex};

use crate::audio::{AudioOutput, SourceFetcher};
use crate::error::{PlayerError, Result};
use crate::model::{Catalog, PlaybackState, PlaybackStatus, Song};

pub use events::OUTPUT_POLL_INTERVAL;
use fallback::{FallbackTier, TierKind};
pub use fallback::REMOTE_FALLBACK_URLS;

/// Settings for the load chain and the gesture gate
#[derive(Clone, Debug)]
pub struct PlaybackConfig {
    pub asset_dir: PathBuf,
    pub alternate_audio_dir: PathBuf,
    pub remote_urls: Vec<String>,
    /// Defer playback start until the user has interacted once
    pub gesture_gate: bool,
    pub retries: u32,
    pub retry_delay: Duration,
    pub local_timeout: Duration,
    pub remote_timeout: Duration,
}

impl Default for PlaybackConfig {
    fn default() -> Self {
        Self {
            asset_dir: PathBuf::from("assets"),
            alternate_audio_dir: PathBuf::from("assets/audio-alt"),
            remote_urls: REMOTE_FALLBACK_URLS.iter().map(|url| url.to_string()).collect(),
            gesture_gate: false,
            retries: 2,
            retry_delay: Duration::from_millis(300),
            local_timeout: Duration::from_secs(3),
            remote_timeout: Duration::from_secs(30),
        }
    }
}

impl PlaybackConfig {
    pub fn tiers(&self) -> Vec<FallbackTier> {
        let local = |kind| FallbackTier {
            kind,
            retries: self.retries,
            retry_delay: self.retry_delay,
            timeout: self.local_timeout,
        };
        vec![
            local(TierKind::LocalRelative),
            local(TierKind::LocalAbsolute),
            local(TierKind::AlternateLocal),
            FallbackTier {
                kind: TierKind::Remote,
                retries: self.retries,
                retry_delay: self.retry_delay,
                timeout: self.remote_timeout,
            },
        ]
    }
}

/// Everything guarded by the session lock
pub(crate) struct Session {
    pub(crate) output: Box<dyn AudioOutput>,
    /// Bumped by every `play_song`; load chains carrying an older value are stale
    pub(crate) generation: u64,
    pub(crate) user_has_interacted: bool,
    /// A source is loaded and waits for the first gesture
    pub(crate) start_pending: bool,
}

#[derive(Clone)]
pub struct PlaybackController {
    catalog: Arc<Catalog>,
    config: Arc<PlaybackConfig>,
    fetcher: Arc<dyn SourceFetcher>,
    session: Arc<Mutex<Session>>,
    state: Arc<watch::Sender<PlaybackState>>,
}

impl PlaybackController {
    pub fn new(
        catalog: Arc<Catalog>,
        config: PlaybackConfig,
        output: Box<dyn AudioOutput>,
        fetcher: Arc<dyn SourceFetcher>,
    ) -> Self {
        let (state, _) = watch::channel(PlaybackState::default());
        Self {
            catalog,
            config: Arc::new(config),
            fetcher,
            session: Arc::new(Mutex::new(Session {
                output,
                generation: 0,
                user_has_interacted: false,
                start_pending: false,
            })),
            state: Arc::new(state),
        }
    }

    pub fn subscribe(&self) -> watch::Receiver<PlaybackState> {
        self.state.subscribe()
    }

    pub fn snapshot(&self) -> PlaybackState {
        self.state.borrow().clone()
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    fn publish(&self, update: impl FnOnce(&mut PlaybackState)) {
        self.state.send_modify(update);
    }

    fn gesture_blocks(&self, session: &Session) -> bool {
        self.config.gesture_gate && !session.user_has_interacted
    }

    /// Switch to `song` and start its load chain.
    ///
    /// The new song is published right away with elapsed reset to zero so
    /// views can update before any audio is ready.
    pub async fn play_song(&self, song: Song) {
        let mut session = self.session.lock().await;
        self.switch_to(&mut session, song);
    }

    fn switch_to(&self, session: &mut Session, song: Song) {
        tracing::info!(song_id = %song.id, title = %song.title, artist = %song.artist, "Playing song");

        session.output.stop();
        session.generation += 1;
        session.start_pending = false;
        let generation = session.generation;

        self.publish(|state| {
            state.current_song = Some(song.clone());
            state.elapsed = 0.0;
            state.status = PlaybackStatus::Loading;
        });

        let controller = self.clone();
        tokio::spawn(async move {
            controller.run_load_chain(generation, song).await;
        });
    }

    pub async fn play_song_by_id(&self, id: &str) -> Result<()> {
        let song = self
            .catalog
            .get_song_by_id(id)
            .cloned()
            .ok_or_else(|| PlayerError::NotFound(id.to_string()))?;
        self.play_song(song).await;
        Ok(())
    }

    async fn play_first(&self) {
        match self.catalog.first().cloned() {
            Some(song) => self.play_song(song).await,
            None => tracing::debug!("Catalog is empty, nothing to play"),
        }
    }

    pub async fn toggle_play_pause(&self) {
        let has_song = self.state.borrow().current_song.is_some();
        if !has_song {
            tracing::debug!("No current song, starting the first one");
            self.play_first().await;
            return;
        }

        let mut session = self.session.lock().await;
        // Re-read under the lock; a new song may have started meanwhile
        let status = self.state.borrow().status;
        match status {
            PlaybackStatus::Playing => {
                session.output.pause();
                self.publish(|state| state.status = PlaybackStatus::Paused);
                tracing::info!("Playback paused");
            }
            PlaybackStatus::Paused => {
                if self.gesture_blocks(&session) {
                    tracing::debug!("Resume blocked until a user gesture");
                    return;
                }
                session.start_pending = false;
                match session.output.play() {
                    Ok(()) => {
                        self.publish(|state| state.status = PlaybackStatus::Playing);
                        tracing::info!("Playback resumed");
                    }
                    Err(e) => tracing::warn!(error = %e, "Resume failed"),
                }
            }
            PlaybackStatus::Error => {
                drop(session);
                let song = self.state.borrow().current_song.clone();
                if let Some(song) = song {
                    tracing::info!(song_id = %song.id, "Retrying song after load error");
                    self.play_song(song).await;
                }
            }
            PlaybackStatus::Idle | PlaybackStatus::Loading => {
                tracing::debug!(?status, "Toggle ignored while not started");
            }
        }
    }

    pub async fn play_next(&self) {
        let (current_id, shuffle) = {
            let state = self.state.borrow();
            (state.current_song_id().map(str::to_string), state.shuffle)
        };

        let Some(current_id) = current_id else {
            self.play_first().await;
            return;
        };

        if let Some(song) = self.next_song(&current_id, shuffle) {
            tracing::debug!(from = %current_id, to = %song.id, shuffle, "Next song");
            self.play_song(song).await;
        }
    }

    fn next_song(&self, current_id: &str, shuffle: bool) -> Option<Song> {
        if shuffle {
            shuffle_pick(&self.catalog, current_id)
        } else {
            self.catalog
                .get(next_index(self.catalog.index_of(current_id), self.catalog.len()))
                .cloned()
        }
    }

    pub async fn play_previous(&self) {
        let current_id = self.state.borrow().current_song_id().map(str::to_string);

        let Some(current_id) = current_id else {
            self.play_first().await;
            return;
        };

        let previous = self
            .catalog
            .get(previous_index(self.catalog.index_of(&current_id), self.catalog.len()))
            .cloned();

        if let Some(song) = previous {
            tracing::debug!(from = %current_id, to = %song.id, "Previous song");
            self.play_song(song).await;
        }
    }

    /// Move the output to `time` seconds. Non-finite or negative times are ignored.
    pub async fn seek_to(&self, time: f64) {
        if !time.is_finite() || time < 0.0 {
            tracing::debug!(time, "Ignoring invalid seek target");
            return;
        }

        let (has_song, duration) = {
            let state = self.state.borrow();
            (state.current_song.is_some(), state.duration())
        };
        if !has_song {
            return;
        }

        let target = if duration > 0.0 { time.min(duration) } else { time };
        let mut session = self.session.lock().await;
        match session.output.seek(Duration::from_secs_f64(target)) {
            Ok(()) => tracing::debug!(target, "Seeked"),
            Err(e) => tracing::warn!(target, error = %e, "Seek failed"),
        }
    }

    pub fn set_shuffle_mode(&self, enabled: bool) {
        tracing::info!(enabled, "Shuffle mode");
        self.publish(|state| state.shuffle = enabled);
    }

    pub fn toggle_shuffle(&self) {
        let enabled = !self.state.borrow().shuffle;
        self.set_shuffle_mode(enabled);
    }

    pub async fn set_volume(&self, volume: f32) {
        self.session.lock().await.output.set_volume(volume);
    }

    /// Record a user gesture; starts a source parked by the gesture gate.
    ///
    /// Returns true when this gesture was the one that started playback, so
    /// the caller does not also treat it as a play/pause toggle.
    pub async fn note_user_gesture(&self) -> bool {
        let mut session = self.session.lock().await;
        if !session.user_has_interacted {
            tracing::debug!("First user gesture observed");
            session.user_has_interacted = true;
        }

        if !session.start_pending {
            return false;
        }
        session.start_pending = false;

        match session.output.play() {
            Ok(()) => {
                self.publish(|state| state.status = PlaybackStatus::Playing);
                tracing::info!("Deferred playback started");
            }
            Err(e) => {
                tracing::error!(error = %e, "Deferred playback failed to start");
                self.publish(|state| state.status = PlaybackStatus::Error);
            }
        }
        true
    }
}

/// Successor index, wrapping to the start. An unknown current index restarts at 0.
pub fn next_index(current: Option<usize>, len: usize) -> usize {
    match current {
        Some(index) if index + 1 < len => index + 1,
        _ => 0,
    }
}

/// Predecessor index, wrapping to the end
pub fn previous_index(current: Option<usize>, len: usize) -> usize {
    match current {
        Some(index) if index > 0 => index - 1,
        _ => len.saturating_sub(1),
    }
}

/// Uniform pick among every song except the current one
fn shuffle_pick(catalog: &Catalog, current_id: &str) -> Option<Song> {
    let candidates: Vec<&Song> = catalog
        .songs()
        .iter()
        .filter(|song| song.id != current_id)
        .collect();

    match candidates.choose(&mut rand::thread_rng()) {
        Some(song) => Some((*song).clone()),
        None => catalog.first().cloned(),
    }
}
