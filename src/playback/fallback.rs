//! Tiered load chain
//!
//! A song is tried against each tier in order. Every tier gets the same
//! treatment: fetch with a timeout, decode, start, and on failure retry the
//! same source after a delay until its budget runs out.

use std::path::{Path, PathBuf};
use std::time::Duration;

use rand::seq::SliceRandom;

use crate::audio::AudioSource;
use crate::error::{PlayerError, Result};
use crate::model::{PlaybackStatus, Song};

use super::{PlaybackConfig, PlaybackController};

/// Publicly hosted samples used when no local copy can be played
pub const REMOTE_FALLBACK_URLS: [&str; 3] = [
    "https://www.soundhelix.com/examples/mp3/SoundHelix-Song-1.mp3",
    "https://www.soundhelix.com/examples/mp3/SoundHelix-Song-2.mp3",
    "https://www.soundhelix.com/examples/mp3/SoundHelix-Song-3.mp3",
];

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TierKind {
    /// `<asset_dir>/audio/<file>` as given
    LocalRelative,
    /// The relative path resolved against the working directory
    LocalAbsolute,
    /// `<alternate_audio_dir>/<file>`
    AlternateLocal,
    /// Random pick from the remote pool
    Remote,
}

impl TierKind {
    pub fn source_for(self, song: &Song, config: &PlaybackConfig) -> Option<AudioSource> {
        let relative = config.asset_dir.join("audio").join(&song.file);
        match self {
            TierKind::LocalRelative => Some(AudioSource::File(relative)),
            TierKind::LocalAbsolute => Some(AudioSource::File(absolute(&relative))),
            TierKind::AlternateLocal => Some(AudioSource::File(
                config.alternate_audio_dir.join(&song.file),
            )),
            TierKind::Remote => config
                .remote_urls
                .choose(&mut rand::thread_rng())
                .map(|url| AudioSource::Remote(url.clone())),
        }
    }
}

fn absolute(path: &Path) -> PathBuf {
    std::path::absolute(path).unwrap_or_else(|_| path.to_path_buf())
}

/// One row of the fallback table
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FallbackTier {
    pub kind: TierKind,
    /// Extra attempts after the first one
    pub retries: u32,
    pub retry_delay: Duration,
    /// Budget for fetching the source in one attempt
    pub timeout: Duration,
}

/// How a single attempt ended when it did not fail
#[derive(Debug, PartialEq, Eq)]
enum Attempt {
    Started,
    AwaitingGesture,
    Superseded,
}

impl PlaybackController {
    /// Walk the fallback table for `song` until one source plays or all fail.
    ///
    /// Gives up silently as soon as a newer `play_song` has bumped the
    /// generation.
    pub(super) async fn run_load_chain(&self, generation: u64, song: Song) {
        for tier in self.config.tiers() {
            let Some(source) = tier.kind.source_for(&song, &self.config) else {
                tracing::debug!(tier = ?tier.kind, "Tier has no source, skipping");
                continue;
            };

            for attempt in 0..=tier.retries {
                if attempt > 0 {
                    tracing::debug!(
                        song_id = %song.id,
                        tier = ?tier.kind,
                        retries_left = tier.retries - attempt + 1,
                        "Retrying source"
                    );
                    tokio::time::sleep(tier.retry_delay).await;
                }

                if self.is_stale(generation).await {
                    tracing::debug!(generation, "Load chain superseded");
                    return;
                }

                match self.attempt(generation, &source, tier.timeout).await {
                    Ok(Attempt::Started) => {
                        tracing::info!(song_id = %song.id, tier = ?tier.kind, source = %source, "Playback started");
                        return;
                    }
                    Ok(Attempt::AwaitingGesture) => {
                        tracing::info!(song_id = %song.id, "Source ready, waiting for a user gesture");
                        return;
                    }
                    Ok(Attempt::Superseded) => {
                        tracing::debug!(generation, "Load chain superseded");
                        return;
                    }
                    Err(e) => {
                        tracing::warn!(song_id = %song.id, tier = ?tier.kind, attempt, error = %e, "Load attempt failed");
                    }
                }
            }

            tracing::warn!(song_id = %song.id, tier = ?tier.kind, "Tier exhausted, moving to next source");
        }

        let session = self.session.lock().await;
        if session.generation != generation {
            return;
        }
        tracing::error!(song_id = %song.id, title = %song.title, "All audio sources failed");
        self.publish(|state| state.status = PlaybackStatus::Error);
    }

    async fn is_stale(&self, generation: u64) -> bool {
        self.session.lock().await.generation != generation
    }

    async fn attempt(&self, generation: u64, source: &AudioSource, timeout: Duration) -> Result<Attempt> {
        let bytes = match tokio::time::timeout(timeout, self.fetcher.fetch(source)).await {
            Ok(result) => result?,
            Err(_) => return Err(PlayerError::load(source, "timed out")),
        };

        let mut session = self.session.lock().await;
        if session.generation != generation {
            return Ok(Attempt::Superseded);
        }

        session.output.load(source, bytes)?;

        if self.gesture_blocks(&session) {
            session.start_pending = true;
            self.publish(|state| state.status = PlaybackStatus::Paused);
            return Ok(Attempt::AwaitingGesture);
        }

        session.output.play()?;
        self.publish(|state| state.status = PlaybackStatus::Playing);
        Ok(Attempt::Started)
    }
}
