//! Playback control methods

use super::AppController;

const VOLUME_STEP: f32 = 0.1;

impl AppController {
    /// Load the configured start song, or the first one in the catalog.
    pub async fn initialize_playback(&self, start_song: Option<String>) {
        if let Some(id) = start_song {
            match self.playback.play_song_by_id(&id).await {
                Ok(()) => return,
                Err(e) => {
                    tracing::warn!(song_id = %id, error = %e, "Start song not found, using the first song");
                    self.model.lock().await.set_error(format!("Song {} not found", id)).await;
                }
            }
        }

        match self.playback.catalog().first().cloned() {
            Some(song) => {
                tracing::info!(song_id = %song.id, "Loading default song");
                self.playback.play_song(song).await;
            }
            None => tracing::warn!("Catalog is empty, nothing to load"),
        }
    }

    pub async fn toggle_playback(&self) {
        let status = self.playback.snapshot().status;
        tracing::debug!(?status, "Toggling playback");
        self.playback.toggle_play_pause().await;
    }

    pub async fn next_track(&self) {
        tracing::debug!("Skipping to next track");
        self.playback.play_next().await;
    }

    pub async fn previous_track(&self) {
        tracing::debug!("Going back to previous track");
        self.playback.play_previous().await;
    }

    pub async fn toggle_shuffle(&self) {
        self.playback.toggle_shuffle();
    }

    pub async fn set_volume(&self, volume: f32) {
        let volume = volume.clamp(0.0, 1.0);
        self.playback.set_volume(volume).await;
        self.model.lock().await.set_volume(volume).await;
        tracing::debug!(volume, "Volume set");
    }

    pub async fn volume_up(&self) {
        let volume = self.model.lock().await.get_volume().await;
        self.set_volume(volume + VOLUME_STEP).await;
    }

    pub async fn volume_down(&self) {
        let volume = self.model.lock().await.get_volume().await;
        self.set_volume(volume - VOLUME_STEP).await;
    }

    /// Seek to the position under a click on the progress bar.
    pub async fn seek_to_click(&self, column: u16, row: u16) {
        let Some(area) = self.progress_area().await else {
            return;
        };
        // The gauge is drawn inside a bordered block
        let inner_x = area.x.saturating_add(1);
        let inner_width = area.width.saturating_sub(2);
        let inside = row > area.y
            && row < area.y.saturating_add(area.height).saturating_sub(1)
            && column >= inner_x
            && column < inner_x.saturating_add(inner_width);
        if !inside {
            return;
        }

        let now_playing = self.model.lock().await.get_now_playing().await;
        let offset = f64::from(column - inner_x);
        if let Some(target) = now_playing.seek_target(offset, f64::from(inner_width)) {
            tracing::debug!(target, "Seek from progress bar");
            self.playback.seek_to(target).await;
        }
    }
}
