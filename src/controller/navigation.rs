//! Song list navigation: mounting, selection and viewport width

use std::time::Duration;

use crate::model::Song;
use super::AppController;

/// Simulated loading delay before the song list is first populated
pub const MOUNT_DELAY: Duration = Duration::from_millis(500);

/// Viewport width in pixels. Terminals that report no pixel size fall back to
/// columns times the configured cell width.
pub fn viewport_width_px(columns: u16, reported_px: u16, cell_width_px: u32) -> u32 {
    if reported_px > 0 {
        u32::from(reported_px)
    } else {
        u32::from(columns) * cell_width_px
    }
}

impl AppController {
    pub async fn mount_song_list(&self) {
        tokio::time::sleep(MOUNT_DELAY).await;

        let songs = self.playback.catalog().get_all_songs();
        tracing::info!(songs = songs.len(), "Song list mounted");
        self.model.lock().await.populate_song_list(songs).await;
    }

    pub async fn select_song(&self, song: Song) {
        tracing::info!(song_id = %song.id, title = %song.title, "Song selected");
        self.playback.play_song(song).await;
    }

    pub async fn play_selected_song(&self) {
        let selected = self.model.lock().await.get_selected_song().await;
        if let Some(song) = selected {
            self.select_song(song).await;
        }
    }

    pub async fn play_random_song(&self) {
        match self.playback.catalog().get_random_song().cloned() {
            Some(song) => self.select_song(song).await,
            None => tracing::debug!("Catalog is empty, no random song"),
        }
    }

    pub async fn handle_resize(&self, columns: u16) {
        let reported_px = crossterm::terminal::window_size()
            .map(|size| size.width)
            .unwrap_or(0);
        let width_px = viewport_width_px(columns, reported_px, self.cell_width_px);
        self.model.lock().await.set_viewport_width(width_px).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::controller::testing::controller;
    use crate::model::Catalog;
    use crate::playback::testing::settle;

    #[test]
    fn pixel_width_prefers_reported_size() {
        assert_eq!(viewport_width_px(100, 1280, 8), 1280);
        assert_eq!(viewport_width_px(100, 0, 8), 800);
        assert_eq!(viewport_width_px(200, 0, 8), 1600);
    }

    #[tokio::test(start_paused = true)]
    async fn song_list_loads_after_mount_delay() {
        let (app, _handle) = controller(Catalog::default());
        assert!(app.model.lock().await.get_song_list().await.is_loading);

        let mount = tokio::spawn({
            let app = app.clone();
            async move { app.mount_song_list().await }
        });

        tokio::time::sleep(MOUNT_DELAY / 2).await;
        assert!(app.model.lock().await.get_song_list().await.is_loading);

        mount.await.unwrap();
        let list = app.model.lock().await.get_song_list().await;
        assert!(!list.is_loading);
        assert_eq!(list.filtered.len(), 6);
    }

    #[tokio::test(start_paused = true)]
    async fn enter_on_selection_plays_it() {
        let (app, handle) = controller(Catalog::default());
        app.mount_song_list().await;
        app.model.lock().await.move_selection_right().await;

        app.play_selected_song().await;
        let state = settle(&app.playback).await;
        assert_eq!(state.current_song_id(), Some("2"));
        assert_eq!(handle.plays(), 1);
    }
}
