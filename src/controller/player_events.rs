//! Playback state listener feeding the model

use tokio::task::JoinHandle;

use super::AppController;

impl AppController {
    /// Mirror every published playback state into the model until the app quits.
    pub fn start_player_event_listener(&self) -> JoinHandle<()> {
        let model = self.model.clone();
        let mut state_rx = self.playback.subscribe();
        tracing::info!("Starting playback state listener");

        tokio::spawn(async move {
            loop {
                let snapshot = state_rx.borrow_and_update().clone();
                {
                    let model_guard = model.lock().await;
                    if model_guard.should_quit().await {
                        tracing::debug!("Playback state listener shutting down");
                        break;
                    }
                    tracing::trace!(status = ?snapshot.status, elapsed = snapshot.elapsed, "Playback state changed");
                    model_guard.apply_playback_state(&snapshot).await;
                }

                if state_rx.changed().await.is_err() {
                    tracing::debug!("Playback controller dropped, listener exiting");
                    break;
                }
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use crate::controller::testing::controller;
    use crate::model::Catalog;
    use crate::playback::testing::settle;

    #[tokio::test(start_paused = true)]
    async fn model_follows_playback_state() {
        let (app, _handle) = controller(Catalog::default());
        let listener = app.start_player_event_listener();

        app.playback.play_song_by_id("2").await.unwrap();
        settle(&app.playback).await;
        tokio::time::sleep(Duration::from_millis(10)).await;

        let now_playing = app.model.lock().await.get_now_playing().await;
        assert_eq!(now_playing.song.map(|s| s.id), Some("2".to_string()));
        assert!(now_playing.is_playing);
        assert_eq!(now_playing.duration, 441.0);

        app.model.lock().await.set_should_quit(true).await;
        app.playback.toggle_play_pause().await;
        listener.await.unwrap();
    }
}
