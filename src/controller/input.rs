//! Key, mouse and resize event handling

use anyhow::Result;
use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};

use crate::model::ActiveSection;
use super::AppController;

impl AppController {
    pub async fn handle_event(&self, event: Event) -> Result<()> {
        match event {
            Event::Key(key) => self.handle_key_event(key).await,
            Event::Mouse(mouse) => self.handle_mouse_event(mouse).await,
            Event::Resize(columns, _rows) => {
                self.handle_resize(columns).await;
                Ok(())
            }
            _ => Ok(()),
        }
    }

    pub async fn handle_key_event(&self, key: KeyEvent) -> Result<()> {
        if key.kind != KeyEventKind::Press {
            return Ok(());
        }

        // Any key press counts as the user interacting with the player
        let started_playback = self.playback.note_user_gesture().await;

        let model = self.model.lock().await;

        // Handle error message first (blocks all other interactions)
        if model.has_error().await {
            return match key.code {
                KeyCode::Esc | KeyCode::Enter => {
                    model.clear_error().await;
                    Ok(())
                }
                _ => Ok(()),
            }
        }

        // Handle help popup
        if model.is_help_popup_open().await {
            return match key.code {
                KeyCode::Esc | KeyCode::Char('h') | KeyCode::Char('H') => {
                    model.hide_help_popup().await;
                    Ok(())
                }
                _ => Ok(()),
            }
        }

        if key.modifiers.contains(KeyModifiers::CONTROL) && matches!(key.code, KeyCode::Char('c') | KeyCode::Char('q')) {
            model.set_should_quit(true).await;
            return Ok(());
        }

        let ui_state = model.get_ui_state().await;

        // Search box takes every printable key while focused
        if ui_state.active_section == ActiveSection::Search {
            match key.code {
                KeyCode::Tab | KeyCode::BackTab | KeyCode::Enter | KeyCode::Down => {
                    model.set_active_section(ActiveSection::Songs).await;
                }
                KeyCode::Esc => {
                    model.clear_search().await;
                    model.set_active_section(ActiveSection::Songs).await;
                }
                KeyCode::Backspace => {
                    model.backspace_search().await;
                }
                KeyCode::Char(c) => {
                    model.append_to_search(c).await;
                }
                _ => {}
            }
            return Ok(());
        }

        match key.code {
            KeyCode::Char('q') | KeyCode::Char('Q') => {
                model.set_should_quit(true).await;
            }
            KeyCode::Tab | KeyCode::BackTab => {
                model.cycle_section().await;
            }
            // Focus search
            KeyCode::Char('/') | KeyCode::Char('g') | KeyCode::Char('G') => {
                model.set_active_section(ActiveSection::Search).await;
            }
            KeyCode::Esc => {
                model.clear_search().await;
            }
            KeyCode::Up => {
                model.move_selection_up().await;
            }
            KeyCode::Down => {
                model.move_selection_down().await;
            }
            KeyCode::Left => {
                model.move_selection_left().await;
            }
            KeyCode::Right => {
                model.move_selection_right().await;
            }
            KeyCode::Enter => {
                drop(model);
                self.play_selected_song().await;
            }
            // Play/Pause toggle, unless this press already started a parked song
            KeyCode::Char(' ') if !started_playback => {
                drop(model);
                self.toggle_playback().await;
            }
            // Next track
            KeyCode::Char('n') | KeyCode::Char('N') => {
                drop(model);
                self.next_track().await;
            }
            // Previous track
            KeyCode::Char('p') | KeyCode::Char('P') => {
                drop(model);
                self.previous_track().await;
            }
            // Toggle shuffle
            KeyCode::Char('s') | KeyCode::Char('S') => {
                drop(model);
                self.toggle_shuffle().await;
            }
            // Random song
            KeyCode::Char('r') | KeyCode::Char('R') => {
                drop(model);
                self.play_random_song().await;
            }
            // Volume up
            KeyCode::Char('+') | KeyCode::Char('=') => {
                drop(model);
                self.volume_up().await;
            }
            // Volume down
            KeyCode::Char('-') => {
                drop(model);
                self.volume_down().await;
            }
            // Show help popup
            KeyCode::Char('h') | KeyCode::Char('H') => {
                model.show_help_popup().await;
            }
            _ => {}
        }
        Ok(())
    }

    pub async fn handle_mouse_event(&self, mouse: MouseEvent) -> Result<()> {
        if let MouseEventKind::Down(MouseButton::Left) = mouse.kind {
            self.playback.note_user_gesture().await;
            self.seek_to_click(mouse.column, mouse.row).await;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

    use crate::controller::testing::{controller, controller_with};
    use crate::model::{ActiveSection, Catalog, PlaybackStatus};
    use crate::playback::testing::settle;
    use crate::playback::PlaybackConfig;

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[tokio::test(start_paused = true)]
    async fn space_with_nothing_loaded_plays_first_song() {
        let (app, handle) = controller(Catalog::default());
        app.handle_key_event(press(KeyCode::Char(' '))).await.unwrap();

        let state = settle(&app.playback).await;
        assert_eq!(state.current_song_id(), Some("1"));
        assert_eq!(state.status, PlaybackStatus::Playing);
        assert_eq!(handle.plays(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn first_space_starts_a_gated_song() {
        let gated = PlaybackConfig {
            gesture_gate: true,
            ..PlaybackConfig::default()
        };
        let (app, handle) = controller_with(Catalog::default(), gated);
        app.initialize_playback(None).await;
        assert_eq!(settle(&app.playback).await.status, PlaybackStatus::Paused);

        app.handle_key_event(press(KeyCode::Char(' '))).await.unwrap();
        assert_eq!(app.playback.snapshot().status, PlaybackStatus::Playing);
        assert_eq!(handle.plays(), 1);
        assert!(!handle.is_paused());

        // Later presses toggle as usual
        app.handle_key_event(press(KeyCode::Char(' '))).await.unwrap();
        assert_eq!(app.playback.snapshot().status, PlaybackStatus::Paused);
    }

    #[tokio::test(start_paused = true)]
    async fn typing_in_search_filters_the_list() {
        let (app, _handle) = controller(Catalog::default());
        app.mount_song_list().await;

        app.handle_key_event(press(KeyCode::Char('/'))).await.unwrap();
        for c in "metal".chars() {
            app.handle_key_event(press(KeyCode::Char(c))).await.unwrap();
        }
        let list = app.model.lock().await.get_song_list().await;
        assert_eq!(list.query, "metal");
        assert_eq!(list.filtered.len(), 3);

        // Letters go to the query, not to the transport
        assert!(app.playback.snapshot().current_song.is_none());

        app.handle_key_event(press(KeyCode::Esc)).await.unwrap();
        let model = app.model.lock().await;
        assert_eq!(model.get_song_list().await.filtered.len(), 6);
        assert_eq!(model.get_ui_state().await.active_section, ActiveSection::Songs);
    }

    #[tokio::test(start_paused = true)]
    async fn next_and_shuffle_keys_drive_playback() {
        let (app, _handle) = controller(Catalog::default());
        app.handle_key_event(press(KeyCode::Char('n'))).await.unwrap();
        assert_eq!(settle(&app.playback).await.current_song_id(), Some("1"));

        app.handle_key_event(press(KeyCode::Char('n'))).await.unwrap();
        assert_eq!(settle(&app.playback).await.current_song_id(), Some("2"));

        app.handle_key_event(press(KeyCode::Char('p'))).await.unwrap();
        app.handle_key_event(press(KeyCode::Char('p'))).await.unwrap();
        assert_eq!(settle(&app.playback).await.current_song_id(), Some("6"));

        app.handle_key_event(press(KeyCode::Char('s'))).await.unwrap();
        assert!(app.playback.snapshot().shuffle);
    }

    #[tokio::test]
    async fn error_popup_swallows_keys_until_dismissed() {
        let (app, _handle) = controller(Catalog::default());
        app.model.lock().await.set_error("boom".to_string()).await;

        app.handle_key_event(press(KeyCode::Char('q'))).await.unwrap();
        assert!(!app.model.lock().await.should_quit().await);

        app.handle_key_event(press(KeyCode::Esc)).await.unwrap();
        app.handle_key_event(press(KeyCode::Char('q'))).await.unwrap();
        assert!(app.model.lock().await.should_quit().await);
    }
}
