//! View module - UI rendering
//!
//! This module handles all UI rendering for the application using ratatui.
//! It is organized into submodules by component type:
//!
//! - `utils`: Shared formatting helpers
//! - `layout`: Search bar and now playing panel
//! - `content`: Song grid
//! - `progress`: Progress bar rendering
//! - `overlays`: Modal overlays (error, help)

mod utils;
mod layout;
mod content;
mod progress;
mod overlays;

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    Frame,
};

use crate::model::{NowPlaying, SongListState, UiState};

pub struct AppView;

impl AppView {
    /// Draw one frame. Returns the area of the progress bar for click-to-seek.
    pub fn render(
        frame: &mut Frame,
        now_playing: &NowPlaying,
        ui_state: &UiState,
        song_list: &SongListState,
    ) -> Rect {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Search bar
                Constraint::Min(0),    // Song grid + now playing
                Constraint::Length(3), // Progress bar with playback info
            ])
            .split(frame.area());

        layout::render_search_bar(frame, chunks[0], ui_state, song_list);

        let main_chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Percentage(72), // Song grid
                Constraint::Percentage(28), // Now playing
            ])
            .split(chunks[1]);

        content::render_song_grid(frame, main_chunks[0], ui_state, song_list);
        layout::render_now_playing(frame, main_chunks[1], now_playing);

        progress::render_progress_bar(frame, chunks[2], now_playing, ui_state);

        if ui_state.error_message.is_some() {
            overlays::render_error_notification(frame, ui_state);
        }

        if ui_state.show_help_popup {
            overlays::render_help_popup(frame);
        }

        chunks[2]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::{backend::TestBackend, Terminal};

    use crate::model::{Catalog, ImageResolver, PlaybackState, PlaybackStatus};

    fn screen_text(terminal: &Terminal<TestBackend>) -> String {
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    #[test]
    fn progress_bar_sits_at_the_bottom() {
        let mut terminal = Terminal::new(TestBackend::new(120, 30)).unwrap();
        let mut progress = Rect::default();
        terminal
            .draw(|f| {
                progress = AppView::render(f, &NowPlaying::default(), &UiState::default(), &SongListState::default());
            })
            .unwrap();

        assert_eq!(progress, Rect::new(0, 27, 120, 3));
        let text = screen_text(&terminal);
        assert!(text.contains("Loading songs..."));
        assert!(text.contains("No song loaded"));
    }

    #[test]
    fn renders_grid_and_current_song() {
        let catalog = Catalog::default();
        let mut song_list = SongListState::default();
        song_list.populate(catalog.get_all_songs());
        song_list.set_current(Some("2"));

        let mut now_playing = NowPlaying::default();
        now_playing.apply(
            &PlaybackState {
                current_song: catalog.get_song_by_id("2").cloned(),
                status: PlaybackStatus::Playing,
                elapsed: 65.0,
                shuffle: true,
            },
            &ImageResolver::new(),
        );

        let mut terminal = Terminal::new(TestBackend::new(160, 40)).unwrap();
        terminal
            .draw(|f| {
                AppView::render(f, &now_playing, &UiState::default(), &song_list);
            })
            .unwrap();

        let text = screen_text(&terminal);
        assert!(text.contains("Iron Maiden"));
        assert!(text.contains("Stone Temple Pilots"));
        assert!(text.contains("1:05 / 7:21"));
        assert!(text.contains("Shuffle: On"));
    }
}
