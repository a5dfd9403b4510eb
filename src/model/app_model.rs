//! Main application model with state management

use std::sync::Arc;
use std::time::Instant;
use tokio::sync::Mutex;

use super::images::ImageResolver;
use super::now_playing::NowPlaying;
use super::playback::PlaybackState;
use super::song::Song;
use super::song_list::SongListState;
use super::types::{ActiveSection, UiState};

const ERROR_DISPLAY_SECS: u64 = 5;

/// Main application model containing all view state
pub struct AppModel {
    images: ImageResolver,
    pub ui_state: Arc<Mutex<UiState>>,
    pub song_list: Arc<Mutex<SongListState>>,
    pub now_playing: Arc<Mutex<NowPlaying>>,
    pub should_quit: Arc<Mutex<bool>>,
}

impl AppModel {
    pub fn new(images: ImageResolver) -> Self {
        Self {
            images,
            ui_state: Arc::new(Mutex::new(UiState::default())),
            song_list: Arc::new(Mutex::new(SongListState::default())),
            now_playing: Arc::new(Mutex::new(NowPlaying::default())),
            should_quit: Arc::new(Mutex::new(false)),
        }
    }

    // ========================================================================
    // Playback mirror
    // ========================================================================

    pub async fn apply_playback_state(&self, state: &PlaybackState) {
        self.song_list.lock().await.set_current(state.current_song_id());

        let mut now_playing = self.now_playing.lock().await;
        let had_error = now_playing.has_error;
        now_playing.apply(state, &self.images);

        if now_playing.has_error && !had_error {
            let title = now_playing
                .song
                .as_ref()
                .map(|s| s.title.clone())
                .unwrap_or_default();
            drop(now_playing);
            self.set_error(format!("Could not play \"{}\" from any source", title)).await;
        }
    }

    pub async fn get_now_playing(&self) -> NowPlaying {
        self.now_playing.lock().await.clone()
    }

    // ========================================================================
    // Song list
    // ========================================================================

    pub async fn populate_song_list(&self, songs: Vec<Song>) {
        self.images.preload(&songs);
        self.song_list.lock().await.populate(songs);
    }

    pub async fn get_song_list(&self) -> SongListState {
        self.song_list.lock().await.clone()
    }

    pub async fn get_selected_song(&self) -> Option<Song> {
        self.song_list.lock().await.selected_song().cloned()
    }

    pub async fn append_to_search(&self, c: char) {
        self.song_list.lock().await.push_char(c);
    }

    pub async fn backspace_search(&self) {
        self.song_list.lock().await.pop_char();
    }

    pub async fn clear_search(&self) {
        self.song_list.lock().await.clear_search();
    }

    pub async fn set_viewport_width(&self, width_px: u32) {
        self.song_list.lock().await.set_viewport_width(width_px);
    }

    pub async fn move_selection_up(&self) {
        self.song_list.lock().await.move_up();
    }

    pub async fn move_selection_down(&self) {
        self.song_list.lock().await.move_down();
    }

    pub async fn move_selection_left(&self) {
        self.song_list.lock().await.move_left();
    }

    pub async fn move_selection_right(&self) {
        self.song_list.lock().await.move_right();
    }

    // ========================================================================
    // UI state
    // ========================================================================

    pub async fn should_quit(&self) -> bool {
        *self.should_quit.lock().await
    }

    pub async fn set_should_quit(&self, quit: bool) {
        *self.should_quit.lock().await = quit;
    }

    pub async fn get_ui_state(&self) -> UiState {
        self.ui_state.lock().await.clone()
    }

    pub async fn cycle_section(&self) {
        let mut state = self.ui_state.lock().await;
        state.active_section = state.active_section.next();
    }

    pub async fn set_active_section(&self, section: ActiveSection) {
        self.ui_state.lock().await.active_section = section;
    }

    pub async fn set_error(&self, message: String) {
        let mut state = self.ui_state.lock().await;
        state.error_message = Some(message);
        state.error_timestamp = Some(Instant::now());
    }

    pub async fn clear_error(&self) {
        let mut state = self.ui_state.lock().await;
        state.error_message = None;
        state.error_timestamp = None;
    }

    pub async fn has_error(&self) -> bool {
        self.ui_state.lock().await.error_message.is_some()
    }

    pub async fn auto_clear_old_errors(&self) {
        let mut state = self.ui_state.lock().await;
        if let Some(timestamp) = state.error_timestamp {
            if timestamp.elapsed().as_secs() > ERROR_DISPLAY_SECS {
                state.error_message = None;
                state.error_timestamp = None;
            }
        }
    }

    pub async fn set_volume(&self, volume: f32) {
        self.ui_state.lock().await.volume = volume;
    }

    pub async fn get_volume(&self) -> f32 {
        self.ui_state.lock().await.volume
    }

    pub async fn show_help_popup(&self) {
        self.ui_state.lock().await.show_help_popup = true;
    }

    pub async fn hide_help_popup(&self) {
        self.ui_state.lock().await.show_help_popup = false;
    }

    pub async fn is_help_popup_open(&self) -> bool {
        self.ui_state.lock().await.show_help_popup
    }
}
