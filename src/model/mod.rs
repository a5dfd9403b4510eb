//! Model module - Application state and data types
//!
//! - `song`: the song record
//! - `catalog`: the fixed catalog and its lookups
//! - `images`: cover resolution with placeholder fallback
//! - `playback`: the state published by the playback controller
//! - `song_list`: search/filter and grid state of the song list
//! - `now_playing`: root view mirror of the playback state
//! - `types`: UI state (focus, notifications, popups)
//! - `app_model`: main application model with state management methods

mod song;
mod catalog;
mod images;
mod playback;
mod song_list;
mod now_playing;
mod types;
mod app_model;

pub use song::Song;
pub use catalog::Catalog;
pub use images::ImageResolver;
pub use playback::{PlaybackState, PlaybackStatus};
pub use song_list::SongListState;
pub use now_playing::NowPlaying;
pub use types::{ActiveSection, UiState};
pub use app_model::AppModel;
