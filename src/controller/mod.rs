//! Controller module - Application logic and event handling
//!
//! This module contains the application controller that handles user input,
//! coordinates between the model and view, and drives the playback controller.
//! It is organized into submodules by responsibility:
//!
//! - `input`: Key, mouse and resize event handling
//! - `playback`: Playback control methods
//! - `navigation`: Song list mounting, selection and viewport
//! - `player_events`: Playback state listener feeding the model

mod input;
mod playback;
mod navigation;
mod player_events;

use std::sync::Arc;
use ratatui::layout::Rect;
use tokio::sync::Mutex;

use crate::model::AppModel;
use crate::playback::PlaybackController;

#[derive(Clone)]
pub struct AppController {
    pub(crate) model: Arc<Mutex<AppModel>>,
    pub(crate) playback: PlaybackController,
    /// Where the progress bar was last drawn, for click-to-seek
    progress_area: Arc<Mutex<Option<Rect>>>,
    cell_width_px: u32,
}

impl AppController {
    pub fn new(model: Arc<Mutex<AppModel>>, playback: PlaybackController, cell_width_px: u32) -> Self {
        Self {
            model,
            playback,
            progress_area: Arc::new(Mutex::new(None)),
            cell_width_px,
        }
    }

    pub async fn set_progress_area(&self, area: Rect) {
        *self.progress_area.lock().await = Some(area);
    }

    pub(crate) async fn progress_area(&self) -> Option<Rect> {
        *self.progress_area.lock().await
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use super::*;
    use crate::model::{Catalog, ImageResolver};
    use crate::playback::testing::{harness_with, MockHandle, MockScript};
    use crate::playback::PlaybackConfig;

    pub fn controller(catalog: Catalog) -> (AppController, MockHandle) {
        controller_with(catalog, PlaybackConfig::default())
    }

    pub fn controller_with(catalog: Catalog, config: PlaybackConfig) -> (AppController, MockHandle) {
        let (playback, handle) = harness_with(catalog, MockScript::default(), config);
        let model = Arc::new(Mutex::new(AppModel::new(ImageResolver::new())));
        (AppController::new(model, playback, 8), handle)
    }
}
