//! Core type definitions for the application

use std::time::Instant;

use crate::audio::DEFAULT_VOLUME;

/// Which part of the UI receives key presses
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ActiveSection {
    Search,
    Songs,
}

impl ActiveSection {
    pub fn next(self) -> Self {
        match self {
            ActiveSection::Search => ActiveSection::Songs,
            ActiveSection::Songs => ActiveSection::Search,
        }
    }
}

/// UI state for the application
#[derive(Clone)]
pub struct UiState {
    pub active_section: ActiveSection,
    pub error_message: Option<String>,
    pub error_timestamp: Option<Instant>,
    pub show_help_popup: bool,
    pub volume: f32,
}

impl Default for UiState {
    fn default() -> Self {
        Self {
            active_section: ActiveSection::Songs,
            error_message: None,
            error_timestamp: None,
            show_help_popup: false,
            volume: DEFAULT_VOLUME,
        }
    }
}
