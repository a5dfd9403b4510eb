//! Progress bar rendering

use ratatui::{
    layout::Rect,
    style::{Color, Style},
    text::Line,
    widgets::{Block, Borders, Gauge},
    Frame,
};

use crate::model::{NowPlaying, UiState};
use super::utils::format_time;

fn status_text(now_playing: &NowPlaying) -> String {
    let Some(song) = &now_playing.song else {
        return " No song loaded".to_string();
    };

    let icon = if now_playing.has_error {
        "⚠ Unavailable:"
    } else if now_playing.is_loading {
        "… Loading"
    } else if now_playing.is_playing {
        "▶"
    } else {
        "⏸ "
    };
    format!(" {} {} | {} ({})", icon, song.title, song.artist, song.album)
}

pub fn render_progress_bar(frame: &mut Frame, area: Rect, now_playing: &NowPlaying, ui_state: &UiState) {
    let shuffle_text = if now_playing.is_shuffle { "Shuffle: On" } else { "Shuffle: Off" };
    let volume_text = format!("Vol: {}%", (ui_state.volume * 100.0).round() as u32);

    let time_str = format!(
        "{} / {}",
        format_time(now_playing.current_time),
        format_time(now_playing.duration)
    );

    let progress_ratio = (now_playing.progress_percentage / 100.0).clamp(0.0, 1.0);
    let gauge_color = if now_playing.has_error { Color::Red } else { Color::Green };

    let title = format!("{} ", status_text(now_playing));
    let controls_info = format!(" {} | {} ", shuffle_text, volume_text);

    let gauge = Gauge::default()
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(title)
                .title_bottom(Line::from(controls_info).right_aligned()),
        )
        .gauge_style(Style::default().fg(gauge_color))
        .ratio(progress_ratio)
        .label(time_str);

    frame.render_widget(gauge, area);
}
