//! Layout rendering (search bar, now playing panel)

use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};
use ratatui::widgets::Padding;

use crate::model::{ActiveSection, NowPlaying, SongListState, UiState};
use super::utils::format_time;

pub fn render_search_bar(frame: &mut Frame, area: Rect, ui_state: &UiState, song_list: &SongListState) {
    let focused = ui_state.active_section == ActiveSection::Search;
    let search_style = if focused {
        Style::default().fg(Color::Green)
    } else {
        Style::default().fg(Color::White)
    };

    let search_text = if song_list.query.is_empty() {
        "Press / to search, or type genre:<name> to filter by genre"
    } else {
        &song_list.query
    };

    let title = format!(" Search ({} of {}) ", song_list.filtered.len(), song_list.songs_len());
    let search = Paragraph::new(search_text)
        .style(search_style)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(title)
                .padding(Padding::horizontal(1))
                .border_style(if focused {
                    Style::default().fg(Color::Green)
                } else {
                    Style::default()
                }),
        );
    frame.render_widget(search, area);
}

pub fn render_now_playing(frame: &mut Frame, area: Rect, now_playing: &NowPlaying) {
    let block = Block::default()
        .borders(Borders::ALL)
        .title(" Now Playing ")
        .padding(Padding::horizontal(1));

    let Some(song) = &now_playing.song else {
        let empty = Paragraph::new("Nothing loaded yet\n\nPress Space to start")
            .style(Style::default().fg(Color::DarkGray))
            .block(block);
        frame.render_widget(empty, area);
        return;
    };

    let label = Style::default().fg(Color::DarkGray);
    let mut lines = vec![
        Line::from(Span::styled(
            song.title.clone(),
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        )),
        Line::from(song.artist.clone()),
        Line::from(""),
        Line::from(vec![Span::styled("Album  ", label), Span::raw(song.album.clone())]),
        Line::from(vec![Span::styled("Genre  ", label), Span::raw(song.genre.clone())]),
    ];
    if let Some(year) = song.year {
        lines.push(Line::from(vec![Span::styled("Year   ", label), Span::raw(year.to_string())]));
    }
    lines.push(Line::from(vec![
        Span::styled("Length ", label),
        Span::raw(format_time(now_playing.duration)),
    ]));

    if let Some(cover) = &now_playing.cover {
        lines.push(Line::from(""));
        let cover_label = if cover.is_placeholder { "Cover (placeholder)" } else { "Cover" };
        lines.push(Line::from(Span::styled(cover_label, label)));
        lines.push(Line::from(Span::styled(cover.url.clone(), Style::default().fg(Color::Blue))));
    }

    let panel = Paragraph::new(lines).wrap(Wrap { trim: true }).block(block);
    frame.render_widget(panel, area);
}
