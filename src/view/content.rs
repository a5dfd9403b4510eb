//! Song grid rendering

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use ratatui::widgets::Padding;

use crate::model::{ActiveSection, Song, SongListState, UiState};
use super::utils::{format_time, truncate_string};

const CARD_HEIGHT: u16 = 6;

/// First grid row to draw so the selected row stays visible
fn first_visible_row(selected_row: usize, visible_rows: usize) -> usize {
    if visible_rows == 0 {
        return selected_row;
    }
    (selected_row + 1).saturating_sub(visible_rows)
}

pub fn render_song_grid(frame: &mut Frame, area: Rect, ui_state: &UiState, song_list: &SongListState) {
    let is_focused = ui_state.active_section == ActiveSection::Songs;
    let border_style = if is_focused {
        Style::default().fg(Color::Green)
    } else {
        Style::default()
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .title(" Songs ")
        .border_style(border_style);

    if song_list.is_loading {
        let loading = Paragraph::new("Loading songs...")
            .style(Style::default().fg(Color::Yellow))
            .block(block);
        frame.render_widget(loading, area);
        return;
    }

    if song_list.filtered.is_empty() {
        let empty = Paragraph::new(format!("No songs match \"{}\"\n\nPress Esc to clear the search", song_list.query))
            .style(Style::default().fg(Color::DarkGray))
            .block(block.padding(Padding::horizontal(1)));
        frame.render_widget(empty, area);
        return;
    }

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let columns = song_list.columns.max(1);
    let visible_rows = usize::from(inner.height / CARD_HEIGHT).max(1);
    let first_row = first_visible_row(song_list.selected / columns, visible_rows);

    let row_areas = Layout::default()
        .direction(Direction::Vertical)
        .constraints(vec![Constraint::Length(CARD_HEIGHT); visible_rows])
        .split(inner);

    for (row_offset, row_area) in row_areas.iter().enumerate() {
        let row = first_row + row_offset;
        let start = row * columns;
        if start >= song_list.filtered.len() {
            break;
        }

        let cells = Layout::default()
            .direction(Direction::Horizontal)
            .constraints(vec![Constraint::Ratio(1, columns as u32); columns])
            .split(*row_area);

        for (col, cell) in cells.iter().enumerate() {
            let index = start + col;
            let Some(song) = song_list.filtered.get(index) else {
                break;
            };
            let selected = index == song_list.selected;
            render_song_card(frame, *cell, song, selected && is_focused, song_list.is_current(song));
        }
    }
}

fn render_song_card(frame: &mut Frame, area: Rect, song: &Song, selected: bool, is_current: bool) {
    let width = usize::from(area.width.saturating_sub(4));

    let border_style = if selected {
        Style::default().fg(Color::Green).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::DarkGray)
    };
    let title_style = if is_current {
        Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::White).add_modifier(Modifier::BOLD)
    };
    let marker = if is_current { "♪ " } else { "" };

    let album_line = match song.year {
        Some(year) => format!("{} · {}", song.album, year),
        None => song.album.clone(),
    };

    let lines = vec![
        Line::from(Span::styled(
            truncate_string(&format!("{}{}", marker, song.title), width),
            title_style,
        )),
        Line::from(truncate_string(&song.artist, width)),
        Line::from(Span::styled(truncate_string(&album_line, width), Style::default().fg(Color::DarkGray))),
        Line::from(Span::styled(
            truncate_string(&format!("{}  {}", song.genre, format_time(song.duration())), width),
            Style::default().fg(Color::DarkGray),
        )),
    ];

    let card = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(border_style)
            .padding(Padding::horizontal(1)),
    );
    frame.render_widget(card, area);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn selected_row_stays_in_view() {
        assert_eq!(first_visible_row(0, 3), 0);
        assert_eq!(first_visible_row(2, 3), 0);
        assert_eq!(first_visible_row(3, 3), 1);
        assert_eq!(first_visible_row(5, 1), 5);
        assert_eq!(first_visible_row(4, 0), 4);
    }
}
