//! Song list state: search filtering, grid layout and selection

use super::catalog::Catalog;
use super::song::Song;

/// Queries starting with this match a whole genre instead of a substring
pub const GENRE_PREFIX: &str = "genre:";

/// Column count for a viewport width in pixels
pub fn columns_for_width(width_px: u32) -> usize {
    match width_px {
        0..640 => 1,
        640..1024 => 2,
        1024..1440 => 3,
        _ => 4,
    }
}

#[derive(Clone, Debug)]
pub struct SongListState {
    catalog: Catalog,
    pub filtered: Vec<Song>,
    pub query: String,
    pub columns: usize,
    pub selected: usize,
    /// True until the initial mount delay has passed
    pub is_loading: bool,
    pub current_song_id: Option<String>,
}

impl Default for SongListState {
    fn default() -> Self {
        Self {
            catalog: Catalog::new(Vec::new()),
            filtered: Vec::new(),
            query: String::new(),
            columns: 4,
            selected: 0,
            is_loading: true,
            current_song_id: None,
        }
    }
}

impl SongListState {
    pub fn populate(&mut self, songs: Vec<Song>) {
        self.catalog = Catalog::new(songs);
        self.is_loading = false;
        self.refilter();
    }

    pub fn search(&mut self, query: &str) {
        self.query = query.to_string();
        self.refilter();
    }

    pub fn push_char(&mut self, c: char) {
        self.query.push(c);
        self.refilter();
    }

    pub fn pop_char(&mut self) {
        self.query.pop();
        self.refilter();
    }

    pub fn clear_search(&mut self) {
        self.search("");
    }

    fn refilter(&mut self) {
        let query = self.query.trim_start();
        self.filtered = match query
            .get(..GENRE_PREFIX.len())
            .filter(|prefix| prefix.eq_ignore_ascii_case(GENRE_PREFIX))
        {
            Some(_) => {
                let genre = query[GENRE_PREFIX.len()..].trim();
                if genre.is_empty() {
                    self.catalog.get_all_songs()
                } else {
                    self.catalog.get_songs_by_genre(genre)
                }
            }
            None => self.catalog.search_songs(&self.query),
        };
        self.selected = self.selected.min(self.filtered.len().saturating_sub(1));
    }

    pub fn set_viewport_width(&mut self, width_px: u32) {
        let columns = columns_for_width(width_px);
        if columns != self.columns {
            tracing::debug!(width_px, columns, "Song grid columns changed");
            self.columns = columns;
        }
    }

    pub fn songs_len(&self) -> usize {
        self.catalog.len()
    }

    pub fn set_current(&mut self, id: Option<&str>) {
        self.current_song_id = id.map(str::to_string);
    }

    /// Whether `song` is the one loaded in the player
    pub fn is_current(&self, song: &Song) -> bool {
        self.current_song_id.as_deref() == Some(song.id.as_str())
    }

    pub fn selected_song(&self) -> Option<&Song> {
        self.filtered.get(self.selected)
    }

    pub fn move_left(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    pub fn move_right(&mut self) {
        if self.selected + 1 < self.filtered.len() {
            self.selected += 1;
        }
    }

    pub fn move_up(&mut self) {
        self.selected = self.selected.saturating_sub(self.columns);
    }

    pub fn move_down(&mut self) {
        if self.selected + self.columns < self.filtered.len() {
            self.selected += self.columns;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Catalog;

    fn loaded() -> SongListState {
        let mut list = SongListState::default();
        list.populate(Catalog::default().get_all_songs());
        list
    }

    #[test]
    fn breakpoints_match_viewport_width() {
        assert_eq!(columns_for_width(0), 1);
        assert_eq!(columns_for_width(639), 1);
        assert_eq!(columns_for_width(640), 2);
        assert_eq!(columns_for_width(1023), 2);
        assert_eq!(columns_for_width(1024), 3);
        assert_eq!(columns_for_width(1439), 3);
        assert_eq!(columns_for_width(1440), 4);
        assert_eq!(columns_for_width(3840), 4);
    }

    #[test]
    fn starts_loading_and_empty() {
        let list = SongListState::default();
        assert!(list.is_loading);
        assert!(list.filtered.is_empty());
        assert!(list.selected_song().is_none());
    }

    #[test]
    fn search_uses_catalog_semantics() {
        let catalog = Catalog::default();
        let mut list = loaded();

        for query in ["maiden", "HARD", "metal", "  ", "xyz"] {
            list.search(query);
            assert_eq!(list.filtered, catalog.search_songs(query), "query {query:?}");
        }

        list.clear_search();
        assert_eq!(list.query, "");
        assert_eq!(list.filtered.len(), catalog.len());
    }

    #[test]
    fn genre_prefix_matches_whole_genre() {
        let catalog = Catalog::default();
        let mut list = loaded();

        list.search("genre: Heavy Metal");
        assert_eq!(list.filtered, catalog.get_songs_by_genre("heavy metal"));
        assert!(!list.filtered.is_empty());

        // Substring search would match every metal genre
        list.search("GENRE:metal");
        assert!(list.filtered.is_empty());

        list.search("genre:");
        assert_eq!(list.filtered.len(), catalog.len());
    }

    #[test]
    fn typing_refilters_and_keeps_selection_in_range() {
        let mut list = loaded();
        list.selected = 5;

        for c in "grunge".chars() {
            list.push_char(c);
        }
        assert_eq!(list.filtered.len(), 1);
        assert_eq!(list.selected, 0);
        assert_eq!(list.selected_song().map(|s| s.id.as_str()), Some("4"));

        for _ in 0.."grunge".len() {
            list.pop_char();
        }
        assert_eq!(list.filtered.len(), 6);
    }

    #[test]
    fn highlights_the_current_song() {
        let mut list = loaded();
        list.set_current(Some("3"));
        let current: Vec<&str> = list.filtered.iter().filter(|s| list.is_current(s)).map(|s| s.id.as_str()).collect();
        assert_eq!(current, vec!["3"]);

        list.set_current(None);
        assert!(!list.filtered.iter().any(|s| list.is_current(s)));
    }

    #[test]
    fn grid_navigation_moves_by_rows() {
        let mut list = loaded();
        list.set_viewport_width(1100);
        assert_eq!(list.columns, 3);

        list.move_down();
        assert_eq!(list.selected, 3);
        list.move_down();
        assert_eq!(list.selected, 3, "no row below");
        list.move_right();
        list.move_right();
        assert_eq!(list.selected, 5);
        list.move_right();
        assert_eq!(list.selected, 5);
        list.move_up();
        assert_eq!(list.selected, 2);
        list.move_up();
        assert_eq!(list.selected, 0);
        list.move_left();
        assert_eq!(list.selected, 0);
    }
}
