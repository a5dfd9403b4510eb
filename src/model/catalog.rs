//! The fixed song catalog
//!
//! Every lookup here is side-effect free. A miss is reported as `None`, never
//! as an error.

use rand::Rng;

use super::song::Song;

#[derive(Clone, Debug)]
pub struct Catalog {
    songs: Vec<Song>,
}

impl Catalog {
    pub fn new(songs: Vec<Song>) -> Self {
        tracing::debug!(songs = songs.len(), "Catalog initialized");
        Self { songs }
    }

    /// Full ordered copy of the catalog
    pub fn get_all_songs(&self) -> Vec<Song> {
        self.songs.clone()
    }

    pub fn songs(&self) -> &[Song] {
        &self.songs
    }

    pub fn get_song_by_id(&self, id: &str) -> Option<&Song> {
        self.songs.iter().find(|song| song.id == id)
    }

    pub fn index_of(&self, id: &str) -> Option<usize> {
        self.songs.iter().position(|song| song.id == id)
    }

    pub fn get(&self, index: usize) -> Option<&Song> {
        self.songs.get(index)
    }

    pub fn first(&self) -> Option<&Song> {
        self.songs.first()
    }

    pub fn len(&self) -> usize {
        self.songs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.songs.is_empty()
    }

    /// Case-insensitive substring search across title, artist, album and
    /// genre. A blank query returns the whole catalog.
    pub fn search_songs(&self, query: &str) -> Vec<Song> {
        filter_songs(&self.songs, query)
    }

    pub fn get_random_song(&self) -> Option<&Song> {
        if self.songs.is_empty() {
            return None;
        }
        let index = rand::thread_rng().gen_range(0..self.songs.len());
        self.songs.get(index)
    }

    /// Exact, case-insensitive genre match
    pub fn get_songs_by_genre(&self, genre: &str) -> Vec<Song> {
        let genre = genre.to_lowercase();
        self.songs
            .iter()
            .filter(|song| song.genre.to_lowercase() == genre)
            .cloned()
            .collect()
    }
}

fn filter_songs(songs: &[Song], query: &str) -> Vec<Song> {
    if query.trim().is_empty() {
        return songs.to_vec();
    }

    let needle = query.to_lowercase();
    songs
        .iter()
        .filter(|song| song.matches(&needle))
        .cloned()
        .collect()
}

impl Default for Catalog {
    fn default() -> Self {
        Self::new(vec![
            Song::new(
                "1",
                "Al Compás de la Mentira",
                "Tren Loco",
                "Al Compás de la Mentira",
                240,
                "al_compas_mentira.mp3",
                "assets/images/covers/Tren_Loco.webp",
                "Heavy Metal",
                Some(1994),
            ),
            Song::new(
                "2",
                "Caught Somewhere in Time",
                "Iron Maiden",
                "Somewhere in Time",
                441,
                "caught_somewhere.mp3",
                "assets/images/covers/Iron_Maiden.webp",
                "Heavy Metal",
                Some(1986),
            ),
            Song::new(
                "3",
                "Cuántas Palabras",
                "O'Connor",
                "Revolución",
                240,
                "cuantas_palabras.mp3",
                "assets/images/covers/oconnor.webp",
                "Hard Rock",
                Some(1994),
            ),
            Song::new(
                "4",
                "Down",
                "Stone Temple Pilots",
                "Core",
                205,
                "down_pilots.mp3",
                "assets/images/covers/Stone_Temple_Pilots.webp",
                "Grunge",
                Some(1992),
            ),
            Song::new(
                "5",
                "Judas Oficio",
                "Malón",
                "Espíritu Combativo",
                260,
                "judas_oficio.mp3",
                "assets/images/covers/Malon.webp",
                "Thrash Metal",
                Some(1995),
            ),
            Song::new(
                "6",
                "Let It Roll",
                "Velvet Revolver",
                "Contraband",
                160,
                "let_it_roll.mp3",
                "assets/images/covers/Velvet_Revolver.webp",
                "Hard Rock",
                Some(2004),
            ),
        ])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_song_is_found_by_its_id() {
        let catalog = Catalog::default();
        for song in catalog.songs() {
            assert_eq!(catalog.get_song_by_id(&song.id), Some(song));
        }
        assert!(catalog.get_song_by_id("missing").is_none());
    }

    #[test]
    fn blank_query_returns_full_catalog_in_order() {
        let catalog = Catalog::default();
        assert_eq!(catalog.search_songs(""), catalog.get_all_songs());
        assert_eq!(catalog.search_songs("   "), catalog.get_all_songs());
    }

    #[test]
    fn search_is_case_insensitive_across_fields() {
        let catalog = Catalog::default();

        let maiden = catalog.search_songs("maiden");
        assert_eq!(maiden.len(), 1);
        assert_eq!(maiden[0].artist, "Iron Maiden");

        // Album match
        let core: Vec<String> = catalog.search_songs("CORE").into_iter().map(|s| s.id).collect();
        assert_eq!(core, vec!["4"]);

        // Genre match keeps catalog order
        let rock: Vec<String> = catalog.search_songs("hard rock").into_iter().map(|s| s.id).collect();
        assert_eq!(rock, vec!["3", "6"]);

        assert!(catalog.search_songs("polka").is_empty());
    }

    #[test]
    fn search_matches_exactly_the_expected_subset() {
        let catalog = Catalog::default();
        for query in ["metal", "a", "Time", "ó", "zz"] {
            let needle = query.to_lowercase();
            let expected: Vec<Song> = catalog
                .songs()
                .iter()
                .filter(|s| {
                    s.title.to_lowercase().contains(&needle)
                        || s.artist.to_lowercase().contains(&needle)
                        || s.album.to_lowercase().contains(&needle)
                        || s.genre.to_lowercase().contains(&needle)
                })
                .cloned()
                .collect();
            assert_eq!(catalog.search_songs(query), expected, "query {query:?}");
        }
    }

    #[test]
    fn genre_filter_requires_whole_genre() {
        let catalog = Catalog::default();
        let heavy: Vec<String> = catalog
            .get_songs_by_genre("heavy metal")
            .into_iter()
            .map(|s| s.id)
            .collect();
        assert_eq!(heavy, vec!["1", "2"]);
        assert!(catalog.get_songs_by_genre("metal").is_empty());
    }

    #[test]
    fn random_song_comes_from_the_catalog() {
        let catalog = Catalog::default();
        for _ in 0..50 {
            let song = catalog.get_random_song().unwrap();
            assert!(catalog.get_song_by_id(&song.id).is_some());
        }
        assert!(Catalog::new(vec![]).get_random_song().is_none());
    }
}
