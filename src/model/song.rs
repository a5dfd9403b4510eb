//! Song metadata record

/// A single catalog entry. Songs are built once with the catalog and never
/// mutated afterwards.
#[derive(Clone, Debug, PartialEq)]
pub struct Song {
    pub id: String,
    pub title: String,
    pub artist: String,
    pub album: String,
    /// Length in seconds, always > 0 for catalog entries
    pub duration_secs: u32,
    /// File name under the audio asset directory
    pub file: String,
    /// Cover path relative to the working directory, or a URL
    pub cover: String,
    pub genre: String,
    pub year: Option<u16>,
}

impl Song {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        id: &str,
        title: &str,
        artist: &str,
        album: &str,
        duration_secs: u32,
        file: &str,
        cover: &str,
        genre: &str,
        year: Option<u16>,
    ) -> Self {
        Self {
            id: id.to_string(),
            title: title.to_string(),
            artist: artist.to_string(),
            album: album.to_string(),
            duration_secs,
            file: file.to_string(),
            cover: cover.to_string(),
            genre: genre.to_string(),
            year,
        }
    }

    pub fn duration(&self) -> f64 {
        self.duration_secs as f64
    }

    /// Case-insensitive substring match over title, artist, album and genre.
    /// `needle` must already be lower-cased.
    pub fn matches(&self, needle: &str) -> bool {
        self.title.to_lowercase().contains(needle)
            || self.artist.to_lowercase().contains(needle)
            || self.album.to_lowercase().contains(needle)
            || self.genre.to_lowercase().contains(needle)
    }
}
