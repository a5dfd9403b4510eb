//! Cover art resolution with placeholder substitution

use std::collections::HashMap;
use std::path::Path;

use super::song::Song;

const DEFAULT_PLACEHOLDER: &str =
    "https://images.unsplash.com/photo-1493225457124-a3eb161ffa5f?w=300&h=300&fit=crop&auto=format";

const ARTIST_PLACEHOLDERS: [(&str, &str); 6] = [
    (
        "Tren Loco",
        "https://images.unsplash.com/photo-1511379938547-c1f69419868d?w=300&h=300&fit=crop&auto=format",
    ),
    (
        "Iron Maiden",
        "https://images.unsplash.com/photo-1498038432885-c6f3f1b912ee?w=300&h=300&fit=crop&auto=format",
    ),
    (
        "O'Connor",
        "https://images.unsplash.com/photo-1511671782779-c97d3d27a1d4?w=300&h=300&fit=crop&auto=format",
    ),
    (
        "Stone Temple Pilots",
        "https://images.unsplash.com/photo-1487180144351-b8472da7d491?w=300&h=300&fit=crop&auto=format",
    ),
    (
        "Malón",
        "https://images.unsplash.com/photo-1519281682544-5f37c4b14c47?w=300&h=300&fit=crop&auto=format",
    ),
    (
        "Velvet Revolver",
        "https://images.unsplash.com/photo-1511735111819-9a3f7709049c?w=300&h=300&fit=crop&auto=format",
    ),
];

/// Display state of one cover image element
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CoverImage {
    pub url: String,
    /// Set once a placeholder has been substituted; further failures are ignored
    pub is_placeholder: bool,
}

#[derive(Clone, Debug)]
pub struct ImageResolver {
    artist_placeholders: HashMap<String, String>,
    default_placeholder: String,
}

impl ImageResolver {
    pub fn new() -> Self {
        Self {
            artist_placeholders: ARTIST_PLACEHOLDERS
                .iter()
                .map(|(artist, url)| (artist.to_string(), url.to_string()))
                .collect(),
            default_placeholder: DEFAULT_PLACEHOLDER.to_string(),
        }
    }

    pub fn resolve_cover_url(&self, song: &Song) -> CoverImage {
        CoverImage {
            url: song.cover.clone(),
            is_placeholder: false,
        }
    }

    /// Swap a failed cover for the artist placeholder, or the default one.
    ///
    /// Returns `false` when the element already shows a placeholder.
    pub fn handle_load_failure(&self, cover: &mut CoverImage, song: &Song) -> bool {
        if cover.is_placeholder {
            return false;
        }

        tracing::debug!(artist = %song.artist, cover = %cover.url, "Cover not found, using placeholder");
        cover.url = self
            .artist_placeholders
            .get(&song.artist)
            .unwrap_or(&self.default_placeholder)
            .clone();
        cover.is_placeholder = true;
        true
    }

    /// Remote covers are assumed reachable; local ones must exist on disk.
    pub fn cover_available(&self, cover: &CoverImage) -> bool {
        is_remote(&cover.url) || Path::new(&cover.url).is_file()
    }

    /// Resolve a cover and fall back to a placeholder if it cannot be shown.
    pub fn load_cover(&self, song: &Song) -> CoverImage {
        let mut cover = self.resolve_cover_url(song);
        if !self.cover_available(&cover) {
            self.handle_load_failure(&mut cover, song);
        }
        cover
    }

    /// Probe the first covers in list order so missing assets show up early in the log.
    pub fn preload(&self, songs: &[Song]) {
        for song in songs.iter().take(8) {
            let cover = self.resolve_cover_url(song);
            if self.cover_available(&cover) {
                tracing::debug!(cover = %cover.url, "Cover available");
            } else {
                tracing::warn!(cover = %cover.url, "Cover missing");
            }
        }
    }
}

impl Default for ImageResolver {
    fn default() -> Self {
        Self::new()
    }
}

fn is_remote(url: &str) -> bool {
    url.starts_with("http://") || url.starts_with("https://")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn song_by(artist: &str, cover: &str) -> Song {
        Song::new("x", "Title", artist, "Album", 100, "x.mp3", cover, "Rock", None)
    }

    #[test]
    fn cover_url_is_passed_through() {
        let resolver = ImageResolver::new();
        let song = song_by("Iron Maiden", "assets/images/covers/Iron_Maiden.webp");
        let cover = resolver.resolve_cover_url(&song);
        assert_eq!(cover.url, "assets/images/covers/Iron_Maiden.webp");
        assert!(!cover.is_placeholder);
    }

    #[test]
    fn failure_uses_artist_placeholder_once() {
        let resolver = ImageResolver::new();
        let song = song_by("Iron Maiden", "missing.webp");
        let mut cover = resolver.resolve_cover_url(&song);

        assert!(resolver.handle_load_failure(&mut cover, &song));
        assert!(cover.url.contains("photo-1498038432885"));
        assert!(cover.is_placeholder);

        let before = cover.clone();
        assert!(!resolver.handle_load_failure(&mut cover, &song));
        assert_eq!(cover, before);
    }

    #[test]
    fn unknown_artist_gets_default_placeholder() {
        let resolver = ImageResolver::new();
        let song = song_by("Nobody", "missing.webp");
        let mut cover = resolver.resolve_cover_url(&song);
        resolver.handle_load_failure(&mut cover, &song);
        assert_eq!(cover.url, DEFAULT_PLACEHOLDER);
    }

    #[test]
    fn load_cover_keeps_existing_local_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cover.webp");
        std::fs::write(&path, b"img").unwrap();

        let resolver = ImageResolver::new();
        let song = song_by("Malón", path.to_str().unwrap());
        assert_eq!(resolver.load_cover(&song).url, path.to_str().unwrap());

        let missing = song_by("Malón", dir.path().join("nope.webp").to_str().unwrap());
        let cover = resolver.load_cover(&missing);
        assert!(cover.is_placeholder);
        assert!(cover.url.contains("photo-1519281682544"));
    }
}
