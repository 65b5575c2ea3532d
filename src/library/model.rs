use std::collections::HashMap;
use std::collections::hash_map::Values;

/// One catalog entry. `id` is the path-codec encoding of the file's
/// absolute path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Song {
    pub id: String,
    pub title: String,
    /// Artist, or an empty string when the tag has none.
    pub artist: String,
    pub duration_secs: u64,
    pub album_art_url: Option<String>,
}

/// Immutable id -> song map produced by one scan.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    songs: HashMap<String, Song>,
}

impl Catalog {
    /// Index `songs` by id. On a collision the later song wins and a warning
    /// is logged.
    pub(crate) fn from_songs(songs: impl IntoIterator<Item = Song>) -> Self {
        let songs = songs.into_iter();
        let mut by_id = HashMap::with_capacity(songs.size_hint().0);
        for song in songs {
            if let Some(previous) = by_id.insert(song.id.clone(), song) {
                tracing::warn!(id = %previous.id, "duplicate song id, keeping the later entry");
            }
        }
        Self { songs: by_id }
    }

    pub fn len(&self) -> usize {
        self.songs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.songs.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&Song> {
        self.songs.get(id)
    }

    /// Songs in unspecified but stable order.
    pub fn songs(&self) -> Values<'_, String, Song> {
        self.songs.values()
    }
}

impl FromIterator<Song> for Catalog {
    /// Later songs replace earlier ones with the same id.
    fn from_iter<I: IntoIterator<Item = Song>>(iter: I) -> Self {
        Self::from_songs(iter)
    }
}
