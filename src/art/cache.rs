use std::path::{Component, Path, PathBuf};

use parking_lot::Mutex;

use super::lru::LruMap;
use crate::tags::{self, AlbumArt};

/// Default number of cached covers.
pub const DEFAULT_CACHE_CAPACITY: usize = 256;

/// Where the cache gets album art from on a miss.
pub trait ArtSource: Send + Sync {
    fn load(&self, path: &Path) -> Option<AlbumArt>;
}

/// Reads the embedded ID3v2 cover of the file itself.
pub struct Id3ArtSource;

impl ArtSource for Id3ArtSource {
    fn load(&self, path: &Path) -> Option<AlbumArt> {
        tags::read_art(path)
    }
}

/// Make `path` absolute and resolve `.`/`..`.
///
/// Existing files are canonicalized as well, so symlinked spellings of one
/// file end up with the same cache key.
pub fn normalize(path: &Path) -> PathBuf {
    let absolute = std::path::absolute(path).unwrap_or_else(|_| path.to_path_buf());

    let mut lexical = PathBuf::new();
    for component in absolute.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                lexical.pop();
            }
            other => lexical.push(other.as_os_str()),
        }
    }

    std::fs::canonicalize(&lexical).unwrap_or(lexical)
}

/// Bounded cache of extracted album art, keyed by normalized path.
///
/// Only successful lookups are cached: a file that gains a cover later is
/// picked up on the next request.
pub struct ArtCache {
    entries: Mutex<LruMap<String, AlbumArt>>,
    source: Box<dyn ArtSource>,
}

impl ArtCache {
    pub fn new(capacity: usize) -> Self {
        Self::with_source(capacity, Id3ArtSource)
    }

    pub fn with_source(capacity: usize, source: impl ArtSource + 'static) -> Self {
        Self {
            entries: Mutex::new(LruMap::new(capacity)),
            source: Box::new(source),
        }
    }

    pub fn get(&self, path: &Path) -> Option<AlbumArt> {
        let key = normalize(path).to_string_lossy().into_owned();

        let cached = self.entries.lock().get(&key).cloned();
        if let Some(art) = cached {
            tracing::debug!(path = %key, "album art cache hit");
            return Some(art);
        }

        // Extraction happens without holding the lock; two racing misses may
        // both extract, and the later insert simply replaces the earlier one.
        let art = self.source.load(Path::new(&key))?;
        if let Some((evicted, _)) = self.entries.lock().insert(key.clone(), art.clone()) {
            tracing::debug!(path = %evicted, "evicted album art");
        }
        tracing::debug!(path = %key, bytes = art.data.len(), "cached album art");
        Some(art)
    }
}

#[cfg(test)]
impl ArtCache {
    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    pub fn capacity(&self) -> usize {
        self.entries.lock().capacity()
    }
}
