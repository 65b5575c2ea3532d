//! Album art subsystem.
//!
//! `cache` extracts embedded covers on demand and keeps the most recently
//! used ones in memory; `server` exposes them over a single HTTP route and
//! builds the URLs that end up in `Song::album_art_url`.

use std::path::Path;

mod cache;
mod lru;
mod server;

pub use cache::*;
pub use server::*;

/// Builds the public URL under which the cover of `path` can be fetched.
pub trait ArtUrls: Sync {
    fn url_for(&self, path: &Path) -> String;
}
