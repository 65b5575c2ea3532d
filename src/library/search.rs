use super::model::{Catalog, Song};

fn matches(song: &Song, tokens: &[String]) -> bool {
    let title = song.title.to_lowercase();
    let artist = song.artist.to_lowercase();
    tokens
        .iter()
        .any(|t| title.contains(t.as_str()) || artist.contains(t.as_str()))
}

/// Songs whose title or artist contains any whitespace-separated word of
/// `query`, case-insensitively, in catalog iteration order.
///
/// A query without words matches nothing.
pub fn search(catalog: &Catalog, query: &str) -> Vec<Song> {
    let tokens: Vec<String> = query.split_whitespace().map(str::to_lowercase).collect();
    if tokens.is_empty() {
        return Vec::new();
    }

    catalog
        .songs()
        .filter(|song| matches(song, &tokens))
        .cloned()
        .collect()
}
