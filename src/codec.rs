//! Reversible path <-> catalog id encoding.
//!
//! An id is the standard-alphabet base64 of the path's UTF-8 bytes, so it
//! never contains `/`-separated components or whitespace and can be handed to
//! clients as an opaque key.

use std::path::{Path, PathBuf};

use base64::{Engine as _, engine::general_purpose};

use crate::error::{Error, Result};

/// Encode `path` into a catalog id.
///
/// Non-UTF-8 path components are replaced lossily; such paths cannot be
/// round-tripped and are not expected in a catalog.
pub fn encode(path: &Path) -> String {
    general_purpose::STANDARD.encode(path.to_string_lossy().as_bytes())
}

/// Decode a catalog id back into the path it was built from.
pub fn decode(id: &str) -> Result<PathBuf> {
    let bytes = general_purpose::STANDARD
        .decode(id.as_bytes())
        .map_err(|_| Error::MalformedIdentifier)?;
    let path = String::from_utf8(bytes).map_err(|_| Error::MalformedIdentifier)?;
    Ok(PathBuf::from(path))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trips_assorted_paths() {
        let paths = [
            "/music/Artist - Song.mp3",
            "/music/ünïcödé/日本語.mp3",
            "relative/dir/../file.MP3",
            "/with spaces/and+plus=equals?.mp3",
            "",
        ];
        for p in paths {
            let id = encode(Path::new(p));
            assert_eq!(decode(&id).unwrap(), PathBuf::from(p), "path {p:?}");
        }
    }

    #[test]
    fn encoded_ids_are_path_and_url_safe_enough() {
        let id = encode(Path::new("/a b/c?d&e#f.mp3"));
        assert!(
            id.chars()
                .all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '/' | '='))
        );
        assert!(!id.contains(' '));
        assert!(!id.contains('\n'));
    }

    #[test]
    fn distinct_paths_get_distinct_ids() {
        assert_ne!(
            encode(Path::new("/music/a.mp3")),
            encode(Path::new("/music/b.mp3"))
        );
    }

    #[test]
    fn malformed_ids_are_rejected() {
        assert!(matches!(decode("not base64!"), Err(Error::MalformedIdentifier)));
        assert!(matches!(decode("abc"), Err(Error::MalformedIdentifier)));
        // Valid base64 of invalid UTF-8 (0xff 0xfe).
        assert!(matches!(decode("//4="), Err(Error::MalformedIdentifier)));
    }
}
