//! ID3 tag extraction on top of `lofty`.
//!
//! Every file ends up in one of three buckets: it has a usable ID3 tag, it
//! has none, or it could not be read at all. The last two are treated the
//! same by callers; the distinction only matters for logging.

use std::borrow::Cow;
use std::path::Path;

use bytes::Bytes;
use lofty::picture::{MimeType, PictureType};
use lofty::prelude::*;
use lofty::tag::{Tag, TagType};

/// Content type used when a picture does not declare one.
pub const DEFAULT_IMAGE_TYPE: &str = "image/*";

/// Embedded cover image bytes plus their MIME type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlbumArt {
    pub data: Bytes,
    pub content_type: String,
}

impl AlbumArt {
    pub fn new(data: impl Into<Bytes>, content_type: impl Into<String>) -> Self {
        Self {
            data: data.into(),
            content_type: content_type.into(),
        }
    }
}

/// Normalized metadata of one tagged file.
#[derive(Debug, Clone)]
pub struct TagInfo {
    pub title: String,
    pub artist: String,
    pub duration_secs: u64,
    pub cover: Option<AlbumArt>,
}

#[derive(Debug, Clone)]
pub enum TagOutcome {
    Tag(TagInfo),
    /// The file parsed, but carries neither an ID3v1 nor an ID3v2 tag.
    NoTag,
    /// I/O error or corrupt/unsupported file.
    Unreadable(String),
}

fn content_type(mime: Option<&MimeType>) -> String {
    mime.map(MimeType::as_str)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .unwrap_or(DEFAULT_IMAGE_TYPE)
        .to_string()
}

fn first_nonblank<'a>(values: impl IntoIterator<Item = Option<Cow<'a, str>>>) -> Option<String> {
    values
        .into_iter()
        .flatten()
        .map(|v| v.trim().to_string())
        .find(|v| !v.is_empty())
}

fn cover_art(tag: &Tag) -> Option<AlbumArt> {
    let pictures = tag.pictures();
    let picture = pictures
        .iter()
        .find(|p| p.pic_type() == PictureType::CoverFront)
        .or_else(|| pictures.first())?;

    Some(AlbumArt::new(
        picture.data().to_vec(),
        content_type(picture.mime_type()),
    ))
}

/// Read the ID3 metadata of `path`.
///
/// Text fields come from the ID3v2 tag when present, falling back per field
/// to ID3v1. Only ID3v2 can carry pictures.
pub fn read_tag(path: &Path) -> TagOutcome {
    let tagged = match lofty::read_from_path(path) {
        Ok(t) => t,
        Err(e) => return TagOutcome::Unreadable(e.to_string()),
    };

    let modern = tagged.tag(TagType::Id3v2);
    let legacy = tagged.tag(TagType::Id3v1);
    if modern.is_none() && legacy.is_none() {
        return TagOutcome::NoTag;
    }
    let tags: Vec<&Tag> = [modern, legacy].into_iter().flatten().collect();

    let title = first_nonblank(tags.iter().map(|&t| t.title())).unwrap_or_else(|| {
        path.file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default()
    });
    let artist = first_nonblank(tags.iter().map(|&t| t.artist())).unwrap_or_default();

    TagOutcome::Tag(TagInfo {
        title,
        artist,
        duration_secs: tagged.properties().duration().as_secs(),
        cover: modern.and_then(cover_art),
    })
}

/// Extract only the embedded cover image of `path`, if any.
pub fn read_art(path: &Path) -> Option<AlbumArt> {
    match read_tag(path) {
        TagOutcome::Tag(info) => info.cover,
        TagOutcome::NoTag => None,
        TagOutcome::Unreadable(reason) => {
            tracing::debug!(path = %path.display(), %reason, "cannot read album art");
            None
        }
    }
}
