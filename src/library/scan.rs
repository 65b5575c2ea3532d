use std::fs;
use std::path::{Path, PathBuf};

use rayon::prelude::*;
use walkdir::WalkDir;

use super::model::{Catalog, Song};
use crate::art::{ArtUrls, normalize};
use crate::codec;
use crate::config::LibrarySettings;
use crate::error::{Error, Result};
use crate::progress::{CancelToken, ProgressSink};
use crate::tags::{self, TagOutcome};

fn is_audio_file(path: &Path, extension: &str) -> bool {
    let wanted = extension.trim().trim_start_matches('.');
    path.extension()
        .and_then(|s| s.to_str())
        .map(|ext| ext.eq_ignore_ascii_case(wanted))
        .unwrap_or(false)
}

fn is_hidden(path: &Path) -> bool {
    path.file_name()
        .and_then(|s| s.to_str())
        .map(|name| name.starts_with('.'))
        .unwrap_or(false)
}

/// All files under `root` that look like audio files per `settings`.
fn candidates(root: &Path, settings: &LibrarySettings) -> Vec<PathBuf> {
    let mut walker = WalkDir::new(root)
        .follow_links(settings.follow_links)
        .min_depth(1);

    // Non-recursive = only the root directory.
    if !settings.recursive {
        walker = walker.max_depth(1);
    }

    walker
        .into_iter()
        .filter_entry(|e| settings.include_hidden || e.depth() == 0 || !is_hidden(e.path()))
        .filter_map(|e| match e {
            Ok(entry) => Some(entry),
            Err(err) => {
                tracing::warn!(error = %err, "skipping unreadable directory entry");
                None
            }
        })
        .filter(|e| e.file_type().is_file() && is_audio_file(e.path(), &settings.extension))
        .map(|e| e.into_path())
        .collect()
}

fn song_from_file(path: &Path, art_urls: &dyn ArtUrls) -> Option<Song> {
    match tags::read_tag(path) {
        TagOutcome::Tag(info) => Some(Song {
            id: codec::encode(path),
            title: info.title,
            artist: info.artist,
            duration_secs: info.duration_secs,
            album_art_url: info.cover.as_ref().map(|_| art_urls.url_for(path)),
        }),
        TagOutcome::NoTag => {
            tracing::debug!(path = %path.display(), "no ID3 tag, skipping");
            None
        }
        TagOutcome::Unreadable(reason) => {
            tracing::warn!(path = %path.display(), %reason, "cannot read tag, skipping");
            None
        }
    }
}

fn check_root(root: &Path) -> Result<()> {
    let meta = fs::metadata(root).map_err(|e| {
        Error::InitializationFailed(format!("cannot access folder {}: {e}", root.display()))
    })?;
    if !meta.is_dir() {
        return Err(Error::InitializationFailed(format!(
            "not a directory: {}",
            root.display()
        )));
    }
    fs::read_dir(root).map_err(|e| {
        Error::InitializationFailed(format!("cannot read folder {}: {e}", root.display()))
    })?;
    Ok(())
}

/// Scan `root` and build a catalog of every file with a usable ID3 tag.
///
/// Tags are read in parallel on a pool of `settings.workers` threads. Files
/// that cannot be read are logged and left out; only an unusable root folder
/// fails the scan. If `cancel` fires, remaining files are skipped and no
/// catalog is produced.
pub fn build(
    root: &Path,
    settings: &LibrarySettings,
    art_urls: &dyn ArtUrls,
    progress: &dyn ProgressSink,
    cancel: &CancelToken,
) -> Result<Catalog> {
    check_root(root)?;
    let root = normalize(root);

    let files = candidates(&root, settings);
    tracing::info!(root = %root.display(), files = files.len(), "scanning for tags");

    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(settings.workers)
        .thread_name(|i| format!("tag-reader-{i}"))
        .build()
        .map_err(|e| Error::InitializationFailed(format!("cannot start tag readers: {e}")))?;

    let songs: Vec<Song> = pool.install(|| {
        files
            .par_iter()
            .filter_map(|path| {
                if cancel.is_cancelled() {
                    return None;
                }
                progress.state(&format!("Loading tag for '{}'", path.display()));
                song_from_file(path, art_urls)
            })
            .collect()
    });

    if cancel.is_cancelled() {
        tracing::info!("scan cancelled, discarding {} songs", songs.len());
        return Err(Error::Cancelled);
    }

    Ok(Catalog::from_songs(songs))
}
