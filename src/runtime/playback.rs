use std::fs::File;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};
use crate::provider::PlaybackFactory;

/// An opened song file, ready to be handed to a decoder.
#[derive(Debug)]
pub struct FilePlayback {
    path: PathBuf,
    file: File,
}

impl FilePlayback {
    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn into_file(self) -> File {
        self.file
    }
}

/// Standalone playback factory: opens the file and nothing more. Decoding
/// is left to whoever consumes the `FilePlayback`.
pub struct FilePlaybackFactory;

impl PlaybackFactory for FilePlaybackFactory {
    type Playback = FilePlayback;

    fn create_playback(&self, path: &Path) -> Result<FilePlayback> {
        let file = File::open(path)
            .map_err(|e| Error::Playback(format!("cannot open {}: {e}", path.display())))?;
        Ok(FilePlayback {
            path: path.to_path_buf(),
            file,
        })
    }
}
