//! Provider lifecycle: wires the art server, the indexer and the catalog
//! together behind an explicit state machine.
//!
//! `Uninitialized -> Initializing -> Ready -> Closed`. Only `Ready` holds a
//! catalog and a running art server; every catalog operation in any other
//! phase fails with `Error::NotInitialized`. `Initializing` only exists while
//! `initialize` holds `&mut self`, so callers never observe it.

use std::net::SocketAddr;
use std::path::Path;
use std::sync::Arc;
use std::time::Instant;

use crate::art::{AlbumArtServer, ArtCache};
use crate::codec;
use crate::config::Settings;
use crate::error::{Error, Result};
use crate::library::{self, Catalog, Song};
use crate::progress::{CancelToken, ProgressSink};
use crate::suggest::Suggester;

/// Turns a song file into something playable. Supplied by the host.
pub trait PlaybackFactory: Send + Sync {
    type Playback;

    fn create_playback(&self, path: &Path) -> Result<Self::Playback>;
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Phase {
    Uninitialized,
    Ready,
    Closed,
}

enum State {
    Uninitialized,
    Initializing,
    Ready {
        catalog: Arc<Catalog>,
        server: AlbumArtServer,
    },
    Closed,
}

pub struct Provider<F: PlaybackFactory> {
    settings: Settings,
    playback: F,
    cache: Arc<ArtCache>,
    state: State,
}

impl<F: PlaybackFactory> Provider<F> {
    pub fn new(settings: Settings, playback: F) -> Self {
        let cache = Arc::new(ArtCache::new(settings.art.cache_capacity));
        Self {
            settings,
            playback,
            cache,
            state: State::Uninitialized,
        }
    }

    pub fn phase(&self) -> Phase {
        match self.state {
            State::Uninitialized | State::Initializing => Phase::Uninitialized,
            State::Ready { .. } => Phase::Ready,
            State::Closed => Phase::Closed,
        }
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Start the art server and scan the library folder.
    ///
    /// Re-initializing a ready provider stops the old server and replaces the
    /// catalog wholesale. On failure the provider is left uninitialized.
    pub fn initialize(&mut self, progress: &dyn ProgressSink, cancel: &CancelToken) -> Result<()> {
        match std::mem::replace(&mut self.state, State::Initializing) {
            State::Closed => {
                self.state = State::Closed;
                return Err(Error::InitializationFailed("provider is closed".to_string()));
            }
            State::Ready { mut server, .. } => server.close(),
            State::Uninitialized | State::Initializing => {}
        }

        progress.state("Initializing...");
        match self.start_up(progress, cancel) {
            Ok((catalog, server)) => {
                self.state = State::Ready {
                    catalog: Arc::new(catalog),
                    server,
                };
                Ok(())
            }
            Err(e) => {
                tracing::error!(error = %e, "initialization failed");
                self.state = State::Uninitialized;
                Err(e)
            }
        }
    }

    fn start_up(
        &self,
        progress: &dyn ProgressSink,
        cancel: &CancelToken,
    ) -> Result<(Catalog, AlbumArtServer)> {
        let folder = self.settings.library.folder.clone().ok_or_else(|| {
            Error::InitializationFailed("no library folder configured".to_string())
        })?;

        progress.state("Starting album art server");
        let server = AlbumArtServer::start(&self.settings.art, self.cache.clone())?;

        progress.state("Looking for songs...");
        let started = Instant::now();
        // On error `server` is dropped here, which closes it.
        let catalog = library::build(&folder, &self.settings.library, &server, progress, cancel)?;
        progress.state(&format!(
            "Done (found {} in {} seconds).",
            catalog.len(),
            started.elapsed().as_secs()
        ));

        Ok((catalog, server))
    }

    fn ready_catalog(&self) -> Result<&Arc<Catalog>> {
        match &self.state {
            State::Ready { catalog, .. } => Ok(catalog),
            _ => Err(Error::NotInitialized),
        }
    }

    /// The current catalog snapshot.
    pub fn catalog(&self) -> Result<Arc<Catalog>> {
        self.ready_catalog().cloned()
    }

    pub fn songs(&self) -> Result<Vec<Song>> {
        Ok(self.ready_catalog()?.songs().cloned().collect())
    }

    pub fn search(&self, query: &str) -> Result<Vec<Song>> {
        Ok(library::search(self.ready_catalog()?, query))
    }

    pub fn lookup(&self, id: &str) -> Result<Song> {
        self.ready_catalog()?
            .get(id)
            .cloned()
            .ok_or_else(|| Error::NoSuchSong(id.to_string()))
    }

    /// Check that the song's file is still there.
    pub fn load_song(&self, song: &Song) -> Result<()> {
        let path = codec::decode(&song.id).map_err(|_| Error::NoSuchSong(song.id.clone()))?;
        if !path.is_file() {
            return Err(Error::SongLoading(path));
        }
        Ok(())
    }

    pub fn supply_playback(&self, song: &Song) -> Result<F::Playback> {
        let path = codec::decode(&song.id).map_err(|_| Error::NoSuchSong(song.id.clone()))?;
        self.playback.create_playback(&path)
    }

    /// A fresh suggestion cursor over the current catalog.
    pub fn suggester(&self) -> Result<Suggester> {
        Ok(Suggester::with_limit(
            self.catalog()?,
            self.settings.suggest.max_suggestions,
        ))
    }

    pub fn art_server_addr(&self) -> Option<SocketAddr> {
        match &self.state {
            State::Ready { server, .. } => Some(server.local_addr()),
            _ => None,
        }
    }

    /// Stop the art server and drop the catalog. Safe to call in any phase,
    /// any number of times.
    pub fn close(&mut self) {
        if let State::Ready { mut server, .. } = std::mem::replace(&mut self.state, State::Closed) {
            server.close();
        }
    }
}
