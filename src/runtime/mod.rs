use std::env;
use std::path::PathBuf;
use std::sync::mpsc;
use std::thread;

use tracing_subscriber::EnvFilter;

use crate::error::Error;
use crate::progress::{CancelToken, LogProgress};
use crate::provider::Provider;

mod playback;
mod settings;

pub use playback::{FilePlayback, FilePlaybackFactory};

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}

/// Spawn a thread that waits for Ctrl-C, cancels `cancel` and notifies the
/// returned receiver.
fn watch_ctrl_c(cancel: CancelToken) -> std::io::Result<mpsc::Receiver<()>> {
    let signals = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;
    let (tx, rx) = mpsc::channel();
    thread::Builder::new()
        .name("ctrl-c".to_string())
        .spawn(move || {
            if signals.block_on(tokio::signal::ctrl_c()).is_ok() {
                cancel.cancel();
                let _ = tx.send(());
            }
        })?;
    Ok(rx)
}

pub fn run() -> Result<(), Box<dyn std::error::Error>> {
    init_logging();
    let mut settings = settings::load_settings();

    if let Some(dir) = env::args_os().nth(1) {
        settings.library.folder = Some(PathBuf::from(dir));
    }
    if settings.library.folder.is_none() {
        settings.library.folder = env::current_dir().ok();
    }

    let cancel = CancelToken::new();
    let stop = watch_ctrl_c(cancel.clone())?;

    let mut provider = Provider::new(settings, FilePlaybackFactory);
    match provider.initialize(&LogProgress, &cancel) {
        Ok(()) => {}
        Err(Error::Cancelled) => {
            tracing::info!("startup cancelled");
            provider.close();
            return Ok(());
        }
        Err(e) => return Err(e.into()),
    }

    let catalog = provider.catalog()?;
    tracing::info!(
        songs = catalog.len(),
        art = ?provider.art_server_addr(),
        "catalog ready, press Ctrl-C to stop"
    );
    if let Some(song) = provider.suggester()?.pop() {
        match provider.supply_playback(&song) {
            Ok(playback) => tracing::info!(
                title = %song.title,
                artist = %song.artist,
                path = %playback.path().display(),
                "first suggestion"
            ),
            Err(e) => tracing::warn!(error = %e, "first suggestion is not playable"),
        }
    }

    let _ = stop.recv();
    provider.close();
    Ok(())
}
