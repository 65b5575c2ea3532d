use std::net::SocketAddr;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use axum::extract::{Query, State};
use axum::http::{StatusCode, header};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};
use serde::Deserialize;
use tokio::net::TcpListener;
use tokio::runtime::Runtime;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;

use super::ArtUrls;
use super::cache::{ArtCache, normalize};
use crate::config::ArtSettings;
use crate::error::{Error, Result};

pub const ART_ROUTE: &str = "/localAlbumArt";
pub const FILE_PARAM: &str = "file";

/// Characters left unescaped in the `file` query value. Keeping `/` readable
/// makes the URLs easier to eyeball in logs.
const QUERY_VALUE: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'/')
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~');

#[derive(Debug, Deserialize)]
struct ArtQuery {
    file: Option<String>,
}

async fn serve_art(State(cache): State<Arc<ArtCache>>, Query(query): Query<ArtQuery>) -> Response {
    let Some(file) = query.file else {
        return (StatusCode::BAD_REQUEST, "missing parameter: file").into_response();
    };

    // Tag parsing is blocking file I/O.
    let lookup = tokio::task::spawn_blocking(move || cache.get(Path::new(&file))).await;
    match lookup {
        Ok(Some(art)) => ([(header::CONTENT_TYPE, art.content_type)], art.data).into_response(),
        Ok(None) => (StatusCode::NOT_FOUND, "album art not found").into_response(),
        Err(e) => {
            tracing::error!(error = %e, "album art lookup panicked");
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}

/// The single-route router, exposed for embedding and tests.
pub fn router(cache: Arc<ArtCache>) -> Router {
    Router::new()
        .route(ART_ROUTE, get(serve_art))
        .with_state(cache)
}

/// Build the art URL for `path` on `host:port`.
pub fn art_url(host: &str, port: u16, path: &Path) -> String {
    let normalized = normalize(path);
    let value = utf8_percent_encode(&normalized.to_string_lossy(), QUERY_VALUE).to_string();
    let host = if host.contains(':') && !host.starts_with('[') {
        format!("[{host}]")
    } else {
        host.to_string()
    };
    format!("http://{host}:{port}{ART_ROUTE}?{FILE_PARAM}={value}")
}

/// HTTP server for embedded album art.
///
/// Owns its own tokio runtime so the rest of the crate can stay synchronous.
/// `close` (and `Drop`) must therefore not be called from inside an async
/// context.
///
/// Note: `file` may name any path on the machine; there is no confinement to
/// the library folder.
pub struct AlbumArtServer {
    host: String,
    addr: SocketAddr,
    grace: Duration,
    runtime: Option<Runtime>,
    shutdown: Option<oneshot::Sender<()>>,
    task: Option<JoinHandle<()>>,
}

impl AlbumArtServer {
    /// Bind and start serving. Returns once the listener accepts connections.
    pub fn start(settings: &ArtSettings, cache: Arc<ArtCache>) -> Result<Self> {
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(2)
            .thread_name("album-art")
            .enable_all()
            .build()
            .map_err(|e| Error::InitializationFailed(format!("cannot start art runtime: {e}")))?;

        let listener = runtime
            .block_on(TcpListener::bind((settings.host.as_str(), settings.port)))
            .map_err(|e| {
                Error::InitializationFailed(format!(
                    "cannot bind album art server to {}:{}: {e}",
                    settings.host, settings.port
                ))
            })?;
        let addr = listener.local_addr()?;

        let (tx, rx) = oneshot::channel::<()>();
        let app = router(cache);
        let task = runtime.spawn(async move {
            let shutdown = async {
                let _ = rx.await;
            };
            if let Err(e) = axum::serve(listener, app)
                .with_graceful_shutdown(shutdown)
                .await
            {
                tracing::error!(error = %e, "album art server stopped with an error");
            }
        });

        tracing::info!(%addr, "album art server listening");

        Ok(Self {
            host: settings.host.clone(),
            addr,
            grace: Duration::from_millis(settings.shutdown_grace_ms),
            runtime: Some(runtime),
            shutdown: Some(tx),
            task: Some(task),
        })
    }

    pub fn local_addr(&self) -> SocketAddr {
        self.addr
    }

    pub fn is_running(&self) -> bool {
        self.runtime.is_some()
    }

    /// Stop accepting connections, give in-flight requests up to the grace
    /// period, then tear everything down. Calling it again is a no-op.
    pub fn close(&mut self) {
        let Some(runtime) = self.runtime.take() else {
            return;
        };

        if let Some(tx) = self.shutdown.take() {
            let _ = tx.send(());
        }
        if let Some(mut task) = self.task.take() {
            let grace = self.grace;
            runtime.block_on(async move {
                if tokio::time::timeout(grace, &mut task).await.is_err() {
                    tracing::warn!("album art requests still running after grace period, aborting");
                    task.abort();
                }
            });
        }
        runtime.shutdown_timeout(self.grace);
        tracing::info!(addr = %self.addr, "album art server closed");
    }
}

impl ArtUrls for AlbumArtServer {
    fn url_for(&self, path: &Path) -> String {
        art_url(&self.host, self.addr.port(), path)
    }
}

impl Drop for AlbumArtServer {
    fn drop(&mut self) {
        self.close();
    }
}
