//! Catalog of local MP3 files with an HTTP server for their embedded album
//! art.
//!
//! Startup flows one way: the art server starts, the indexer reads every
//! file's ID3 tag in parallel and attaches art URLs, and the finished
//! [`library::Catalog`] is published read-only for search and suggestions.

pub mod art;
pub mod codec;
pub mod config;
pub mod error;
pub mod library;
pub mod progress;
pub mod provider;
pub mod runtime;
pub mod suggest;
pub mod tags;

#[cfg(test)]
mod test_support;

pub use error::{Error, Result};
pub use library::{Catalog, Song};
pub use provider::{PlaybackFactory, Provider};
