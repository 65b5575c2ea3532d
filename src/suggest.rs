//! Shuffled, non-repeating song suggestions.
//!
//! The cursor keeps a queue of songs still to be suggested. When the queue
//! runs dry it is refilled with the whole catalog and shuffled, so every
//! song comes up once per cycle.

use std::sync::Arc;

use rand::seq::SliceRandom;

use crate::library::{Catalog, Song};

/// Most suggestions handed out by a single `next` call.
pub const MAX_SUGGESTIONS: usize = 20;

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum CursorState {
    /// Nothing pending; the next request refills from the catalog.
    Empty,
    /// Suggestions pending.
    Ready,
}

pub struct Suggester {
    catalog: Arc<Catalog>,
    pending: Vec<Song>,
    limit: usize,
}

impl Suggester {
    pub fn new(catalog: Arc<Catalog>) -> Self {
        Self::with_limit(catalog, MAX_SUGGESTIONS)
    }

    /// Like `new`, with a lower cap on suggestions per call. The cap is
    /// clamped to `1..=MAX_SUGGESTIONS`.
    pub fn with_limit(catalog: Arc<Catalog>, limit: usize) -> Self {
        Self {
            catalog,
            pending: Vec::new(),
            limit: limit.clamp(1, MAX_SUGGESTIONS),
        }
    }

    pub fn state(&self) -> CursorState {
        if self.pending.is_empty() {
            CursorState::Empty
        } else {
            CursorState::Ready
        }
    }

    /// Number of songs left before the next reshuffle.
    pub fn pending(&self) -> usize {
        self.pending.len()
    }

    fn refill_if_empty(&mut self) {
        if !self.pending.is_empty() {
            return;
        }
        self.pending.extend(self.catalog.songs().cloned());
        self.pending.shuffle(&mut rand::rng());
        tracing::debug!(songs = self.pending.len(), "reshuffled suggestions");
    }

    /// Peek at up to `count` upcoming suggestions (clamped to `1..=limit`).
    ///
    /// Nothing is removed; calling this again without `consumed` returns the
    /// same songs.
    pub fn next(&mut self, count: usize) -> Vec<Song> {
        self.refill_if_empty();
        let n = count.clamp(1, self.limit).min(self.pending.len());
        self.pending[..n].to_vec()
    }

    /// Take the front suggestion.
    pub fn pop(&mut self) -> Option<Song> {
        self.refill_if_empty();
        if self.pending.is_empty() {
            None
        } else {
            Some(self.pending.remove(0))
        }
    }

    /// Remove `song` from the pending queue, e.g. after it was played.
    pub fn consumed(&mut self, song: &Song) {
        if let Some(pos) = self.pending.iter().position(|s| s.id == song.id) {
            self.pending.remove(pos);
        }
    }

    /// Drop a suggestion the caller rejected.
    pub fn discard(&mut self, song: &Song) {
        self.consumed(song);
    }

    /// Switch to a new catalog snapshot, forgetting pending suggestions.
    pub fn set_catalog(&mut self, catalog: Arc<Catalog>) {
        self.catalog = catalog;
        self.pending.clear();
    }
}
