//! The shared, per-location history of route notes.
//!
//! Every chat call appends into the same [`NoteRegistry`]. Entries are
//! created on the first note at a location and only ever grow; nothing
//! is evicted for the lifetime of the registry.

use dashmap::DashMap;

use crate::types::note::{NoteKey, RouteNote};
use crate::types::point::Point;

/// Concurrent map from location to the notes left there, in insertion
/// order.
///
/// Keys are spread over `DashMap` shards, so calls at unrelated
/// locations rarely contend. Appending and taking the replay snapshot
/// happen under one shard write guard, so no reader sees a partial
/// append and concurrent appends to one key are never lost.
#[derive(Debug, Default)]
pub struct NoteRegistry {
    notes: DashMap<NoteKey, Vec<RouteNote>>,
}

impl NoteRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        NoteRegistry {
            notes: DashMap::new(),
        }
    }

    /// Appends `note` under its location and returns every note stored
    /// at that location, the new one last.
    ///
    /// The guard is released before returning; callers send the
    /// snapshot without holding any lock.
    pub fn append(&self, note: RouteNote) -> Vec<RouteNote> {
        let key = note.key();
        let mut entry = self.notes.entry(key).or_default();
        entry.push(note);
        trace!("{} notes at {:?}", entry.len(), key);
        entry.value().clone()
    }

    /// Every note stored at `point`, oldest first.
    pub fn notes_at(&self, point: &Point) -> Vec<RouteNote> {
        self.notes
            .get(&NoteKey::from(*point))
            .map(|notes| notes.value().clone())
            .unwrap_or_default()
    }

    /// Number of distinct locations with at least one note.
    pub fn key_count(&self) -> usize {
        self.notes.len()
    }

    /// Total number of notes across all locations.
    pub fn note_count(&self) -> usize {
        self.notes.iter().map(|entry| entry.value().len()).sum()
    }
}
