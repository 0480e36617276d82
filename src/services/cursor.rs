//! Per-channel pagination cursors.
//!
//! Channel pages are addressed relative to the previous fetch (`before=<id>`),
//! so the cursor for a key must be read and written by one fetch at a time.
//! Each key gets its own async mutex; holding the guard across the request
//! serializes fetches for that key while other keys proceed concurrently.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};

use tokio::sync::{Mutex as AsyncMutex, OwnedMutexGuard};

use crate::models::PaginationCursor;

/// Exclusive access to one key's cursor for the duration of a fetch.
pub type CursorGuard = OwnedMutexGuard<PaginationCursor>;

/// Process-wide cursor store keyed by channel (or channel + query).
#[derive(Debug, Default)]
pub struct CursorStore {
    cursors: Mutex<HashMap<String, Arc<AsyncMutex<PaginationCursor>>>>,
}

impl CursorStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn slot(&self, key: &str) -> Arc<AsyncMutex<PaginationCursor>> {
        let mut cursors = self.cursors.lock().unwrap_or_else(PoisonError::into_inner);
        Arc::clone(cursors.entry(key.to_string()).or_default())
    }

    /// Wait for exclusive access to the cursor of `key`.
    pub async fn lock(&self, key: &str) -> CursorGuard {
        self.slot(key).lock_owned().await
    }

    /// Copy of the current cursor, waiting for any in-flight fetch on the key.
    pub async fn get(&self, key: &str) -> PaginationCursor {
        *self.lock(key).await
    }

    /// Number of keys with a cursor slot.
    pub fn len(&self) -> usize {
        self.cursors
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Forget the cursor of `key`.
    pub async fn reset(&self, key: &str) {
        *self.lock(key).await = PaginationCursor::default();
    }
}

/// Cursor key for a channel request; searches get their own key.
pub fn cursor_key(channel: &str, query: Option<&str>) -> String {
    match query {
        Some(query) => format!("{channel}?q={query}"),
        None => channel.to_string(),
    }
}
