//! In-memory LRU caching of derived per-game metric rows.
//!
//! Derived metrics are pure functions of a game's event log, and a
//! finished game's event log never changes again. That makes finished
//! games safe to cache: the team-statistics query reuses previously
//! computed per-player rows instead of rebuilding intervals and
//! plus-minus for every game on every request. Live games are never
//! cached, and imports or deletions clear the cache wholesale.

use crate::cli::types::GameId;
use crate::engine::boxscore::StatLine;
use lru::LruCache;
use std::num::NonZeroUsize;
use std::sync::{LazyLock, Mutex};

/// Memory-only LRU cache keyed by game.
pub struct MetricsCache {
    game_lines: Mutex<LruCache<GameId, Vec<StatLine>>>,
    capacity: usize,
}

impl MetricsCache {
    /// Create a cache holding up to `capacity` games' rows.
    pub fn new(capacity: usize) -> Self {
        Self {
            game_lines: Mutex::new(LruCache::new(NonZeroUsize::new(capacity).unwrap())),
            capacity,
        }
    }

    /// Cached per-player rows of a finished game, if present.
    pub fn get(&self, game_id: GameId) -> Option<Vec<StatLine>> {
        self.game_lines.lock().unwrap().get(&game_id).cloned()
    }

    /// Store a finished game's rows.
    pub fn put(&self, game_id: GameId, lines: Vec<StatLine>) {
        self.game_lines.lock().unwrap().put(game_id, lines);
    }

    /// Drop everything; called after imports and deletions.
    pub fn clear(&self) {
        self.game_lines.lock().unwrap().clear();
    }

    /// (used, capacity) for diagnostics.
    pub fn stats(&self) -> (usize, usize) {
        (self.game_lines.lock().unwrap().len(), self.capacity)
    }
}

/// Global cache instance for use across the application
pub static GLOBAL_CACHE: LazyLock<MetricsCache> = LazyLock::new(|| MetricsCache::new(64));
