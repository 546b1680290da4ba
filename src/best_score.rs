//! Personal best score
//!
//! A single monotonic integer kept in a [`KeyValueStore`] under
//! `"snake-best-score"`, written as a base-10 ASCII string.

use crate::consts::BEST_SCORE_KEY;
use crate::storage::KeyValueStore;

/// Durable best score backed by a key-value store
#[derive(Debug)]
pub struct BestScoreStore<S: KeyValueStore> {
    store: S,
    /// Last value read from or written to the store
    cached: u32,
}

impl<S: KeyValueStore> BestScoreStore<S> {
    pub fn new(store: S) -> Self {
        let mut scores = Self { store, cached: 0 };
        scores.cached = scores.load();
        log::info!("Best score: {}", scores.cached);
        scores
    }

    /// Read the stored best. Missing or malformed data reads as 0.
    pub fn load(&self) -> u32 {
        match self.store.get_item(BEST_SCORE_KEY) {
            Ok(Some(raw)) => raw.trim().parse().unwrap_or_else(|_| {
                log::warn!("Ignoring malformed best score {:?}", raw);
                0
            }),
            Ok(None) => 0,
            Err(e) => {
                log::warn!("Could not read best score: {}", e);
                0
            }
        }
    }

    /// Store `value` if it beats the stored best; otherwise do nothing
    pub fn save(&mut self, value: u32) {
        let stored = self.load();
        if value <= stored {
            self.cached = stored;
            return;
        }
        if let Err(e) = self.store.set_item(BEST_SCORE_KEY, &value.to_string()) {
            log::warn!("Could not save best score: {}", e);
        }
        self.cached = value;
    }

    /// Offer a finished game's score. Returns true when it set a new best.
    pub fn submit(&mut self, score: u32) -> bool {
        let previous = self.load();
        self.save(score);
        let beat = score > previous;
        if beat {
            log::info!("New best score: {} (was {})", score, previous);
        }
        beat
    }

    /// Best value as last seen (for the HUD)
    pub fn best(&self) -> u32 {
        self.cached
    }

    pub fn store(&self) -> &S {
        &self.store
    }
}
