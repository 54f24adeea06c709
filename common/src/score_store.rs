use std::collections::HashMap;

use anyhow::{Context, Result};
use log::warn;

use crate::constants::HIGHSCORE_KEY_SUFFIX;
use crate::game::GameKind;

/// Opaque string store, e.g. browser `localStorage`
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: &str) -> Result<()>;
}

#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// One high score per game, kept as a decimal string under `<game>_highscore`
pub struct ScoreStore<S: KeyValueStore> {
    store: S,
}

impl<S: KeyValueStore> ScoreStore<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn key(game: GameKind) -> String {
        format!("{}{}", game.id(), HIGHSCORE_KEY_SUFFIX)
    }

    /// Missing or unreadable values count as 0
    pub fn load(&self, game: GameKind) -> u32 {
        let key = Self::key(game);
        match self.store.get(&key) {
            None => 0,
            Some(raw) => raw.trim().parse().unwrap_or_else(|_| {
                warn!("Ignoring malformed high score {:?} for {}", raw, key);
                0
            }),
        }
    }

    /// Writes `score` only if it beats the stored value. Returns the new high
    /// score when one was written.
    pub fn save(&mut self, game: GameKind, score: u32) -> Result<Option<u32>> {
        if score <= self.load(game) {
            return Ok(None);
        }

        let key = Self::key(game);
        self.store
            .set(&key, &score.to_string())
            .with_context(|| format!("Failed to persist high score under {}", key))?;
        Ok(Some(score))
    }

    pub fn inner(&self) -> &S {
        &self.store
    }
}
