use anyhow::Result;
use common::{KeyValueStore, MemoryStore};
use log::warn;
use web_sys::{Storage, Window};

use crate::js_err;

/// `localStorage`, or an in-memory map when the browser refuses access
pub enum BrowserStore {
    Local(Storage),
    Memory(MemoryStore),
}

impl BrowserStore {
    pub fn open(window: &Window) -> Self {
        match window.local_storage() {
            Ok(Some(storage)) => BrowserStore::Local(storage),
            _ => {
                warn!("localStorage unavailable, high scores will not survive a reload");
                BrowserStore::Memory(MemoryStore::new())
            }
        }
    }
}

impl KeyValueStore for BrowserStore {
    fn get(&self, key: &str) -> Option<String> {
        match self {
            BrowserStore::Local(storage) => storage.get_item(key).ok().flatten(),
            BrowserStore::Memory(store) => store.get(key),
        }
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        match self {
            BrowserStore::Local(storage) => storage.set_item(key, value).map_err(js_err),
            BrowserStore::Memory(store) => store.set(key, value),
        }
    }
}
