//! Session-scoped key/value storage.

use rustc_hash::FxHashMap;

/// Slot written by static per-route pages, consumed once on root load.
pub const REDIRECT_KEY: &str = "redirectPath";

/// String storage that lives as long as the session.
#[derive(Debug, Default, Clone)]
pub struct SessionStorage {
    items: FxHashMap<String, String>,
}

impl SessionStorage {
    pub fn get(&self, key: &str) -> Option<&str> {
        self.items.get(key).map(String::as_str)
    }

    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.items.insert(key.into(), value.into());
    }

    /// Read and clear a slot.
    pub fn take(&mut self, key: &str) -> Option<String> {
        self.items.remove(key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_take_consumes() {
        let mut storage = SessionStorage::default();
        storage.set(REDIRECT_KEY, "/api/web/");
        assert_eq!(storage.get(REDIRECT_KEY), Some("/api/web/"));
        assert_eq!(storage.take(REDIRECT_KEY).as_deref(), Some("/api/web/"));
        assert_eq!(storage.take(REDIRECT_KEY), None);
    }
}
