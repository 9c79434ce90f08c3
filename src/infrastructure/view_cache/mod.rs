//! Keyed cache for rendered listing data.
//!
//! Keys are composite (`entity:filter:page`); a mutation invalidates every
//! cached page for its entity by prefix, forcing the next read to recompute.
//! Interior mutability so handlers share one instance behind an `Arc`.

use std::collections::HashMap;
use std::sync::RwLock;

use serde_json::Value;

/// Composite key from its parts, e.g. `["invoices", "lee", "2"]` ->
/// `"invoices:lee:2"`.
pub fn view_key(parts: &[&str]) -> String {
    parts.join(":")
}

pub trait ViewCache: Send + Sync {
    fn read(&self, key: &str) -> Option<Value>;
    fn write(&self, key: &str, value: Value);
    /// Drop every entry whose key starts with `prefix`. Fire-and-forget;
    /// callers issue it after the write commits and never await ordering
    /// against concurrent reads.
    fn invalidate_prefix(&self, prefix: &str);
}

#[derive(Default)]
pub struct InMemoryViewCache {
    store: RwLock<HashMap<String, Value>>,
}

impl InMemoryViewCache {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ViewCache for InMemoryViewCache {
    fn read(&self, key: &str) -> Option<Value> {
        self.store
            .read()
            .ok()
            .and_then(|store| store.get(key).cloned())
    }

    fn write(&self, key: &str, value: Value) {
        if let Ok(mut store) = self.store.write() {
            store.insert(key.to_string(), value);
        }
    }

    fn invalidate_prefix(&self, prefix: &str) {
        if let Ok(mut store) = self.store.write() {
            store.retain(|key, _| !key.starts_with(prefix));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn read_returns_what_was_written() {
        let cache = InMemoryViewCache::new();
        cache.write(&view_key(&["customers", "", "1"]), json!([1, 2, 3]));
        assert_eq!(
            cache.read("customers::1"),
            Some(json!([1, 2, 3]))
        );
    }

    #[test]
    fn miss_is_none() {
        let cache = InMemoryViewCache::new();
        assert!(cache.read("customers::1").is_none());
    }

    #[test]
    fn prefix_invalidation_drops_every_page() {
        let cache = InMemoryViewCache::new();
        cache.write("invoices::1", json!("page one"));
        cache.write("invoices:lee:1", json!("filtered"));
        cache.write("customers::1", json!("unrelated"));

        cache.invalidate_prefix("invoices");

        assert!(cache.read("invoices::1").is_none());
        assert!(cache.read("invoices:lee:1").is_none());
        assert_eq!(cache.read("customers::1"), Some(json!("unrelated")));
    }

    #[test]
    fn overwrite_replaces_previous_value() {
        let cache = InMemoryViewCache::new();
        cache.write("invoices::1", json!("old"));
        cache.write("invoices::1", json!("new"));
        assert_eq!(cache.read("invoices::1"), Some(json!("new")));
    }
}
