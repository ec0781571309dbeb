//! Rendered-view cache keyed by route path. Mutations invalidate; the next read recomputes.
//!
//! Every invalidation bumps the path's generation. A recomputed view is only stored if
//! the generation it was computed under is still current, so a read that raced a
//! mutation cannot put the pre-mutation view back.

use async_trait::async_trait;
#[cfg(test)]
use mockall::automock;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::RwLock;

/// Path of the invoice listing view.
pub const INVOICES_VIEW: &str = "/dashboard/invoices";

#[cfg_attr(test, automock)]
#[async_trait]
pub trait ViewCache: Send + Sync {
    /// Mark the view at `path` stale and advance its generation.
    async fn invalidate(&self, path: String);
    async fn get(&self, path: String) -> Option<Value>;
    /// Current generation of `path`. Read it before computing a view.
    async fn generation(&self, path: String) -> u64;
    /// Store `view` if `path` is still at `generation`. Returns whether it was stored.
    async fn put_if_current(&self, path: String, generation: u64, view: Value) -> bool;
}

#[derive(Default)]
struct ViewSlot {
    view: Option<Value>,
    generation: u64,
}

#[derive(Default)]
pub struct MemoryViewCache {
    slots: RwLock<HashMap<String, ViewSlot>>,
}

impl MemoryViewCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// How many times `path` has been invalidated since start.
    pub fn invalidation_count(&self, path: &str) -> u64 {
        self.slots
            .read()
            .ok()
            .and_then(|m| m.get(path).map(|s| s.generation))
            .unwrap_or(0)
    }
}

#[async_trait]
impl ViewCache for MemoryViewCache {
    async fn invalidate(&self, path: String) {
        if let Ok(mut slots) = self.slots.write() {
            let slot = slots.entry(path.clone()).or_default();
            slot.view = None;
            slot.generation += 1;
        }
        tracing::debug!(path = %path, "view invalidated");
    }

    async fn get(&self, path: String) -> Option<Value> {
        self.slots.read().ok()?.get(&path)?.view.clone()
    }

    async fn generation(&self, path: String) -> u64 {
        self.invalidation_count(&path)
    }

    async fn put_if_current(&self, path: String, generation: u64, view: Value) -> bool {
        let Ok(mut slots) = self.slots.write() else { return false };
        let slot = slots.entry(path.clone()).or_default();
        if slot.generation != generation {
            tracing::debug!(path = %path, computed = generation, current = slot.generation, "stale view discarded");
            return false;
        }
        slot.view = Some(view);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn invalidate_drops_only_that_path() {
        let cache = MemoryViewCache::new();
        assert!(cache.put_if_current(INVOICES_VIEW.into(), 0, json!([1])).await);
        assert!(cache.put_if_current("/dashboard".into(), 0, json!({"total": 1})).await);

        cache.invalidate(INVOICES_VIEW.into()).await;

        assert_eq!(cache.get(INVOICES_VIEW.into()).await, None);
        assert_eq!(cache.get("/dashboard".into()).await, Some(json!({"total": 1})));
        assert_eq!(cache.invalidation_count(INVOICES_VIEW), 1);
        assert_eq!(cache.invalidation_count("/dashboard"), 0);
    }

    #[tokio::test]
    async fn view_computed_before_an_invalidation_is_not_stored() {
        let cache = MemoryViewCache::new();
        let before = cache.generation(INVOICES_VIEW.into()).await;

        cache.invalidate(INVOICES_VIEW.into()).await;

        assert!(!cache.put_if_current(INVOICES_VIEW.into(), before, json!([])).await);
        assert_eq!(cache.get(INVOICES_VIEW.into()).await, None);

        let now = cache.generation(INVOICES_VIEW.into()).await;
        assert_eq!(now, before + 1);
        assert!(cache.put_if_current(INVOICES_VIEW.into(), now, json!([1])).await);
        assert_eq!(cache.get(INVOICES_VIEW.into()).await, Some(json!([1])));
    }
}
