//! Catalog cache and lazy-load bookkeeping for the tag picker.
//!
//! This module owns the full set of known tags once loaded and the state that
//! sits between the owner-supplied asynchronous loader and the picker. The
//! cache never fetches anything itself: callers ask [`CatalogCache::needs_load`],
//! mark a fetch with [`CatalogCache::begin_load`], drive the returned future
//! however they like, and hand the outcome back through
//! [`CatalogCache::resolve`].
//!
//! Loads are identified by a generation token rather than cancelled: a
//! completion carrying anything but the current generation is discarded
//! without touching state, so out-of-order or abandoned fetches can never
//! clobber a newer catalog. Failures degrade to an empty cache and a log
//! record; the next open-while-empty simply triggers a fresh load.

use futures::future::BoxFuture;

use crate::tag::Tag;

/// Owner-supplied catalog fetch. Each call starts one fetch; the picker
/// invokes it at most once per cache-empty condition.
pub type CatalogLoader = Box<dyn Fn() -> BoxFuture<'static, anyhow::Result<Vec<Tag>>> + Send + Sync>;

/// An in-flight catalog fetch handed to the host to drive.
///
/// The host awaits `future` and feeds the outcome back through
/// [`CatalogCache::resolve`] (or [`crate::picker::TagPicker::finish_load`])
/// together with `generation`, which is what lets stale completions be told
/// apart from current ones.
pub struct PendingLoad {
    pub generation: u64,
    pub future: BoxFuture<'static, anyhow::Result<Vec<Tag>>>,
}

/// The tag catalog plus lazy-load state for one picker instance.
#[derive(Debug, Default)]
pub struct CatalogCache {
    tags: Vec<Tag>,
    /// Generation of the load currently in flight, if any.
    pending: Option<u64>,
    next_generation: u64,
}

impl CatalogCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn tags(&self) -> &[Tag] {
        &self.tags
    }

    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }

    /// True while a load is in flight.
    pub fn load_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// True when opening the picker should trigger a fetch: the cache is
    /// empty and nothing is already in flight. This guard, not a lock, is
    /// what keeps rapid repeated opens down to a single underlying fetch.
    pub fn needs_load(&self) -> bool {
        self.tags.is_empty() && self.pending.is_none()
    }

    /// Marks a load as in flight and returns its generation token.
    ///
    /// Starting a new load while one is pending supersedes the old one; the
    /// superseded completion will be discarded when it arrives.
    pub fn begin_load(&mut self) -> u64 {
        self.next_generation += 1;
        let generation = self.next_generation;
        self.pending = Some(generation);
        generation
    }

    /// Applies a load completion, returning whether it was accepted.
    ///
    /// Stale generations are dropped without touching the cache. A successful
    /// fetch replaces the cache in full; an empty result is a valid terminal
    /// state, not an error. A failed fetch empties the cache and is reported
    /// through `tracing` only; the picker stays usable and shows its empty
    /// state instead of surfacing error text.
    pub fn resolve(&mut self, generation: u64, result: anyhow::Result<Vec<Tag>>) -> bool {
        if self.pending != Some(generation) {
            tracing::debug!(generation, "discarding stale tag catalog load");
            return false;
        }
        self.pending = None;
        match result {
            Ok(tags) => {
                tracing::debug!(count = tags.len(), "tag catalog loaded");
                self.tags = tags;
            }
            Err(err) => {
                tracing::warn!(cause = %err, "tag_catalog_load_failed");
                self.tags.clear();
            }
        }
        true
    }

    /// Mirrors an owner-supplied catalog into the cache.
    ///
    /// An empty owner-supplied sequence never overwrites a previously
    /// non-empty cache. That guards against transient empty updates clobbering
    /// state, at the cost that an owner who legitimately empties its catalog
    /// cannot make the picker forget tags.
    pub fn sync_external(&mut self, tags: &[Tag]) {
        if tags.is_empty() {
            tracing::debug!("ignoring empty external tag catalog update");
            return;
        }
        self.tags = tags.to_vec();
    }
}
