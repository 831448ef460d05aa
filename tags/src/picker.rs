//! Selection controller for the tag picker.
//!
//! [`TagPicker`] is the one component that mutates the externally-visible
//! selection. It owns the open/loading/ready phase, the live query text, the
//! catalog cache, and the recency list; rendering layers read from it and
//! feed user events into it. The owner stays in charge of the selection
//! itself: every accepted change goes out through the selection-changed
//! callback as a borrowed view of the updated sequence, and the picker only
//! ever reads the value the owner hands back in.
//!
//! The picker never awaits. Opening with an empty cache hands back a
//! [`PendingLoad`] for the host to drive; the completion comes back through
//! [`TagPicker::finish_load`] with its generation token, so completions for
//! superseded loads are discarded instead of cancelled. All handlers run to
//! completion on one thread; the phase enum plus the cache's pending guard
//! are the whole concurrency story.

use crate::catalog::CatalogCache;
use crate::catalog::CatalogLoader;
use crate::catalog::PendingLoad;
use crate::filter::filter_tags;
use crate::filter::is_selected;
use crate::group::TagSections;
use crate::group::build_sections;
use crate::recent::RecentTags;
use crate::tag::Tag;

/// Owner notification fired on every accepted selection mutation.
pub type SelectionChangedCallback = Box<dyn Fn(&[Tag]) + Send + Sync>;

/// Interaction phase of the picker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PickerPhase {
    Closed,
    /// Open with a catalog fetch in flight; the candidate list is suppressed.
    Loading,
    /// Open with whatever the cache holds (possibly nothing).
    Ready,
}

pub struct TagPicker {
    phase: PickerPhase,
    catalog: CatalogCache,
    selection: Vec<Tag>,
    recent: RecentTags,
    query: String,
    loader: Option<CatalogLoader>,
    on_selection_change: Option<SelectionChangedCallback>,
    max_selected: Option<usize>,
    group_by_category: bool,
    show_search: bool,
    disabled: bool,
}

impl TagPicker {
    pub fn builder() -> TagPickerBuilder {
        TagPickerBuilder::new()
    }

    pub fn phase(&self) -> PickerPhase {
        self.phase
    }

    pub fn is_open(&self) -> bool {
        self.phase != PickerPhase::Closed
    }

    pub fn is_disabled(&self) -> bool {
        self.disabled
    }

    pub fn show_search(&self) -> bool {
        self.show_search
    }

    pub fn selection(&self) -> &[Tag] {
        &self.selection
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn catalog_tags(&self) -> &[Tag] {
        self.catalog.tags()
    }

    /// Opens the picker. Returns a [`PendingLoad`] when this open is the one
    /// that triggers the lazy catalog fetch: cache empty, loader present,
    /// nothing already in flight. The host must drive the returned future and
    /// feed its outcome to [`TagPicker::finish_load`].
    ///
    /// Reopening while a fetch from an earlier open is still in flight lands
    /// back in [`PickerPhase::Loading`] without a second fetch. A disabled
    /// picker does not open at all.
    pub fn open(&mut self) -> Option<PendingLoad> {
        if self.disabled || self.phase != PickerPhase::Closed {
            return None;
        }
        if !self.catalog.is_empty() {
            self.phase = PickerPhase::Ready;
            return None;
        }
        if self.catalog.load_pending() {
            self.phase = PickerPhase::Loading;
            return None;
        }
        let Some(loader) = &self.loader else {
            self.phase = PickerPhase::Ready;
            return None;
        };
        self.phase = PickerPhase::Loading;
        let generation = self.catalog.begin_load();
        Some(PendingLoad {
            generation,
            future: loader(),
        })
    }

    /// Applies a catalog load completion.
    ///
    /// Success and failure both leave [`PickerPhase::Loading`] for
    /// [`PickerPhase::Ready`]: a failed load means an empty catalog and a
    /// log record, not an unusable picker. A completion arriving after the
    /// picker was closed still populates the cache but does not reopen
    /// anything; a stale generation is dropped entirely.
    pub fn finish_load(&mut self, generation: u64, result: anyhow::Result<Vec<Tag>>) {
        if !self.catalog.resolve(generation, result) {
            return;
        }
        if self.phase == PickerPhase::Loading {
            self.phase = PickerPhase::Ready;
        }
    }

    /// Closes the picker and discards the query. In-flight loads are not
    /// cancelled; their completions settle into the cache for the next open.
    pub fn close(&mut self) {
        self.phase = PickerPhase::Closed;
        self.query.clear();
    }

    /// Requests adding `tag` to the selection. Returns whether the pick was
    /// accepted.
    ///
    /// A pick is silently ignored when the id is already selected or the
    /// soft cap is reached, with no error and no callback. An accepted pick
    /// appends to the selection, clears the query, records recency, notifies
    /// the owner, and leaves the picker open for rapid multi-select.
    pub fn pick(&mut self, tag: &Tag) -> bool {
        if self.disabled || is_selected(&self.selection, tag.id) {
            return false;
        }
        if let Some(max) = self.max_selected
            && self.selection.len() >= max
        {
            return false;
        }
        self.selection.push(tag.clone());
        self.recent.record(tag);
        self.query.clear();
        self.notify_selection();
        true
    }

    /// Removes the tag with `id` from the selection, notifying the owner.
    /// Removing an absent id is a no-op with no notification; query, recency,
    /// and phase are untouched either way.
    pub fn remove(&mut self, id: i64) -> bool {
        if self.disabled || !is_selected(&self.selection, id) {
            return false;
        }
        self.selection.retain(|tag| tag.id != id);
        self.notify_selection();
        true
    }

    /// Removes the most recently selected tag (backspace-on-empty-query).
    pub fn remove_last(&mut self) -> bool {
        match self.selection.last() {
            Some(tag) => self.remove(tag.id),
            None => false,
        }
    }

    /// Empties the selection in a single owner notification. No-op when
    /// nothing is selected.
    pub fn clear_selection(&mut self) -> bool {
        if self.disabled || self.selection.is_empty() {
            return false;
        }
        self.selection.clear();
        self.notify_selection();
        true
    }

    /// Enter-to-commit: when the current filter output contains a
    /// case-insensitive exact name match for the query, pick it and close.
    /// Returns whether a commit happened; an over-cap pick leaves the picker
    /// open and the selection unchanged.
    pub fn commit_query_match(&mut self) -> bool {
        if self.disabled || self.query.is_empty() {
            return false;
        }
        let needle = self.query.to_lowercase();
        let matched = self
            .candidates()
            .into_iter()
            .find(|tag| tag.name.to_lowercase() == needle);
        let Some(tag) = matched else {
            return false;
        };
        if !self.pick(&tag) {
            return false;
        }
        self.close();
        true
    }

    pub fn set_query(&mut self, query: String) {
        if self.disabled {
            return;
        }
        self.query = query;
    }

    /// Owner pushes a new externally-owned selection value. The owner's
    /// sequence carries the no-duplicate-ids invariant; the picker only reads
    /// it.
    pub fn set_selection(&mut self, selection: Vec<Tag>) {
        self.selection = selection;
    }

    /// Owner-supplied catalog path; see [`CatalogCache::sync_external`] for
    /// the non-empty guard.
    pub fn set_catalog(&mut self, tags: &[Tag]) {
        self.catalog.sync_external(tags);
    }

    /// Current candidate list under the live query.
    pub fn candidates(&self) -> Vec<Tag> {
        filter_tags(self.catalog.tags(), &self.selection, &self.query)
    }

    /// Sectioned view of the candidates for rendering.
    pub fn sections(&self) -> TagSections {
        build_sections(
            self.catalog.tags(),
            &self.selection,
            &self.query,
            self.recent.tags(),
            self.group_by_category,
        )
    }

    fn notify_selection(&self) {
        if let Some(on_selection_change) = &self.on_selection_change {
            on_selection_change(&self.selection);
        }
    }
}

pub struct TagPickerBuilder {
    selection: Vec<Tag>,
    catalog: Vec<Tag>,
    loader: Option<CatalogLoader>,
    on_selection_change: Option<SelectionChangedCallback>,
    max_selected: Option<usize>,
    group_by_category: bool,
    show_search: bool,
    disabled: bool,
}

impl TagPickerBuilder {
    pub fn new() -> Self {
        Self {
            selection: Vec::new(),
            catalog: Vec::new(),
            loader: None,
            on_selection_change: None,
            max_selected: None,
            group_by_category: true,
            show_search: true,
            disabled: false,
        }
    }

    /// Initial externally-owned selection value.
    pub fn selection(mut self, selection: Vec<Tag>) -> Self {
        self.selection = selection;
        self
    }

    /// Directly-supplied catalog; usable alongside a loader.
    pub fn catalog(mut self, catalog: Vec<Tag>) -> Self {
        self.catalog = catalog;
        self
    }

    /// Lazy catalog fetch, triggered on the first open with an empty cache.
    /// Without one (and without a direct catalog) the picker stays empty.
    pub fn loader<F>(mut self, loader: F) -> Self
    where
        F: Fn() -> futures::future::BoxFuture<'static, anyhow::Result<Vec<Tag>>>
            + Send
            + Sync
            + 'static,
    {
        self.loader = Some(Box::new(loader));
        self
    }

    pub fn on_selection_change<F>(mut self, callback: F) -> Self
    where
        F: Fn(&[Tag]) + Send + Sync + 'static,
    {
        self.on_selection_change = Some(Box::new(callback));
        self
    }

    /// Soft cap on the selection length; picks beyond it are silently
    /// ignored.
    pub fn max_selected(mut self, max_selected: usize) -> Self {
        self.max_selected = Some(max_selected);
        self
    }

    pub fn group_by_category(mut self, enabled: bool) -> Self {
        self.group_by_category = enabled;
        self
    }

    pub fn show_search(mut self, enabled: bool) -> Self {
        self.show_search = enabled;
        self
    }

    /// Display-only mode: every operator-driven mutation path is inert.
    pub fn disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }

    pub fn build(self) -> TagPicker {
        let mut catalog = CatalogCache::new();
        catalog.sync_external(&self.catalog);
        TagPicker {
            phase: PickerPhase::Closed,
            catalog,
            selection: self.selection,
            recent: RecentTags::new(),
            query: String::new(),
            loader: self.loader,
            on_selection_change: self.on_selection_change,
            max_selected: self.max_selected,
            group_by_category: self.group_by_category,
            show_search: self.show_search,
            disabled: self.disabled,
        }
    }
}

impl Default for TagPickerBuilder {
    fn default() -> Self {
        Self::new()
    }
}
