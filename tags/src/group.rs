use indexmap::IndexMap;

use crate::filter::filter_tags;
use crate::filter::is_selected;
use crate::filter::popular_tags;
use crate::recent::RECENT_TAGS_CAP;
use crate::tag::Tag;

/// Bucket label used when category grouping is disabled.
pub const ALL_TAGS_LABEL: &str = "All tags";

/// How many tags the "popular" shortcut view shows.
pub const POPULAR_TAGS_LIMIT: usize = 8;

/// Partitions an already-filtered candidate list into display buckets.
///
/// With grouping enabled each tag lands in the bucket named by its own
/// `category` field, buckets ordered by first appearance in `filtered`;
/// categories emptied by the filter never show up. With grouping disabled
/// the whole sequence sits under a single [`ALL_TAGS_LABEL`] entry (present
/// even when `filtered` is empty; callers decide how to render nothing).
pub fn group_by_category(filtered: &[Tag], group_by_category: bool) -> IndexMap<String, Vec<Tag>> {
    let mut buckets: IndexMap<String, Vec<Tag>> = IndexMap::new();
    if !group_by_category {
        buckets.insert(ALL_TAGS_LABEL.to_string(), filtered.to_vec());
        return buckets;
    }
    for tag in filtered {
        buckets
            .entry(tag.category.clone())
            .or_default()
            .push(tag.clone());
    }
    buckets
}

/// Everything the picker list renders for one `(catalog, selection, query)`
/// snapshot: the two shortcut views plus the category partition.
///
/// The shortcut views are non-exclusive: a tag may appear under "recent" or
/// "popular" and again in its category bucket.
#[derive(Debug, Default)]
pub struct TagSections {
    /// Recently picked tags not currently selected; empty unless the query is.
    pub recent: Vec<Tag>,
    /// Most popular non-selected tags, ignoring the text filter; empty unless
    /// the query is.
    pub popular: Vec<Tag>,
    /// Filtered candidates partitioned by [`group_by_category`].
    pub categories: IndexMap<String, Vec<Tag>>,
}

impl TagSections {
    /// True when no view holds any tag at all.
    pub fn is_empty(&self) -> bool {
        self.recent.is_empty()
            && self.popular.is_empty()
            && self.categories.values().all(Vec::is_empty)
    }
}

/// Builds the full sectioned view. Pure with respect to its inputs; `recent`
/// is the recency list most-recent-first.
pub fn build_sections(
    catalog: &[Tag],
    selection: &[Tag],
    query: &str,
    recent: &[Tag],
    group_by_category_enabled: bool,
) -> TagSections {
    let filtered = filter_tags(catalog, selection, query);
    let (recent_view, popular_view) = if query.is_empty() {
        let recent_view: Vec<Tag> = recent
            .iter()
            .filter(|tag| !is_selected(selection, tag.id))
            .take(RECENT_TAGS_CAP)
            .cloned()
            .collect();
        (
            recent_view,
            popular_tags(catalog, selection, POPULAR_TAGS_LIMIT),
        )
    } else {
        (Vec::new(), Vec::new())
    };
    TagSections {
        recent: recent_view,
        popular: popular_view,
        categories: group_by_category(&filtered, group_by_category_enabled),
    }
}
