use crate::tag::Tag;

/// Candidate list for the picker: the catalog minus the current selection,
/// narrowed by a case-insensitive substring match on the tag name, ranked by
/// popularity.
///
/// Pure with respect to its three inputs. The sort is `recipe_counter`
/// descending with ties broken by `name` ascending (case-sensitive, as
/// supplied by the source); tags identical in both fields keep their input
/// order.
pub fn filter_tags(catalog: &[Tag], selection: &[Tag], query: &str) -> Vec<Tag> {
    let needle = query.to_lowercase();
    let mut out: Vec<Tag> = catalog
        .iter()
        .filter(|tag| !is_selected(selection, tag.id))
        .filter(|tag| needle.is_empty() || tag.name.to_lowercase().contains(&needle))
        .cloned()
        .collect();
    out.sort_by(|a, b| {
        b.recipe_counter
            .cmp(&a.recipe_counter)
            .then_with(|| a.name.cmp(&b.name))
    });
    out
}

/// Top `limit` of the non-selected catalog under the [`filter_tags`]
/// ordering, ignoring any text filter.
pub fn popular_tags(catalog: &[Tag], selection: &[Tag], limit: usize) -> Vec<Tag> {
    let mut out = filter_tags(catalog, selection, "");
    out.truncate(limit);
    out
}

pub(crate) fn is_selected(selection: &[Tag], id: i64) -> bool {
    selection.iter().any(|tag| tag.id == id)
}
