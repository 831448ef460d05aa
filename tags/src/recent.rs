use crate::tag::Tag;

/// Upper bound on how many recently picked tags are remembered per widget
/// instance.
pub const RECENT_TAGS_CAP: usize = 5;

/// Bounded most-recently-picked list, deduplicated by tag id.
///
/// Recorded on every accepted pick and never on removal, so it reflects what
/// the operator reached for, not what survived in the selection.
#[derive(Debug, Default)]
pub struct RecentTags {
    tags: Vec<Tag>,
}

impl RecentTags {
    pub fn new() -> Self {
        Self::default()
    }

    /// Moves `tag` to the front, dropping any previous occurrence with the
    /// same id, then trims to [`RECENT_TAGS_CAP`].
    pub fn record(&mut self, tag: &Tag) {
        self.tags.retain(|t| t.id != tag.id);
        self.tags.insert(0, tag.clone());
        self.tags.truncate(RECENT_TAGS_CAP);
    }

    /// Most-recent-first view of the recorded tags.
    pub fn tags(&self) -> &[Tag] {
        &self.tags
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::DateTime;
    use pretty_assertions::assert_eq;
    use uuid::Uuid;

    fn tag(id: i64, name: &str) -> Tag {
        Tag {
            id,
            name: name.to_string(),
            category: "Meal Types".to_string(),
            recipe_counter: 0,
            uuid: Uuid::nil(),
            created_at: DateTime::UNIX_EPOCH,
            updated_at: DateTime::UNIX_EPOCH,
        }
    }

    fn names(recent: &RecentTags) -> Vec<&str> {
        recent.tags().iter().map(|t| t.name.as_str()).collect()
    }

    #[test]
    fn re_recording_moves_to_front_without_duplicating() {
        let mut recent = RecentTags::new();
        recent.record(&tag(5, "dessert"));
        recent.record(&tag(7, "vegan"));
        recent.record(&tag(5, "dessert"));
        assert_eq!(names(&recent), vec!["dessert", "vegan"]);
    }

    #[test]
    fn keeps_most_recent_first() {
        let mut recent = RecentTags::new();
        recent.record(&tag(1, "a"));
        recent.record(&tag(2, "b"));
        recent.record(&tag(3, "c"));
        assert_eq!(names(&recent), vec!["c", "b", "a"]);
    }

    #[test]
    fn truncates_to_capacity() {
        let mut recent = RecentTags::new();
        for id in 1..=7 {
            recent.record(&tag(id, &format!("tag{id}")));
        }
        assert_eq!(recent.tags().len(), RECENT_TAGS_CAP);
        assert_eq!(names(&recent), vec!["tag7", "tag6", "tag5", "tag4", "tag3"]);
    }
}
