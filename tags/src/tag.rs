use chrono::DateTime;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;
use uuid::Uuid;

/// A recipe tag as delivered by the catalog API.
///
/// * `id` – Stable identity; equality and deduplication key everywhere in
///   this crate.
/// * `name` / `category` – Display and grouping attributes, taken verbatim
///   from the data source.
/// * `recipe_counter` – Number of recipes carrying this tag; the popularity
///   signal used for ranking.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Tag {
    pub id: i64,
    pub name: String,
    pub category: String,
    pub recipe_counter: i64,
    pub uuid: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Parses a catalog payload, degrading to an empty catalog on malformed
/// input (non-sequence payloads, entries with missing fields) instead of
/// surfacing an error. A broken tag list should mean "no suggestions", not
/// a broken picker.
pub fn catalog_from_json(payload: serde_json::Value) -> Vec<Tag> {
    match serde_json::from_value::<Vec<Tag>>(payload) {
        Ok(tags) => tags,
        Err(err) => {
            tracing::warn!("discarding malformed tag catalog payload: {err}");
            Vec::new()
        }
    }
}

/// [`catalog_from_json`] over a raw string; unparseable text is treated the
/// same way as a malformed payload.
pub fn catalog_from_str(payload: &str) -> Vec<Tag> {
    match serde_json::from_str::<serde_json::Value>(payload) {
        Ok(value) => catalog_from_json(value),
        Err(err) => {
            tracing::warn!("discarding unparseable tag catalog payload: {err}");
            Vec::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn tag_value(id: i64, name: &str) -> serde_json::Value {
        json!({
            "id": id,
            "name": name,
            "category": "Meal Types",
            "recipe_counter": 3,
            "uuid": "8a6e0804-2bd0-4672-b79d-d97027f9071a",
            "created_at": "2024-03-01T12:00:00Z",
            "updated_at": "2024-03-02T12:00:00Z",
        })
    }

    #[test]
    fn parses_a_well_formed_catalog() {
        let tags = catalog_from_json(json!([tag_value(1, "breakfast"), tag_value(2, "quick")]));
        let names: Vec<&str> = tags.iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names, vec!["breakfast", "quick"]);
        assert_eq!(tags[0].id, 1);
        assert_eq!(tags[0].recipe_counter, 3);
    }

    #[test]
    fn non_sequence_payload_becomes_empty_catalog() {
        assert_eq!(catalog_from_json(json!({"tags": []})), Vec::new());
        assert_eq!(catalog_from_json(json!("breakfast")), Vec::new());
        assert_eq!(catalog_from_json(json!(null)), Vec::new());
    }

    #[test]
    fn entry_with_missing_fields_discards_the_whole_catalog() {
        let payload = json!([tag_value(1, "breakfast"), {"id": 2, "name": "quick"}]);
        assert_eq!(catalog_from_json(payload), Vec::new());
    }

    #[test]
    fn unparseable_text_becomes_empty_catalog() {
        assert_eq!(catalog_from_str("not json at all"), Vec::new());
        assert_eq!(catalog_from_str(""), Vec::new());
    }

    #[test]
    fn round_trips_through_serde() {
        let tags = catalog_from_json(json!([tag_value(9, "vegan")]));
        let serialized = serde_json::to_value(&tags).unwrap();
        assert_eq!(catalog_from_json(serialized), tags);
    }
}
