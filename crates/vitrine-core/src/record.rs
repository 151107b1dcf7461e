//! Record and result-set types for catalog queries.

use serde::{Deserialize, Serialize};

/// One page of matching records plus pagination cursors.
///
/// Produced wholesale by the fetch collaborator; replacing the whole set is
/// the only way records or cursors change.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct QueryResultSet {
    /// Pagination cursors for this page.
    #[serde(default)]
    pub info: PageInfo,

    /// Records on this page, in API order.
    #[serde(default)]
    pub records: Vec<Record>,
}

impl QueryResultSet {
    /// Create a result set from parts.
    pub fn new(info: PageInfo, records: Vec<Record>) -> Self {
        Self { info, records }
    }

    /// Check if this page has any records.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Number of records on this page.
    pub fn len(&self) -> usize {
        self.records.len()
    }
}

/// Pagination cursors. An absent cursor disables the corresponding control.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PageInfo {
    /// URL of the previous page, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prev: Option<String>,

    /// URL of the next page, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next: Option<String>,
}

/// One catalog entry with named descriptive fields.
///
/// Every field is optional. Absence means "omit from render", never
/// "render empty".
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Record {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dated: Option<String>,

    /// Additional image URLs beyond the primary one.
    #[serde(default)]
    pub images: Vec<String>,

    /// URL of the primary image, if the record has one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub primaryimageurl: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Cultures associated with the record. Each entry is searchable.
    #[serde(default)]
    pub culture: Vec<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub style: Option<String>,

    /// Production technique. Searchable.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub technique: Option<String>,

    /// Physical medium. Searchable.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub medium: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dimensions: Option<String>,

    /// People associated with the record. Each display name is searchable.
    #[serde(default)]
    pub people: Vec<Person>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub department: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub division: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contact: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub creditline: Option<String>,
}

impl Record {
    /// Create a record with only a title, for list placeholders and tests.
    pub fn titled(title: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            ..Self::default()
        }
    }

    /// Check if the record carries a primary image.
    pub fn has_image(&self) -> bool {
        self.primaryimageurl.is_some()
    }
}

/// A person associated with a record.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Person {
    /// Canonical name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Name as displayed (and as searched).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub displayname: Option<String>,
}

impl Person {
    /// Create a person whose display name matches the canonical name.
    pub fn named(name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            name: Some(name.clone()),
            displayname: Some(name),
        }
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_result_set_decodes_api_payload() {
        let payload = r#"{
            "info": { "next": "https://example.test/object?page=2" },
            "records": [
                { "title": "Vase", "primaryimageurl": "https://img.test/1.jpg" },
                { "culture": ["Greek", "Roman"], "people": [{ "displayname": "Unknown" }] }
            ]
        }"#;

        let set: QueryResultSet = serde_json::from_str(payload).unwrap();
        assert_eq!(set.len(), 2);
        assert!(set.info.prev.is_none());
        assert_eq!(set.info.next.as_deref(), Some("https://example.test/object?page=2"));

        assert_eq!(set.records[0].title.as_deref(), Some("Vase"));
        assert!(set.records[0].has_image());

        assert_eq!(set.records[1].culture, vec!["Greek", "Roman"]);
        assert_eq!(set.records[1].people[0].displayname.as_deref(), Some("Unknown"));
    }

    #[test]
    fn test_record_fields_default_to_absent() {
        let record: Record = serde_json::from_str("{}").unwrap();
        assert!(record.title.is_none());
        assert!(record.culture.is_empty());
        assert!(record.people.is_empty());
        assert!(!record.has_image());
    }

    #[test]
    fn test_empty_info_decodes() {
        let set: QueryResultSet = serde_json::from_str(r#"{"info":{},"records":[]}"#).unwrap();
        assert!(set.is_empty());
        assert!(set.info.prev.is_none());
        assert!(set.info.next.is_none());
    }
}
