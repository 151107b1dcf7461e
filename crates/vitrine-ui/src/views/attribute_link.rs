//! One activatable attribute value.
//!
//! An attribute link renders a field value and, on activation, re-runs the
//! search keyed by that (field, value) pair. The constructors encode the
//! per-field normalization contract: a technique link lower-cases its query
//! value while displaying the original text; a medium link passes the value
//! through untouched. List-valued fields (culture, people) produce one
//! independent link per entry.

use vitrine_core::{Query, SearchField};

/// An activatable rendering of one field value.
#[derive(Debug, Clone, PartialEq)]
pub struct AttributeLink {
    field: SearchField,
    display: String,
    query_value: String,
}

impl AttributeLink {
    /// Link on one culture entry.
    pub fn culture(value: &str) -> Self {
        Self::verbatim(SearchField::Culture, value)
    }

    /// Link on the technique. The query value is lower-cased; the displayed
    /// text is not.
    pub fn technique(value: &str) -> Self {
        Self {
            field: SearchField::Technique,
            display: value.to_string(),
            query_value: value.to_lowercase(),
        }
    }

    /// Link on the medium. The value is used as-is.
    pub fn medium(value: &str) -> Self {
        Self::verbatim(SearchField::Medium, value)
    }

    /// Link on one associated person's display name.
    pub fn person(displayname: &str) -> Self {
        Self::verbatim(SearchField::People, displayname)
    }

    fn verbatim(field: SearchField, value: &str) -> Self {
        Self {
            field,
            display: value.to_string(),
            query_value: value.to_string(),
        }
    }

    /// Text shown to the user.
    pub fn display(&self) -> &str {
        &self.display
    }

    /// The query this link triggers on activation.
    pub fn to_query(&self) -> Query {
        Query::term(self.field, self.query_value.clone())
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_technique_lower_cases_the_query_value_only() {
        let link = AttributeLink::technique("Lithography");
        assert_eq!(link.display(), "Lithography");
        assert_eq!(
            link.to_query(),
            Query::term(SearchField::Technique, "lithography")
        );
    }

    #[test]
    fn test_medium_passes_the_value_through() {
        let link = AttributeLink::medium("Graphite");
        assert_eq!(link.display(), "Graphite");
        assert_eq!(link.to_query(), Query::term(SearchField::Medium, "Graphite"));
    }

    #[test]
    fn test_culture_and_person_are_verbatim() {
        assert_eq!(
            AttributeLink::culture("Greek").to_query(),
            Query::term(SearchField::Culture, "Greek")
        );
        assert_eq!(
            AttributeLink::person("Unknown Artist").to_query(),
            Query::term(SearchField::People, "Unknown Artist")
        );
    }
}
