//! Query descriptors for re-running a catalog search.

use serde::{Deserialize, Serialize};

/// A searchable record dimension.
///
/// The wire name doubles as the query parameter sent to the collaborator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SearchField {
    Culture,
    Technique,
    Medium,
    People,
}

impl SearchField {
    /// Wire name used as the query term.
    pub fn as_str(&self) -> &'static str {
        match self {
            SearchField::Culture => "culture",
            SearchField::Technique => "technique",
            SearchField::Medium => "medium",
            SearchField::People => "person",
        }
    }

    /// Label shown next to this field's values in the detail view.
    pub fn label(&self) -> &'static str {
        match self {
            SearchField::Culture => "Culture",
            SearchField::Technique => "Technique",
            SearchField::Medium => "Medium",
            SearchField::People => "Person",
        }
    }
}

/// Descriptor for one search-triggering activation.
///
/// Either an attribute search (field + value) or a page fetch against a
/// cursor URL handed back by the collaborator.
#[derive(Debug, Clone, PartialEq)]
pub enum Query {
    /// Search on a field/value pair.
    Term { field: SearchField, value: String },

    /// Fetch a specific page by URL.
    Page { url: String },
}

impl Query {
    /// Build a term query.
    pub fn term(field: SearchField, value: impl Into<String>) -> Self {
        Query::Term {
            field,
            value: value.into(),
        }
    }

    /// Build a page query.
    pub fn page(url: impl Into<String>) -> Self {
        Query::Page { url: url.into() }
    }

    /// Whether running this query invalidates the current record selection.
    ///
    /// A term query opens a new search context; a page query moves within
    /// the current one, so the selection survives.
    pub fn clears_selection(&self) -> bool {
        matches!(self, Query::Term { .. })
    }
}

// =============================================================================
// Tests
// =============================================================================
