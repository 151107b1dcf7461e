//! The fetch collaborator trait.
//!
//! The view layer never talks HTTP itself; it consumes this trait. Methods
//! return futures so the caller decides how to spawn them, which also makes
//! the trait mockable for tests.

use futures::future::BoxFuture;
use vitrine_core::{FetchError, QueryResultSet, SearchField};

/// Trait for catalog query operations.
///
/// All three operations may fail with [`FetchError`]; the view layer logs
/// and absorbs failures, leaving the previous result set on screen.
pub trait Fetcher: Send + Sync {
    /// Run the default keyword search used to populate the first screen.
    fn fetch_initial(&self) -> BoxFuture<'static, Result<QueryResultSet, FetchError>>;

    /// Search records where `field` matches `value`.
    fn fetch_by_term_value(
        &self,
        field: SearchField,
        value: String,
    ) -> BoxFuture<'static, Result<QueryResultSet, FetchError>>;

    /// Fetch a specific result page by cursor URL.
    fn fetch_by_url(&self, url: String) -> BoxFuture<'static, Result<QueryResultSet, FetchError>>;
}
