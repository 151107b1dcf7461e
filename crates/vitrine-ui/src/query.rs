//! The shared re-query sequence.
//!
//! Every search-triggering control — attribute links and pagination — runs
//! the same asynchronous sequence through [`QueryOrchestrator::run_query`]:
//! set the loading flag, await the collaborator, apply the outcome, clear
//! the loading flag. The flag is set before any await and cleared by a
//! single completion function on both the success and failure paths, so any
//! consumer watching it sees a matching true→false transition per action.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use tokio::task::JoinHandle;
use vitrine_client::Fetcher;
use vitrine_core::{FetchError, Query, QueryResultSet};

use crate::model::StateHandle;

// =============================================================================
// Query Orchestrator
// =============================================================================

/// Runs catalog queries against the fetch collaborator and writes the
/// outcome into the shared state.
#[derive(Clone)]
pub struct QueryOrchestrator {
    fetcher: Arc<dyn Fetcher>,
    state: StateHandle,
    /// Generation of the most recently issued query. Completions carrying
    /// an older generation apply nothing.
    issued: Arc<AtomicU64>,
}

impl QueryOrchestrator {
    /// Create an orchestrator over a collaborator and the shared state.
    pub fn new(fetcher: Arc<dyn Fetcher>, state: StateHandle) -> Self {
        Self {
            fetcher,
            state,
            issued: Arc::new(AtomicU64::new(0)),
        }
    }

    /// Run one query.
    ///
    /// The loading flag is raised synchronously, before this returns; the
    /// fetch itself runs on a spawned task. The returned handle is only
    /// awaited by tests.
    pub fn run_query(&self, query: Query) -> JoinHandle<()> {
        let generation = self.issued.fetch_add(1, Ordering::SeqCst) + 1;
        self.state.set_loading(true);

        let fetcher = self.fetcher.clone();
        let state = self.state.clone();
        let issued = self.issued.clone();

        tokio::spawn(async move {
            let clears_selection = query.clears_selection();
            let result = match query {
                Query::Term { field, value } => fetcher.fetch_by_term_value(field, value).await,
                Query::Page { url } => fetcher.fetch_by_url(url).await,
            };
            apply_query_result(&state, &issued, generation, clears_selection, result);
        })
    }
}

/// Apply one completed query to the shared state.
///
/// A stale generation means a newer query has been issued since this one;
/// its completion owns the state, so this one applies nothing.
fn apply_query_result(
    state: &StateHandle,
    issued: &AtomicU64,
    generation: u64,
    clears_selection: bool,
    result: Result<QueryResultSet, FetchError>,
) {
    if issued.load(Ordering::SeqCst) != generation {
        tracing::debug!(generation, "query superseded, dropping result");
        return;
    }

    match result {
        Ok(results) => {
            if clears_selection {
                state.clear_selection();
            }
            state.replace_results(results);
        }
        Err(error) => {
            // Failures are absorbed: log and leave the previous page up.
            tracing::warn!(%error, "catalog query failed");
        }
    }

    state.set_loading(false);
}

// =============================================================================
// Mock Fetcher for Testing
// =============================================================================


// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::mock::*;
    use super::*;
    use std::time::Duration;
    use vitrine_core::{PageInfo, Record, SearchField};

    fn set_of(titles: &[&str]) -> QueryResultSet {
        QueryResultSet::new(
            PageInfo::default(),
            titles.iter().map(|t| Record::titled(*t)).collect(),
        )
    }

    fn orchestrator_with(mock: MockFetcher, initial: QueryResultSet) -> (QueryOrchestrator, StateHandle) {
        let state = StateHandle::new(initial);
        let orchestrator = QueryOrchestrator::new(Arc::new(mock), state.clone());
        (orchestrator, state)
    }

    #[tokio::test]
    async fn test_loading_brackets_a_successful_query() {
        let mock = MockFetcher::new().with_results(set_of(&[]));
        let (orchestrator, state) = orchestrator_with(mock, set_of(&["Bowl"]));

        let handle = orchestrator.run_query(Query::term(SearchField::Culture, "Greek"));

        // Raised synchronously, before the fetch resolves.
        assert!(state.snapshot().loading);

        handle.await.unwrap();
        let after = state.snapshot();
        assert!(!after.loading);
        assert_eq!(after.results.len(), 0);
    }

    #[tokio::test]
    async fn test_failure_is_absorbed_and_keeps_the_old_page() {
        let mock = MockFetcher::new().with_failure("connection refused");
        let (orchestrator, state) = orchestrator_with(mock, set_of(&["Bowl"]));

        let handle = orchestrator.run_query(Query::term(SearchField::Culture, "Greek"));
        assert!(state.snapshot().loading);

        handle.await.unwrap();
        let after = state.snapshot();
        assert!(!after.loading);
        assert_eq!(after.results.records[0].title.as_deref(), Some("Bowl"));
    }

    #[tokio::test]
    async fn test_page_queries_hit_the_url_fetch() {
        let mock = MockFetcher::new().with_results(set_of(&["page two"]));
        let url_calls = mock.url_calls.clone();
        let (orchestrator, state) = orchestrator_with(mock, set_of(&["page one"]));

        orchestrator
            .run_query(Query::page("https://example.test/object?page=2"))
            .await
            .unwrap();

        assert_eq!(url_calls.lock().as_slice(), ["https://example.test/object?page=2"]);
        assert_eq!(
            state.snapshot().results.records[0].title.as_deref(),
            Some("page two")
        );
    }

    #[tokio::test]
    async fn test_term_value_reaches_the_collaborator_unchanged() {
        let mock = MockFetcher::new();
        let term_calls = mock.term_calls.clone();
        let (orchestrator, _state) = orchestrator_with(mock, QueryResultSet::default());

        orchestrator
            .run_query(Query::term(SearchField::Medium, "Graphite"))
            .await
            .unwrap();

        assert_eq!(
            term_calls.lock().as_slice(),
            [(SearchField::Medium, "Graphite".to_string())]
        );
    }

    #[tokio::test]
    async fn test_technique_link_lower_cases_only_the_wire_value() {
        let mock = MockFetcher::new();
        let term_calls = mock.term_calls.clone();
        let (orchestrator, _state) = orchestrator_with(mock, QueryResultSet::default());

        let link = crate::views::AttributeLink::technique("Etching");
        assert_eq!(link.display(), "Etching");
        orchestrator.run_query(link.to_query()).await.unwrap();

        assert_eq!(
            term_calls.lock().as_slice(),
            [(SearchField::Technique, "etching".to_string())]
        );
    }

    #[tokio::test]
    async fn test_term_query_clears_the_selection() {
        let mock = MockFetcher::new();
        let (orchestrator, state) = orchestrator_with(mock, set_of(&["Bowl"]));
        state.select_record(Record::titled("Bowl"));

        orchestrator
            .run_query(Query::term(SearchField::Culture, "Greek"))
            .await
            .unwrap();

        assert!(state.snapshot().selected.is_none());
    }

    #[tokio::test]
    async fn test_page_query_keeps_the_selection() {
        let mock = MockFetcher::new().with_results(set_of(&["page two"]));
        let (orchestrator, state) = orchestrator_with(mock, set_of(&["Bowl"]));
        state.select_record(Record::titled("Bowl"));

        orchestrator
            .run_query(Query::page("https://example.test/object?page=2"))
            .await
            .unwrap();

        let after = state.snapshot();
        assert_eq!(after.selected, Some(Record::titled("Bowl")));
        assert_eq!(after.results.records[0].title.as_deref(), Some("page two"));
    }

    #[tokio::test]
    async fn test_superseded_query_applies_nothing() {
        let mock = MockFetcher::new()
            .push_call(Duration::from_millis(50), Ok(set_of(&["slow"])))
            .push_call(Duration::ZERO, Ok(set_of(&["fast"])));
        let (orchestrator, state) = orchestrator_with(mock, QueryResultSet::default());

        let slow = orchestrator.run_query(Query::term(SearchField::Culture, "Greek"));
        let fast = orchestrator.run_query(Query::term(SearchField::Culture, "Roman"));

        fast.await.unwrap();
        slow.await.unwrap();

        let after = state.snapshot();
        assert!(!after.loading);
        assert_eq!(after.results.records[0].title.as_deref(), Some("fast"));
    }
}
