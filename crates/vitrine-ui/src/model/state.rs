//! Shared UI state for the catalog browser.
//!
//! The three slots every view reads — the current result set, the selected
//! record, and the loading flag — live in one `CatalogState` container.
//! Views receive a snapshot per frame plus a [`StateHandle`] for requesting
//! mutations; each slot has a single defined setter, and every mutation
//! bumps a `tokio::sync::watch` channel so the event loop redraws without
//! polling.

use std::sync::Arc;

use parking_lot::Mutex;
use tokio::sync::watch;
use vitrine_core::{QueryResultSet, Record};

// =============================================================================
// Panes
// =============================================================================

/// Which pane owns keyboard input.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Pane {
    /// The paginated result list.
    #[default]
    Results,
    /// The selected-record detail view.
    Detail,
}

impl Pane {
    /// The other pane.
    pub fn toggled(self) -> Self {
        match self {
            Pane::Results => Pane::Detail,
            Pane::Detail => Pane::Results,
        }
    }
}

// =============================================================================
// Catalog State
// =============================================================================

/// Full UI state, cloned out as a snapshot for rendering.
#[derive(Debug, Clone, Default)]
pub struct CatalogState {
    /// Current page of results plus pagination cursors.
    pub results: QueryResultSet,

    /// Record shown in the detail pane, if any.
    pub selected: Option<Record>,

    /// Whether a fetch started by this UI is in flight.
    pub loading: bool,

    /// Pane with keyboard focus.
    pub focus: Pane,

    /// Cursor position in the result list.
    pub cursor_index: usize,

    /// Cursor position over the detail pane's attribute links.
    pub link_index: usize,
}

impl CatalogState {
    /// Get the record under the result-list cursor.
    pub fn cursor_record(&self) -> Option<&Record> {
        self.results.records.get(self.cursor_index)
    }
}

// =============================================================================
// State Handle
// =============================================================================

/// Shared handle to the catalog state.
///
/// Cheap to clone; all clones point at the same state. Locks are held only
/// for the duration of one setter or snapshot, never across an await.
#[derive(Clone)]
pub struct StateHandle {
    inner: Arc<Mutex<CatalogState>>,
    notify: Arc<watch::Sender<u64>>,
}

impl StateHandle {
    /// Create a handle around an initial result set.
    ///
    /// The container supplies the first page (its default search) before
    /// the first render; nothing here fetches.
    pub fn new(initial: QueryResultSet) -> Self {
        let state = CatalogState {
            results: initial,
            ..CatalogState::default()
        };
        let (notify, _) = watch::channel(0);
        Self {
            inner: Arc::new(Mutex::new(state)),
            notify: Arc::new(notify),
        }
    }

    /// Clone the current state for rendering.
    pub fn snapshot(&self) -> CatalogState {
        self.inner.lock().clone()
    }

    /// Subscribe to change notifications.
    pub fn subscribe(&self) -> watch::Receiver<u64> {
        self.notify.subscribe()
    }

    /// Run one mutation and notify subscribers.
    fn update(&self, mutate: impl FnOnce(&mut CatalogState)) {
        {
            let mut state = self.inner.lock();
            mutate(&mut state);
        }
        self.notify.send_modify(|version| *version += 1);
    }

    // -------------------------------------------------------------------------
    // Slot setters
    // -------------------------------------------------------------------------

    /// Replace the result set wholesale. The only writer of this slot.
    ///
    /// The list cursor restarts at the top of the new page.
    pub fn replace_results(&self, results: QueryResultSet) {
        self.update(|state| {
            state.results = results;
            state.cursor_index = 0;
        });
    }

    /// Set the loading flag.
    pub fn set_loading(&self, loading: bool) {
        self.update(|state| state.loading = loading);
    }

    /// Promote one record to the detail pane. Pure state, no fetch.
    pub fn select_record(&self, record: Record) {
        self.update(|state| {
            state.selected = Some(record);
            state.link_index = 0;
        });
    }

    /// Clear the detail pane.
    pub fn clear_selection(&self) {
        self.update(|state| {
            state.selected = None;
            state.link_index = 0;
        });
    }

    // -------------------------------------------------------------------------
    // Navigation
    // -------------------------------------------------------------------------

    /// Move keyboard focus to the given pane.
    pub fn set_focus(&self, focus: Pane) {
        self.update(|state| state.focus = focus);
    }

    /// Move the result-list cursor up.
    pub fn cursor_up(&self) {
        self.update(|state| {
            if state.cursor_index > 0 {
                state.cursor_index -= 1;
            }
        });
    }

    /// Move the result-list cursor down.
    pub fn cursor_down(&self) {
        self.update(|state| {
            if state.cursor_index + 1 < state.results.records.len() {
                state.cursor_index += 1;
            }
        });
    }

    /// Move the link cursor up.
    pub fn link_up(&self) {
        self.update(|state| {
            if state.link_index > 0 {
                state.link_index -= 1;
            }
        });
    }

    /// Move the link cursor down. `link_count` is the number of links the
    /// detail pane currently renders.
    pub fn link_down(&self, link_count: usize) {
        self.update(|state| {
            if state.link_index + 1 < link_count {
                state.link_index += 1;
            }
        });
    }
}

// =============================================================================
// Tests
// =============================================================================
