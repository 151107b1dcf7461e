//! State model for the catalog browser UI.

mod state;

pub use state::{CatalogState, Pane, StateHandle};
