//! Terminal frontend for the Vitrine catalog browser.
//!
//! This crate provides the view layer:
//! - The shared state container and its mutation handle
//! - The query orchestrator every search trigger runs through
//! - Result-list and record-detail views with clickable regions
//! - The application event loop

pub mod app;
pub mod hit;
pub mod model;
pub mod query;
pub mod theme;
pub mod views;

// Re-export commonly used types
pub use app::App;
pub use hit::{ClickAction, HitRegistry};
pub use model::{CatalogState, Pane, StateHandle};
pub use query::QueryOrchestrator;
pub use theme::Theme;
pub use views::AttributeLink;
