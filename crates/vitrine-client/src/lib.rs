//! Query API collaborator for the Vitrine catalog browser.
//!
//! This crate provides the fetch side of the view layer's contract:
//! - The `Fetcher` trait the UI consumes
//! - `HttpFetcher`, the real implementation against the catalog query API

mod fetcher;
mod http;

pub use fetcher::Fetcher;
pub use http::HttpFetcher;
