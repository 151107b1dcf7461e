//! Error types for the Vitrine catalog browser.

use thiserror::Error;

/// Fetch collaborator errors.
///
/// The view layer absorbs all of these after logging; the previous result
/// set stays on screen.
#[derive(Debug, Error)]
pub enum FetchError {
    /// Non-success HTTP status from the query API.
    #[error("HTTP status {status}")]
    Http { status: u16 },

    /// Transport-level failure (unreachable host, connection refused, ...).
    #[error("network error: {0}")]
    Network(String),

    /// Response payload could not be decoded.
    #[error("parse error: {0}")]
    Parse(String),

    /// Request timed out.
    #[error("request timed out")]
    Timeout,
}

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// No config directory found.
    #[error("Config directory not found")]
    NoConfigDir,

    /// IO error.
    #[error("IO error: {0}")]
    Io(String),

    /// Parse error.
    #[error("Parse error: {0}")]
    Parse(String),
}
