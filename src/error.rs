//! Error types for the outline2html library.
//!
//! Everything that can stop an export is an [`ExportError`] and is returned
//! as `Err` from the `convert*` entry points. There is no per-step recovery:
//! a failed host call, render or save aborts the whole export and no partial
//! file is written.
//!
//! "No current page" is deliberately *not* an error. It is the one expected
//! terminal state of an export (the user has not opened a page yet) and is
//! reported as [`crate::model::Outcome::NoCurrentPage`] after a warning
//! notice.

use std::path::PathBuf;
use thiserror::Error;

/// All fatal errors returned by the outline2html library.
#[derive(Debug, Error)]
pub enum ExportError {
    // ── Host errors ───────────────────────────────────────────────────────
    /// The page has no backing file in the graph.
    #[error("Page '{name}' not found in graph '{graph}'\nCheck the page name and that the graph has a pages/ directory.")]
    PageNotFound { name: String, graph: PathBuf },

    /// A host query failed (tree fetch, graph fetch, page lookup).
    #[error("Host call '{operation}' failed: {detail}")]
    HostCall { operation: String, detail: String },

    /// The graph directory does not exist or is not a directory.
    #[error("Graph directory not found: '{path}'")]
    GraphNotFound { path: PathBuf },

    /// A snapshot file could not be parsed.
    #[error("Invalid snapshot '{path}': {source}")]
    InvalidSnapshot {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// Reading a host-side file failed.
    #[error("Failed to read '{path}': {source}")]
    ReadFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // ── Render errors ─────────────────────────────────────────────────────
    /// The Markdown renderer failed.
    #[error("Markdown rendering failed: {0}")]
    RenderFailed(String),

    // ── Output errors ─────────────────────────────────────────────────────
    /// Could not create or write the output HTML file.
    #[error("Failed to write output file '{path}': {source}")]
    OutputWriteFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // ── Config errors ─────────────────────────────────────────────────────
    /// Builder validation failed.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// A UI action was registered twice or dispatched without registration.
    #[error("Action '{key}': {reason}")]
    Action { key: String, reason: String },

    // ── Catch-all ─────────────────────────────────────────────────────────
    /// Unexpected internal error.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl ExportError {
    /// Shorthand for a [`ExportError::HostCall`] failure.
    pub fn host(operation: impl Into<String>, detail: impl std::fmt::Display) -> Self {
        ExportError::HostCall {
            operation: operation.into(),
            detail: detail.to_string(),
        }
    }
}
