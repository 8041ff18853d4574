//! Progress-callback trait for per-step export events.
//!
//! Inject an [`Arc<dyn ExportProgressCallback>`] via
//! [`crate::config::ExportConfigBuilder::progress_callback`] to follow the
//! orchestrator through its fixed sequence of steps. The CLI uses this to
//! drive a spinner; tests use it to check step ordering.
//!
//! # Example
//!
//! ```rust
//! use outline2html::{ExportConfig, ExportProgressCallback, Step};
//! use std::sync::Arc;
//!
//! struct PrintSteps;
//!
//! impl ExportProgressCallback for PrintSteps {
//!     fn on_step(&self, step: Step) {
//!         eprintln!("→ {}", step.label());
//!     }
//! }
//!
//! let config = ExportConfig::builder()
//!     .progress_callback(Arc::new(PrintSteps))
//!     .build()
//!     .unwrap();
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

/// One step of the export, in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Step {
    ResolvePage,
    FetchTree,
    Flatten,
    Render,
    RewriteAssets,
    Assemble,
    Persist,
    Report,
}

impl Step {
    /// All steps in the order the orchestrator runs them.
    pub const ALL: [Step; 8] = [
        Step::ResolvePage,
        Step::FetchTree,
        Step::Flatten,
        Step::Render,
        Step::RewriteAssets,
        Step::Assemble,
        Step::Persist,
        Step::Report,
    ];

    /// Short human-readable label.
    pub fn label(self) -> &'static str {
        match self {
            Step::ResolvePage => "resolving current page",
            Step::FetchTree => "fetching block tree",
            Step::Flatten => "flattening outline",
            Step::Render => "rendering Markdown",
            Step::RewriteAssets => "rewriting asset links",
            Step::Assemble => "assembling document",
            Step::Persist => "saving",
            Step::Report => "reporting",
        }
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Called by the orchestrator as it moves through the export.
///
/// All methods have default no-op implementations so callers only override
/// what they care about.
pub trait ExportProgressCallback: Send + Sync {
    /// Called when `step` starts.
    fn on_step(&self, step: Step) {
        let _ = step;
    }

    /// Called once the document has been saved.
    ///
    /// # Arguments
    /// * `filename`: name handed to the sink
    /// * `bytes`: byte length of the HTML document
    fn on_export_complete(&self, filename: &str, bytes: usize) {
        let _ = (filename, bytes);
    }
}

/// A no-op implementation for callers that don't need progress events.
pub struct NoopProgressCallback;

impl ExportProgressCallback for NoopProgressCallback {}

/// Convenience alias matching the type stored in [`crate::config::ExportConfig`].
pub type ProgressCallback = Arc<dyn ExportProgressCallback>;
