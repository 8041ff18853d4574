//! User-facing status notices.
//!
//! The exporter tells the user two things: that there was nothing to export,
//! or which file it produced. Notices are fire-and-forget; a [`Notifier`]
//! cannot fail and its result is never awaited.

use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::{info, warn};

/// A short status message for the user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "level", content = "message", rename_all = "snake_case")]
pub enum Notice {
    Warning(String),
    Success(String),
}

impl Notice {
    /// Warning shown when no page is open.
    pub fn no_current_page() -> Self {
        Notice::Warning("⚠️ No current page found.".to_string())
    }

    /// Success notice naming the produced file.
    pub fn exported(filename: &str) -> Self {
        Notice::Success(format!("✅ Exported {filename}"))
    }

    pub fn message(&self) -> &str {
        match self {
            Notice::Warning(m) | Notice::Success(m) => m,
        }
    }

    pub fn is_warning(&self) -> bool {
        matches!(self, Notice::Warning(_))
    }
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

/// Displays notices to the user.
pub trait Notifier: Send + Sync {
    fn notify(&self, notice: Notice);
}

/// Routes notices into the `tracing` log: warnings at WARN, successes at
/// INFO.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn notify(&self, notice: Notice) {
        match notice {
            Notice::Warning(m) => warn!("{m}"),
            Notice::Success(m) => info!("{m}"),
        }
    }
}
