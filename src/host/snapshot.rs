//! Snapshot host: replay a JSON dump of the host's answers.
//!
//! A snapshot captures what the note app's plugin API returned for the
//! three host queries, in the same field shape:
//!
//! ```json
//! {
//!   "page":   { "originalName": "Test" },
//!   "graph":  { "path": "/home/me/notes" },
//!   "blocks": [ { "content": "A", "children": [ { "content": "B" } ] } ]
//! }
//! ```
//!
//! `page` may be `null` (no page open). `blocks` may be `[]` for an empty
//! page; a `null` or missing tree is a failed host call, as it is in the app.

use crate::error::ExportError;
use crate::host::Host;
use crate::model::{Block, Graph, Page};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::debug;

/// Serialised host answers for one export.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    #[serde(default)]
    pub page: Option<Page>,
    pub graph: Graph,
    #[serde(default)]
    pub blocks: Option<Vec<Block>>,
}

/// Host answering from a [`Snapshot`].
#[derive(Debug, Clone)]
pub struct SnapshotHost {
    snapshot: Snapshot,
}

impl SnapshotHost {
    pub fn new(snapshot: Snapshot) -> Self {
        Self { snapshot }
    }

    /// Parse a snapshot from JSON text. `origin` names the source in errors.
    pub fn from_json(json: &str, origin: impl AsRef<Path>) -> Result<Self, ExportError> {
        let snapshot =
            serde_json::from_str(json).map_err(|e| ExportError::InvalidSnapshot {
                path: origin.as_ref().to_path_buf(),
                source: e,
            })?;
        Ok(Self::new(snapshot))
    }

    /// Read and parse a snapshot file.
    pub async fn load(path: impl AsRef<Path>) -> Result<Self, ExportError> {
        let path = path.as_ref();
        let json = tokio::fs::read_to_string(path)
            .await
            .map_err(|e| ExportError::ReadFailed {
                path: path.to_path_buf(),
                source: e,
            })?;
        debug!("Loaded snapshot: {} ({} bytes)", path.display(), json.len());
        Self::from_json(&json, path)
    }

    pub fn snapshot(&self) -> &Snapshot {
        &self.snapshot
    }
}

#[async_trait]
impl Host for SnapshotHost {
    async fn current_page(&self) -> Result<Option<Page>, ExportError> {
        Ok(self.snapshot.page.clone())
    }

    async fn page_blocks_tree(&self, page_name: &str) -> Result<Vec<Block>, ExportError> {
        if let Some(page) = &self.snapshot.page {
            if page.original_name != page_name {
                return Err(ExportError::host(
                    "page_blocks_tree",
                    format!(
                        "snapshot holds page '{}', not '{}'",
                        page.original_name, page_name
                    ),
                ));
            }
        }
        self.snapshot
            .blocks
            .clone()
            .ok_or_else(|| ExportError::host("page_blocks_tree", "snapshot has no block tree"))
    }

    async fn current_graph(&self) -> Result<Graph, ExportError> {
        Ok(self.snapshot.graph.clone())
    }
}
