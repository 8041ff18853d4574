//! The host: where pages, block trees and graph metadata come from.
//!
//! The exporter never reads notes directly; it asks a [`Host`] three
//! questions, in a fixed order, and awaits each answer before moving on.
//! Two hosts ship with the crate:
//!
//! * [`graph::GraphHost`]: reads a graph directory on disk and parses its
//!   outline files with [`outline::parse_outline`]
//! * [`snapshot::SnapshotHost`]: replays a JSON dump of a host's answers
//!   (page, graph path, block tree), as produced by the host's plugin API

pub mod graph;
pub mod outline;
pub mod snapshot;

use crate::error::ExportError;
use crate::model::{Block, Graph, Page};
use async_trait::async_trait;

/// Queries the exporter makes against the host application.
///
/// Every method is a suspension point. Implementations report failures as
/// [`ExportError`]; the orchestrator does not retry them.
#[async_trait]
pub trait Host: Send + Sync {
    /// The page the user is looking at, or `None` when no page is open.
    async fn current_page(&self) -> Result<Option<Page>, ExportError>;

    /// The ordered block tree of the page with display name `page_name`.
    /// An empty page yields an empty vector.
    async fn page_blocks_tree(&self, page_name: &str) -> Result<Vec<Block>, ExportError>;

    /// Metadata of the graph the page belongs to.
    async fn current_graph(&self) -> Result<Graph, ExportError>;
}

pub use graph::GraphHost;
pub use snapshot::{Snapshot, SnapshotHost};
