//! Export orchestration: current page in, saved HTML document out.
//!
//! [`convert`] runs the fixed sequence
//!
//! ```text
//! resolve page → fetch tree → flatten → render → rewrite assets
//!              → assemble → persist → report
//! ```
//!
//! one step at a time. Host queries and the save are awaited in order and
//! nothing runs in parallel. There is no retry and no partial success: any
//! failure after the page is resolved returns `Err` and nothing is saved or
//! reported.

use crate::config::ExportConfig;
use crate::error::ExportError;
use crate::host::Host;
use crate::model::{Block, Graph, Outcome, RenderedDocument};
use crate::notify::{Notice, Notifier};
use crate::pipeline::render::{MarkdownRenderer, Renderer};
use crate::pipeline::{assets, document, flatten};
use crate::progress::Step;
use crate::sink::Sink;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info};

/// The external collaborators one export talks to.
#[derive(Clone)]
pub struct ExportContext {
    pub host: Arc<dyn Host>,
    pub sink: Arc<dyn Sink>,
    pub notifier: Arc<dyn Notifier>,
}

impl ExportContext {
    pub fn new(host: Arc<dyn Host>, sink: Arc<dyn Sink>, notifier: Arc<dyn Notifier>) -> Self {
        Self {
            host,
            sink,
            notifier,
        }
    }
}

/// Export the host's current page as a standalone HTML document.
///
/// # Returns
/// * `Ok(Outcome::Exported { .. })` once the document is saved and the
///   success notice sent.
/// * `Ok(Outcome::NoCurrentPage)` when no page is open; a warning notice is
///   sent and the sink is never called.
///
/// # Errors
/// Host, render and save failures are returned unchanged.
pub async fn convert(ctx: &ExportContext, config: &ExportConfig) -> Result<Outcome, ExportError> {
    let start = Instant::now();
    let renderer = resolve_renderer(config);

    // ── Step 1: Resolve page ─────────────────────────────────────────────
    step(config, Step::ResolvePage);
    let Some(page) = ctx.host.current_page().await? else {
        info!("No current page; nothing to export");
        ctx.notifier.notify(Notice::no_current_page());
        return Ok(Outcome::NoCurrentPage);
    };
    let title = page.original_name.as_str();
    info!("Starting export: {}", title);

    // ── Step 2: Fetch tree ───────────────────────────────────────────────
    step(config, Step::FetchTree);
    let blocks = ctx.host.page_blocks_tree(title).await?;
    debug!(
        "Fetched {} top-level blocks ({} total)",
        blocks.len(),
        crate::model::block_count(&blocks)
    );

    // ── Step 3: Flatten ──────────────────────────────────────────────────
    step(config, Step::Flatten);
    let markdown = page_markdown(&blocks, config);

    // ── Step 4: Render ───────────────────────────────────────────────────
    step(config, Step::Render);
    let body = renderer.render(&markdown)?;

    // ── Step 5: Rewrite assets ───────────────────────────────────────────
    step(config, Step::RewriteAssets);
    let graph = ctx.host.current_graph().await?;
    let body = rewrite_assets(&body, &graph, config);

    // ── Step 6: Assemble ─────────────────────────────────────────────────
    step(config, Step::Assemble);
    let doc = RenderedDocument {
        filename: output_filename(title),
        content: document::assemble(title, &body),
    };

    // ── Step 7: Persist ──────────────────────────────────────────────────
    step(config, Step::Persist);
    ctx.sink.save(&doc).await?;

    // ── Step 8: Report ───────────────────────────────────────────────────
    step(config, Step::Report);
    let bytes = doc.content.len();
    ctx.notifier.notify(Notice::exported(&doc.filename));
    if let Some(ref cb) = config.progress_callback {
        cb.on_export_complete(&doc.filename, bytes);
    }
    info!(
        "Export complete: {} ({} bytes, {}ms)",
        doc.filename,
        bytes,
        start.elapsed().as_millis()
    );

    Ok(Outcome::Exported {
        filename: doc.filename,
        bytes,
    })
}

/// Synchronous wrapper around [`convert`].
///
/// Creates a temporary tokio runtime internally.
pub fn convert_sync(ctx: &ExportContext, config: &ExportConfig) -> Result<Outcome, ExportError> {
    tokio::runtime::Runtime::new()
        .map_err(|e| ExportError::Internal(format!("Failed to create tokio runtime: {}", e)))?
        .block_on(convert(ctx, config))
}

/// Build the document for an already-fetched page without touching a host
/// or sink.
///
/// Runs flatten → render → rewrite → assemble with the same rules as
/// [`convert`].
pub fn render_page(
    title: &str,
    blocks: &[Block],
    graph: &Graph,
    config: &ExportConfig,
) -> Result<RenderedDocument, ExportError> {
    let markdown = page_markdown(blocks, config);
    let body = resolve_renderer(config).render(&markdown)?;
    let body = rewrite_assets(&body, graph, config);
    Ok(RenderedDocument {
        filename: output_filename(title),
        content: document::assemble(title, &body),
    })
}

/// Output file name for a page: exactly `<page name>.html`.
pub fn output_filename(page_name: &str) -> String {
    format!("{page_name}.html")
}

// ── Internal helpers ─────────────────────────────────────────────────────

fn step(config: &ExportConfig, step: Step) {
    debug!("Step: {}", step);
    if let Some(ref cb) = config.progress_callback {
        cb.on_step(step);
    }
}

/// Use the configured renderer, or build the default one from
/// `config.markdown`.
fn resolve_renderer(config: &ExportConfig) -> Arc<dyn Renderer> {
    match config.renderer {
        Some(ref renderer) => Arc::clone(renderer),
        None => Arc::new(MarkdownRenderer::new(config.markdown)),
    }
}

fn page_markdown(blocks: &[Block], config: &ExportConfig) -> String {
    flatten::flatten_page(blocks, config.collapsed_marker.as_deref())
}

fn rewrite_assets(body: &str, graph: &Graph, config: &ExportConfig) -> String {
    let asset_dir = assets::asset_dir_for(&graph.path, &config.assets_dir_name);
    assets::rewrite_asset_urls(body, &asset_dir)
}
