//! # outline2html
//!
//! Export an outline page (a tree of nested text blocks) as one standalone
//! HTML file.
//!
//! ## Why this crate?
//!
//! Outliners store a page as nested blocks, and their own HTML export
//! depends on the app being around to serve assets and typeset math. This
//! crate turns a page into a single file that opens anywhere: the outline
//! becomes nested Markdown lists, images pointing at the graph's `assets/`
//! folder become absolute `file:///` URLs, and MathJax is bootstrapped from
//! a CDN so `$…$` formulas typeset in the browser.
//!
//! ## Pipeline Overview
//!
//! ```text
//! Host
//!  │
//!  ├─ 1. Page     ask the host for the current page (none → warning, stop)
//!  ├─ 2. Tree     fetch the page's block tree
//!  ├─ 3. Flatten  pre-order walk → indented "- " bullets
//!  ├─ 4. Render   Markdown → HTML (pulldown-cmark)
//!  ├─ 5. Assets   ../assets/x → file:///<graph>/assets/x
//!  ├─ 6. Document title + MathJax + style sheet around the body
//!  ├─ 7. Save     <page name>.html through the sink
//!  └─ 8. Report   success notice
//! ```
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use outline2html::{convert, ExportConfig, ExportContext, FileSink, GraphHost, TracingNotifier};
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let host = GraphHost::open("/home/me/notes")?.with_current_page(Some("Reading List"));
//!     let ctx = ExportContext::new(
//!         Arc::new(host),
//!         Arc::new(FileSink::new("exports")),
//!         Arc::new(TracingNotifier),
//!     );
//!     let outcome = convert(&ctx, &ExportConfig::default()).await?;
//!     println!("{outcome:?}");
//!     Ok(())
//! }
//! ```
//!
//! ## Feature Flags
//!
//! | Feature | Default | Description |
//! |---------|---------|-------------|
//! | `cli`   | on      | Enables the `outline2html` binary (clap + anyhow + tracing-subscriber + indicatif) |
//!
//! Disable `cli` when using only the library:
//! ```toml
//! outline2html = { version = "0.1", default-features = false }
//! ```

// ── Modules ──────────────────────────────────────────────────────────────

pub mod action;
pub mod config;
pub mod convert;
pub mod error;
pub mod host;
pub mod model;
pub mod notify;
pub mod pipeline;
pub mod progress;
pub mod sink;

// ── Re-exports ───────────────────────────────────────────────────────────

pub use action::{setup, ActionRegistry, Slot, Toolbar, UiItem, EXPORT_HTML};
pub use config::{ExportConfig, ExportConfigBuilder, MarkdownOptions};
pub use convert::{convert, convert_sync, output_filename, render_page, ExportContext};
pub use error::ExportError;
pub use host::{GraphHost, Host, Snapshot, SnapshotHost};
pub use model::{Block, Graph, Outcome, Page, RenderedDocument};
pub use notify::{Notice, Notifier, TracingNotifier};
pub use pipeline::assets::{asset_dir_for, rewrite_asset_urls};
pub use pipeline::document::assemble;
pub use pipeline::flatten::{flatten, flatten_page};
pub use pipeline::render::{MarkdownRenderer, Renderer};
pub use progress::{ExportProgressCallback, NoopProgressCallback, ProgressCallback, Step};
pub use sink::{FileSink, Sink, StdoutSink};
