//! Pipeline stages for outline-to-HTML export.
//!
//! Each submodule implements exactly one transformation step. None of them
//! talk to the host or the file system; the orchestrator in
//! [`crate::convert`] feeds them and collects their output.
//!
//! ## Data Flow
//!
//! ```text
//! blocks ──▶ flatten ──▶ render ──▶ assets ──▶ document
//! (tree)     (Markdown)  (HTML)     (file:///) (standalone page)
//! ```
//!
//! 1. [`flatten`]: pre-order walk emitting indented `- ` bullets, then the
//!    collapsed-marker cleanup
//! 2. [`render`]: Markdown to HTML through the [`render::Renderer`] seam
//! 3. [`assets`]: `../assets/x` image sources become absolute file URLs
//! 4. [`document`]: title, MathJax bootstrap and style sheet around the body

pub mod assets;
pub mod document;
pub mod flatten;
pub mod render;
