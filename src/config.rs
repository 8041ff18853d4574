//! Configuration types for outline-to-HTML export.
//!
//! All export behaviour is controlled through [`ExportConfig`], built via
//! its [`ExportConfigBuilder`]. The defaults reproduce the stock export: the
//! `assets` folder under the graph root, the `collapsed:: true` cleanup, and
//! a CommonMark renderer with tables and strikethrough.

use crate::error::ExportError;
use crate::pipeline::flatten::COLLAPSED_MARKER;
use crate::pipeline::render::Renderer;
use crate::progress::ProgressCallback;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

/// Configuration for one export.
///
/// Built via [`ExportConfig::builder()`] or using [`ExportConfig::default()`].
///
/// # Example
/// ```rust
/// use outline2html::ExportConfig;
///
/// let config = ExportConfig::builder()
///     .assets_dir_name("media")
///     .collapsed_marker(None::<String>)
///     .build()
///     .unwrap();
/// assert_eq!(config.assets_dir_name, "media");
/// ```
#[derive(Clone)]
pub struct ExportConfig {
    /// Folder under the graph root that `../assets/` image links point into.
    /// Default: `"assets"`.
    pub assets_dir_name: String,

    /// Text removed (first occurrence only) from the flattened Markdown.
    /// Default: `Some("collapsed:: true")`. `None` disables the cleanup.
    pub collapsed_marker: Option<String>,

    /// Options for the built-in Markdown renderer.
    pub markdown: MarkdownOptions,

    /// Pre-constructed renderer. Takes precedence over `markdown`.
    pub renderer: Option<Arc<dyn Renderer>>,

    /// Optional per-step progress events.
    pub progress_callback: Option<ProgressCallback>,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            assets_dir_name: "assets".to_string(),
            collapsed_marker: Some(COLLAPSED_MARKER.to_string()),
            markdown: MarkdownOptions::default(),
            renderer: None,
            progress_callback: None,
        }
    }
}

impl fmt::Debug for ExportConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ExportConfig")
            .field("assets_dir_name", &self.assets_dir_name)
            .field("collapsed_marker", &self.collapsed_marker)
            .field("markdown", &self.markdown)
            .field("renderer", &self.renderer.as_ref().map(|_| "<dyn Renderer>"))
            .field(
                "progress_callback",
                &self
                    .progress_callback
                    .as_ref()
                    .map(|_| "<dyn ExportProgressCallback>"),
            )
            .finish()
    }
}

impl ExportConfig {
    /// Create a new builder for `ExportConfig`.
    pub fn builder() -> ExportConfigBuilder {
        ExportConfigBuilder {
            config: Self::default(),
        }
    }
}

/// Builder for [`ExportConfig`].
#[derive(Debug)]
pub struct ExportConfigBuilder {
    config: ExportConfig,
}

impl ExportConfigBuilder {
    pub fn assets_dir_name(mut self, name: impl Into<String>) -> Self {
        self.config.assets_dir_name = name.into();
        self
    }

    pub fn collapsed_marker(mut self, marker: Option<impl Into<String>>) -> Self {
        self.config.collapsed_marker = marker.map(Into::into);
        self
    }

    pub fn markdown(mut self, options: MarkdownOptions) -> Self {
        self.config.markdown = options;
        self
    }

    pub fn renderer(mut self, renderer: Arc<dyn Renderer>) -> Self {
        self.config.renderer = Some(renderer);
        self
    }

    pub fn progress_callback(mut self, cb: ProgressCallback) -> Self {
        self.config.progress_callback = Some(cb);
        self
    }

    /// Build the configuration, validating constraints.
    pub fn build(mut self) -> Result<ExportConfig, ExportError> {
        let name = self.config.assets_dir_name.trim().to_string();
        if name.is_empty() {
            return Err(ExportError::InvalidConfig(
                "assets directory name must not be empty".into(),
            ));
        }
        if name.contains(['/', '\\']) {
            return Err(ExportError::InvalidConfig(format!(
                "assets directory name must be a single folder, got '{name}'"
            )));
        }
        self.config.assets_dir_name = name;

        let c = &self.config;
        if matches!(c.collapsed_marker.as_deref(), Some("")) {
            return Err(ExportError::InvalidConfig(
                "collapsed marker must not be empty (use None to disable)".into(),
            ));
        }
        Ok(self.config)
    }
}

/// Switches for the built-in Markdown renderer.
///
/// The defaults match a stock CommonMark renderer with the GFM table and
/// strikethrough extensions, and raw HTML treated as text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MarkdownOptions {
    /// GFM pipe tables. Default: true.
    pub tables: bool,
    /// `~~strike~~`. Default: true.
    pub strikethrough: bool,
    /// Pass raw HTML in block content through unescaped. Default: false.
    pub raw_html: bool,
}

impl Default for MarkdownOptions {
    fn default() -> Self {
        Self {
            tables: true,
            strikethrough: true,
            raw_html: false,
        }
    }
}
