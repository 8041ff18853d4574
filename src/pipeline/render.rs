//! Markdown → HTML rendering.
//!
//! The pipeline only needs `render(markdown) -> html`, so the renderer sits
//! behind the [`Renderer`] trait. [`MarkdownRenderer`] is the built-in
//! implementation on top of `pulldown-cmark`, set up to behave like a stock
//! CommonMark renderer with GFM tables and strikethrough, and with raw HTML
//! in block content shown as text rather than injected into the page.

use crate::config::MarkdownOptions;
use crate::error::ExportError;
use pulldown_cmark::{html, Event, Options, Parser};
use tracing::debug;

/// Pure Markdown-to-HTML conversion.
pub trait Renderer: Send + Sync {
    /// Render a Markdown document to an HTML fragment.
    fn render(&self, markdown: &str) -> Result<String, ExportError>;
}

/// `pulldown-cmark` backed renderer.
#[derive(Debug, Clone, Default)]
pub struct MarkdownRenderer {
    options: MarkdownOptions,
}

impl MarkdownRenderer {
    pub fn new(options: MarkdownOptions) -> Self {
        Self { options }
    }

    fn parser_options(&self) -> Options {
        let mut options = Options::empty();
        if self.options.tables {
            options.insert(Options::ENABLE_TABLES);
        }
        if self.options.strikethrough {
            options.insert(Options::ENABLE_STRIKETHROUGH);
        }
        options
    }
}

impl Renderer for MarkdownRenderer {
    fn render(&self, markdown: &str) -> Result<String, ExportError> {
        let parser = Parser::new_ext(markdown, self.parser_options());
        let raw_html = self.options.raw_html;
        let events = parser.map(move |event| match event {
            Event::Html(text) | Event::InlineHtml(text) if !raw_html => Event::Text(text),
            other => other,
        });

        let mut out = String::with_capacity(markdown.len() * 3 / 2);
        html::push_html(&mut out, events);
        debug!(
            markdown_bytes = markdown.len(),
            html_bytes = out.len(),
            "Rendered Markdown"
        );
        Ok(out)
    }
}
