//! Flatten a block tree into an indented Markdown bullet list.
//!
//! Traversal is pre-order: a block's line is emitted before its children's,
//! children in the order given. That order is the reading order of the
//! exported document.
//!
//! Block content is never escaped. Whatever Markdown the user typed into a
//! block is what the renderer sees, so `**bold**`, links, images and inline
//! math all survive the round trip.

use crate::model::Block;

/// Indentation for one nesting level.
pub const INDENT_UNIT: &str = "  ";

/// List marker placed before every block's content.
pub const BULLET: &str = "- ";

/// Host-inserted property line left behind by folded blocks.
pub const COLLAPSED_MARKER: &str = "collapsed:: true";

/// Flatten `blocks` into Markdown, starting at nesting level `depth`.
///
/// Each block becomes `INDENT_UNIT * depth + "- " + content`; children follow
/// on the next line at `depth + 1`. Lines are joined by `\n` with no trailing
/// newline, and an empty slice yields an empty string.
pub fn flatten(blocks: &[Block], depth: usize) -> String {
    blocks
        .iter()
        .map(|block| {
            let mut line = format!("{}{}{}", INDENT_UNIT.repeat(depth), BULLET, block.content);
            if !block.children.is_empty() {
                line.push('\n');
                line.push_str(&flatten(&block.children, depth + 1));
            }
            line
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Remove the first occurrence of `marker` from the flattened document.
///
/// This is a plain textual cleanup over the whole document, not a
/// per-block property removal: only the first match anywhere is dropped and
/// the rest of the line (including its indentation) is kept.
pub fn strip_marker(markdown: &str, marker: &str) -> String {
    if marker.is_empty() {
        return markdown.to_string();
    }
    markdown.replacen(marker, "", 1)
}

/// [`flatten`] from the root followed by [`strip_marker`] when a marker is
/// configured.
pub fn flatten_page(blocks: &[Block], collapsed_marker: Option<&str>) -> String {
    let markdown = flatten(blocks, 0);
    match collapsed_marker {
        Some(marker) => strip_marker(&markdown, marker),
        None => markdown,
    }
}
