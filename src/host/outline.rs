//! Parse an outline file (one page of bullets) into a block tree.
//!
//! Page files are Markdown bullet lists. A line whose first non-blank
//! characters are `- ` (or a lone `-`) starts a block; its nesting comes
//! from its indentation relative to the bullets above it, so tabs, two-space
//! and four-space indents all work as long as a file is consistent.
//! Any other line continues the block above it, keeping its own indentation
//! past the block's content column. Lines before the first bullet (usually
//! `key:: value` page properties) form a leading pre-block.
//!
//! Block text is kept exactly as written, including property lines such as
//! `collapsed:: true`; cleaning those up is the exporter's job.

use crate::model::Block;

/// Columns a tab advances when measuring indentation.
const TAB_WIDTH: usize = 4;

/// Parse outline text into top-level blocks.
pub fn parse_outline(text: &str) -> Vec<Block> {
    let mut roots: Vec<Block> = Vec::new();
    // Open blocks from the root down, with the column of their bullet.
    let mut stack: Vec<(usize, Block)> = Vec::new();
    let mut preamble: Vec<&str> = Vec::new();
    let mut seen_bullet = false;

    for line in text.lines() {
        let (indent, rest) = split_indent(line);

        if let Some(content) = bullet_content(rest) {
            if !seen_bullet {
                seen_bullet = true;
                if let Some(pre) = preamble_block(&preamble) {
                    roots.push(pre);
                }
            }
            while stack.last().is_some_and(|(col, _)| *col >= indent) {
                if let Some((_, done)) = stack.pop() {
                    attach(&mut stack, &mut roots, done);
                }
            }
            stack.push((indent, Block::leaf(content)));
            continue;
        }

        match stack.last_mut() {
            Some((col, block)) => {
                block.content.push('\n');
                block.content.push_str(strip_columns(line, *col + 2));
            }
            None => preamble.push(line),
        }
    }

    if !seen_bullet {
        if let Some(pre) = preamble_block(&preamble) {
            roots.push(pre);
        }
    }

    while let Some((_, done)) = stack.pop() {
        attach(&mut stack, &mut roots, done);
    }

    trim_trailing_lines(&mut roots);
    roots
}

fn attach(stack: &mut [(usize, Block)], roots: &mut Vec<Block>, block: Block) {
    match stack.last_mut() {
        Some((_, parent)) => parent.children.push(block),
        None => roots.push(block),
    }
}

/// Leading indentation width in columns, and the rest of the line.
fn split_indent(line: &str) -> (usize, &str) {
    let mut cols = 0;
    for (i, ch) in line.char_indices() {
        match ch {
            ' ' => cols += 1,
            '\t' => cols += TAB_WIDTH,
            _ => return (cols, &line[i..]),
        }
    }
    (cols, "")
}

fn bullet_content(rest: &str) -> Option<&str> {
    if rest == "-" {
        Some("")
    } else {
        rest.strip_prefix("- ")
    }
}

/// Drop up to `cols` columns of leading whitespace.
fn strip_columns(line: &str, cols: usize) -> &str {
    let mut seen = 0;
    for (i, ch) in line.char_indices() {
        if seen >= cols {
            return &line[i..];
        }
        match ch {
            ' ' => seen += 1,
            '\t' => seen += TAB_WIDTH,
            _ => return &line[i..],
        }
    }
    ""
}

fn preamble_block(lines: &[&str]) -> Option<Block> {
    let text = lines.join("\n");
    let text = text.trim();
    (!text.is_empty()).then(|| Block::leaf(text))
}

fn trim_trailing_lines(blocks: &mut [Block]) {
    for block in blocks {
        let kept = block.content.trim_end_matches(['\n', ' ', '\t']).len();
        block.content.truncate(kept);
        trim_trailing_lines(&mut block.children);
    }
}
