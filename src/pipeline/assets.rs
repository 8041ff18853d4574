//! Rewrite relative image references into absolute `file:///` URLs.
//!
//! Inside the host, `../assets/foo.png` resolves against a virtual asset
//! root. An exported file opened straight from disk has no such root, so
//! every image pointing there is repointed at `<graph>/assets/foo.png`.
//!
//! This is a textual pattern match over the rendered HTML, not an HTML
//! parse. It only touches `<img>` tags whose `src` is literally
//! `../assets/<name>`; anything else (absolute URLs, other relative paths,
//! tags without `src`, unbalanced quotes) passes through byte-identical.
//! Already-rewritten `file:///` URLs no longer match, so the rewrite is
//! idempotent.

use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use tracing::debug;

/// Relative prefix images use to reach the graph's asset folder.
pub const RELATIVE_ASSET_PREFIX: &str = "../assets/";

static RE_ASSET_IMG: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"<img\s+([^>]*?)src=["']\.\./assets/([^"']+)["']([^>]*)>"#)
        .expect("asset image pattern is valid")
});

/// Asset directory for a graph root: `<graph_path>/<assets_dir_name>` with
/// backslashes turned into forward slashes.
pub fn asset_dir_for(graph_path: &str, assets_dir_name: &str) -> String {
    format!("{graph_path}/{assets_dir_name}").replace('\\', "/")
}

/// Replace every `src="../assets/<file>"` on an `<img>` tag with
/// `src="file:///<asset_dir>/<file>"`.
///
/// Attributes before and after `src` keep their order and spacing; the
/// whitespace between `<img` and the first attribute collapses to a single
/// space and the rewritten value is always double-quoted.
pub fn rewrite_asset_urls(html: &str, asset_dir: &str) -> String {
    let prefix = format!("file:///{asset_dir}");
    let mut rewritten = 0usize;
    let out = RE_ASSET_IMG.replace_all(html, |caps: &Captures<'_>| {
        rewritten += 1;
        format!(
            "<img {}src=\"{}/{}\"{}>",
            &caps[1], prefix, &caps[2], &caps[3]
        )
    });
    debug!(rewritten, asset_dir, "Rewrote asset image URLs");
    out.into_owned()
}
