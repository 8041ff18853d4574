//! Filesystem host: a graph directory of outline files.
//!
//! A graph is a folder with `pages/` and `journals/` subfolders holding one
//! Markdown outline per page, plus an `assets/` folder that image links
//! point into. The "current page" is whatever the caller selects, since
//! there is no UI to ask.
//!
//! Page names map to files the way the note app writes them: namespace
//! separators become `___` (older graphs used `%2F`), and when no exact
//! file name matches, a case-insensitive match is tried.

use crate::error::ExportError;
use crate::host::outline::parse_outline;
use crate::host::Host;
use crate::model::{Block, Graph, Page};
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Sub-directories searched for page files, in order.
const PAGE_DIRS: [&str; 2] = ["pages", "journals"];

/// Host backed by a graph directory on disk.
#[derive(Debug, Clone)]
pub struct GraphHost {
    root: PathBuf,
    current_page: Option<String>,
}

impl GraphHost {
    /// Open the graph rooted at `root`. The path is made absolute so asset
    /// URLs derived from it are dereferenceable.
    pub fn open(root: impl AsRef<Path>) -> Result<Self, ExportError> {
        let root = root.as_ref();
        if !root.is_dir() {
            return Err(ExportError::GraphNotFound {
                path: root.to_path_buf(),
            });
        }
        let root = std::path::absolute(root).map_err(|e| ExportError::ReadFailed {
            path: root.to_path_buf(),
            source: e,
        })?;
        Ok(Self {
            root,
            current_page: None,
        })
    }

    /// Select the page [`Host::current_page`] reports.
    pub fn with_current_page(mut self, name: Option<impl Into<String>>) -> Self {
        self.current_page = name.map(Into::into).filter(|n: &String| !n.trim().is_empty());
        self
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Locate the outline file for `page_name`.
    pub async fn page_file(&self, page_name: &str) -> Result<PathBuf, ExportError> {
        let not_found = || ExportError::PageNotFound {
            name: page_name.to_string(),
            graph: self.root.clone(),
        };
        if page_name.is_empty() || page_name.contains('\\') || page_name.starts_with('.') {
            return Err(not_found());
        }

        let stems = file_stems(page_name);
        for dir in PAGE_DIRS {
            for stem in &stems {
                let candidate = self.root.join(dir).join(format!("{stem}.md"));
                if tokio::fs::metadata(&candidate)
                    .await
                    .is_ok_and(|m| m.is_file())
                {
                    return Ok(candidate);
                }
            }
        }

        let wanted: Vec<String> = stems.iter().map(|s| s.to_lowercase()).collect();
        for dir in PAGE_DIRS {
            if let Some(found) = find_case_insensitive(&self.root.join(dir), &wanted).await? {
                return Ok(found);
            }
        }
        Err(not_found())
    }
}

/// File stems a page may be stored under.
///
/// Names are tried as written first, then with the characters the note app
/// percent-encodes in file names (`:`, `?`, `*` and friends) escaped.
fn file_stems(page_name: &str) -> Vec<String> {
    let mut stems = vec![page_name.replace('/', "___")];
    if page_name.contains('/') {
        stems.push(page_name.replace('/', "%2F"));
    }
    let encoded: Vec<String> = stems.iter().map(|s| encode_reserved(s)).collect();
    for stem in encoded {
        if !stems.contains(&stem) {
            stems.push(stem);
        }
    }
    stems
}

/// Percent-encode characters that are not allowed in file names. An
/// existing `%2F` namespace separator is kept as is.
fn encode_reserved(stem: &str) -> String {
    let mut out = String::with_capacity(stem.len());
    let mut rest = stem;
    while let Some(ch) = rest.chars().next() {
        if rest.starts_with("%2F") {
            out.push_str("%2F");
            rest = &rest[3..];
            continue;
        }
        match ch {
            '%' => out.push_str("%25"),
            ':' => out.push_str("%3A"),
            '?' => out.push_str("%3F"),
            '*' => out.push_str("%2A"),
            '"' => out.push_str("%22"),
            '<' => out.push_str("%3C"),
            '>' => out.push_str("%3E"),
            '|' => out.push_str("%7C"),
            '#' => out.push_str("%23"),
            c => out.push(c),
        }
        rest = &rest[ch.len_utf8()..];
    }
    out
}

async fn find_case_insensitive(
    dir: &Path,
    wanted: &[String],
) -> Result<Option<PathBuf>, ExportError> {
    let mut entries = match tokio::fs::read_dir(dir).await {
        Ok(entries) => entries,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
        Err(e) => {
            return Err(ExportError::ReadFailed {
                path: dir.to_path_buf(),
                source: e,
            })
        }
    };
    while let Some(entry) = entries
        .next_entry()
        .await
        .map_err(|e| ExportError::ReadFailed {
            path: dir.to_path_buf(),
            source: e,
        })?
    {
        let path = entry.path();
        let is_md = path.extension().is_some_and(|ext| ext == "md");
        let stem = path
            .file_stem()
            .map(|s| s.to_string_lossy().to_lowercase())
            .unwrap_or_default();
        if is_md && wanted.contains(&stem) {
            return Ok(Some(path));
        }
    }
    Ok(None)
}

#[async_trait]
impl Host for GraphHost {
    async fn current_page(&self) -> Result<Option<Page>, ExportError> {
        Ok(self.current_page.as_deref().map(Page::new))
    }

    async fn page_blocks_tree(&self, page_name: &str) -> Result<Vec<Block>, ExportError> {
        let path = self.page_file(page_name).await?;
        debug!("Reading page file: {}", path.display());
        let text = tokio::fs::read_to_string(&path)
            .await
            .map_err(|e| ExportError::ReadFailed {
                path: path.clone(),
                source: e,
            })?;
        Ok(parse_outline(&text))
    }

    async fn current_graph(&self) -> Result<Graph, ExportError> {
        Ok(Graph {
            path: self.root.to_string_lossy().into_owned(),
        })
    }
}
