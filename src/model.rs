//! Data records exchanged between the host, the pipeline and the sink.
//!
//! Host objects are modelled as plain immutable structs carrying only the
//! fields the exporter reads. Field names serialise in the host API's
//! camelCase shape so a JSON dump of the host's answers deserialises
//! directly (see [`crate::host::snapshot`]).

use serde::{Deserialize, Serialize};

/// One outline item: raw text plus ordered children.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Block {
    /// Raw block text, passed through to Markdown verbatim.
    #[serde(default)]
    pub content: String,

    /// Child blocks in reading order. Hosts omit the field (or send `null`)
    /// for leaf blocks.
    #[serde(default, deserialize_with = "null_as_empty")]
    pub children: Vec<Block>,
}

impl Block {
    /// A block with no children.
    pub fn leaf(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            children: Vec::new(),
        }
    }

    /// A block with the given children.
    pub fn with_children(content: impl Into<String>, children: Vec<Block>) -> Self {
        Self {
            content: content.into(),
            children,
        }
    }

    /// Number of blocks in this subtree, including `self`.
    pub fn count(&self) -> usize {
        1 + self.children.iter().map(Block::count).sum::<usize>()
    }
}

/// Total number of blocks in a forest (pre-order count).
pub fn block_count(blocks: &[Block]) -> usize {
    blocks.iter().map(Block::count).sum()
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<Vec<Block>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Ok(Option::<Vec<Block>>::deserialize(deserializer)?.unwrap_or_default())
}

/// The page being exported. Its display name is the document title and the
/// output file stem.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page {
    pub original_name: String,
}

impl Page {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            original_name: name.into(),
        }
    }
}

/// Current-graph metadata: the root directory assets resolve against.
///
/// The path is kept as the host reports it (platform separators included);
/// normalisation happens in [`crate::pipeline::assets::asset_dir_for`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Graph {
    pub path: String,
}

/// The finished export handed to a [`crate::sink::Sink`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenderedDocument {
    /// Always `<page display name>.html`.
    pub filename: String,
    /// Complete HTML document.
    pub content: String,
}

impl RenderedDocument {
    /// MIME type of [`Self::content`].
    pub const MIME_TYPE: &'static str = "text/html";

    pub fn mime_type(&self) -> &'static str {
        Self::MIME_TYPE
    }
}

/// Result of one export run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Outcome {
    /// The document was saved under `filename`.
    Exported { filename: String, bytes: usize },
    /// No page was open; nothing was produced.
    NoCurrentPage,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn block_count_is_preorder_total() {
        let tree = vec![
            Block::with_children(
                "a",
                vec![Block::leaf("b"), Block::with_children("c", vec![Block::leaf("d")])],
            ),
            Block::leaf("e"),
        ];
        assert_eq!(block_count(&tree), 5);
        assert_eq!(block_count(&[]), 0);
    }

    #[test]
    fn block_deserialises_host_shape() {
        let json = r#"[
            {"content": "A", "uuid": "x", "children": [{"content": "B"}]},
            {"content": "C", "children": null}
        ]"#;
        let blocks: Vec<Block> = serde_json::from_str(json).unwrap();
        assert_eq!(
            blocks,
            vec![
                Block::with_children("A", vec![Block::leaf("B")]),
                Block::leaf("C"),
            ]
        );
    }

    #[test]
    fn page_uses_original_name_key() {
        let page: Page = serde_json::from_str(r#"{"originalName": "Test", "id": 4}"#).unwrap();
        assert_eq!(page.original_name, "Test");
    }

    #[test]
    fn outcome_serialises_with_status_tag() {
        let json = serde_json::to_string(&Outcome::Exported {
            filename: "Test.html".into(),
            bytes: 10,
        })
        .unwrap();
        assert!(json.contains(r#""status":"exported""#), "got: {json}");
        let json = serde_json::to_string(&Outcome::NoCurrentPage).unwrap();
        assert_eq!(json, r#"{"status":"no_current_page"}"#);
    }

    #[test]
    fn document_mime_type_is_html() {
        let doc = RenderedDocument {
            filename: "a.html".into(),
            content: String::new(),
        };
        assert_eq!(doc.mime_type(), "text/html");
    }
}
