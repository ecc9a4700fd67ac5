//! JSON export of structure trees.
//!
//! A snapshot borrows from the tree and serializes every derived field of each
//! node (text, spans, page) as the node reports it.

use super::node::StructureNode;
use super::span::TextSpan;
use super::traversal::walk;
use super::tree::StructTree;
use super::types::StructureKind;
use crate::error::Result;
use indexmap::IndexMap;
use serde::Serialize;

/// Serializable view of a whole tree.
#[derive(Debug, Serialize)]
pub struct TreeSnapshot<'a> {
    /// Custom type to standard type mapping
    pub role_map: &'a IndexMap<String, String>,
    /// Number of nodes in the tree
    pub node_count: usize,
    /// Top-level elements
    pub roots: Vec<NodeSnapshot<'a>>,
}

/// Serializable view of one node and its subtree.
#[derive(Debug, Serialize)]
pub struct NodeSnapshot<'a> {
    /// Classified kind
    pub kind: StructureKind,
    /// Standard structure type name
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tag: Option<&'static str>,
    /// Marked-content identifier
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mcid: Option<u32>,
    /// Zero-based page number
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,
    /// Element identifier
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<&'a str>,
    /// Title
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<&'a str>,
    /// Language tag
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language: Option<&'a str>,
    /// Alternate description
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alt_text: Option<&'a str>,
    /// Replacement text
    #[serde(skip_serializing_if = "Option::is_none")]
    pub actual_text: Option<&'a str>,
    /// Expansion of an abbreviation
    #[serde(skip_serializing_if = "Option::is_none")]
    pub abbreviation: Option<&'a str>,
    /// Own text
    #[serde(skip_serializing_if = "str::is_empty")]
    pub text: &'a str,
    /// Styled spans of a content item
    #[serde(skip_serializing_if = "Option::is_none")]
    pub spans: Option<&'a [TextSpan]>,
    /// Child elements
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<NodeSnapshot<'a>>,
}

impl<'a> NodeSnapshot<'a> {
    /// Snapshot `node` and its descendants.
    pub fn new(node: &'a StructureNode) -> Self {
        Self {
            kind: node.kind(),
            tag: node.raw_type().name(),
            mcid: node.mcid(),
            page: node.page(),
            id: node.id(),
            title: node.title(),
            language: node.language(),
            alt_text: node.alt_text(),
            actual_text: node.actual_text(),
            abbreviation: node.abbreviation(),
            text: node.text(false),
            spans: node.text_spans(),
            children: node.children().iter().map(NodeSnapshot::new).collect(),
        }
    }
}

/// Snapshot a whole tree.
pub fn snapshot(tree: &StructTree) -> TreeSnapshot<'_> {
    let mut node_count = 0;
    walk(tree, |_, _| node_count += 1);

    TreeSnapshot {
        role_map: tree.role_map(),
        node_count,
        roots: tree.roots().iter().map(NodeSnapshot::new).collect(),
    }
}

/// Serialize a tree to pretty-printed JSON.
pub fn to_json(tree: &StructTree) -> Result<String> {
    Ok(serde_json::to_string_pretty(&snapshot(tree))?)
}
