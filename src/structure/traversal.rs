//! Structure tree traversal for extracting reading order.
//!
//! Implements pre-order traversal of structure trees to determine correct reading order.
//! Every walk here goes through [`TreeCursor`]: read the element, descend into
//! its children, then advance to the next sibling.

use super::cursor::TreeCursor;
use super::node::StructureNode;
use super::tree::StructTree;
use super::types::StructureKind;

/// Represents an ordered content item extracted from structure tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderedContent {
    /// Page number (zero-based)
    pub page: u32,

    /// Marked Content ID
    pub mcid: u32,

    /// Kind of the element owning the content (for semantic information)
    pub kind: StructureKind,

    /// Is this a heading?
    pub is_heading: bool,

    /// Is this a block-level element?
    pub is_block: bool,
}

/// Visit every node of `tree` in pre-order, with its depth (top-level nodes
/// are at depth 0).
pub fn walk<'a, F>(tree: &'a StructTree, mut visit: F)
where
    F: FnMut(&'a StructureNode, usize),
{
    if let Some(cursor) = tree.cursor() {
        walk_level(cursor, None, 0, &mut |node, _parent, depth| visit(node, depth));
    }
}

fn walk_level<'a, F>(
    mut cursor: TreeCursor<'a>,
    parent: Option<&'a StructureNode>,
    depth: usize,
    visit: &mut F,
) where
    F: FnMut(&'a StructureNode, Option<&'a StructureNode>, usize),
{
    loop {
        let node = cursor.current_element();
        visit(node, parent, depth);
        if let Some(children) = cursor.descend() {
            walk_level(children, Some(node), depth + 1, visit);
        }
        if !cursor.advance() {
            break;
        }
    }
}

/// Traverse the structure tree and extract ordered content for a specific page.
///
/// This performs a pre-order traversal of the structure tree, extracting
/// marked content references in document order.
///
/// # Arguments
/// * `tree` - The structure tree
/// * `page_num` - The zero-based page number to extract content for
///
/// # Returns
/// * Vector of ordered content items for the specified page
pub fn traverse_structure_tree(tree: &StructTree, page_num: u32) -> Vec<OrderedContent> {
    let mut result = Vec::new();
    let Some(cursor) = tree.cursor() else {
        return result;
    };

    walk_level(cursor, None, 0, &mut |node, parent, _depth| {
        let Some(mcid) = node.mcid() else {
            return;
        };
        if node.page() != Some(page_num) {
            return;
        }

        let (kind, is_heading, is_block) = match parent {
            Some(owner) => (owner.kind(), owner.is_heading(), owner.is_block()),
            None => (StructureKind::Unknown, false, false),
        };
        result.push(OrderedContent {
            page: page_num,
            mcid,
            kind,
            is_heading,
            is_block,
        });
    });

    result
}

/// Extract all marked content IDs in reading order for a page.
///
/// This is a simpler interface that just returns the MCIDs in order,
/// which can be used to reorder extracted text blocks.
pub fn extract_reading_order(tree: &StructTree, page_num: u32) -> Vec<u32> {
    traverse_structure_tree(tree, page_num)
        .into_iter()
        .map(|c| c.mcid)
        .collect()
}
