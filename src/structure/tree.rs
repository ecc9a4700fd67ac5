//! The structure tree root and the document context shared by its nodes.

use super::cursor::TreeCursor;
use super::node::StructureNode;
use super::unicode::{CodePointMapper, UnicodeMapper};
use crate::object::ObjectRef;
use indexmap::IndexMap;
use std::collections::HashMap;
use std::sync::Arc;

/// Resolves page references to page numbers.
///
/// This is the only view of the page tree the structure layer needs.
pub trait PageResolver: Send + Sync {
    /// One-based page number of the page object `page_ref`, or `None` if the
    /// reference does not name a page of the document.
    fn resolve_page_number(&self, page_ref: ObjectRef) -> Option<u32>;
}

impl<F> PageResolver for F
where
    F: Fn(ObjectRef) -> Option<u32> + Send + Sync,
{
    fn resolve_page_number(&self, page_ref: ObjectRef) -> Option<u32> {
        self(page_ref)
    }
}

impl PageResolver for HashMap<ObjectRef, u32> {
    fn resolve_page_number(&self, page_ref: ObjectRef) -> Option<u32> {
        self.get(&page_ref).copied()
    }
}

/// Page resolver for documents without a page tree; resolves nothing.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoPages;

impl PageResolver for NoPages {
    fn resolve_page_number(&self, _page_ref: ObjectRef) -> Option<u32> {
        None
    }
}

/// Collaborators shared by every node of one tree.
pub(crate) struct DocumentContext {
    pub mapper: Arc<dyn UnicodeMapper>,
    pub pages: Arc<dyn PageResolver>,
}

impl DocumentContext {
    pub(crate) fn new(mapper: Arc<dyn UnicodeMapper>, pages: Arc<dyn PageResolver>) -> Self {
        Self { mapper, pages }
    }
}

impl Default for DocumentContext {
    fn default() -> Self {
        Self::new(Arc::new(CodePointMapper), Arc::new(NoPages))
    }
}

impl std::fmt::Debug for DocumentContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DocumentContext").finish_non_exhaustive()
    }
}

/// The root of a document's structure tree (StructTreeRoot).
///
/// Owns every structure element. The tree is immutable after construction;
/// any number of [`TreeCursor`]s may walk it at the same time.
#[derive(Debug)]
pub struct StructTree {
    roots: Vec<StructureNode>,
    role_map: IndexMap<String, String>,
}

impl StructTree {
    pub(crate) fn new(roots: Vec<StructureNode>, role_map: IndexMap<String, String>) -> Self {
        Self { roots, role_map }
    }

    /// Top-level elements in document order.
    pub fn roots(&self) -> &[StructureNode] {
        &self.roots
    }

    /// Number of top-level elements.
    pub fn len(&self) -> usize {
        self.roots.len()
    }

    /// Whether the tree has no top-level elements.
    pub fn is_empty(&self) -> bool {
        self.roots.is_empty()
    }

    /// Role map of custom structure types to standard ones.
    ///
    /// Parsed trees list the entries sorted by custom type name; built trees
    /// keep the order of [`StructTreeBuilder::role`](super::StructTreeBuilder::role) calls.
    pub fn role_map(&self) -> &IndexMap<String, String> {
        &self.role_map
    }

    /// Cursor at the first top-level element, or `None` for an empty tree.
    pub fn cursor(&self) -> Option<TreeCursor<'_>> {
        TreeCursor::new(self)
    }

    /// Total number of nodes in the tree.
    pub fn node_count(&self) -> usize {
        fn count(node: &StructureNode) -> usize {
            1 + node.children().iter().map(count).sum::<usize>()
        }
        self.roots.iter().map(count).sum()
    }
}
