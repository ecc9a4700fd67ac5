//! Cursors over one level of the structure tree.
//!
//! A [`TreeCursor`] points at one element among its siblings: either the
//! top-level elements of the tree or the children of one element. Walking the
//! whole tree is done by the caller:
//!
//! ```ignore
//! fn walk(mut cursor: TreeCursor<'_>) {
//!     loop {
//!         let element = cursor.current_element();
//!         // ... use element ...
//!         if let Some(child) = cursor.descend() {
//!             walk(child);
//!         }
//!         if !cursor.advance() {
//!             break;
//!         }
//!     }
//! }
//! ```

use super::node::StructureNode;
use super::tree::StructTree;

/// Position-bearing handle into one level of a [`StructTree`].
///
/// Cursors are plain values: copying one (or calling
/// [`TreeCursor::duplicate`]) gives an independent position over the same
/// level.
#[derive(Debug, Clone, Copy)]
pub enum TreeCursor<'a> {
    /// Over the top-level elements of the tree
    AtRoot {
        /// The tree
        tree: &'a StructTree,
        /// Current position
        index: usize,
    },
    /// Over the children of one element
    AtNode {
        /// The parent element
        node: &'a StructureNode,
        /// Current position
        index: usize,
    },
}

impl<'a> TreeCursor<'a> {
    /// Cursor at the first top-level element, or `None` if the tree is empty.
    pub fn new(tree: &'a StructTree) -> Option<Self> {
        if tree.is_empty() {
            return None;
        }
        Some(TreeCursor::AtRoot { tree, index: 0 })
    }

    /// The elements at this cursor's level.
    pub fn siblings(&self) -> &'a [StructureNode] {
        match *self {
            TreeCursor::AtRoot { tree, .. } => tree.roots(),
            TreeCursor::AtNode { node, .. } => node.children(),
        }
    }

    /// Current position among the siblings.
    pub fn position(&self) -> usize {
        match *self {
            TreeCursor::AtRoot { index, .. } | TreeCursor::AtNode { index, .. } => index,
        }
    }

    fn index_mut(&mut self) -> &mut usize {
        match self {
            TreeCursor::AtRoot { index, .. } | TreeCursor::AtNode { index, .. } => index,
        }
    }

    /// Number of elements at this level.
    pub fn len(&self) -> usize {
        self.siblings().len()
    }

    /// Always false: a cursor only exists over a non-empty level.
    pub fn is_empty(&self) -> bool {
        self.siblings().is_empty()
    }

    /// Whether the cursor walks the top-level elements.
    pub fn is_root_level(&self) -> bool {
        matches!(self, TreeCursor::AtRoot { .. })
    }

    /// Whether the position indexes an element.
    pub fn is_valid(&self) -> bool {
        self.position() < self.len()
    }

    /// Move to the next sibling.
    ///
    /// Returns whether the cursor now points at an element. Never wraps
    /// around: once past the last sibling it keeps returning `false`.
    pub fn advance(&mut self) -> bool {
        let len = self.len();
        let index = self.index_mut();
        if *index < len {
            *index += 1;
        }
        *index < len
    }

    /// Move back to the first sibling.
    pub fn reset(&mut self) {
        *self.index_mut() = 0;
    }

    /// The element at the current position.
    ///
    /// # Panics
    ///
    /// Panics if the cursor was advanced past the last sibling.
    pub fn current_element(&self) -> &'a StructureNode {
        let siblings = self.siblings();
        let index = self.position();
        assert!(
            index < siblings.len(),
            "TreeCursor::current_element called at position {} of {}",
            index,
            siblings.len()
        );
        &siblings[index]
    }

    /// Cursor over the children of the current element, or `None` if it has
    /// no children.
    ///
    /// # Panics
    ///
    /// Panics if the cursor was advanced past the last sibling.
    pub fn descend(&self) -> Option<TreeCursor<'a>> {
        let node = self.current_element();
        if node.children().is_empty() {
            return None;
        }
        Some(TreeCursor::AtNode { node, index: 0 })
    }

    /// Independent copy of this cursor.
    pub fn duplicate(&self) -> TreeCursor<'a> {
        *self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::structure::builder::{ElementBuilder, StructTreeBuilder};
    use crate::structure::types::{RawStructType, StructureKind};

    fn sample_tree() -> StructTree {
        // Document
        //   ├─ H1
        //   └─ P
        //       └─ MCID 0
        // Part
        StructTreeBuilder::new()
            .root(
                ElementBuilder::new(RawStructType::Document)
                    .child(ElementBuilder::new(RawStructType::H1))
                    .child(ElementBuilder::new(RawStructType::P).child(ElementBuilder::content(0))),
            )
            .root(ElementBuilder::new(RawStructType::Part))
            .build()
    }

    #[test]
    fn test_advance_visits_each_sibling_once() {
        let tree = sample_tree();
        let mut cursor = tree.cursor().unwrap();

        assert!(cursor.is_root_level());
        assert_eq!(cursor.current_element().kind(), StructureKind::Document);
        assert!(cursor.advance());
        assert_eq!(cursor.current_element().kind(), StructureKind::Part);
        assert!(!cursor.advance());
        assert!(!cursor.advance());
        assert!(!cursor.is_valid());
    }

    #[test]
    fn test_descend() {
        let tree = sample_tree();
        let cursor = tree.cursor().unwrap();
        let mut child = cursor.descend().unwrap();

        assert!(!child.is_root_level());
        assert_eq!(child.len(), 2);
        assert_eq!(child.current_element().kind(), StructureKind::Heading1);
        assert!(child.descend().is_none());
        assert!(child.advance());
        let grandchild = child.descend().unwrap();
        assert_eq!(grandchild.current_element().kind(), StructureKind::ContentReference);

        // Descending does not move the parent
        assert_eq!(cursor.position(), 0);
    }

    #[test]
    fn test_duplicate_is_independent() {
        let tree = sample_tree();
        let mut cursor = tree.cursor().unwrap();
        let copy = cursor.duplicate();

        cursor.advance();
        assert_eq!(cursor.position(), 1);
        assert_eq!(copy.position(), 0);
        assert_eq!(copy.current_element().kind(), StructureKind::Document);
    }

    #[test]
    fn test_reset() {
        let tree = sample_tree();
        let mut cursor = tree.cursor().unwrap();
        while cursor.advance() {}

        cursor.reset();
        assert!(cursor.is_valid());
        assert_eq!(cursor.current_element().kind(), StructureKind::Document);
    }

    #[test]
    #[should_panic(expected = "current_element")]
    fn test_current_element_past_end_panics() {
        let tree = sample_tree();
        let mut cursor = tree.cursor().unwrap();
        while cursor.advance() {}
        cursor.current_element();
    }
}
