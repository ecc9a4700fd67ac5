//! PDF Logical Structure (Tagged PDF) support.
//!
//! This module implements parsing and traversal of PDF logical structure trees
//! according to ISO 32000-1:2008 Section 14.7.
//!
//! ## Overview
//!
//! Tagged PDFs contain explicit document structure that defines reading order,
//! semantic meaning, and accessibility information.
//!
//! ## Structure Tree
//!
//! A structure tree consists of:
//! - **StructTreeRoot**: The root of the structure hierarchy ([`StructTree`])
//! - **StructElem**: Structure elements ([`StructureNode`])
//! - **Marked Content**: Tagged content in page streams, referenced by MCID
//!   and seen here as a sequence of [`MarkedContentOp`]s
//!
//! Each node is classified into one [`StructureKind`]. Content items split
//! their text into [`TextSpan`]s of uniform style with a
//! [`TextSpanSegmenter`].
//!
//! ## Traversal
//!
//! A [`TreeCursor`] walks one level of the tree. Reading order is the
//! pre-order traversal built from it (see [`walk`]):
//! 1. Visit structure element
//! 2. Recursively visit its children in order
//! 3. Advance to the next sibling
//!
//! ## Example
//!
//! ```ignore
//! use tagged_pdf::structure::open_tree;
//!
//! if let Some(tree) = open_tree(&document) {
//!     let mut cursor = tree.cursor().unwrap();
//!     loop {
//!         let element = cursor.current_element();
//!         println!("{:?}: {}", element.kind(), element.text(true));
//!         if !cursor.advance() {
//!             break;
//!         }
//!     }
//! }
//! ```

mod builder;
mod cursor;
pub mod export;
mod marked_content;
mod node;
mod parser;
mod span;
pub mod traversal;
mod tree;
mod types;
mod unicode;

pub use builder::{ElementBuilder, StructTreeBuilder};
pub use cursor::TreeCursor;
pub use export::{snapshot, to_json};
pub use marked_content::{MarkedContentOp, Rgb, TextStyle};
pub use node::StructureNode;
pub use parser::{open_tree, parse_structure_tree, MemorySource, StructureSource};
pub use span::{SpanFlags, TextSpan, TextSpanSegmenter};
pub use traversal::{extract_reading_order, traverse_structure_tree, walk, OrderedContent};
pub use tree::{NoPages, PageResolver, StructTree};
pub use types::{ElementCategory, RawStructType, StructureKind};
pub use unicode::{CodePointMapper, TableMapper, UnicodeMapper};
