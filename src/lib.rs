// Allow some clippy lints that are too pedantic for this project
#![allow(clippy::upper_case_acronyms)]
#![allow(clippy::enum_variant_names)]
#![allow(clippy::should_implement_trait)]
#![allow(clippy::match_like_matches_macro)]
// Allow unused for tests
#![cfg_attr(test, allow(dead_code))]

//! # Tagged PDF
//!
//! Read-only access to the logical structure tree of Tagged PDF documents
//! (ISO 32000-1:2008 section 14.7).
//!
//! ## Core Features
//!
//! - **Structure Tree**: Parse StructTreeRoot, StructElem, RoleMap, MCR and OBJR
//!   entries into an immutable tree of [`StructureNode`]s
//! - **Cursors**: Walk the tree level by level with [`TreeCursor`], or in
//!   reading order with [`structure::walk`]
//! - **Classification**: Every element maps to exactly one [`StructureKind`]
//! - **Text Spans**: Split the text of a marked-content sequence into runs of
//!   uniform style ([`TextSpan`])
//! - **Export**: JSON snapshot of a whole tree
//!
//! ## Quick Start
//!
//! ```
//! use tagged_pdf::structure::{ElementBuilder, RawStructType, StructTreeBuilder};
//! use tagged_pdf::StructureKind;
//!
//! let tree = StructTreeBuilder::new()
//!     .root(ElementBuilder::new(RawStructType::P).child(ElementBuilder::content(0).text("Hello")))
//!     .build();
//!
//! let cursor = tree.cursor().unwrap();
//! let paragraph = cursor.current_element();
//! assert_eq!(paragraph.kind(), StructureKind::Paragraph);
//! assert_eq!(paragraph.text(true), "Hello");
//! ```
//!
//! Documents are read through a [`StructureSource`]; [`MemorySource`] holds
//! an object graph that was loaded elsewhere.
//!
//! ## License
//!
//! Licensed under either of:
//!
//! * Apache License, Version 2.0 ([LICENSE-APACHE](LICENSE-APACHE) or <http://www.apache.org/licenses/LICENSE-2.0>)
//! * MIT license ([LICENSE-MIT](LICENSE-MIT) or <http://opensource.org/licenses/MIT>)
//!
//! at your option.

#![warn(missing_docs)]

// Error handling
pub mod error;

// PDF object model
pub mod object;

// Configuration
pub mod config;

/// PDF logical structure (Tagged PDFs)
pub mod structure;

// Re-exports
pub use config::StructureOptions;
pub use error::{Error, Result};
pub use object::{Object, ObjectRef};
pub use structure::{
    open_tree, parse_structure_tree, MemorySource, StructTree, StructureKind, StructureNode,
    StructureSource, TextSpan, TreeCursor,
};
