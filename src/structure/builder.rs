//! Programmatic construction of structure trees.
//!
//! The parser uses these builders to assemble what it reads from the object
//! graph; callers that already hold a parsed structure (or tests) use them
//! directly.
//!
//! ```
//! use tagged_pdf::structure::{ElementBuilder, RawStructType, StructTreeBuilder};
//!
//! let tree = StructTreeBuilder::new()
//!     .root(
//!         ElementBuilder::new(RawStructType::Document)
//!             .child(ElementBuilder::new(RawStructType::H1).child(ElementBuilder::content(0).text("Title")))
//!             .child(ElementBuilder::new(RawStructType::P).child(ElementBuilder::content(1).text("Body"))),
//!     )
//!     .build();
//!
//! assert_eq!(tree.roots()[0].text(true), "TitleBody");
//! ```

use super::marked_content::MarkedContentOp;
use super::node::{NodeParts, RawFields, StructureNode};
use super::tree::{DocumentContext, PageResolver, StructTree};
use super::types::RawStructType;
use super::unicode::UnicodeMapper;
use crate::object::{encode_text_string, Object, ObjectRef};
use indexmap::IndexMap;
use std::collections::HashMap;
use std::sync::Arc;

/// Builder for one structure element and its subtree.
#[derive(Debug, Clone)]
pub struct ElementBuilder {
    raw_type: RawStructType,
    mcid: Option<u32>,
    object_ref: Option<ObjectRef>,
    page_ref: Option<ObjectRef>,
    fields: RawFields,
    attributes: HashMap<String, Object>,
    ops: Vec<MarkedContentOp>,
    children: Vec<ElementBuilder>,
}

impl ElementBuilder {
    /// Create a structure element of the given type.
    pub fn new(raw_type: RawStructType) -> Self {
        Self {
            raw_type,
            mcid: None,
            object_ref: None,
            page_ref: None,
            fields: RawFields::default(),
            attributes: HashMap::new(),
            ops: Vec::new(),
            children: Vec::new(),
        }
    }

    /// Create a marked-content reference item.
    pub fn content(mcid: u32) -> Self {
        let mut builder = Self::new(RawStructType::MCID);
        builder.mcid = Some(mcid);
        builder
    }

    /// Create an object reference item.
    pub fn object_reference(target: ObjectRef) -> Self {
        let mut builder = Self::new(RawStructType::OBJR);
        builder.object_ref = Some(target);
        builder
    }

    /// Set the page (/Pg) reference.
    pub fn page(mut self, page_ref: ObjectRef) -> Self {
        self.page_ref = Some(page_ref);
        self
    }

    /// Set the element identifier (/ID).
    pub fn id(mut self, id: &str) -> Self {
        self.fields.id = Some(encode_text_string(id));
        self
    }

    /// Set the title (/T).
    pub fn title(mut self, title: &str) -> Self {
        self.fields.title = Some(encode_text_string(title));
        self
    }

    /// Set the language (/Lang).
    pub fn language(mut self, language: &str) -> Self {
        self.fields.language = Some(encode_text_string(language));
        self
    }

    /// Set the alternate description (/Alt).
    pub fn alt_text(mut self, alt_text: &str) -> Self {
        self.fields.alt_text = Some(encode_text_string(alt_text));
        self
    }

    /// Set the replacement text (/ActualText).
    pub fn actual_text(mut self, actual_text: &str) -> Self {
        self.fields.actual_text = Some(encode_text_string(actual_text));
        self
    }

    /// Set the expansion of an abbreviation (/E).
    pub fn expanded_abbreviation(mut self, expansion: &str) -> Self {
        self.fields.expanded_abbr = Some(encode_text_string(expansion));
        self
    }

    /// Add a raw structure attribute.
    pub fn attribute(mut self, name: impl Into<String>, value: Object) -> Self {
        self.attributes.insert(name.into(), value);
        self
    }

    /// Append one marked-content operator.
    pub fn op(mut self, op: MarkedContentOp) -> Self {
        self.ops.push(op);
        self
    }

    /// Append marked-content operators.
    pub fn ops(mut self, ops: impl IntoIterator<Item = MarkedContentOp>) -> Self {
        self.ops.extend(ops);
        self
    }

    /// Append one character operator per character of `text`.
    pub fn text(mut self, text: &str) -> Self {
        self.ops.extend(MarkedContentOp::chars(text));
        self
    }

    /// Append a child element.
    pub fn child(mut self, child: ElementBuilder) -> Self {
        self.children.push(child);
        self
    }

    pub(crate) fn push_child(&mut self, child: ElementBuilder) {
        self.children.push(child);
    }

    pub(crate) fn fields_mut(&mut self) -> &mut RawFields {
        &mut self.fields
    }

    pub(crate) fn attributes_mut(&mut self) -> &mut HashMap<String, Object> {
        &mut self.attributes
    }

    /// Structure type of the element being built.
    pub fn raw_type(&self) -> RawStructType {
        self.raw_type
    }

    /// Page reference of the element being built.
    pub fn page_ref(&self) -> Option<ObjectRef> {
        self.page_ref
    }

    fn build(self, context: &Arc<DocumentContext>) -> StructureNode {
        let children = self
            .children
            .into_iter()
            .map(|child| child.build(context))
            .collect();

        let parts = NodeParts {
            raw_type: self.raw_type,
            mcid: self.mcid,
            object_ref: self.object_ref,
            page_ref: self.page_ref,
            fields: self.fields,
            attributes: self.attributes,
            ops: self.ops,
            children,
        };
        StructureNode::new(parts, Arc::clone(context))
    }
}

/// Builder for a whole [`StructTree`].
#[derive(Default)]
pub struct StructTreeBuilder {
    roots: Vec<ElementBuilder>,
    role_map: IndexMap<String, String>,
    mapper: Option<Arc<dyn UnicodeMapper>>,
    pages: Option<Arc<dyn PageResolver>>,
}

impl StructTreeBuilder {
    /// Create an empty tree builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a top-level element.
    pub fn root(mut self, element: ElementBuilder) -> Self {
        self.roots.push(element);
        self
    }

    /// Append a top-level element in place.
    pub fn add_root(&mut self, element: ElementBuilder) {
        self.roots.push(element);
    }

    /// Record a RoleMap entry (custom type name to standard type name).
    pub fn role(mut self, custom: impl Into<String>, standard: impl Into<String>) -> Self {
        self.role_map.insert(custom.into(), standard.into());
        self
    }

    pub(crate) fn set_role_map(&mut self, role_map: IndexMap<String, String>) {
        self.role_map = role_map;
    }

    /// Use `mapper` to decode character codes (default: code points).
    pub fn unicode_mapper(mut self, mapper: impl UnicodeMapper + 'static) -> Self {
        self.mapper = Some(Arc::new(mapper));
        self
    }

    /// Use an already shared mapper.
    pub fn shared_unicode_mapper(mut self, mapper: Arc<dyn UnicodeMapper>) -> Self {
        self.mapper = Some(mapper);
        self
    }

    /// Use `pages` to resolve page references (default: resolves nothing).
    pub fn page_resolver(mut self, pages: impl PageResolver + 'static) -> Self {
        self.pages = Some(Arc::new(pages));
        self
    }

    /// Use an already shared page resolver.
    pub fn shared_page_resolver(mut self, pages: Arc<dyn PageResolver>) -> Self {
        self.pages = Some(pages);
        self
    }

    /// Number of top-level elements added so far.
    pub fn len(&self) -> usize {
        self.roots.len()
    }

    /// Whether no top-level element was added.
    pub fn is_empty(&self) -> bool {
        self.roots.is_empty()
    }

    /// Assemble the tree.
    pub fn build(self) -> StructTree {
        let defaults = DocumentContext::default();
        let context = Arc::new(DocumentContext::new(
            self.mapper.unwrap_or(defaults.mapper),
            self.pages.unwrap_or(defaults.pages),
        ));

        let roots = self
            .roots
            .into_iter()
            .map(|root| root.build(&context))
            .collect();
        StructTree::new(roots, self.role_map)
    }
}

impl std::fmt::Debug for StructTreeBuilder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StructTreeBuilder")
            .field("roots", &self.roots)
            .field("role_map", &self.role_map)
            .finish_non_exhaustive()
    }
}
