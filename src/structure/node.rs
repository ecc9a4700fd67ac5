//! Structure elements.

use super::marked_content::MarkedContentOp;
use super::span::{TextSpan, TextSpanSegmenter};
use super::tree::DocumentContext;
use super::types::{ElementCategory, RawStructType, StructureKind};
use crate::object::{decode_text_string, Object, ObjectRef};
use std::collections::HashMap;
use std::sync::{Arc, OnceLock};

/// Text-string entries of a structure element, as stored in the document.
///
/// `None` means the entry is absent; an empty byte string is kept as an
/// explicit empty value.
#[derive(Debug, Clone, Default)]
pub(crate) struct RawFields {
    pub id: Option<Vec<u8>>,
    pub title: Option<Vec<u8>>,
    pub language: Option<Vec<u8>>,
    pub alt_text: Option<Vec<u8>>,
    pub actual_text: Option<Vec<u8>>,
    pub expanded_abbr: Option<Vec<u8>>,
}

#[derive(Debug, Default)]
struct NodeCache {
    id: OnceLock<Option<String>>,
    title: OnceLock<Option<String>>,
    language: OnceLock<Option<String>>,
    alt_text: OnceLock<Option<String>>,
    actual_text: OnceLock<Option<String>>,
    expanded_abbr: OnceLock<Option<String>>,
    text: OnceLock<String>,
    text_recursive: OnceLock<String>,
    spans: OnceLock<Vec<TextSpan>>,
}

fn cached_text<'a>(cell: &'a OnceLock<Option<String>>, raw: &Option<Vec<u8>>) -> Option<&'a str> {
    cell.get_or_init(|| raw.as_deref().map(decode_text_string)).as_deref()
}

/// One element of the structure tree.
///
/// Nodes are immutable once built. Derived values (decoded strings, text,
/// text spans) are computed on first access and cached for the node's
/// lifetime; concurrent first accesses are safe.
#[derive(Debug)]
pub struct StructureNode {
    raw_type: RawStructType,
    kind: StructureKind,
    mcid: Option<u32>,
    object_ref: Option<ObjectRef>,
    page_ref: Option<ObjectRef>,
    fields: RawFields,
    attributes: HashMap<String, Object>,
    ops: Vec<MarkedContentOp>,
    children: Vec<StructureNode>,
    context: Arc<DocumentContext>,
    cache: NodeCache,
}

/// Everything needed to assemble a [`StructureNode`].
pub(crate) struct NodeParts {
    pub raw_type: RawStructType,
    pub mcid: Option<u32>,
    pub object_ref: Option<ObjectRef>,
    pub page_ref: Option<ObjectRef>,
    pub fields: RawFields,
    pub attributes: HashMap<String, Object>,
    pub ops: Vec<MarkedContentOp>,
    pub children: Vec<StructureNode>,
}

impl StructureNode {
    pub(crate) fn new(parts: NodeParts, context: Arc<DocumentContext>) -> Self {
        Self {
            raw_type: parts.raw_type,
            kind: StructureKind::from_raw(parts.raw_type),
            mcid: parts.mcid,
            object_ref: parts.object_ref,
            page_ref: parts.page_ref,
            fields: parts.fields,
            attributes: parts.attributes,
            ops: parts.ops,
            children: parts.children,
            context,
            cache: NodeCache::default(),
        }
    }

    /// Semantic kind of this element.
    pub fn kind(&self) -> StructureKind {
        self.kind
    }

    /// Structure type as found in the document (after role mapping).
    pub fn raw_type(&self) -> RawStructType {
        self.raw_type
    }

    /// Zero-based index of the page containing the element.
    ///
    /// `None` if the element has no page reference or the reference cannot be
    /// resolved.
    pub fn page(&self) -> Option<u32> {
        let page_ref = self.page_ref?;
        self.context
            .pages
            .resolve_page_number(page_ref)
            .and_then(|number| number.checked_sub(1))
    }

    /// The element's /Pg reference.
    pub fn page_ref(&self) -> Option<ObjectRef> {
        self.page_ref
    }

    /// Marked-content ID, for content-reference items.
    pub fn mcid(&self) -> Option<u32> {
        self.mcid
    }

    /// Referenced object, for object-reference items.
    pub fn object_ref(&self) -> Option<ObjectRef> {
        self.object_ref
    }

    /// Whether the element is actual document content (a content item).
    pub fn is_content(&self) -> bool {
        self.raw_type.is_content()
    }

    /// Whether the element is an inline-level element.
    pub fn is_inline(&self) -> bool {
        self.raw_type.category() == ElementCategory::Inline
    }

    /// Whether the element is a block-level element.
    pub fn is_block(&self) -> bool {
        self.raw_type.category() == ElementCategory::Block
    }

    /// Whether the element is a grouping element.
    pub fn is_grouping(&self) -> bool {
        self.raw_type.category() == ElementCategory::Grouping
    }

    /// Whether the element is a heading.
    pub fn is_heading(&self) -> bool {
        self.kind.is_heading()
    }

    /// Identifier of the element (/ID).
    pub fn id(&self) -> Option<&str> {
        cached_text(&self.cache.id, &self.fields.id)
    }

    /// Title of the element (/T).
    pub fn title(&self) -> Option<&str> {
        cached_text(&self.cache.title, &self.fields.title)
    }

    /// Expanded form of an abbreviation (/E).
    ///
    /// Only Span elements carry abbreviations; always `None` otherwise.
    pub fn abbreviation(&self) -> Option<&str> {
        if self.kind != StructureKind::Span {
            return None;
        }
        cached_text(&self.cache.expanded_abbr, &self.fields.expanded_abbr)
    }

    /// Language of the element (/Lang), e.g. `en-US`.
    pub fn language(&self) -> Option<&str> {
        cached_text(&self.cache.language, &self.fields.language)
    }

    /// Alternate description of the element (/Alt), mostly for figures.
    ///
    /// For elements containing proper text use [`StructureNode::text`].
    pub fn alt_text(&self) -> Option<&str> {
        cached_text(&self.cache.alt_text, &self.fields.alt_text)
    }

    /// Replacement text of the element (/ActualText).
    ///
    /// Used for content that looks like text when rendered (e.g. a logo).
    pub fn actual_text(&self) -> Option<&str> {
        cached_text(&self.cache.actual_text, &self.fields.actual_text)
    }

    /// Text enclosed by the element.
    ///
    /// With `recursive == false` only the element's own marked content is
    /// decoded (empty for elements that are not content items). With
    /// `recursive == true` the text of the whole subtree is gathered in
    /// logical order.
    pub fn text(&self, recursive: bool) -> &str {
        if recursive {
            self.cache.text_recursive.get_or_init(|| {
                let mut text = self.text(false).to_string();
                for child in &self.children {
                    text.push_str(child.text(true));
                }
                text
            })
        } else {
            self.cache.text.get_or_init(|| {
                let mut text = String::new();
                for op in &self.ops {
                    if let MarkedContentOp::Char(code) = op {
                        self.context.mapper.map_unicode(*code, &mut text);
                    }
                }
                text
            })
        }
    }

    /// Text of the element split into runs of uniform attributes.
    ///
    /// `None` for elements that are not content items.
    pub fn text_spans(&self) -> Option<&[TextSpan]> {
        if !self.is_content() {
            return None;
        }
        let spans = self
            .cache
            .spans
            .get_or_init(|| TextSpanSegmenter::segment(self.context.mapper.as_ref(), &self.ops));
        Some(spans.as_slice())
    }

    /// Marked-content operators of this content item.
    pub fn marked_content_ops(&self) -> &[MarkedContentOp] {
        &self.ops
    }

    /// Child elements in document order.
    pub fn children(&self) -> &[StructureNode] {
        &self.children
    }

    /// Number of children.
    pub fn child_count(&self) -> usize {
        self.children.len()
    }

    /// Child at `index`.
    pub fn child(&self, index: usize) -> Option<&StructureNode> {
        self.children.get(index)
    }

    /// Raw structure attributes (/A), unvalidated.
    pub fn attributes(&self) -> &HashMap<String, Object> {
        &self.attributes
    }

    /// Look up one raw structure attribute.
    pub fn attribute(&self, name: &str) -> Option<&Object> {
        self.attributes.get(name)
    }
}
