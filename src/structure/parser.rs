//! Parser for PDF structure trees.
//!
//! Parses StructTreeRoot and StructElem dictionaries according to ISO 32000-1
//! Section 14.7. Objects are obtained through a [`StructureSource`]; how the
//! document was loaded is not this module's concern.

use super::builder::{ElementBuilder, StructTreeBuilder};
use super::marked_content::MarkedContentOp;
use super::tree::{NoPages, PageResolver, StructTree};
use super::types::RawStructType;
use super::unicode::{CodePointMapper, UnicodeMapper};
use crate::config::StructureOptions;
use crate::error::{Error, Result};
use crate::object::{Object, ObjectRef};
use indexmap::IndexMap;
use std::collections::{HashMap, HashSet};
use std::sync::Arc;

/// The document as seen by the structure parser.
pub trait StructureSource {
    /// The document catalog dictionary.
    fn catalog(&self) -> Result<Object>;

    /// Load an indirect object.
    fn load_object(&self, obj_ref: ObjectRef) -> Result<Object>;

    /// Marked-content operators of the sequence `mcid` on page `page`.
    fn marked_content_ops(&self, _page: ObjectRef, _mcid: u32) -> Vec<MarkedContentOp> {
        Vec::new()
    }

    /// Page lookup used by [`StructureNode::page`](super::StructureNode::page).
    fn page_resolver(&self) -> Arc<dyn PageResolver> {
        Arc::new(NoPages)
    }

    /// Character code mapping used for element text and spans.
    fn unicode_mapper(&self) -> Arc<dyn UnicodeMapper> {
        Arc::new(CodePointMapper)
    }
}

/// Open the structure tree of a document.
///
/// Returns `None` if the document is not tagged, its structure tree has no
/// elements, or the tree cannot be read (the error is logged).
pub fn open_tree<S: StructureSource + ?Sized>(source: &S) -> Option<StructTree> {
    match parse_structure_tree(source, &StructureOptions::default()) {
        Ok(Some(tree)) if !tree.is_empty() => Some(tree),
        Ok(_) => None,
        Err(e) => {
            log::warn!("Failed to read structure tree: {}", e);
            None
        },
    }
}

/// Parse the structure tree from a PDF document.
///
/// # Returns
/// * `Ok(Some(StructTree))` - If the document has a structure tree
/// * `Ok(None)` - If the document is not tagged (no StructTreeRoot)
/// * `Err(Error)` - If parsing fails (always in strict mode, or once the
///   lenient error budget is exhausted)
pub fn parse_structure_tree<S: StructureSource + ?Sized>(
    source: &S,
    options: &StructureOptions,
) -> Result<Option<StructTree>> {
    let catalog = source.catalog()?;
    let catalog_dict = catalog
        .as_dict()
        .ok_or_else(|| Error::InvalidPdf("Catalog is not a dictionary".into()))?;

    let struct_tree_root_ref = match catalog_dict.get("StructTreeRoot") {
        Some(obj) => obj,
        None => return Ok(None), // Not a tagged PDF
    };

    let struct_tree_root_obj = resolve_object(source, struct_tree_root_ref)?;
    let struct_tree_dict = struct_tree_root_obj
        .as_dict()
        .ok_or_else(|| Error::InvalidPdf("StructTreeRoot is not a dictionary".into()))?;

    let mut role_map = IndexMap::new();
    if let Some(role_map_obj) = struct_tree_dict.get("RoleMap") {
        let role_map_obj = resolve_object(source, role_map_obj)?;
        if let Some(role_map_dict) = role_map_obj.as_dict() {
            // Sorted so the map does not depend on dictionary hashing
            let mut entries: Vec<_> = role_map_dict.iter().collect();
            entries.sort_by(|a, b| a.0.cmp(b.0));
            for (key, value) in entries {
                if let Some(name) = value.as_name() {
                    role_map.insert(key.clone(), name.to_string());
                }
            }
        }
    }

    let mut parser = StructureParser {
        source,
        options,
        role_map: &role_map,
        path: HashSet::new(),
        seen: HashSet::new(),
        errors: 0,
    };

    let mut roots = Vec::new();
    if let Some(k_obj) = struct_tree_dict.get("K") {
        let k_obj = resolve_object(source, k_obj)?;
        roots = parser.parse_kids(&k_obj, 0, &Inherited::default())?;
    }

    log::debug!(
        "Parsed structure tree: {} root elements, {} role map entries, {} skipped",
        roots.len(),
        role_map.len(),
        parser.errors
    );

    let mut builder = StructTreeBuilder::new()
        .shared_unicode_mapper(source.unicode_mapper())
        .shared_page_resolver(source.page_resolver());
    for root in roots {
        builder.add_root(root);
    }
    builder.set_role_map(role_map);

    Ok(Some(builder.build()))
}

/// Helper function to resolve an object (handles both direct objects and references).
fn resolve_object<S: StructureSource + ?Sized>(source: &S, obj: &Object) -> Result<Object> {
    match obj {
        Object::Reference(obj_ref) => source.load_object(*obj_ref),
        _ => Ok(obj.clone()),
    }
}

/// Entries a structure element passes down to its children.
#[derive(Debug, Clone, Default)]
struct Inherited {
    page: Option<ObjectRef>,
    language: Option<Vec<u8>>,
}

struct StructureParser<'a, S: StructureSource + ?Sized> {
    source: &'a S,
    options: &'a StructureOptions,
    role_map: &'a IndexMap<String, String>,
    /// Indirect objects on the path from the root to the current element
    path: HashSet<ObjectRef>,
    /// Every indirect element parsed so far; each is expanded at most once
    seen: HashSet<ObjectRef>,
    errors: usize,
}

impl<'a, S: StructureSource + ?Sized> StructureParser<'a, S> {
    /// Record a malformed element. Lenient mode skips it; strict mode (or an
    /// exhausted error budget) aborts with `err`.
    fn recover(&mut self, err: Error) -> Result<()> {
        if !self.options.should_continue(self.errors) {
            return Err(err);
        }
        self.errors += 1;
        log::warn!("Skipping malformed structure element: {}", err);
        Ok(())
    }

    /// Parse the /K entry (children) of a structure element or of the root.
    ///
    /// /K can be:
    /// 1. A single integer (MCID)
    /// 2. A dictionary (StructElem, MCR or OBJR)
    /// 3. A reference to a StructElem
    /// 4. An array of any of the above
    fn parse_kids(
        &mut self,
        k_obj: &Object,
        depth: u32,
        inherited: &Inherited,
    ) -> Result<Vec<ElementBuilder>> {
        let mut kids = Vec::new();
        match k_obj {
            Object::Array(items) => {
                for item in items {
                    if let Some(kid) = self.parse_kid(item, depth, inherited)? {
                        kids.push(kid);
                    }
                }
            },
            other => {
                if let Some(kid) = self.parse_kid(other, depth, inherited)? {
                    kids.push(kid);
                }
            },
        }
        Ok(kids)
    }

    fn parse_kid(
        &mut self,
        obj: &Object,
        depth: u32,
        inherited: &Inherited,
    ) -> Result<Option<ElementBuilder>> {
        match obj {
            Object::Integer(mcid) => match u32::try_from(*mcid) {
                Ok(mcid) => Ok(Some(self.content_item(mcid, inherited.page, inherited))),
                Err(_) => {
                    self.recover(Error::InvalidPdf(format!("Invalid MCID {}", mcid)))?;
                    Ok(None)
                },
            },

            Object::Dictionary(dict) => self.parse_dict(dict, depth, inherited),

            Object::Reference(obj_ref) => self.parse_reference(*obj_ref, depth, inherited),

            Object::Null => Ok(None),

            other => {
                log::debug!("Ignoring /K entry of type {}", other.type_name());
                Ok(None)
            },
        }
    }

    fn parse_reference(
        &mut self,
        obj_ref: ObjectRef,
        depth: u32,
        inherited: &Inherited,
    ) -> Result<Option<ElementBuilder>> {
        if self.path.contains(&obj_ref) {
            self.recover(Error::CircularReference(obj_ref))?;
            return Ok(None);
        }
        if !self.seen.insert(obj_ref) {
            self.recover(Error::InvalidPdf(format!(
                "Structure element {} is referenced more than once",
                obj_ref
            )))?;
            return Ok(None);
        }

        let obj = match self.source.load_object(obj_ref) {
            Ok(obj) => obj,
            Err(e) => {
                self.recover(e)?;
                return Ok(None);
            },
        };

        let dict = match obj.as_dict() {
            Some(dict) => dict,
            None => {
                self.recover(Error::InvalidObjectType {
                    expected: "Dictionary".to_string(),
                    found: obj.type_name().to_string(),
                })?;
                return Ok(None);
            },
        };

        self.path.insert(obj_ref);
        let result = self.parse_dict(dict, depth, inherited);
        self.path.remove(&obj_ref);
        result
    }

    /// Parse a dictionary child: StructElem, marked-content reference or
    /// object reference.
    fn parse_dict(
        &mut self,
        dict: &HashMap<String, Object>,
        depth: u32,
        inherited: &Inherited,
    ) -> Result<Option<ElementBuilder>> {
        if depth >= self.options.max_depth {
            self.recover(Error::RecursionLimitExceeded(self.options.max_depth))?;
            return Ok(None);
        }

        match dict.get("Type").and_then(Object::as_name) {
            Some("MCR") => self.parse_marked_content_ref(dict, inherited),
            Some("OBJR") => self.parse_object_ref(dict, inherited),
            Some("StructElem") => self.parse_struct_elem(dict, depth, inherited),
            None if !dict.contains_key("S") && dict.contains_key("MCID") => {
                self.parse_marked_content_ref(dict, inherited)
            },
            None => self.parse_struct_elem(dict, depth, inherited),
            Some(other) => {
                log::debug!("Ignoring /K dictionary of type /{}", other);
                Ok(None)
            },
        }
    }

    /// Parse a structure element (StructElem) dictionary.
    fn parse_struct_elem(
        &mut self,
        dict: &HashMap<String, Object>,
        depth: u32,
        inherited: &Inherited,
    ) -> Result<Option<ElementBuilder>> {
        // Get /S (structure type) - REQUIRED
        let s_name = match dict.get("S").and_then(Object::as_name) {
            Some(name) => name,
            None => {
                self.recover(Error::InvalidPdf("StructElem missing /S".into()))?;
                return Ok(None);
            },
        };

        let mut elem = ElementBuilder::new(self.resolve_type(s_name));

        let page = dict.get("Pg").and_then(Object::as_reference).or(inherited.page);
        if let Some(page) = page {
            elem = elem.page(page);
        }

        let own_language = self.text_entry(dict, "Lang");
        let language = own_language.or_else(|| inherited.language.clone());
        {
            let fields = elem.fields_mut();
            fields.id = self.text_entry(dict, "ID");
            fields.title = self.text_entry(dict, "T");
            fields.language = language.clone();
            fields.alt_text = self.text_entry(dict, "Alt");
            fields.actual_text = self.text_entry(dict, "ActualText");
            fields.expanded_abbr = self.text_entry(dict, "E");
        }

        if let Some(attr_obj) = dict.get("A") {
            self.collect_attributes(attr_obj, &mut elem);
        }

        if let Some(k_obj) = dict.get("K") {
            let child_inherited = Inherited { page, language };
            for kid in self.parse_kids(k_obj, depth + 1, &child_inherited)? {
                elem.push_child(kid);
            }
        }

        Ok(Some(elem))
    }

    /// Parse a marked content reference dictionary.
    ///
    /// According to ISO 32000-1, a marked content reference has:
    /// - /Type /MCR
    /// - /Pg - Page containing the marked content (optional, else inherited)
    /// - /MCID - Marked content ID
    fn parse_marked_content_ref(
        &mut self,
        dict: &HashMap<String, Object>,
        inherited: &Inherited,
    ) -> Result<Option<ElementBuilder>> {
        let mcid = match dict
            .get("MCID")
            .and_then(Object::as_integer)
            .and_then(|mcid| u32::try_from(mcid).ok())
        {
            Some(mcid) => mcid,
            None => {
                self.recover(Error::InvalidPdf("MCR missing /MCID".into()))?;
                return Ok(None);
            },
        };

        let page = dict.get("Pg").and_then(Object::as_reference).or(inherited.page);
        Ok(Some(self.content_item(mcid, page, inherited)))
    }

    /// Parse an object reference dictionary (/Type /OBJR, /Obj, /Pg).
    fn parse_object_ref(
        &mut self,
        dict: &HashMap<String, Object>,
        inherited: &Inherited,
    ) -> Result<Option<ElementBuilder>> {
        let target = match dict.get("Obj").and_then(Object::as_reference) {
            Some(target) => target,
            None => {
                self.recover(Error::InvalidPdf("OBJR missing /Obj".into()))?;
                return Ok(None);
            },
        };

        let mut item = ElementBuilder::object_reference(target);
        if let Some(page) = dict.get("Pg").and_then(Object::as_reference).or(inherited.page) {
            item = item.page(page);
        }
        item.fields_mut().language = inherited.language.clone();
        Ok(Some(item))
    }

    fn content_item(
        &self,
        mcid: u32,
        page: Option<ObjectRef>,
        inherited: &Inherited,
    ) -> ElementBuilder {
        let mut item = ElementBuilder::content(mcid);
        if let Some(page) = page {
            item = item
                .page(page)
                .ops(self.source.marked_content_ops(page, mcid));
        }
        item.fields_mut().language = inherited.language.clone();
        item
    }

    /// Map a structure type name to a standard type, following the RoleMap.
    fn resolve_type(&self, name: &str) -> RawStructType {
        if RawStructType::is_standard_name(name) || !self.options.apply_role_map {
            return RawStructType::from_name(name);
        }

        let mut current = name;
        for _ in 0..self.options.max_role_map_chain {
            match self.role_map.get(current) {
                Some(mapped) => {
                    current = mapped.as_str();
                    if RawStructType::is_standard_name(current) {
                        log::debug!("RoleMap: /{} -> /{}", name, current);
                        return RawStructType::from_name(current);
                    }
                },
                None => break,
            }
        }

        log::debug!("Unknown structure type /{}", name);
        RawStructType::Unknown
    }

    /// A text-string entry, resolving an indirect value.
    fn text_entry(&self, dict: &HashMap<String, Object>, key: &str) -> Option<Vec<u8>> {
        let obj = dict.get(key)?;
        match obj {
            Object::String(bytes) => Some(bytes.clone()),
            Object::Reference(_) => resolve_object(self.source, obj)
                .ok()
                .and_then(|resolved| resolved.as_string().map(<[u8]>::to_vec)),
            _ => None,
        }
    }

    /// Gather /A attribute dictionaries into the element.
    ///
    /// /A is a dictionary, a reference, or an array of those (optionally
    /// interleaved with revision numbers). Later dictionaries override earlier
    /// ones; the /O owner entry is dropped.
    fn collect_attributes(&self, attr_obj: &Object, elem: &mut ElementBuilder) {
        let attr_obj = match resolve_object(self.source, attr_obj) {
            Ok(obj) => obj,
            Err(e) => {
                log::warn!("Cannot resolve structure attributes: {}", e);
                return;
            },
        };

        match &attr_obj {
            Object::Array(items) => {
                for item in items {
                    if !matches!(item, Object::Integer(_)) {
                        self.collect_attributes(item, elem);
                    }
                }
            },
            Object::Dictionary(dict) => {
                let attributes = elem.attributes_mut();
                for (key, value) in dict {
                    if key != "O" {
                        attributes.insert(key.clone(), value.clone());
                    }
                }
            },
            _ => {},
        }
    }
}

/// An in-memory [`StructureSource`], for documents already loaded elsewhere.
#[derive(Debug, Clone, Default)]
pub struct MemorySource {
    catalog: HashMap<String, Object>,
    objects: HashMap<ObjectRef, Object>,
    pages: HashMap<ObjectRef, u32>,
    content: HashMap<(ObjectRef, u32), Vec<MarkedContentOp>>,
}

impl MemorySource {
    /// Create a source with an empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a catalog entry (e.g. /StructTreeRoot).
    pub fn set_catalog_entry(&mut self, key: impl Into<String>, value: Object) {
        self.catalog.insert(key.into(), value);
    }

    /// Register an indirect object.
    pub fn insert_object(&mut self, obj_ref: ObjectRef, obj: Object) {
        self.objects.insert(obj_ref, obj);
    }

    /// Register a page object with its one-based page number.
    pub fn insert_page(&mut self, page_ref: ObjectRef, page_number: u32) {
        self.pages.insert(page_ref, page_number);
    }

    /// Register the operators of one marked-content sequence.
    pub fn insert_marked_content(
        &mut self,
        page_ref: ObjectRef,
        mcid: u32,
        ops: Vec<MarkedContentOp>,
    ) {
        self.content.insert((page_ref, mcid), ops);
    }
}

impl StructureSource for MemorySource {
    fn catalog(&self) -> Result<Object> {
        Ok(Object::Dictionary(self.catalog.clone()))
    }

    fn load_object(&self, obj_ref: ObjectRef) -> Result<Object> {
        self.objects
            .get(&obj_ref)
            .cloned()
            .ok_or(Error::ObjectNotFound(obj_ref.id, obj_ref.gen))
    }

    fn marked_content_ops(&self, page: ObjectRef, mcid: u32) -> Vec<MarkedContentOp> {
        self.content.get(&(page, mcid)).cloned().unwrap_or_default()
    }

    fn page_resolver(&self) -> Arc<dyn PageResolver> {
        Arc::new(self.pages.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::structure::types::StructureKind;

    fn name(s: &str) -> Object {
        Object::Name(s.to_string())
    }

    fn dict(entries: Vec<(&str, Object)>) -> Object {
        Object::Dictionary(entries.into_iter().map(|(k, v)| (k.to_string(), v)).collect())
    }

    fn tagged(root: Object) -> MemorySource {
        let mut source = MemorySource::new();
        let root_ref = ObjectRef::new(1, 0);
        source.insert_object(root_ref, root);
        source.set_catalog_entry("StructTreeRoot", Object::Reference(root_ref));
        source
    }

    #[test]
    fn test_untagged_document() {
        let source = MemorySource::new();
        let result = parse_structure_tree(&source, &StructureOptions::default()).unwrap();
        assert!(result.is_none());
        assert!(open_tree(&source).is_none());
    }

    #[test]
    fn test_empty_structure_tree_is_not_opened() {
        let source = tagged(dict(vec![("Type", name("StructTreeRoot"))]));
        let tree = parse_structure_tree(&source, &StructureOptions::default())
            .unwrap()
            .unwrap();
        assert!(tree.is_empty());
        assert!(open_tree(&source).is_none());
    }

    #[test]
    fn test_role_map_resolution() {
        let source = tagged(dict(vec![
            ("RoleMap", dict(vec![("Heading1", name("Head")), ("Head", name("H1"))])),
            (
                "K",
                Object::Array(vec![
                    dict(vec![("S", name("Heading1"))]),
                    dict(vec![("S", name("Fancy"))]),
                ]),
            ),
        ]));
        let tree = open_tree(&source).unwrap();

        assert_eq!(tree.roots()[0].kind(), StructureKind::Heading1);
        assert_eq!(tree.roots()[1].kind(), StructureKind::Unknown);
        assert_eq!(tree.role_map().len(), 2);
    }

    #[test]
    fn test_parsed_role_map_is_sorted_by_name() {
        let source = tagged(dict(vec![
            (
                "RoleMap",
                dict(vec![("Zeta", name("P")), ("Alpha", name("H1")), ("Mid", name("Span"))]),
            ),
            ("K", dict(vec![("S", name("Alpha"))])),
        ]));
        let tree = open_tree(&source).unwrap();

        let keys: Vec<_> = tree.role_map().keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["Alpha", "Mid", "Zeta"]);
    }

    #[test]
    fn test_role_map_disabled() {
        let source = tagged(dict(vec![
            ("RoleMap", dict(vec![("Heading1", name("H1"))])),
            ("K", dict(vec![("S", name("Heading1"))])),
        ]));
        let options = StructureOptions::default().with_role_map(false);
        let tree = parse_structure_tree(&source, &options).unwrap().unwrap();

        assert_eq!(tree.roots()[0].kind(), StructureKind::Unknown);
    }

    #[test]
    fn test_role_map_cycle_terminates() {
        let source = tagged(dict(vec![
            ("RoleMap", dict(vec![("A", name("B")), ("B", name("A"))])),
            ("K", dict(vec![("S", name("A"))])),
        ]));
        let tree = open_tree(&source).unwrap();

        assert_eq!(tree.roots()[0].kind(), StructureKind::Unknown);
    }

    #[test]
    fn test_missing_s_strict_vs_lenient() {
        let source = tagged(dict(vec![(
            "K",
            Object::Array(vec![
                dict(vec![("Type", name("StructElem"))]),
                dict(vec![("S", name("P"))]),
            ]),
        )]));

        let lenient = parse_structure_tree(&source, &StructureOptions::lenient())
            .unwrap()
            .unwrap();
        assert_eq!(lenient.len(), 1);

        let strict = parse_structure_tree(&source, &StructureOptions::strict());
        assert!(matches!(strict, Err(Error::InvalidPdf(_))));
    }

    #[test]
    fn test_circular_reference_is_cut() {
        let mut source = tagged(dict(vec![("K", Object::Reference(ObjectRef::new(2, 0)))]));
        source.insert_object(
            ObjectRef::new(2, 0),
            dict(vec![
                ("S", name("Div")),
                ("K", Object::Reference(ObjectRef::new(2, 0))),
            ]),
        );

        let tree = open_tree(&source).unwrap();
        assert_eq!(tree.node_count(), 1);

        let strict = parse_structure_tree(&source, &StructureOptions::strict());
        assert!(matches!(strict, Err(Error::CircularReference(_))));
    }

    #[test]
    fn test_shared_element_is_parsed_once() {
        let mut source = tagged(dict(vec![(
            "K",
            Object::Array(vec![
                Object::Reference(ObjectRef::new(2, 0)),
                Object::Reference(ObjectRef::new(2, 0)),
            ]),
        )]));
        source.insert_object(
            ObjectRef::new(2, 0),
            dict(vec![("S", name("P")), ("K", Object::Integer(0))]),
        );

        let tree = open_tree(&source).unwrap();
        assert_eq!(tree.len(), 1);
        assert_eq!(tree.node_count(), 2);

        let strict = parse_structure_tree(&source, &StructureOptions::strict());
        assert!(matches!(strict, Err(Error::InvalidPdf(_))));
    }

    #[test]
    fn test_shared_chain_stays_linear() {
        // Every Div lists the next one twice; expanding both would give 2^n nodes
        let count = 24;
        let mut source = tagged(dict(vec![("K", Object::Reference(ObjectRef::new(2, 0)))]));
        for id in 2..count + 2 {
            let next = Object::Reference(ObjectRef::new(id + 1, 0));
            let elem = if id == count + 1 {
                dict(vec![("S", name("P"))])
            } else {
                dict(vec![("S", name("Div")), ("K", Object::Array(vec![next.clone(), next]))])
            };
            source.insert_object(ObjectRef::new(id, 0), elem);
        }

        let tree = open_tree(&source).unwrap();
        assert_eq!(tree.node_count(), count as usize);
    }

    #[test]
    fn test_depth_limit() {
        let mut elem = dict(vec![("S", name("P"))]);
        for _ in 0..10 {
            elem = dict(vec![("S", name("Div")), ("K", elem)]);
        }
        let source = tagged(dict(vec![("K", elem)]));
        let options = StructureOptions::lenient().with_max_depth(4);
        let tree = parse_structure_tree(&source, &options).unwrap().unwrap();

        assert_eq!(tree.node_count(), 4);
    }

    #[test]
    fn test_missing_object_is_skipped_in_lenient_mode() {
        let source = tagged(dict(vec![(
            "K",
            Object::Array(vec![
                Object::Reference(ObjectRef::new(99, 0)),
                dict(vec![("S", name("P"))]),
            ]),
        )]));

        assert_eq!(open_tree(&source).unwrap().len(), 1);
        let strict = parse_structure_tree(&source, &StructureOptions::strict());
        assert!(matches!(strict, Err(Error::ObjectNotFound(99, 0))));
    }
}
