//! Structure type vocabulary for PDF logical structure trees.
//!
//! Two enumerations live here:
//! - [`RawStructType`]: the document format's own vocabulary, i.e. the standard
//!   structure types of ISO 32000-1:2008 Section 14.8.4 plus the two
//!   content-item pseudo types (marked-content and object references).
//! - [`StructureKind`]: the closed classification exposed to callers.
//!
//! [`StructureKind::from_raw`] is an exhaustive `match`, so every raw type has
//! exactly one kind and adding a raw type without classifying it does not
//! compile.

use serde::Serialize;

/// How a structure type participates in layout.
///
/// Per ISO 32000-1 Section 14.8.4, standard types are grouping elements,
/// block-level structure elements, or inline-level structure elements.
/// Table and illustration parts have no defined layout category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ElementCategory {
    /// Grouping elements (Document, Part, Sect, ...)
    Grouping,
    /// Block-level structure elements (P, H1, L, Table, ...)
    Block,
    /// Inline-level structure elements (Span, Link, Quote, ...)
    Inline,
    /// No layout category (content items, table parts, figures, ...)
    Undefined,
}

/// Raw structure type as found in the document (after RoleMap resolution).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RawStructType {
    /// Unrecognized structure type name
    Unknown,
    /// Marked-content reference (integer /K entry or /MCR dictionary)
    MCID,
    /// Object reference (/OBJR dictionary)
    OBJR,

    // Grouping elements
    /// Document root
    Document,
    /// Part (major division)
    Part,
    /// Article
    Art,
    /// Section
    Sect,
    /// Division
    Div,
    /// Block quotation
    BlockQuote,
    /// Caption
    Caption,
    /// Table of contents
    TOC,
    /// Table of contents item
    TOCI,
    /// Index
    Index,
    /// Non-structural grouping
    NonStruct,
    /// Private (producer-specific) content
    Private,

    // Paragraph-like elements
    /// Paragraph
    P,
    /// Heading of unspecified level
    H,
    /// Heading level 1
    H1,
    /// Heading level 2
    H2,
    /// Heading level 3
    H3,
    /// Heading level 4
    H4,
    /// Heading level 5
    H5,
    /// Heading level 6
    H6,

    // List elements
    /// List
    L,
    /// List item
    LI,
    /// Label (list item marker)
    Lbl,
    /// List body (list item content)
    LBody,

    // Table elements
    /// Table
    Table,
    /// Table row
    TR,
    /// Table header cell
    TH,
    /// Table data cell
    TD,
    /// Table header group
    THead,
    /// Table body group
    TBody,
    /// Table footer group
    TFoot,

    // Inline elements
    /// Span (inline generic)
    Span,
    /// Quote
    Quote,
    /// Note
    Note,
    /// Reference
    Reference,
    /// Bibliographic entry
    BibEntry,
    /// Code
    Code,
    /// Link
    Link,
    /// Annotation
    Annot,
    /// Ruby annotation wrapper
    Ruby,
    /// Ruby base text
    RB,
    /// Ruby annotation text
    RT,
    /// Ruby punctuation
    RP,
    /// Warichu wrapper
    Warichu,
    /// Warichu text
    WT,
    /// Warichu punctuation
    WP,

    // Illustration elements
    /// Figure
    Figure,
    /// Formula
    Formula,
    /// Form (input field)
    Form,
}

static RAW_TYPE_NAMES: phf::Map<&'static str, RawStructType> = phf::phf_map! {
    "Document" => RawStructType::Document,
    "Part" => RawStructType::Part,
    "Art" => RawStructType::Art,
    "Sect" => RawStructType::Sect,
    "Div" => RawStructType::Div,
    "BlockQuote" => RawStructType::BlockQuote,
    "Caption" => RawStructType::Caption,
    "TOC" => RawStructType::TOC,
    "TOCI" => RawStructType::TOCI,
    "Index" => RawStructType::Index,
    "NonStruct" => RawStructType::NonStruct,
    "Private" => RawStructType::Private,
    "P" => RawStructType::P,
    "H" => RawStructType::H,
    "H1" => RawStructType::H1,
    "H2" => RawStructType::H2,
    "H3" => RawStructType::H3,
    "H4" => RawStructType::H4,
    "H5" => RawStructType::H5,
    "H6" => RawStructType::H6,
    "L" => RawStructType::L,
    "LI" => RawStructType::LI,
    "Lbl" => RawStructType::Lbl,
    "LBody" => RawStructType::LBody,
    "Table" => RawStructType::Table,
    "TR" => RawStructType::TR,
    "TH" => RawStructType::TH,
    "TD" => RawStructType::TD,
    "THead" => RawStructType::THead,
    "TBody" => RawStructType::TBody,
    "TFoot" => RawStructType::TFoot,
    "Span" => RawStructType::Span,
    "Quote" => RawStructType::Quote,
    "Note" => RawStructType::Note,
    "Reference" => RawStructType::Reference,
    "BibEntry" => RawStructType::BibEntry,
    "Code" => RawStructType::Code,
    "Link" => RawStructType::Link,
    "Annot" => RawStructType::Annot,
    "Ruby" => RawStructType::Ruby,
    "RB" => RawStructType::RB,
    "RT" => RawStructType::RT,
    "RP" => RawStructType::RP,
    "Warichu" => RawStructType::Warichu,
    "WT" => RawStructType::WT,
    "WP" => RawStructType::WP,
    "Figure" => RawStructType::Figure,
    "Formula" => RawStructType::Formula,
    "Form" => RawStructType::Form,
};

impl RawStructType {
    /// Look up a standard structure type name (e.g. "P", "H1", "TOCI").
    ///
    /// Unrecognized names map to [`RawStructType::Unknown`]; role mapping of
    /// custom names must happen before this lookup.
    pub fn from_name(name: &str) -> Self {
        RAW_TYPE_NAMES.get(name).copied().unwrap_or(Self::Unknown)
    }

    /// Check whether `name` is a standard structure type name.
    pub fn is_standard_name(name: &str) -> bool {
        RAW_TYPE_NAMES.contains_key(name)
    }

    /// The standard name for this type, if it has one.
    pub fn name(&self) -> Option<&'static str> {
        RAW_TYPE_NAMES
            .entries()
            .find(|(_, raw)| *raw == self)
            .map(|(name, _)| *name)
    }

    /// Check if this is a content item (marked-content or object reference)
    pub fn is_content(&self) -> bool {
        matches!(self, Self::MCID | Self::OBJR)
    }

    /// Check if this is an object reference content item
    pub fn is_object_ref(&self) -> bool {
        matches!(self, Self::OBJR)
    }

    /// Layout category of this type.
    pub fn category(&self) -> ElementCategory {
        match self {
            Self::Document
            | Self::Part
            | Self::Art
            | Self::Sect
            | Self::Div
            | Self::BlockQuote
            | Self::Caption
            | Self::TOC
            | Self::TOCI
            | Self::Index
            | Self::NonStruct
            | Self::Private => ElementCategory::Grouping,

            Self::P
            | Self::H
            | Self::H1
            | Self::H2
            | Self::H3
            | Self::H4
            | Self::H5
            | Self::H6
            | Self::L
            | Self::LI
            | Self::Lbl
            | Self::LBody
            | Self::Table => ElementCategory::Block,

            Self::Span
            | Self::Quote
            | Self::Note
            | Self::Reference
            | Self::BibEntry
            | Self::Code
            | Self::Link
            | Self::Annot
            | Self::Ruby
            | Self::Warichu => ElementCategory::Inline,

            Self::Unknown
            | Self::MCID
            | Self::OBJR
            | Self::RB
            | Self::RT
            | Self::RP
            | Self::WT
            | Self::WP
            | Self::TR
            | Self::TH
            | Self::TD
            | Self::THead
            | Self::TBody
            | Self::TFoot
            | Self::Figure
            | Self::Formula
            | Self::Form => ElementCategory::Undefined,
        }
    }
}

/// Closed classification of a structure element's semantic role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum StructureKind {
    /// Unrecognized structure type
    Unknown,
    /// Marked-content reference (actual page content)
    ContentReference,
    /// Reference to a PDF object (annotation, XObject, ...)
    ObjectReference,
    /// Document
    Document,
    /// Part
    Part,
    /// Article
    Article,
    /// Section
    Section,
    /// Division
    Div,
    /// Span
    Span,
    /// Quote
    Quote,
    /// Note
    Note,
    /// Reference
    Reference,
    /// Bibliography entry
    BibEntry,
    /// Code
    Code,
    /// Link
    Link,
    /// Annotation
    Annotation,
    /// Ruby
    Ruby,
    /// Warichu
    Warichu,
    /// Block quote
    BlockQuote,
    /// Caption
    Caption,
    /// Non-structural grouping
    NonStruct,
    /// Table of contents
    TOC,
    /// Table of contents item
    TOCItem,
    /// Index
    Index,
    /// Private content
    Private,
    /// Paragraph
    Paragraph,
    /// Heading of unspecified level
    Heading,
    /// Heading level 1
    Heading1,
    /// Heading level 2
    Heading2,
    /// Heading level 3
    Heading3,
    /// Heading level 4
    Heading4,
    /// Heading level 5
    Heading5,
    /// Heading level 6
    Heading6,
    /// List
    List,
    /// List item
    ListItem,
    /// List label
    ListLabel,
    /// List body
    ListBody,
    /// Table
    Table,
    /// Table row
    TableRow,
    /// Table heading cell
    TableHeading,
    /// Table data cell
    TableData,
    /// Table header row group
    TableHeader,
    /// Table footer row group
    TableFooter,
    /// Table body row group
    TableBody,
    /// Figure
    Figure,
    /// Formula
    Formula,
    /// Form
    Form,
}

impl StructureKind {
    /// Classify a raw structure type.
    ///
    /// Ruby and Warichu sub-parts are folded into their wrapper kinds.
    pub fn from_raw(raw: RawStructType) -> Self {
        match raw {
            RawStructType::Unknown => Self::Unknown,
            RawStructType::MCID => Self::ContentReference,
            RawStructType::OBJR => Self::ObjectReference,
            RawStructType::Document => Self::Document,
            RawStructType::Part => Self::Part,
            RawStructType::Art => Self::Article,
            RawStructType::Sect => Self::Section,
            RawStructType::Div => Self::Div,
            RawStructType::Span => Self::Span,
            RawStructType::Quote => Self::Quote,
            RawStructType::Note => Self::Note,
            RawStructType::Reference => Self::Reference,
            RawStructType::BibEntry => Self::BibEntry,
            RawStructType::Code => Self::Code,
            RawStructType::Link => Self::Link,
            RawStructType::Annot => Self::Annotation,
            RawStructType::Ruby | RawStructType::RB | RawStructType::RT | RawStructType::RP => {
                Self::Ruby
            },
            RawStructType::Warichu | RawStructType::WT | RawStructType::WP => Self::Warichu,
            RawStructType::BlockQuote => Self::BlockQuote,
            RawStructType::Caption => Self::Caption,
            RawStructType::NonStruct => Self::NonStruct,
            RawStructType::TOC => Self::TOC,
            RawStructType::TOCI => Self::TOCItem,
            RawStructType::Index => Self::Index,
            RawStructType::Private => Self::Private,
            RawStructType::P => Self::Paragraph,
            RawStructType::H => Self::Heading,
            RawStructType::H1 => Self::Heading1,
            RawStructType::H2 => Self::Heading2,
            RawStructType::H3 => Self::Heading3,
            RawStructType::H4 => Self::Heading4,
            RawStructType::H5 => Self::Heading5,
            RawStructType::H6 => Self::Heading6,
            RawStructType::L => Self::List,
            RawStructType::LI => Self::ListItem,
            RawStructType::Lbl => Self::ListLabel,
            RawStructType::LBody => Self::ListBody,
            RawStructType::Table => Self::Table,
            RawStructType::TR => Self::TableRow,
            RawStructType::TH => Self::TableHeading,
            RawStructType::TD => Self::TableData,
            RawStructType::THead => Self::TableHeader,
            RawStructType::TFoot => Self::TableFooter,
            RawStructType::TBody => Self::TableBody,
            RawStructType::Figure => Self::Figure,
            RawStructType::Formula => Self::Formula,
            RawStructType::Form => Self::Form,
        }
    }

    /// Check if this is a heading kind (Heading, Heading1-Heading6)
    pub fn is_heading(&self) -> bool {
        matches!(
            self,
            Self::Heading
                | Self::Heading1
                | Self::Heading2
                | Self::Heading3
                | Self::Heading4
                | Self::Heading5
                | Self::Heading6
        )
    }

    /// Heading level (1-6) for numbered headings.
    pub fn heading_level(&self) -> Option<u8> {
        match self {
            Self::Heading1 => Some(1),
            Self::Heading2 => Some(2),
            Self::Heading3 => Some(3),
            Self::Heading4 => Some(4),
            Self::Heading5 => Some(5),
            Self::Heading6 => Some(6),
            _ => None,
        }
    }

    /// Check if this is one of the table kinds
    pub fn is_table_part(&self) -> bool {
        matches!(
            self,
            Self::Table
                | Self::TableRow
                | Self::TableHeading
                | Self::TableData
                | Self::TableHeader
                | Self::TableFooter
                | Self::TableBody
        )
    }
}

impl From<RawStructType> for StructureKind {
    fn from(raw: RawStructType) -> Self {
        Self::from_raw(raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_struct_type_parsing() {
        assert_eq!(RawStructType::from_name("P"), RawStructType::P);
        assert_eq!(RawStructType::from_name("H1"), RawStructType::H1);
        assert_eq!(RawStructType::from_name("Document"), RawStructType::Document);
        assert_eq!(RawStructType::from_name("TOCI"), RawStructType::TOCI);
        assert_eq!(RawStructType::from_name("CustomType"), RawStructType::Unknown);
        // Names are case sensitive
        assert_eq!(RawStructType::from_name("p"), RawStructType::Unknown);
    }

    #[test]
    fn test_every_name_round_trips() {
        for (name, raw) in RAW_TYPE_NAMES.entries() {
            assert_eq!(RawStructType::from_name(name), *raw);
            assert_eq!(raw.name(), Some(*name));
        }
        assert_eq!(RawStructType::MCID.name(), None);
    }

    #[test]
    fn test_classification() {
        assert_eq!(StructureKind::from_raw(RawStructType::P), StructureKind::Paragraph);
        assert_eq!(StructureKind::from_raw(RawStructType::Sect), StructureKind::Section);
        assert_eq!(StructureKind::from_raw(RawStructType::TOCI), StructureKind::TOCItem);
        assert_eq!(StructureKind::from_raw(RawStructType::Annot), StructureKind::Annotation);
        assert_eq!(StructureKind::from_raw(RawStructType::MCID), StructureKind::ContentReference);
        assert_eq!(StructureKind::from_raw(RawStructType::OBJR), StructureKind::ObjectReference);
        assert_eq!(StructureKind::from_raw(RawStructType::RT), StructureKind::Ruby);
        assert_eq!(StructureKind::from_raw(RawStructType::WP), StructureKind::Warichu);
    }

    #[test]
    fn test_classification_is_stable() {
        for (_, raw) in RAW_TYPE_NAMES.entries() {
            assert_eq!(StructureKind::from_raw(*raw), StructureKind::from_raw(*raw));
        }
    }

    #[test]
    fn test_is_heading() {
        assert!(StructureKind::Heading1.is_heading());
        assert!(StructureKind::Heading.is_heading());
        assert!(!StructureKind::Paragraph.is_heading());
        assert_eq!(StructureKind::Heading3.heading_level(), Some(3));
        assert_eq!(StructureKind::Heading.heading_level(), None);
    }

    #[test]
    fn test_is_table_part() {
        assert!(StructureKind::from_raw(RawStructType::Table).is_table_part());
        assert!(StructureKind::from_raw(RawStructType::TD).is_table_part());
        assert!(StructureKind::from_raw(RawStructType::THead).is_table_part());
        assert!(!StructureKind::from_raw(RawStructType::L).is_table_part());
        assert!(!StructureKind::Caption.is_table_part());
    }

    #[test]
    fn test_categories() {
        assert_eq!(RawStructType::P.category(), ElementCategory::Block);
        assert_eq!(RawStructType::Sect.category(), ElementCategory::Grouping);
        assert_eq!(RawStructType::Link.category(), ElementCategory::Inline);
        assert_eq!(RawStructType::TD.category(), ElementCategory::Undefined);
        assert_eq!(RawStructType::MCID.category(), ElementCategory::Undefined);
    }

    #[test]
    fn test_content_types() {
        assert!(RawStructType::MCID.is_content());
        assert!(RawStructType::OBJR.is_content());
        assert!(RawStructType::OBJR.is_object_ref());
        assert!(!RawStructType::Span.is_content());
    }
}
