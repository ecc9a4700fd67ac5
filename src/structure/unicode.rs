//! Character code to Unicode mapping used when decoding marked content.

use std::collections::HashMap;

/// Maps character codes from marked content to Unicode text.
pub trait UnicodeMapper: Send + Sync {
    /// Append the Unicode text for `code` to `out`.
    fn map_unicode(&self, code: u32, out: &mut String);

    /// Decode a sequence of codes into a new string.
    fn decode(&self, codes: &[u32]) -> String {
        let mut out = String::with_capacity(codes.len());
        for &code in codes {
            self.map_unicode(code, &mut out);
        }
        out
    }
}

/// Treats codes as Unicode scalar values.
///
/// Codes that are not scalar values (surrogates, values above U+10FFFF)
/// become U+FFFD.
#[derive(Debug, Clone, Copy, Default)]
pub struct CodePointMapper;

impl UnicodeMapper for CodePointMapper {
    fn map_unicode(&self, code: u32, out: &mut String) {
        out.push(char::from_u32(code).unwrap_or(char::REPLACEMENT_CHARACTER));
    }
}

/// Table-driven mapping, e.g. built from a font's ToUnicode CMap.
///
/// One code may map to several characters (ligatures). Codes missing from
/// the table fall back to [`CodePointMapper`].
#[derive(Debug, Clone, Default)]
pub struct TableMapper {
    table: HashMap<u32, String>,
}

impl TableMapper {
    /// Create an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a mapping for `code`.
    pub fn insert(&mut self, code: u32, text: impl Into<String>) {
        self.table.insert(code, text.into());
    }

    /// Builder-style [`TableMapper::insert`].
    pub fn with(mut self, code: u32, text: impl Into<String>) -> Self {
        self.insert(code, text);
        self
    }

    /// Number of explicit mappings
    pub fn len(&self) -> usize {
        self.table.len()
    }

    /// Check if the table has no explicit mappings
    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }
}

impl UnicodeMapper for TableMapper {
    fn map_unicode(&self, code: u32, out: &mut String) {
        match self.table.get(&code) {
            Some(text) => out.push_str(text),
            None => CodePointMapper.map_unicode(code, out),
        }
    }
}
