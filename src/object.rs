//! PDF object types.
//!
//! The structure tree is read from the document's object graph. Object
//! parsing itself happens elsewhere; this module only models the values the
//! structure parser inspects and decodes PDF text strings.

use std::collections::HashMap;

/// PDF object representation.
#[derive(Debug, Clone, PartialEq)]
pub enum Object {
    /// Null object
    Null,
    /// Boolean value
    Boolean(bool),
    /// Integer value
    Integer(i64),
    /// Real (floating-point) value
    Real(f64),
    /// String (byte array)
    String(Vec<u8>),
    /// Name (starting with /)
    Name(String),
    /// Array of objects
    Array(Vec<Object>),
    /// Dictionary (key-value pairs)
    Dictionary(HashMap<String, Object>),
    /// Indirect object reference
    Reference(ObjectRef),
}

/// Reference to an indirect object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ObjectRef {
    /// Object number
    pub id: u32,
    /// Generation number
    pub gen: u16,
}

impl ObjectRef {
    /// Create a new object reference.
    pub fn new(id: u32, gen: u16) -> Self {
        Self { id, gen }
    }
}

impl std::fmt::Display for ObjectRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {} R", self.id, self.gen)
    }
}

impl Object {
    /// Get the type name of this object (without data).
    pub fn type_name(&self) -> &'static str {
        match self {
            Object::Null => "Null",
            Object::Boolean(_) => "Boolean",
            Object::Integer(_) => "Integer",
            Object::Real(_) => "Real",
            Object::String(_) => "String",
            Object::Name(_) => "Name",
            Object::Array(_) => "Array",
            Object::Dictionary(_) => "Dictionary",
            Object::Reference(_) => "Reference",
        }
    }

    /// Try to cast to integer.
    pub fn as_integer(&self) -> Option<i64> {
        match self {
            Object::Integer(i) => Some(*i),
            _ => None,
        }
    }

    /// Try to cast to name.
    pub fn as_name(&self) -> Option<&str> {
        match self {
            Object::Name(s) => Some(s),
            _ => None,
        }
    }

    /// Try to cast to dictionary.
    pub fn as_dict(&self) -> Option<&HashMap<String, Object>> {
        match self {
            Object::Dictionary(d) => Some(d),
            _ => None,
        }
    }

    /// Try to cast to array.
    pub fn as_array(&self) -> Option<&Vec<Object>> {
        match self {
            Object::Array(arr) => Some(arr),
            _ => None,
        }
    }

    /// Try to cast to reference.
    pub fn as_reference(&self) -> Option<ObjectRef> {
        match self {
            Object::Reference(r) => Some(*r),
            _ => None,
        }
    }

    /// Try to cast to boolean.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Object::Boolean(b) => Some(*b),
            _ => None,
        }
    }

    /// Try to cast to real number.
    pub fn as_real(&self) -> Option<f64> {
        match self {
            Object::Real(r) => Some(*r),
            _ => None,
        }
    }

    /// Try to cast to string (bytes).
    pub fn as_string(&self) -> Option<&[u8]> {
        match self {
            Object::String(s) => Some(s),
            _ => None,
        }
    }

    /// Check if object is null.
    pub fn is_null(&self) -> bool {
        matches!(self, Object::Null)
    }
}

/// Decode a PDF text string (ISO 32000-1:2008, Section 7.9.2.2).
///
/// - `FE FF` prefix: UTF-16BE
/// - `EF BB BF` prefix: UTF-8 (PDF 2.0)
/// - otherwise: PDFDocEncoding
///
/// An empty input decodes to an empty string. Malformed UTF-16/UTF-8 is
/// decoded lossily rather than rejected.
pub fn decode_text_string(bytes: &[u8]) -> String {
    if let Some(utf16_bytes) = bytes.strip_prefix(&[0xFE, 0xFF]) {
        let units: Vec<u16> = utf16_bytes
            .chunks_exact(2)
            .map(|chunk| u16::from_be_bytes([chunk[0], chunk[1]]))
            .collect();
        String::from_utf16_lossy(&units)
    } else if let Some(utf8_bytes) = bytes.strip_prefix(&[0xEF, 0xBB, 0xBF]) {
        String::from_utf8_lossy(utf8_bytes).into_owned()
    } else {
        bytes.iter().map(|&b| pdfdoc_decode(b)).collect()
    }
}

/// Encode a Rust string as a PDF text string.
///
/// ASCII-only strings are stored as-is (a subset of PDFDocEncoding); anything
/// else is stored as UTF-8 with a byte order mark.
pub fn encode_text_string(text: &str) -> Vec<u8> {
    if text.is_ascii() {
        return text.as_bytes().to_vec();
    }
    let mut bytes = Vec::with_capacity(text.len() + 3);
    bytes.extend_from_slice(&[0xEF, 0xBB, 0xBF]);
    bytes.extend_from_slice(text.as_bytes());
    bytes
}

/// Decode a byte using PDFDocEncoding (ISO 32000-1:2008, Annex D).
///
/// - Codes 0-127: ASCII
/// - Codes 128-159: special Unicode characters
/// - Codes 160-255: Latin-1 (ISO 8859-1)
pub fn pdfdoc_decode(code: u8) -> char {
    match code {
        0..=127 => code as char,

        128 => '\u{2022}', // BULLET
        129 => '\u{2020}', // DAGGER
        130 => '\u{2021}', // DOUBLE DAGGER
        131 => '\u{2026}', // HORIZONTAL ELLIPSIS
        132 => '\u{2014}', // EM DASH
        133 => '\u{2013}', // EN DASH
        134 => '\u{0192}', // LATIN SMALL LETTER F WITH HOOK
        135 => '\u{2044}', // FRACTION SLASH
        136 => '\u{2039}', // SINGLE LEFT-POINTING ANGLE QUOTATION MARK
        137 => '\u{203A}', // SINGLE RIGHT-POINTING ANGLE QUOTATION MARK
        138 => '\u{2212}', // MINUS SIGN
        139 => '\u{2030}', // PER MILLE SIGN
        140 => '\u{201E}', // DOUBLE LOW-9 QUOTATION MARK
        141 => '\u{201C}', // LEFT DOUBLE QUOTATION MARK
        142 => '\u{201D}', // RIGHT DOUBLE QUOTATION MARK
        143 => '\u{2018}', // LEFT SINGLE QUOTATION MARK
        144 => '\u{2019}', // RIGHT SINGLE QUOTATION MARK
        145 => '\u{201A}', // SINGLE LOW-9 QUOTATION MARK
        146 => '\u{2122}', // TRADE MARK SIGN
        147 => '\u{FB01}', // LATIN SMALL LIGATURE FI
        148 => '\u{FB02}', // LATIN SMALL LIGATURE FL
        149 => '\u{0141}', // LATIN CAPITAL LETTER L WITH STROKE
        150 => '\u{0152}', // LATIN CAPITAL LIGATURE OE
        151 => '\u{0160}', // LATIN CAPITAL LETTER S WITH CARON
        152 => '\u{0178}', // LATIN CAPITAL LETTER Y WITH DIAERESIS
        153 => '\u{017D}', // LATIN CAPITAL LETTER Z WITH CARON
        154 => '\u{0131}', // LATIN SMALL LETTER DOTLESS I
        155 => '\u{0142}', // LATIN SMALL LETTER L WITH STROKE
        156 => '\u{0153}', // LATIN SMALL LIGATURE OE
        157 => '\u{0161}', // LATIN SMALL LETTER S WITH CARON
        158 => '\u{017E}', // LATIN SMALL LETTER Z WITH CARON
        159 => '\u{FFFD}', // undefined in PDFDocEncoding

        160..=255 => code as char,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_object_integer() {
        let obj = Object::Integer(42);
        assert_eq!(obj.as_integer(), Some(42));
        assert!(obj.as_name().is_none());
        assert!(!obj.is_null());
    }

    #[test]
    fn test_object_name() {
        let obj = Object::Name("StructElem".to_string());
        assert_eq!(obj.as_name(), Some("StructElem"));
        assert!(obj.as_integer().is_none());
        assert_eq!(obj.type_name(), "Name");
    }

    #[test]
    fn test_object_scalars() {
        assert_eq!(Object::Boolean(true).as_bool(), Some(true));
        assert_eq!(Object::Real(0.5).as_real(), Some(0.5));
        assert!(Object::Integer(1).as_bool().is_none());
        assert!(Object::Integer(1).as_real().is_none());
        assert!(Object::Null.is_null());
    }

    #[test]
    fn test_object_dictionary() {
        let mut dict = HashMap::new();
        dict.insert("S".to_string(), Object::Name("P".to_string()));
        let obj = Object::Dictionary(dict);

        let d = obj.as_dict().unwrap();
        assert_eq!(d.get("S").unwrap().as_name(), Some("P"));
    }

    #[test]
    fn test_object_reference() {
        let obj_ref = ObjectRef::new(10, 0);
        let obj = Object::Reference(obj_ref);

        assert_eq!(obj.as_reference(), Some(obj_ref));
        assert_eq!(format!("{}", obj_ref), "10 0 R");
    }

    #[test]
    fn test_decode_pdfdoc_string() {
        assert_eq!(decode_text_string(b"Chapter 1"), "Chapter 1");
        assert_eq!(decode_text_string(&[0x84, b'x']), "\u{2014}x");
        assert_eq!(decode_text_string(&[0xE9]), "é");
    }

    #[test]
    fn test_decode_utf16_string() {
        let bytes = [0xFE, 0xFF, 0x00, b'H', 0x00, b'i', 0x04, 0x14];
        assert_eq!(decode_text_string(&bytes), "Hi\u{0414}");
    }

    #[test]
    fn test_decode_utf8_string() {
        let mut bytes = vec![0xEF, 0xBB, 0xBF];
        bytes.extend_from_slice("naïve".as_bytes());
        assert_eq!(decode_text_string(&bytes), "naïve");
    }

    #[test]
    fn test_decode_empty_string_stays_empty() {
        assert_eq!(decode_text_string(b""), "");
        assert_eq!(decode_text_string(&[0xFE, 0xFF]), "");
    }

    #[test]
    fn test_encode_round_trips_through_decode() {
        for text in ["plain", "", "Grüße", "\u{65E5}\u{672C}"] {
            assert_eq!(decode_text_string(&encode_text_string(text)), text);
        }
    }
}
