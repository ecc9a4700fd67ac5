//! Marked-content operators attached to content items.
//!
//! Content-stream interpretation is done by the caller; what reaches the
//! structure tree is the already reduced sequence of operations for one
//! marked-content sequence: character codes interleaved with the style, color,
//! font and link changes that apply to them.

use serde::Serialize;

/// A 24-bit RGB color (`0x00RRGGBB`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Rgb(u32);

impl Rgb {
    /// Create a color from its 8-bit channels.
    pub fn new(r: u8, g: u8, b: u8) -> Self {
        Self(((r as u32) << 16) | ((g as u32) << 8) | b as u32)
    }

    /// Create a color from a packed `0xRRGGBB` value (upper byte ignored).
    pub fn from_pixel(pixel: u32) -> Self {
        Self(pixel & 0x00FF_FFFF)
    }

    /// Create a color from PDF color components in the range 0.0 - 1.0.
    ///
    /// Components outside the range are clamped.
    pub fn from_components(r: f32, g: f32, b: f32) -> Self {
        fn channel(value: f32) -> u8 {
            (value.clamp(0.0, 1.0) * 255.0).round() as u8
        }
        Self::new(channel(r), channel(g), channel(b))
    }

    /// Packed `0xRRGGBB` value.
    pub fn pixel(&self) -> u32 {
        self.0
    }

    /// Red channel
    pub fn r(&self) -> u8 {
        (self.0 >> 16) as u8
    }

    /// Green channel
    pub fn g(&self) -> u8 {
        (self.0 >> 8) as u8
    }

    /// Blue channel
    pub fn b(&self) -> u8 {
        self.0 as u8
    }
}

impl std::fmt::Display for Rgb {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{:06X}", self.0)
    }
}

/// Font style state carried by a [`MarkedContentOp::Style`] operator.
///
/// Every style operator replaces the whole style: a flag that is not set is
/// cleared.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct TextStyle {
    /// Bold font
    pub bold: bool,
    /// Fixed-width font
    pub fixed_width: bool,
    /// Italic font
    pub italic: bool,
    /// Serif font
    pub serif: bool,
    /// Text is the anchor of a hyperlink
    pub link: bool,
}

impl TextStyle {
    /// Plain style (no flags set).
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the bold flag.
    pub fn bold(mut self) -> Self {
        self.bold = true;
        self
    }

    /// Set the fixed-width flag.
    pub fn fixed_width(mut self) -> Self {
        self.fixed_width = true;
        self
    }

    /// Set the italic flag.
    pub fn italic(mut self) -> Self {
        self.italic = true;
        self
    }

    /// Set the serif flag.
    pub fn serif(mut self) -> Self {
        self.serif = true;
        self
    }

    /// Set the link flag.
    pub fn link(mut self) -> Self {
        self.link = true;
        self
    }
}

/// One marked-content operation.
#[derive(Debug, Clone, PartialEq)]
pub enum MarkedContentOp {
    /// Show one character code
    Char(u32),
    /// Replace the current font style flags
    Style(TextStyle),
    /// Set the fill color, or clear it with `None`
    Color(Option<Rgb>),
    /// Set the font name, or clear it with `None`
    FontName(Option<String>),
    /// Link target text for the text under the current `link` style.
    ///
    /// Follows the [`MarkedContentOp::Style`] that sets the link flag.
    LinkTarget(String),
}

impl MarkedContentOp {
    /// One [`MarkedContentOp::Char`] per character of `text`.
    pub fn chars(text: &str) -> impl Iterator<Item = MarkedContentOp> + '_ {
        text.chars().map(|c| MarkedContentOp::Char(c as u32))
    }

    /// Font name operator.
    pub fn font(name: impl Into<String>) -> Self {
        MarkedContentOp::FontName(Some(name.into()))
    }

    /// Check if this operator shows text
    pub fn is_char(&self) -> bool {
        matches!(self, MarkedContentOp::Char(_))
    }
}
