//! Styled text spans reconstructed from marked-content operators.
//!
//! [`TextSpanSegmenter`] makes a single forward pass over a content item's
//! operators. Character codes are appended to the current run; any operator
//! that changes the effective style closes the run (using the style that
//! applied to it) before the new style takes effect. Runs without text are
//! dropped, but the style they carried still becomes the running state.

use super::marked_content::{MarkedContentOp, Rgb, TextStyle};
use super::unicode::UnicodeMapper;
use bitflags::bitflags;
use serde::{Serialize, Serializer};

bitflags! {
    /// Attribute flags of a [`TextSpan`].
    #[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
    pub struct SpanFlags: u8 {
        /// Fixed-width font
        const FIXED_WIDTH = 1 << 0;
        /// Serif font
        const SERIF_FONT = 1 << 1;
        /// Italic font
        const ITALIC = 1 << 2;
        /// Bold font
        const BOLD = 1 << 3;
        /// Text is a hyperlink anchor
        const LINK = 1 << 4;
        /// Span carries a color
        const COLOR = 1 << 5;
        /// Span carries a font name
        const FONT = 1 << 6;
    }
}

/// A run of text sharing one set of attributes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TextSpan {
    /// The text (never empty)
    pub text: String,
    /// Font name, present iff [`SpanFlags::FONT`] is set
    pub font_name: Option<String>,
    /// Link target, only present when [`SpanFlags::LINK`] is set
    pub link_target: Option<String>,
    /// Color, present iff [`SpanFlags::COLOR`] is set
    pub color: Option<Rgb>,
    /// Attribute flags
    #[serde(serialize_with = "serialize_flags")]
    pub flags: SpanFlags,
}

fn serialize_flags<S: Serializer>(flags: &SpanFlags, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_u8(flags.bits())
}

impl TextSpan {
    /// Fixed-width font
    pub fn is_fixed_width(&self) -> bool {
        self.flags.contains(SpanFlags::FIXED_WIDTH)
    }

    /// Serif font
    pub fn is_serif_font(&self) -> bool {
        self.flags.contains(SpanFlags::SERIF_FONT)
    }

    /// Italic font
    pub fn is_italic(&self) -> bool {
        self.flags.contains(SpanFlags::ITALIC)
    }

    /// Bold font
    pub fn is_bold(&self) -> bool {
        self.flags.contains(SpanFlags::BOLD)
    }

    /// Hyperlink anchor text
    pub fn is_link(&self) -> bool {
        self.flags.contains(SpanFlags::LINK)
    }
}

/// Running attribute state of the segmenter.
///
/// Compared by value: two states are the same span style exactly when all
/// fields are equal.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
struct SpanStyle {
    style: TextStyle,
    color: Option<Rgb>,
    font_name: Option<String>,
}

impl SpanStyle {
    /// The state after applying `op`. Only attribute operators change it.
    fn apply(&self, op: &MarkedContentOp) -> SpanStyle {
        let mut next = self.clone();
        match op {
            MarkedContentOp::Style(style) => next.style = *style,
            MarkedContentOp::Color(color) => next.color = *color,
            MarkedContentOp::FontName(name) => next.font_name = name.clone(),
            MarkedContentOp::Char(_) | MarkedContentOp::LinkTarget(_) => {},
        }
        next
    }

    fn flags(&self) -> SpanFlags {
        let mut flags = SpanFlags::empty();
        flags.set(SpanFlags::FIXED_WIDTH, self.style.fixed_width);
        flags.set(SpanFlags::SERIF_FONT, self.style.serif);
        flags.set(SpanFlags::ITALIC, self.style.italic);
        flags.set(SpanFlags::BOLD, self.style.bold);
        flags.set(SpanFlags::LINK, self.style.link);
        flags.set(SpanFlags::COLOR, self.color.is_some());
        flags.set(SpanFlags::FONT, self.font_name.is_some());
        flags
    }
}

/// Splits a marked-content operator sequence into [`TextSpan`]s.
pub struct TextSpanSegmenter<'m> {
    mapper: &'m dyn UnicodeMapper,
    text: String,
    link: String,
    state: SpanStyle,
    spans: Vec<TextSpan>,
}

impl<'m> TextSpanSegmenter<'m> {
    /// Create a segmenter decoding character codes with `mapper`.
    pub fn new(mapper: &'m dyn UnicodeMapper) -> Self {
        Self {
            mapper,
            text: String::new(),
            link: String::new(),
            state: SpanStyle::default(),
            spans: Vec::new(),
        }
    }

    /// Segment a whole operator sequence.
    pub fn segment(mapper: &'m dyn UnicodeMapper, ops: &[MarkedContentOp]) -> Vec<TextSpan> {
        let mut segmenter = Self::new(mapper);
        segmenter.process_all(ops);
        segmenter.finish()
    }

    /// Process a sequence of operators.
    pub fn process_all(&mut self, ops: &[MarkedContentOp]) {
        for op in ops {
            self.process(op);
        }
    }

    /// Process one operator.
    pub fn process(&mut self, op: &MarkedContentOp) {
        match op {
            MarkedContentOp::Char(code) => self.mapper.map_unicode(*code, &mut self.text),
            MarkedContentOp::LinkTarget(target) => self.link.push_str(target),
            _ => {
                let next = self.state.apply(op);
                if next != self.state {
                    self.flush();
                    self.state = next;
                }
            },
        }
    }

    /// Close the current run.
    fn flush(&mut self) {
        if !self.text.is_empty() {
            let flags = self.state.flags();
            let link_target = if flags.contains(SpanFlags::LINK) && !self.link.is_empty() {
                Some(self.link.clone())
            } else {
                None
            };
            let span = TextSpan {
                text: std::mem::take(&mut self.text),
                font_name: self.state.font_name.clone(),
                link_target,
                color: self.state.color,
                flags,
            };
            log::trace!("span cut: {:?} ({} bytes)", span.flags, span.text.len());
            self.spans.push(span);
        }

        // A link target only ever belongs to the run it was emitted with
        self.link.clear();
    }

    /// Flush the final run and return all spans in order.
    pub fn finish(mut self) -> Vec<TextSpan> {
        self.flush();
        self.spans
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::structure::unicode::{CodePointMapper, TableMapper};

    fn ch(c: char) -> MarkedContentOp {
        MarkedContentOp::Char(c as u32)
    }

    fn segment(ops: &[MarkedContentOp]) -> Vec<TextSpan> {
        TextSpanSegmenter::segment(&CodePointMapper, ops)
    }

    #[test]
    fn test_plain_text_is_one_span() {
        let ops: Vec<_> = MarkedContentOp::chars("Hello").collect();
        let spans = segment(&ops);

        assert_eq!(spans.len(), 1);
        assert_eq!(spans[0].text, "Hello");
        assert_eq!(spans[0].flags, SpanFlags::empty());
        assert_eq!(spans[0].font_name, None);
        assert_eq!(spans[0].color, None);
    }

    #[test]
    fn test_empty_input_has_no_spans() {
        assert!(segment(&[]).is_empty());
    }

    #[test]
    fn test_style_change_cuts_with_previous_style() {
        let ops = vec![
            ch('a'),
            MarkedContentOp::Style(TextStyle::new().bold()),
            ch('b'),
        ];
        let spans = segment(&ops);

        assert_eq!(spans.len(), 2);
        assert_eq!(spans[0].text, "a");
        assert!(!spans[0].is_bold());
        assert_eq!(spans[1].text, "b");
        assert!(spans[1].is_bold());
    }

    #[test]
    fn test_repeated_style_does_not_cut() {
        let bold = MarkedContentOp::Style(TextStyle::new().bold());
        let ops = vec![bold.clone(), ch('a'), bold, ch('b')];
        let spans = segment(&ops);

        assert_eq!(spans.len(), 1);
        assert_eq!(spans[0].text, "ab");
    }

    #[test]
    fn test_attribute_changes_without_text_are_absorbed() {
        let ops = vec![
            ch('x'),
            MarkedContentOp::Style(TextStyle::new().italic()),
            MarkedContentOp::Color(Some(Rgb::new(255, 0, 0))),
            MarkedContentOp::Style(TextStyle::new().bold()),
            ch('y'),
        ];
        let spans = segment(&ops);

        assert_eq!(spans.len(), 2);
        assert_eq!(spans[1].text, "y");
        assert!(spans[1].is_bold());
        assert!(!spans[1].is_italic());
        assert_eq!(spans[1].color, Some(Rgb::new(255, 0, 0)));
    }

    #[test]
    fn test_color_none_clears_color_flag() {
        let ops = vec![
            MarkedContentOp::Color(Some(Rgb::new(0, 0, 0))),
            ch('a'),
            MarkedContentOp::Color(None),
            ch('b'),
        ];
        let spans = segment(&ops);

        assert_eq!(spans.len(), 2);
        // Black is a real color, distinct from no color
        assert_eq!(spans[0].color, Some(Rgb::new(0, 0, 0)));
        assert!(spans[0].flags.contains(SpanFlags::COLOR));
        assert_eq!(spans[1].color, None);
        assert!(!spans[1].flags.contains(SpanFlags::COLOR));
    }

    #[test]
    fn test_font_name_none_clears_font() {
        let ops = vec![
            MarkedContentOp::font("Times-Roman"),
            ch('a'),
            MarkedContentOp::FontName(None),
            ch('b'),
        ];
        let spans = segment(&ops);

        assert_eq!(spans[0].font_name.as_deref(), Some("Times-Roman"));
        assert!(spans[0].flags.contains(SpanFlags::FONT));
        assert_eq!(spans[1].font_name, None);
        assert!(!spans[1].flags.contains(SpanFlags::FONT));
    }

    #[test]
    fn test_font_switch_cuts_span() {
        let ops = vec![
            MarkedContentOp::font("F1"),
            ch('a'),
            MarkedContentOp::font("F2"),
            ch('b'),
        ];
        let spans = segment(&ops);

        assert_eq!(spans.len(), 2);
        assert_eq!(spans[0].font_name.as_deref(), Some("F1"));
        assert_eq!(spans[1].font_name.as_deref(), Some("F2"));
    }

    #[test]
    fn test_link_target_isolation() {
        let ops = vec![
            MarkedContentOp::font("F1"),
            ch('A'),
            MarkedContentOp::Style(TextStyle::new().link()),
            MarkedContentOp::LinkTarget("https://example.com".to_string()),
            ch('B'),
            MarkedContentOp::Style(TextStyle::new()),
            ch('C'),
        ];
        let spans = segment(&ops);

        assert_eq!(spans.len(), 3);
        assert_eq!(spans[0].text, "A");
        assert_eq!(spans[0].link_target, None);
        assert_eq!(spans[1].text, "B");
        assert!(spans[1].is_link());
        assert_eq!(spans[1].link_target.as_deref(), Some("https://example.com"));
        assert_eq!(spans[2].text, "C");
        assert_eq!(spans[2].link_target, None);
        for span in &spans {
            assert_eq!(span.font_name.as_deref(), Some("F1"));
        }
    }

    #[test]
    fn test_empty_link_anchor_drops_target() {
        let ops = vec![
            ch('a'),
            MarkedContentOp::Style(TextStyle::new().link()),
            MarkedContentOp::LinkTarget("#dest".to_string()),
            MarkedContentOp::Style(TextStyle::new()),
            ch('b'),
        ];
        let spans = segment(&ops);

        assert_eq!(spans.len(), 2);
        assert!(spans.iter().all(|s| s.link_target.is_none()));
        assert!(spans.iter().all(|s| !s.is_link()));
    }

    #[test]
    fn test_link_target_without_link_flag_is_ignored() {
        let ops = vec![MarkedContentOp::LinkTarget("#x".to_string()), ch('a')];
        let spans = segment(&ops);

        assert_eq!(spans[0].link_target, None);
    }

    #[test]
    fn test_mapper_expands_codes() {
        let mapper = TableMapper::new().with(0x01, "fi");
        let ops = vec![MarkedContentOp::Char(0x01), ch('x')];
        let spans = TextSpanSegmenter::segment(&mapper, &ops);

        assert_eq!(spans[0].text, "fix");
    }

    #[test]
    fn test_flag_helpers() {
        let ops = vec![
            MarkedContentOp::Style(TextStyle::new().fixed_width().serif()),
            ch('m'),
        ];
        let span = &segment(&ops)[0];

        assert!(span.is_fixed_width());
        assert!(span.is_serif_font());
        assert!(!span.is_bold());
        assert!(!span.is_link());
    }
}
