//! ElementSpan - an element's byte range within a document
//!
//! Borrows the document it was found in, so a span can never outlive the
//! text it indexes. After a splice the document is a new string and spans
//! must be located again.

use std::ops::Range;

/// A located element, from its opening `<` through its matching close tag
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ElementSpan<'a> {
    /// Byte offset of the opening `<`
    pub start: usize,
    /// Byte offset just past the element (exclusive)
    pub end: usize,
    /// Byte offset just past the opening tag's `>` (exclusive)
    pub open_end: usize,
    /// Element tag name
    pub name: &'a str,
    /// Raw element text, `document[start..end]`
    pub text: &'a str,
}

impl<'a> ElementSpan<'a> {
    /// Build a span over `document[start..end]`
    ///
    /// Offsets must fall on char boundaries; the locator only produces
    /// offsets of ASCII delimiters.
    pub(crate) fn new(document: &'a str, start: usize, open_end: usize, end: usize, name: Range<usize>) -> Self {
        ElementSpan {
            start,
            end,
            open_end,
            name: &document[name],
            text: &document[start..end],
        }
    }

    /// Byte range within the document
    #[inline]
    pub fn range(&self) -> Range<usize> {
        self.start..self.end
    }

    /// The opening tag only, `<name …>`
    #[inline]
    pub fn opening_tag(&self) -> &'a str {
        &self.text[..self.open_end - self.start]
    }

    /// Whether the span covers only the opening tag (self-closing or unclosed)
    #[inline]
    pub fn is_open_only(&self) -> bool {
        self.open_end == self.end
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_span_views() {
        let doc = "xx<a-box id=\"b\"></a-box>yy";
        let span = ElementSpan::new(doc, 2, 16, 24, 3..8);
        assert_eq!(span.name, "a-box");
        assert_eq!(span.text, "<a-box id=\"b\"></a-box>");
        assert_eq!(span.opening_tag(), "<a-box id=\"b\">");
        assert_eq!(span.range(), 2..24);
        assert!(!span.is_open_only());
    }

    #[test]
    fn test_open_only_span() {
        let doc = "<a-box id=\"b\"/>";
        let span = ElementSpan::new(doc, 0, doc.len(), doc.len(), 1..6);
        assert!(span.is_open_only());
        assert_eq!(span.opening_tag(), doc);
    }
}
