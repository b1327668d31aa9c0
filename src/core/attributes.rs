//! Attribute Tokenizing
//!
//! Splits the inside of an opening tag into attribute spans. Values are never
//! decoded: the merger rewrites the original bytes, so every span points back
//! into the tag text.

use super::scanner::{is_attribute_name_char, is_whitespace};
use memchr::memchr;
use std::borrow::Cow;
use std::ops::Range;

/// An attribute located inside an opening tag
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawAttribute {
    /// Attribute name
    pub name: Range<usize>,
    /// Attribute value, without its quotes
    pub value: Option<Range<usize>>,
    /// Quote character delimiting the value, if quoted
    pub quote: Option<u8>,
    /// Position just past the attribute (after the closing quote)
    pub end: usize,
}

impl RawAttribute {
    /// Get the name as a string
    pub fn name_str<'t>(&self, tag: &'t str) -> &'t str {
        &tag[self.name.clone()]
    }

    /// Get the value as a string
    pub fn value_str<'t>(&self, tag: &'t str) -> Option<&'t str> {
        self.value.clone().map(|range| &tag[range])
    }

    /// Whether the value is quoted (`name="…"` or `name='…'`)
    ///
    /// Only quoted attributes take part in in-place updates; a bare or
    /// valueless attribute is treated as absent.
    #[inline]
    pub fn is_quoted(&self) -> bool {
        self.quote.is_some() && self.value.is_some()
    }
}

/// Tokenize the attributes found in `tag[start..end]`
///
/// `start` should point just past the element name and `end` at the tag's
/// closing '>'. Malformed bytes are skipped rather than reported.
pub fn scan_attributes(tag: &[u8], start: usize, end: usize) -> Vec<RawAttribute> {
    let end = end.min(tag.len());
    let mut attrs = Vec::with_capacity(8);
    let mut pos = start;

    while pos < end {
        while pos < end && is_whitespace(tag[pos]) {
            pos += 1;
        }

        if pos >= end {
            break;
        }

        if !is_attribute_name_char(tag[pos]) {
            // Stray '/', quotes, or other junk between attributes
            pos += 1;
            continue;
        }

        let name_start = pos;
        while pos < end && is_attribute_name_char(tag[pos]) {
            pos += 1;
        }
        let name = name_start..pos;

        let mut cursor = pos;
        while cursor < end && is_whitespace(tag[cursor]) {
            cursor += 1;
        }

        if cursor >= end || tag[cursor] != b'=' {
            // Attribute without value (like HTML boolean attributes)
            attrs.push(RawAttribute { name, value: None, quote: None, end: pos });
            continue;
        }

        cursor += 1; // Skip '='
        while cursor < end && is_whitespace(tag[cursor]) {
            cursor += 1;
        }

        if cursor >= end {
            attrs.push(RawAttribute { name, value: None, quote: None, end: cursor });
            break;
        }

        let quote = tag[cursor];
        if quote == b'"' || quote == b'\'' {
            let value_start = cursor + 1;
            let value_end = memchr(quote, &tag[value_start..end])
                .map(|i| value_start + i)
                .unwrap_or(end);
            let after = (value_end + 1).min(end);
            attrs.push(RawAttribute {
                name,
                value: Some(value_start..value_end),
                quote: Some(quote),
                end: after,
            });
            pos = after;
        } else {
            // Unquoted value (non-standard but handle it)
            let value_start = cursor;
            while cursor < end && !is_whitespace(tag[cursor]) && tag[cursor] != b'>' {
                cursor += 1;
            }
            attrs.push(RawAttribute {
                name,
                value: Some(value_start..cursor),
                quote: None,
                end: cursor,
            });
            pos = cursor;
        }
    }

    attrs
}

/// Find the first attribute whose name is exactly `name`
#[inline]
pub fn find_attribute<'a>(attrs: &'a [RawAttribute], tag: &[u8], name: &[u8]) -> Option<&'a RawAttribute> {
    attrs.iter().find(|attr| &tag[attr.name.clone()] == name)
}

/// Escape the quote character delimiting a value so the tag stays well formed
pub fn escape_value(value: &str, quote: u8) -> Cow<'_, str> {
    let (needle, entity) = match quote {
        b'\'' => ('\'', "&#39;"),
        _ => ('"', "&quot;"),
    };
    if value.contains(needle) {
        Cow::Owned(value.replace(needle, entity))
    } else {
        Cow::Borrowed(value)
    }
}
