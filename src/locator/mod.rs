//! Element Locator
//!
//! Finds the element whose opening tag declares a given `id`. The document is
//! walked tag by tag with the memchr scanner, tracking quote state inside tags,
//! so a candidate is always a single opening tag. A parent sharing the tag name
//! can never be mistaken for the element it encloses.

mod span;

pub use span::ElementSpan;

use crate::config::SyncConfig;
use crate::core::attributes::{find_attribute, scan_attributes};
use crate::core::scanner::{is_name_char, Scanner};
use std::ops::Range;

/// Elements whose content is raw text and never holds markup
const RAW_TEXT_ELEMENTS: [&[u8]; 2] = [b"script", b"style"];

/// A tag produced by [`Tags`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Tag {
    /// `<name …>` or `<name …/>`
    Open {
        start: usize,
        name: Range<usize>,
        /// Offset of the closing `>`
        gt: usize,
        self_closing: bool,
    },
    /// `</name>`
    Close { name: Range<usize>, gt: usize },
}

/// Iterator over opening and closing tags
///
/// Comments, CDATA sections, declarations and processing instructions are
/// skipped, as is the body of `<script>` and `<style>`.
pub(crate) struct Tags<'a> {
    input: &'a [u8],
    scanner: Scanner<'a>,
}

impl<'a> Tags<'a> {
    pub(crate) fn new(input: &'a [u8]) -> Self {
        Tags {
            input,
            scanner: Scanner::new(input),
        }
    }

    /// Skip past `terminator`, or to the end of input if it never appears
    fn skip_past(&mut self, terminator: &[u8]) {
        match self.scanner.find_seq(terminator) {
            Some(pos) => self.scanner.set_position(pos + terminator.len()),
            None => self.scanner.exhaust(),
        }
    }

    /// Skip to the close tag of a raw-text element, matched case-insensitively
    fn skip_raw_text(&mut self, name: &[u8]) {
        let input = self.input;
        while let Some(pos) = self.scanner.find_seq(b"</") {
            let after = pos + 2;
            let closes = input
                .get(after..after + name.len())
                .is_some_and(|candidate| candidate.eq_ignore_ascii_case(name))
                && input.get(after + name.len()).is_none_or(|&b| !is_name_char(b));
            if closes {
                self.scanner.set_position(pos);
                return;
            }
            self.scanner.set_position(after);
        }
        self.scanner.exhaust();
    }
}

impl Iterator for Tags<'_> {
    type Item = Tag;

    fn next(&mut self) -> Option<Tag> {
        loop {
            let lt = self.scanner.find_tag_start()?;
            self.scanner.set_position(lt);

            if self.scanner.starts_with(b"<!--") {
                self.scanner.advance(4);
                self.skip_past(b"-->");
                continue;
            }
            if self.scanner.starts_with(b"<![CDATA[") {
                self.skip_past(b"]]>");
                continue;
            }

            match self.scanner.peek_at(1) {
                Some(b'/') => {
                    self.scanner.advance(2);
                    let name_start = self.scanner.position();
                    let name = self.scanner.read_name().map(|n| name_start..name_start + n.len());
                    let Some(gt) = self.scanner.find_tag_end() else {
                        self.scanner.exhaust();
                        return None;
                    };
                    self.scanner.set_position(gt + 1);
                    if let Some(name) = name {
                        return Some(Tag::Close { name, gt });
                    }
                }
                Some(b'!') | Some(b'?') => {
                    self.scanner.advance(2);
                    self.skip_past(b">");
                }
                _ => {
                    self.scanner.advance(1);
                    let name_start = self.scanner.position();
                    let Some(name) = self.scanner.read_name() else {
                        // A bare '<' in text
                        continue;
                    };
                    let name = name_start..name_start + name.len();

                    let Some(gt) = self.scanner.find_tag_end_quoted() else {
                        self.scanner.exhaust();
                        return None;
                    };
                    let self_closing = gt > name.end && self.input[gt - 1] == b'/';
                    self.scanner.set_position(gt + 1);

                    let input = self.input;
                    let raw = &input[name.clone()];
                    if !self_closing && RAW_TEXT_ELEMENTS.iter().any(|r| raw.eq_ignore_ascii_case(r)) {
                        self.skip_raw_text(raw);
                    }

                    return Some(Tag::Open {
                        start: lt,
                        name,
                        gt,
                        self_closing,
                    });
                }
            }
        }
    }
}

/// Locate the element declaring `id="<id>"`
///
/// Only tags whose name starts with the configured element prefix are
/// considered, and only an attribute named exactly `id` with a quoted value
/// equal to `id` matches. Returns `None` when no element declares the id.
pub fn locate<'a>(document: &'a str, id: &str, config: &SyncConfig) -> Option<ElementSpan<'a>> {
    let input = document.as_bytes();
    let mut tags = Tags::new(input);

    while let Some(tag) = tags.next() {
        let Tag::Open { start, name, gt, self_closing } = tag else {
            continue;
        };

        if !config.is_element_name(&input[name.clone()]) || !declares_id(document, name.end, gt, id) {
            continue;
        }

        let open_end = gt + 1;
        let end = if self_closing {
            open_end
        } else {
            matching_close(&mut tags, input, &input[name.clone()]).unwrap_or(open_end)
        };

        return Some(ElementSpan::new(document, start, open_end, end, name));
    }

    None
}

/// Whether the tag attributes between `attrs_start` and `gt` declare `id`
fn declares_id(document: &str, attrs_start: usize, gt: usize, id: &str) -> bool {
    let attrs = scan_attributes(document.as_bytes(), attrs_start, gt);
    find_attribute(&attrs, document.as_bytes(), b"id")
        .filter(|attr| attr.is_quoted())
        .and_then(|attr| attr.value_str(document))
        .is_some_and(|value| value == id)
}

/// Find the end of the close tag matching an open tag named `name`
fn matching_close(tags: &mut Tags<'_>, input: &[u8], name: &[u8]) -> Option<usize> {
    let mut depth = 1usize;

    for tag in tags {
        match tag {
            Tag::Open { name: other, self_closing: false, .. } if input[other.clone()].eq_ignore_ascii_case(name) => {
                depth += 1;
            }
            Tag::Close { name: other, gt } if input[other.clone()].eq_ignore_ascii_case(name) => {
                depth -= 1;
                if depth == 0 {
                    return Some(gt + 1);
                }
            }
            _ => {}
        }
    }

    None
}
