//! Attribute Merger
//!
//! Applies one element's requested changes to its serialized text. Only the
//! opening tag is rewritten; children and the close tag are copied through.
//! Each change re-tokenizes the tag, so later changes observe earlier ones.

use crate::changes::{AttributeChange, ElementChanges};
use crate::core::attributes::{escape_value, find_attribute, scan_attributes, RawAttribute};
use crate::core::compound;
use crate::core::scanner::Scanner;
use std::ops::Range;

/// Apply `changes` to the element text located for `id`
///
/// `element` must start with the element's opening `<`. Text that does not
/// begin with a well-formed opening tag is returned unchanged.
pub fn merge_element(element: &str, id: &str, changes: &ElementChanges) -> String {
    let bytes = element.as_bytes();
    if bytes.first() != Some(&b'<') {
        return element.to_string();
    }

    let mut scanner = Scanner::at(bytes, 1);
    let Some(name) = scanner.read_name() else {
        return element.to_string();
    };
    let name_end = 1 + name.len();
    let Some(gt) = scanner.find_tag_end_quoted() else {
        return element.to_string();
    };

    let mut tag = OpeningTag {
        text: element[..gt].to_string(),
        name_end,
    };

    for (attribute, change) in changes {
        match change {
            AttributeChange::Scalar(value) | AttributeChange::Literal(value) => tag.set_scalar(attribute, value),
            AttributeChange::Compound(props) => {
                for (property, value) in props {
                    tag.set_property(attribute, property, value);
                }
            }
        }
        tracing::debug!("Updated {} of #{}", attribute, id);
    }

    let mut out = tag.text;
    out.push_str(&element[gt..]);
    out
}

/// Opening tag text up to (not including) its closing `>`
struct OpeningTag {
    text: String,
    name_end: usize,
}

impl OpeningTag {
    fn attributes(&self) -> Vec<RawAttribute> {
        scan_attributes(self.text.as_bytes(), self.name_end, self.text.len())
    }

    /// Value range and quote of the first quoted attribute named `name`
    fn quoted(&self, attrs: &[RawAttribute], name: &str) -> Option<(Range<usize>, u8)> {
        attrs
            .iter()
            .filter(|attr| attr.name_str(&self.text) == name)
            .find_map(|attr| match (&attr.value, attr.quote) {
                (Some(value), Some(quote)) => Some((value.clone(), quote)),
                _ => None,
            })
    }

    /// Replace the value of `attribute`, or add it after `id`
    fn set_scalar(&mut self, attribute: &str, value: &str) {
        let attrs = self.attributes();
        match self.quoted(&attrs, attribute) {
            Some((range, quote)) => {
                self.text.replace_range(range, &escape_value(value, quote));
            }
            None => self.insert(&attrs, attribute, &escape_value(value, b'"')),
        }
    }

    /// Merge one sub-property into `attribute`, creating it if absent
    fn set_property(&mut self, attribute: &str, property: &str, value: &str) {
        let attrs = self.attributes();
        match self.quoted(&attrs, attribute) {
            Some((range, quote)) => {
                let merged = compound::set_property(&self.text[range.clone()], property, &escape_value(value, quote));
                self.text.replace_range(range, &merged);
            }
            None => {
                let fresh = format!("{property}: {}", escape_value(value, b'"'));
                self.insert(&attrs, attribute, &fresh);
            }
        }
    }

    /// Insert ` attribute="value"` right after the `id` attribute
    ///
    /// Falls back to just after the tag name when the tag has no `id`.
    fn insert(&mut self, attrs: &[RawAttribute], attribute: &str, value: &str) {
        let at = find_attribute(attrs, self.text.as_bytes(), b"id")
            .map(|id| id.end)
            .unwrap_or(self.name_end);
        self.text.insert_str(at, &format!(" {attribute}=\"{value}\""));
    }
}
