//! Compound Attribute Values
//!
//! Handles the `prop: value; prop: value` mini-syntax used by multi-property
//! attributes. Edits are made on the raw value text so untouched properties
//! keep their exact spelling and spacing.

use memchr::{memchr, memchr_iter, memrchr};
use std::ops::Range;

/// A `name: value` pair inside a compound value
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Property {
    /// Property name, trimmed
    pub name: Range<usize>,
    /// Everything between the colon and the next delimiter, untrimmed
    pub value: Range<usize>,
}

/// Split a compound value into its properties
///
/// Segments without a colon or with an empty name are malformed and skipped,
/// which makes any change to them take the append path.
pub fn parse_properties(value: &str) -> Vec<Property> {
    let bytes = value.as_bytes();
    let mut props = Vec::new();
    let mut seg_start = 0;

    for seg_end in segment_ends(bytes) {
        if let Some(prop) = parse_segment(bytes, seg_start, seg_end) {
            props.push(prop);
        }
        seg_start = seg_end + 1;
    }

    props
}

/// Set `name` to `new_value`, updating in place or appending
pub fn set_property(value: &str, name: &str, new_value: &str) -> String {
    let existing = parse_properties(value)
        .into_iter()
        .find(|prop| &value[prop.name.clone()] == name);

    match existing {
        Some(prop) => {
            let mut out = String::with_capacity(value.len() + new_value.len() + 1);
            out.push_str(&value[..prop.value.start]);
            out.push(' ');
            out.push_str(new_value);
            out.push_str(&value[prop.value.end..]);
            out
        }
        None => append_property(value, name, new_value),
    }
}

/// Append `name: new_value` after the existing properties
///
/// Trailing delimiters are dropped first, along with whitespace after them.
/// Whitespace that ends the last value belongs to that value and is kept.
pub fn append_property(value: &str, name: &str, new_value: &str) -> String {
    let mut kept = value;
    loop {
        let trimmed = kept.trim_end();
        if trimmed.ends_with(';') && !closes_entity(trimmed.as_bytes(), trimmed.len() - 1) {
            kept = &trimmed[..trimmed.len() - 1];
        } else {
            break;
        }
    }

    if kept.trim().is_empty() {
        format!("{name}: {new_value}")
    } else {
        format!("{kept}; {name}: {new_value}")
    }
}

/// Named references treated as part of a value
const NAMED_ENTITIES: [&[u8]; 6] = [b"amp", b"apos", b"gt", b"lt", b"nbsp", b"quot"];

/// Positions of the delimiting semicolons, plus the end of input
///
/// A semicolon closing a character reference (`&quot;`, `&#39;`) is part of
/// the value, not a delimiter.
fn segment_ends(bytes: &[u8]) -> impl Iterator<Item = usize> + '_ {
    memchr_iter(b';', bytes)
        .filter(move |&semi| !closes_entity(bytes, semi))
        .chain(std::iter::once(bytes.len()))
}

/// Whether the `;` at `semi` ends `&name;`, `&#digits;` or `&#xhex;`
fn closes_entity(bytes: &[u8], semi: usize) -> bool {
    let Some(amp) = memrchr(b'&', &bytes[..semi]) else {
        return false;
    };
    let reference = &bytes[amp + 1..semi];

    match reference {
        [b'#', b'x' | b'X', hex @ ..] => !hex.is_empty() && hex.iter().all(u8::is_ascii_hexdigit),
        [b'#', digits @ ..] => !digits.is_empty() && digits.iter().all(u8::is_ascii_digit),
        name => NAMED_ENTITIES.iter().any(|entity| *entity == name),
    }
}

fn parse_segment(bytes: &[u8], start: usize, end: usize) -> Option<Property> {
    let colon = start + memchr(b':', &bytes[start..end])?;

    let mut name_start = start;
    while name_start < colon && bytes[name_start].is_ascii_whitespace() {
        name_start += 1;
    }
    let mut name_end = colon;
    while name_end > name_start && bytes[name_end - 1].is_ascii_whitespace() {
        name_end -= 1;
    }

    if name_start == name_end {
        return None;
    }

    Some(Property {
        name: name_start..name_end,
        value: colon + 1..end,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pairs(value: &str) -> Vec<(&str, &str)> {
        parse_properties(value)
            .into_iter()
            .map(|p| (&value[p.name], value[p.value].trim()))
            .collect()
    }

    #[test]
    fn test_parse_properties() {
        assert_eq!(pairs("a: 1; b: 2; c: 3"), vec![("a", "1"), ("b", "2"), ("c", "3")]);
        assert_eq!(pairs("  color :red;;opacity:0.5;"), vec![("color", "red"), ("opacity", "0.5")]);
    }

    #[test]
    fn test_malformed_segments_are_skipped() {
        assert_eq!(pairs("nonsense; a: 1; : 2"), vec![("a", "1")]);
        assert!(pairs("").is_empty());
    }

    #[test]
    fn test_entity_semicolon_is_not_a_delimiter() {
        assert_eq!(pairs("label: say &quot;hi&quot;; size: 2"), vec![
            ("label", "say &quot;hi&quot;"),
            ("size", "2"),
        ]);
    }

    #[test]
    fn test_bare_ampersand_is_not_an_entity() {
        assert_eq!(pairs("value: AT&T; color: red"), vec![("value", "AT&T"), ("color", "red")]);
        assert_eq!(pairs("a: &#x1F600; &#128512;; b: 1"), vec![("a", "&#x1F600; &#128512;"), ("b", "1")]);
        assert_eq!(pairs("a: &#; b: 1"), vec![("a", "&#"), ("b", "1")]);
    }

    #[test]
    fn test_update_after_bare_ampersand() {
        assert_eq!(
            set_property("value: AT&T; color: red", "color", "blue"),
            "value: AT&T; color: blue"
        );
    }

    #[test]
    fn test_update_first_property() {
        assert_eq!(set_property("a: 1; b: 2; c: 3", "a", "4"), "a: 4; b: 2; c: 3");
    }

    #[test]
    fn test_update_last_property() {
        assert_eq!(set_property("a: 1; b: 2", "b", "9"), "a: 1; b: 9");
        assert_eq!(set_property("a: 1; b: 2;", "b", "9"), "a: 1; b: 9;");
    }

    #[test]
    fn test_update_ignores_containing_name() {
        assert_eq!(
            set_property("quxqux: 1 2 3; qux: 1 2 3", "qux", "2 3 4"),
            "quxqux: 1 2 3; qux: 2 3 4"
        );
    }

    #[test]
    fn test_append_property() {
        assert_eq!(set_property("a: 1", "b", "2"), "a: 1; b: 2");
        assert_eq!(set_property("a: 1; ", "b", "2"), "a: 1; b: 2");
        assert_eq!(set_property("", "b", "2"), "b: 2");
        assert_eq!(set_property("a: 1;;  ", "b", "2"), "a: 1; b: 2");
        assert_eq!(set_property(" ; ", "b", "2"), "b: 2");
    }

    #[test]
    fn test_append_keeps_trailing_space_of_last_value() {
        assert_eq!(set_property("color: red ", "opacity", "0.5"), "color: red ; opacity: 0.5");
        assert_eq!(set_property("color: red ;", "opacity", "0.5"), "color: red ; opacity: 0.5");
        assert_eq!(set_property("color: ", "opacity", ""), "color: ; opacity: ");
    }

    #[test]
    fn test_append_keeps_trailing_entity() {
        assert_eq!(set_property("label: &quot;", "size", "2"), "label: &quot;; size: 2");
    }

    #[test]
    fn test_set_is_idempotent() {
        let once = set_property("a: 1", "b", "2");
        assert_eq!(set_property(&once, "b", "2"), once);

        let once = set_property(&set_property("color: red", "color", ""), "qux", "");
        assert_eq!(once, "color: ; qux: ");
        assert_eq!(set_property(&set_property(&once, "color", ""), "qux", ""), once);
    }
}
