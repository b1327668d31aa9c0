//! SIMD-accelerated markup scanning using memchr
//!
//! Uses memchr crate for fast byte searching with SIMD acceleration:
//! - SSE2 (default x86_64)
//! - AVX2 (runtime detection)
//! - NEON (aarch64)

use memchr::{memchr, memchr3, memmem};

/// Cursor over a document used to hop between tags
pub struct Scanner<'a> {
    input: &'a [u8],
    pos: usize,
}

impl<'a> Scanner<'a> {
    /// Create a new scanner for the given input
    #[inline]
    pub fn new(input: &'a [u8]) -> Self {
        Scanner { input, pos: 0 }
    }

    /// Create a scanner positioned at `pos`
    #[inline]
    pub fn at(input: &'a [u8], pos: usize) -> Self {
        Scanner { input, pos: pos.min(input.len()) }
    }

    /// Get the current position
    #[inline]
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Set the current position
    #[inline]
    pub fn set_position(&mut self, pos: usize) {
        self.pos = pos.min(self.input.len());
    }

    /// Peek at byte at offset from current position
    #[inline]
    pub fn peek_at(&self, offset: usize) -> Option<u8> {
        self.input.get(self.pos + offset).copied()
    }

    /// Advance by n bytes, clamped to the end of input
    #[inline]
    pub fn advance(&mut self, n: usize) {
        self.pos = (self.pos + n).min(self.input.len());
    }

    /// Jump to the end of input
    #[inline]
    pub fn exhaust(&mut self) {
        self.pos = self.input.len();
    }

    /// Find next '<' (tag start) using SIMD
    #[inline]
    pub fn find_tag_start(&self) -> Option<usize> {
        memchr(b'<', &self.input[self.pos..]).map(|i| self.pos + i)
    }

    /// Find next '>' (tag end) using SIMD
    /// Note: Does not handle '>' inside quotes - use find_tag_end_quoted for that
    #[inline]
    pub fn find_tag_end(&self) -> Option<usize> {
        memchr(b'>', &self.input[self.pos..]).map(|i| self.pos + i)
    }

    /// Find tag end while handling quotes properly
    /// Returns the position of '>' that is not inside a quoted attribute value
    ///
    /// A quote only opens a value directly after '='; elsewhere it is plain
    /// text. An unterminated value falls back to the first '>'.
    pub fn find_tag_end_quoted(&self) -> Option<usize> {
        let mut pos = self.pos;
        while pos < self.input.len() {
            let found = pos + memchr3(b'>', b'"', b'\'', &self.input[pos..])?;
            let quote = self.input[found];
            if quote == b'>' {
                return Some(found);
            }
            if !self.follows_equals(found) {
                pos = found + 1;
                continue;
            }
            match memchr(quote, &self.input[found + 1..]) {
                Some(close) => pos = found + 1 + close + 1,
                None => return self.find_tag_end(),
            }
        }
        None
    }

    /// Whether the last non-whitespace byte before `at` is '='
    fn follows_equals(&self, at: usize) -> bool {
        self.input[self.pos..at]
            .iter()
            .rev()
            .find(|&&b| !is_whitespace(b))
            .is_some_and(|&b| b == b'=')
    }

    /// Find the next occurrence of `needle`, returning its start position
    #[inline]
    pub fn find_seq(&self, needle: &[u8]) -> Option<usize> {
        memmem::find(&self.input[self.pos..], needle).map(|i| self.pos + i)
    }

    /// Check if input starts with a byte sequence at current position
    #[inline]
    pub fn starts_with(&self, needle: &[u8]) -> bool {
        self.input[self.pos..].starts_with(needle)
    }

    /// Read a tag name (starts with letter/underscore, continues with letters/digits/hyphens/underscores/periods)
    pub fn read_name(&mut self) -> Option<&'a [u8]> {
        let start = self.pos;

        if start >= self.input.len() || !is_name_start_char(self.input[start]) {
            return None;
        }

        self.pos += 1;
        while self.pos < self.input.len() && is_name_char(self.input[self.pos]) {
            self.pos += 1;
        }

        Some(&self.input[start..self.pos])
    }
}

/// Check if byte is valid name start character
/// Allows ASCII letters, underscore, colon, and non-ASCII (UTF-8 Unicode)
#[inline]
pub fn is_name_start_char(b: u8) -> bool {
    matches!(b, b'A'..=b'Z' | b'a'..=b'z' | b'_' | b':') || b >= 0x80
}

/// Check if byte is valid name character
/// Allows ASCII alphanumeric, punctuation, and non-ASCII (UTF-8 Unicode)
#[inline]
pub fn is_name_char(b: u8) -> bool {
    matches!(b, b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'_' | b'-' | b'.' | b':') || b >= 0x80
}

/// Check if byte can appear in an attribute name
/// Anything but whitespace, quotes, '/', '=', '<' and '>'
#[inline]
pub fn is_attribute_name_char(b: u8) -> bool {
    !is_whitespace(b) && !matches!(b, b'"' | b'\'' | b'/' | b'=' | b'<' | b'>')
}

/// Check if byte is whitespace
#[inline]
pub fn is_whitespace(b: u8) -> bool {
    matches!(b, b' ' | b'\t' | b'\n' | b'\r' | b'\x0c')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_find_tag_start() {
        let scanner = Scanner::new(b"hello <world>");
        assert_eq!(scanner.find_tag_start(), Some(6));
    }

    #[test]
    fn test_find_tag_end_quoted() {
        let scanner = Scanner::new(b"<a attr=\">test\">content");
        assert_eq!(scanner.find_tag_end_quoted(), Some(15));
    }

    #[test]
    fn test_find_tag_end_mixed_quotes() {
        let scanner = Scanner::new(b"<a b='\">' c=\"'>\">x");
        assert_eq!(scanner.find_tag_end_quoted(), Some(16));
    }

    #[test]
    fn test_find_tag_end_unterminated_quote() {
        let scanner = Scanner::new(b"<a b=\"oops>");
        assert_eq!(scanner.find_tag_end_quoted(), Some(10));
    }

    #[test]
    fn test_find_tag_end_stray_quote() {
        let scanner = Scanner::new(b"<y isn't here</p>x");
        assert_eq!(scanner.find_tag_end_quoted(), Some(16));

        let scanner = Scanner::new(b"<a b = 'x>y'>z");
        assert_eq!(scanner.find_tag_end_quoted(), Some(12));
    }

    #[test]
    fn test_read_name() {
        let mut scanner = Scanner::new(b"a-entity\nid=\"x\">");
        assert_eq!(scanner.read_name(), Some(b"a-entity" as &[u8]));
        assert_eq!(scanner.position(), 8);
    }

    #[test]
    fn test_find_seq() {
        let mut scanner = Scanner::new(b"<!-- <a-box> -->rest");
        scanner.advance(4);
        assert_eq!(scanner.find_seq(b"-->"), Some(13));
    }
}
