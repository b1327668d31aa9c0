//! Sync Configuration
//!
//! Passed explicitly into every sync call; there is no global state.

/// Default element-name prefix recognized by the locator
pub const DEFAULT_ELEMENT_PREFIX: &str = "a-";

/// Options controlling how documents are scanned
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncConfig {
    /// Tag names must start with this prefix to be considered elements.
    /// An empty prefix accepts every tag.
    pub element_prefix: String,
}

impl SyncConfig {
    /// Config recognizing tags that start with `prefix`
    pub fn with_prefix(prefix: impl Into<String>) -> Self {
        SyncConfig {
            element_prefix: prefix.into(),
        }
    }

    /// Whether a tag name is a recognized element name
    #[inline]
    pub fn is_element_name(&self, name: &[u8]) -> bool {
        name.starts_with(self.element_prefix.as_bytes())
    }
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self::with_prefix(DEFAULT_ELEMENT_PREFIX)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_prefix() {
        let config = SyncConfig::default();
        assert!(config.is_element_name(b"a-entity"));
        assert!(config.is_element_name(b"a-box"));
        assert!(!config.is_element_name(b"div"));
    }

    #[test]
    fn test_empty_prefix_accepts_all() {
        assert!(SyncConfig::with_prefix("").is_element_name(b"div"));
    }
}
