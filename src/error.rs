//! Error types
//!
//! The sync core itself is total; these errors only arise at the boundary,
//! when a ChangeSet is decoded or a document is not valid text.

/// Errors while building a ChangeSet from its JSON body
#[derive(Debug, thiserror::Error)]
pub enum ChangeSetError {
    /// Body is not valid JSON
    #[error("invalid change set json: {0}")]
    Json(#[from] serde_json::Error),

    /// Body is valid JSON but not an object keyed by element id
    #[error("change set must be a json object keyed by element id")]
    NotAnObject,

    /// Entry for an element is not an object keyed by attribute name
    #[error("changes for #{id} must be an object keyed by attribute name")]
    InvalidElement { id: String },

    /// Attribute value is neither a scalar nor an object of scalars
    #[error("unsupported value for {attribute} of #{id}: {kind}")]
    UnsupportedValue {
        id: String,
        attribute: String,
        kind: &'static str,
    },

    /// Attribute name that cannot be written into a tag
    #[error("invalid attribute name {attribute:?} for #{id}")]
    InvalidAttributeName { id: String, attribute: String },

    /// Sub-property name that cannot be written into a compound value
    #[error("invalid property name {property:?} in {attribute} of #{id}")]
    InvalidPropertyName {
        id: String,
        attribute: String,
        property: String,
    },

    /// Compound sub-property value is not a scalar
    #[error("unsupported value for {attribute}.{property} of #{id}: {kind}")]
    UnsupportedProperty {
        id: String,
        attribute: String,
        property: String,
        kind: &'static str,
    },
}

/// Errors surfaced by the sync entry points
#[derive(Debug, thiserror::Error)]
pub enum SyncError {
    /// Document bytes are not UTF-8
    #[error("document is not valid utf-8: {0}")]
    InvalidUtf8(#[from] std::str::Utf8Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_name_the_offender() {
        let err = ChangeSetError::UnsupportedProperty {
            id: "foo".to_string(),
            attribute: "material".to_string(),
            property: "color".to_string(),
            kind: "array",
        };
        assert_eq!(err.to_string(), "unsupported value for material.color of #foo: array");
    }

    #[test]
    fn test_invalid_name_messages() {
        let err = ChangeSetError::InvalidAttributeName {
            id: "foo".to_string(),
            attribute: "on click".to_string(),
        };
        assert_eq!(err.to_string(), "invalid attribute name \"on click\" for #foo");
    }

    #[test]
    fn test_utf8_error_message() {
        let bytes = [b'<', 0xff];
        let err = SyncError::from(std::str::from_utf8(&bytes).unwrap_err());
        assert!(err.to_string().starts_with("document is not valid utf-8"));
    }
}
