//! Document Sync
//!
//! Runs a ChangeSet against one document: for each id in declaration order,
//! locate the element, merge its changes, and splice the result back. Each id
//! sees the document as left by the ids before it.

pub mod parallel;

pub use parallel::apply_all;

use crate::changes::ChangeSet;
use crate::config::SyncConfig;
use crate::error::SyncError;
use crate::locator::locate;
use crate::merger::merge_element;
use std::ops::Range;

/// Result of syncing one document
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SyncOutcome {
    /// Updated document text
    pub text: String,
    /// Ids whose element was found, in ChangeSet order
    pub updated: Vec<String>,
    /// Ids with no matching element, in ChangeSet order
    pub missing: Vec<String>,
}

/// Apply `changes` to `document` using the default config
pub fn update(document: &str, changes: &ChangeSet) -> String {
    apply(document, changes, &SyncConfig::default()).text
}

/// Apply `changes` to `document`, reporting which ids were found
pub fn apply(document: &str, changes: &ChangeSet, config: &SyncConfig) -> SyncOutcome {
    let mut outcome = SyncOutcome {
        text: document.to_string(),
        updated: Vec::with_capacity(changes.len()),
        missing: Vec::new(),
    };

    for (id, element_changes) in changes.iter() {
        let Some(span) = locate(&outcome.text, id, config) else {
            tracing::trace!("No element with id #{}", id);
            outcome.missing.push(id.to_string());
            continue;
        };

        let merged = merge_element(span.text, id, element_changes);
        if merged != span.text {
            let range = span.range();
            outcome.text = splice(&outcome.text, range, &merged);
        }
        outcome.updated.push(id.to_string());
    }

    tracing::info!(
        "Synced {} of {} elements ({} missing)",
        outcome.updated.len(),
        changes.len(),
        outcome.missing.len()
    );
    outcome
}

/// Apply `changes` to raw document bytes
///
/// # Errors
///
/// Returns [`SyncError::InvalidUtf8`] if `document` is not UTF-8.
pub fn apply_bytes(document: &[u8], changes: &ChangeSet, config: &SyncConfig) -> Result<SyncOutcome, SyncError> {
    let text = std::str::from_utf8(document)?;
    Ok(apply(text, changes, config))
}

/// New document with `range` replaced by `replacement`
fn splice(document: &str, range: Range<usize>, replacement: &str) -> String {
    let mut out = String::with_capacity(document.len() - range.len() + replacement.len());
    out.push_str(&document[..range.start]);
    out.push_str(replacement);
    out.push_str(&document[range.end..]);
    out
}
