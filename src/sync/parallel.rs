//! Parallel Multi-Document Sync
//!
//! Uses Rayon to sync independent documents concurrently. Documents share no
//! mutable state; each one is still processed strictly in ChangeSet order.

use super::{apply, apply_bytes, SyncOutcome};
use crate::changes::ChangeSet;
use crate::config::SyncConfig;
use crate::error::SyncError;
use rayon::prelude::*;

/// Apply the same ChangeSet to every document in parallel
pub fn apply_all<D: AsRef<str> + Sync>(
    documents: &[D],
    changes: &ChangeSet,
    config: &SyncConfig,
) -> Vec<SyncOutcome> {
    documents
        .par_iter()
        .map(|document| apply(document.as_ref(), changes, config))
        .collect()
}

/// Apply the same ChangeSet to raw document bytes in parallel
pub fn apply_all_bytes(
    documents: &[&[u8]],
    changes: &ChangeSet,
    config: &SyncConfig,
) -> Vec<Result<SyncOutcome, SyncError>> {
    documents
        .par_iter()
        .map(|document| apply_bytes(document, changes, config))
        .collect()
}
