//! ResourceArc Wrappers
//!
//! A decoded ChangeSet kept on the Rust side so one confirmed request can be
//! applied to every document without re-decoding its JSON body.

use crate::changes::ChangeSet;
use crate::config::SyncConfig;
use rustler::ResourceArc;

/// Decoded ChangeSet plus the config it should be applied with
///
/// Immutable once built, so it is shared across dirty schedulers without a
/// lock.
pub struct ChangeSetResource {
    pub changes: ChangeSet,
    pub config: SyncConfig,
}

impl ChangeSetResource {
    pub fn new(changes: ChangeSet, config: SyncConfig) -> Self {
        ChangeSetResource { changes, config }
    }
}

#[rustler::resource_impl]
impl rustler::Resource for ChangeSetResource {}

/// Type alias for the ResourceArc
pub type ChangeSetRef = ResourceArc<ChangeSetResource>;
