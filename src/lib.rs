//! RustySync - Markup attribute sync for scene documents
//!
//! Applies attribute changes, keyed by element id, to the source text of
//! markup documents without building a tree. Everything outside the touched
//! attributes stays byte-identical.
//!
//! Pipeline per document, for each id in ChangeSet order:
//! A: Locate the element declaring the id (locator)
//! B: Merge scalar and compound attribute changes into its opening tag (merger)
//! C: Splice the updated element back into the document (sync)
//!
//! Multiple documents are synced in parallel with Rayon (sync::parallel).

use rustler::{Binary, Encoder, Env, NifResult, ResourceArc, Term};

mod core;

pub mod changes;
pub mod config;
pub mod error;
pub mod locator;
pub mod merger;
pub mod resource;
pub mod summary;
pub mod sync;
mod term;

pub use changes::{AttributeChange, ChangeSet, ElementChanges};
pub use config::SyncConfig;
pub use error::{ChangeSetError, SyncError};
pub use locator::{locate, ElementSpan};
pub use merger::merge_element;
pub use sync::{apply, apply_all, update, SyncOutcome};

use resource::{ChangeSetRef, ChangeSetResource};

// ============================================================================
// Allocator Configuration
// ============================================================================

#[cfg(feature = "mimalloc")]
#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

// ============================================================================
// ChangeSet Decoding
// ============================================================================

/// Decode a ChangeSet JSON body (returns {:ok, ref} or {:error, reason})
/// Tags are recognized as elements when their name starts with `element_prefix`
#[rustler::nif]
fn parse_changes<'a>(env: Env<'a>, json: &str, element_prefix: &str) -> NifResult<Term<'a>> {
    match ChangeSet::from_json(json) {
        Ok(changes) => {
            let config = SyncConfig::with_prefix(element_prefix);
            let arc = ResourceArc::new(ChangeSetResource::new(changes, config));
            Ok((term::ok(), arc).encode(env))
        }
        Err(e) => {
            tracing::warn!("Rejected change set: {}", e);
            Ok(term::error_to_term(env, &e))
        }
    }
}

/// Render the change summary shown before a sync is confirmed
#[rustler::nif]
fn summarize_changes<'a>(env: Env<'a>, changes: ChangeSetRef) -> NifResult<Term<'a>> {
    Ok(term::str_to_binary(env, &summary::render(&changes.changes)))
}

// ============================================================================
// Document Sync
// ============================================================================

/// Apply a ChangeSet to one document
/// Returns {:ok, text, updated_ids, missing_ids} or {:error, reason}
#[rustler::nif]
fn update_document<'a>(env: Env<'a>, document: Binary<'a>, changes: ChangeSetRef) -> NifResult<Term<'a>> {
    let result = sync::apply_bytes(document.as_slice(), &changes.changes, &changes.config);
    Ok(term::outcome_to_term(env, result))
}

/// Apply a ChangeSet to many documents in parallel
/// Returns one result per document, in input order
#[rustler::nif(schedule = "DirtyCpu")]
fn update_documents<'a>(
    env: Env<'a>,
    documents: Vec<Binary<'a>>,
    changes: ChangeSetRef,
) -> NifResult<Term<'a>> {
    let slices: Vec<&[u8]> = documents.iter().map(|d| d.as_slice()).collect();
    let results = sync::parallel::apply_all_bytes(&slices, &changes.changes, &changes.config);
    Ok(term::outcomes_to_list(env, results))
}

/// Locate an element by id (returns {start, end} byte offsets or nil)
#[rustler::nif]
fn locate_element<'a>(env: Env<'a>, document: Binary<'a>, id: &str, element_prefix: &str) -> NifResult<Term<'a>> {
    let nil = rustler::types::atom::nil().encode(env);
    let Ok(text) = std::str::from_utf8(document.as_slice()) else {
        return Ok(nil);
    };

    match locator::locate(text, id, &SyncConfig::with_prefix(element_prefix)) {
        Some(span) => Ok((span.start, span.end).encode(env)),
        None => Ok(nil),
    }
}

// ============================================================================
// NIF Initialization
// ============================================================================

rustler::init!("Elixir.RustySync.Native");
