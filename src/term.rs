//! Elixir Term Conversion Utilities
//!
//! Converts sync results to Elixir terms.

use crate::error::SyncError;
use crate::sync::SyncOutcome;
use rustler::{Encoder, Env, NewBinary, Term};

// Pre-defined atoms for efficiency - created once at compile time
rustler::atoms! {
    ok,
    error,
}

/// `{:ok, text, updated_ids, missing_ids}` or `{:error, reason}`
pub fn outcome_to_term<'a>(env: Env<'a>, result: Result<SyncOutcome, SyncError>) -> Term<'a> {
    match result {
        Ok(outcome) => {
            let text = str_to_binary(env, &outcome.text);
            let updated = strings_to_list(env, &outcome.updated);
            let missing = strings_to_list(env, &outcome.missing);
            (ok(), text, updated, missing).encode(env)
        }
        Err(e) => error_to_term(env, &e),
    }
}

/// `{:error, reason}` with the error's message as a binary
pub fn error_to_term<'a, E: std::fmt::Display>(env: Env<'a>, e: &E) -> Term<'a> {
    (error(), str_to_binary(env, &e.to_string())).encode(env)
}

/// Convert results to an Elixir list, preserving order
pub fn outcomes_to_list<'a>(env: Env<'a>, results: Vec<Result<SyncOutcome, SyncError>>) -> Term<'a> {
    let mut list = Term::list_new_empty(env);
    for result in results.into_iter().rev() {
        list = list.list_prepend(outcome_to_term(env, result));
    }
    list
}

/// Convert strings to an Elixir list of binaries
fn strings_to_list<'a>(env: Env<'a>, strings: &[String]) -> Term<'a> {
    let mut list = Term::list_new_empty(env);
    for s in strings.iter().rev() {
        list = list.list_prepend(str_to_binary(env, s));
    }
    list
}

/// Convert a string to a binary term (more efficient than .encode())
#[inline]
pub fn str_to_binary<'a>(env: Env<'a>, s: &str) -> Term<'a> {
    let bytes = s.as_bytes();
    let mut binary = NewBinary::new(env, bytes.len());
    binary.as_mut_slice().copy_from_slice(bytes);
    binary.into()
}
