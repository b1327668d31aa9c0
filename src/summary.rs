//! Change Summary
//!
//! Human-readable listing of a ChangeSet, shown to whoever confirms a sync
//! before any document is written.

use crate::changes::{AttributeChange, ChangeSet};
use std::fmt::Write;

/// Render `changes` as one block per element id
///
/// ```text
/// #foo:
///   position: "2 3 4"
///   material:
///     color: red
///
/// ```
pub fn render(changes: &ChangeSet) -> String {
    let mut out = String::new();

    for (id, attributes) in changes.iter() {
        let _ = writeln!(out, "#{id}:");
        for (attribute, change) in attributes {
            match change {
                AttributeChange::Scalar(value) => {
                    let quoted = serde_json::to_string(value).unwrap_or_else(|_| format!("\"{value}\""));
                    let _ = writeln!(out, "  {attribute}: {quoted}");
                }
                AttributeChange::Literal(value) => {
                    let _ = writeln!(out, "  {attribute}: {value}");
                }
                AttributeChange::Compound(props) => {
                    let _ = writeln!(out, "  {attribute}:");
                    for (property, value) in props {
                        let _ = writeln!(out, "    {property}: {value}");
                    }
                }
            }
        }
        out.push('\n');
    }

    out
}
