//! Data-driven input form over a model's attribute schema.
//!
//! The form is generated from the ordered attribute list: one labeled
//! choice field per attribute, no per-attribute special-casing. The same
//! field list drives both the interactive prompt loop here and any other
//! front end that wants to render controls.

use crate::record::InputRecord;
use nb_model::Model;
use serde::Serialize;
use std::io::{BufRead, Write};

/// A renderable choice field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FormField {
    /// Attribute name, used as label and record key.
    pub name: String,
    /// Selectable values, in model order.
    pub choices: Vec<String>,
}

/// Enumerate the model's attributes into form fields, in model order.
pub fn form_fields(model: &Model) -> Vec<FormField> {
    model
        .attributes
        .iter()
        .map(|attr| FormField {
            name: attr.name.clone(),
            choices: attr.values.clone(),
        })
        .collect()
}

/// Fill the unset fields of `record` by prompting for each attribute.
///
/// Prints a numbered menu per field to `out` and reads one line per field
/// from `input`. A number picks the matching choice; any other non-empty
/// text is taken verbatim, so unknown values flow through to the engine's
/// epsilon fallback. Empty input or EOF leaves the attribute unset.
pub fn fill_interactive(
    model: &Model,
    mut record: InputRecord,
    input: &mut impl BufRead,
    out: &mut impl Write,
) -> std::io::Result<InputRecord> {
    for field in form_fields(model) {
        if record.contains(&field.name) {
            continue;
        }
        writeln!(out, "{}:", field.name)?;
        for (i, choice) in field.choices.iter().enumerate() {
            writeln!(out, "  {}) {}", i + 1, choice)?;
        }
        write!(out, "> ")?;
        out.flush()?;

        let mut line = String::new();
        if input.read_line(&mut line)? == 0 {
            tracing::warn!(field = %field.name, "input closed before field was filled");
            break;
        }
        let entry = line.trim();
        if entry.is_empty() {
            continue;
        }
        let value = match entry.parse::<usize>() {
            Ok(n) if n >= 1 && n <= field.choices.len() => field.choices[n - 1].clone(),
            _ => entry.to_string(),
        };
        record.set(&field.name, value);
    }
    Ok(record)
}
