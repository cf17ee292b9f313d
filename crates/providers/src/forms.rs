//! Configuration-form endpoints
//!
//! Field-level checks and "test" actions the host wires into its provider
//! configuration forms. Checks are pure; test actions run the provider's
//! real resolution logic against not-yet-saved field values and report the
//! outcome instead of swallowing it.

use crate::providers::file_scan::{self, ScanType};
use crate::{ResolveContext, ScriptChoiceProvider};
use choiceparam_core::validation::{self, Validation};
use std::path::Path;

/// Check the base directory field of a file scan provider.
#[must_use]
pub fn check_base_dir(root: &Path, base_dir: &str) -> Validation {
    validation::check_base_dir(root, base_dir)
}

/// Check the include pattern field of a file scan provider.
#[must_use]
pub fn check_include_pattern(include: &str) -> Validation {
    validation::check_required(include, "include pattern")
}

/// Check the exclude pattern field of a file scan provider. Always fine.
#[must_use]
pub fn check_exclude_pattern(_exclude: &str) -> Validation {
    Validation::ok()
}

/// Check the table field of a database provider.
#[must_use]
pub fn check_db_table(table: &str) -> Validation {
    validation::check_required(table, "table")
}

/// Check the column field of a database provider.
#[must_use]
pub fn check_db_column(column: &str) -> Validation {
    validation::check_required(column, "column")
}

/// Check the name field of a shared choice list entry.
#[must_use]
pub fn check_entry_name(name: &str) -> Validation {
    validation::check_entry_name(name)
}

/// Run a file scan against unsaved form values and report what it lists.
#[must_use]
pub fn test_file_scan(
    root: &Path,
    base_dir: &str,
    include: &str,
    exclude: &str,
    scan_type: ScanType,
) -> Validation {
    let base = validation::resolve_dir(root, base_dir.trim());
    let found = file_scan::scan_dir(&base, include, exclude, scan_type);
    if found.is_empty() {
        return Validation::ok_with("(no file matched)");
    }
    Validation::ok_with(found.join("\n"))
}

/// Evaluate a script against unsaved form values and report its choices.
///
/// Unlike value resolution, failures here are surfaced to the user: an
/// evaluation error, a non-array result, and a script that produces no
/// list are all reported as errors.
#[must_use]
pub fn test_script(ctx: &ResolveContext<'_>, script: &str, use_context_bindings: bool) -> Validation {
    let provider = ScriptChoiceProvider::new(script, use_context_bindings, None);
    match provider.evaluate(ctx) {
        Ok(Some(choices)) => Validation::ok_with(choices.join("\n")),
        Ok(None) => Validation::error("script returned no list"),
        Err(e) => Validation::error(e.to_string()),
    }
}
