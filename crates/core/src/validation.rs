//! Form-validation primitives
//!
//! Field-level checks are plain functions returning a [`Validation`] so any
//! boundary (web form glue, config loader, CLI flag check) can consume them.
//! They never panic and never touch I/O except where the check itself is
//! about a path.

use regex::Regex;
use std::path::Path;
use std::sync::LazyLock;

/// Acceptable names for parameters and named choice lists.
static NAME_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    #[allow(clippy::unwrap_used)] // the pattern is a literal
    let pattern = Regex::new("^[A-Za-z_][A-Za-z_0-9]*$").unwrap();
    pattern
});

/// Severity of a validation outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationKind {
    /// The value is acceptable
    Ok,
    /// The value is suspicious but accepted
    Warning,
    /// The value is rejected
    Error,
}

/// Outcome of a field-level validation check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Validation {
    /// Severity of the outcome
    pub kind: ValidationKind,
    /// Message shown next to the field, if any
    pub message: Option<String>,
}

impl Validation {
    /// The value is acceptable, nothing to report.
    #[must_use]
    pub fn ok() -> Self {
        Self {
            kind: ValidationKind::Ok,
            message: None,
        }
    }

    /// The value is acceptable; report something anyway (e.g. a test result).
    #[must_use]
    pub fn ok_with(message: impl Into<String>) -> Self {
        Self {
            kind: ValidationKind::Ok,
            message: Some(message.into()),
        }
    }

    /// The value is suspicious but accepted.
    #[must_use]
    pub fn warning(message: impl Into<String>) -> Self {
        Self {
            kind: ValidationKind::Warning,
            message: Some(message.into()),
        }
    }

    /// The value is rejected.
    #[must_use]
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            kind: ValidationKind::Error,
            message: Some(message.into()),
        }
    }

    /// Whether this outcome rejects the value.
    #[must_use]
    pub fn is_error(&self) -> bool {
        self.kind == ValidationKind::Error
    }
}

/// Whether a field value is empty or whitespace only.
#[must_use]
pub fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}

/// Check a required free-form field: must not be blank.
#[must_use]
pub fn check_required(value: &str, what: &str) -> Validation {
    if is_blank(value) {
        Validation::error(format!("{what} is required"))
    } else {
        Validation::ok()
    }
}

/// Check the name of a named choice list entry.
///
/// Must not be blank and must match `[A-Za-z_][A-Za-z_0-9]*`; anything else
/// is rejected, since these names are referenced from job configurations.
#[must_use]
pub fn check_entry_name(name: &str) -> Validation {
    if is_blank(name) {
        return Validation::error("name is required");
    }
    if !NAME_PATTERN.is_match(name.trim()) {
        return Validation::error(
            "name must start with a letter or underscore and contain only letters, digits, and underscores",
        );
    }
    Validation::ok()
}

/// Check the name of a choice parameter.
///
/// A blank name is rejected. A name that is not usable as a variable
/// reference is only warned about, since the host may still accept it.
#[must_use]
pub fn check_parameter_name(name: &str) -> Validation {
    if is_blank(name) {
        return Validation::error("name is required");
    }
    if !NAME_PATTERN.is_match(name.trim()) {
        return Validation::warning("name is not usable as a variable reference");
    }
    Validation::ok()
}

/// Check a base directory field for a filesystem scan.
///
/// Blank is an error; a path that does not exist (or is not a directory) is
/// only a warning, since it may appear later.
#[must_use]
pub fn check_base_dir(root: &Path, base_dir: &str) -> Validation {
    if is_blank(base_dir) {
        return Validation::error("base directory is required");
    }
    let resolved = resolve_dir(root, base_dir.trim());
    if !resolved.is_dir() {
        return Validation::warning(format!("{} is not an existing directory", resolved.display()));
    }
    Validation::ok()
}

/// Resolve a possibly-relative directory against a root directory.
#[must_use]
pub fn resolve_dir(root: &Path, dir: &str) -> std::path::PathBuf {
    let path = Path::new(dir);
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        root.join(path)
    }
}
