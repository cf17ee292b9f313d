//! Choices scanned from a directory tree

use crate::ResolveContext;
use choiceparam_core::validation;
use globset::{GlobBuilder, GlobSet, GlobSetBuilder};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::warn;
use walkdir::WalkDir;

/// What kind of directory entries end up in the choice list.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ScanType {
    /// Files only
    #[default]
    File,
    /// Directories only
    Directory,
    /// Both files and directories, sorted together
    FileAndDirectory,
}

/// Whether and where to offer an empty choice.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum EmptyChoice {
    /// No empty choice
    #[default]
    None,
    /// An empty choice before all scanned entries
    AtTop,
    /// An empty choice after all scanned entries
    AtEnd,
}

/// A provider listing paths found under a base directory.
///
/// Paths are reported relative to the base directory and filtered with
/// comma-separated include and exclude globs (`**`, `*`, and `?` carry
/// their usual directory-scanner meaning; `*` does not cross separators).
/// Excludes override includes. A missing base directory or a blank include
/// pattern yields an empty list rather than an error.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileScanChoiceProvider {
    /// Directory to scan; relative paths resolve against the context root
    pub base_dir: String,
    /// Comma-separated include globs; blank lists nothing
    pub include: String,
    /// Comma-separated exclude globs; blank excludes nothing
    #[serde(default)]
    pub exclude: String,
    /// What kind of entries to list
    #[serde(default)]
    pub scan_type: ScanType,
    /// Reverse the final list
    #[serde(default)]
    pub reverse: bool,
    /// Whether and where to offer an empty choice
    #[serde(default)]
    pub empty_choice: EmptyChoice,
}

impl FileScanChoiceProvider {
    /// Create a provider with the given scan configuration.
    #[must_use]
    pub fn new(
        base_dir: impl Into<String>,
        include: impl Into<String>,
        exclude: impl Into<String>,
        scan_type: ScanType,
    ) -> Self {
        Self {
            base_dir: base_dir.into().trim().to_string(),
            include: include.into().trim().to_string(),
            exclude: exclude.into().trim().to_string(),
            scan_type,
            reverse: false,
            empty_choice: EmptyChoice::None,
        }
    }

    /// Reverse the final list.
    #[must_use]
    pub fn reversed(mut self) -> Self {
        self.reverse = true;
        self
    }

    /// Offer an empty choice at the given position.
    #[must_use]
    pub fn with_empty_choice(mut self, empty_choice: EmptyChoice) -> Self {
        self.empty_choice = empty_choice;
        self
    }

    /// The current choice list.
    #[must_use]
    pub fn choice_list(&self, ctx: &ResolveContext<'_>) -> Vec<String> {
        let base = validation::resolve_dir(ctx.root_dir, &self.base_dir);
        let mut list = scan_dir(&base, &self.include, &self.exclude, self.scan_type);
        if self.reverse {
            list.reverse();
        }
        match self.empty_choice {
            EmptyChoice::None => {}
            EmptyChoice::AtTop => list.insert(0, String::new()),
            EmptyChoice::AtEnd => list.push(String::new()),
        }
        list
    }
}

/// Build a glob set from a comma-separated pattern list.
///
/// Invalid patterns are skipped with a warning; scanning must not fail at
/// resolution time over a typo that field validation already reports.
fn glob_set(patterns: &str) -> GlobSet {
    let mut builder = GlobSetBuilder::new();
    for pattern in patterns.split(',').map(str::trim).filter(|p| !p.is_empty()) {
        match GlobBuilder::new(pattern).literal_separator(true).build() {
            Ok(glob) => {
                builder.add(glob);
            }
            Err(e) => warn!(pattern, error = %e, "Skipping invalid scan pattern"),
        }
    }
    builder.build().unwrap_or_else(|e| {
        warn!(error = %e, "Failed to build scan pattern set");
        GlobSet::empty()
    })
}

/// List entries under `base` matching the include/exclude patterns.
///
/// Files and directories keep the scanner's order: entries of a directory
/// come before the contents of its subdirectories. The combined
/// file-and-directory listing is re-sorted lexicographically instead.
pub(crate) fn scan_dir(
    base: &Path,
    include: &str,
    exclude: &str,
    scan_type: ScanType,
) -> Vec<String> {
    if validation::is_blank(include) {
        return Vec::new();
    }
    if !base.is_dir() {
        return Vec::new();
    }

    let includes = glob_set(include);
    let excludes = glob_set(exclude);

    let mut files = Vec::new();
    let mut dirs = Vec::new();
    let walk = WalkDir::new(base).min_depth(1).sort_by(|a, b| {
        // Files of a directory come before its subdirectories' contents.
        let a_dir = a.file_type().is_dir();
        let b_dir = b.file_type().is_dir();
        a_dir.cmp(&b_dir).then_with(|| a.file_name().cmp(b.file_name()))
    });
    for entry in walk.into_iter().filter_map(std::result::Result::ok) {
        let Ok(rel) = entry.path().strip_prefix(base) else {
            continue;
        };
        if !includes.is_match(rel) || excludes.is_match(rel) {
            continue;
        }
        let rel = rel.to_string_lossy().into_owned();
        if entry.file_type().is_dir() {
            dirs.push(rel);
        } else {
            files.push(rel);
        }
    }

    match scan_type {
        ScanType::File => files,
        ScanType::Directory => dirs,
        ScanType::FileAndDirectory => {
            files.append(&mut dirs);
            files.sort();
            files
        }
    }
}
