//! A single named set of choices

use choiceparam_core::textarea;
use choiceparam_core::validation;
use serde::{Deserialize, Serialize};

/// A named set of choices managed in the system configuration.
///
/// Entries are referenced by name from job configurations; their lifetime is
/// independent of any job.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NamedChoiceList {
    /// The name jobs use to reference this entry
    pub name: String,
    /// The choices, in display order
    #[serde(default)]
    pub choices: Vec<String>,
    /// Whether edited values from builds may be recorded into this entry
    #[serde(default)]
    pub allow_add_edited_value: bool,
}

impl NamedChoiceList {
    /// Create an entry from a name and a list of choices.
    ///
    /// The name is trimmed; validity is checked separately via
    /// [`NamedChoiceList::is_valid`] when the entry list is saved.
    #[must_use]
    pub fn new(name: impl Into<String>, choices: Vec<String>) -> Self {
        Self {
            name: name.into().trim().to_string(),
            choices,
            allow_add_edited_value: false,
        }
    }

    /// Create an entry from textarea contents, one choice per line.
    #[must_use]
    pub fn from_text(name: impl Into<String>, text: &str, allow_add_edited_value: bool) -> Self {
        Self {
            name: name.into().trim().to_string(),
            choices: textarea::lines_from_text(text),
            allow_add_edited_value,
        }
    }

    /// Allow builds to record edited values into this entry.
    #[must_use]
    pub fn allowing_edits(mut self) -> Self {
        self.allow_add_edited_value = true;
        self
    }

    /// The choices joined back into textarea contents, for form round trips.
    #[must_use]
    pub fn choice_text(&self) -> String {
        textarea::text_from_lines(&self.choices)
    }

    /// Whether this entry is configured correctly.
    ///
    /// Invalid entries are dropped when the entry list is saved, rather than
    /// rejected at construction, because form submissions can carry values
    /// that field validation already flagged.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        !validation::check_entry_name(&self.name).is_error()
    }
}
