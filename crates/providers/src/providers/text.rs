//! Choices written directly into the job configuration

use choiceparam_core::textarea;
use choiceparam_core::EditTracking;
use serde::{Deserialize, Serialize};

/// A provider whose choices are defined as a block of text, one per line,
/// like a built-in choice parameter.
///
/// The parsed lines are returned verbatim: no trimming, no sorting, no
/// de-duplication. Supports edit tracking; recorded values become part of
/// the job configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextChoiceProvider {
    /// The choices, in the order they were written
    #[serde(default)]
    pub choices: Vec<String>,
    /// The initially selected value, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_choice: Option<String>,
    /// When and where to record edited values
    #[serde(default)]
    pub edit: EditTracking,
}

impl TextChoiceProvider {
    /// Create a provider from an already-parsed choice list.
    #[must_use]
    pub fn new(choices: Vec<String>, default_choice: Option<String>, edit: EditTracking) -> Self {
        Self {
            choices,
            default_choice,
            edit,
        }
    }

    /// Create a provider from textarea contents, one choice per line.
    #[must_use]
    pub fn from_text(text: &str, default_choice: Option<String>, edit: EditTracking) -> Self {
        Self::new(textarea::lines_from_text(text), default_choice, edit)
    }

    /// The current choice list.
    #[must_use]
    pub fn choice_list(&self) -> Vec<String> {
        self.choices.clone()
    }

    /// The choices joined back into textarea contents, for form round trips.
    #[must_use]
    pub fn choice_text(&self) -> String {
        textarea::text_from_lines(&self.choices)
    }

    /// Insert an edited value at the configured position.
    ///
    /// The caller has already established the value is new and the trigger
    /// policy fired; this only performs the insert.
    pub(crate) fn add_edited_value(&mut self, value: &str) {
        if self.edit.to_top {
            self.choices.insert(0, value.to_string());
        } else {
            self.choices.push(value.to_string());
        }
    }
}
