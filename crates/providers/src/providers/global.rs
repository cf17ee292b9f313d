//! Choices referenced from a shared named list

use crate::ResolveContext;
use choiceparam_core::EditTracking;
use serde::{Deserialize, Serialize};

/// A provider that resolves a named entry of the process-wide choice list
/// store on every call.
///
/// The job configuration only holds the name; the entry itself is owned by
/// the system configuration and shared by every job referencing it. Edit
/// tracking therefore mutates the shared entry, deliberately affecting all
/// of those jobs at once.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GlobalListChoiceProvider {
    /// Name of the shared entry to resolve
    pub name: String,
    /// The initially selected value, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_choice: Option<String>,
    /// When and where to record edited values
    #[serde(default)]
    pub edit: EditTracking,
}

impl GlobalListChoiceProvider {
    /// Create a provider referencing the named shared entry.
    #[must_use]
    pub fn new(name: impl Into<String>, default_choice: Option<String>, edit: EditTracking) -> Self {
        Self {
            name: name.into(),
            default_choice,
            edit,
        }
    }

    /// The current choices of the referenced entry.
    ///
    /// Empty when no entry of that name exists, including when the store
    /// was never configured.
    #[must_use]
    pub fn choice_list(&self, ctx: &ResolveContext<'_>) -> Vec<String> {
        ctx.store.choice_list(&self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ProviderSettings;
    use choiceparam_store::{ChoiceListStore, NamedChoiceList};
    use std::path::Path;

    #[test]
    fn resolves_by_name_at_call_time() {
        let store = ChoiceListStore::in_memory();
        let settings = ProviderSettings::default();
        let ctx = ResolveContext::new(Path::new("/"), &store, &settings);

        let p = GlobalListChoiceProvider::new("envs", None, EditTracking::disabled());
        assert!(p.choice_list(&ctx).is_empty());

        store
            .set_entries(vec![NamedChoiceList::from_text("envs", "dev\nprod\n", false)])
            .unwrap();
        assert_eq!(p.choice_list(&ctx), vec!["dev", "prod"]);
    }
}
