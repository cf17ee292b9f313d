//! Choice list providers
//!
//! A choice parameter gets its selectable values from a [`ChoiceProvider`],
//! a closed set of strategies with different data sources:
//!
//! - [`TextChoiceProvider`]: a static block of text, one choice per line
//! - [`GlobalListChoiceProvider`]: a named list shared across all jobs
//! - [`FileScanChoiceProvider`]: a directory scan with include/exclude globs
//! - [`DatabaseChoiceProvider`]: a single-column query with a file fallback
//! - [`ScriptChoiceProvider`]: an embedded script returning an array
//!
//! Resolution never fails: providers absorb their own errors, log them, and
//! degrade to an empty (or fallback) list, so a build can never fail merely
//! because its choices could not be produced. Providers that support edit
//! tracking additionally record values users typed by hand, driven by the
//! build-lifecycle hooks.

mod context;
pub mod forms;
mod providers;
mod settings;

pub use context::ResolveContext;
pub use providers::database::DatabaseChoiceProvider;
pub use providers::file_scan::{EmptyChoice, FileScanChoiceProvider, ScanType};
pub use providers::global::GlobalListChoiceProvider;
pub use providers::script::ScriptChoiceProvider;
pub use providers::text::TextChoiceProvider;
pub use settings::ProviderSettings;

use choiceparam_core::{BuildStatus, EditTracking};
use serde::{Deserialize, Serialize};
use tracing::info;

/// A source of choices for one parameter of one job.
///
/// Modeled as a tagged variant so job configurations can serialize the
/// concrete strategy along with its fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "provider", rename_all = "camelCase")]
pub enum ChoiceProvider {
    /// Choices written directly into the job configuration
    Text(TextChoiceProvider),
    /// Choices referenced from a shared named list
    GlobalList(GlobalListChoiceProvider),
    /// Choices scanned from a directory tree
    FileScan(FileScanChoiceProvider),
    /// Choices queried from a database column
    Database(DatabaseChoiceProvider),
    /// Choices computed by a script
    Script(ScriptChoiceProvider),
}

/// Discriminant of [`ChoiceProvider`], used for registration and the
/// per-kind enablement settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ProviderKind {
    /// [`TextChoiceProvider`]
    Text,
    /// [`GlobalListChoiceProvider`]
    GlobalList,
    /// [`FileScanChoiceProvider`]
    FileScan,
    /// [`DatabaseChoiceProvider`]
    Database,
    /// [`ScriptChoiceProvider`]
    Script,
}

impl ProviderKind {
    /// All provider kinds, in display order.
    pub const ALL: [Self; 5] = [
        Self::Text,
        Self::GlobalList,
        Self::FileScan,
        Self::Database,
        Self::Script,
    ];

    /// The name shown when selecting a provider.
    #[must_use]
    pub fn display_name(self) -> &'static str {
        match self {
            Self::Text => "Textarea Choice Parameter",
            Self::GlobalList => "Global Choice Parameter",
            Self::FileScan => "File Choice Parameter",
            Self::Database => "Database Choice Parameter",
            Self::Script => "Script Choice Parameter",
        }
    }
}

impl ChoiceProvider {
    /// Which strategy this provider is.
    #[must_use]
    pub fn kind(&self) -> ProviderKind {
        match self {
            Self::Text(_) => ProviderKind::Text,
            Self::GlobalList(_) => ProviderKind::GlobalList,
            Self::FileScan(_) => ProviderKind::FileScan,
            Self::Database(_) => ProviderKind::Database,
            Self::Script(_) => ProviderKind::Script,
        }
    }

    /// Produce the current choice list.
    ///
    /// Safe to call repeatedly and concurrently; never errors and never
    /// returns anything the caller must null-check. Internal failures are
    /// logged by the provider that hit them.
    #[must_use]
    pub fn choice_list(&self, ctx: &ResolveContext<'_>) -> Vec<String> {
        match self {
            Self::Text(p) => p.choice_list(),
            Self::GlobalList(p) => p.choice_list(ctx),
            Self::FileScan(p) => p.choice_list(ctx),
            Self::Database(p) => p.choice_list(),
            Self::Script(p) => p.choice_list(ctx),
        }
    }

    /// The configured default choice, if any.
    ///
    /// `None` means the caller falls back to the first list entry.
    #[must_use]
    pub fn default_choice(&self) -> Option<&str> {
        match self {
            Self::Text(p) => p.default_choice.as_deref(),
            Self::GlobalList(p) => p.default_choice.as_deref(),
            Self::Script(p) => p.default_choice.as_deref(),
            Self::FileScan(_) | Self::Database(_) => None,
        }
    }

    /// The edit-tracking configuration, for the providers that support it.
    #[must_use]
    pub fn edit_tracking(&self) -> Option<&EditTracking> {
        match self {
            Self::Text(p) => Some(&p.edit),
            Self::GlobalList(p) => Some(&p.edit),
            Self::FileScan(_) | Self::Database(_) | Self::Script(_) => None,
        }
    }

    /// Notify this provider that a build was enqueued with `value`.
    ///
    /// Returns whether job-owned state changed, so the caller knows to
    /// persist the job configuration. Shared-store changes persist
    /// themselves.
    pub fn on_build_queued(&mut self, value: &str, ctx: &ResolveContext<'_>) -> bool {
        let fires = self
            .edit_tracking()
            .is_some_and(EditTracking::fires_on_queued);
        if !fires {
            return false;
        }
        self.record_edited_value(value, ctx)
    }

    /// Notify this provider that a build completed with `value` and `status`.
    ///
    /// Returns whether job-owned state changed, as for
    /// [`ChoiceProvider::on_build_queued`].
    pub fn on_build_completed(
        &mut self,
        value: &str,
        status: BuildStatus,
        ctx: &ResolveContext<'_>,
    ) -> bool {
        let fires = self
            .edit_tracking()
            .is_some_and(|edit| edit.fires_on_completed(status));
        if !fires {
            return false;
        }
        self.record_edited_value(value, ctx)
    }

    /// Insert a genuinely new value into the backing list.
    ///
    /// A value already present in the current choice list is not an edited
    /// value and is left alone, which also makes repeated notifications for
    /// the same build idempotent.
    fn record_edited_value(&mut self, value: &str, ctx: &ResolveContext<'_>) -> bool {
        if self.choice_list(ctx).iter().any(|c| c == value) {
            return false;
        }
        match self {
            Self::Text(p) => {
                info!(value, "Adding edited value to textarea choice list");
                p.add_edited_value(value);
                true
            }
            Self::GlobalList(p) => {
                // The store re-checks under its own lock and persists itself.
                ctx.store.add_edited_value(&p.name, value, p.edit.to_top);
                false
            }
            Self::FileScan(_) | Self::Database(_) | Self::Script(_) => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use choiceparam_core::AddWhen;
    use choiceparam_store::{ChoiceListStore, NamedChoiceList};
    use std::path::Path;

    fn ctx_parts() -> (ChoiceListStore, ProviderSettings) {
        (ChoiceListStore::in_memory(), ProviderSettings::default())
    }

    fn text_provider(choices: &[&str], edit: EditTracking) -> ChoiceProvider {
        ChoiceProvider::Text(TextChoiceProvider::new(
            choices.iter().map(|c| (*c).to_string()).collect(),
            None,
            edit,
        ))
    }

    #[test]
    fn kind_matches_variant() {
        let (store, settings) = ctx_parts();
        let _ctx = ResolveContext::new(Path::new("/"), &store, &settings);
        let p = text_provider(&["a"], EditTracking::disabled());
        assert_eq!(p.kind(), ProviderKind::Text);
        assert_eq!(p.kind().display_name(), "Textarea Choice Parameter");
    }

    #[test]
    fn queued_trigger_records_value_once() {
        let (store, settings) = ctx_parts();
        let ctx = ResolveContext::new(Path::new("/"), &store, &settings);
        let mut p = text_provider(&["a", "b"], EditTracking::when(AddWhen::Triggered));

        assert!(p.on_build_queued("c", &ctx));
        assert_eq!(p.choice_list(&ctx), vec!["a", "b", "c"]);

        // Now present, so a repeat notification changes nothing.
        assert!(!p.on_build_queued("c", &ctx));
        assert_eq!(p.choice_list(&ctx), vec!["a", "b", "c"]);
    }

    #[test]
    fn queued_trigger_ignores_completion() {
        let (store, settings) = ctx_parts();
        let ctx = ResolveContext::new(Path::new("/"), &store, &settings);
        let mut p = text_provider(&["a"], EditTracking::when(AddWhen::Triggered));
        assert!(!p.on_build_completed("b", BuildStatus::Success, &ctx));
        assert_eq!(p.choice_list(&ctx), vec!["a"]);
    }

    #[test]
    fn completion_trigger_respects_status_set() {
        let (store, settings) = ctx_parts();
        let ctx = ResolveContext::new(Path::new("/"), &store, &settings);
        let mut p = text_provider(&["a"], EditTracking::when(AddWhen::CompletedStable));

        assert!(!p.on_build_completed("x", BuildStatus::Failure, &ctx));
        assert_eq!(p.choice_list(&ctx), vec!["a"]);

        assert!(p.on_build_completed("x", BuildStatus::Success, &ctx));
        assert_eq!(p.choice_list(&ctx), vec!["a", "x"]);

        assert!(!p.on_build_completed("x", BuildStatus::Success, &ctx));
        assert_eq!(p.choice_list(&ctx), vec!["a", "x"]);
    }

    #[test]
    fn top_insertion_goes_to_the_front() {
        let (store, settings) = ctx_parts();
        let ctx = ResolveContext::new(Path::new("/"), &store, &settings);
        let mut p = text_provider(&["a"], EditTracking::when_at_top(AddWhen::Triggered));
        p.on_build_queued("z", &ctx);
        assert_eq!(p.choice_list(&ctx), vec!["z", "a"]);
    }

    #[test]
    fn global_edit_is_visible_to_other_references() {
        let (store, settings) = ctx_parts();
        store
            .set_entries(vec![
                NamedChoiceList::from_text("envs", "dev\n", false).allowing_edits(),
            ])
            .unwrap();
        let ctx = ResolveContext::new(Path::new("/"), &store, &settings);

        let mut writer = ChoiceProvider::GlobalList(GlobalListChoiceProvider::new(
            "envs",
            None,
            EditTracking::when(AddWhen::Triggered),
        ));
        let reader = ChoiceProvider::GlobalList(GlobalListChoiceProvider::new(
            "envs",
            None,
            EditTracking::disabled(),
        ));

        // Store mutations persist through the store, not the job config.
        assert!(!writer.on_build_queued("staging", &ctx));
        assert_eq!(reader.choice_list(&ctx), vec!["dev", "staging"]);
        assert_eq!(writer.choice_list(&ctx), vec!["dev", "staging"]);
    }

    #[test]
    fn providers_without_tracking_never_record() {
        let (store, settings) = ctx_parts();
        let ctx = ResolveContext::new(Path::new("/"), &store, &settings);
        let mut p = ChoiceProvider::Script(ScriptChoiceProvider::new("[\"a\"]", false, None));
        assert!(p.edit_tracking().is_none());
        assert!(!p.on_build_queued("b", &ctx));
        assert!(!p.on_build_completed("b", BuildStatus::Success, &ctx));
    }

    #[test]
    fn serde_tags_the_variant() {
        let p = text_provider(&["a"], EditTracking::disabled());
        let json = serde_json::to_string(&p).unwrap();
        assert!(json.contains(r#""provider":"text""#));
        let parsed: ChoiceProvider = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, p);
    }
}
