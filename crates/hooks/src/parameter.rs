//! The choice parameter definition

use choiceparam_core::{Error, Result};
use choiceparam_providers::{ChoiceProvider, ResolveContext};
use serde::{Deserialize, Serialize};
use tracing::warn;

/// How the input field treats typing when a parameter is editable.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum EditableType {
    /// The typed value does not filter the displayed choices
    #[default]
    NoFilter,
    /// Only choices matching the typed value are displayed
    Filter,
}

/// A string value resolved for one parameter of one build.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParameterValue {
    /// The parameter name
    pub name: String,
    /// The resolved value
    pub value: String,
}

impl ParameterValue {
    /// Create a resolved value.
    #[must_use]
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

/// A build parameter whose selectable values come from a provider.
///
/// Owned by exactly one job; created when the job configuration is saved
/// and replaced wholesale on the next save.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChoiceParameter {
    /// The parameter name, used as a variable name
    pub name: String,
    /// Free-form description shown to users
    #[serde(default)]
    pub description: String,
    /// Whether values outside the choice list are accepted
    #[serde(default)]
    pub editable: bool,
    /// How typing interacts with the displayed choices
    #[serde(default)]
    pub editable_type: EditableType,
    /// Where the choices come from
    pub provider: ChoiceProvider,
}

impl ChoiceParameter {
    /// Create a non-editable parameter. The name is trimmed.
    #[must_use]
    pub fn new(name: impl Into<String>, provider: ChoiceProvider) -> Self {
        Self {
            name: name.into().trim().to_string(),
            description: String::new(),
            editable: false,
            editable_type: EditableType::default(),
            provider,
        }
    }

    /// Accept values outside the choice list.
    #[must_use]
    pub fn editable(mut self) -> Self {
        self.editable = true;
        self
    }

    /// Attach a description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// The choices available for this parameter. Never errors.
    ///
    /// Empty when the provider's kind has been disabled in the system
    /// configuration; that case is logged as a warning.
    #[must_use]
    pub fn choices(&self, ctx: &ResolveContext<'_>) -> Vec<String> {
        if !ctx.settings.is_enabled(self.provider.kind()) {
            warn!(
                parameter = %self.name,
                provider = self.provider.kind().display_name(),
                "Provider is configured but disabled in the system configuration"
            );
            return Vec::new();
        }
        self.provider.choice_list(ctx)
    }

    /// Resolve a user-supplied value for this parameter.
    ///
    /// An editable parameter accepts anything. A non-editable parameter
    /// rejects any value absent from the current choice list; that is a
    /// hard error the host surfaces to whoever requested the build.
    pub fn resolve_value(&self, value: &str, ctx: &ResolveContext<'_>) -> Result<ParameterValue> {
        if !self.editable && !self.choices(ctx).iter().any(|c| c == value) {
            return Err(Error::illegal_choice(value, &self.name));
        }
        Ok(ParameterValue::new(&self.name, value))
    }

    /// The value used when a build is started without explicit input.
    ///
    /// The provider's configured default wins when it is usable; a default
    /// that would be rejected for a non-editable parameter is ignored with
    /// a warning and the first choice is used instead. `None` when the
    /// choice list is empty.
    #[must_use]
    pub fn default_value(&self, ctx: &ResolveContext<'_>) -> Option<ParameterValue> {
        if let Some(default) = self.provider.default_choice() {
            match self.resolve_value(default, ctx) {
                Ok(value) => return Some(value),
                Err(e) => {
                    warn!(
                        parameter = %self.name,
                        error = %e,
                        "Illegal choice for the default value; using the top of the list instead"
                    );
                }
            }
        }
        self.choices(ctx)
            .first()
            .map(|choice| ParameterValue::new(&self.name, choice))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use choiceparam_core::EditTracking;
    use choiceparam_providers::{ProviderKind, ProviderSettings, TextChoiceProvider};
    use choiceparam_store::ChoiceListStore;
    use std::path::Path;

    fn text_param(choices: &str, default: Option<&str>) -> ChoiceParameter {
        ChoiceParameter::new(
            "TARGET",
            ChoiceProvider::Text(TextChoiceProvider::from_text(
                choices,
                default.map(str::to_string),
                EditTracking::disabled(),
            )),
        )
    }

    #[test]
    fn non_editable_rejects_values_outside_the_list() {
        let store = ChoiceListStore::in_memory();
        let settings = ProviderSettings::default();
        let ctx = ResolveContext::new(Path::new("/"), &store, &settings);

        let param = text_param("dev\nprod\n", None);
        assert!(param.resolve_value("dev", &ctx).is_ok());
        let err = param.resolve_value("staging", &ctx).unwrap_err();
        assert!(matches!(err, Error::IllegalChoice { .. }));
    }

    #[test]
    fn editable_accepts_anything() {
        let store = ChoiceListStore::in_memory();
        let settings = ProviderSettings::default();
        let ctx = ResolveContext::new(Path::new("/"), &store, &settings);

        let param = text_param("dev\n", None).editable();
        let value = param.resolve_value("anything at all", &ctx).unwrap();
        assert_eq!(value.value, "anything at all");
    }

    #[test]
    fn default_value_prefers_the_configured_default() {
        let store = ChoiceListStore::in_memory();
        let settings = ProviderSettings::default();
        let ctx = ResolveContext::new(Path::new("/"), &store, &settings);

        let param = text_param("dev\nprod\n", Some("prod"));
        assert_eq!(param.default_value(&ctx).unwrap().value, "prod");
    }

    #[test]
    fn illegal_default_falls_back_to_the_first_choice() {
        let store = ChoiceListStore::in_memory();
        let settings = ProviderSettings::default();
        let ctx = ResolveContext::new(Path::new("/"), &store, &settings);

        let param = text_param("dev\nprod\n", Some("gone"));
        assert_eq!(param.default_value(&ctx).unwrap().value, "dev");
    }

    #[test]
    fn editable_keeps_an_out_of_list_default() {
        let store = ChoiceListStore::in_memory();
        let settings = ProviderSettings::default();
        let ctx = ResolveContext::new(Path::new("/"), &store, &settings);

        let param = text_param("dev\n", Some("custom")).editable();
        assert_eq!(param.default_value(&ctx).unwrap().value, "custom");
    }

    #[test]
    fn empty_choice_list_has_no_default() {
        let store = ChoiceListStore::in_memory();
        let settings = ProviderSettings::default();
        let ctx = ResolveContext::new(Path::new("/"), &store, &settings);

        let param = text_param("", None);
        assert!(param.default_value(&ctx).is_none());
    }

    #[test]
    fn disabled_provider_kind_resolves_to_no_choices() {
        let store = ChoiceListStore::in_memory();
        let mut settings = ProviderSettings::default();
        settings.set_enabled(ProviderKind::Text, false);
        let ctx = ResolveContext::new(Path::new("/"), &store, &settings);

        let param = text_param("dev\n", None);
        assert!(param.choices(&ctx).is_empty());
        // And a non-editable parameter then rejects everything.
        assert!(param.resolve_value("dev", &ctx).is_err());
    }

    #[test]
    fn name_is_trimmed() {
        let param = text_param("a\n", None);
        assert_eq!(param.name, "TARGET");
        let param = ChoiceParameter::new(
            "  SPACED  ",
            ChoiceProvider::Text(TextChoiceProvider::default()),
        );
        assert_eq!(param.name, "SPACED");
    }

    #[test]
    fn serde_round_trip() {
        let param = text_param("a\nb\n", Some("b")).editable();
        let json = serde_json::to_string(&param).unwrap();
        let parsed: ChoiceParameter = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, param);
    }
}
