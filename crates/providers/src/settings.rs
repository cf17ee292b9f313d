//! Per-kind provider enablement

use crate::ProviderKind;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Which provider kinds administrators have enabled.
///
/// Every kind is enabled by default. The script provider can additionally be
/// disallowed outright through `disallow_script`, which wins over any
/// per-kind override; administrators use it to keep script evaluation out of
/// job configurations entirely.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProviderSettings {
    /// Hard switch that disables the script provider everywhere
    #[serde(default)]
    pub disallow_script: bool,
    /// Per-kind overrides; kinds not listed use their default
    #[serde(default)]
    pub enabled: BTreeMap<ProviderKind, bool>,
}

impl ProviderSettings {
    /// Settings with every provider kind enabled.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether parameters may use the given provider kind.
    #[must_use]
    pub fn is_enabled(&self, kind: ProviderKind) -> bool {
        if kind == ProviderKind::Script && self.disallow_script {
            return false;
        }
        self.enabled.get(&kind).copied().unwrap_or(true)
    }

    /// Enable or disable one provider kind.
    pub fn set_enabled(&mut self, kind: ProviderKind, enabled: bool) {
        self.enabled.insert(kind, enabled);
    }

    /// The kinds currently available for new parameters, in display order.
    #[must_use]
    pub fn enabled_kinds(&self) -> Vec<ProviderKind> {
        ProviderKind::ALL
            .into_iter()
            .filter(|kind| self.is_enabled(*kind))
            .collect()
    }
}
