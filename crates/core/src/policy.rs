//! Edit-tracking trigger policies
//!
//! Providers that record edited values carry an [`EditTracking`] describing
//! when a value a user typed should be merged into the backing choice list,
//! and whether it goes to the top or the bottom of that list.

use serde::{Deserialize, Serialize};

/// Final status of a completed build, as reported by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BuildStatus {
    /// The build completed successfully
    Success,
    /// The build completed with test failures or similar degradations
    Unstable,
    /// The build failed
    Failure,
    /// The build was aborted before completion
    Aborted,
    /// The build never ran
    NotBuilt,
}

/// When an edited value should be added to a provider's choice list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum AddWhen {
    /// When a build is triggered and enqueued
    Triggered,
    /// When a build completes, whatever the outcome
    Completed,
    /// When a build completes successfully
    CompletedStable,
    /// When a build completes successfully, including unstable
    CompletedUnstable,
}

impl AddWhen {
    /// Whether a completed build with `status` satisfies this trigger.
    ///
    /// [`AddWhen::Triggered`] never matches a completion status; it only
    /// fires from the queue side. Aborted and not-built builds match no
    /// trigger at all.
    #[must_use]
    pub fn accepts(self, status: BuildStatus) -> bool {
        match self {
            Self::Triggered => false,
            Self::Completed => matches!(
                status,
                BuildStatus::Success | BuildStatus::Unstable | BuildStatus::Failure
            ),
            Self::CompletedStable => status == BuildStatus::Success,
            Self::CompletedUnstable => {
                matches!(status, BuildStatus::Success | BuildStatus::Unstable)
            }
        }
    }
}

/// Edit-tracking configuration attached to a provider.
///
/// `when` of `None` disables tracking entirely.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EditTracking {
    /// When to record an edited value, `None` for never
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub when: Option<AddWhen>,
    /// Insert recorded values at the top of the list instead of the bottom
    #[serde(default)]
    pub to_top: bool,
}

impl EditTracking {
    /// Tracking that never records anything.
    #[must_use]
    pub fn disabled() -> Self {
        Self::default()
    }

    /// Tracking with the given trigger, appending at the bottom.
    #[must_use]
    pub fn when(when: AddWhen) -> Self {
        Self {
            when: Some(when),
            to_top: false,
        }
    }

    /// Tracking with the given trigger, inserting at the top.
    #[must_use]
    pub fn when_at_top(when: AddWhen) -> Self {
        Self {
            when: Some(when),
            to_top: true,
        }
    }

    /// Whether any trigger is configured at all.
    #[must_use]
    pub fn is_enabled(&self) -> bool {
        self.when.is_some()
    }

    /// Whether a build being enqueued should record its value.
    #[must_use]
    pub fn fires_on_queued(&self) -> bool {
        self.when == Some(AddWhen::Triggered)
    }

    /// Whether a build completing with `status` should record its value.
    #[must_use]
    pub fn fires_on_completed(&self, status: BuildStatus) -> bool {
        self.when.is_some_and(|when| when.accepts(status))
    }
}
