//! The process-wide choice list store

use crate::NamedChoiceList;
use choiceparam_core::{Error, Result};
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::sync::{PoisonError, RwLock};
use tracing::{debug, warn};

/// Process-wide store of [`NamedChoiceList`] entries.
///
/// The store is loaded once at startup and saved whenever its contents
/// change. Lookups are by name; the global-list provider resolves against
/// this store on every call, so edits become visible to every referencing
/// job immediately.
///
/// The whole read-check-insert-persist sequence of
/// [`ChoiceListStore::add_edited_value`] runs under one write lock, since
/// the host dispatches concurrent build completions without any implicit
/// serialization.
#[derive(Debug)]
pub struct ChoiceListStore {
    path: Option<PathBuf>,
    entries: RwLock<Vec<NamedChoiceList>>,
}

impl ChoiceListStore {
    /// An empty store without persistence, useful for tests and embedding.
    #[must_use]
    pub fn in_memory() -> Self {
        Self {
            path: None,
            entries: RwLock::new(Vec::new()),
        }
    }

    /// Load the store from a JSON document at `path`.
    ///
    /// A missing file yields an empty store; the file appears on the first
    /// save. A file that exists but cannot be read or parsed is an error,
    /// so a corrupt configuration is surfaced at startup instead of being
    /// silently replaced.
    pub fn load(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let entries = if path.is_file() {
            let raw = std::fs::read_to_string(&path)
                .map_err(|e| Error::io(e, Some(path.clone()), "read"))?;
            serde_json::from_str(&raw).map_err(|e| {
                Error::serialization(format!("invalid choice list store {}: {e}", path.display()))
            })?
        } else {
            Vec::new()
        };
        debug!(path = %path.display(), "Loaded choice list store");
        Ok(Self {
            path: Some(path),
            entries: RwLock::new(entries),
        })
    }

    /// Replace the whole entry list, as the system configuration form does.
    ///
    /// Entries with invalid names are dropped with a warning (field
    /// validation already flagged them to the user). Duplicate names are
    /// rejected outright: lookups are order-dependent with duplicates
    /// present, so they must not survive a save.
    pub fn set_entries(&self, entries: Vec<NamedChoiceList>) -> Result<()> {
        let mut kept = Vec::with_capacity(entries.len());
        let mut seen = HashSet::new();
        for entry in entries {
            if !entry.is_valid() {
                warn!(name = %entry.name, "Dropping misconfigured choice list entry");
                continue;
            }
            if !seen.insert(entry.name.clone()) {
                return Err(Error::duplicate_name(entry.name));
            }
            kept.push(entry);
        }

        let mut guard = self.entries.write().unwrap_or_else(PoisonError::into_inner);
        *guard = kept;
        self.persist(&guard)
    }

    /// Names of all entries, in configuration order.
    #[must_use]
    pub fn entry_names(&self) -> Vec<String> {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .map(|e| e.name.clone())
            .collect()
    }

    /// Look up an entry by name. The first match wins.
    #[must_use]
    pub fn entry(&self, name: &str) -> Option<NamedChoiceList> {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .find(|e| e.name == name)
            .cloned()
    }

    /// The choices of the named entry; empty if the name is unknown.
    #[must_use]
    pub fn choice_list(&self, name: &str) -> Vec<String> {
        self.entry(name).map(|e| e.choices).unwrap_or_default()
    }

    /// Record an edited value into the named entry.
    ///
    /// Returns whether the entry changed. Nothing happens when the entry
    /// does not exist, is not configured to accept edited values, or
    /// already contains the value. A persistence failure is logged and the
    /// in-memory insert is kept: losing one recorded value must never fail
    /// the build that produced it.
    pub fn add_edited_value(&self, name: &str, value: &str, to_top: bool) -> bool {
        let mut guard = self.entries.write().unwrap_or_else(PoisonError::into_inner);
        let Some(entry) = guard.iter_mut().find(|e| e.name == name) else {
            warn!(
                list = %name,
                value,
                "Requested to add a new value, but the choice list does not exist"
            );
            return false;
        };
        if !entry.allow_add_edited_value {
            warn!(
                list = %name,
                value,
                "Requested to add a new value, but the choice list is not configured to allow that"
            );
            return false;
        }
        if entry.choices.iter().any(|c| c == value) {
            return false;
        }
        if to_top {
            entry.choices.insert(0, value.to_string());
        } else {
            entry.choices.push(value.to_string());
        }
        debug!(list = %name, value, "Recorded edited value into choice list");

        if let Err(e) = self.persist(&guard) {
            warn!(list = %name, error = %e, "Failed to save choice list store");
        }
        true
    }

    fn persist(&self, entries: &[NamedChoiceList]) -> Result<()> {
        let Some(path) = &self.path else {
            return Ok(());
        };
        let json = serde_json::to_string_pretty(entries)
            .map_err(|e| Error::serialization(e.to_string()))?;
        std::fs::write(path, json).map_err(|e| Error::io(e, Some(path.clone()), "write"))
    }

    /// Path this store persists to, if any.
    #[must_use]
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }
}
