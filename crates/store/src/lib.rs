//! Shared named choice lists
//!
//! A [`ChoiceListStore`] holds the process-wide sets of choices that the
//! global-list provider resolves by name. Every job referencing the same
//! name sees the same entry, and edits recorded through one job are visible
//! to all of them. The store persists itself as a JSON document and guards
//! every read-modify-write sequence with a single lock so concurrent build
//! completions cannot lose updates.

mod entry;
mod store;

pub use entry::NamedChoiceList;
pub use store::ChoiceListStore;
