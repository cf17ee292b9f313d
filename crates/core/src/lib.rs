//! Core types for the choiceparam ecosystem
//!
//! This crate carries everything the provider, store, and build-hook crates
//! share:
//! - The [`Error`] type and [`Result`] alias used across the workspace
//! - The textarea line-list utility ([`textarea`])
//! - Edit-tracking trigger policies and build statuses ([`policy`])
//! - Form-validation primitives ([`validation`])
//!
//! Nothing in here touches the filesystem or a database; those concerns live
//! in the crates that own them.

mod error;
pub mod policy;
pub mod textarea;
pub mod validation;

pub use error::{Error, Result};
pub use policy::{AddWhen, BuildStatus, EditTracking};
pub use validation::{Validation, ValidationKind};
