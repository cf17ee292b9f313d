//! Choice parameters and their build-lifecycle hooks
//!
//! This crate is the build-facing side of choiceparam:
//! - [`ChoiceParameter`]: a parameter definition whose selectable values
//!   come from a [`choiceparam_providers::ChoiceProvider`], with value
//!   resolution, default handling, and illegal-choice rejection
//! - [`lifecycle`]: the two listeners the host invokes when a build is
//!   enqueued and when it reaches a terminal state, which feed resolved
//!   values back into edit-tracking providers

mod parameter;

pub mod lifecycle;

pub use parameter::{ChoiceParameter, EditableType, ParameterValue};
