//! Screenspec Model
//!
//! This crate provides the "locked" specification representation for
//! screenspec. A locked specification is the validated, indexed form of a
//! [`SpecificationDocument`] that the interpreter runs against.
//!
//! Key differences from `screenspec-config`:
//! - Screen ids are unique and indexed for lookup
//! - Transitions and screen-scoped rules only reference existing screens
//! - Rule scope is normalized into [`RuleScope`]
//! - The initial screen is resolved
//!
//! A [`Specification`] is read-only and is meant to be shared (`Arc`) by every
//! session that runs against it.
//!
//! [`SpecificationDocument`]: screenspec_config::SpecificationDocument

mod error;
mod rule;
mod specification;

pub use error::SpecError;
pub use rule::{Rule, RuleScope};
pub use specification::Specification;
