//! Screenspec Resolver
//!
//! Turns a [`SpecificationDocument`] into a locked [`Specification`],
//! enforcing the document invariants once so the interpreter never has to.
//!
//! [`SpecificationDocument`]: screenspec_config::SpecificationDocument
//! [`Specification`]: screenspec_model::Specification

mod error;
mod resolver;

pub use error::ResolveError;
pub use resolver::{Resolver, StandardResolver};
