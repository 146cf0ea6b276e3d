//! Screenspec Config
//!
//! This crate contains the serializable specification document types for
//! screenspec. These types represent a form bundle as it is authored, before
//! it is validated and resolved into a locked `Specification` by
//! `screenspec-resolver`.
//!
//! A document is loaded from:
//! - A bundle directory (`bundle.json` plus `images_base64/`)
//! - Any JSON blob handed over by a host application
//!
//! Every tagged variant (components, steps, comparators) has a fallback for
//! tags this version does not know, so newer documents still load and the
//! interpreter can log and skip what it cannot execute.

mod component;
mod document;
mod rule;
mod screen;
mod transition;

pub use component::{
  ButtonSpec, Component, ComponentKind, DataType, ImageSpec, SpacerSpec, TableColumn, TableSpec,
  TextFieldSpec, TextSpec, Validations,
};
pub use document::{AccessRules, DocumentMeta, OperationalRules, SpecificationDocument};
pub use rule::{
  Comparator, Condition, RuleDef, ScopeKind, StartOperationStep, Step, ValidateFieldsStep,
};
pub use screen::{Layout, Orientation, Screen};
pub use transition::Transition;
