//! Facet Types - feature identifiers and interaction value objects
//!
//! Everything in this crate is a plain value: identifiers naming a reflected
//! feature, the immutable context objects describing one attempted interaction
//! against such a feature, and the consent/veto vocabulary the rule-checking
//! pipeline answers with. No behavior lives here beyond construction and
//! formatting.

#![deny(unsafe_code)]

pub mod consent;
pub mod context;
pub mod identifier;

pub use consent::{Consent, VetoReason};
pub use context::{
    InteractionHead, InteractionInitiatedBy, InteractionPhase, InteractionType, ObjectKind,
    ObjectRef, UsabilityContext, ValidityContext, VisibilityContext, Where,
};
pub use identifier::{FeatureType, Identifier};
