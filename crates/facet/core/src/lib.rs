//! Facet Core - precedence-ranked facet composition over metamodel features
//!
//! A facet is one behavioral contribution attached to a reflected program
//! element. Many independent contributors (annotation scanners, layout
//! readers, post-processors) may contribute competing facets of the same
//! type; this crate decides who wins. The pieces, bottom up:
//!
//! - [`FacetRanking`]: all contributions for one facet type, winner selected
//!   by precedence with last-added-wins on ties.
//! - [`SimpleFacetHolder`]: a ranking per facet type plus a lazily rebuilt
//!   winner snapshot, guarded by one holder-scoped mutex.
//! - [`LayeredFacetHolder`]: a per-member holder composed with the holder
//!   shared across all members of the declaring type.

#![deny(unsafe_code)]

pub mod advisor;
pub mod facet;
pub mod holder;
pub mod layered;
pub mod ranking;
pub mod validation;

pub use advisor::{DisablingAdvisor, HidingAdvisor, InteractionAdvisor, ValidatingAdvisor};
pub use facet::{Facet, FacetKey, Precedence};
pub use holder::{FacetHolder, SimpleFacetHolder};
pub use layered::{LayeredFacetHolder, TieBreak};
pub use ranking::FacetRanking;
pub use validation::{ValidationFailure, ValidationFailures};
