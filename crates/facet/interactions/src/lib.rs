//! Facet Interactions - veto aggregation over advisor facets
//!
//! The rule-checking entry points UI and command layers call: given a fully
//! populated facet holder and one interaction context, consult every
//! applicable advisor facet and fold the vetoes into a single
//! [`InteractionResult`] exposing the verdict plus every contributing
//! reason.

#![deny(unsafe_code)]

pub mod check;
pub mod result;

pub use check::{is_usable_result, is_valid_result, is_valid_result_set, is_visible_result};
pub use result::{InteractionResult, InteractionResultSet, InteractionVeto};
