use std::sync::Arc;

use facet_core::{Facet, FacetHolder};
use facet_types::{UsabilityContext, ValidityContext, VetoReason, VisibilityContext};
use tracing::error;

use crate::result::{InteractionResult, InteractionResultSet};

/// Run every hiding advisor installed on the holder against one visibility
/// attempt and fold the outcomes into a single result.
///
/// All three check functions share the same shape: stream the holder's
/// winning facets, keep those exposing the family's advisor capability and
/// compatible with the interaction shape, consult each one, and record every
/// explicit veto. There is deliberately no short-circuit on the first veto:
/// diagnostic surfaces need the complete set of contributing reasons.
pub fn is_visible_result(
    holder: &dyn FacetHolder,
    context: &VisibilityContext,
) -> InteractionResult {
    let interaction_type = context.interaction_type();
    let mut result = InteractionResult::new(interaction_type);
    for facet in holder.facets() {
        let Some(advisor) = facet.hiding() else {
            continue;
        };
        if !advisor.compatible_with(interaction_type) {
            continue;
        }
        if let Some(reason) = advisor.hides(context) {
            record_veto(&mut result, reason, Arc::clone(&facet));
        }
    }
    result
}

/// Run every disabling advisor against one usability attempt.
pub fn is_usable_result(holder: &dyn FacetHolder, context: &UsabilityContext) -> InteractionResult {
    let interaction_type = context.interaction_type();
    let mut result = InteractionResult::new(interaction_type);
    for facet in holder.facets() {
        let Some(advisor) = facet.disabling() else {
            continue;
        };
        if !advisor.compatible_with(interaction_type) {
            continue;
        }
        if let Some(reason) = advisor.disables(context) {
            record_veto(&mut result, reason, Arc::clone(&facet));
        }
    }
    result
}

/// Run every validating advisor against one proposed interaction.
pub fn is_valid_result(holder: &dyn FacetHolder, context: &ValidityContext) -> InteractionResult {
    let interaction_type = context.interaction_type();
    let mut result = InteractionResult::new(interaction_type);
    for facet in holder.facets() {
        let Some(advisor) = facet.validating() else {
            continue;
        };
        if !advisor.compatible_with(interaction_type) {
            continue;
        }
        if let Some(reason) = advisor.invalidates(context) {
            record_veto(&mut result, reason, Arc::clone(&facet));
        }
    }
    result
}

/// Accumulating variant: append the validity verdict for one feature (e.g.
/// one action parameter) to a set covering the whole invocation.
pub fn is_valid_result_set(
    holder: &dyn FacetHolder,
    context: &ValidityContext,
    results: &mut InteractionResultSet,
) {
    results.add(is_valid_result(holder, context));
}

/// An advisor returning an empty reason is a programming-model misuse: the
/// veto stands, but with a synthesized diagnostic message in place of the
/// blank, and the misuse is logged. The request still completes rather than
/// crashing.
fn record_veto(result: &mut InteractionResult, reason: String, source: Arc<dyn Facet>) {
    let reason = if reason.trim().is_empty() {
        error!(
            facet = %source.key(),
            interaction = %result.interaction_type(),
            "advisor vetoed with an empty reason; substituting a diagnostic message"
        );
        format!(
            "the '{}' advisor vetoed this interaction but supplied no reason \
             (a bug in that facet's implementation)",
            source.key()
        )
    } else {
        reason
    };
    result.advise(VetoReason::new(reason), source);
}
