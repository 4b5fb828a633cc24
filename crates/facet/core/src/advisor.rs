use facet_types::{InteractionType, UsabilityContext, ValidityContext, VisibilityContext};

/// Common contract of the three advisor families.
///
/// `compatible_with` narrows which interaction shapes an advisor is consulted
/// for. The default accepts everything; advisors backed by action domain
/// events override it to restrict themselves to action interactions.
pub trait InteractionAdvisor {
    fn compatible_with(&self, interaction: InteractionType) -> bool {
        let _ = interaction;
        true
    }
}

/// Consulted during visibility checks; a returned reason hides the feature.
pub trait HidingAdvisor: InteractionAdvisor + Send + Sync {
    /// `None` means "no objection". A returned string is the user-facing
    /// reason the feature is hidden.
    fn hides(&self, context: &VisibilityContext) -> Option<String>;
}

/// Consulted during usability checks; a returned reason disables the feature.
pub trait DisablingAdvisor: InteractionAdvisor + Send + Sync {
    fn disables(&self, context: &UsabilityContext) -> Option<String>;
}

/// Consulted during validity checks; a returned reason rejects the proposed
/// interaction.
pub trait ValidatingAdvisor: InteractionAdvisor + Send + Sync {
    fn invalidates(&self, context: &ValidityContext) -> Option<String>;
}
