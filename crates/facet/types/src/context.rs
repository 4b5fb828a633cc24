use serde::{Deserialize, Serialize};

use crate::identifier::{FeatureType, Identifier};

/// Who triggered the interaction being checked.
///
/// Framework-initiated interactions (fixture installs, bulk updates) are
/// still run through the same pipeline; advisors may choose to consult this.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum InteractionInitiatedBy {
    User,
    Framework,
}

impl InteractionInitiatedBy {
    pub fn is_user(&self) -> bool {
        matches!(self, InteractionInitiatedBy::User)
    }
}

/// Where in the UI the feature is being rendered when the check runs.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Where {
    Everywhere,
    ObjectForms,
    ParentedTables,
    StandaloneTables,
    AllTables,
}

impl Where {
    /// Whether a facet declared for `self` applies to a check occurring at
    /// `other`.
    pub fn includes(&self, other: Where) -> bool {
        match self {
            Where::Everywhere => true,
            Where::AllTables => matches!(
                other,
                Where::AllTables | Where::ParentedTables | Where::StandaloneTables
            ),
            _ => *self == other,
        }
    }
}

impl Default for Where {
    fn default() -> Self {
        Where::Everywhere
    }
}

/// Which of the three rule-checking phases an interaction belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum InteractionPhase {
    Visibility,
    Usability,
    Validity,
}

/// Phase plus feature kind; one value per concrete interaction context shape.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct InteractionType {
    pub phase: InteractionPhase,
    pub feature: FeatureType,
}

impl std::fmt::Display for InteractionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let phase = match self.phase {
            InteractionPhase::Visibility => "visibility",
            InteractionPhase::Usability => "usability",
            InteractionPhase::Validity => "validity",
        };
        write!(f, "{:?}.{}", self.feature, phase)
    }
}

/// Broad classification of the objects appearing in an interaction head.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ObjectKind {
    Entity,
    ViewModel,
    Service,
    Mixin,
}

/// Lightweight reference to a domain object participating in an interaction.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObjectRef {
    pub kind: ObjectKind,
    pub type_name: String,
}

impl ObjectRef {
    pub fn new(kind: ObjectKind, type_name: impl Into<String>) -> Self {
        Self {
            kind,
            type_name: type_name.into(),
        }
    }

    pub fn is_mixin(&self) -> bool {
        matches!(self.kind, ObjectKind::Mixin)
    }
}

/// Owner/target pair for one interaction.
///
/// For a plain member the owner and target are the same object; for a
/// mixed-in member the owner is the mixee the member is contributed to.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct InteractionHead {
    pub owner: ObjectRef,
    pub target: ObjectRef,
}

impl InteractionHead {
    /// # Panics
    ///
    /// Panics if `target` is a mixin. A mixin instance is never a valid
    /// interaction target; reaching this is a metamodel-construction bug,
    /// not a runtime condition, so it must not be swallowed.
    pub fn new(owner: ObjectRef, target: ObjectRef) -> Self {
        assert!(
            !target.is_mixin(),
            "interaction target '{}' is a mixin; mixins cannot be interacted with directly",
            target.type_name
        );
        Self { owner, target }
    }

    /// Head for a regular (non-mixed-in) interaction.
    pub fn simple(object: ObjectRef) -> Self {
        Self::new(object.clone(), object)
    }
}

/// One attempted "is this visible" check against a feature.
///
/// Contexts are constructed per rule-check invocation and discarded after;
/// they are never reused across calls.
#[derive(Clone, Debug)]
pub struct VisibilityContext {
    pub initiated_by: InteractionInitiatedBy,
    pub identifier: Identifier,
    pub head: InteractionHead,
    pub where_: Where,
}

impl VisibilityContext {
    pub fn new(
        initiated_by: InteractionInitiatedBy,
        identifier: Identifier,
        head: InteractionHead,
        where_: Where,
    ) -> Self {
        Self {
            initiated_by,
            identifier,
            head,
            where_,
        }
    }

    pub fn interaction_type(&self) -> InteractionType {
        InteractionType {
            phase: InteractionPhase::Visibility,
            feature: self.identifier.feature_type,
        }
    }
}

/// One attempted "is this enabled" check against a feature.
#[derive(Clone, Debug)]
pub struct UsabilityContext {
    pub initiated_by: InteractionInitiatedBy,
    pub identifier: Identifier,
    pub head: InteractionHead,
    pub where_: Where,
}

impl UsabilityContext {
    pub fn new(
        initiated_by: InteractionInitiatedBy,
        identifier: Identifier,
        head: InteractionHead,
        where_: Where,
    ) -> Self {
        Self {
            initiated_by,
            identifier,
            head,
            where_,
        }
    }

    pub fn interaction_type(&self) -> InteractionType {
        InteractionType {
            phase: InteractionPhase::Usability,
            feature: self.identifier.feature_type,
        }
    }
}

/// One attempted "is this proposed interaction valid" check.
#[derive(Clone, Debug)]
pub struct ValidityContext {
    pub initiated_by: InteractionInitiatedBy,
    pub identifier: Identifier,
    pub head: InteractionHead,
    pub where_: Where,
}

impl ValidityContext {
    pub fn new(
        initiated_by: InteractionInitiatedBy,
        identifier: Identifier,
        head: InteractionHead,
        where_: Where,
    ) -> Self {
        Self {
            initiated_by,
            identifier,
            head,
            where_,
        }
    }

    pub fn interaction_type(&self) -> InteractionType {
        InteractionType {
            phase: InteractionPhase::Validity,
            feature: self.identifier.feature_type,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entity(name: &str) -> ObjectRef {
        ObjectRef::new(ObjectKind::Entity, name)
    }

    #[test]
    fn simple_head_targets_the_owner_itself() {
        let head = InteractionHead::simple(entity("Customer"));
        assert_eq!(head.owner, head.target);
    }

    #[test]
    #[should_panic(expected = "is a mixin")]
    fn mixin_target_is_rejected_at_construction() {
        InteractionHead::new(
            entity("Customer"),
            ObjectRef::new(ObjectKind::Mixin, "Customer_placeOrder"),
        );
    }

    #[test]
    fn interaction_type_combines_phase_and_feature_kind() {
        let ctx = VisibilityContext::new(
            InteractionInitiatedBy::User,
            Identifier::property("Customer", "firstName"),
            InteractionHead::simple(entity("Customer")),
            Where::ObjectForms,
        );
        assert_eq!(
            ctx.interaction_type(),
            InteractionType {
                phase: InteractionPhase::Visibility,
                feature: FeatureType::Property,
            }
        );
    }

    #[test]
    fn where_inclusion_rules() {
        assert!(Where::Everywhere.includes(Where::StandaloneTables));
        assert!(Where::AllTables.includes(Where::ParentedTables));
        assert!(!Where::AllTables.includes(Where::ObjectForms));
        assert!(!Where::ObjectForms.includes(Where::StandaloneTables));
    }
}
