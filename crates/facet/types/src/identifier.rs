use serde::{Deserialize, Serialize};

/// Kind of reflected program element a facet holder describes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FeatureType {
    Object,
    Property,
    Collection,
    Action,
    ActionParameter,
}

impl FeatureType {
    /// Members are everything except the owning object itself.
    pub fn is_member(&self) -> bool {
        !matches!(self, FeatureType::Object)
    }

    pub fn is_property(&self) -> bool {
        matches!(self, FeatureType::Property)
    }

    pub fn is_collection(&self) -> bool {
        matches!(self, FeatureType::Collection)
    }

    /// Actions and their parameters form one family for advisor scoping.
    pub fn is_action_family(&self) -> bool {
        matches!(self, FeatureType::Action | FeatureType::ActionParameter)
    }
}

/// Stable name of one metamodel feature: a type, one of its members, or an
/// action parameter.
///
/// Identifiers are pure values; two identifiers naming the same feature
/// compare equal regardless of how they were constructed.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Identifier {
    pub feature_type: FeatureType,
    pub type_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub member_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parameter_index: Option<usize>,
}

impl Identifier {
    pub fn object(type_name: impl Into<String>) -> Self {
        Self {
            feature_type: FeatureType::Object,
            type_name: type_name.into(),
            member_name: None,
            parameter_index: None,
        }
    }

    pub fn property(type_name: impl Into<String>, member_name: impl Into<String>) -> Self {
        Self {
            feature_type: FeatureType::Property,
            type_name: type_name.into(),
            member_name: Some(member_name.into()),
            parameter_index: None,
        }
    }

    pub fn collection(type_name: impl Into<String>, member_name: impl Into<String>) -> Self {
        Self {
            feature_type: FeatureType::Collection,
            type_name: type_name.into(),
            member_name: Some(member_name.into()),
            parameter_index: None,
        }
    }

    pub fn action(type_name: impl Into<String>, member_name: impl Into<String>) -> Self {
        Self {
            feature_type: FeatureType::Action,
            type_name: type_name.into(),
            member_name: Some(member_name.into()),
            parameter_index: None,
        }
    }

    pub fn action_parameter(
        type_name: impl Into<String>,
        member_name: impl Into<String>,
        parameter_index: usize,
    ) -> Self {
        Self {
            feature_type: FeatureType::ActionParameter,
            type_name: type_name.into(),
            member_name: Some(member_name.into()),
            parameter_index: Some(parameter_index),
        }
    }
}

impl std::fmt::Display for Identifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.type_name)?;
        if let Some(member) = &self.member_name {
            write!(f, "#{}", member)?;
        }
        if let Some(index) = self.parameter_index {
            write!(f, "[{}]", index)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identifier_formats_each_feature_kind() {
        assert_eq!(Identifier::object("Customer").to_string(), "Customer");
        assert_eq!(
            Identifier::property("Customer", "firstName").to_string(),
            "Customer#firstName"
        );
        assert_eq!(
            Identifier::action("Customer", "placeOrder").to_string(),
            "Customer#placeOrder"
        );
        assert_eq!(
            Identifier::action_parameter("Customer", "placeOrder", 2).to_string(),
            "Customer#placeOrder[2]"
        );
    }

    #[test]
    fn action_parameters_belong_to_the_action_family() {
        assert!(FeatureType::Action.is_action_family());
        assert!(FeatureType::ActionParameter.is_action_family());
        assert!(!FeatureType::Property.is_action_family());
        assert!(!FeatureType::Object.is_member());
    }

    #[test]
    fn identifier_serializes_without_absent_fields() {
        let json = serde_json::to_value(Identifier::object("Customer")).unwrap();
        assert!(json.get("member_name").is_none());
        assert!(json.get("parameter_index").is_none());
    }
}
