use serde::{Deserialize, Serialize};

/// A single advisor's negative decision, with the reason shown to the user.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct VetoReason {
    reason: String,
}

impl VetoReason {
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.reason
    }
}

impl std::fmt::Display for VetoReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.reason)
    }
}

/// The single pass/fail verdict a rule check collapses to.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Consent {
    Allowed,
    Vetoed(VetoReason),
}

impl Consent {
    pub fn is_allowed(&self) -> bool {
        matches!(self, Consent::Allowed)
    }

    pub fn is_vetoed(&self) -> bool {
        !self.is_allowed()
    }

    pub fn reason(&self) -> Option<&str> {
        match self {
            Consent::Allowed => None,
            Consent::Vetoed(veto) => Some(veto.as_str()),
        }
    }
}
