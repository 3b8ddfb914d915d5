use serde::{Deserialize, Serialize};

/// Household category a return is filed under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FilingStatus {
    Single,
    MarriedJoint,
    MarriedSeparate,
}

impl FilingStatus {
    /// Every accepted status, in the order they are listed to callers.
    pub const ALL: [FilingStatus; 3] = [Self::Single, Self::MarriedJoint, Self::MarriedSeparate];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Single => "single",
            Self::MarriedJoint => "marriedJoint",
            Self::MarriedSeparate => "marriedSeparate",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "single" => Some(Self::Single),
            "marriedJoint" => Some(Self::MarriedJoint),
            "marriedSeparate" => Some(Self::MarriedSeparate),
            _ => None,
        }
    }

    pub fn is_single(&self) -> bool {
        matches!(self, Self::Single)
    }
}

impl std::fmt::Display for FilingStatus {
    fn fmt(
        &self,
        f: &mut std::fmt::Formatter<'_>,
    ) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
