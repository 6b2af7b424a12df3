//! Whether ships may be detached from a parking after it left `draft`

use serde::{Deserialize, Serialize};

use crate::value_objects::ParkingStatus;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum DetachPolicy {
    /// Detach is allowed in any status.
    #[default]
    Always,
    /// Detach is only allowed while the parking is a draft.
    DraftOnly,
}

impl DetachPolicy {
    pub fn allows(self, status: ParkingStatus) -> bool {
        match self {
            Self::Always => true,
            Self::DraftOnly => status == ParkingStatus::Draft,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Always => "always",
            Self::DraftOnly => "draft_only",
        }
    }
}

impl std::str::FromStr for DetachPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "always" => Ok(Self::Always),
            "draft_only" | "draft-only" => Ok(Self::DraftOnly),
            other => Err(format!("unknown detach policy: {other}")),
        }
    }
}
