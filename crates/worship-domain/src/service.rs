//! Service scheduling types.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::role::UnknownVariant;

/// Preparation state of a scheduled service.
///
/// Any status may overwrite any other; there is no enforced lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ServiceStatus {
    #[default]
    Pending,
    Ready,
    Completed,
}

impl ServiceStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Ready => "ready",
            Self::Completed => "completed",
        }
    }
}

impl fmt::Display for ServiceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ServiceStatus {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(Self::Pending),
            "ready" => Ok(Self::Ready),
            "completed" => Ok(Self::Completed),
            other => Err(UnknownVariant {
                kind: "service status",
                value: other.to_owned(),
            }),
        }
    }
}

/// Position assigned to a roster entry when none is known.
pub const DEFAULT_POSITION: &str = "Member";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_default_to_pending() {
        assert_eq!(ServiceStatus::default(), ServiceStatus::Pending);
    }

    #[test]
    fn should_round_trip_status_through_str() {
        for status in [
            ServiceStatus::Pending,
            ServiceStatus::Ready,
            ServiceStatus::Completed,
        ] {
            assert_eq!(status.as_str().parse::<ServiceStatus>(), Ok(status));
        }
    }

    #[test]
    fn should_reject_unknown_status() {
        assert!("cancelled".parse::<ServiceStatus>().is_err());
    }
}
