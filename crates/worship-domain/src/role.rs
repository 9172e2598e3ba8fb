//! Account and team role types.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Error returned when a stored role or status string is not recognised.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown {kind}: {value}")]
pub struct UnknownVariant {
    pub kind: &'static str,
    pub value: String,
}

/// Application-wide account role.
///
/// Wire format: lowercase string (`"admin"`, `"member"`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    Admin,
    #[default]
    Member,
}

impl UserRole {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::Member => "member",
        }
    }
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for UserRole {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "admin" => Ok(Self::Admin),
            "member" => Ok(Self::Member),
            other => Err(UnknownVariant {
                kind: "user role",
                value: other.to_owned(),
            }),
        }
    }
}

/// Role of a user inside one ministry.
///
/// Wire format: capitalised string (`"Leader"`, `"Admin"`, `"Member"`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum MemberRole {
    Leader,
    Admin,
    #[default]
    Member,
}

impl MemberRole {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Leader => "Leader",
            Self::Admin => "Admin",
            Self::Member => "Member",
        }
    }

    /// Leaders and admins may manage the team roster.
    pub fn can_manage_team(self) -> bool {
        matches!(self, Self::Leader | Self::Admin)
    }
}

impl fmt::Display for MemberRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MemberRole {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Leader" => Ok(Self::Leader),
            "Admin" => Ok(Self::Admin),
            "Member" => Ok(Self::Member),
            other => Err(UnknownVariant {
                kind: "member role",
                value: other.to_owned(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_parse_member_role_from_stored_string() {
        assert_eq!("Leader".parse::<MemberRole>(), Ok(MemberRole::Leader));
        assert_eq!("Admin".parse::<MemberRole>(), Ok(MemberRole::Admin));
        assert_eq!("Member".parse::<MemberRole>(), Ok(MemberRole::Member));
        assert!("leader".parse::<MemberRole>().is_err());
    }

    #[test]
    fn should_only_let_leaders_and_admins_manage_team() {
        assert!(MemberRole::Leader.can_manage_team());
        assert!(MemberRole::Admin.can_manage_team());
        assert!(!MemberRole::Member.can_manage_team());
    }

    #[test]
    fn should_serialize_user_role_lowercase() {
        assert_eq!(serde_json::to_string(&UserRole::Admin).unwrap(), "\"admin\"");
        let parsed: UserRole = serde_json::from_str("\"member\"").unwrap();
        assert_eq!(parsed, UserRole::Member);
    }

    #[test]
    fn should_report_unknown_role_value() {
        let err = "owner".parse::<UserRole>().unwrap_err();
        assert_eq!(err.to_string(), "unknown user role: owner");
    }
}
