//! Newtype wrappers for store-assigned identifiers.
//!
//! Every entity is keyed by a 64-bit integer assigned by the active store.
//! The wrappers keep a `SongId` from being passed where a `ServiceId` is expected.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

macro_rules! int_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub i64);

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                self.0.fmt(f)
            }
        }

        impl FromStr for $name {
            type Err = std::num::ParseIntError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Ok(Self(s.parse()?))
            }
        }

        impl From<i64> for $name {
            fn from(id: i64) -> Self {
                Self(id)
            }
        }

        impl From<$name> for i64 {
            fn from(id: $name) -> Self {
                id.0
            }
        }
    };
}

int_id!(
    /// Identifies a user account.
    UserId
);
int_id!(
    /// Identifies a ministry (worship team).
    MinistryId
);
int_id!(
    /// Identifies a user's membership in a ministry.
    MinistryMemberId
);
int_id!(
    /// Identifies a song in a ministry's repertoire.
    SongId
);
int_id!(
    /// Identifies a scheduled service.
    ServiceId
);
int_id!(
    /// Identifies a roster entry of a service.
    ServiceMemberId
);
int_id!(
    /// Identifies a setlist entry of a service.
    ServiceSongId
);
int_id!(
    /// Identifies an availability range.
    AvailabilityId
);
int_id!(
    /// Identifies a message.
    MessageId
);
