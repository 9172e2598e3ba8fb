//! Identity types shared across worship services.
//!
//! Authentication happens upstream; services only read the identity the gateway forwards.

pub mod identity;

/// Header carrying the authenticated user id.
pub const USER_ID_HEADER: &str = "x-worship-user-id";
