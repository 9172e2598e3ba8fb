//! HTTP plumbing shared by the worship services.

pub mod health;
pub mod middleware;
pub mod serde;
pub mod tracing;
