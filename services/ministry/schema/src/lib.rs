//! sea-orm entities for the ministry service's relational store.

pub mod availabilities;
pub mod messages;
pub mod ministries;
pub mod ministry_members;
pub mod service_members;
pub mod service_songs;
pub mod services;
pub mod songs;
pub mod users;
