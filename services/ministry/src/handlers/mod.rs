pub mod availability;
pub mod member;
pub mod message;
pub mod ministry;
pub mod service;
pub mod song;
pub mod user;
