//! Domain types shared across the worship services.
//!
//! This crate contains only pure types with no framework dependencies.
//! Import in `usecase/` and `domain/` layers; storage adapters convert at their edge.

pub mod id;
pub mod role;
pub mod service;
