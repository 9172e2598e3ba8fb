//! HTTP tests against the full router backed by the in-memory store.

mod helpers;

mod health_test;
mod message_test;
mod ministry_test;
mod service_test;
mod user_test;
