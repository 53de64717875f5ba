//! Allocation core for the campus hub.
//!
//! Two workflows share the same shape: an immutable request is validated,
//! a new record is built, and the result is committed through a repository
//! trait. [`workflows::lottery`] runs one-time prize draws over a round's
//! applicant pool; [`workflows::events`] validates council event edits
//! against their registration window.

pub mod config;
pub mod error;
pub mod telemetry;
pub mod workflows;
