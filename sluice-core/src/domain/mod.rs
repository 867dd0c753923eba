//! Core domain types
//!
//! These types are shared between the scheduler (which produces them) and
//! the CLI (which displays them).

pub mod endpoint;
pub mod job;
pub mod outcome;
