//! Sluice Core
//!
//! Core types and abstractions for the Sluice batch dispatcher.
//!
//! This crate contains:
//! - Domain types: Jobs, endpoints and per-job outcomes
//! - DTOs: The request/response shapes exchanged with a parse endpoint
//! - Allocation: How many workers each endpoint receives for a run
//! - Errors: The fatal error taxonomy shared by the scheduler and CLI

pub mod allocation;
pub mod domain;
pub mod dto;
pub mod error;

pub use allocation::Allocation;
pub use error::{ConfigError, SchedulerError};
