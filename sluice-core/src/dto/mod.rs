//! Data Transfer Objects for endpoint communication
//!
//! The wire shapes exchanged with a parse endpoint. JSON over HTTP is the
//! reference encoding.

pub mod parse;
