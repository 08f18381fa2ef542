//! Error handling module
//!
//! Defines the error type and its exit codes

pub mod types;

pub use types::*;
