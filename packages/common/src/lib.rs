//! Common infrastructure shared by the tlsprov crates
//!
//! This crate provides:
//! - Error handling with context propagation and shared error identity
//! - Logging bootstrap and structured log helpers

pub mod error;

pub use error::*;
