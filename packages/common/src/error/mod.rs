//! Error handling with context propagation
//!
//! Provides a small error system with:
//! - Error chaining and context preservation
//! - Backtrace capture and display
//! - Structured error kinds with thiserror
//! - Clones that keep the identity of the failure they were made from

pub mod constructors;
pub mod display;
pub mod logging;
pub mod macros;
pub mod types;

pub use display::Chain;
pub use logging::LoggingTransformer;
pub use types::{Error, ErrorKind, Result};
