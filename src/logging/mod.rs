//! Structured logging setup and record emission.

mod format;

pub use format::StructuredLogger;
