//! Shared infrastructure for the datefmt workspace.
//!
//! - [`debug`] - Per-module logging controlled via the `DEBUG` environment variable
//! - [`intern`] - String interning using arena allocation
//! - [`num`] - Digit-window parsing with packed `(value, length)` results
//! - [`sink`] - The character sink the format side writes into

pub mod debug;
pub mod intern;
pub mod num;
pub mod sink;

pub use debug::{create_logger, Logger};
pub use intern::StringInterner;
pub use sink::CharSink;
