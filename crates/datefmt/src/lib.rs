//! datefmt - a specializing compiler for date/time format patterns.
//!
//! A pattern such as `yyyy-MM-ddTHH:mm:ss.SSSz` is compiled into an executor
//! with two operations: `parse(text) -> instant` and
//! `format(instant, sink)`. The cost of the executor is proportional to what
//! the pattern actually uses: no per-op dispatch, no defaulting code for
//! fields the pattern writes, no locale lookups for fields it never
//! references.
//!
//! # Overview
//!
//! Compilation runs in four stages:
//!
//! 1. the tokenizer splits the pattern into known symbols and literal
//!    delimiters by longest match;
//! 2. the op-list builder emits one op per token and promotes the last
//!    field op before each boundary to its variable-width twin;
//! 3. two analyzers compute the calendar fields formatting must materialize
//!    and the parse slots that need no default initialization;
//! 4. the emitter lowers each op to a typed closure, producing the
//!    specialized parse and format programs.
//!
//! # Example
//!
//! ```ignore
//! use bumpalo::Bump;
//! use datefmt::{locale, DateFormatCompiler};
//!
//! let arena = Bump::new();
//! let mut compiler = DateFormatCompiler::new(&arena);
//! let format = compiler.compile("yyyy-MM-dd HH:mm", false);
//!
//! let locale = locale::default_locale();
//! let instant = format.parse("2017-03-27 15:04", 0, 16, locale)?;
//!
//! let mut out = String::new();
//! format.format(instant, locale, "UTC", &mut out);
//! assert_eq!(out, "2017-03-27 15:04");
//! ```
//!
//! # Executors
//!
//! - [`CompiledDateFormat`] - specialized closure programs (the default)
//! - [`GenericDateFormat`] - walks the op list at runtime; the reference
//!   semantics, returned when the caller asks for a throwaway format
//!
//! Both implement the same [`DateFormat`] trait. A compiler instance is a
//! reusable single-threaded scratchpad; the formats it returns are immutable
//! and safe to share across threads.

pub mod calendar;
mod codegen;
mod compiler;
mod error;
mod format_trait;
mod generic;
mod lexer;
pub mod locale;
pub mod opcode;
mod util;

// Re-export from datefmt-common
pub use common::sink::CharSink;
pub use common::{create_logger, Logger};

// Re-export public types
pub use codegen::CompiledDateFormat;
pub use compiler::DateFormatCompiler;
pub use error::{DateParseError, ParseErrorKind};
pub use format_trait::DateFormat;
pub use generic::GenericDateFormat;
pub use locale::DateLocale;
pub use util::{HOUR_24, HOUR_AM, HOUR_PM};
