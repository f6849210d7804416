//! Parse failure surface.

use thiserror::Error;

/// What went wrong while matching input against a compiled pattern.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseErrorKind {
    #[error("unexpected end of input")]
    ShortInput,

    #[error("expected a digit")]
    BadDigit,

    #[error("delimiter mismatch")]
    DelimiterMismatch,

    #[error("unknown month, weekday, era, AM/PM or time-zone name")]
    NameLookupFailed,

    #[error("trailing characters after pattern")]
    TailGarbage,

    #[error("field combination out of calendar range")]
    CalendarOutOfRange,
}

/// A parse failure, positioned at the offending byte of the input.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("{kind} at byte {pos}")]
pub struct DateParseError {
    pub kind: ParseErrorKind,
    pub pos: usize,
}

impl DateParseError {
    pub fn new(kind: ParseErrorKind, pos: usize) -> Self {
        Self { kind, pos }
    }
}

pub type ParseResult<T> = Result<T, DateParseError>;
