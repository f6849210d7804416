//! Executor trait shared by the interpreter and the specialized programs.

use common::sink::CharSink;

use crate::error::DateParseError;
use crate::locale::DateLocale;

/// A compiled date format.
///
/// Implementations are immutable once built and safe to share across
/// threads; both operations take all state as arguments.
pub trait DateFormat: Send + Sync {
    /// Parse `text[lo..hi]` into UTC milliseconds since the Unix epoch.
    fn parse(&self, text: &str, lo: usize, hi: usize, locale: &DateLocale)
        -> Result<i64, DateParseError>;

    /// Render the instant through the pattern into `sink`. Time-zone ops
    /// write `zone_label` verbatim.
    fn format(&self, instant: i64, locale: &DateLocale, zone_label: &str, sink: &mut dyn CharSink);
}
