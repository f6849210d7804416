//! Shared helpers for the parse and format routines.
//!
//! Everything the emitted closures and the interpreter call lives here:
//! input assertions, digit-window wrappers, the two-digit-year pivot, the
//! numeric-offset scanner, the final `compute` reducer and the padded
//! append helpers.

use std::sync::OnceLock;
use std::time::{SystemTime, UNIX_EPOCH};

use common::num;
use common::sink::CharSink;

use crate::calendar;
use crate::error::{DateParseError, ParseErrorKind, ParseResult};
use crate::locale::DateLocale;

pub const HOUR_24: i32 = 0;
pub const HOUR_AM: i32 = 1;
pub const HOUR_PM: i32 = 2;

/// Sentinel for "no numeric offset parsed".
pub(crate) const OFFSET_SENTINEL: i64 = i64::MIN;

/// A 12-hour op marks the hour as half-day unless AM/PM already decided.
pub(crate) fn promote_hour_type(st: &mut ParseState) {
    if st.hour_type == HOUR_24 {
        st.hour_type = HOUR_AM;
    }
}

/// Normalize a one-based 12-hour reading: 12 is the zeroth hour of the half
/// day (so `12:00AM` is midnight); everything else passes through and the
/// reducer rejects values outside the clock face.
pub(crate) fn hour_from_one_based_12(value: i32) -> i32 {
    if value == 12 {
        0
    } else {
        value
    }
}

/// Local slots of the parse routine. Slots the analyzer proves written are
/// left at their zeroed state until the owning op stores into them; the
/// rest are default-initialized by the prelude.
#[derive(Debug)]
pub(crate) struct ParseState {
    pub day: i32,
    pub month: i32,
    pub year: i32,
    pub hour: i32,
    pub minute: i32,
    pub second: i32,
    pub millis: i32,
    pub era: i32,
    pub temp: u64,
    pub timezone: i32,
    pub offset: i64,
    pub hour_type: i32,
    pub pos: usize,
}

impl ParseState {
    /// Zeroed state with the always-initialized slots set.
    pub fn start(lo: usize) -> Self {
        Self {
            day: 0,
            month: 0,
            year: 0,
            hour: 0,
            minute: 0,
            second: 0,
            millis: 0,
            era: 0,
            temp: 0,
            timezone: -1,
            offset: OFFSET_SENTINEL,
            hour_type: HOUR_24,
            pos: lo,
        }
    }
}

/// Calendar fields the format routine materializes up front.
#[derive(Debug, Default)]
pub(crate) struct FormatState {
    pub year: i32,
    pub leap: bool,
    pub month: i32,
    pub day: i32,
    pub hour: i32,
    pub minute: i32,
    pub second: i32,
    pub millis: i32,
    pub day_of_week: i32,
}

// ---------------------------------------------------------------------------
// Input assertions
// ---------------------------------------------------------------------------

/// The input must still hold a byte at `last` (the last index a fixed-width
/// read will touch).
pub(crate) fn assert_remaining(last: usize, hi: usize) -> ParseResult<()> {
    if last < hi {
        Ok(())
    } else {
        Err(DateParseError::new(ParseErrorKind::ShortInput, hi))
    }
}

pub(crate) fn assert_char(expected: u8, text: &str, pos: usize, hi: usize) -> ParseResult<()> {
    assert_remaining(pos, hi)?;
    if text.as_bytes()[pos] == expected {
        Ok(())
    } else {
        Err(DateParseError::new(ParseErrorKind::DelimiterMismatch, pos))
    }
}

/// Match a multi-byte delimiter and return the position after it.
pub(crate) fn assert_string(delimiter: &str, text: &str, pos: usize, hi: usize) -> ParseResult<usize> {
    let len = delimiter.len();
    if pos + len > hi {
        return Err(DateParseError::new(ParseErrorKind::ShortInput, hi));
    }
    if &text.as_bytes()[pos..pos + len] == delimiter.as_bytes() {
        Ok(pos + len)
    } else {
        Err(DateParseError::new(ParseErrorKind::DelimiterMismatch, pos))
    }
}

pub(crate) fn assert_no_tail(pos: usize, hi: usize) -> ParseResult<()> {
    if pos == hi {
        Ok(())
    } else {
        Err(DateParseError::new(ParseErrorKind::TailGarbage, pos))
    }
}

// ---------------------------------------------------------------------------
// Digit windows
// ---------------------------------------------------------------------------

/// Read exactly `digits` decimal digits starting at `pos`.
pub(crate) fn parse_fixed(text: &str, pos: usize, digits: usize, hi: usize) -> ParseResult<i32> {
    assert_remaining(pos + digits - 1, hi)?;
    num::parse_int(text, pos, pos + digits)
        .ok_or(DateParseError::new(ParseErrorKind::BadDigit, pos))
}

/// Read 1..n digits up to the next non-digit or `hi`; packed result.
pub(crate) fn parse_greedy(text: &str, pos: usize, hi: usize) -> ParseResult<u64> {
    num::parse_int_safely(text, pos, hi)
        .ok_or(DateParseError::new(ParseErrorKind::BadDigit, pos))
}

/// Greedy year read. A two-digit window goes through the pivot adjustment;
/// any other width is taken literally.
pub(crate) fn parse_year_greedy(text: &str, pos: usize, hi: usize) -> ParseResult<u64> {
    let packed = parse_greedy(text, pos, hi)?;
    let len = num::decode_len(packed);
    if len == 2 {
        Ok(num::encode(adjust_year(num::decode_int(packed)), len))
    } else {
        Ok(packed)
    }
}

// ---------------------------------------------------------------------------
// Two-digit-year pivot
// ---------------------------------------------------------------------------

static REFERENCE_YEAR: OnceLock<i32> = OnceLock::new();

/// Year of the system clock, captured once per process.
pub(crate) fn reference_year() -> i32 {
    *REFERENCE_YEAR.get_or_init(|| {
        let now_millis = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis() as i64)
            .unwrap_or(0);
        calendar::year_of(now_millis)
    })
}

/// Resolve a two-digit year to the unique year in
/// `[reference - 79, reference + 20]` with the same last two digits.
pub(crate) fn adjust_year(two_digits: i32) -> i32 {
    let reference = reference_year();
    let century = reference - reference.rem_euclid(100);
    let mut year = century + two_digits;
    if year > reference + 20 {
        year -= 100;
    } else if year < reference - 79 {
        year += 100;
    }
    year
}

/// The two-digit rendering of a year, when it exists: the year must sit in
/// the pivot window and its low two digits must actually occupy two digits,
/// otherwise a greedy reparse would not take the adjustment path.
pub(crate) fn two_digit_year(year: i32) -> Option<i32> {
    let low = year.rem_euclid(100);
    if low >= 10 && adjust_year(low) == year {
        Some(low)
    } else {
        None
    }
}

// ---------------------------------------------------------------------------
// Numeric zone offsets
// ---------------------------------------------------------------------------

/// Scan `[+|-]HH[:]MM` at `lo`. Returns minutes packed with the consumed
/// length, or [`OFFSET_SENTINEL`] when the text is not a numeric offset.
pub(crate) fn parse_offset(text: &str, lo: usize, hi: usize) -> i64 {
    let bytes = text.as_bytes();
    let hi = hi.min(bytes.len());
    if lo >= hi {
        return OFFSET_SENTINEL;
    }
    let sign = match bytes[lo] {
        b'+' => 1,
        b'-' => -1,
        _ => return OFFSET_SENTINEL,
    };
    let hours = match num::parse_int(text, lo + 1, lo + 3) {
        Some(h) if h <= 23 => h,
        _ => return OFFSET_SENTINEL,
    };
    let minutes_at = if lo + 3 < hi && bytes[lo + 3] == b':' { lo + 4 } else { lo + 3 };
    let minutes = match num::parse_int(text, minutes_at, minutes_at + 2) {
        Some(m) if m <= 59 => m,
        _ => return OFFSET_SENTINEL,
    };
    if minutes_at + 2 > hi {
        return OFFSET_SENTINEL;
    }
    num::encode(sign * (hours * 60 + minutes), minutes_at + 2 - lo) as i64
}

// ---------------------------------------------------------------------------
// Final reducer
// ---------------------------------------------------------------------------

/// Reconcile the parsed slots into UTC milliseconds. Range failures are
/// positioned at `hi`, the end of the parsed input.
pub(crate) fn compute(locale: &DateLocale, state: &ParseState, hi: usize) -> ParseResult<i64> {
    let out_of_range = DateParseError::new(ParseErrorKind::CalendarOutOfRange, hi);

    let mut year = state.year;
    if state.era == 0 {
        year = -(year - 1);
    }

    let mut hour = state.hour;
    match state.hour_type {
        HOUR_24 => {
            if !(0..=23).contains(&hour) {
                return Err(out_of_range);
            }
        }
        _ => {
            if !(0..=11).contains(&hour) {
                return Err(out_of_range);
            }
            if state.hour_type == HOUR_PM {
                hour += 12;
            }
        }
    }

    if !(1..=12).contains(&state.month) {
        return Err(out_of_range);
    }
    if state.day < 1 || state.day > calendar::days_in_month(year, state.month) {
        return Err(out_of_range);
    }
    if !(0..=59).contains(&state.minute)
        || !(0..=59).contains(&state.second)
        || !(0..=999).contains(&state.millis)
    {
        return Err(out_of_range);
    }

    let mut millis = calendar::to_millis(
        year,
        state.month,
        state.day,
        hour,
        state.minute,
        state.second,
        state.millis,
    );

    if state.offset != OFFSET_SENTINEL {
        millis -= state.offset;
    } else if state.timezone >= 0 {
        millis -= locale.zone_offset_millis(state.timezone);
    }
    Ok(millis)
}

// ---------------------------------------------------------------------------
// Format-side append helpers
// ---------------------------------------------------------------------------

pub(crate) fn put_2(sink: &mut dyn CharSink, value: i32) {
    if value < 10 {
        sink.put_char('0');
    }
    sink.put_int(value);
}

pub(crate) fn put_3(sink: &mut dyn CharSink, value: i32) {
    if value < 100 {
        sink.put_char('0');
    }
    put_2(sink, value);
}

fn put_4(sink: &mut dyn CharSink, value: i32) {
    if value < 1000 {
        sink.put_char('0');
    }
    put_3(sink, value);
}

/// Four-digit year, negative years with a leading `-` (`-0001`).
pub(crate) fn put_year_4(sink: &mut dyn CharSink, year: i32) {
    if year < 0 {
        sink.put_char('-');
        put_4(sink, -year);
    } else {
        put_4(sink, year);
    }
}

/// One-digit/greedy year: the two-digit window value when the year
/// round-trips through the pivot, otherwise the full year.
pub(crate) fn put_year_short(sink: &mut dyn CharSink, year: i32) {
    match two_digit_year(year) {
        Some(low) => sink.put_int(low),
        None => sink.put_int(year),
    }
}

pub(crate) fn put_year_2(sink: &mut dyn CharSink, year: i32) {
    put_2(sink, year.rem_euclid(100));
}

pub(crate) fn put_hour_12(sink: &mut dyn CharSink, hour: i32) {
    sink.put_int(hour % 12);
}

pub(crate) fn put_hour_12_padded(sink: &mut dyn CharSink, hour: i32) {
    put_2(sink, hour % 12);
}

pub(crate) fn put_hour_12_one_based(sink: &mut dyn CharSink, hour: i32) {
    sink.put_int((hour + 11) % 12 + 1);
}

pub(crate) fn put_hour_12_one_based_padded(sink: &mut dyn CharSink, hour: i32) {
    put_2(sink, (hour + 11) % 12 + 1);
}

pub(crate) fn put_am_pm(sink: &mut dyn CharSink, hour: i32, locale: &DateLocale) {
    sink.put_str(locale.am_pm(if hour < 12 { HOUR_AM } else { HOUR_PM }));
}

pub(crate) fn put_era(sink: &mut dyn CharSink, year: i32, locale: &DateLocale) {
    sink.put_str(locale.era(if year < 1 { 0 } else { 1 }));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn offset_forms() {
        let packed = parse_offset("+0100", 0, 5);
        assert_eq!(num::decode_int(packed as u64), 60);
        assert_eq!(num::decode_len(packed as u64), 5);

        let packed = parse_offset("-05:30", 0, 6);
        assert_eq!(num::decode_int(packed as u64), -330);
        assert_eq!(num::decode_len(packed as u64), 6);

        assert_eq!(parse_offset("UTC", 0, 3), OFFSET_SENTINEL);
        assert_eq!(parse_offset("+1", 0, 2), OFFSET_SENTINEL);
        assert_eq!(parse_offset("+25:00", 0, 6), OFFSET_SENTINEL);
        assert_eq!(parse_offset("", 0, 0), OFFSET_SENTINEL);
    }

    #[test]
    fn year_pivot_window() {
        // Holds for any reference year between 2001 and 2090.
        assert_eq!(adjust_year(21), 2021);
        assert_eq!(adjust_year(70), 1970);
        assert_eq!(two_digit_year(2021), Some(21));
        assert_eq!(two_digit_year(1970), Some(70));
        assert_eq!(two_digit_year(2000), None);
        assert_eq!(two_digit_year(1875), None);
        assert_eq!(two_digit_year(-1), None);
    }

    #[test]
    fn padded_appends() {
        let mut out = String::new();
        put_2(&mut out, 7);
        out.put_char(' ');
        put_3(&mut out, 42);
        out.put_char(' ');
        put_year_4(&mut out, -1);
        out.put_char(' ');
        put_year_4(&mut out, 2017);
        out.put_char(' ');
        put_year_4(&mut out, 12345);
        assert_eq!(out, "07 042 -0001 2017 12345");
    }

    #[test]
    fn hour_rendering() {
        let mut out = String::new();
        put_hour_12_one_based(&mut out, 0);
        out.put_char(' ');
        put_hour_12_one_based(&mut out, 13);
        out.put_char(' ');
        put_hour_12(&mut out, 23);
        out.put_char(' ');
        put_hour_12_padded(&mut out, 13);
        assert_eq!(out, "12 1 11 01");
    }
}
