//! Generic executor: walks the op list at runtime.
//!
//! This is the reference semantics for the specialized programs in
//! [`crate::codegen`]; the two must stay observationally equivalent. It is
//! returned by the compiler when the caller asks for a throwaway format and
//! is handy when compilation cost matters more than execution cost.

use std::io;

use common::num;
use common::sink::CharSink;

use crate::calendar;
use crate::error::{DateParseError, ParseErrorKind, ParseResult};
use crate::format_trait::DateFormat;
use crate::locale::DateLocale;
use crate::opcode::{self, op};
use crate::util::{self, promote_hour_type, FormatState, ParseState, OFFSET_SENTINEL};

pub struct GenericDateFormat<'a> {
    ops: Vec<i32>,
    delimiters: Vec<&'a str>,
}

impl<'a> GenericDateFormat<'a> {
    pub(crate) fn new(ops: Vec<i32>, delimiters: Vec<&'a str>) -> Self {
        Self { ops, delimiters }
    }

    fn delimiter(&self, code: i32) -> &'a str {
        self.delimiters[(-code - 1) as usize]
    }

    /// Write a readable op listing, one op per line.
    pub fn disassemble<W: io::Write>(&self, out: &mut W) -> io::Result<()> {
        for (i, &code) in self.ops.iter().enumerate() {
            if code > 0 {
                writeln!(out, "{i}: {}", opcode::name(code))?;
            } else {
                writeln!(out, "{i}: DELIMITER {:?}", self.delimiter(code))?;
            }
        }
        Ok(())
    }

    /// Dump the op stream and delimiter table to stderr.
    pub fn dump(&self) {
        let stderr = io::stderr();
        let mut out = stderr.lock();
        use io::Write;
        writeln!(out, "--- ops ({}) ---", self.ops.len()).ok();
        self.disassemble(&mut out).ok();
        writeln!(out, "--- delimiters ({}) ---", self.delimiters.len()).ok();
        for (i, d) in self.delimiters.iter().enumerate() {
            writeln!(out, "{}: {:?}", i + 1, d).ok();
        }
    }

    fn name_lookup(packed: Option<u64>, pos: usize) -> ParseResult<u64> {
        packed.ok_or(DateParseError::new(ParseErrorKind::NameLookupFailed, pos))
    }
}

impl DateFormat for GenericDateFormat<'_> {
    fn parse(&self, text: &str, lo: usize, hi: usize, locale: &DateLocale)
        -> Result<i64, DateParseError>
    {
        let mut st = ParseState::start(lo);
        st.day = 1;
        st.month = 1;
        st.year = 1970;
        st.era = 1;

        for &code in &self.ops {
            match code {
                op::AM_PM => {
                    st.temp = Self::name_lookup(locale.match_am_pm(text, st.pos, hi), st.pos)?;
                    st.hour_type = num::decode_int(st.temp);
                    st.pos += num::decode_len(st.temp);
                }
                op::MILLIS_ONE_DIGIT => {
                    st.millis = util::parse_fixed(text, st.pos, 1, hi)?;
                    st.pos += 1;
                }
                op::MILLIS_THREE_DIGITS => {
                    st.millis = util::parse_fixed(text, st.pos, 3, hi)?;
                    st.pos += 3;
                }
                op::MILLIS_GREEDY => {
                    st.temp = util::parse_greedy(text, st.pos, hi)?;
                    st.millis = num::decode_int(st.temp);
                    st.pos += num::decode_len(st.temp);
                }
                op::SECOND_ONE_DIGIT => {
                    st.second = util::parse_fixed(text, st.pos, 1, hi)?;
                    st.pos += 1;
                }
                op::SECOND_TWO_DIGITS => {
                    st.second = util::parse_fixed(text, st.pos, 2, hi)?;
                    st.pos += 2;
                }
                op::SECOND_GREEDY => {
                    st.temp = util::parse_greedy(text, st.pos, hi)?;
                    st.second = num::decode_int(st.temp);
                    st.pos += num::decode_len(st.temp);
                }
                op::MINUTE_ONE_DIGIT => {
                    st.minute = util::parse_fixed(text, st.pos, 1, hi)?;
                    st.pos += 1;
                }
                op::MINUTE_TWO_DIGITS => {
                    st.minute = util::parse_fixed(text, st.pos, 2, hi)?;
                    st.pos += 2;
                }
                op::MINUTE_GREEDY => {
                    st.temp = util::parse_greedy(text, st.pos, hi)?;
                    st.minute = num::decode_int(st.temp);
                    st.pos += num::decode_len(st.temp);
                }
                op::HOUR_24_ONE_DIGIT => {
                    st.hour = util::parse_fixed(text, st.pos, 1, hi)?;
                    st.pos += 1;
                }
                op::HOUR_24_TWO_DIGITS => {
                    st.hour = util::parse_fixed(text, st.pos, 2, hi)?;
                    st.pos += 2;
                }
                op::HOUR_24_GREEDY => {
                    st.temp = util::parse_greedy(text, st.pos, hi)?;
                    st.hour = num::decode_int(st.temp);
                    st.pos += num::decode_len(st.temp);
                }
                op::HOUR_24_ONE_DIGIT_ONE_BASED => {
                    st.hour = util::parse_fixed(text, st.pos, 1, hi)? - 1;
                    st.pos += 1;
                }
                op::HOUR_24_TWO_DIGITS_ONE_BASED => {
                    st.hour = util::parse_fixed(text, st.pos, 2, hi)? - 1;
                    st.pos += 2;
                }
                op::HOUR_24_GREEDY_ONE_BASED => {
                    st.temp = util::parse_greedy(text, st.pos, hi)?;
                    st.hour = num::decode_int(st.temp) - 1;
                    st.pos += num::decode_len(st.temp);
                }
                op::HOUR_12_ONE_DIGIT => {
                    st.hour = util::parse_fixed(text, st.pos, 1, hi)?;
                    st.pos += 1;
                    promote_hour_type(&mut st);
                }
                op::HOUR_12_TWO_DIGITS => {
                    st.hour = util::parse_fixed(text, st.pos, 2, hi)?;
                    st.pos += 2;
                    promote_hour_type(&mut st);
                }
                op::HOUR_12_GREEDY => {
                    st.temp = util::parse_greedy(text, st.pos, hi)?;
                    st.hour = num::decode_int(st.temp);
                    st.pos += num::decode_len(st.temp);
                    promote_hour_type(&mut st);
                }
                op::HOUR_12_ONE_DIGIT_ONE_BASED => {
                    st.hour = util::hour_from_one_based_12(util::parse_fixed(text, st.pos, 1, hi)?);
                    st.pos += 1;
                    promote_hour_type(&mut st);
                }
                op::HOUR_12_TWO_DIGITS_ONE_BASED => {
                    st.hour = util::hour_from_one_based_12(util::parse_fixed(text, st.pos, 2, hi)?);
                    st.pos += 2;
                    promote_hour_type(&mut st);
                }
                op::HOUR_12_GREEDY_ONE_BASED => {
                    st.temp = util::parse_greedy(text, st.pos, hi)?;
                    st.hour = util::hour_from_one_based_12(num::decode_int(st.temp));
                    st.pos += num::decode_len(st.temp);
                    promote_hour_type(&mut st);
                }
                op::DAY_ONE_DIGIT => {
                    st.day = util::parse_fixed(text, st.pos, 1, hi)?;
                    st.pos += 1;
                }
                op::DAY_TWO_DIGITS => {
                    st.day = util::parse_fixed(text, st.pos, 2, hi)?;
                    st.pos += 2;
                }
                op::DAY_GREEDY => {
                    st.temp = util::parse_greedy(text, st.pos, hi)?;
                    st.day = num::decode_int(st.temp);
                    st.pos += num::decode_len(st.temp);
                }
                op::DAY_NAME_SHORT | op::DAY_NAME_LONG => {
                    st.temp = Self::name_lookup(locale.match_weekday(text, st.pos, hi), st.pos)?;
                    st.pos += num::decode_len(st.temp);
                }
                op::DAY_OF_WEEK => {
                    // The weekday digit carries no information compute needs.
                    util::parse_fixed(text, st.pos, 1, hi)?;
                    st.pos += 1;
                }
                op::MONTH_ONE_DIGIT => {
                    st.month = util::parse_fixed(text, st.pos, 1, hi)?;
                    st.pos += 1;
                }
                op::MONTH_TWO_DIGITS => {
                    st.month = util::parse_fixed(text, st.pos, 2, hi)?;
                    st.pos += 2;
                }
                op::MONTH_GREEDY => {
                    st.temp = util::parse_greedy(text, st.pos, hi)?;
                    st.month = num::decode_int(st.temp);
                    st.pos += num::decode_len(st.temp);
                }
                op::MONTH_SHORT_NAME | op::MONTH_LONG_NAME => {
                    st.temp = Self::name_lookup(locale.match_month(text, st.pos, hi), st.pos)?;
                    st.month = num::decode_int(st.temp) + 1;
                    st.pos += num::decode_len(st.temp);
                }
                op::YEAR_ONE_DIGIT => {
                    st.year = util::parse_fixed(text, st.pos, 1, hi)?;
                    st.pos += 1;
                }
                op::YEAR_TWO_DIGITS => {
                    st.year = util::adjust_year(util::parse_fixed(text, st.pos, 2, hi)?);
                    st.pos += 2;
                }
                op::YEAR_FOUR_DIGITS => {
                    if st.pos < hi && text.as_bytes()[st.pos] == b'-' {
                        st.year = -util::parse_fixed(text, st.pos + 1, 4, hi)?;
                        st.pos += 5;
                    } else {
                        st.year = util::parse_fixed(text, st.pos, 4, hi)?;
                        st.pos += 4;
                    }
                }
                op::YEAR_GREEDY => {
                    st.temp = util::parse_year_greedy(text, st.pos, hi)?;
                    st.year = num::decode_int(st.temp);
                    st.pos += num::decode_len(st.temp);
                }
                op::ERA => {
                    st.temp = Self::name_lookup(locale.match_era(text, st.pos, hi), st.pos)?;
                    st.era = num::decode_int(st.temp);
                    st.pos += num::decode_len(st.temp);
                }
                op::TIME_ZONE_SHORT
                | op::TIME_ZONE_GMT
                | op::TIME_ZONE_LONG
                | op::TIME_ZONE_RFC_822
                | op::TIME_ZONE_ISO_1
                | op::TIME_ZONE_ISO_2
                | op::TIME_ZONE_ISO_3 => {
                    let packed = util::parse_offset(text, st.pos, hi);
                    if packed == OFFSET_SENTINEL {
                        st.temp = Self::name_lookup(locale.match_zone(text, st.pos, hi), st.pos)?;
                        st.timezone = num::decode_int(st.temp);
                    } else {
                        st.temp = packed as u64;
                        st.offset = i64::from(num::decode_int(st.temp)) * calendar::MINUTE_MILLIS;
                    }
                    st.pos += num::decode_len(st.temp);
                }
                _ => {
                    let delimiter = self.delimiter(code);
                    if delimiter.len() == 1 {
                        util::assert_char(delimiter.as_bytes()[0], text, st.pos, hi)?;
                        st.pos += 1;
                    } else {
                        st.pos = util::assert_string(delimiter, text, st.pos, hi)?;
                    }
                }
            }
        }

        util::assert_no_tail(st.pos, hi)?;
        util::compute(locale, &st, hi)
    }

    fn format(&self, instant: i64, locale: &DateLocale, zone_label: &str, sink: &mut dyn CharSink) {
        // The interpreter materializes every field; only the specialized
        // programs trim the prelude to the pattern's needs.
        let mut fields = FormatState::default();
        fields.year = calendar::year_of(instant);
        fields.leap = calendar::is_leap_year(fields.year);
        fields.month = calendar::month_of_year(instant, fields.year, fields.leap);
        fields.day = calendar::day_of_month(instant, fields.year, fields.month, fields.leap);
        fields.hour = calendar::hour_of_day(instant);
        fields.minute = calendar::minute_of_hour(instant);
        fields.second = calendar::second_of_minute(instant);
        fields.millis = calendar::millis_of_second(instant);
        fields.day_of_week = calendar::day_of_week_sunday_first(instant);

        for &code in &self.ops {
            match code {
                op::AM_PM => util::put_am_pm(sink, fields.hour, locale),
                op::MILLIS_ONE_DIGIT | op::MILLIS_GREEDY => sink.put_int(fields.millis),
                op::MILLIS_THREE_DIGITS => util::put_3(sink, fields.millis),
                op::SECOND_ONE_DIGIT | op::SECOND_GREEDY => sink.put_int(fields.second),
                op::SECOND_TWO_DIGITS => util::put_2(sink, fields.second),
                op::MINUTE_ONE_DIGIT | op::MINUTE_GREEDY => sink.put_int(fields.minute),
                op::MINUTE_TWO_DIGITS => util::put_2(sink, fields.minute),
                op::HOUR_12_ONE_DIGIT | op::HOUR_12_GREEDY => util::put_hour_12(sink, fields.hour),
                op::HOUR_12_TWO_DIGITS => util::put_hour_12_padded(sink, fields.hour),
                op::HOUR_12_ONE_DIGIT_ONE_BASED | op::HOUR_12_GREEDY_ONE_BASED => {
                    util::put_hour_12_one_based(sink, fields.hour)
                }
                op::HOUR_12_TWO_DIGITS_ONE_BASED => {
                    util::put_hour_12_one_based_padded(sink, fields.hour)
                }
                op::HOUR_24_ONE_DIGIT | op::HOUR_24_GREEDY => sink.put_int(fields.hour),
                op::HOUR_24_TWO_DIGITS => util::put_2(sink, fields.hour),
                op::HOUR_24_ONE_DIGIT_ONE_BASED | op::HOUR_24_GREEDY_ONE_BASED => {
                    sink.put_int(fields.hour + 1)
                }
                op::HOUR_24_TWO_DIGITS_ONE_BASED => util::put_2(sink, fields.hour + 1),
                op::DAY_ONE_DIGIT | op::DAY_GREEDY => sink.put_int(fields.day),
                op::DAY_TWO_DIGITS => util::put_2(sink, fields.day),
                op::DAY_NAME_LONG => sink.put_str(locale.weekday(fields.day_of_week)),
                op::DAY_NAME_SHORT => sink.put_str(locale.short_weekday(fields.day_of_week)),
                op::DAY_OF_WEEK => sink.put_int(fields.day_of_week),
                op::MONTH_ONE_DIGIT | op::MONTH_GREEDY => sink.put_int(fields.month),
                op::MONTH_TWO_DIGITS => util::put_2(sink, fields.month),
                op::MONTH_SHORT_NAME => sink.put_str(locale.short_month(fields.month - 1)),
                op::MONTH_LONG_NAME => sink.put_str(locale.month(fields.month - 1)),
                op::YEAR_ONE_DIGIT | op::YEAR_GREEDY => util::put_year_short(sink, fields.year),
                op::YEAR_TWO_DIGITS => util::put_year_2(sink, fields.year),
                op::YEAR_FOUR_DIGITS => util::put_year_4(sink, fields.year),
                op::ERA => util::put_era(sink, fields.year, locale),
                op::TIME_ZONE_SHORT
                | op::TIME_ZONE_GMT
                | op::TIME_ZONE_LONG
                | op::TIME_ZONE_RFC_822
                | op::TIME_ZONE_ISO_1
                | op::TIME_ZONE_ISO_2
                | op::TIME_ZONE_ISO_3 => sink.put_str(zone_label),
                _ => {
                    let delimiter = self.delimiter(code);
                    if delimiter.len() == 1 {
                        sink.put_char(delimiter.as_bytes()[0] as char);
                    } else {
                        sink.put_str(delimiter);
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::opcode::op;
    use indoc::indoc;

    #[test]
    fn disassembly_lists_ops_and_delimiters() {
        let format = GenericDateFormat::new(
            vec![op::YEAR_FOUR_DIGITS, -1, op::MONTH_GREEDY],
            vec!["-"],
        );
        let mut out = Vec::new();
        format.disassemble(&mut out).unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            indoc! {r#"
                0: YEAR_FOUR_DIGITS
                1: DELIMITER "-"
                2: MONTH_GREEDY
            "#}
        );
    }

    #[test]
    fn dump_is_exercisable() {
        let format = GenericDateFormat::new(vec![op::SECOND_GREEDY], Vec::new());
        format.dump();
    }

    #[test]
    fn empty_op_list_parses_to_epoch() {
        let format = GenericDateFormat::new(Vec::new(), Vec::new());
        let locale = crate::locale::default_locale();
        assert_eq!(format.parse("", 0, 0, locale).unwrap(), 0);

        let mut out = String::new();
        format.format(1_490_627_045_123, locale, "UTC", &mut out);
        assert_eq!(out, "");
    }
}
