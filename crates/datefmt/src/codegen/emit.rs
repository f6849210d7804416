//! Closure emission for the specialized executor.
//!
//! Each op is lowered to exactly one boxed closure; the opcode dispatch
//! happens here, once, at compile time. Branch-carrying ops (four-digit
//! year, timezone) keep the branch inside a single closure, with both arms
//! leaving the slot state identically shaped.

use common::num;

use crate::calendar;
use crate::error::{DateParseError, ParseErrorKind};
use crate::opcode::op;
use crate::util::{self, promote_hour_type, ParseState, OFFSET_SENTINEL};

use super::analyze;
use super::analyze::*;
use super::program::{CompiledDateFormat, DefaultStep, FieldStep, FormatStep, ParseStep};

/// Build the specialized parse and format programs for one op list.
pub(crate) fn assemble<'a>(ops: &[i32], delimiters: &[&'a str]) -> CompiledDateFormat<'a> {
    CompiledDateFormat {
        defaults: emit_defaults(analyze::parse_slots(ops)),
        parse_ops: ops.iter().map(|&code| emit_parse_op(code, delimiters)).collect(),
        prelude: emit_prelude(analyze::format_attributes(ops)),
        format_ops: ops.iter().map(|&code| emit_format_op(code, delimiters)).collect(),
    }
}

/// Default-init only the slots no op is proven to write.
fn emit_defaults(slots: u32) -> Vec<DefaultStep> {
    let mut defaults: Vec<DefaultStep> = Vec::new();
    if slots & SLOT_DAY == 0 {
        defaults.push(|st| st.day = 1);
    }
    if slots & SLOT_MONTH == 0 {
        defaults.push(|st| st.month = 1);
    }
    if slots & SLOT_YEAR == 0 {
        defaults.push(|st| st.year = 1970);
    }
    if slots & SLOT_HOUR == 0 {
        defaults.push(|st| st.hour = 0);
    }
    if slots & SLOT_MINUTE == 0 {
        defaults.push(|st| st.minute = 0);
    }
    if slots & SLOT_SECOND == 0 {
        defaults.push(|st| st.second = 0);
    }
    if slots & SLOT_MILLIS == 0 {
        defaults.push(|st| st.millis = 0);
    }
    if slots & SLOT_ERA == 0 {
        defaults.push(|st| st.era = 1);
    }
    if slots & SLOT_TEMP == 0 {
        defaults.push(|st| st.temp = 0);
    }
    defaults
}

/// Materialize needed calendar fields in dependency order: month requires
/// year and leap, day requires year, month and leap; wall-clock fields
/// depend only on the instant.
fn emit_prelude(attributes: u32) -> Vec<FieldStep> {
    let mut prelude: Vec<FieldStep> = Vec::new();
    if attributes & FA_YEAR != 0 {
        prelude.push(|instant, st| st.year = calendar::year_of(instant));
    }
    if attributes & FA_LEAP != 0 {
        prelude.push(|_, st| st.leap = calendar::is_leap_year(st.year));
    }
    if attributes & FA_MONTH != 0 {
        prelude.push(|instant, st| st.month = calendar::month_of_year(instant, st.year, st.leap));
    }
    if attributes & FA_DAY != 0 {
        prelude.push(|instant, st| {
            st.day = calendar::day_of_month(instant, st.year, st.month, st.leap);
        });
    }
    if attributes & FA_HOUR != 0 {
        prelude.push(|instant, st| st.hour = calendar::hour_of_day(instant));
    }
    if attributes & FA_MINUTE != 0 {
        prelude.push(|instant, st| st.minute = calendar::minute_of_hour(instant));
    }
    if attributes & FA_SECOND != 0 {
        prelude.push(|instant, st| st.second = calendar::second_of_minute(instant));
    }
    if attributes & FA_MILLIS != 0 {
        prelude.push(|instant, st| st.millis = calendar::millis_of_second(instant));
    }
    if attributes & FA_DAY_OF_WEEK != 0 {
        prelude.push(|instant, st| st.day_of_week = calendar::day_of_week_sunday_first(instant));
    }
    prelude
}

/// Fixed-width digit read feeding `store`.
fn digits_then<'a>(n: usize, store: fn(&mut ParseState, i32)) -> ParseStep<'a> {
    Box::new(move |text, hi, _locale, st| {
        let value = util::parse_fixed(text, st.pos, n, hi)?;
        store(st, value);
        st.pos += n;
        Ok(())
    })
}

/// Greedy digit read feeding `store`.
fn greedy_then<'a>(store: fn(&mut ParseState, i32)) -> ParseStep<'a> {
    Box::new(move |text, hi, _locale, st| {
        st.temp = util::parse_greedy(text, st.pos, hi)?;
        store(st, num::decode_int(st.temp));
        st.pos += num::decode_len(st.temp);
        Ok(())
    })
}

fn name_lookup_failed(pos: usize) -> DateParseError {
    DateParseError::new(ParseErrorKind::NameLookupFailed, pos)
}

fn emit_parse_op<'a>(code: i32, delimiters: &[&'a str]) -> ParseStep<'a> {
    match code {
        op::AM_PM => Box::new(|text, hi, locale, st| {
            st.temp = locale
                .match_am_pm(text, st.pos, hi)
                .ok_or_else(|| name_lookup_failed(st.pos))?;
            st.hour_type = num::decode_int(st.temp);
            st.pos += num::decode_len(st.temp);
            Ok(())
        }),
        op::MILLIS_ONE_DIGIT => digits_then(1, |st, v| st.millis = v),
        op::MILLIS_THREE_DIGITS => digits_then(3, |st, v| st.millis = v),
        op::MILLIS_GREEDY => greedy_then(|st, v| st.millis = v),
        op::SECOND_ONE_DIGIT => digits_then(1, |st, v| st.second = v),
        op::SECOND_TWO_DIGITS => digits_then(2, |st, v| st.second = v),
        op::SECOND_GREEDY => greedy_then(|st, v| st.second = v),
        op::MINUTE_ONE_DIGIT => digits_then(1, |st, v| st.minute = v),
        op::MINUTE_TWO_DIGITS => digits_then(2, |st, v| st.minute = v),
        op::MINUTE_GREEDY => greedy_then(|st, v| st.minute = v),
        op::HOUR_24_ONE_DIGIT => digits_then(1, |st, v| st.hour = v),
        op::HOUR_24_TWO_DIGITS => digits_then(2, |st, v| st.hour = v),
        op::HOUR_24_GREEDY => greedy_then(|st, v| st.hour = v),
        op::HOUR_24_ONE_DIGIT_ONE_BASED => digits_then(1, |st, v| st.hour = v - 1),
        op::HOUR_24_TWO_DIGITS_ONE_BASED => digits_then(2, |st, v| st.hour = v - 1),
        op::HOUR_24_GREEDY_ONE_BASED => greedy_then(|st, v| st.hour = v - 1),
        op::HOUR_12_ONE_DIGIT => digits_then(1, |st, v| {
            st.hour = v;
            promote_hour_type(st);
        }),
        op::HOUR_12_TWO_DIGITS => digits_then(2, |st, v| {
            st.hour = v;
            promote_hour_type(st);
        }),
        op::HOUR_12_GREEDY => greedy_then(|st, v| {
            st.hour = v;
            promote_hour_type(st);
        }),
        op::HOUR_12_ONE_DIGIT_ONE_BASED => digits_then(1, |st, v| {
            st.hour = util::hour_from_one_based_12(v);
            promote_hour_type(st);
        }),
        op::HOUR_12_TWO_DIGITS_ONE_BASED => digits_then(2, |st, v| {
            st.hour = util::hour_from_one_based_12(v);
            promote_hour_type(st);
        }),
        op::HOUR_12_GREEDY_ONE_BASED => greedy_then(|st, v| {
            st.hour = util::hour_from_one_based_12(v);
            promote_hour_type(st);
        }),
        op::DAY_ONE_DIGIT => digits_then(1, |st, v| st.day = v),
        op::DAY_TWO_DIGITS => digits_then(2, |st, v| st.day = v),
        op::DAY_GREEDY => greedy_then(|st, v| st.day = v),
        op::DAY_NAME_SHORT | op::DAY_NAME_LONG => Box::new(|text, hi, locale, st| {
            st.temp = locale
                .match_weekday(text, st.pos, hi)
                .ok_or_else(|| name_lookup_failed(st.pos))?;
            st.pos += num::decode_len(st.temp);
            Ok(())
        }),
        // The weekday digit is read and discarded.
        op::DAY_OF_WEEK => digits_then(1, |_, _| {}),
        op::MONTH_ONE_DIGIT => digits_then(1, |st, v| st.month = v),
        op::MONTH_TWO_DIGITS => digits_then(2, |st, v| st.month = v),
        op::MONTH_GREEDY => greedy_then(|st, v| st.month = v),
        op::MONTH_SHORT_NAME | op::MONTH_LONG_NAME => Box::new(|text, hi, locale, st| {
            st.temp = locale
                .match_month(text, st.pos, hi)
                .ok_or_else(|| name_lookup_failed(st.pos))?;
            st.month = num::decode_int(st.temp) + 1;
            st.pos += num::decode_len(st.temp);
            Ok(())
        }),
        op::YEAR_ONE_DIGIT => digits_then(1, |st, v| st.year = v),
        op::YEAR_TWO_DIGITS => digits_then(2, |st, v| st.year = util::adjust_year(v)),
        op::YEAR_FOUR_DIGITS => Box::new(|text, hi, _locale, st| {
            // Two-way branch; both arms leave year written and pos advanced.
            if st.pos < hi && text.as_bytes()[st.pos] == b'-' {
                st.year = -util::parse_fixed(text, st.pos + 1, 4, hi)?;
                st.pos += 5;
            } else {
                st.year = util::parse_fixed(text, st.pos, 4, hi)?;
                st.pos += 4;
            }
            Ok(())
        }),
        op::YEAR_GREEDY => Box::new(|text, hi, _locale, st| {
            st.temp = util::parse_year_greedy(text, st.pos, hi)?;
            st.year = num::decode_int(st.temp);
            st.pos += num::decode_len(st.temp);
            Ok(())
        }),
        op::ERA => Box::new(|text, hi, locale, st| {
            st.temp = locale
                .match_era(text, st.pos, hi)
                .ok_or_else(|| name_lookup_failed(st.pos))?;
            st.era = num::decode_int(st.temp);
            st.pos += num::decode_len(st.temp);
            Ok(())
        }),
        op::TIME_ZONE_SHORT
        | op::TIME_ZONE_GMT
        | op::TIME_ZONE_LONG
        | op::TIME_ZONE_RFC_822
        | op::TIME_ZONE_ISO_1
        | op::TIME_ZONE_ISO_2
        | op::TIME_ZONE_ISO_3 => Box::new(|text, hi, locale, st| {
            // Numeric offset first; fall back to a zone-name match. The arms
            // write different slots (offset vs timezone), both of which are
            // always-initialized.
            let packed = util::parse_offset(text, st.pos, hi);
            if packed == OFFSET_SENTINEL {
                st.temp = locale
                    .match_zone(text, st.pos, hi)
                    .ok_or_else(|| name_lookup_failed(st.pos))?;
                st.timezone = num::decode_int(st.temp);
            } else {
                st.temp = packed as u64;
                st.offset = i64::from(num::decode_int(st.temp)) * calendar::MINUTE_MILLIS;
            }
            st.pos += num::decode_len(st.temp);
            Ok(())
        }),
        _ => {
            let delimiter = delimiters[(-code - 1) as usize];
            if delimiter.len() == 1 {
                let byte = delimiter.as_bytes()[0];
                Box::new(move |text, hi, _locale, st| {
                    util::assert_char(byte, text, st.pos, hi)?;
                    st.pos += 1;
                    Ok(())
                })
            } else {
                Box::new(move |text, hi, _locale, st| {
                    st.pos = util::assert_string(delimiter, text, st.pos, hi)?;
                    Ok(())
                })
            }
        }
    }
}

fn emit_format_op<'a>(code: i32, delimiters: &[&'a str]) -> FormatStep<'a> {
    match code {
        op::AM_PM => Box::new(|st, locale, _, sink| util::put_am_pm(sink, st.hour, locale)),
        op::MILLIS_ONE_DIGIT | op::MILLIS_GREEDY => {
            Box::new(|st, _, _, sink| sink.put_int(st.millis))
        }
        op::MILLIS_THREE_DIGITS => Box::new(|st, _, _, sink| util::put_3(sink, st.millis)),
        op::SECOND_ONE_DIGIT | op::SECOND_GREEDY => {
            Box::new(|st, _, _, sink| sink.put_int(st.second))
        }
        op::SECOND_TWO_DIGITS => Box::new(|st, _, _, sink| util::put_2(sink, st.second)),
        op::MINUTE_ONE_DIGIT | op::MINUTE_GREEDY => {
            Box::new(|st, _, _, sink| sink.put_int(st.minute))
        }
        op::MINUTE_TWO_DIGITS => Box::new(|st, _, _, sink| util::put_2(sink, st.minute)),
        op::HOUR_12_ONE_DIGIT | op::HOUR_12_GREEDY => {
            Box::new(|st, _, _, sink| util::put_hour_12(sink, st.hour))
        }
        op::HOUR_12_TWO_DIGITS => Box::new(|st, _, _, sink| util::put_hour_12_padded(sink, st.hour)),
        op::HOUR_12_ONE_DIGIT_ONE_BASED | op::HOUR_12_GREEDY_ONE_BASED => {
            Box::new(|st, _, _, sink| util::put_hour_12_one_based(sink, st.hour))
        }
        op::HOUR_12_TWO_DIGITS_ONE_BASED => {
            Box::new(|st, _, _, sink| util::put_hour_12_one_based_padded(sink, st.hour))
        }
        op::HOUR_24_ONE_DIGIT | op::HOUR_24_GREEDY => {
            Box::new(|st, _, _, sink| sink.put_int(st.hour))
        }
        op::HOUR_24_TWO_DIGITS => Box::new(|st, _, _, sink| util::put_2(sink, st.hour)),
        op::HOUR_24_ONE_DIGIT_ONE_BASED | op::HOUR_24_GREEDY_ONE_BASED => {
            Box::new(|st, _, _, sink| sink.put_int(st.hour + 1))
        }
        op::HOUR_24_TWO_DIGITS_ONE_BASED => Box::new(|st, _, _, sink| util::put_2(sink, st.hour + 1)),
        op::DAY_ONE_DIGIT | op::DAY_GREEDY => Box::new(|st, _, _, sink| sink.put_int(st.day)),
        op::DAY_TWO_DIGITS => Box::new(|st, _, _, sink| util::put_2(sink, st.day)),
        op::DAY_NAME_LONG => {
            Box::new(|st, locale, _, sink| sink.put_str(locale.weekday(st.day_of_week)))
        }
        op::DAY_NAME_SHORT => {
            Box::new(|st, locale, _, sink| sink.put_str(locale.short_weekday(st.day_of_week)))
        }
        op::DAY_OF_WEEK => Box::new(|st, _, _, sink| sink.put_int(st.day_of_week)),
        op::MONTH_ONE_DIGIT | op::MONTH_GREEDY => Box::new(|st, _, _, sink| sink.put_int(st.month)),
        op::MONTH_TWO_DIGITS => Box::new(|st, _, _, sink| util::put_2(sink, st.month)),
        op::MONTH_SHORT_NAME => {
            Box::new(|st, locale, _, sink| sink.put_str(locale.short_month(st.month - 1)))
        }
        op::MONTH_LONG_NAME => {
            Box::new(|st, locale, _, sink| sink.put_str(locale.month(st.month - 1)))
        }
        op::YEAR_ONE_DIGIT | op::YEAR_GREEDY => {
            Box::new(|st, _, _, sink| util::put_year_short(sink, st.year))
        }
        op::YEAR_TWO_DIGITS => Box::new(|st, _, _, sink| util::put_year_2(sink, st.year)),
        op::YEAR_FOUR_DIGITS => Box::new(|st, _, _, sink| util::put_year_4(sink, st.year)),
        op::ERA => Box::new(|st, locale, _, sink| util::put_era(sink, st.year, locale)),
        op::TIME_ZONE_SHORT
        | op::TIME_ZONE_GMT
        | op::TIME_ZONE_LONG
        | op::TIME_ZONE_RFC_822
        | op::TIME_ZONE_ISO_1
        | op::TIME_ZONE_ISO_2
        | op::TIME_ZONE_ISO_3 => Box::new(|_, _, zone_label, sink| sink.put_str(zone_label)),
        _ => {
            let delimiter = delimiters[(-code - 1) as usize];
            if delimiter.len() == 1 {
                let c = delimiter.as_bytes()[0] as char;
                Box::new(move |_, _, _, sink| sink.put_char(c))
            } else {
                Box::new(move |_, _, _, sink| sink.put_str(delimiter))
            }
        }
    }
}
