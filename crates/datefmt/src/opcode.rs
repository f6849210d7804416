//! Field opcodes and the pattern symbol table.
//!
//! A compiled pattern is a sequence of ops. Positive values identify field
//! operations; a negative value `-k` refers to entry `k - 1` of the
//! delimiter table. Greedy variants are never produced by symbol lookup,
//! only by the op-list builder's greedy promotion.

/// Field opcode constants.
pub mod op {
    pub const ERA: i32 = 1;
    pub const YEAR_ONE_DIGIT: i32 = 2;
    pub const YEAR_TWO_DIGITS: i32 = 3;
    pub const YEAR_FOUR_DIGITS: i32 = 4;
    pub const MONTH_ONE_DIGIT: i32 = 5;
    pub const MONTH_TWO_DIGITS: i32 = 6;
    pub const MONTH_SHORT_NAME: i32 = 7;
    pub const MONTH_LONG_NAME: i32 = 8;
    pub const DAY_ONE_DIGIT: i32 = 9;
    pub const DAY_TWO_DIGITS: i32 = 10;
    pub const DAY_NAME_SHORT: i32 = 11;
    pub const DAY_NAME_LONG: i32 = 12;
    pub const DAY_OF_WEEK: i32 = 13;
    pub const AM_PM: i32 = 14;
    pub const HOUR_24_ONE_DIGIT: i32 = 15;
    pub const HOUR_24_TWO_DIGITS: i32 = 16;
    pub const HOUR_24_ONE_DIGIT_ONE_BASED: i32 = 17;
    pub const HOUR_24_TWO_DIGITS_ONE_BASED: i32 = 18;
    pub const HOUR_12_ONE_DIGIT: i32 = 19;
    pub const HOUR_12_TWO_DIGITS: i32 = 20;
    pub const HOUR_12_ONE_DIGIT_ONE_BASED: i32 = 21;
    pub const HOUR_12_TWO_DIGITS_ONE_BASED: i32 = 22;
    pub const MINUTE_ONE_DIGIT: i32 = 23;
    pub const MINUTE_TWO_DIGITS: i32 = 24;
    pub const SECOND_ONE_DIGIT: i32 = 25;
    pub const SECOND_TWO_DIGITS: i32 = 26;
    pub const MILLIS_ONE_DIGIT: i32 = 27;
    pub const MILLIS_THREE_DIGITS: i32 = 28;
    pub const TIME_ZONE_SHORT: i32 = 29;
    pub const TIME_ZONE_GMT: i32 = 30;
    pub const TIME_ZONE_LONG: i32 = 31;
    pub const TIME_ZONE_RFC_822: i32 = 32;
    pub const TIME_ZONE_ISO_1: i32 = 33;
    pub const TIME_ZONE_ISO_2: i32 = 34;
    pub const TIME_ZONE_ISO_3: i32 = 35;

    // Greedy twins, produced by promotion only.
    pub const YEAR_GREEDY: i32 = 101;
    pub const MONTH_GREEDY: i32 = 102;
    pub const DAY_GREEDY: i32 = 103;
    pub const HOUR_24_GREEDY: i32 = 104;
    pub const HOUR_24_GREEDY_ONE_BASED: i32 = 105;
    pub const HOUR_12_GREEDY: i32 = 106;
    pub const HOUR_12_GREEDY_ONE_BASED: i32 = 107;
    pub const MINUTE_GREEDY: i32 = 108;
    pub const SECOND_GREEDY: i32 = 109;
    pub const MILLIS_GREEDY: i32 = 110;
}

/// The canonical symbol set, in registration order. The tokenizer is seeded
/// from the key column.
pub const SYMBOLS: &[(&str, i32)] = &[
    ("G", op::ERA),
    ("y", op::YEAR_ONE_DIGIT),
    ("yy", op::YEAR_TWO_DIGITS),
    ("yyyy", op::YEAR_FOUR_DIGITS),
    ("M", op::MONTH_ONE_DIGIT),
    ("MM", op::MONTH_TWO_DIGITS),
    ("MMM", op::MONTH_SHORT_NAME),
    ("MMMM", op::MONTH_LONG_NAME),
    ("d", op::DAY_ONE_DIGIT),
    ("dd", op::DAY_TWO_DIGITS),
    ("E", op::DAY_NAME_SHORT),
    ("EE", op::DAY_NAME_LONG),
    ("EEE", op::DAY_NAME_SHORT),
    ("EEEE", op::DAY_NAME_LONG),
    ("u", op::DAY_OF_WEEK),
    ("a", op::AM_PM),
    ("H", op::HOUR_24_ONE_DIGIT),
    ("HH", op::HOUR_24_TWO_DIGITS),
    ("k", op::HOUR_24_ONE_DIGIT_ONE_BASED),
    ("kk", op::HOUR_24_TWO_DIGITS_ONE_BASED),
    ("K", op::HOUR_12_ONE_DIGIT),
    ("KK", op::HOUR_12_TWO_DIGITS),
    ("h", op::HOUR_12_ONE_DIGIT_ONE_BASED),
    ("hh", op::HOUR_12_TWO_DIGITS_ONE_BASED),
    ("m", op::MINUTE_ONE_DIGIT),
    ("mm", op::MINUTE_TWO_DIGITS),
    ("s", op::SECOND_ONE_DIGIT),
    ("ss", op::SECOND_TWO_DIGITS),
    ("S", op::MILLIS_ONE_DIGIT),
    ("SSS", op::MILLIS_THREE_DIGITS),
    ("z", op::TIME_ZONE_SHORT),
    ("zz", op::TIME_ZONE_GMT),
    ("zzz", op::TIME_ZONE_LONG),
    ("Z", op::TIME_ZONE_RFC_822),
    ("x", op::TIME_ZONE_ISO_1),
    ("xx", op::TIME_ZONE_ISO_2),
    ("xxx", op::TIME_ZONE_ISO_3),
];

/// Map a one-digit field op to its greedy twin. Ops with no twin (fixed
/// widths, names, era, timezone) are returned unchanged.
pub fn to_greedy(old: i32) -> i32 {
    match old {
        op::YEAR_ONE_DIGIT => op::YEAR_GREEDY,
        op::MONTH_ONE_DIGIT => op::MONTH_GREEDY,
        op::DAY_ONE_DIGIT => op::DAY_GREEDY,
        op::HOUR_24_ONE_DIGIT => op::HOUR_24_GREEDY,
        op::HOUR_24_ONE_DIGIT_ONE_BASED => op::HOUR_24_GREEDY_ONE_BASED,
        op::HOUR_12_ONE_DIGIT => op::HOUR_12_GREEDY,
        op::HOUR_12_ONE_DIGIT_ONE_BASED => op::HOUR_12_GREEDY_ONE_BASED,
        op::MINUTE_ONE_DIGIT => op::MINUTE_GREEDY,
        op::SECOND_ONE_DIGIT => op::SECOND_GREEDY,
        op::MILLIS_ONE_DIGIT => op::MILLIS_GREEDY,
        _ => old,
    }
}

/// Readable opcode name for op-stream dumps.
pub fn name(code: i32) -> &'static str {
    match code {
        op::ERA => "ERA",
        op::YEAR_ONE_DIGIT => "YEAR_ONE_DIGIT",
        op::YEAR_TWO_DIGITS => "YEAR_TWO_DIGITS",
        op::YEAR_FOUR_DIGITS => "YEAR_FOUR_DIGITS",
        op::MONTH_ONE_DIGIT => "MONTH_ONE_DIGIT",
        op::MONTH_TWO_DIGITS => "MONTH_TWO_DIGITS",
        op::MONTH_SHORT_NAME => "MONTH_SHORT_NAME",
        op::MONTH_LONG_NAME => "MONTH_LONG_NAME",
        op::DAY_ONE_DIGIT => "DAY_ONE_DIGIT",
        op::DAY_TWO_DIGITS => "DAY_TWO_DIGITS",
        op::DAY_NAME_SHORT => "DAY_NAME_SHORT",
        op::DAY_NAME_LONG => "DAY_NAME_LONG",
        op::DAY_OF_WEEK => "DAY_OF_WEEK",
        op::AM_PM => "AM_PM",
        op::HOUR_24_ONE_DIGIT => "HOUR_24_ONE_DIGIT",
        op::HOUR_24_TWO_DIGITS => "HOUR_24_TWO_DIGITS",
        op::HOUR_24_ONE_DIGIT_ONE_BASED => "HOUR_24_ONE_DIGIT_ONE_BASED",
        op::HOUR_24_TWO_DIGITS_ONE_BASED => "HOUR_24_TWO_DIGITS_ONE_BASED",
        op::HOUR_12_ONE_DIGIT => "HOUR_12_ONE_DIGIT",
        op::HOUR_12_TWO_DIGITS => "HOUR_12_TWO_DIGITS",
        op::HOUR_12_ONE_DIGIT_ONE_BASED => "HOUR_12_ONE_DIGIT_ONE_BASED",
        op::HOUR_12_TWO_DIGITS_ONE_BASED => "HOUR_12_TWO_DIGITS_ONE_BASED",
        op::MINUTE_ONE_DIGIT => "MINUTE_ONE_DIGIT",
        op::MINUTE_TWO_DIGITS => "MINUTE_TWO_DIGITS",
        op::SECOND_ONE_DIGIT => "SECOND_ONE_DIGIT",
        op::SECOND_TWO_DIGITS => "SECOND_TWO_DIGITS",
        op::MILLIS_ONE_DIGIT => "MILLIS_ONE_DIGIT",
        op::MILLIS_THREE_DIGITS => "MILLIS_THREE_DIGITS",
        op::TIME_ZONE_SHORT => "TIME_ZONE_SHORT",
        op::TIME_ZONE_GMT => "TIME_ZONE_GMT",
        op::TIME_ZONE_LONG => "TIME_ZONE_LONG",
        op::TIME_ZONE_RFC_822 => "TIME_ZONE_RFC_822",
        op::TIME_ZONE_ISO_1 => "TIME_ZONE_ISO_1",
        op::TIME_ZONE_ISO_2 => "TIME_ZONE_ISO_2",
        op::TIME_ZONE_ISO_3 => "TIME_ZONE_ISO_3",
        op::YEAR_GREEDY => "YEAR_GREEDY",
        op::MONTH_GREEDY => "MONTH_GREEDY",
        op::DAY_GREEDY => "DAY_GREEDY",
        op::HOUR_24_GREEDY => "HOUR_24_GREEDY",
        op::HOUR_24_GREEDY_ONE_BASED => "HOUR_24_GREEDY_ONE_BASED",
        op::HOUR_12_GREEDY => "HOUR_12_GREEDY",
        op::HOUR_12_GREEDY_ONE_BASED => "HOUR_12_GREEDY_ONE_BASED",
        op::MINUTE_GREEDY => "MINUTE_GREEDY",
        op::SECOND_GREEDY => "SECOND_GREEDY",
        op::MILLIS_GREEDY => "MILLIS_GREEDY",
        _ => "???",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn greedy_twins_only_for_one_digit_ops() {
        assert_eq!(to_greedy(op::YEAR_ONE_DIGIT), op::YEAR_GREEDY);
        assert_eq!(to_greedy(op::YEAR_TWO_DIGITS), op::YEAR_TWO_DIGITS);
        assert_eq!(to_greedy(op::YEAR_FOUR_DIGITS), op::YEAR_FOUR_DIGITS);
        assert_eq!(to_greedy(op::MONTH_SHORT_NAME), op::MONTH_SHORT_NAME);
        assert_eq!(to_greedy(op::MILLIS_THREE_DIGITS), op::MILLIS_THREE_DIGITS);
        assert_eq!(to_greedy(op::TIME_ZONE_SHORT), op::TIME_ZONE_SHORT);
        assert_eq!(
            to_greedy(op::HOUR_12_ONE_DIGIT_ONE_BASED),
            op::HOUR_12_GREEDY_ONE_BASED
        );
    }

    #[test]
    fn symbol_lookup_is_unambiguous() {
        for (i, (sym, _)) in SYMBOLS.iter().enumerate() {
            for (other, _) in &SYMBOLS[i + 1..] {
                assert_ne!(sym, other, "duplicate symbol {sym}");
            }
        }
    }
}
