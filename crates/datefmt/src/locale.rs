//! Locale name tables and matchers.
//!
//! The locale owns the text of month, weekday, era, AM/PM and time-zone
//! names. Matchers scan a candidate list ordered longest-first so that a
//! long name is never shadowed by a short prefix of itself, and return the
//! matched index packed with the consumed byte length (see [`common::num`]).

use std::sync::OnceLock;

use common::num;

use crate::calendar::HOUR_MILLIS;
use crate::util::{HOUR_AM, HOUR_PM};

const MONTHS: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

const SHORT_MONTHS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

const WEEKDAYS: [&str; 7] = [
    "Sunday",
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
];

const SHORT_WEEKDAYS: [&str; 7] = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];

const ERAS: [&str; 2] = ["BC", "AD"];

const AM_PM: [&str; 2] = ["AM", "PM"];

// Zone labels with fixed offsets. Matching is longest-first, so compound
// labels like CEST win over CET.
const ZONES: [(&str, i64); 16] = [
    ("UTC", 0),
    ("GMT", 0),
    ("Z", 0),
    ("EST", -5 * HOUR_MILLIS),
    ("EDT", -4 * HOUR_MILLIS),
    ("CST", -6 * HOUR_MILLIS),
    ("CDT", -5 * HOUR_MILLIS),
    ("MST", -7 * HOUR_MILLIS),
    ("MDT", -6 * HOUR_MILLIS),
    ("PST", -8 * HOUR_MILLIS),
    ("PDT", -7 * HOUR_MILLIS),
    ("CET", HOUR_MILLIS),
    ("CEST", 2 * HOUR_MILLIS),
    ("BST", HOUR_MILLIS),
    ("JST", 9 * HOUR_MILLIS),
    ("AEST", 10 * HOUR_MILLIS),
];

/// Name tables and matchers for one locale.
pub struct DateLocale {
    months: Vec<(&'static str, i32)>,
    weekdays: Vec<(&'static str, i32)>,
    eras: Vec<(&'static str, i32)>,
    am_pm: Vec<(&'static str, i32)>,
    zones: Vec<(&'static str, i32)>,
}

static EN: OnceLock<DateLocale> = OnceLock::new();

/// The default (English) locale, built once per process.
pub fn default_locale() -> &'static DateLocale {
    EN.get_or_init(DateLocale::en)
}

impl DateLocale {
    fn en() -> Self {
        // Weekday and month matching accept both long and short names.
        let mut months: Vec<(&'static str, i32)> = Vec::new();
        for (i, name) in MONTHS.iter().enumerate() {
            months.push((name, i as i32));
        }
        for (i, name) in SHORT_MONTHS.iter().enumerate() {
            months.push((name, i as i32));
        }
        let mut weekdays: Vec<(&'static str, i32)> = Vec::new();
        for (i, name) in WEEKDAYS.iter().enumerate() {
            weekdays.push((name, i as i32));
        }
        for (i, name) in SHORT_WEEKDAYS.iter().enumerate() {
            weekdays.push((name, i as i32));
        }
        let eras = vec![(ERAS[0], 0), (ERAS[1], 1)];
        let am_pm = vec![(AM_PM[0], HOUR_AM), (AM_PM[1], HOUR_PM)];
        let zones = ZONES
            .iter()
            .enumerate()
            .map(|(i, &(name, _))| (name, i as i32))
            .collect();

        let mut locale = Self { months, weekdays, eras, am_pm, zones };
        locale.months.sort_by_key(|(name, _)| std::cmp::Reverse(name.len()));
        locale.weekdays.sort_by_key(|(name, _)| std::cmp::Reverse(name.len()));
        locale.zones.sort_by_key(|(name, _)| std::cmp::Reverse(name.len()));
        locale
    }

    fn match_in(table: &[(&'static str, i32)], text: &str, pos: usize, hi: usize) -> Option<u64> {
        let bytes = text.as_bytes();
        if pos > hi || hi > bytes.len() {
            return None;
        }
        let window = &bytes[pos..hi];
        for &(name, value) in table {
            if window.starts_with(name.as_bytes()) {
                return Some(num::encode(value, name.len()));
            }
        }
        None
    }

    /// Match a month name (long or short); the packed value is 0-based.
    pub fn match_month(&self, text: &str, pos: usize, hi: usize) -> Option<u64> {
        Self::match_in(&self.months, text, pos, hi)
    }

    /// Match a weekday name (long or short); the packed value is 0-based,
    /// Sunday first.
    pub fn match_weekday(&self, text: &str, pos: usize, hi: usize) -> Option<u64> {
        Self::match_in(&self.weekdays, text, pos, hi)
    }

    /// Match an era name; BC packs 0, AD packs 1.
    pub fn match_era(&self, text: &str, pos: usize, hi: usize) -> Option<u64> {
        Self::match_in(&self.eras, text, pos, hi)
    }

    /// Match AM/PM; the packed value is the hour-type constant.
    pub fn match_am_pm(&self, text: &str, pos: usize, hi: usize) -> Option<u64> {
        Self::match_in(&self.am_pm, text, pos, hi)
    }

    /// Match a zone label; the packed value indexes the zone table.
    pub fn match_zone(&self, text: &str, pos: usize, hi: usize) -> Option<u64> {
        Self::match_in(&self.zones, text, pos, hi)
    }

    /// Long month name for a 0-based month index.
    pub fn month(&self, index: i32) -> &'static str {
        MONTHS[index as usize]
    }

    /// Short month name for a 0-based month index.
    pub fn short_month(&self, index: i32) -> &'static str {
        SHORT_MONTHS[index as usize]
    }

    /// Long weekday name for a Sunday-first day of week in 1..=7.
    pub fn weekday(&self, day_of_week: i32) -> &'static str {
        WEEKDAYS[day_of_week as usize - 1]
    }

    /// Short weekday name for a Sunday-first day of week in 1..=7.
    pub fn short_weekday(&self, day_of_week: i32) -> &'static str {
        SHORT_WEEKDAYS[day_of_week as usize - 1]
    }

    pub fn era(&self, index: i32) -> &'static str {
        ERAS[index as usize]
    }

    pub fn am_pm(&self, hour_type: i32) -> &'static str {
        if hour_type == HOUR_PM {
            AM_PM[1]
        } else {
            AM_PM[0]
        }
    }

    /// Fixed offset of a matched zone, in milliseconds.
    pub fn zone_offset_millis(&self, index: i32) -> i64 {
        ZONES[index as usize].1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn long_names_win_over_short() {
        let locale = default_locale();
        let packed = locale.match_month("March 2017", 0, 10).unwrap();
        assert_eq!(num::decode_int(packed), 2);
        assert_eq!(num::decode_len(packed), 5);

        let packed = locale.match_month("Mar 2017", 0, 8).unwrap();
        assert_eq!(num::decode_int(packed), 2);
        assert_eq!(num::decode_len(packed), 3);
    }

    #[test]
    fn weekday_matching_accepts_both_widths() {
        let locale = default_locale();
        let packed = locale.match_weekday("Mon, 27", 0, 7).unwrap();
        assert_eq!(num::decode_int(packed), 1);
        assert_eq!(num::decode_len(packed), 3);

        let packed = locale.match_weekday("Monday!", 0, 7).unwrap();
        assert_eq!(num::decode_len(packed), 6);
        assert!(locale.match_weekday(", 27", 0, 4).is_none());
    }

    #[test]
    fn zones_longest_first() {
        let locale = default_locale();
        let packed = locale.match_zone("CEST", 0, 4).unwrap();
        assert_eq!(locale.zone_offset_millis(num::decode_int(packed)), 2 * HOUR_MILLIS);
        assert_eq!(num::decode_len(packed), 4);

        let packed = locale.match_zone("CET", 0, 3).unwrap();
        assert_eq!(locale.zone_offset_millis(num::decode_int(packed)), HOUR_MILLIS);
    }

    #[test]
    fn am_pm_packs_hour_type() {
        let locale = default_locale();
        let packed = locale.match_am_pm("PM", 0, 2).unwrap();
        assert_eq!(num::decode_int(packed), HOUR_PM);
        let packed = locale.match_am_pm("AM", 0, 2).unwrap();
        assert_eq!(num::decode_int(packed), HOUR_AM);
        assert!(locale.match_am_pm("XM", 0, 2).is_none());
    }
}
