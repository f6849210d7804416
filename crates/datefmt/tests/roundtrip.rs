//! End-to-end behavior: the six canonical scenarios, boundary cases,
//! generic/specialized equivalence over a pattern matrix, and cross-thread
//! sharing of a compiled format.

use bumpalo::Bump;
use datefmt::locale::default_locale;
use datefmt::{DateFormat, DateFormatCompiler, ParseErrorKind};

fn parse(format: &dyn DateFormat, text: &str) -> i64 {
    format
        .parse(text, 0, text.len(), default_locale())
        .unwrap_or_else(|err| panic!("parse of {text:?} failed: {err}"))
}

fn render(format: &dyn DateFormat, instant: i64) -> String {
    let mut out = String::new();
    format.format(instant, default_locale(), "UTC", &mut out);
    out
}

#[test]
fn iso_timestamp_with_zone() {
    let arena = Bump::new();
    let mut compiler = DateFormatCompiler::new(&arena);
    let format = compiler.compile("yyyy-MM-ddTHH:mm:ss.SSSz", false);

    let instant = parse(format.as_ref(), "2017-03-27T15:04:05.123UTC");
    assert_eq!(instant, 1_490_627_045_123);
    assert_eq!(render(format.as_ref(), instant), "2017-03-27T15:04:05.123UTC");
}

#[test]
fn two_digit_year_window() {
    let arena = Bump::new();
    let mut compiler = DateFormatCompiler::new(&arena);
    let format = compiler.compile("d/M/y", false);

    // 2021-04-07, via the pivot adjustment on the greedy two-digit read.
    let instant = parse(format.as_ref(), "7/4/21");
    assert_eq!(instant, 1_617_753_600_000);
    assert_eq!(render(format.as_ref(), instant), "7/4/21");
}

#[test]
fn rfc_822_offset() {
    let arena = Bump::new();
    let mut compiler = DateFormatCompiler::new(&arena);
    let format = compiler.compile("EEE, d MMM yyyy HH:mm:ss Z", false);

    let instant = parse(format.as_ref(), "Mon, 27 Mar 2017 15:04:05 +0100");
    // One hour behind the wall-clock reading.
    assert_eq!(instant, 1_490_623_445_000);
}

#[test]
fn twelve_am_is_midnight() {
    let arena = Bump::new();
    let mut compiler = DateFormatCompiler::new(&arena);
    let format = compiler.compile("h:mma", false);

    assert_eq!(parse(format.as_ref(), "12:00AM"), 0);
    assert_eq!(render(format.as_ref(), 0), "12:00AM");
    // Noon.
    assert_eq!(parse(format.as_ref(), "12:00PM"), 43_200_000);
}

#[test]
fn fixed_width_run_is_not_promoted() {
    let arena = Bump::new();
    let mut compiler = DateFormatCompiler::new(&arena);
    let format = compiler.compile("yyyyMMdd", false);

    let instant = parse(format.as_ref(), "20170327");
    assert_eq!(instant, 1_490_572_800_000);
    assert_eq!(render(format.as_ref(), instant), "20170327");
}

#[test]
fn one_based_24_hour() {
    let arena = Bump::new();
    let mut compiler = DateFormatCompiler::new(&arena);
    let format = compiler.compile("kk", false);

    let instant = parse(format.as_ref(), "24");
    assert_eq!(instant, 23 * 3_600_000);
    assert_eq!(render(format.as_ref(), instant), "24");
}

#[test]
fn empty_pattern() {
    let arena = Bump::new();
    let mut compiler = DateFormatCompiler::new(&arena);
    let format = compiler.compile("", false);

    assert_eq!(parse(format.as_ref(), ""), 0);
    assert_eq!(render(format.as_ref(), 1_490_627_045_123), "");
}

#[test]
fn negative_four_digit_year() {
    let arena = Bump::new();
    let mut compiler = DateFormatCompiler::new(&arena);
    let format = compiler.compile("yyyy", false);

    let instant = parse(format.as_ref(), "-0001");
    assert_eq!(instant, -62_198_755_200_000);
    assert_eq!(render(format.as_ref(), instant), "-0001");
}

#[test]
fn greedy_field_at_end_of_input() {
    let arena = Bump::new();
    let mut compiler = DateFormatCompiler::new(&arena);
    let format = compiler.compile("yyyy-M", false);

    // Reads until hi.
    assert_eq!(parse(format.as_ref(), "2017-3"), 1_488_326_400_000);

    // An empty read is a digit failure, positioned at the end.
    let err = format
        .parse("2017-", 0, 5, default_locale())
        .unwrap_err();
    assert_eq!(err.kind, ParseErrorKind::BadDigit);
    assert_eq!(err.pos, 5);
}

#[test]
fn twelve_hour_without_am_pm_keeps_wall_clock() {
    let arena = Bump::new();
    let mut compiler = DateFormatCompiler::new(&arena);
    let format = compiler.compile("K:mm", false);

    assert_eq!(parse(format.as_ref(), "3:15"), 3 * 3_600_000 + 15 * 60_000);
}

#[test]
fn sub_range_compilation_and_parse() {
    let arena = Bump::new();
    let mut compiler = DateFormatCompiler::new(&arena);
    // Only the `HH:mm` inside the noise is compiled.
    let format = compiler.compile_range("..HH:mm..", 2, 7, false);

    let text = "xx23:59yy";
    let instant = format.parse(text, 2, 7, default_locale()).unwrap();
    assert_eq!(instant, 23 * 3_600_000 + 59 * 60_000);
}

#[test]
fn generic_and_specialized_agree() {
    let patterns = [
        "yyyy-MM-dd HH:mm:ss.SSS",
        "d/M/yyyy H:m:s.S",
        "yyyyMMddHHmmssSSS",
        "EEEE, d MMMM yyyy HH:mm:ss.SSS",
        "G yyyy-MM-dd HH:mm:ss.SSS",
        "u E KK:mm a",
        "hh:mm a zz",
    ];
    let instants = [
        0,
        123,
        82_800_000,
        1_490_627_045_123,
        99_999_999_999,
        253_402_300_799_999,
    ];

    let arena = Bump::new();
    let mut compiler = DateFormatCompiler::new(&arena);
    for pattern in patterns {
        let generic = compiler.compile(pattern, true);
        let specialized = compiler.compile(pattern, false);
        for instant in instants {
            let text = render(generic.as_ref(), instant);
            assert_eq!(
                render(specialized.as_ref(), instant),
                text,
                "format mismatch for {pattern:?}"
            );
            let reparsed_generic = parse(generic.as_ref(), &text);
            let reparsed_specialized = parse(specialized.as_ref(), &text);
            assert_eq!(
                reparsed_generic, reparsed_specialized,
                "parse mismatch for {pattern:?} on {text:?}"
            );
        }
    }
}

#[test]
fn full_coverage_patterns_roundtrip() {
    // Patterns carrying year through millis reproduce the instant exactly.
    let patterns = [
        "yyyy-MM-dd HH:mm:ss.SSS",
        "d/M/yyyy H:m:s.S",
        "yyyyMMddHHmmssSSS",
        "EEEE, d MMMM yyyy HH:mm:ss.SSS",
        "G yyyy-MM-dd HH:mm:ss.SSS",
    ];
    let instants = [0, 123, 82_800_000, 1_490_627_045_123, 99_999_999_999];

    let arena = Bump::new();
    let mut compiler = DateFormatCompiler::new(&arena);
    for pattern in patterns {
        let format = compiler.compile(pattern, false);
        for instant in instants {
            let text = render(format.as_ref(), instant);
            assert_eq!(
                parse(format.as_ref(), &text),
                instant,
                "roundtrip failed for {pattern:?} via {text:?}"
            );
        }
    }
}

#[test]
fn compiled_formats_are_shareable_across_threads() {
    let arena = Bump::new();
    let mut compiler = DateFormatCompiler::new(&arena);
    let format = compiler.compile("yyyy-MM-dd HH:mm:ss.SSS", false);
    let format = format.as_ref();

    std::thread::scope(|scope| {
        for worker in 0..4 {
            scope.spawn(move || {
                for i in 0..100 {
                    let instant = i64::from(worker) * 86_400_000 + i * 61_003;
                    let text = render(format, instant);
                    assert_eq!(parse(format, &text), instant);
                }
            });
        }
    });
}
