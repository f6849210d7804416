//! Golden-file tests that run both executors on each case file.
//!
//! Case files hold `pattern|input` lines; the matching `.expected` file
//! holds one line per case, either `millis|reformatted` or
//! `error:<kind>:<byte>`. Every case runs through the generic interpreter
//! and the specialized program, and the two must agree with each other and
//! with the expected line.

use std::path::Path;

use bumpalo::Bump;
use datatest_stable::harness;
use datefmt::{locale, DateFormat, DateFormatCompiler};

fn run_case(format: &dyn DateFormat, input: &str) -> String {
    let loc = locale::default_locale();
    match format.parse(input, 0, input.len(), loc) {
        Ok(instant) => {
            let mut out = String::new();
            format.format(instant, loc, "UTC", &mut out);
            format!("{instant}|{out}")
        }
        Err(err) => format!("error:{:?}:{}", err.kind, err.pos),
    }
}

fn run_test(path: &Path) -> datatest_stable::Result<()> {
    let input = std::fs::read_to_string(path)?;
    let expected = std::fs::read_to_string(format!("{}.expected", path.display()))?;
    let expected: Vec<&str> = expected.lines().collect();

    let arena = Bump::new();
    let mut compiler = DateFormatCompiler::new(&arena);

    let mut case = 0;
    for (line_no, line) in input.lines().enumerate() {
        if line.starts_with('#') || line.trim().is_empty() {
            continue;
        }
        let (pattern, text) = line
            .split_once('|')
            .ok_or_else(|| format!("{}:{}: malformed case line", path.display(), line_no + 1))?;
        let want = *expected
            .get(case)
            .ok_or_else(|| format!("{}: missing expected line {}", path.display(), case + 1))?;

        let generic = compiler.compile(pattern, true);
        let specialized = compiler.compile(pattern, false);
        let got_generic = run_case(generic.as_ref(), text);
        let got_specialized = run_case(specialized.as_ref(), text);

        if got_generic != got_specialized {
            return Err(format!(
                "executor mismatch for {pattern:?} on {text:?}:\n  generic:     {got_generic}\n  specialized: {got_specialized}"
            )
            .into());
        }
        if got_specialized != want {
            return Err(format!(
                "mismatch for {pattern:?} on {text:?}:\n  expected: {want}\n  actual:   {got_specialized}"
            )
            .into());
        }
        case += 1;
    }

    if case != expected.len() {
        return Err(format!(
            "{}: {} cases but {} expected lines",
            path.display(),
            case,
            expected.len()
        )
        .into());
    }
    Ok(())
}

harness!(run_test, "tests/patterns", r"\.txt$");
