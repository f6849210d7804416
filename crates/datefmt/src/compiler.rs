//! The format compiler.
//!
//! Compilation tokenizes the pattern, builds the op list and the delimiter
//! table, applies greedy promotion, and then either wraps the op list in the
//! generic interpreter or hands it to the closure emitter.
//!
//! Specialization removes the interpreter's per-op dispatch and skips
//! defaulting code for every slot the pattern provably writes. A year slot
//! has to default to 1970 when the pattern has no year op, and not at all
//! when it has one.

use bumpalo::Bump;
use common::debug::{create_logger, Logger};
use common::intern::StringInterner;
use common::{log, log_detail};

use crate::codegen;
use crate::format_trait::DateFormat;
use crate::generic::GenericDateFormat;
use crate::lexer::{Lexer, Token};
use crate::opcode::{self, op};

/// Reusable pattern compiler.
///
/// The compiler owns scratch containers that are cleared per compilation,
/// so a single instance must not be shared across threads. The formats it
/// returns are independent of the scratchpad and freely shareable.
pub struct DateFormatCompiler<'a> {
    #[allow(dead_code)]
    arena: &'a Bump,
    strings: StringInterner<'a>,
    ops: Vec<i32>,
    delimiters: Vec<&'a str>,
    log: Logger,
}

impl<'a> DateFormatCompiler<'a> {
    pub fn new(arena: &'a Bump) -> Self {
        Self {
            arena,
            strings: StringInterner::new(arena),
            ops: Vec::new(),
            delimiters: Vec::new(),
            log: create_logger("compiler"),
        }
    }

    /// Compile the whole pattern. `generic` selects the interpreter over
    /// the specialized executor.
    pub fn compile(&mut self, pattern: &str, generic: bool) -> Box<dyn DateFormat + 'a> {
        self.compile_range(pattern, 0, pattern.len(), generic)
    }

    /// Compile `pattern[lo..hi]`.
    pub fn compile_range(
        &mut self,
        pattern: &str,
        lo: usize,
        hi: usize,
        generic: bool,
    ) -> Box<dyn DateFormat + 'a> {
        // A generic format owns its containers outright so the cached
        // scratch vectors stay untouched.
        let (mut ops, mut delimiters) = if generic {
            (Vec::new(), Vec::new())
        } else {
            let mut ops = std::mem::take(&mut self.ops);
            let mut delimiters = std::mem::take(&mut self.delimiters);
            ops.clear();
            delimiters.clear();
            (ops, delimiters)
        };

        let mut lexer = Lexer::new(pattern, lo, hi);
        while let Some(token) = lexer.next_token() {
            match token {
                Token::Symbol(code) => {
                    // AM/PM closes off the preceding field the same way a
                    // delimiter does.
                    if code == op::AM_PM {
                        make_last_op_greedy(&mut ops);
                    }
                    ops.push(code);
                }
                Token::Literal(text) => {
                    make_last_op_greedy(&mut ops);
                    delimiters.push(self.strings.intern(text));
                    ops.push(-(delimiters.len() as i32));
                }
            }
        }
        make_last_op_greedy(&mut ops);

        log!(
            self.log,
            "compiled {:?}: {} ops, {} delimiters, generic={}",
            &pattern[lo..hi],
            ops.len(),
            delimiters.len(),
            generic
        );
        if self.log.enabled() {
            for &code in &ops {
                log_detail!(self.log, "  {}", opcode::name(code));
            }
        }

        if generic {
            Box::new(GenericDateFormat::new(ops, delimiters))
        } else {
            let format = codegen::assemble(&ops, &delimiters);
            self.ops = ops;
            self.delimiters = delimiters;
            Box::new(format)
        }
    }
}

/// Greedy promotion: the last field op before a boundary becomes
/// variable-width, so `y-M-d` reads 1..n digits per field.
fn make_last_op_greedy(ops: &mut [i32]) {
    if let Some(last) = ops.last_mut() {
        if *last > 0 {
            *last = opcode::to_greedy(*last);
        }
    }
}

#[cfg(test)]
impl DateFormatCompiler<'_> {
    /// Scratch state left behind by the last non-generic compilation.
    fn last_ops(&self) -> (&[i32], &[&str]) {
        (&self.ops, &self.delimiters)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codegen::analyze::{self, SLOT_MONTH, SLOT_TEMP, SLOT_YEAR};

    fn build_ops(pattern: &str) -> (Vec<i32>, Vec<String>) {
        let arena = Bump::new();
        let mut compiler = DateFormatCompiler::new(&arena);
        compiler.compile(pattern, false);
        let (ops, delimiters) = compiler.last_ops();
        (
            ops.to_vec(),
            delimiters.iter().map(|d| d.to_string()).collect(),
        )
    }

    #[test]
    fn delimiters_promote_preceding_field() {
        let (ops, delimiters) = build_ops("d/M/y");
        assert_eq!(
            ops,
            vec![op::DAY_GREEDY, -1, op::MONTH_GREEDY, -2, op::YEAR_GREEDY]
        );
        assert_eq!(delimiters, vec!["/", "/"]);
    }

    #[test]
    fn fixed_width_ops_never_promote() {
        let (ops, _) = build_ops("yyyyMMdd");
        assert_eq!(
            ops,
            vec![op::YEAR_FOUR_DIGITS, op::MONTH_TWO_DIGITS, op::DAY_TWO_DIGITS]
        );
    }

    #[test]
    fn am_pm_acts_as_boundary() {
        let (ops, _) = build_ops("h:mma");
        assert_eq!(
            ops,
            vec![
                op::HOUR_12_GREEDY_ONE_BASED,
                -1,
                op::MINUTE_TWO_DIGITS,
                op::AM_PM
            ]
        );
    }

    #[test]
    fn delimiter_indexes_are_dense_and_one_based() {
        let (ops, delimiters) = build_ops("EEE, d MMM yyyy");
        let negatives: Vec<i32> = ops.iter().copied().filter(|&c| c < 0).collect();
        assert_eq!(negatives, vec![-1, -2, -3]);
        assert_eq!(delimiters, vec![", ", " ", " "]);
    }

    #[test]
    fn no_delimiter_no_greedy_except_tail() {
        // Only the trailing op is a promotion candidate without delimiters.
        let (ops, _) = build_ops("Hms");
        assert_eq!(
            ops,
            vec![
                op::HOUR_24_ONE_DIGIT,
                op::MINUTE_ONE_DIGIT,
                op::SECOND_GREEDY
            ]
        );
    }

    #[test]
    fn slot_set_covers_only_written_slots() {
        let (ops, _) = build_ops("yyyy-MMM");
        let slots = analyze::parse_slots(&ops);
        assert_eq!(slots, SLOT_YEAR | SLOT_MONTH | SLOT_TEMP);
    }

    #[test]
    fn compiler_is_reusable() {
        let arena = Bump::new();
        let mut compiler = DateFormatCompiler::new(&arena);
        let locale = crate::locale::default_locale();

        let first = compiler.compile("yyyy", false);
        let second = compiler.compile("MM", false);
        assert_eq!(first.parse("2017", 0, 4, locale).unwrap(), 1_483_228_800_000);
        assert_eq!(second.parse("02", 0, 2, locale).unwrap(), 2_678_400_000);
    }
}
