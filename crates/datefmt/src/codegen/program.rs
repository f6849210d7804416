//! The specialized executor.
//!
//! A compiled format is four flat step vectors. The parse side runs a
//! default-init prelude (only the slots the analyzer could not prove
//! written), then one closure per op, then the no-tail check and the final
//! reducer. The format side runs the field prelude in dependency order,
//! then one closure per op. No step inspects an opcode at runtime.

use common::sink::CharSink;

use crate::error::{DateParseError, ParseResult};
use crate::format_trait::DateFormat;
use crate::locale::DateLocale;
use crate::util::{self, FormatState, ParseState};

/// One parse op, specialized at compile time.
pub(crate) type ParseStep<'a> =
    Box<dyn Fn(&str, usize, &DateLocale, &mut ParseState) -> ParseResult<()> + Send + Sync + 'a>;

/// One format op, specialized at compile time.
pub(crate) type FormatStep<'a> =
    Box<dyn Fn(&FormatState, &DateLocale, &str, &mut dyn CharSink) + Send + Sync + 'a>;

/// Default-initialization of a single parse slot.
pub(crate) type DefaultStep = fn(&mut ParseState);

/// Materialization of a single calendar field for formatting.
pub(crate) type FieldStep = fn(i64, &mut FormatState);

pub struct CompiledDateFormat<'a> {
    pub(crate) defaults: Vec<DefaultStep>,
    pub(crate) parse_ops: Vec<ParseStep<'a>>,
    pub(crate) prelude: Vec<FieldStep>,
    pub(crate) format_ops: Vec<FormatStep<'a>>,
}

impl DateFormat for CompiledDateFormat<'_> {
    fn parse(&self, text: &str, lo: usize, hi: usize, locale: &DateLocale)
        -> Result<i64, DateParseError>
    {
        let mut state = ParseState::start(lo);
        for default in &self.defaults {
            default(&mut state);
        }
        for step in &self.parse_ops {
            step(text, hi, locale, &mut state)?;
        }
        util::assert_no_tail(state.pos, hi)?;
        util::compute(locale, &state, hi)
    }

    fn format(&self, instant: i64, locale: &DateLocale, zone_label: &str, sink: &mut dyn CharSink) {
        let mut fields = FormatState::default();
        for step in &self.prelude {
            step(instant, &mut fields);
        }
        for step in &self.format_ops {
            step(&fields, locale, zone_label, sink);
        }
    }
}
