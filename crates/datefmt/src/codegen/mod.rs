//! Pattern-specialized executors.
//!
//! [`assemble`] turns an op list into a [`CompiledDateFormat`]: two flat
//! vectors of typed closures (one per op) plus a prelude chosen by dataflow
//! analysis. Execution walks the vectors with no opcode dispatch.

pub(crate) mod analyze;
mod emit;
mod program;

pub(crate) use emit::assemble;
pub use program::CompiledDateFormat;
