//! JSON output formatting.

use crate::evaluator::Evaluation;
use std::io::{self, Write};

/// Write the evaluation as a pretty-printed JSON document.
pub fn write_json<W: Write>(out: &mut W, evaluation: &Evaluation) -> io::Result<()> {
    serde_json::to_writer_pretty(&mut *out, evaluation).map_err(io::Error::other)?;
    writeln!(out)
}
