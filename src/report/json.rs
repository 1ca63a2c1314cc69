//! Machine-readable report output
//!
//! Dumps the analysis payload back out as pretty-printed JSON, matching the
//! shape the service sent. Useful for piping a result into other tooling
//! without hitting the stored-result endpoint again.

use crate::analysis::AnalysisResult;
use std::io::{self, Write};

pub fn write<W: Write>(writer: &mut W, result: &AnalysisResult) -> io::Result<()> {
    serde_json::to_writer_pretty(&mut *writer, result)?;
    writeln!(writer)
}
