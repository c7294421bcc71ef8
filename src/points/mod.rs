//! instrumentation-reporter points command implementation.

use crate::error::Result;
use crate::mapping::MappingTable;
use std::io::{self, Write};
use std::path::Path;

/// Reads the mapping file and prints its points in document order.
pub fn run(mapping_path: &Path) -> Result<()> {
    let mapping = MappingTable::read(mapping_path)?;
    list(&mapping, io::stdout().lock())
}

/// Writes one line per point: identifier, file, function, kind and position.
pub fn list(mapping: &MappingTable, mut output: impl Write) -> Result<()> {
    let width = mapping.points().map(|p| p.id.len()).max().unwrap_or(0);
    for p in mapping.points() {
        writeln!(
            output,
            "{:width$}  {}  {}  {}  {}:{}",
            p.id,
            p.file,
            p.function,
            p.kind,
            p.line,
            p.column,
            width = width
        )?;
    }
    output.flush()?;
    Ok(())
}
