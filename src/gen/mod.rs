//! instrumentation-reporter generate command implementation.

use std::io::{self, Write};
use std::path::Path;

use crate::aggregate;
use crate::error::Result;
use crate::mapping::MappingTable;
use crate::{filebuf, output, report};

#[cfg(test)]
mod tests;

/// Runs the aggregation of execution reports into a profiling summary.
pub fn run(
    mapping_path: &Path,
    reports_path: &Path,
    format: &str,
    output_path: Option<&Path>,
) -> Result<()> {
    let mapping = MappingTable::read(mapping_path)?;
    let reports = report::read_dir(reports_path)?;

    tracing::info!(
        "Aggregating {} reports over {} points...",
        reports.len(),
        mapping.len()
    );
    let result = aggregate::aggregate(&mapping, &reports);

    // Render fully before touching the destination
    let mut buffer = Vec::<u8>::new();
    output::write_json(&result, format != "compact", &mut buffer)?;

    match output_path {
        None => write_all(io::stdout(), &buffer),
        Some(output_path) => write_all(filebuf::open_w(output_path)?, &buffer),
    }
}

fn write_all(mut output: impl Write, buffer: &[u8]) -> Result<()> {
    output.write_all(buffer)?;
    output.flush()?;
    Ok(())
}
