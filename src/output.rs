//! instrumentation-reporter output module.

use crate::aggregate::FileProfile;
use crate::error::{Error, Result};
use std::io::Write;

/// Writes the profiling result as a JSON array.
pub fn write_json(result: &[FileProfile], pretty: bool, mut output: impl Write) -> Result<()> {
    if pretty {
        serde_json::to_writer_pretty(&mut output, result).map_err(Error::Serialize)?;
    } else {
        serde_json::to_writer(&mut output, result).map_err(Error::Serialize)?;
    }
    writeln!(output)?;
    output.flush()?;
    Ok(())
}
