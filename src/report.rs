//! instrumentation-reporter execution report module.

use crate::config::Map;
use crate::error::{Error, Result};
use crate::filebuf;
use serde::de::{self, Deserializer, MapAccess};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::io::Read;
use std::path::Path;

/// Data collected for one instrumentation point.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Measurement {
    /// How many times the point fired.
    #[serde(default)]
    pub frequency: u64,
}

/// Represents one deployment's report: point identifier to its measurement.
pub type Report = Map<String, Measurement>;

/// Parses a single report document.
/// A point identifier repeated within the document makes it malformed.
pub fn parse(reader: impl Read, origin: &Path) -> Result<Report> {
    let mut de = serde_json::Deserializer::from_reader(reader);
    (&mut de)
        .deserialize_map(ReportVisitor)
        .and_then(|report| de.end().map(|_| report))
        .map_err(|e| Error::ReportParse(e, origin.into()))
}

struct ReportVisitor;

impl<'de> de::Visitor<'de> for ReportVisitor {
    type Value = Report;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "a map of point identifiers to measurements")
    }

    fn visit_map<A>(self, mut access: A) -> std::result::Result<Self::Value, A::Error>
    where
        A: MapAccess<'de>,
    {
        let mut report = Report::new();
        while let Some((id, measurement)) = access.next_entry::<String, Measurement>()? {
            if report.contains_key(&id) {
                return Err(de::Error::custom(format!("duplicate point '{}'", id)));
            }
            report.insert(id, measurement);
        }
        Ok(report)
    }
}

/// Reads every report file in the directory, ordered by file path.
/// Fails on the first malformed report.
pub fn read_dir(dirpath: &Path) -> Result<Vec<Report>> {
    tracing::info!("Reading reports from {}...", dirpath.display());

    let files = filebuf::list_files(dirpath)?;
    let mut reports = Vec::with_capacity(files.len());
    for filepath in &files {
        let report = parse(filebuf::open(filepath)?, filepath)?;
        tracing::debug!("Report {}: {} points", filepath.display(), report.len());
        reports.push(report);
    }

    tracing::info!("Loaded {} reports", reports.len());
    Ok(reports)
}
