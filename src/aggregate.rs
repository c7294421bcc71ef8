//! instrumentation-reporter aggregation module.
//!
//! Folds execution reports into per-point statistics: how often a point was
//! present among the reports and its mean frequency (absence counts as 0).
//! Counters are exact integers; rounding happens once, on output.

use crate::config::Map;
use crate::kind::InstrumentationKind;
use crate::mapping::MappingTable;
use crate::report::{Measurement, Report};
use serde::Serialize;
use std::collections::BTreeMap;

/// Exact running counters of one point over a sequence of reports.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Tally {
    reports: u64,
    hits: u64,
    frequency_sum: u128,
}

impl Tally {
    /// Adds next report: the point's measurement if the report contains it.
    pub fn push(&mut self, measurement: Option<&Measurement>) {
        self.reports += 1;
        if let Some(measurement) = measurement {
            self.hits += 1;
            self.frequency_sum += u128::from(measurement.frequency);
        }
    }

    /// Returns number of reports seen.
    pub fn reports(&self) -> u64 {
        self.reports
    }

    /// Returns percent of reports containing the point, rounded half up to 2 decimal places.
    pub fn executed_percent(&self) -> f64 {
        let hundredths = round_div(u128::from(self.hits) * 10000, u128::from(self.reports));
        hundredths as f64 / 100.0
    }

    /// Returns mean frequency over all reports, rounded half up.
    pub fn average_frequency(&self) -> u64 {
        let mean = round_div(self.frequency_sum, u128::from(self.reports));
        u64::try_from(mean).unwrap_or(u64::MAX)
    }
}

/// Divides rounding half up; 0 for an empty divisor.
fn round_div(numerator: u128, denominator: u128) -> u128 {
    if denominator == 0 {
        return 0;
    }
    let (quotient, remainder) = (numerator / denominator, numerator % denominator);
    if remainder >= denominator - remainder {
        quotient + 1
    } else {
        quotient
    }
}

/// Aggregated statistics of one instrumentation point.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfilingResult {
    /// Point identifier.
    pub param: String,
    /// Kind of the point.
    #[serde(rename = "type")]
    pub kind: InstrumentationKind,
    /// Source line.
    pub line_no: u64,
    /// Source column.
    pub col_no: u64,
    /// Percent of reports containing the point, 2 decimal places.
    pub executed: f64,
    /// Mean measurement across all reports.
    pub data: Measurement,
}

/// Profiling results of one source file grouped by function name.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FileProfile {
    /// Source file name.
    pub file_name: String,
    /// Function name to results of its points.
    pub profiling_data_per_function: BTreeMap<String, Vec<ProfilingResult>>,
}

/// Streaming aggregator over the points of a mapping.
#[derive(Debug)]
pub struct Aggregator<'a> {
    mapping: &'a MappingTable,
    tallies: Map<&'a str, Tally>,
}

impl<'a> Aggregator<'a> {
    /// Creates an aggregator with no reports seen.
    pub fn new(mapping: &'a MappingTable) -> Self {
        let tallies = mapping
            .points()
            .map(|info| (info.id, Tally::default()))
            .collect();
        Aggregator { mapping, tallies }
    }

    /// Folds one report in. Points unknown to the mapping are ignored.
    pub fn push(&mut self, report: &Report) {
        for (id, tally) in self.tallies.iter_mut() {
            tally.push(report.get(*id));
        }
    }

    /// Builds the result tree: one entry per file of the mapping, in mapping order.
    pub fn finish(self) -> Vec<FileProfile> {
        let mut result = Vec::with_capacity(self.mapping.files().len());

        for file_name in self.mapping.files() {
            let points = self
                .mapping
                .select_points(|info| info.file == file_name.as_str());
            let mut per_function: BTreeMap<String, Vec<ProfilingResult>> = BTreeMap::new();

            for info in points {
                let tally = &self.tallies[info.id];
                per_function
                    .entry(info.function.to_string())
                    .or_default()
                    .push(ProfilingResult {
                        param: info.id.to_string(),
                        kind: info.kind,
                        line_no: info.line,
                        col_no: info.column,
                        executed: tally.executed_percent(),
                        data: Measurement {
                            frequency: tally.average_frequency(),
                        },
                    });
            }

            tracing::debug!(
                "File {}: {} functions with points",
                file_name,
                per_function.len()
            );
            result.push(FileProfile {
                file_name: file_name.clone(),
                profiling_data_per_function: per_function,
            });
        }

        result
    }
}

/// Aggregates all reports against the mapping.
pub fn aggregate(mapping: &MappingTable, reports: &[Report]) -> Vec<FileProfile> {
    let mut aggregator = Aggregator::new(mapping);
    for report in reports {
        aggregator.push(report);
    }
    aggregator.finish()
}
