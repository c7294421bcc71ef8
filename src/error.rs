//! instrumentation-reporter error module.

use std::io;
use std::path::PathBuf;

/// Represents errors of the reporter.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("Cannot open file '{1}': {0}")]
    OpenFile(#[source] io::Error, PathBuf),
    #[error("Cannot read line '{1}': {0}")]
    ReadLine(#[source] io::Error, String),
    #[error("Cannot read directory '{1}': {0}")]
    ReadDir(#[source] io::Error, PathBuf),
    #[error("Input/output error: {0}")]
    Io(#[from] io::Error),

    #[error("Mapping file must contain at least 3 header lines, found {0}")]
    MappingTooShort(usize),
    #[error("Mapping header at line {1} should start with '{0}:'")]
    MappingHeader(String, usize),
    #[error("Mapping header '{1}' is not a JSON array of strings: {0}")]
    MappingNames(#[source] serde_json::Error, String),
    #[error("Mapping record '{0}' at line {1} has no ':' separator")]
    MappingRecord(String, usize),
    #[error("Cannot decode mapping record at line {1}: {0}")]
    MappingDecode(#[source] Box<Error>, usize),

    #[error("Encoded value ended before its terminating symbol")]
    VlqTruncated,
    #[error("Invalid symbol '{0}' in encoded value")]
    VlqSymbol(char),
    #[error("Encoded value does not fit into 64 bits")]
    VlqOverflow,
    #[error("{field} index {index} is out of range (0..{len})")]
    IndexOutOfRange {
        field: &'static str,
        index: i64,
        len: usize,
    },
    #[error("{field} must not be negative, got {value}")]
    NegativeValue { field: &'static str, value: i64 },

    #[error("Unknown instrumentation type '{0}'")]
    UnknownKind(String),

    #[error("Cannot parse execution report '{1}': {0}")]
    ReportParse(#[source] serde_json::Error, PathBuf),

    #[error("Cannot serialize profiling result: {0}")]
    Serialize(#[source] serde_json::Error),
}

/// Represents results.
pub type Result<T> = std::result::Result<T, Error>;
