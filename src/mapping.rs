//! instrumentation-reporter mapping module.
//!
//! The mapping document is produced by the compiler's instrumentation pass:
//!
//! ```text
//! FileNames:["a.js","b.js"]
//! FunctionNames:["foo","bar"]
//! Types:["FUNCTION","BRANCH"]
//! <point id>:<file><function><type><line><column>
//! ...
//! ```
//!
//! Every record field is a Base64 VLQ integer; the first three are indices
//! into the header tables.

use crate::config::{Index, Map, HEADER_FILES, HEADER_FUNCTIONS, HEADER_TYPES};
use crate::error::{Error, Result};
use crate::kind::InstrumentationKind;
use crate::{filebuf, vlq};
use lazy_static::lazy_static;
use regex::Regex;
use std::io::BufRead;
use std::path::Path;
use std::str::FromStr;

/// Decoded record of one instrumentation point.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Point {
    file: Index,
    function: Index,
    kind: Index,
    line: u64,
    column: u64,
}

/// Attributes of an instrumentation point resolved against the header tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PointInfo<'a> {
    /// Point identifier.
    pub id: &'a str,
    /// Source file name.
    pub file: &'a str,
    /// Enclosing function name.
    pub function: &'a str,
    /// Kind of the point.
    pub kind: InstrumentationKind,
    /// Source line.
    pub line: u64,
    /// Source column.
    pub column: u64,
}

/// Represents the instrumentation mapping; immutable once parsed.
#[derive(Debug, Default, PartialEq)]
pub struct MappingTable {
    files: Vec<String>,
    functions: Vec<String>,
    kinds: Vec<InstrumentationKind>,
    order: Vec<String>,
    points: Map<String, Point>,
}

impl MappingTable {
    /// Reads and parses the mapping file.
    pub fn read(filepath: &Path) -> Result<Self> {
        tracing::info!("Reading mapping file {}...", filepath.display());
        let table = Self::parse(filebuf::open(filepath)?)?;
        tracing::info!(
            "Mapping: {} files, {} functions, {} points",
            table.files.len(),
            table.functions.len(),
            table.len()
        );
        Ok(table)
    }

    /// Parses the mapping document line by line.
    pub fn parse(mut reader: impl BufRead) -> Result<Self> {
        let mut line = String::with_capacity(512);
        let mut lc = 0_usize;

        let files = read_header(&mut reader, &mut line, &mut lc, HEADER_FILES)?;
        let functions = read_header(&mut reader, &mut line, &mut lc, HEADER_FUNCTIONS)?;
        let kinds = read_header(&mut reader, &mut line, &mut lc, HEADER_TYPES)?
            .iter()
            .map(|s| s.parse::<InstrumentationKind>())
            .collect::<Result<Vec<_>>>()?;

        let mut table = MappingTable {
            files,
            functions,
            kinds,
            ..Default::default()
        };

        while filebuf::read_line(&mut reader, &mut line)? != 0 {
            lc += 1;
            let record = line.trim_end_matches(['\n', '\r']);
            if record.trim().is_empty() {
                continue;
            }

            let (id, encoded) = record
                .split_once(':')
                .ok_or_else(|| Error::MappingRecord(record.into(), lc))?;
            let point = table
                .decode_point(encoded)
                .map_err(|e| Error::MappingDecode(Box::new(e), lc))?;

            if table.points.contains_key(id) {
                tracing::debug!("Duplicate point '{}' at line {} ignored", id, lc);
                continue;
            }
            tracing::debug!("Point '{}' at line {}: {:?}", id, lc, point);
            table.order.push(id.into());
            table.points.insert(id.into(), point);
        }

        Ok(table)
    }

    /// Decodes the five fields of a record and validates them against the header tables.
    fn decode_point(&self, encoded: &str) -> Result<Point> {
        let mut chars = encoded.chars();
        let file = to_index(vlq::decode(&mut chars)?, self.files.len(), "File")?;
        let function = to_index(vlq::decode(&mut chars)?, self.functions.len(), "Function")?;
        let kind = to_index(vlq::decode(&mut chars)?, self.kinds.len(), "Type")?;
        let line = to_position(vlq::decode(&mut chars)?, "Line")?;
        let column = to_position(vlq::decode(&mut chars)?, "Column")?;
        Ok(Point {
            file,
            function,
            kind,
            line,
            column,
        })
    }

    /// Returns file names in mapping order.
    pub fn files(&self) -> &[String] {
        &self.files
    }

    /// Returns function names in mapping order.
    pub fn functions(&self) -> &[String] {
        &self.functions
    }

    /// Returns instrumentation kinds in mapping order.
    pub fn kinds(&self) -> &[InstrumentationKind] {
        &self.kinds
    }

    /// Returns number of distinct points.
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Checks if the mapping has no points.
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Resolves a point identifier into its attributes.
    pub fn resolve(&self, id: &str) -> Option<PointInfo<'_>> {
        let (id, point) = self.points.get_key_value(id)?;
        Some(self.info(id, point))
    }

    /// Iterates over all points in document order.
    pub fn points(&self) -> impl Iterator<Item = PointInfo<'_>> {
        self.order.iter().map(move |id| self.info(id, &self.points[id]))
    }

    /// Returns all points matching the predicate, in document order.
    pub fn select_points(&self, predicate: impl Fn(&PointInfo) -> bool) -> Vec<PointInfo<'_>> {
        self.points().filter(|info| predicate(info)).collect()
    }

    /// Returns identifiers of all points matching the predicate, in document order.
    pub fn select(&self, predicate: impl Fn(&PointInfo) -> bool) -> Vec<&str> {
        self.select_points(predicate)
            .into_iter()
            .map(|info| info.id)
            .collect()
    }

    fn info<'a>(&'a self, id: &'a str, point: &Point) -> PointInfo<'a> {
        PointInfo {
            id,
            file: &self.files[point.file],
            function: &self.functions[point.function],
            kind: self.kinds[point.kind],
            line: point.line,
            column: point.column,
        }
    }
}

impl FromStr for MappingTable {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s.as_bytes())
    }
}

/// Reads next header line and returns its JSON array of names.
fn read_header(
    reader: &mut impl BufRead,
    line: &mut String,
    lc: &mut usize,
    name: &str,
) -> Result<Vec<String>> {
    lazy_static! {
        static ref HEADER: Regex = Regex::new(r"^(\w+):(.*)$").expect("Invalid regex");
    }

    if filebuf::read_line(reader, line)? == 0 {
        return Err(Error::MappingTooShort(*lc));
    }
    *lc += 1;

    let header = line.trim();
    let payload = match HEADER.captures(header) {
        Some(caps) if &caps[1] == name => caps.get(2).map_or("", |m| m.as_str()),
        _ => return Err(Error::MappingHeader(name.into(), *lc)),
    };
    serde_json::from_str(payload).map_err(|e| Error::MappingNames(e, payload.into()))
}

fn to_index(value: i64, len: usize, field: &'static str) -> Result<Index> {
    match usize::try_from(value) {
        Ok(index) if index < len => Ok(index),
        _ => Err(Error::IndexOutOfRange {
            field,
            index: value,
            len,
        }),
    }
}

fn to_position(value: i64, field: &'static str) -> Result<u64> {
    u64::try_from(value).map_err(|_| Error::NegativeValue { field, value })
}
