//! instrumentation-reporter config module.

/// Exit code of a failed run.
pub const FAILURE: i32 = 1;

/// Supported layouts of the generated JSON.
pub const FORMATS: &[&str] = &["pretty", "compact"];
/// Layout used when none is requested.
pub const DEFAULT_FORMAT: &str = "pretty";

/// Position of an entry in one of the mapping name tables.
pub type Index = usize;

/// Name of the first mapping header line.
pub const HEADER_FILES: &str = "FileNames";
/// Name of the second mapping header line.
pub const HEADER_FUNCTIONS: &str = "FunctionNames";
/// Name of the third mapping header line.
pub const HEADER_TYPES: &str = "Types";

#[cfg(not(test))]
pub type Map<K, V> = std::collections::HashMap<K, V>;

// Use less performant BTree in tests for deterministic sequences
#[cfg(test)]
pub type Map<K, V> = std::collections::BTreeMap<K, V>;
