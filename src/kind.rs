//! instrumentation-reporter instrumentation kind module.

use crate::error::{Error, Result};
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

/// Represents the kind of an instrumentation point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum InstrumentationKind {
    /// Entry of a function.
    Function,
    /// Taken branch of a conditional.
    Branch,
    /// Default (fall-through) branch of a conditional.
    BranchDefault,
}

impl InstrumentationKind {
    /// Returns the name used in mapping and output documents.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Function => "FUNCTION",
            Self::Branch => "BRANCH",
            Self::BranchDefault => "BRANCH_DEFAULT",
        }
    }
}

impl FromStr for InstrumentationKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "FUNCTION" => Ok(Self::Function),
            "BRANCH" => Ok(Self::Branch),
            "BRANCH_DEFAULT" => Ok(Self::BranchDefault),
            _ => Err(Error::UnknownKind(s.into())),
        }
    }
}

impl fmt::Display for InstrumentationKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
