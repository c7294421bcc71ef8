//! instrumentation-reporter library.
//!
//! Decodes the instrumentation mapping emitted by the compiler and aggregates
//! execution reports of instrumented deployments into a per-file, per-function
//! profiling summary.

#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod aggregate;
pub mod config;
pub mod error;
pub mod gen;
pub mod kind;
pub mod mapping;
pub mod output;
pub mod points;
pub mod report;
pub mod vlq;

mod filebuf;
