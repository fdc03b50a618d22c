//! Expose mdprep's internal API for use in integration tests. The supported
//! library surface is `mdprep-core`; this crate is the command line tool.
pub mod cli;
pub mod error;
pub mod utils;
