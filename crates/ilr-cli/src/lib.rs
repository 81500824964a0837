//! Library components of the `ilr` command-line validator.

pub mod config;
pub mod logging;
pub mod pipeline;
pub mod report;
pub mod types;
