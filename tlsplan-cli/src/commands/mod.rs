//! CLI command implementations

pub mod config;
pub mod summary;

pub use config::{to_stdout, write_config, write_version};
pub use summary::SummaryArgs;
