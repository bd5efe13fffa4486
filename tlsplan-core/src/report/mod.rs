//! Report rendering
//!
//! Turns a loaded plan document into the console summary: one header line
//! per selected controller, optional phase lines, and a warning for
//! requested controllers that do not exist.

mod format;
mod summary;

pub use format::{format_header, format_phase, format_phase_line};
pub use summary::{summarize, Outcome, ReportRequest};
