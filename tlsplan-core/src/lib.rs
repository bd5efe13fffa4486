//! Tlsplan Core - Core library for summarizing traffic-light signal plans
//!
//! This crate loads traffic-light logic definitions (`tlLogic` elements) from
//! an XML plan file and renders them as a human-readable report.

pub mod config;
pub mod error;
pub mod plan;
pub mod report;

pub use config::Config;
pub use error::{Error, Result};
pub use plan::{load_document, parse_document, ControllerPlan, Phase, PlanDocument};
pub use report::{format_phase, summarize, Outcome, ReportRequest};
