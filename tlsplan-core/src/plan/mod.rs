//! Traffic-light plan model and loading
//!
//! This module handles parsing of plan files containing `tlLogic`
//! controller definitions and their timed phases.

mod loader;
mod model;

pub use loader::{load_document, parse_document};
pub use model::{ControllerPlan, Phase, PlanDocument, DEFAULT_CONTROLLER_TYPE, DEFAULT_OFFSET};
