//! Traffic-light plan data model

use std::collections::BTreeSet;

/// Offset used when a controller does not declare one
pub const DEFAULT_OFFSET: &str = "0";

/// Controller type used when a controller does not declare one
pub const DEFAULT_CONTROLLER_TYPE: &str = "static";

/// One traffic-light logic program (a `tlLogic` element)
#[derive(Debug, Clone, PartialEq)]
pub struct ControllerPlan {
    /// Controller identifier
    pub id: String,
    /// Program identifier (`programID`), empty when absent
    pub program_id: String,
    /// Cycle start offset in seconds, kept as written
    pub offset: String,
    /// Control algorithm family (`type`), e.g. "static" or "actuated"
    pub controller_type: String,
    /// Phases in document order
    pub phases: Vec<Phase>,
}

impl ControllerPlan {
    /// Build a controller from its raw attributes, applying the defaults
    /// for any optional attribute that is absent
    pub fn new(
        id: String,
        program_id: Option<String>,
        offset: Option<String>,
        controller_type: Option<String>,
    ) -> Self {
        Self {
            id,
            program_id: program_id.unwrap_or_default(),
            offset: offset.unwrap_or_else(|| DEFAULT_OFFSET.to_string()),
            controller_type: controller_type.unwrap_or_else(|| DEFAULT_CONTROLLER_TYPE.to_string()),
            phases: Vec::new(),
        }
    }
}

/// One timed state within a controller's cycle
#[derive(Debug, Clone, PartialEq)]
pub struct Phase {
    /// Per-signal state characters, passed through verbatim
    pub state: String,
    /// Duration in seconds
    pub duration: f64,
    /// Lower duration bound (`minDur`), kept as written
    pub min_duration: Option<String>,
    /// Upper duration bound (`maxDur`), kept as written
    pub max_duration: Option<String>,
}

impl Phase {
    /// Whether the phase has a variable duration
    pub fn is_adaptive(&self) -> bool {
        self.min_duration.is_some() || self.max_duration.is_some()
    }
}

/// A loaded plan file
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PlanDocument {
    /// Every controller in document order, duplicates included
    pub controllers: Vec<ControllerPlan>,
}

impl PlanDocument {
    /// Look up a controller by id
    ///
    /// If the document repeats an id, the last occurrence is returned.
    pub fn get(&self, id: &str) -> Option<&ControllerPlan> {
        self.controllers.iter().rev().find(|c| c.id == id)
    }

    /// All controller ids present in the document
    pub fn ids(&self) -> BTreeSet<&str> {
        self.controllers.iter().map(|c| c.id.as_str()).collect()
    }

    /// Number of controller entries, duplicates included
    pub fn len(&self) -> usize {
        self.controllers.len()
    }

    /// Whether the document has no controllers
    pub fn is_empty(&self) -> bool {
        self.controllers.is_empty()
    }
}
