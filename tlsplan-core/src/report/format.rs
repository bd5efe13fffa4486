//! Line formatting for controllers and phases

use crate::plan::{ControllerPlan, Phase};

/// Render a controller header line
pub fn format_header(controller: &ControllerPlan) -> String {
    format!(
        "TLS {} | program={} | type={} | offset={}s",
        controller.id, controller.program_id, controller.controller_type, controller.offset
    )
}

/// Render a phase as `duration=<d>s state=<state>` plus an annotation for
/// adaptive phases
pub fn format_phase(phase: &Phase) -> String {
    let mut extras: Vec<String> = Vec::new();
    if phase.is_adaptive() {
        extras.push("adaptive duration".to_string());
        if let Some(min) = &phase.min_duration {
            extras.push(format!("min={}", min));
        }
        if let Some(max) = &phase.max_duration {
            extras.push(format!("max={}", max));
        }
    }

    let suffix = if extras.is_empty() {
        String::new()
    } else {
        format!(" ({})", extras.join(", "))
    };

    format!("duration={}s state={}{}", format_duration(phase.duration), phase.state, suffix)
}

/// Fixed-point seconds, one decimal, right-aligned to width 5
fn format_duration(duration: f64) -> String {
    if duration.is_nan() {
        format!("{:>5}", "nan")
    } else {
        format!("{:>5.1}", duration)
    }
}

/// Render an indexed phase line as it appears under a controller header
pub fn format_phase_line(index: usize, phase: &Phase) -> String {
    format!("  Phase {:02}: {}", index, format_phase(phase))
}
