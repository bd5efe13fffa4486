//! Plan file loader
//!
//! Controllers are located anywhere below the root element, so wrapper
//! elements around `tlLogic` (e.g. `<additional>` or nested scenario
//! containers) do not matter. The root element itself is never a controller.
//! Phases are only taken from direct `phase` children of a controller.

use std::collections::HashMap;
use std::path::Path;

use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;

use super::model::{ControllerPlan, Phase, PlanDocument};
use crate::{Error, Result};

const CONTROLLER_TAG: &[u8] = b"tlLogic";
const PHASE_TAG: &[u8] = b"phase";

/// What an open element on the parse stack is
#[derive(Debug, Clone, Copy)]
enum Frame {
    /// A controller, by index into the output list
    Controller(usize),
    Other,
}

/// Load a plan file from disk
pub fn load_document(path: &Path) -> Result<PlanDocument> {
    let contents = std::fs::read_to_string(path)?;
    let document = parse_document(&contents)?;

    tracing::debug!(
        path = %path.display(),
        controllers = document.len(),
        "Loaded plan document"
    );

    Ok(document)
}

/// Parse a plan document from XML text
pub fn parse_document(xml: &str) -> Result<PlanDocument> {
    let mut reader = Reader::from_str(xml);
    let mut controllers: Vec<ControllerPlan> = Vec::new();
    let mut stack: Vec<Frame> = Vec::new();
    let mut seen_root = false;

    loop {
        match reader.read_event()? {
            Event::Start(e) => {
                let frame = open_element(&e, &stack, &mut controllers, &mut seen_root)?;
                stack.push(frame);
            }
            Event::Empty(e) => {
                open_element(&e, &stack, &mut controllers, &mut seen_root)?;
            }
            Event::End(_) => {
                stack.pop();
            }
            Event::Text(e) => {
                // Unescaping rejects undefined entity references
                let text = e.unescape()?;
                if stack.is_empty() && !text.trim().is_empty() {
                    return Err(Error::Malformed(
                        "text outside the root element".to_string(),
                    ));
                }
            }
            Event::CData(_) if stack.is_empty() => {
                return Err(Error::Malformed(
                    "CDATA outside the root element".to_string(),
                ));
            }
            Event::Eof => break,
            _ => {}
        }
    }

    if !stack.is_empty() {
        return Err(Error::Malformed(format!(
            "{} element(s) left open at end of input",
            stack.len()
        )));
    }
    if !seen_root {
        return Err(Error::Malformed("no root element".to_string()));
    }

    Ok(PlanDocument { controllers })
}

/// Handle an opening (or self-closing) tag and return its stack frame
fn open_element(
    e: &BytesStart<'_>,
    stack: &[Frame],
    controllers: &mut Vec<ControllerPlan>,
    seen_root: &mut bool,
) -> Result<Frame> {
    if stack.is_empty() {
        if *seen_root {
            return Err(Error::Malformed(
                "content after the root element".to_string(),
            ));
        }
        *seen_root = true;
        // Controllers are searched among descendants of the root only
        return Ok(Frame::Other);
    }

    match e.name().as_ref() {
        CONTROLLER_TAG => {
            controllers.push(parse_controller(e)?);
            Ok(Frame::Controller(controllers.len() - 1))
        }
        PHASE_TAG => {
            if let Some(&Frame::Controller(idx)) = stack.last() {
                let controller = &mut controllers[idx];
                let phase = parse_phase(e, &controller.id)?;
                controller.phases.push(phase);
            }
            Ok(Frame::Other)
        }
        _ => Ok(Frame::Other),
    }
}

fn parse_controller(e: &BytesStart<'_>) -> Result<ControllerPlan> {
    let mut attrs = attributes(e)?;
    let id = attrs.remove("id").ok_or(Error::MissingAttribute {
        element: "tlLogic",
        attribute: "id",
    })?;

    Ok(ControllerPlan::new(
        id,
        attrs.remove("programID"),
        attrs.remove("offset"),
        attrs.remove("type"),
    ))
}

fn parse_phase(e: &BytesStart<'_>, controller: &str) -> Result<Phase> {
    let mut attrs = attributes(e)?;

    let duration = match attrs.remove("duration") {
        Some(raw) => raw
            .trim()
            .parse::<f64>()
            .map_err(|_| Error::InvalidDuration {
                controller: controller.to_string(),
                value: raw.clone(),
            })?,
        None => 0.0,
    };

    Ok(Phase {
        state: attrs.remove("state").unwrap_or_default(),
        duration,
        min_duration: attrs.remove("minDur"),
        max_duration: attrs.remove("maxDur"),
    })
}

/// Collect an element's attributes with entities unescaped
fn attributes(e: &BytesStart<'_>) -> Result<HashMap<String, String>> {
    let mut map = HashMap::new();
    for attr in e.attributes() {
        let attr = attr?;
        let key = String::from_utf8_lossy(attr.key.as_ref()).into_owned();
        let value = attr.unescape_value()?.into_owned();
        map.insert(key, value);
    }
    Ok(map)
}
