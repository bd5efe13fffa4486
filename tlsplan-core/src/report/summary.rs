//! Filter and report driver

use std::collections::BTreeSet;
use std::io::{self, Write};

use super::format::{format_header, format_phase_line};
use crate::plan::PlanDocument;

/// What to include in a report
#[derive(Debug, Clone, Default)]
pub struct ReportRequest {
    /// Controller ids to report; empty selects every controller
    pub ids: BTreeSet<String>,
    /// Print one line per phase under each header
    pub show_phases: bool,
}

impl ReportRequest {
    /// Create a request from a list of ids, collapsing repeats
    pub fn new<I, S>(ids: I, show_phases: bool) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            ids: ids.into_iter().map(Into::into).collect(),
            show_phases,
        }
    }

    /// Whether the request restricts which controllers are reported
    pub fn is_filtered(&self) -> bool {
        !self.ids.is_empty()
    }

    fn selects(&self, id: &str) -> bool {
        !self.is_filtered() || self.ids.contains(id)
    }
}

/// Result of a report run
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Every requested controller was found
    Complete { matched: usize },
    /// Some requested ids do not exist in the document
    Missing {
        matched: usize,
        /// Missing ids, sorted ascending
        missing: Vec<String>,
    },
}

impl Outcome {
    /// Number of controller blocks written
    pub fn matched(&self) -> usize {
        match self {
            Outcome::Complete { matched } | Outcome::Missing { matched, .. } => *matched,
        }
    }

    /// Process exit status for this outcome
    pub fn exit_code(&self) -> u8 {
        match self {
            Outcome::Complete { .. } => 0,
            Outcome::Missing { .. } => 1,
        }
    }
}

/// Write the report for `document` to `out`
///
/// When requested ids are absent from the document, a single warning naming
/// them and `source_name` is written to `err`.
pub fn summarize<W, E>(
    document: &PlanDocument,
    request: &ReportRequest,
    source_name: &str,
    out: &mut W,
    err: &mut E,
) -> io::Result<Outcome>
where
    W: Write,
    E: Write,
{
    let mut matched = 0;

    for controller in &document.controllers {
        if !request.selects(&controller.id) {
            continue;
        }
        matched += 1;

        writeln!(out, "{}", format_header(controller))?;
        if request.show_phases {
            for (idx, phase) in controller.phases.iter().enumerate() {
                writeln!(out, "{}", format_phase_line(idx, phase))?;
            }
        }
        writeln!(out)?;
    }

    let missing = missing_ids(document, request);
    if missing.is_empty() {
        return Ok(Outcome::Complete { matched });
    }

    tracing::debug!(matched, missing = missing.len(), "Requested controllers not found");
    writeln!(err, "Warning: {} not found in {}", missing.join(", "), source_name)?;

    Ok(Outcome::Missing { matched, missing })
}

/// Requested ids that do not appear anywhere in the document
///
/// Compared against the full id set rather than the match count, so
/// duplicate controller ids in the document cannot mask a missing one.
fn missing_ids(document: &PlanDocument, request: &ReportRequest) -> Vec<String> {
    if !request.is_filtered() {
        return Vec::new();
    }

    let present = document.ids();
    request
        .ids
        .iter()
        .filter(|id| !present.contains(id.as_str()))
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plan::parse_document;

    const SAMPLE: &str = r#"<additional>
    <tlLogic id="B" programID="0" offset="10">
        <phase duration="31" state="GGrrG"/>
        <phase duration="5" state="yyrry" minDur="3" maxDur="10"/>
    </tlLogic>
    <tlLogic id="A" programID="1" type="actuated"/>
    <tlLogic id="C" programID="0">
        <phase duration="60" state="GG"/>
    </tlLogic>
</additional>"#;

    fn run(request: &ReportRequest) -> (Outcome, String, String) {
        let doc = parse_document(SAMPLE).unwrap();
        let mut out = Vec::new();
        let mut err = Vec::new();
        let outcome = summarize(&doc, request, "tll.static.xml", &mut out, &mut err).unwrap();
        (
            outcome,
            String::from_utf8(out).unwrap(),
            String::from_utf8(err).unwrap(),
        )
    }

    fn headers(out: &str) -> Vec<&str> {
        out.lines().filter(|l| l.starts_with("TLS ")).collect()
    }

    #[test]
    fn test_unfiltered_reports_all_in_document_order() {
        let (outcome, out, err) = run(&ReportRequest::default());
        assert_eq!(outcome, Outcome::Complete { matched: 3 });
        assert_eq!(outcome.exit_code(), 0);
        assert!(err.is_empty());
        assert_eq!(
            out,
            "TLS B | program=0 | type=static | offset=10s\n\n\
             TLS A | program=1 | type=actuated | offset=0s\n\n\
             TLS C | program=0 | type=static | offset=0s\n\n"
        );
    }

    #[test]
    fn test_show_phases() {
        let (_, out, _) = run(&ReportRequest::new(["B"], true));
        assert_eq!(
            out,
            "TLS B | program=0 | type=static | offset=10s\n\
             \x20 Phase 00: duration= 31.0s state=GGrrG\n\
             \x20 Phase 01: duration=  5.0s state=yyrry (adaptive duration, min=3, max=10)\n\n"
        );
    }

    #[test]
    fn test_zero_phase_controller_block() {
        let (_, out, _) = run(&ReportRequest::new(["A"], true));
        assert_eq!(out, "TLS A | program=1 | type=actuated | offset=0s\n\n");
    }

    #[test]
    fn test_filter_keeps_document_order() {
        let (outcome, out, err) = run(&ReportRequest::new(["C", "B"], false));
        assert_eq!(outcome, Outcome::Complete { matched: 2 });
        assert!(err.is_empty());
        assert_eq!(
            headers(&out),
            vec![
                "TLS B | program=0 | type=static | offset=10s",
                "TLS C | program=0 | type=static | offset=0s",
            ]
        );
    }

    #[test]
    fn test_missing_ids_reported_sorted() {
        let (outcome, out, err) = run(&ReportRequest::new(["Z", "A", "M"], false));
        assert_eq!(
            outcome,
            Outcome::Missing {
                matched: 1,
                missing: vec!["M".to_string(), "Z".to_string()],
            }
        );
        assert_eq!(outcome.exit_code(), 1);
        assert_eq!(headers(&out), vec!["TLS A | program=1 | type=actuated | offset=0s"]);
        assert_eq!(err, "Warning: M, Z not found in tll.static.xml\n");
    }

    #[test]
    fn test_duplicate_document_ids_do_not_mask_missing() {
        let doc = parse_document(r#"<a><tlLogic id="A"/><tlLogic id="A" programID="1"/></a>"#)
            .unwrap();
        let mut out = Vec::new();
        let mut err = Vec::new();
        let outcome = summarize(
            &doc,
            &ReportRequest::new(["A", "B"], false),
            "dup.xml",
            &mut out,
            &mut err,
        )
        .unwrap();

        assert_eq!(outcome.matched(), 2);
        assert_eq!(outcome.exit_code(), 1);
        assert_eq!(String::from_utf8(err).unwrap(), "Warning: B not found in dup.xml\n");
    }

    #[test]
    fn test_duplicate_document_ids_without_missing() {
        let doc = parse_document(r#"<a><tlLogic id="A"/><tlLogic id="A"/></a>"#).unwrap();
        let mut out = Vec::new();
        let mut err = Vec::new();
        let outcome =
            summarize(&doc, &ReportRequest::new(["A"], false), "dup.xml", &mut out, &mut err)
                .unwrap();

        assert_eq!(outcome, Outcome::Complete { matched: 2 });
        assert!(err.is_empty());
    }

    #[test]
    fn test_repeated_request_ids_collapse() {
        let request = ReportRequest::new(["A", "A"], false);
        assert_eq!(request.ids.len(), 1);
        let (outcome, _, _) = run(&request);
        assert_eq!(outcome, Outcome::Complete { matched: 1 });
    }

    #[test]
    fn test_output_is_repeatable() {
        let request = ReportRequest::new(["A", "B", "Q"], true);
        let first = run(&request);
        let second = run(&request);
        assert_eq!(first, second);
    }
}
