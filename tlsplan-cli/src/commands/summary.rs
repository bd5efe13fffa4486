//! Summary command - print controllers from a plan file

use std::io::{self, Write};
use std::path::{Path, PathBuf};

use clap::Args;
use tlsplan_core::{load_document, summarize, Config, Outcome, PlanDocument, ReportRequest};

/// Arguments for the summary (default) command
#[derive(Args, Debug, Default)]
pub struct SummaryArgs {
    /// Filter by specific traffic light IDs (may be repeated)
    #[arg(long = "id", value_name = "ID", allow_hyphen_values = true)]
    pub ids: Vec<String>,

    /// Print full phase definitions for each matching controller
    #[arg(long)]
    pub phases: bool,

    /// Override path to tll.static.xml
    #[arg(long = "tll", value_name = "PATH", env = "TLSPLAN_TLL")]
    pub tll_path: Option<PathBuf>,
}

impl SummaryArgs {
    /// Build the report request from the parsed flags and configuration
    pub fn request(&self, config: &Config) -> ReportRequest {
        ReportRequest::new(self.ids.iter().cloned(), config.report.show_phases)
    }

    /// Execute the summary command against the configured plan file
    ///
    /// Returns the process exit status.
    pub fn execute(&self, verbose: bool, config: &Config) -> anyhow::Result<u8> {
        let tll_path = &config.source.tll_path;
        let request = self.request(config);

        if verbose {
            tracing::info!(
                path = %tll_path.display(),
                ids = request.ids.len(),
                show_phases = request.show_phases,
                "Summarizing plan file"
            );
        }

        let document = load_document(tll_path)?;
        let source_name = source_name(tll_path);

        let outcome = match write_report(&document, &request, &source_name) {
            Ok(outcome) => outcome,
            // Reader went away (e.g. piped into `head`)
            Err(e) if e.kind() == io::ErrorKind::BrokenPipe => return Ok(0),
            Err(e) => return Err(e.into()),
        };

        tracing::debug!(matched = outcome.matched(), "Report written");
        Ok(outcome.exit_code())
    }
}

fn write_report(
    document: &PlanDocument,
    request: &ReportRequest,
    source_name: &str,
) -> io::Result<Outcome> {
    let mut out = io::stdout().lock();
    let mut err = io::stderr().lock();
    let outcome = summarize(document, request, source_name, &mut out, &mut err)?;
    out.flush()?;
    Ok(outcome)
}

/// File name used in diagnostics, falling back to the full path
fn source_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
