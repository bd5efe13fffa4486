//! Config and version commands

use std::io::{self, Write};
use std::path::Path;

use tlsplan_core::Config;

/// Write the effective configuration and the config file location
pub fn write_config<W: Write>(
    config: &Config,
    config_path: Option<&Path>,
    out: &mut W,
) -> io::Result<()> {
    writeln!(out, "Tlsplan Configuration")?;
    writeln!(out, "=====================")?;
    writeln!(out)?;
    writeln!(out, "Source Settings:")?;
    writeln!(out, "  tll_path: {}", config.source.tll_path.display())?;
    writeln!(out)?;
    writeln!(out, "Report Settings:")?;
    writeln!(out, "  show_phases: {}", config.report.show_phases)?;
    writeln!(out)?;
    if let Some(path) = config_path {
        writeln!(out, "Config file: {}", path.display())?;
        if path.exists() {
            writeln!(out, "  (exists)")?;
        } else {
            writeln!(out, "  (not found - using defaults)")?;
        }
    }
    Ok(())
}

/// Write the version line
pub fn write_version<W: Write>(out: &mut W) -> io::Result<()> {
    writeln!(out, "tlsplan {}", env!("CARGO_PKG_VERSION"))
}

/// Run `write` against locked stdout, treating a closed reader as success
pub fn to_stdout<F>(write: F) -> io::Result<()>
where
    F: FnOnce(&mut io::StdoutLock<'static>) -> io::Result<()>,
{
    let mut out = io::stdout().lock();
    ignore_broken_pipe(write(&mut out).and_then(|()| out.flush()))
}

fn ignore_broken_pipe(result: io::Result<()>) -> io::Result<()> {
    match result {
        // Reader went away (e.g. piped into `head`)
        Err(e) if e.kind() == io::ErrorKind::BrokenPipe => Ok(()),
        other => other,
    }
}
