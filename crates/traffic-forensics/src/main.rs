mod bootstrap;

use std::io::Write;
use std::process::ExitCode;

use anyhow::Result;
use forensics_core::formatting::{render_json, render_text};
use forensics_core::settings::{AnalyzeArgs, Command, Settings};
use forensics_data::analysis::analyze_file;

/// Exit status when the log file does not exist.
const EXIT_FILE_NOT_FOUND: u8 = 2;

fn main() -> Result<ExitCode> {
    let settings = Settings::load();

    bootstrap::setup_logging(&settings.log_level)?;

    tracing::info!("traffic-forensics v{} starting", env!("CARGO_PKG_VERSION"));

    let status = match &settings.command {
        Command::Analyze(args) => {
            let stdout = std::io::stdout();
            let mut out = stdout.lock();
            analyze(args, &mut out)?
        }
    };

    Ok(ExitCode::from(status))
}

/// Run the `analyze` command, writing the report to `out`.
///
/// Returns the process exit status; a missing file is reported on stderr
/// rather than as an error.
fn analyze(args: &AnalyzeArgs, out: &mut impl Write) -> Result<u8> {
    let format = args.format;
    tracing::info!(
        "Analyzing {} as {} (top {})",
        args.logfile.display(),
        format,
        args.top
    );

    let report = match analyze_file(&args.logfile, args.top, format) {
        Ok(report) => report,
        Err(err) if err.is_not_found() => {
            eprintln!("File not found: {}", args.logfile.display());
            return Ok(EXIT_FILE_NOT_FOUND);
        }
        Err(err) => return Err(err.into()),
    };

    tracing::info!(
        "Parsed {} of {} lines",
        report.metadata.lines_parsed,
        report.metadata.lines_read
    );

    let rendered = if args.json {
        render_json(&report.summary)?
    } else {
        render_text(&report.summary)
    };
    writeln!(out, "{}", rendered)?;

    Ok(0)
}

// ── Tests ──────────────────────────────────────────────────────────────────────
