use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use crate::models::LogFormat;

// ── Settings (CLI) ─────────────────────────────────────────────────────────────

/// Traffic forensics for web-server access logs
#[derive(Parser, Debug, Clone)]
#[command(
    name = "traffic-forensics",
    about = "Traffic forensics for web-server access logs",
    version
)]
pub struct Settings {
    #[command(subcommand)]
    pub command: Command,

    /// Logging level
    #[arg(
        long,
        global = true,
        default_value = "WARNING",
        env = "TRAFFIC_FORENSICS_LOG_LEVEL",
        value_parser = ["DEBUG", "INFO", "WARNING", "ERROR"]
    )]
    pub log_level: String,

    /// Enable debug logging
    #[arg(long, global = true)]
    pub debug: bool,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Analyze an access log
    Analyze(AnalyzeArgs),
}

#[derive(Args, Debug, Clone)]
pub struct AnalyzeArgs {
    /// Path to access log
    pub logfile: PathBuf,

    /// Top N results
    #[arg(long, default_value = "10")]
    pub top: usize,

    /// JSON output
    #[arg(long)]
    pub json: bool,

    /// Log format: nginx or apache
    #[arg(long, default_value = "nginx", value_parser = clap::value_parser!(LogFormat))]
    pub format: LogFormat,
}

impl Settings {
    /// Parse the process arguments and apply the `--debug` override.
    pub fn load() -> Self {
        Self::resolve(Settings::parse())
    }

    /// Same as [`Settings::load`] but with an explicit argument list.
    pub fn load_from<I, T>(args: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        Self::resolve(Settings::parse_from(args))
    }

    fn resolve(mut settings: Settings) -> Settings {
        // --debug overrides log level.
        if settings.debug {
            settings.log_level = "DEBUG".to_string();
        }
        settings
    }
}

// ── Tests ──────────────────────────────────────────────────────────────────────
