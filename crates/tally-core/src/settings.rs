use clap::{Args, Parser, Subcommand, ValueEnum};
use std::fmt;
use std::path::PathBuf;

// ── Settings (CLI) ─────────────────────────────────────────────────────────────

/// Tally clicker session responses against a class roster
#[derive(Parser, Debug, Clone)]
#[command(
    name = "clicker-tally",
    about = "Tally clicker session responses against a class roster",
    version,
    arg_required_else_help = true
)]
pub struct Settings {
    #[command(subcommand)]
    pub mode: RunMode,

    /// Logging level
    #[arg(long, global = true, default_value = "WARNING", value_parser = ["DEBUG", "INFO", "WARNING", "ERROR"])]
    pub log_level: String,

    /// Enable debug logging
    #[arg(long, global = true)]
    pub debug: bool,
}

/// How the roster and session files are chosen.
#[derive(Subcommand, Debug, Clone)]
pub enum RunMode {
    /// Discover files in the working directory and prompt for a selection
    Interactive(ReportArgs),
    /// Use the roster and session files given on the command line
    Standard(StandardArgs),
}

/// Flags shared by both run modes.
#[derive(Args, Debug, Clone)]
pub struct ReportArgs {
    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Prettyprint)]
    pub format: OutputFormat,

    /// Field separator; defaults to a tab since that's what spreadsheets paste best
    #[arg(short, long, default_value = "tab", value_parser = parse_separator)]
    pub separator: String,

    /// Write the report to this file instead of standard output
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

#[derive(Args, Debug, Clone)]
pub struct StandardArgs {
    #[command(flatten)]
    pub report: ReportArgs,

    /// Roster file with `deviceid,last,first` rows after a header line
    #[arg(short, long, default_value = "roster.csv")]
    pub roster: PathBuf,

    /// Session files, glob patterns, or `all` for every .tpzx file here
    #[arg(required = true, num_args = 1..)]
    pub clickerfiles: Vec<String>,
}

/// Report layout.
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// One block per session: name, total, one row per student
    Csv,
    /// A single matrix with one count column per session
    CsvAll,
    /// Like csv, with the count column aligned
    Prettyprint,
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            OutputFormat::Csv => "csv",
            OutputFormat::CsvAll => "csv-all",
            OutputFormat::Prettyprint => "prettyprint",
        };
        f.write_str(name)
    }
}

// ── Settings impl ──────────────────────────────────────────────────────────────

impl Settings {
    /// Parse the process arguments. Exits with usage when none are given.
    pub fn load() -> Self {
        Self::load_from(std::env::args_os())
    }

    /// Same as [`Settings::load`] over an explicit argument list.
    pub fn load_from<I, T>(args: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        Self::resolve(Settings::parse_from(args))
    }

    /// Flags of the active run mode.
    pub fn report(&self) -> &ReportArgs {
        match &self.mode {
            RunMode::Interactive(report) => report,
            RunMode::Standard(standard) => &standard.report,
        }
    }

    /// `--debug` overrides the log level.
    fn resolve(mut settings: Settings) -> Settings {
        if settings.debug {
            settings.log_level = "DEBUG".to_string();
        }
        settings
    }
}

// ── Helper: separator spelling ─────────────────────────────────────────────────

/// Accept `tab` and the shell-escaped `\t` as spellings of a horizontal tab.
fn parse_separator(raw: &str) -> Result<String, String> {
    match raw {
        "" => Err("separator must not be empty".to_string()),
        "tab" | "\\t" => Ok("\t".to_string()),
        other => Ok(other.to_string()),
    }
}

// ── Tests ──────────────────────────────────────────────────────────────────────
