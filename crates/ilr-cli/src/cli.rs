//! CLI argument definitions for the ILR validator.

use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;
use ilr_model::AcademicYear;

#[derive(Parser)]
#[command(
    name = "ilr",
    version,
    about = "ILR Validator - Check Individualised Learner Record submissions",
    long_about = "Validate Individualised Learner Record (ILR) submissions.\n\n\
                  Reads XML or JSON submissions and checks them against the ILR\n\
                  validation rules using embedded or supplied reference data."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for info, -vv for debug, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Validate a submission file or every submission in a directory.
    Validate(ValidateArgs),

    /// List the validation rules in the catalog.
    Rules(RulesArgs),

    /// List the codes of a reference lookup.
    Lookups(LookupsArgs),
}

#[derive(Parser)]
pub struct ValidateArgs {
    /// Submission file (.xml or .json) or a directory of submissions.
    #[arg(value_name = "PATH")]
    pub path: PathBuf,

    /// Reference CSV directory (default: $ILR_REFERENCE_DIR, else embedded data).
    #[arg(long = "reference-dir", value_name = "DIR")]
    pub reference_dir: Option<PathBuf>,

    /// Configuration file (default: ilr.toml in the working directory).
    #[arg(long = "config", value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Academic year to validate against, such as 1920.
    #[arg(long = "academic-year", value_name = "YEAR")]
    pub academic_year: Option<AcademicYear>,

    /// Run only this rule (repeatable).
    #[arg(long = "rule", value_name = "NAME")]
    pub rules: Vec<String>,

    /// Skip this rule (repeatable).
    #[arg(long = "skip-rule", value_name = "NAME")]
    pub skip_rules: Vec<String>,

    /// Write the full report as JSON.
    #[arg(long = "json", value_name = "PATH")]
    pub json: Option<PathBuf>,

    /// Write one CSV row per validation error.
    #[arg(long = "csv", value_name = "PATH")]
    pub csv: Option<PathBuf>,

    /// Date treated as today for "not in the future" checks (YYYY-MM-DD).
    #[arg(long = "today", value_name = "DATE")]
    pub today: Option<NaiveDate>,

    /// Exit with a failure status when only warnings are raised.
    #[arg(long = "fail-on-warnings")]
    pub fail_on_warnings: bool,
}

#[derive(Parser)]
pub struct RulesArgs {
    /// Only list rules for this entity (Message, Learner, LearningDelivery, ...).
    #[arg(long = "entity", value_name = "NAME")]
    pub entity: Option<String>,

    /// Reference CSV directory (default: $ILR_REFERENCE_DIR, else embedded data).
    #[arg(long = "reference-dir", value_name = "DIR")]
    pub reference_dir: Option<PathBuf>,
}

#[derive(Parser)]
pub struct LookupsArgs {
    /// Lookup name, such as Ethnicity or LearnDelFAMType.SOF. Lists lookup
    /// names when omitted.
    #[arg(value_name = "LOOKUP")]
    pub lookup: Option<String>,

    /// Reference CSV directory (default: $ILR_REFERENCE_DIR, else embedded data).
    #[arg(long = "reference-dir", value_name = "DIR")]
    pub reference_dir: Option<PathBuf>,
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}
