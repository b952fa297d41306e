//! Command-line argument definitions for the `automail` binary.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use automail_core::{ReportPeriod, ReportType, SendCadence};

/// Manage automatic report-mail schedules.
#[derive(Parser, Debug)]
#[command(name = "automail", version, about)]
pub struct Cli {
    /// Directory holding persisted schedule JSON files.
    #[arg(long, env = "SCHEDULES_DIR")]
    pub schedules_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Print the reporting periods a report type supports.
    Periods {
        /// PERFORMANCE, TARGETS or MISSING_TARGETS.
        report_type: ReportType,
    },

    /// Print the legal send cadences for a report type (and optional period).
    Cadences {
        /// PERFORMANCE, TARGETS or MISSING_TARGETS.
        report_type: ReportType,
        /// daily, weekly, monthly or yearly.
        #[arg(long)]
        period: Option<ReportPeriod>,
    },

    /// Run a draft through the normalizer and print the canonical schedule.
    Validate(DraftArgs),

    /// Normalize a draft and persist it.
    Add(DraftArgs),

    /// List persisted schedules.
    List,

    /// Replace a persisted schedule wholesale with a re-normalized draft.
    Update {
        id: String,
        #[command(flatten)]
        draft: DraftArgs,
    },

    /// Delete a persisted schedule.
    Delete { id: String },
}

/// Raw draft fields; validation happens in the rule engine, not here, so
/// everything the engine checks stays optional at the flag level.
#[derive(Args, Debug)]
pub struct DraftArgs {
    /// PERFORMANCE, TARGETS or MISSING_TARGETS.
    #[arg(long = "report-type")]
    pub report_type: Option<ReportType>,

    /// daily, weekly, monthly or yearly.
    #[arg(long)]
    pub period: Option<ReportPeriod>,

    /// 1D, 1W, 1M or 1Y.
    #[arg(long)]
    pub cadence: Option<SendCadence>,

    /// Hour of day, 0-23.
    #[arg(long)]
    pub hour: Option<u8>,

    /// Minute, 0-59.
    #[arg(long)]
    pub minute: Option<u8>,

    /// Day of week, 0=Sunday..6=Saturday (weekly cadence only).
    #[arg(long = "day-of-week")]
    pub day_of_week: Option<u8>,

    /// Day of month, 1-31 (monthly cadence only).
    #[arg(long = "day-of-month")]
    pub day_of_month: Option<u8>,

    /// Individual recipient address (repeatable).
    #[arg(long = "email")]
    pub emails: Vec<String>,

    /// Mail-group id (repeatable).
    #[arg(long = "group")]
    pub groups: Vec<String>,

    /// Directory user id, resolved to their email (repeatable).
    #[arg(long = "user")]
    pub users: Vec<String>,
}
