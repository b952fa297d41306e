//! Validation error taxonomy for schedule normalization.

use thiserror::Error;

use crate::schedule::{ReportPeriod, ReportType, SendCadence};

/// Why a draft was rejected (or, for [`NoLegalCadence`], why the eligibility
/// tables are inconsistent).
///
/// Every variant is a pure function of the input draft: nothing here is
/// transient, and retrying with the same input fails identically. Callers map
/// variants to user-facing text; the engine never does.
///
/// [`NoLegalCadence`]: ScheduleError::NoLegalCadence
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ScheduleError {
    #[error("exactly one report type required, got {count}")]
    InvalidReportTypeCount { count: usize },

    #[error(
        "reporting period '{}' is not allowed for report type '{report_type}'",
        .period.map(|p| p.to_string()).unwrap_or_else(|| "none".to_string())
    )]
    PeriodNotAllowedForType {
        report_type: ReportType,
        /// `None` when the draft carries no period at all.
        period: Option<ReportPeriod>,
    },

    #[error("at least one mail group or email recipient required")]
    NoRecipients,

    #[error("unsupported interval: {0}")]
    UnsupportedCustomInterval(String),

    #[error(
        "cadence '{cadence}' fires less often than the '{period}' reporting period"
    )]
    CadenceTooInfrequent {
        cadence: SendCadence,
        period: ReportPeriod,
    },

    #[error("invalid time spec: {0}")]
    InvalidTimeSpec(String),

    /// Defensive: the fallback walk found no legal cadence. Indicates an
    /// inconsistency in the static tables, not bad user input.
    #[error("no legal send cadence for the given selection")]
    NoLegalCadence,
}
