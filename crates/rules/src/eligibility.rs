//! Eligibility engine: static legality tables and pure lookups.
//!
//! The frequency comparison uses the nominal 30/365-day month/year constants
//! from [`ReportPeriod::frequency_days`] / [`SendCadence::frequency_days`].
//! They are deliberately not calendar-accurate; switching them would change
//! which cadence/period combinations are legal.

use automail_core::{ReportPeriod, ReportType, ScheduleError, SendCadence};

// ── Static tables ───────────────────────────────────────────────────

/// Fallback priority when the current cadence becomes illegal: least
/// frequent first.
const FALLBACK_PRIORITY: [SendCadence; 4] = [
    SendCadence::Yearly,
    SendCadence::Monthly,
    SendCadence::Weekly,
    SendCadence::Daily,
];

/// Reporting periods a report type supports.
pub fn legal_periods(report_type: ReportType) -> &'static [ReportPeriod] {
    match report_type {
        ReportType::Performance => &[ReportPeriod::Monthly, ReportPeriod::Yearly],
        ReportType::Targets => &[ReportPeriod::Daily, ReportPeriod::Weekly],
        ReportType::MissingTargets => &[
            ReportPeriod::Daily,
            ReportPeriod::Weekly,
            ReportPeriod::Monthly,
            ReportPeriod::Yearly,
        ],
    }
}

/// Send cadences a report type supports, before any period restriction.
fn allowed_cadences(report_type: ReportType) -> &'static [SendCadence] {
    match report_type {
        ReportType::Performance | ReportType::MissingTargets => &[
            SendCadence::Daily,
            SendCadence::Weekly,
            SendCadence::Monthly,
            SendCadence::Yearly,
        ],
        ReportType::Targets => &[SendCadence::Daily, SendCadence::Weekly],
    }
}

// ── Operations ──────────────────────────────────────────────────────

/// Legal send cadences for a selection of report types and an optional period.
///
/// - Empty `report_types` means nothing is chosen yet: the full cadence set.
/// - Otherwise the per-type allowed sets are intersected (real usage has at
///   most one type, but the intersection keeps the operation general).
/// - With a period, cadences firing less often than the period are dropped:
///   the mail must not go out less frequently than the report's own
///   aggregation window.
///
/// May return an empty set; callers surface that as an error rather than
/// silently picking a cadence.
pub fn legal_cadences(
    report_types: &[ReportType],
    period: Option<ReportPeriod>,
) -> Vec<SendCadence> {
    SendCadence::ALL
        .into_iter()
        .filter(|c| report_types.iter().all(|t| allowed_cadences(*t).contains(c)))
        .filter(|c| match period {
            Some(p) => c.frequency_days() <= p.frequency_days(),
            None => true,
        })
        .collect()
}

/// The natural cadence for a period: send once per aggregation window.
///
/// A suggestion only — callers must re-check it against [`legal_cadences`]
/// before trusting it.
pub fn default_cadence_for_period(period: ReportPeriod) -> SendCadence {
    match period {
        ReportPeriod::Daily => SendCadence::Daily,
        ReportPeriod::Weekly => SendCadence::Weekly,
        ReportPeriod::Monthly => SendCadence::Monthly,
        ReportPeriod::Yearly => SendCadence::Yearly,
    }
}

/// Pick a replacement cadence after a period/type change invalidated the
/// current one.
///
/// Tries the period's natural cadence first, then walks the fixed priority
/// list (least frequent first). An empty legal set means the static tables
/// are inconsistent; that is a programming error, reported as
/// [`ScheduleError::NoLegalCadence`] instead of a panic.
pub fn fallback_cadence(
    period: ReportPeriod,
    legal: &[SendCadence],
) -> Result<SendCadence, ScheduleError> {
    let preferred = default_cadence_for_period(period);
    if legal.contains(&preferred) {
        return Ok(preferred);
    }
    FALLBACK_PRIORITY
        .into_iter()
        .find(|c| legal.contains(c))
        .ok_or(ScheduleError::NoLegalCadence)
}
