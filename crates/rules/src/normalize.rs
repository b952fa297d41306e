//! Schedule normalizer: draft in, canonical schedule or a specific rejection
//! out.
//!
//! The checks run in a fixed order and short-circuit on the first failure;
//! downstream user-facing messages depend on that order, so it is part of the
//! contract (report-type count, period legality, recipients, cadence shape,
//! frequency, time fields).

use automail_core::{
    AutoMailSchedule, CustomInterval, IntervalPreset, Recipients, ScheduleDraft, ScheduleError,
    SendCadence, TimeSpec,
};
use tracing::warn;

use crate::eligibility::legal_periods;

/// Validate a draft and collapse it into the canonical persisted shape.
///
/// Pure: the output's `id` and timestamps are always `None`; stores assign
/// those. Normalization is idempotent — feeding a canonical schedule's
/// [`to_draft`](AutoMailSchedule::to_draft) projection back in reproduces it.
pub fn normalize_schedule(draft: &ScheduleDraft) -> Result<AutoMailSchedule, ScheduleError> {
    // 1. Exactly one report type.
    if draft.report_types.len() != 1 {
        return Err(ScheduleError::InvalidReportTypeCount {
            count: draft.report_types.len(),
        });
    }
    let report_type = draft.report_types[0];

    // 2. Period present and legal for the type.
    let period = match draft.period {
        Some(p) if legal_periods(report_type).contains(&p) => p,
        other => {
            return Err(ScheduleError::PeriodNotAllowedForType {
                report_type,
                period: other,
            })
        }
    };

    // 3. At least one recipient after email normalization.
    let recipients = normalize_recipients(&draft.mail_group_ids, &draft.emails);
    if recipients.is_empty() {
        return Err(ScheduleError::NoRecipients);
    }

    // 4. Cadence shape: UI cadence collapses to a preset; a raw CUSTOM preset
    //    must carry one of the two whitelisted every/unit pairs.
    let (interval_preset, custom, effective) = resolve_interval(draft)?;

    // 5. The mail must not fire less often than the report's own window.
    if effective.frequency_days() > period.frequency_days() {
        return Err(ScheduleError::CadenceTooInfrequent {
            cadence: effective,
            period,
        });
    }

    // 6. Time fields, with day-of-week/month required per effective cadence.
    let time = check_time_spec(draft, effective)?;

    // 7. Canonical record.
    Ok(AutoMailSchedule {
        id: None,
        report_types: vec![report_type],
        report_period: period,
        recipients,
        interval_preset,
        custom,
        time,
        created_at: None,
        updated_at: None,
    })
}

// ── Recipients ──────────────────────────────────────────────────────

/// Trim, lower-case, shape-check, dedupe and sort emails; drop empty group
/// ids. Malformed addresses are dropped with a warning rather than rejected
/// (the taxonomy has no malformed-address error; an all-malformed draft fails
/// the emptiness check instead).
fn normalize_recipients(mail_group_ids: &[String], emails: &[String]) -> Recipients {
    let mut cleaned: Vec<String> = emails
        .iter()
        .map(|e| e.trim().to_ascii_lowercase())
        .filter(|e| !e.is_empty())
        .filter(|e| {
            let ok = is_email_shaped(e);
            if !ok {
                warn!(email = %e, "dropping malformed email address");
            }
            ok
        })
        .collect();
    cleaned.sort();
    cleaned.dedup();

    Recipients {
        mail_group_ids: mail_group_ids
            .iter()
            .map(|g| g.trim().to_string())
            .filter(|g| !g.is_empty())
            .collect(),
        emails: cleaned,
    }
}

/// Minimal RFC-shape check: one `@`, non-empty local part, dotted domain
/// without leading/trailing dots, no whitespace.
fn is_email_shaped(email: &str) -> bool {
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.is_empty() {
        return false;
    }
    if email.chars().any(|c| c.is_whitespace()) || domain.contains('@') {
        return false;
    }
    if !domain.contains('.') || domain.starts_with('.') || domain.ends_with('.') {
        return false;
    }
    true
}

// ── Interval resolution ─────────────────────────────────────────────

/// Resolve the draft's cadence selection to (preset, custom, effective
/// cadence).
///
/// The custom whitelist is exactly two pairs: (1, DAY) and (12, MONTH).
/// That is a product decision, not a placeholder for a general "every N
/// units" feature; do not widen it.
fn resolve_interval(
    draft: &ScheduleDraft,
) -> Result<(IntervalPreset, Option<CustomInterval>, SendCadence), ScheduleError> {
    if let Some(cadence) = draft.cadence {
        return Ok(match cadence {
            SendCadence::Daily => (IntervalPreset::Daily, None, cadence),
            SendCadence::Weekly => (IntervalPreset::Weekly, None, cadence),
            SendCadence::Monthly => (IntervalPreset::Monthly, None, cadence),
            // No native yearly preset: persisted as every-12-months custom.
            SendCadence::Yearly => (IntervalPreset::Custom, Some(CustomInterval::YEARLY), cadence),
        });
    }

    // Raw-preset path, used when a caller bypasses the UI cadence (e.g. a
    // persisted record fed back for re-validation).
    match draft.interval_preset {
        Some(IntervalPreset::Daily) => Ok((IntervalPreset::Daily, None, SendCadence::Daily)),
        Some(IntervalPreset::Weekly) => Ok((IntervalPreset::Weekly, None, SendCadence::Weekly)),
        Some(IntervalPreset::Monthly) => Ok((IntervalPreset::Monthly, None, SendCadence::Monthly)),
        Some(IntervalPreset::Custom) => match draft.custom {
            Some(c) if c == CustomInterval::YEARLY => {
                Ok((IntervalPreset::Custom, Some(c), SendCadence::Yearly))
            }
            Some(c) if c == CustomInterval::DAILY => {
                Ok((IntervalPreset::Custom, Some(c), SendCadence::Daily))
            }
            Some(c) => Err(ScheduleError::UnsupportedCustomInterval(format!(
                "every {} {}",
                c.every, c.unit
            ))),
            None => Err(ScheduleError::UnsupportedCustomInterval(
                "CUSTOM preset without every/unit".to_string(),
            )),
        },
        None => Err(ScheduleError::UnsupportedCustomInterval(
            "no send cadence or interval preset selected".to_string(),
        )),
    }
}

// ── Time spec ───────────────────────────────────────────────────────

fn check_time_spec(
    draft: &ScheduleDraft,
    effective: SendCadence,
) -> Result<TimeSpec, ScheduleError> {
    let hour = match draft.hour {
        Some(h) if h <= 23 => h,
        Some(h) => {
            return Err(ScheduleError::InvalidTimeSpec(format!(
                "hour {} out of range 0-23",
                h
            )))
        }
        None => return Err(ScheduleError::InvalidTimeSpec("hour missing".to_string())),
    };
    let minute = match draft.minute {
        Some(m) if m <= 59 => m,
        Some(m) => {
            return Err(ScheduleError::InvalidTimeSpec(format!(
                "minute {} out of range 0-59",
                m
            )))
        }
        None => return Err(ScheduleError::InvalidTimeSpec("minute missing".to_string())),
    };

    // Day fields are exclusive to their cadence: weekly keeps day-of-week,
    // monthly keeps day-of-month, everything else (daily, yearly-as-custom)
    // carries neither.
    let (day_of_week, day_of_month) = match effective {
        SendCadence::Weekly => match draft.day_of_week {
            Some(d) if d <= 6 => (Some(d), None),
            Some(d) => {
                return Err(ScheduleError::InvalidTimeSpec(format!(
                    "day-of-week {} out of range 0-6",
                    d
                )))
            }
            None => {
                return Err(ScheduleError::InvalidTimeSpec(
                    "day-of-week required for a weekly cadence".to_string(),
                ))
            }
        },
        SendCadence::Monthly => match draft.day_of_month {
            Some(d) if (1..=31).contains(&d) => (None, Some(d)),
            Some(d) => {
                return Err(ScheduleError::InvalidTimeSpec(format!(
                    "day-of-month {} out of range 1-31",
                    d
                )))
            }
            None => {
                return Err(ScheduleError::InvalidTimeSpec(
                    "day-of-month required for a monthly cadence".to_string(),
                ))
            }
        },
        SendCadence::Daily | SendCadence::Yearly => (None, None),
    };

    Ok(TimeSpec {
        hour,
        minute,
        day_of_week,
        day_of_month,
    })
}
