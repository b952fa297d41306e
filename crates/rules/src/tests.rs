//! End-to-end normalizer scenarios across eligibility and normalization.

use automail_core::{
    CustomInterval, IntervalPreset, IntervalUnit, ReportPeriod, ReportType, ScheduleDraft,
    ScheduleError, SendCadence,
};

use crate::normalize_schedule;

fn draft(
    report_type: ReportType,
    period: ReportPeriod,
    cadence: SendCadence,
    hour: u8,
    minute: u8,
) -> ScheduleDraft {
    ScheduleDraft {
        report_types: vec![report_type],
        period: Some(period),
        cadence: Some(cadence),
        hour: Some(hour),
        minute: Some(minute),
        emails: vec!["a@b.com".to_string()],
        ..Default::default()
    }
}

#[test]
fn monthly_cadence_on_weekly_targets_report_is_too_infrequent() {
    // 1M = 30 nominal days against a 7-day period.
    let err = normalize_schedule(&draft(
        ReportType::Targets,
        ReportPeriod::Weekly,
        SendCadence::Monthly,
        9,
        0,
    ))
    .unwrap_err();
    assert_eq!(
        err,
        ScheduleError::CadenceTooInfrequent {
            cadence: SendCadence::Monthly,
            period: ReportPeriod::Weekly,
        }
    );
}

#[test]
fn yearly_cadence_persists_as_every_twelve_months() {
    let mut d = draft(
        ReportType::Performance,
        ReportPeriod::Monthly,
        SendCadence::Yearly,
        8,
        30,
    );
    d.emails.clear();
    d.mail_group_ids = vec!["g1".to_string()];

    // Monthly period would reject a yearly cadence; yearly period accepts it.
    d.period = Some(ReportPeriod::Yearly);

    let schedule = normalize_schedule(&d).unwrap();
    assert_eq!(schedule.interval_preset, IntervalPreset::Custom);
    assert_eq!(schedule.custom, Some(CustomInterval::YEARLY));
    assert_eq!(schedule.time.day_of_week, None);
    assert_eq!(schedule.time.day_of_month, None);
}

#[test]
fn daily_schedule_carries_no_day_fields() {
    let schedule = normalize_schedule(&draft(
        ReportType::MissingTargets,
        ReportPeriod::Daily,
        SendCadence::Daily,
        7,
        0,
    ))
    .unwrap();
    assert_eq!(schedule.interval_preset, IntervalPreset::Daily);
    assert_eq!(schedule.custom, None);
    assert_eq!(schedule.time.day_of_week, None);
    assert_eq!(schedule.time.day_of_month, None);
}

#[test]
fn weekly_cadence_keeps_day_of_week_only() {
    let mut d = draft(
        ReportType::Targets,
        ReportPeriod::Daily,
        SendCadence::Weekly,
        9,
        0,
    );
    d.day_of_week = Some(1);
    d.day_of_month = Some(15); // stale UI leftover, must be cleared
    d.mail_group_ids = vec!["g1".to_string()];

    // 1W on a daily period is too infrequent (7 > 1); use the weekly period.
    d.period = Some(ReportPeriod::Weekly);

    let schedule = normalize_schedule(&d).unwrap();
    assert_eq!(schedule.time.day_of_week, Some(1));
    assert_eq!(schedule.time.day_of_month, None);
}

#[test]
fn monthly_cadence_keeps_day_of_month_only() {
    let mut d = draft(
        ReportType::Performance,
        ReportPeriod::Monthly,
        SendCadence::Monthly,
        6,
        45,
    );
    d.day_of_month = Some(31);
    d.day_of_week = Some(2);

    let schedule = normalize_schedule(&d).unwrap();
    assert_eq!(schedule.time.day_of_month, Some(31));
    assert_eq!(schedule.time.day_of_week, None);
}

#[test]
fn yearly_period_accepts_a_weekly_cadence() {
    // Trap case: a yearly period restricts nothing, 1W fires well within
    // 365 nominal days.
    let mut d = draft(
        ReportType::Performance,
        ReportPeriod::Yearly,
        SendCadence::Weekly,
        9,
        0,
    );
    d.day_of_week = Some(5);
    let schedule = normalize_schedule(&d).unwrap();
    assert_eq!(schedule.interval_preset, IntervalPreset::Weekly);
}

#[test]
fn empty_recipients_rejected_before_cadence_checks() {
    let mut d = draft(
        ReportType::MissingTargets,
        ReportPeriod::Daily,
        SendCadence::Daily,
        7,
        0,
    );
    d.emails.clear();
    assert_eq!(normalize_schedule(&d).unwrap_err(), ScheduleError::NoRecipients);

    // Same rejection even when later checks would also fail.
    d.cadence = Some(SendCadence::Yearly);
    d.hour = Some(99);
    assert_eq!(normalize_schedule(&d).unwrap_err(), ScheduleError::NoRecipients);
}

#[test]
fn all_malformed_emails_collapse_to_no_recipients() {
    let mut d = draft(
        ReportType::Targets,
        ReportPeriod::Daily,
        SendCadence::Daily,
        7,
        0,
    );
    d.emails = vec!["nope".to_string(), "also bad@".to_string()];
    assert_eq!(normalize_schedule(&d).unwrap_err(), ScheduleError::NoRecipients);
}

#[test]
fn zero_report_types_rejected() {
    let mut d = draft(
        ReportType::Targets,
        ReportPeriod::Daily,
        SendCadence::Daily,
        7,
        0,
    );
    d.report_types.clear();
    assert_eq!(
        normalize_schedule(&d).unwrap_err(),
        ScheduleError::InvalidReportTypeCount { count: 0 }
    );
}

#[test]
fn two_report_types_rejected() {
    let mut d = draft(
        ReportType::Targets,
        ReportPeriod::Daily,
        SendCadence::Daily,
        7,
        0,
    );
    d.report_types.push(ReportType::Performance);
    assert_eq!(
        normalize_schedule(&d).unwrap_err(),
        ScheduleError::InvalidReportTypeCount { count: 2 }
    );
}

#[test]
fn performance_report_rejects_daily_period() {
    let err = normalize_schedule(&draft(
        ReportType::Performance,
        ReportPeriod::Daily,
        SendCadence::Daily,
        7,
        0,
    ))
    .unwrap_err();
    assert_eq!(
        err,
        ScheduleError::PeriodNotAllowedForType {
            report_type: ReportType::Performance,
            period: Some(ReportPeriod::Daily),
        }
    );
}

#[test]
fn missing_period_rejected() {
    let mut d = draft(
        ReportType::Targets,
        ReportPeriod::Daily,
        SendCadence::Daily,
        7,
        0,
    );
    d.period = None;
    assert_eq!(
        normalize_schedule(&d).unwrap_err(),
        ScheduleError::PeriodNotAllowedForType {
            report_type: ReportType::Targets,
            period: None,
        }
    );
}

#[test]
fn out_of_range_time_fields_rejected() {
    let mut d = draft(
        ReportType::Targets,
        ReportPeriod::Daily,
        SendCadence::Daily,
        24,
        0,
    );
    assert!(matches!(
        normalize_schedule(&d).unwrap_err(),
        ScheduleError::InvalidTimeSpec(_)
    ));

    d.hour = Some(9);
    d.minute = Some(60);
    assert!(matches!(
        normalize_schedule(&d).unwrap_err(),
        ScheduleError::InvalidTimeSpec(_)
    ));
}

#[test]
fn weekly_cadence_without_day_of_week_rejected() {
    let mut d = draft(
        ReportType::Targets,
        ReportPeriod::Weekly,
        SendCadence::Weekly,
        9,
        0,
    );
    d.day_of_week = None;
    assert!(matches!(
        normalize_schedule(&d).unwrap_err(),
        ScheduleError::InvalidTimeSpec(_)
    ));
}

#[test]
fn raw_custom_preset_outside_whitelist_rejected() {
    let d = ScheduleDraft {
        report_types: vec![ReportType::MissingTargets],
        period: Some(ReportPeriod::Yearly),
        interval_preset: Some(IntervalPreset::Custom),
        custom: Some(CustomInterval {
            every: 6,
            unit: IntervalUnit::Month,
        }),
        hour: Some(9),
        minute: Some(0),
        emails: vec!["a@b.com".to_string()],
        ..Default::default()
    };
    assert!(matches!(
        normalize_schedule(&d).unwrap_err(),
        ScheduleError::UnsupportedCustomInterval(_)
    ));
}

#[test]
fn normalization_is_idempotent() {
    let mut d = draft(
        ReportType::MissingTargets,
        ReportPeriod::Yearly,
        SendCadence::Yearly,
        8,
        15,
    );
    d.emails = vec!["B@x.com ".to_string(), "a@y.com".to_string()];
    d.mail_group_ids = vec!["g2".to_string()];

    let first = normalize_schedule(&d).unwrap();
    let second = normalize_schedule(&first.to_draft()).unwrap();
    assert_eq!(first, second);
}

#[test]
fn idempotent_for_weekly_and_monthly_shapes() {
    let mut weekly = draft(
        ReportType::Targets,
        ReportPeriod::Weekly,
        SendCadence::Weekly,
        9,
        30,
    );
    weekly.day_of_week = Some(3);
    let first = normalize_schedule(&weekly).unwrap();
    assert_eq!(normalize_schedule(&first.to_draft()).unwrap(), first);

    let mut monthly = draft(
        ReportType::Performance,
        ReportPeriod::Monthly,
        SendCadence::Monthly,
        23,
        59,
    );
    monthly.day_of_month = Some(1);
    let first = normalize_schedule(&monthly).unwrap();
    assert_eq!(normalize_schedule(&first.to_draft()).unwrap(), first);
}
