//! Domain types for automatic report-mail schedules.
//!
//! The persisted JSON shape is exactly [`AutoMailSchedule`]; callers assemble
//! a [`ScheduleDraft`] and run it through the normalizer in `automail-rules`
//! before anything touches a store.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ── Enumerations ────────────────────────────────────────────────────

/// What kind of report a schedule emails.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ReportType {
    Performance,
    Targets,
    MissingTargets,
}

impl ReportType {
    pub const ALL: [ReportType; 3] = [
        ReportType::Performance,
        ReportType::Targets,
        ReportType::MissingTargets,
    ];
}

impl fmt::Display for ReportType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReportType::Performance => write!(f, "PERFORMANCE"),
            ReportType::Targets => write!(f, "TARGETS"),
            ReportType::MissingTargets => write!(f, "MISSING_TARGETS"),
        }
    }
}

impl FromStr for ReportType {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "PERFORMANCE" => Ok(ReportType::Performance),
            "TARGETS" => Ok(ReportType::Targets),
            "MISSING_TARGETS" | "MISSING-TARGETS" => Ok(ReportType::MissingTargets),
            other => Err(format!("unknown report type: '{}'", other)),
        }
    }
}

/// Aggregation window of the report content itself.
///
/// Distinct from [`SendCadence`], which says how often the mail goes out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportPeriod {
    Daily,
    Weekly,
    Monthly,
    Yearly,
}

impl ReportPeriod {
    pub const ALL: [ReportPeriod; 4] = [
        ReportPeriod::Daily,
        ReportPeriod::Weekly,
        ReportPeriod::Monthly,
        ReportPeriod::Yearly,
    ];

    /// Nominal length of the period in days (30/365 for month/year, not
    /// calendar-accurate — changing this would change which cadence/period
    /// combinations are legal).
    pub fn frequency_days(&self) -> u32 {
        match self {
            ReportPeriod::Daily => 1,
            ReportPeriod::Weekly => 7,
            ReportPeriod::Monthly => 30,
            ReportPeriod::Yearly => 365,
        }
    }
}

impl fmt::Display for ReportPeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReportPeriod::Daily => write!(f, "daily"),
            ReportPeriod::Weekly => write!(f, "weekly"),
            ReportPeriod::Monthly => write!(f, "monthly"),
            ReportPeriod::Yearly => write!(f, "yearly"),
        }
    }
}

impl FromStr for ReportPeriod {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "daily" => Ok(ReportPeriod::Daily),
            "weekly" => Ok(ReportPeriod::Weekly),
            "monthly" => Ok(ReportPeriod::Monthly),
            "yearly" => Ok(ReportPeriod::Yearly),
            other => Err(format!("unknown report period: '{}'", other)),
        }
    }
}

/// How often the mail is dispatched (UI-facing selection).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SendCadence {
    #[serde(rename = "1D")]
    Daily,
    #[serde(rename = "1W")]
    Weekly,
    #[serde(rename = "1M")]
    Monthly,
    #[serde(rename = "1Y")]
    Yearly,
}

impl SendCadence {
    /// Stable presentation order used everywhere a cadence set is listed.
    pub const ALL: [SendCadence; 4] = [
        SendCadence::Daily,
        SendCadence::Weekly,
        SendCadence::Monthly,
        SendCadence::Yearly,
    ];

    /// Nominal days between sends (same 30/365 convention as
    /// [`ReportPeriod::frequency_days`]).
    pub fn frequency_days(&self) -> u32 {
        match self {
            SendCadence::Daily => 1,
            SendCadence::Weekly => 7,
            SendCadence::Monthly => 30,
            SendCadence::Yearly => 365,
        }
    }
}

impl fmt::Display for SendCadence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SendCadence::Daily => write!(f, "1D"),
            SendCadence::Weekly => write!(f, "1W"),
            SendCadence::Monthly => write!(f, "1M"),
            SendCadence::Yearly => write!(f, "1Y"),
        }
    }
}

impl FromStr for SendCadence {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "1D" => Ok(SendCadence::Daily),
            "1W" => Ok(SendCadence::Weekly),
            "1M" => Ok(SendCadence::Monthly),
            "1Y" => Ok(SendCadence::Yearly),
            other => Err(format!("unknown send cadence: '{}'", other)),
        }
    }
}

/// Persisted encoding of the cadence.
///
/// There is no native yearly preset; a `1Y` cadence is always persisted as
/// `CUSTOM` with every=12 `MONTH`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum IntervalPreset {
    #[serde(rename = "1D")]
    Daily,
    #[serde(rename = "1W")]
    Weekly,
    #[serde(rename = "1M")]
    Monthly,
    #[serde(rename = "CUSTOM")]
    Custom,
}

impl fmt::Display for IntervalPreset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IntervalPreset::Daily => write!(f, "1D"),
            IntervalPreset::Weekly => write!(f, "1W"),
            IntervalPreset::Monthly => write!(f, "1M"),
            IntervalPreset::Custom => write!(f, "CUSTOM"),
        }
    }
}

/// Unit of a custom interval.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum IntervalUnit {
    Day,
    Week,
    Month,
}

impl fmt::Display for IntervalUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IntervalUnit::Day => write!(f, "DAY"),
            IntervalUnit::Week => write!(f, "WEEK"),
            IntervalUnit::Month => write!(f, "MONTH"),
        }
    }
}

impl FromStr for IntervalUnit {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "DAY" => Ok(IntervalUnit::Day),
            "WEEK" => Ok(IntervalUnit::Week),
            "MONTH" => Ok(IntervalUnit::Month),
            other => Err(format!("unknown interval unit: '{}'", other)),
        }
    }
}

// ── Records ─────────────────────────────────────────────────────────

/// Custom every/unit pair, present on a schedule iff the preset is `CUSTOM`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomInterval {
    pub every: u32,
    pub unit: IntervalUnit,
}

impl CustomInterval {
    /// The yearly encoding: every 12 months.
    pub const YEARLY: CustomInterval = CustomInterval {
        every: 12,
        unit: IntervalUnit::Month,
    };

    /// The daily encoding: every 1 day.
    pub const DAILY: CustomInterval = CustomInterval {
        every: 1,
        unit: IntervalUnit::Day,
    };
}

/// Time-of-day (and day-of-week/month) a schedule fires.
///
/// `day_of_week` is 0=Sunday..6=Saturday and present iff the effective
/// cadence is weekly; `day_of_month` is 1–31 and present iff it is monthly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeSpec {
    pub hour: u8,
    pub minute: u8,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub day_of_week: Option<u8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub day_of_month: Option<u8>,
}

/// Who receives the mail: opaque mail-group ids plus individual addresses.
///
/// On a canonical schedule the emails are lower-cased, trimmed, deduplicated
/// and sorted. Invariant: the union is non-empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recipients {
    #[serde(default)]
    pub mail_group_ids: Vec<String>,
    #[serde(default)]
    pub emails: Vec<String>,
}

impl Recipients {
    pub fn is_empty(&self) -> bool {
        self.mail_group_ids.is_empty() && self.emails.is_empty()
    }
}

/// An unvalidated, caller-assembled candidate schedule.
///
/// Either `cadence` (the UI selection) or the raw `interval_preset`/`custom`
/// pair may be supplied; the normalizer resolves both paths to the same
/// canonical shape.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScheduleDraft {
    #[serde(default)]
    pub report_types: Vec<ReportType>,
    #[serde(default)]
    pub period: Option<ReportPeriod>,
    #[serde(default)]
    pub cadence: Option<SendCadence>,
    #[serde(default)]
    pub interval_preset: Option<IntervalPreset>,
    #[serde(default)]
    pub custom: Option<CustomInterval>,
    #[serde(default)]
    pub hour: Option<u8>,
    #[serde(default)]
    pub minute: Option<u8>,
    #[serde(default)]
    pub day_of_week: Option<u8>,
    #[serde(default)]
    pub day_of_month: Option<u8>,
    #[serde(default)]
    pub mail_group_ids: Vec<String>,
    #[serde(default)]
    pub emails: Vec<String>,
}

/// Canonical persisted schedule, only ever produced by the normalizer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AutoMailSchedule {
    /// Store-assigned id; `None` for an unsaved draft result.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Storage shape is plural, but the normalizer enforces exactly one.
    pub report_types: Vec<ReportType>,
    pub report_period: ReportPeriod,
    pub recipients: Recipients,
    pub interval_preset: IntervalPreset,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom: Option<CustomInterval>,
    pub time: TimeSpec,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl AutoMailSchedule {
    /// Project a canonical schedule back into a draft.
    ///
    /// Uses the raw-preset path rather than guessing a UI cadence, so
    /// re-normalizing the draft yields a value equal to `self` (minus
    /// id/timestamps, which the normalizer never assigns).
    pub fn to_draft(&self) -> ScheduleDraft {
        ScheduleDraft {
            report_types: self.report_types.clone(),
            period: Some(self.report_period),
            cadence: None,
            interval_preset: Some(self.interval_preset),
            custom: self.custom,
            hour: Some(self.time.hour),
            minute: Some(self.time.minute),
            day_of_week: self.time.day_of_week,
            day_of_month: self.time.day_of_month,
            mail_group_ids: self.recipients.mail_group_ids.clone(),
            emails: self.recipients.emails.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn enum_wire_spellings() {
        assert_eq!(
            serde_json::to_string(&ReportType::MissingTargets).unwrap(),
            "\"MISSING_TARGETS\""
        );
        assert_eq!(serde_json::to_string(&ReportPeriod::Weekly).unwrap(), "\"weekly\"");
        assert_eq!(serde_json::to_string(&SendCadence::Yearly).unwrap(), "\"1Y\"");
        assert_eq!(serde_json::to_string(&IntervalPreset::Custom).unwrap(), "\"CUSTOM\"");
        assert_eq!(serde_json::to_string(&IntervalUnit::Month).unwrap(), "\"MONTH\"");
    }

    #[test]
    fn from_str_round_trips_display() {
        for t in ReportType::ALL {
            assert_eq!(t.to_string().parse::<ReportType>().unwrap(), t);
        }
        for p in ReportPeriod::ALL {
            assert_eq!(p.to_string().parse::<ReportPeriod>().unwrap(), p);
        }
        for c in SendCadence::ALL {
            assert_eq!(c.to_string().parse::<SendCadence>().unwrap(), c);
        }
    }

    #[test]
    fn nominal_frequency_days() {
        assert_eq!(ReportPeriod::Monthly.frequency_days(), 30);
        assert_eq!(ReportPeriod::Yearly.frequency_days(), 365);
        assert_eq!(SendCadence::Monthly.frequency_days(), 30);
        assert_eq!(SendCadence::Yearly.frequency_days(), 365);
    }

    #[test]
    fn schedule_json_omits_absent_fields() {
        let schedule = AutoMailSchedule {
            id: None,
            report_types: vec![ReportType::Targets],
            report_period: ReportPeriod::Daily,
            recipients: Recipients {
                mail_group_ids: vec!["g1".to_string()],
                emails: vec![],
            },
            interval_preset: IntervalPreset::Daily,
            custom: None,
            time: TimeSpec {
                hour: 7,
                minute: 0,
                day_of_week: None,
                day_of_month: None,
            },
            created_at: None,
            updated_at: None,
        };
        let json = serde_json::to_string(&schedule).unwrap();
        assert!(!json.contains("\"id\""));
        assert!(!json.contains("\"custom\""));
        assert!(!json.contains("day_of_week"));
    }
}
