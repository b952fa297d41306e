//! Recurrence and eligibility rules for automatic report-mail schedules.
//!
//! This crate provides:
//! - Eligibility engine: which reporting periods a report type supports, and
//!   which send cadences are legal for a (type, period) pair
//! - Schedule normalizer: collapses a raw draft into the canonical persisted
//!   shape, or rejects it with a specific [`ScheduleError`]
//!
//! Everything here is pure and synchronous: static tables plus functions over
//! caller-supplied drafts. No I/O, no shared mutable state.
//!
//! [`ScheduleError`]: automail_core::ScheduleError

pub mod eligibility;
pub mod normalize;

pub use eligibility::{default_cadence_for_period, fallback_cadence, legal_cadences, legal_periods};
pub use normalize::normalize_schedule;

#[cfg(test)]
mod tests;
