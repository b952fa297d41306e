//! Persistence for auto-mail schedules and read-only directory lookups.
//!
//! The rule engine never calls a store itself; callers pipe
//! `normalize_schedule` output into [`ScheduleStore`]. [`JsonScheduleStore`]
//! is the reference implementation: one JSON file per schedule with atomic
//! tmp-then-rename writes and an in-memory mirror.

pub mod directory;
mod json;

pub use directory::{Directory, DirectoryUser, MailGroup};
pub use json::{JsonScheduleStore, LoadOutcome};

use automail_core::{AutoMailSchedule, ScheduleError};

/// Errors from store and directory operations.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// Filesystem I/O error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON (de)serialization error.
    #[error("JSON error: {0}")]
    Serialize(#[from] serde_json::Error),

    /// No persisted schedule with the given id.
    #[error("schedule not found: {0}")]
    NotFound(String),

    /// Malformed persisted data (e.g. a schedule file without an id).
    #[error("storage error: {0}")]
    Storage(String),

    /// The record failed schedule re-validation.
    #[error("invalid schedule: {0}")]
    Invalid(#[from] ScheduleError),
}

/// Result alias for store operations.
pub type Result<T> = std::result::Result<T, StoreError>;

/// CRUD over persisted schedules, addressed by opaque id.
///
/// Implementations own the persisted copy and must serialize concurrent
/// single-record writes (last-writer-wins is acceptable). Records are only
/// ever replaced whole; there is no partial in-place mutation.
pub trait ScheduleStore {
    /// All persisted schedules, in unspecified order.
    fn list(&self) -> Result<Vec<AutoMailSchedule>>;

    /// Fetch one schedule by id.
    fn get(&self, id: &str) -> Result<AutoMailSchedule>;

    /// Persist a schedule, assigning an id if it has none.
    ///
    /// Returns the stored copy (id and timestamps filled in).
    fn upsert(&self, schedule: AutoMailSchedule) -> Result<AutoMailSchedule>;

    /// Replace the record with the given id wholesale.
    ///
    /// Preserves `created_at`, refreshes `updated_at`.
    fn update(&self, id: &str, schedule: AutoMailSchedule) -> Result<AutoMailSchedule>;

    /// Delete by id.
    fn delete(&self, id: &str) -> Result<()>;
}
