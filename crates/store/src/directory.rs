//! Read-only mail-group and user lookups.
//!
//! The rule engine treats group ids and emails as opaque strings; this module
//! exists for callers that assemble draft recipients from a user selection
//! (e.g. the CLI's `--user` flag).

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::Result;

/// A named group of member email addresses.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MailGroup {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub members: Vec<String>,
}

/// A directory user with a display name and primary email.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DirectoryUser {
    pub id: String,
    pub display_name: String,
    pub email: String,
}

/// In-memory snapshot of the mail-group and user directories.
pub struct Directory {
    groups: HashMap<String, MailGroup>,
    users: HashMap<String, DirectoryUser>,
}

impl Directory {
    /// Load both directories from JSON array files.
    ///
    /// A missing file is treated as an empty directory with a warning, not
    /// an error, so the engine stays usable without directory data.
    pub fn load(groups_path: &Path, users_path: &Path) -> Result<Self> {
        let groups: Vec<MailGroup> = load_array(groups_path)?;
        let users: Vec<DirectoryUser> = load_array(users_path)?;
        Ok(Self {
            groups: groups.into_iter().map(|g| (g.id.clone(), g)).collect(),
            users: users.into_iter().map(|u| (u.id.clone(), u)).collect(),
        })
    }

    pub fn mail_group(&self, id: &str) -> Option<&MailGroup> {
        self.groups.get(id)
    }

    pub fn user(&self, id: &str) -> Option<&DirectoryUser> {
        self.users.get(id)
    }

    /// Resolve user ids to their emails; unknown ids are skipped with a
    /// warning (the normalizer decides whether what remains is enough).
    pub fn resolve_emails(&self, user_ids: &[String]) -> Vec<String> {
        user_ids
            .iter()
            .filter_map(|id| match self.users.get(id) {
                Some(u) => Some(u.email.clone()),
                None => {
                    warn!(user_id = %id, "unknown user id in recipient selection");
                    None
                }
            })
            .collect()
    }
}

fn load_array<T: serde::de::DeserializeOwned>(path: &Path) -> Result<Vec<T>> {
    if !path.exists() {
        warn!(path = %path.display(), "directory file missing, treating as empty");
        return Ok(Vec::new());
    }
    let contents = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&contents)?)
}
