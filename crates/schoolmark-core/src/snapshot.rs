//! Point-in-time snapshot persistence with crash-safe JSON writes.
//!
//! A [`Snapshot`] is a complete copy of every record store. Saving goes
//! write-temp-then-rename so the target file is never left partially
//! written; loading validates the document before any store is touched,
//! then restores by clear-and-replace, never by merge.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::de::Deserializer;
use serde::{Deserialize, Serialize};

use crate::model::{Comment, Favourite, Rating, School, SchoolId, User};
use crate::repository::Repository;

/// A complete point-in-time copy of the record stores.
///
/// The JSON document requires `users`, `schools`, `ratings`, and `comments`
/// at the top level; `favourites` is optional so files written before
/// favourites existed still load.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Snapshot {
    pub users: Vec<User>,
    pub schools: Vec<School>,
    pub ratings: Vec<Rating>,
    pub comments: Vec<SnapshotComment>,
    #[serde(default, deserialize_with = "lenient_favourites")]
    pub favourites: Vec<Favourite>,
}

/// Wire form of a comment: the timestamp travels as an ISO-8601 string
/// or null, and anything else collapses to null rather than failing the
/// whole load.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SnapshotComment {
    pub user_id: u32,
    pub school_id: SchoolId,
    pub text: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub created_at: Option<String>,
}

impl From<&Comment> for SnapshotComment {
    fn from(comment: &Comment) -> Self {
        SnapshotComment {
            user_id: comment.user_id,
            school_id: comment.school_id.clone(),
            text: comment.text.clone(),
            created_at: comment.created_at.map(|at| at.to_rfc3339()),
        }
    }
}

impl SnapshotComment {
    /// Back to the in-memory form. Unparsable timestamps become `None`.
    fn to_comment(&self) -> Comment {
        let created_at = self
            .created_at
            .as_deref()
            .and_then(|s| DateTime::parse_from_rfc3339(s).ok())
            .map(|at| at.with_timezone(&Utc));
        Comment {
            user_id: self.user_id,
            school_id: self.school_id.clone(),
            text: self.text.clone(),
            created_at,
        }
    }
}

impl Snapshot {
    /// Copy every store out of the repository.
    pub fn capture(repo: &Repository) -> Self {
        Snapshot {
            users: repo.users.clone(),
            schools: repo.schools.clone(),
            ratings: repo.ratings.clone(),
            comments: repo.comments.iter().map(SnapshotComment::from).collect(),
            favourites: repo.favourites.clone(),
        }
    }

    /// Write the snapshot to `path` atomically.
    ///
    /// The document lands in `<path>.tmp` first and is renamed onto the
    /// target, so a failure at any earlier step leaves the previous file
    /// untouched. Parent directories are created as needed.
    pub fn save(&self, path: &Path) -> Result<()> {
        let json =
            serde_json::to_string_pretty(self).context("failed to serialize snapshot")?;

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).with_context(|| {
                    format!("failed to create snapshot directory {}", parent.display())
                })?;
            }
        }

        let tmp = temp_path(path);
        if let Err(e) = fs::write(&tmp, &json) {
            tracing::error!(path = %tmp.display(), error = %e, "snapshot write failed");
            let _ = fs::remove_file(&tmp);
            return Err(e).with_context(|| format!("failed to write {}", tmp.display()));
        }
        if let Err(e) = fs::rename(&tmp, path) {
            tracing::error!(path = %path.display(), error = %e, "snapshot rename failed");
            let _ = fs::remove_file(&tmp);
            return Err(e)
                .with_context(|| format!("failed to move snapshot onto {}", path.display()));
        }

        tracing::info!(path = %path.display(), "snapshot saved");
        Ok(())
    }

    /// Read and validate a snapshot file.
    ///
    /// Fails fast when the file is absent and when any of the four
    /// required keys is missing. No store is touched on failure; callers
    /// only mutate state via [`Snapshot::restore`] afterwards.
    pub fn load(path: &Path) -> Result<Self> {
        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) => {
                tracing::error!(path = %path.display(), error = %e, "snapshot read failed");
                return Err(e)
                    .with_context(|| format!("failed to read snapshot from {}", path.display()));
            }
        };
        let snapshot: Snapshot = match serde_json::from_str(&content) {
            Ok(snapshot) => snapshot,
            Err(e) => {
                tracing::error!(path = %path.display(), error = %e, "snapshot parse failed");
                return Err(e).context("failed to parse snapshot JSON");
            }
        };
        tracing::info!(path = %path.display(), "snapshot loaded");
        Ok(snapshot)
    }

    /// Clear and replace every collection in the repository.
    pub fn restore(&self, repo: &mut Repository) {
        repo.users = self.users.clone();
        repo.schools = self.schools.clone();
        repo.ratings = self.ratings.clone();
        repo.comments = self.comments.iter().map(SnapshotComment::to_comment).collect();
        repo.favourites = self.favourites.clone();
    }
}

fn temp_path(path: &Path) -> PathBuf {
    let mut name = path.as_os_str().to_os_string();
    name.push(".tmp");
    PathBuf::from(name)
}

/// Keep string values, collapse everything else (numbers, objects, null)
/// to `None` instead of failing the load.
fn lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(match value {
        serde_json::Value::String(s) => Some(s),
        _ => None,
    })
}

/// A `favourites` key that is not a well-formed list reads as empty.
fn lenient_favourites<'de, D>(deserializer: D) -> Result<Vec<Favourite>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).unwrap_or_default())
}
