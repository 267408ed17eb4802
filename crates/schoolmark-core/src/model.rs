//! Core record types for schoolmark.
//!
//! These are the fundamental types the entire schoolmark system uses to
//! represent users, schools, and the review records attached to them.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Maximum length of a comment body, in characters.
pub const MAX_COMMENT_LEN: usize = 500;

/// Inclusive range of valid rating values.
pub const RATING_RANGE: std::ops::RangeInclusive<u8> = 1..=5;

/// What a user account is allowed to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Student,
}

impl Role {
    /// Returns `true` for accounts with administrative rights.
    pub fn is_admin(self) -> bool {
        matches!(self, Role::Admin)
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::Admin => write!(f, "admin"),
            Role::Student => write!(f, "student"),
        }
    }
}

impl FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "admin" => Ok(Role::Admin),
            "student" => Ok(Role::Student),
            other => Err(format!("unknown role: {other}")),
        }
    }
}

/// School tier used for grouping in rankings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SchoolLevel {
    Primary,
    Secondary,
    Combined,
}

impl fmt::Display for SchoolLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SchoolLevel::Primary => write!(f, "primary"),
            SchoolLevel::Secondary => write!(f, "secondary"),
            SchoolLevel::Combined => write!(f, "combined"),
        }
    }
}

impl FromStr for SchoolLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "primary" => Ok(SchoolLevel::Primary),
            "secondary" => Ok(SchoolLevel::Secondary),
            "combined" | "k-12" => Ok(SchoolLevel::Combined),
            other => Err(format!("unknown school level: {other}")),
        }
    }
}

/// Canonical school identifier used on the review side of every join.
///
/// `School.id` is numeric, but ratings, comments, and favourites store the
/// id in its string form. All joins go through this type so the coercion
/// happens in exactly one place.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SchoolId(String);

impl SchoolId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<u32> for SchoolId {
    fn from(id: u32) -> Self {
        SchoolId(id.to_string())
    }
}

impl From<&str> for SchoolId {
    fn from(s: &str) -> Self {
        SchoolId(s.trim().to_string())
    }
}

impl fmt::Display for SchoolId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A registered account.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    /// Unique numeric identifier.
    pub id: u32,
    /// Login name, unique across users.
    pub username: String,
    /// Stored as provided; hashing is the host application's concern.
    pub password: String,
    /// Account role.
    pub role: Role,
}

/// A school that can be rated and commented on.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct School {
    /// Unique numeric identifier.
    pub id: u32,
    /// Display name.
    pub name: String,
    /// Tier used for per-level rankings.
    pub level: SchoolLevel,
    /// Free-form location string; (name, location) pairs are unique.
    pub location: String,
}

impl School {
    /// The canonical id form used by ratings, comments, and favourites.
    pub fn sid(&self) -> SchoolId {
        SchoolId::from(self.id)
    }
}

/// A 1-5 star rating. At most one per (user, school) pair.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Rating {
    pub user_id: u32,
    pub school_id: SchoolId,
    /// Star value in 1..=5.
    pub value: u8,
}

/// A free-text review comment.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Comment {
    pub user_id: u32,
    pub school_id: SchoolId,
    /// Body text, at most [`MAX_COMMENT_LEN`] characters.
    pub text: String,
    /// Set on creation and overwritten on edit, so it reads as
    /// "last written" rather than "first written".
    pub created_at: Option<DateTime<Utc>>,
}

/// A bookmarked school. Unique per (user, school); adds are idempotent.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Favourite {
    pub user_id: u32,
    pub school_id: SchoolId,
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn role_display_and_parse() {
        assert_eq!(Role::Admin.to_string(), "admin");
        assert_eq!("student".parse::<Role>().unwrap(), Role::Student);
        assert_eq!("Admin".parse::<Role>().unwrap(), Role::Admin);
        assert!("teacher".parse::<Role>().is_err());
    }

    #[test]
    fn level_display_and_parse() {
        assert_eq!(SchoolLevel::Primary.to_string(), "primary");
        assert_eq!(
            "Secondary".parse::<SchoolLevel>().unwrap(),
            SchoolLevel::Secondary
        );
        assert_eq!(
            "k-12".parse::<SchoolLevel>().unwrap(),
            SchoolLevel::Combined
        );
        assert!("college".parse::<SchoolLevel>().is_err());
    }

    #[test]
    fn school_id_coerces_numeric_ids() {
        let school = School {
            id: 42,
            name: "Northgate".into(),
            level: SchoolLevel::Primary,
            location: "Leeds".into(),
        };
        assert_eq!(school.sid(), SchoolId::from("42"));
        assert_eq!(school.sid().as_str(), "42");
        assert_ne!(school.sid(), SchoolId::from("042"));
    }

    #[test]
    fn school_id_serializes_as_plain_string() {
        let id = SchoolId::from(7u32);
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"7\"");
        let back: SchoolId = serde_json::from_str("\"7\"").unwrap();
        assert_eq!(back, id);
    }

    #[test]
    fn rating_serde_roundtrip() {
        let rating = Rating {
            user_id: 1,
            school_id: SchoolId::from(3u32),
            value: 5,
        };
        let json = serde_json::to_string(&rating).unwrap();
        let back: Rating = serde_json::from_str(&json).unwrap();
        assert_eq!(back.school_id, rating.school_id);
        assert_eq!(back.value, 5);
    }
}
