//! Validation error types.
//!
//! Business-rule violations are returned as values, never panics, so the
//! host application can surface the message and keep running. The variants
//! carry enough structure for callers to branch without string matching.

use thiserror::Error;

use crate::model::SchoolId;

/// A rejected store mutation.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    /// The username is already taken.
    #[error("username '{0}' is already taken")]
    DuplicateUsername(String),

    /// A school with the same name and location already exists.
    #[error("school '{name}' in '{location}' already exists")]
    DuplicateSchool { name: String, location: String },

    /// A required text field was empty after trimming.
    #[error("{0} must not be empty")]
    EmptyField(&'static str),

    /// The rating value is outside 1..=5.
    #[error("rating must be between 1 and 5, got {0}")]
    RatingOutOfRange(u8),

    /// The comment body exceeds the length limit.
    #[error("comment is {0} characters, the limit is {1}")]
    CommentTooLong(usize, usize),

    /// No school with this id exists.
    #[error("no school with id {0}")]
    UnknownSchool(SchoolId),

    /// No user with this id exists.
    #[error("no user with id {0}")]
    UnknownUser(u32),

    /// No comment at this position.
    #[error("no comment at index {0}")]
    UnknownComment(usize),

    /// The acting user may not perform this operation.
    #[error("not permitted: {0}")]
    NotPermitted(&'static str),

    /// Admin accounts cannot be deleted.
    #[error("admin accounts cannot be deleted")]
    AdminUndeletable,
}

impl ValidationError {
    /// Returns `true` when the failure is about who asked, not what was asked.
    pub fn is_permission(&self) -> bool {
        matches!(
            self,
            ValidationError::NotPermitted(_) | ValidationError::AdminUndeletable
        )
    }
}
