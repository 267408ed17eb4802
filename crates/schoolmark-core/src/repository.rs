//! In-memory record stores.
//!
//! [`Repository`] owns one typed collection per record kind and is passed by
//! reference into the aggregation and snapshot layers. All lookups are
//! linear scans; there is no indexing and no transaction boundary across
//! mutations. One instance per session (or per test).

use chrono::{DateTime, Utc};

use crate::error::ValidationError;
use crate::model::{
    Comment, Favourite, Rating, Role, School, SchoolId, SchoolLevel, User, MAX_COMMENT_LEN,
    RATING_RANGE,
};

/// The process-wide record stores.
#[derive(Debug, Default, Clone)]
pub struct Repository {
    pub users: Vec<User>,
    pub schools: Vec<School>,
    pub ratings: Vec<Rating>,
    pub comments: Vec<Comment>,
    pub favourites: Vec<Favourite>,
}

impl Repository {
    pub fn new() -> Self {
        Self::default()
    }

    // --- users ---

    /// Register a user. Usernames are unique, case-insensitive.
    pub fn add_user(
        &mut self,
        username: &str,
        password: &str,
        role: Role,
    ) -> Result<&User, ValidationError> {
        let username = username.trim();
        if username.is_empty() {
            return Err(ValidationError::EmptyField("username"));
        }
        if self
            .users
            .iter()
            .any(|u| u.username.eq_ignore_ascii_case(username))
        {
            return Err(ValidationError::DuplicateUsername(username.to_string()));
        }

        let id = self.users.iter().map(|u| u.id).max().unwrap_or(0) + 1;
        let idx = self.users.len();
        self.users.push(User {
            id,
            username: username.to_string(),
            password: password.to_string(),
            role,
        });
        Ok(&self.users[idx])
    }

    pub fn user_by_id(&self, id: u32) -> Option<&User> {
        self.users.iter().find(|u| u.id == id)
    }

    pub fn user_by_name(&self, username: &str) -> Option<&User> {
        self.users
            .iter()
            .find(|u| u.username.eq_ignore_ascii_case(username.trim()))
    }

    /// Remove a user account. Admin-only, and admin accounts themselves
    /// cannot be removed. Review records authored by the user stay put.
    pub fn delete_user(&mut self, actor: &User, user_id: u32) -> Result<(), ValidationError> {
        if !actor.role.is_admin() {
            return Err(ValidationError::NotPermitted("only admins delete users"));
        }
        let target = self
            .user_by_id(user_id)
            .ok_or(ValidationError::UnknownUser(user_id))?;
        if target.role.is_admin() {
            return Err(ValidationError::AdminUndeletable);
        }
        tracing::info!(user_id, "deleting user");
        self.users.retain(|u| u.id != user_id);
        Ok(())
    }

    // --- schools ---

    /// Add a school. The (name, location) pair is unique, compared
    /// case-insensitively on trimmed values.
    pub fn add_school(
        &mut self,
        name: &str,
        level: SchoolLevel,
        location: &str,
    ) -> Result<&School, ValidationError> {
        let name = name.trim();
        let location = location.trim();
        if name.is_empty() {
            return Err(ValidationError::EmptyField("school name"));
        }
        if location.is_empty() {
            return Err(ValidationError::EmptyField("location"));
        }
        if self.schools.iter().any(|s| {
            s.name.eq_ignore_ascii_case(name) && s.location.eq_ignore_ascii_case(location)
        }) {
            return Err(ValidationError::DuplicateSchool {
                name: name.to_string(),
                location: location.to_string(),
            });
        }

        let id = self.schools.iter().map(|s| s.id).max().unwrap_or(0) + 1;
        let idx = self.schools.len();
        self.schools.push(School {
            id,
            name: name.to_string(),
            level,
            location: location.to_string(),
        });
        Ok(&self.schools[idx])
    }

    pub fn school_by_id(&self, id: &SchoolId) -> Option<&School> {
        self.schools.iter().find(|s| s.sid() == *id)
    }

    // --- ratings ---

    /// Record a rating. A repeat submission for the same (user, school)
    /// pair replaces the stored value; exactly one record ever exists.
    pub fn set_rating(
        &mut self,
        user_id: u32,
        school_id: &SchoolId,
        value: u8,
    ) -> Result<(), ValidationError> {
        if self.school_by_id(school_id).is_none() {
            return Err(ValidationError::UnknownSchool(school_id.clone()));
        }
        if !RATING_RANGE.contains(&value) {
            return Err(ValidationError::RatingOutOfRange(value));
        }

        if let Some(existing) = self
            .ratings
            .iter_mut()
            .find(|r| r.user_id == user_id && r.school_id == *school_id)
        {
            tracing::debug!(user_id, %school_id, value, "updating existing rating");
            existing.value = value;
        } else {
            self.ratings.push(Rating {
                user_id,
                school_id: school_id.clone(),
                value,
            });
        }
        Ok(())
    }

    pub fn ratings_for(&self, school_id: &SchoolId) -> Vec<&Rating> {
        self.ratings
            .iter()
            .filter(|r| r.school_id == *school_id)
            .collect()
    }

    // --- comments ---

    /// Append a comment. No uniqueness constraint; text is trimmed and
    /// capped at [`MAX_COMMENT_LEN`] characters.
    pub fn add_comment(
        &mut self,
        user_id: u32,
        school_id: &SchoolId,
        text: &str,
        at: DateTime<Utc>,
    ) -> Result<(), ValidationError> {
        if self.school_by_id(school_id).is_none() {
            return Err(ValidationError::UnknownSchool(school_id.clone()));
        }
        let text = validate_comment_text(text)?;
        self.comments.push(Comment {
            user_id,
            school_id: school_id.clone(),
            text,
            created_at: Some(at),
        });
        Ok(())
    }

    /// Rewrite a comment body. The timestamp is overwritten with the edit
    /// time; the record does not keep its original creation instant.
    pub fn edit_comment(
        &mut self,
        actor: &User,
        index: usize,
        text: &str,
        at: DateTime<Utc>,
    ) -> Result<(), ValidationError> {
        let text = validate_comment_text(text)?;
        let comment = self
            .comments
            .get_mut(index)
            .ok_or(ValidationError::UnknownComment(index))?;
        if comment.user_id != actor.id && !actor.role.is_admin() {
            return Err(ValidationError::NotPermitted("edit someone else's comment"));
        }
        comment.text = text;
        comment.created_at = Some(at);
        Ok(())
    }

    /// Remove a comment by store position. Owners delete their own;
    /// admins delete any.
    pub fn delete_comment(&mut self, actor: &User, index: usize) -> Result<(), ValidationError> {
        let comment = self
            .comments
            .get(index)
            .ok_or(ValidationError::UnknownComment(index))?;
        if comment.user_id != actor.id && !actor.role.is_admin() {
            return Err(ValidationError::NotPermitted(
                "delete someone else's comment",
            ));
        }
        self.comments.remove(index);
        Ok(())
    }

    pub fn comments_for(&self, school_id: &SchoolId) -> Vec<&Comment> {
        self.comments
            .iter()
            .filter(|c| c.school_id == *school_id)
            .collect()
    }

    // --- favourites ---

    /// Bookmark a school. Idempotent: a repeat add returns the record that
    /// is already stored instead of duplicating it.
    pub fn add_favourite(
        &mut self,
        user_id: u32,
        school_id: &SchoolId,
        at: DateTime<Utc>,
    ) -> Result<&Favourite, ValidationError> {
        if self.school_by_id(school_id).is_none() {
            return Err(ValidationError::UnknownSchool(school_id.clone()));
        }
        if let Some(idx) = self
            .favourites
            .iter()
            .position(|f| f.user_id == user_id && f.school_id == *school_id)
        {
            return Ok(&self.favourites[idx]);
        }
        let idx = self.favourites.len();
        self.favourites.push(Favourite {
            user_id,
            school_id: school_id.clone(),
            created_at: at,
        });
        Ok(&self.favourites[idx])
    }

    pub fn favourites_for(&self, user_id: u32) -> Vec<&Favourite> {
        self.favourites
            .iter()
            .filter(|f| f.user_id == user_id)
            .collect()
    }

    /// Store sizes in the fixed reporting order:
    /// users, schools, ratings, comments.
    pub fn counts(&self) -> (usize, usize, usize, usize) {
        (
            self.users.len(),
            self.schools.len(),
            self.ratings.len(),
            self.comments.len(),
        )
    }
}

fn validate_comment_text(text: &str) -> Result<String, ValidationError> {
    let text = text.trim();
    if text.is_empty() {
        return Err(ValidationError::EmptyField("comment"));
    }
    let len = text.chars().count();
    if len > MAX_COMMENT_LEN {
        return Err(ValidationError::CommentTooLong(len, MAX_COMMENT_LEN));
    }
    Ok(text.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seeded() -> Repository {
        let mut repo = Repository::new();
        repo.add_user("admin", "pw", Role::Admin).unwrap();
        repo.add_user("casey", "pw", Role::Student).unwrap();
        repo.add_school("Northgate", SchoolLevel::Primary, "Leeds")
            .unwrap();
        repo
    }

    fn admin(repo: &Repository) -> User {
        repo.user_by_name("admin").unwrap().clone()
    }

    #[test]
    fn usernames_are_unique_case_insensitively() {
        let mut repo = seeded();
        let err = repo.add_user("CASEY", "pw", Role::Student).unwrap_err();
        assert_eq!(err, ValidationError::DuplicateUsername("CASEY".into()));
        assert!(repo.add_user("  ", "pw", Role::Student).is_err());
    }

    #[test]
    fn user_ids_allocate_from_current_max() {
        let mut repo = seeded();
        let actor = admin(&repo);
        repo.delete_user(&actor, 2).unwrap();
        let user = repo.add_user("drew", "pw", Role::Student).unwrap();
        assert_eq!(user.id, 2);
    }

    #[test]
    fn delete_user_guards() {
        let mut repo = seeded();
        let student = repo.user_by_name("casey").unwrap().clone();
        let actor = admin(&repo);

        assert!(repo.delete_user(&student, 1).unwrap_err().is_permission());
        assert_eq!(
            repo.delete_user(&actor, 1).unwrap_err(),
            ValidationError::AdminUndeletable
        );
        assert_eq!(
            repo.delete_user(&actor, 99).unwrap_err(),
            ValidationError::UnknownUser(99)
        );
        repo.delete_user(&actor, 2).unwrap();
        assert!(repo.user_by_id(2).is_none());
    }

    #[test]
    fn school_pairs_are_unique_trimmed_case_insensitively() {
        let mut repo = seeded();
        let err = repo
            .add_school("  northgate ", SchoolLevel::Secondary, " LEEDS ")
            .unwrap_err();
        assert!(matches!(err, ValidationError::DuplicateSchool { .. }));
        // same name elsewhere is fine
        repo.add_school("Northgate", SchoolLevel::Primary, "York")
            .unwrap();
        assert_eq!(repo.schools.len(), 2);
    }

    #[test]
    fn rating_upserts_to_a_single_record() {
        let mut repo = seeded();
        let sid = SchoolId::from(1u32);
        repo.set_rating(2, &sid, 3).unwrap();
        repo.set_rating(2, &sid, 5).unwrap();

        assert_eq!(repo.ratings.len(), 1);
        assert_eq!(repo.ratings[0].value, 5);
    }

    #[test]
    fn rating_rejects_out_of_range_and_unknown_school() {
        let mut repo = seeded();
        let sid = SchoolId::from(1u32);
        assert_eq!(
            repo.set_rating(2, &sid, 0).unwrap_err(),
            ValidationError::RatingOutOfRange(0)
        );
        assert_eq!(
            repo.set_rating(2, &sid, 6).unwrap_err(),
            ValidationError::RatingOutOfRange(6)
        );
        let missing = SchoolId::from(99u32);
        assert!(matches!(
            repo.set_rating(2, &missing, 3).unwrap_err(),
            ValidationError::UnknownSchool(_)
        ));
    }

    #[test]
    fn comment_length_limit_counts_chars() {
        let mut repo = seeded();
        let sid = SchoolId::from(1u32);
        let long = "x".repeat(MAX_COMMENT_LEN + 1);
        assert_eq!(
            repo.add_comment(2, &sid, &long, Utc::now()).unwrap_err(),
            ValidationError::CommentTooLong(MAX_COMMENT_LEN + 1, MAX_COMMENT_LEN)
        );
        let exactly = "y".repeat(MAX_COMMENT_LEN);
        repo.add_comment(2, &sid, &exactly, Utc::now()).unwrap();
        assert_eq!(repo.comments.len(), 1);
    }

    #[test]
    fn comment_edit_overwrites_timestamp() {
        let mut repo = seeded();
        let sid = SchoolId::from(1u32);
        let t0 = "2024-01-01T10:00:00Z".parse().unwrap();
        let t1 = "2024-06-01T10:00:00Z".parse().unwrap();
        repo.add_comment(2, &sid, "good school", t0).unwrap();

        let casey = repo.user_by_name("casey").unwrap().clone();
        repo.edit_comment(&casey, 0, "great school", t1).unwrap();

        assert_eq!(repo.comments[0].text, "great school");
        assert_eq!(repo.comments[0].created_at, Some(t1));
    }

    #[test]
    fn comment_delete_respects_ownership() {
        let mut repo = seeded();
        let sid = SchoolId::from(1u32);
        repo.add_comment(1, &sid, "by admin", Utc::now()).unwrap();
        let casey = repo.user_by_name("casey").unwrap().clone();

        assert!(repo.delete_comment(&casey, 0).unwrap_err().is_permission());
        let actor = admin(&repo);
        repo.delete_comment(&actor, 0).unwrap();
        assert!(repo.comments.is_empty());
        assert_eq!(
            repo.delete_comment(&actor, 0).unwrap_err(),
            ValidationError::UnknownComment(0)
        );
    }

    #[test]
    fn favourite_add_is_idempotent() {
        let mut repo = seeded();
        let sid = SchoolId::from(1u32);
        let t0 = "2024-01-01T10:00:00Z".parse().unwrap();
        let first = repo.add_favourite(2, &sid, t0).unwrap().clone();
        let second = repo.add_favourite(2, &sid, Utc::now()).unwrap().clone();

        assert_eq!(repo.favourites.len(), 1);
        // the second call hands back the original record, not a new stamp
        assert_eq!(second.created_at, first.created_at);
    }

    #[test]
    fn counts_follow_reporting_order() {
        let mut repo = seeded();
        let sid = SchoolId::from(1u32);
        repo.set_rating(2, &sid, 4).unwrap();
        repo.add_comment(2, &sid, "fine", Utc::now()).unwrap();
        assert_eq!(repo.counts(), (2, 1, 1, 1));
    }
}
