//! Derived rankings, averages, and activity scores.
//!
//! Everything here is a pure read over [`Repository`], recomputed on demand.
//! Nothing is cached, so a score can never go stale against the stores.

use std::cmp::Ordering;

use serde::Serialize;

use crate::model::{School, SchoolId, SchoolLevel};
use crate::repository::Repository;

/// Leaderboards show this many schools per level unless told otherwise.
pub const DEFAULT_TOP_LIMIT: usize = 3;

/// A school paired with its computed average rating.
///
/// `average` is 0.0 when no ratings exist; that sentinel belongs to
/// ranking contexts only. Single-school views use [`average_rating`]
/// directly so they can tell "no data" apart from zero.
#[derive(Debug, Clone, Serialize)]
pub struct RankedSchool {
    pub school: School,
    pub average: f64,
}

/// All ranked schools of one level, best first.
#[derive(Debug, Clone, Serialize)]
pub struct LevelRanking {
    pub level: SchoolLevel,
    pub entries: Vec<RankedSchool>,
}

/// A school paired with its flat activity score.
#[derive(Debug, Clone, Serialize)]
pub struct TrendingEntry {
    pub school: School,
    /// Rating count plus comment count; no recency weighting.
    pub score: usize,
}

/// A user ranked by authored ratings plus comments.
#[derive(Debug, Clone, Serialize)]
pub struct Contributor {
    pub user_id: u32,
    pub username: String,
    pub total: usize,
}

/// Mean rating for a school, or `None` when it has no ratings at all.
pub fn average_rating(repo: &Repository, school_id: &SchoolId) -> Option<f64> {
    let values: Vec<u8> = repo
        .ratings
        .iter()
        .filter(|r| r.school_id == *school_id)
        .map(|r| r.value)
        .collect();
    if values.is_empty() {
        return None;
    }
    let sum: u32 = values.iter().map(|&v| u32::from(v)).sum();
    Some(f64::from(sum) / values.len() as f64)
}

/// Group schools by level (levels appear in first-seen order) and sort each
/// group by descending average. The sort is stable: schools with equal
/// averages keep their insertion order, with no secondary tie-break key.
pub fn rankings(repo: &Repository) -> Vec<LevelRanking> {
    let mut groups: Vec<LevelRanking> = Vec::new();
    for school in &repo.schools {
        let average = average_rating(repo, &school.sid()).unwrap_or(0.0);
        let entry = RankedSchool {
            school: school.clone(),
            average,
        };
        match groups.iter_mut().find(|g| g.level == school.level) {
            Some(group) => group.entries.push(entry),
            None => groups.push(LevelRanking {
                level: school.level,
                entries: vec![entry],
            }),
        }
    }
    for group in &mut groups {
        group
            .entries
            .sort_by(|a, b| b.average.partial_cmp(&a.average).unwrap_or(Ordering::Equal));
    }
    groups
}

/// Same grouping and ordering as [`rankings`], truncated to `limit` entries
/// per level. Groups smaller than the limit are shown whole.
pub fn top_schools(repo: &Repository, limit: usize) -> Vec<LevelRanking> {
    let mut groups = rankings(repo);
    for group in &mut groups {
        group.entries.truncate(limit);
    }
    groups
}

/// Flat activity count for one school: ratings plus comments.
pub fn activity_score(repo: &Repository, school_id: &SchoolId) -> usize {
    let ratings = repo
        .ratings
        .iter()
        .filter(|r| r.school_id == *school_id)
        .count();
    let comments = repo
        .comments
        .iter()
        .filter(|c| c.school_id == *school_id)
        .count();
    ratings + comments
}

/// Every school with its activity score, busiest first (stable order on
/// ties). Zero-score entries are included; rendering decides how to label
/// them.
pub fn trending(repo: &Repository) -> Vec<TrendingEntry> {
    let mut entries: Vec<TrendingEntry> = repo
        .schools
        .iter()
        .map(|school| TrendingEntry {
            score: activity_score(repo, &school.sid()),
            school: school.clone(),
        })
        .collect();
    entries.sort_by(|a, b| b.score.cmp(&a.score));
    entries
}

/// Users ranked by total authored ratings plus comments, descending, capped
/// at `limit`. Users with nothing authored are excluded.
pub fn top_contributors(repo: &Repository, limit: usize) -> Vec<Contributor> {
    let mut entries: Vec<Contributor> = repo
        .users
        .iter()
        .filter_map(|user| {
            let ratings = repo.ratings.iter().filter(|r| r.user_id == user.id).count();
            let comments = repo
                .comments
                .iter()
                .filter(|c| c.user_id == user.id)
                .count();
            let total = ratings + comments;
            (total > 0).then(|| Contributor {
                user_id: user.id,
                username: user.username.clone(),
                total,
            })
        })
        .collect();
    entries.sort_by(|a, b| b.total.cmp(&a.total));
    entries.truncate(limit);
    entries
}
