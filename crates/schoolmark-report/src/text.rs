//! Text renderers for rankings, profiles, trending, and contributors.
//!
//! The exact message fragments here ("No schools available.", "No ratings
//! yet", "No recent activity", "No registered users found.", "No
//! contributions yet.") are observable outputs; tests assert on them.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use chrono::Utc;

use schoolmark_core::aggregate::{
    activity_score, average_rating, rankings, top_contributors, top_schools, trending,
    RankedSchool,
};
use schoolmark_core::model::{School, SchoolLevel};
use schoolmark_core::repository::Repository;

fn level_label(level: SchoolLevel) -> &'static str {
    match level {
        SchoolLevel::Primary => "Primary",
        SchoolLevel::Secondary => "Secondary",
        SchoolLevel::Combined => "Combined",
    }
}

fn school_line(rank: usize, entry: &RankedSchool) -> String {
    format!(
        "  {rank}. {} ({}) - Avg Rating: {:.2}\n",
        entry.school.name, entry.school.location, entry.average
    )
}

/// Full per-level rankings, levels in first-seen order, best school first.
/// Unrated schools show a 0.00 average in this context.
pub fn render_rankings(repo: &Repository) -> String {
    if repo.schools.is_empty() {
        return "No schools available.\n".to_string();
    }
    let mut out = String::new();
    for group in rankings(repo) {
        out.push_str(&format!("{} Schools:\n", level_label(group.level)));
        for (i, entry) in group.entries.iter().enumerate() {
            out.push_str(&school_line(i + 1, entry));
        }
        out.push('\n');
    }
    out
}

/// Per-level leaderboard truncated to `limit` entries per level.
pub fn render_top_schools(repo: &Repository, limit: usize) -> String {
    if repo.schools.is_empty() {
        return "No schools available.\n".to_string();
    }
    let mut out = String::new();
    for group in top_schools(repo, limit) {
        out.push_str(&format!("{} Schools:\n", level_label(group.level)));
        for (i, entry) in group.entries.iter().enumerate() {
            out.push_str(&school_line(i + 1, entry));
        }
        out.push('\n');
    }
    out
}

/// Single-school detail view. Unlike the ranking contexts, a school with
/// no ratings reads "No ratings yet" here rather than 0.00.
pub fn render_school_profile(repo: &Repository, school: &School) -> String {
    let mut out = String::new();
    out.push_str(&format!("{} ({})\n", school.name, school.location));
    out.push_str(&format!("Level: {}\n", school.level));

    match average_rating(repo, &school.sid()) {
        Some(avg) => out.push_str(&format!("Average rating: {avg:.2}\n")),
        None => out.push_str("Average rating: No ratings yet\n"),
    }

    let comments = repo.comments_for(&school.sid());
    out.push_str(&format!("Comments ({}):\n", comments.len()));
    for comment in comments {
        let stamp = comment
            .created_at
            .map(|at| at.format("%Y-%m-%d %H:%M").to_string())
            .unwrap_or_else(|| "undated".to_string());
        out.push_str(&format!("  [{stamp}] {}\n", comment.text));
    }

    out.push_str(&format!(
        "Activity score: {}\n",
        activity_score(repo, &school.sid())
    ));
    out
}

/// All schools by activity, busiest first. Zero-activity schools are
/// listed without a score.
pub fn render_trending(repo: &Repository) -> String {
    if repo.schools.is_empty() {
        return "No schools available.\n".to_string();
    }
    let mut out = String::new();
    out.push_str("Trending Schools:\n");
    for (i, entry) in trending(repo).iter().enumerate() {
        if entry.score == 0 {
            out.push_str(&format!(
                "  {}. {} ({}) - No recent activity\n",
                i + 1,
                entry.school.name,
                entry.school.location
            ));
        } else {
            out.push_str(&format!(
                "  {}. {} ({}) - activity: {}\n",
                i + 1,
                entry.school.name,
                entry.school.location,
                entry.score
            ));
        }
    }
    out
}

/// Contributor leaderboard. "No registered users found." and "No
/// contributions yet." are distinct states, both observable.
pub fn render_contributors(repo: &Repository, limit: usize) -> String {
    if repo.users.is_empty() {
        return "No registered users found.\n".to_string();
    }
    let entries = top_contributors(repo, limit);
    if entries.is_empty() {
        return "No contributions yet.\n".to_string();
    }
    let mut out = String::new();
    out.push_str("Top Contributors:\n");
    for (i, entry) in entries.iter().enumerate() {
        out.push_str(&format!(
            "  {}. {} - {} contribution{}\n",
            i + 1,
            entry.username,
            entry.total,
            if entry.total == 1 { "" } else { "s" }
        ));
    }
    out
}

/// Write the top-schools report to `path`, creating parent directories.
///
/// Refuses (and writes nothing) when no schools exist. I/O failures come
/// back as errors for the host to report; they are never fatal here.
pub fn export_top_schools_report(repo: &Repository, path: &Path, limit: usize) -> Result<()> {
    if repo.schools.is_empty() {
        anyhow::bail!("No schools available to export");
    }

    let mut report = String::new();
    report.push_str("Top Schools Report\n");
    report.push_str(&format!(
        "Generated: {}\n\n",
        Utc::now().format("%Y-%m-%d %H:%M:%S UTC")
    ));
    report.push_str(&render_top_schools(repo, limit));

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).with_context(|| {
                format!("failed to create report directory {}", parent.display())
            })?;
        }
    }
    fs::write(path, report)
        .with_context(|| format!("failed to write report to {}", path.display()))?;

    tracing::info!(path = %path.display(), "top schools report exported");
    Ok(())
}
