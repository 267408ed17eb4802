//! System-wide record counts.

use serde::Serialize;

use schoolmark_core::repository::Repository;

/// Record counts in the fixed reporting order.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct SystemStats {
    pub users: usize,
    pub schools: usize,
    pub ratings: usize,
    pub comments: usize,
}

impl SystemStats {
    pub fn collect(repo: &Repository) -> Self {
        let (users, schools, ratings, comments) = repo.counts();
        SystemStats {
            users,
            schools,
            ratings,
            comments,
        }
    }
}

/// Render the statistics block: a header, then the four counts.
///
/// The order Users, Schools, Ratings, Comments is an observable contract,
/// not a display preference.
pub fn render_system_stats(repo: &Repository) -> String {
    let stats = SystemStats::collect(repo);
    let mut out = String::new();
    out.push_str("=== System Statistics ===\n");
    out.push_str(&format!("Users: {}\n", stats.users));
    out.push_str(&format!("Schools: {}\n", stats.schools));
    out.push_str(&format!("Ratings: {}\n", stats.ratings));
    out.push_str(&format!("Comments: {}\n", stats.comments));
    out
}
