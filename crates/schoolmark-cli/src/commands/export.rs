//! The `schoolmark export` command.

use std::path::{Path, PathBuf};

use anyhow::Result;

use schoolmark_report::text::export_top_schools_report;

use super::Session;

pub fn execute(
    data_path: &Path,
    out: Option<PathBuf>,
    report_dir: &Path,
    limit: usize,
) -> Result<()> {
    let session = Session::open(data_path)?;

    let path = out.unwrap_or_else(|| {
        let timestamp = chrono::Utc::now().format("%Y-%m-%dT%H%M%S");
        report_dir.join(format!("top-schools-{timestamp}.txt"))
    });

    export_top_schools_report(&session.repo, &path, limit)?;
    println!("Report saved to: {}", path.display());
    Ok(())
}
