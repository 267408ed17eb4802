//! The read-only view commands: rankings, top, trending, contributors, stats.

use std::path::Path;

use anyhow::Result;

use schoolmark_report::stats::render_system_stats;
use schoolmark_report::text::{
    render_contributors, render_rankings, render_top_schools, render_trending,
};

use super::Session;

pub fn rankings(data_path: &Path) -> Result<()> {
    let session = Session::open(data_path)?;
    print!("{}", render_rankings(&session.repo));
    Ok(())
}

pub fn top(data_path: &Path, limit: usize) -> Result<()> {
    let session = Session::open(data_path)?;
    print!("{}", render_top_schools(&session.repo, limit));
    Ok(())
}

pub fn trending(data_path: &Path) -> Result<()> {
    let session = Session::open(data_path)?;
    print!("{}", render_trending(&session.repo));
    Ok(())
}

pub fn contributors(data_path: &Path, limit: usize) -> Result<()> {
    let session = Session::open(data_path)?;
    print!("{}", render_contributors(&session.repo, limit));
    Ok(())
}

pub fn stats(data_path: &Path) -> Result<()> {
    let session = Session::open(data_path)?;
    print!("{}", render_system_stats(&session.repo));
    Ok(())
}
