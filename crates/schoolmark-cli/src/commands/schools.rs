//! The `schoolmark add-school` and `school` commands.

use std::path::Path;

use anyhow::Result;

use schoolmark_core::model::SchoolLevel;
use schoolmark_report::text::render_school_profile;

use super::Session;

pub fn add(data_path: &Path, name: &str, level: &str, location: &str) -> Result<()> {
    let level: SchoolLevel = level.parse().map_err(|e: String| anyhow::anyhow!(e))?;
    let mut session = Session::open(data_path)?;

    let school = session.repo.add_school(name, level, location)?.clone();
    println!(
        "Added {} school '{}' in {} (id {})",
        school.level, school.name, school.location, school.id
    );

    session.save()
}

pub fn profile(data_path: &Path, school_id: &str) -> Result<()> {
    let session = Session::open(data_path)?;
    let school = session.school(school_id)?;

    print!("{}", render_school_profile(&session.repo, &school));
    Ok(())
}
