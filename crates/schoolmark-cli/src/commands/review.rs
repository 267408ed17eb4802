//! The rating, comment, and favourite commands.

use std::path::Path;

use anyhow::Result;
use chrono::Utc;
use comfy_table::Table;

use schoolmark_core::model::SchoolId;

use super::Session;

pub fn rate(data_path: &Path, school_id: &str, value: u8, actor: Option<&str>) -> Result<()> {
    let mut session = Session::open(data_path)?;
    let actor = session.current_user(actor)?;
    let id = SchoolId::from(school_id);

    session.repo.set_rating(actor.id, &id, value)?;
    println!("Recorded rating {value} for school {id}");

    session.save()
}

pub fn comment_add(
    data_path: &Path,
    school_id: &str,
    text: &str,
    actor: Option<&str>,
) -> Result<()> {
    let mut session = Session::open(data_path)?;
    let actor = session.current_user(actor)?;
    let id = SchoolId::from(school_id);

    session.repo.add_comment(actor.id, &id, text, Utc::now())?;
    println!("Comment added to school {id}");

    session.save()
}

pub fn comment_edit(data_path: &Path, index: usize, text: &str, actor: Option<&str>) -> Result<()> {
    let mut session = Session::open(data_path)?;
    let actor = session.current_user(actor)?;

    session.repo.edit_comment(&actor, index, text, Utc::now())?;
    println!("Comment {index} updated");

    session.save()
}

pub fn comment_delete(data_path: &Path, index: usize, actor: Option<&str>) -> Result<()> {
    let mut session = Session::open(data_path)?;
    let actor = session.current_user(actor)?;

    session.repo.delete_comment(&actor, index)?;
    println!("Comment {index} deleted");

    session.save()
}

pub fn comment_list(data_path: &Path, school_id: &str) -> Result<()> {
    let session = Session::open(data_path)?;
    let school = session.school(school_id)?;

    let comments: Vec<(usize, _)> = session
        .repo
        .comments
        .iter()
        .enumerate()
        .filter(|(_, c)| c.school_id == school.sid())
        .collect();
    if comments.is_empty() {
        println!("No comments for {} yet.", school.name);
        return Ok(());
    }

    let mut table = Table::new();
    table.set_header(vec!["#", "Author", "When", "Comment"]);
    for (index, comment) in comments {
        let author = session
            .repo
            .user_by_id(comment.user_id)
            .map(|u| u.username.clone())
            .unwrap_or_else(|| format!("user {}", comment.user_id));
        let when = comment
            .created_at
            .map(|at| at.format("%Y-%m-%d %H:%M").to_string())
            .unwrap_or_else(|| "-".to_string());
        table.add_row(vec![
            index.to_string(),
            author,
            when,
            comment.text.clone(),
        ]);
    }
    println!("{table}");
    Ok(())
}

pub fn favourite_add(data_path: &Path, school_id: &str, actor: Option<&str>) -> Result<()> {
    let mut session = Session::open(data_path)?;
    let actor = session.current_user(actor)?;
    let id = SchoolId::from(school_id);

    let favourite = session
        .repo
        .add_favourite(actor.id, &id, Utc::now())?
        .clone();
    println!(
        "School {id} is in your favourites (since {})",
        favourite.created_at.format("%Y-%m-%d")
    );

    session.save()
}

pub fn favourite_list(data_path: &Path, actor: Option<&str>) -> Result<()> {
    let session = Session::open(data_path)?;
    let actor = session.current_user(actor)?;

    let favourites = session.repo.favourites_for(actor.id);
    if favourites.is_empty() {
        println!("No favourites yet.");
        return Ok(());
    }

    let mut table = Table::new();
    table.set_header(vec!["School", "Location", "Since"]);
    for favourite in favourites {
        let (name, location) = session
            .repo
            .school_by_id(&favourite.school_id)
            .map(|s| (s.name.clone(), s.location.clone()))
            .unwrap_or_else(|| (format!("school {}", favourite.school_id), String::new()));
        table.add_row(vec![
            name,
            location,
            favourite.created_at.format("%Y-%m-%d").to_string(),
        ]);
    }
    println!("{table}");
    Ok(())
}
