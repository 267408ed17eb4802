//! The `schoolmark add-user` and `delete-user` commands.

use std::path::Path;

use anyhow::Result;

use schoolmark_core::model::Role;

use super::Session;

pub fn add(data_path: &Path, username: &str, password: &str, role: &str) -> Result<()> {
    let role: Role = role.parse().map_err(|e: String| anyhow::anyhow!(e))?;
    let mut session = Session::open(data_path)?;

    let user = session.repo.add_user(username, password, role)?.clone();
    println!("Added {} '{}' (id {})", user.role, user.username, user.id);

    session.save()
}

pub fn delete(data_path: &Path, user_id: u32, actor: Option<&str>) -> Result<()> {
    let mut session = Session::open(data_path)?;
    let actor = session.current_user(actor)?;

    session.repo.delete_user(&actor, user_id)?;
    println!("Deleted user {user_id}");

    session.save()
}
