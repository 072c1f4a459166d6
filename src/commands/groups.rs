//! `groups` command

use super::print_json;
use crate::client::Session;
use crate::config::Settings;
use anyhow::{Context, Result};
use serde_json::json;

/// Handle `groups`.
pub fn handle_groups(session: &Session, settings: &Settings) -> Result<()> {
    let envelope = session.list_groups().context("unable to list groups")?;

    if settings.json {
        return print_json(&json!({ "groups": envelope.data, "info": envelope.info }));
    }
    if envelope.data.is_empty() {
        println!("No groups");
    }
    for g in &envelope.data {
        println!("ID: {} | Name: {}", g.id, g.name);
    }
    Ok(())
}
