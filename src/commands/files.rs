//! `files` commands

use super::{print_info, print_json};
use crate::client::Session;
use crate::config::Settings;
use crate::error::Error;
use crate::utils::format_bytes;
use anyhow::{Context, Result};
use console::style;
use serde_json::json;
use std::fs::File as FsFile;
use std::path::Path;

/// Handle `files list`.
pub fn handle_list(session: &Session, settings: &Settings) -> Result<()> {
    let envelope = session.list_files().context("unable to list files")?;

    if settings.json {
        return print_json(&json!({ "files": envelope.data, "info": envelope.info }));
    }
    if envelope.data.is_empty() {
        println!("No files");
        return Ok(());
    }
    for f in &envelope.data {
        let scan = if f.passed_av_scan {
            style("scanned").green()
        } else {
            style("not scanned").yellow()
        };
        println!(
            "ID: {} | Name: {} | Size: {} | {scan}",
            f.id,
            f.name,
            format_bytes(f.size)
        );
    }
    Ok(())
}

/// Handle `files upload`.
pub fn handle_upload(
    session: &Session,
    settings: &Settings,
    path: &Path,
    name: Option<&str>,
    notes: Option<&str>,
    scan: bool,
) -> Result<()> {
    let name = match name {
        Some(n) => n.to_string(),
        None => path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .ok_or_else(|| Error::FileError {
                path: path.to_path_buf(),
                reason: "path has no file name".to_string(),
            })?,
    };
    let file = FsFile::open(path).map_err(|e| Error::FileError {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;

    let envelope = session
        .upload_file(&name, notes, scan, file)
        .context("unable to upload file")?;

    if settings.json {
        return print_json(&json!({ "file": envelope.data, "info": envelope.info }));
    }
    print_info(&envelope.info);
    println!(
        "{} Uploaded {} (ID: {}, {})",
        style("✓").green(),
        envelope.data.name,
        envelope.data.id,
        format_bytes(envelope.data.size)
    );
    Ok(())
}

/// Handle `files delete`.
pub fn handle_delete(session: &Session, ids: &[String]) -> Result<()> {
    let envelope = session
        .delete_files(ids)
        .context("unable to delete files")?;

    if envelope.info.is_empty() {
        println!("{} Deleted {} file(s)", style("✓").green(), ids.len());
    } else {
        print_info(&envelope.info);
    }
    Ok(())
}
