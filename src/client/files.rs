//! File operations: list, upload, delete

use super::session::{execute, Session};
use super::wire::{check, NoData, Xml};
use crate::error::Result;
use crate::models::{Envelope, File};
use reqwest::header::{CONTENT_LENGTH, CONTENT_TYPE};
use serde::Deserialize;
use std::io::Read;
use tracing::debug;

/// File list endpoint
pub const LIST_FILES_PATH: &str = "/file/get_user_file_list";
/// Upload endpoint
pub const UPLOAD_PATH: &str = "/file/upload";
/// Delete endpoint
pub const DELETE_FILES_PATH: &str = "/file/delete_files";

/// Notes attached to uploads when the caller gives none
pub const DEFAULT_FILE_NOTES: &str = "Uploaded by filelocker";

/// `format` value the XML endpoints expect
const CLI_FORMAT: &str = "cli";

#[derive(Debug, Default, Deserialize)]
struct FileList {
    #[serde(default)]
    file: Vec<File>,
}

#[derive(Debug, Default, Deserialize)]
struct UploadedFile {
    #[serde(default)]
    file: File,
}

impl Session {
    /// List the user's files.
    ///
    /// # Errors
    ///
    /// Transport and decode errors, or [`crate::Error::Remote`] when the
    /// service reports errors.
    pub fn list_files(&self) -> Result<Envelope<Vec<File>>> {
        let envelope = self.post_form::<Xml, FileList>(LIST_FILES_PATH, &list_form())?;
        check(envelope, "error listing files").map(|env| env.map(|list| list.file))
    }

    /// Upload `content` as a file named `name`.
    ///
    /// The whole content is read into memory first; the service needs the
    /// length up front. Empty or absent `notes` fall back to
    /// [`DEFAULT_FILE_NOTES`].
    ///
    /// # Errors
    ///
    /// [`crate::Error::Io`] if `content` cannot be read, transport and decode
    /// errors, or [`crate::Error::Remote`] when the service reports errors.
    pub fn upload_file<R: Read>(
        &self,
        name: &str,
        notes: Option<&str>,
        scan: bool,
        mut content: R,
    ) -> Result<Envelope<File>> {
        let mut bytes = Vec::new();
        let _ = content.read_to_end(&mut bytes)?;
        debug!(name, size = bytes.len(), scan, "uploading file");

        let (request, url) = self.post(UPLOAD_PATH);
        let request = request
            .query(&upload_query(name, notes, scan))
            .header(CONTENT_TYPE, "application/octet-stream")
            .header(CONTENT_LENGTH, bytes.len())
            .header("X-File-Name", name)
            .body(bytes);
        let envelope = execute::<Xml, UploadedFile>(request, &url)?;
        check(envelope, "error uploading file").map(|env| env.map(|up| up.file))
    }

    /// Delete files by identifier.
    ///
    /// # Errors
    ///
    /// [`crate::Error::NoOrigin`] without a request origin, transport and
    /// decode errors, or [`crate::Error::Remote`] when the service reports
    /// errors.
    pub fn delete_files<S: AsRef<str>>(&self, ids: &[S]) -> Result<Envelope<NoData>> {
        let form = delete_files_form(ids, self.require_origin()?);
        let envelope = self.post_form::<Xml, NoData>(DELETE_FILES_PATH, &form)?;
        check(envelope, "error deleting files")
    }
}

fn list_form() -> Vec<(&'static str, String)> {
    vec![("format", CLI_FORMAT.to_string())]
}

/// Query parameters for an upload.
pub fn upload_query(name: &str, notes: Option<&str>, scan: bool) -> Vec<(&'static str, String)> {
    let mut params = vec![
        ("format", CLI_FORMAT.to_string()),
        ("fileName", name.to_string()),
    ];
    if scan {
        params.push(("scanFile", "true".to_string()));
    }
    let notes = notes.filter(|n| !n.is_empty()).unwrap_or(DEFAULT_FILE_NOTES);
    params.push(("fileNotes", notes.to_string()));
    params
}

/// Form fields for deleting files.
pub fn delete_files_form<S: AsRef<str>>(ids: &[S], origin: &str) -> Vec<(&'static str, String)> {
    vec![
        ("format", CLI_FORMAT.to_string()),
        ("requestOrigin", origin.to_string()),
        ("fileIds", join_ids(ids)),
    ]
}

pub(crate) fn join_ids<S: AsRef<str>>(ids: &[S]) -> String {
    ids.iter().map(AsRef::as_ref).collect::<Vec<_>>().join(",")
}
