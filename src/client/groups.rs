//! Group listing

use super::session::Session;
use super::wire::{check, Xml};
use crate::error::Result;
use crate::models::{Envelope, Group};
use serde::Deserialize;

/// Group list endpoint
pub const LIST_GROUPS_PATH: &str = "/account/get_groups";

#[derive(Debug, Default, Deserialize)]
struct GroupList {
    #[serde(default)]
    group: Vec<Group>,
}

impl Session {
    /// List the groups the user belongs to.
    ///
    /// # Errors
    ///
    /// Transport and decode errors, or [`crate::Error::Remote`] when the
    /// service reports errors.
    pub fn list_groups(&self) -> Result<Envelope<Vec<Group>>> {
        let form = [("format", "cli".to_string())];
        let envelope = self.post_form::<Xml, GroupList>(LIST_GROUPS_PATH, &form)?;
        check(envelope, "error listing groups").map(|env| env.map(|list| list.group))
    }
}
