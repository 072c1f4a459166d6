//! Secure message operations
//!
//! These endpoints answer in JSON. `list_messages` returns the payload exactly
//! as the service nests it: one inner list per message.

use super::session::Session;
use super::wire::{check, Json, NoData};
use crate::error::Result;
use crate::models::{Envelope, SecureMessage};
use chrono::{DateTime, TimeZone};
use std::fmt::Display;

/// Message list endpoint
pub const LIST_MESSAGES_PATH: &str = "/message/get_messages";
/// New-message count endpoint
pub const COUNT_NEW_MESSAGES_PATH: &str = "/message/get_new_message_count";
/// Mark-as-read endpoint
pub const READ_MESSAGE_PATH: &str = "/message/read_message";
/// Send endpoint
pub const CREATE_MESSAGE_PATH: &str = "/message/create_message";
/// Delete endpoint
pub const DELETE_MESSAGES_PATH: &str = "/message/delete_messages";

/// Expiration date format the service accepts (`MM/DD/YYYY`)
pub const EXPIRATION_FORMAT: &str = "%m/%d/%Y";

/// Messages grouped the way the service returns them.
pub type MessageGroups = Vec<Vec<SecureMessage>>;

impl Session {
    /// List secure messages.
    ///
    /// # Errors
    ///
    /// Transport and decode errors, or [`crate::Error::Remote`] when the
    /// service reports errors.
    pub fn list_messages(&self) -> Result<Envelope<MessageGroups>> {
        let envelope = self.post_form::<Json, MessageGroups>(LIST_MESSAGES_PATH, &[])?;
        check(envelope, "error listing secure messages")
    }

    /// Count unread secure messages.
    ///
    /// # Errors
    ///
    /// Transport and decode errors, or [`crate::Error::Remote`] when the
    /// service reports errors.
    pub fn count_new_messages(&self) -> Result<u64> {
        let envelope = self.post_form::<Json, u64>(COUNT_NEW_MESSAGES_PATH, &[])?;
        check(envelope, "error counting secure messages").map(|env| env.data)
    }

    /// Mark a secure message as read.
    ///
    /// # Errors
    ///
    /// Transport and decode errors, or [`crate::Error::Remote`] when the
    /// service reports errors.
    pub fn mark_message_read(&self, id: u64) -> Result<Envelope<NoData>> {
        let envelope = self.post_form::<Json, NoData>(READ_MESSAGE_PATH, &read_message_form(id))?;
        check(envelope, "error marking secure message as read")
    }

    /// Send a secure message to `recipient_ids`, expiring at `expire_at`.
    ///
    /// Only the calendar date of `expire_at`, in its own timezone, reaches
    /// the service.
    ///
    /// # Errors
    ///
    /// [`crate::Error::NoOrigin`] without a request origin, transport and
    /// decode errors, or [`crate::Error::Remote`] when the service reports
    /// errors.
    pub fn send_message<S, Tz>(
        &self,
        subject: &str,
        body: &str,
        recipient_ids: &[S],
        expire_at: &DateTime<Tz>,
    ) -> Result<Envelope<NoData>>
    where
        S: AsRef<str>,
        Tz: TimeZone,
        Tz::Offset: Display,
    {
        let form = send_message_form(self.require_origin()?, subject, body, recipient_ids, expire_at);
        let envelope = self.post_form::<Json, NoData>(CREATE_MESSAGE_PATH, &form)?;
        check(envelope, "error sending secure message")
    }

    /// Delete secure messages by identifier.
    ///
    /// # Errors
    ///
    /// [`crate::Error::NoOrigin`] without a request origin, transport and
    /// decode errors, or [`crate::Error::Remote`] when the service reports
    /// errors.
    pub fn delete_messages(&self, ids: &[u64]) -> Result<Envelope<NoData>> {
        let form = delete_messages_form(ids, self.require_origin()?);
        let envelope = self.post_form::<Json, NoData>(DELETE_MESSAGES_PATH, &form)?;
        check(envelope, "error deleting secure messages")
    }
}

/// Form fields for marking a message read.
#[must_use]
pub fn read_message_form(id: u64) -> Vec<(&'static str, String)> {
    vec![("messageId", id.to_string())]
}

/// Form fields for sending a message.
pub fn send_message_form<S, Tz>(
    origin: &str,
    subject: &str,
    body: &str,
    recipient_ids: &[S],
    expire_at: &DateTime<Tz>,
) -> Vec<(&'static str, String)>
where
    S: AsRef<str>,
    Tz: TimeZone,
    Tz::Offset: Display,
{
    vec![
        ("requestOrigin", origin.to_string()),
        ("subject", subject.to_string()),
        ("body", body.to_string()),
        ("expiration", format_expiration(expire_at)),
        ("recipientIds", super::files::join_ids(recipient_ids)),
    ]
}

/// Form fields for deleting messages.
#[must_use]
pub fn delete_messages_form(ids: &[u64], origin: &str) -> Vec<(&'static str, String)> {
    let ids = ids.iter().map(ToString::to_string).collect::<Vec<_>>();
    vec![
        ("messageIds", ids.join(",")),
        ("requestOrigin", origin.to_string()),
    ]
}

/// Format an expiration time as `MM/DD/YYYY` in its own timezone.
pub fn format_expiration<Tz>(expire_at: &DateTime<Tz>) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    expire_at.format(EXPIRATION_FORMAT).to_string()
}
