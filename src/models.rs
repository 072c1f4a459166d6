//! Public data models returned by the client.

use serde::de::Unexpected;
use serde::{Deserialize, Deserializer, Serialize};

/// A file stored in Filelocker.
///
/// Decoded from the attributes of a `<file>` element.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct File {
    /// Remote file identifier.
    #[serde(rename(deserialize = "@id"))]
    pub id: String,
    /// Display name.
    #[serde(rename(deserialize = "@name"), default)]
    pub name: String,
    /// Size in bytes.
    #[serde(rename(deserialize = "@size"), default)]
    pub size: u64,
    /// Whether the file passed the antivirus scan.
    #[serde(
        rename(serialize = "passedAvScan", deserialize = "@passedAvScan"),
        default,
        deserialize_with = "lenient_bool"
    )]
    pub passed_av_scan: bool,
}

/// A group the user belongs to.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Group {
    /// Remote group identifier.
    #[serde(rename(deserialize = "@id"))]
    pub id: String,
    /// Display name.
    #[serde(rename(deserialize = "@name"), default)]
    pub name: String,
}

/// A secure message managed by Filelocker.
///
/// Timestamps are kept exactly as the service formats them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SecureMessage {
    /// Numeric message identifier.
    pub id: u64,
    /// Identifier of the sender.
    #[serde(default, deserialize_with = "null_as_default")]
    pub owner_id: String,
    /// Message subject line.
    #[serde(default, deserialize_with = "null_as_default")]
    pub subject: String,
    /// Message body.
    #[serde(default, deserialize_with = "null_as_default")]
    pub body: String,
    /// Recipient identifiers.
    #[serde(
        rename = "messageRecipients",
        default,
        deserialize_with = "null_as_default"
    )]
    pub recipients: Vec<String>,
    /// Creation date.
    #[serde(
        rename = "creationDatetime",
        default,
        deserialize_with = "null_as_default"
    )]
    pub created: String,
    /// Expiration date.
    #[serde(
        rename = "expirationDatetime",
        default,
        deserialize_with = "null_as_default"
    )]
    pub expiration: String,
    /// Date the message was viewed, empty when unread.
    #[serde(
        rename = "viewedDatetime",
        default,
        deserialize_with = "null_as_default"
    )]
    pub viewed: String,
}

impl SecureMessage {
    /// Whether the recipient has opened this message.
    #[must_use]
    pub fn is_viewed(&self) -> bool {
        !self.viewed.is_empty()
    }
}

/// A decoded response: the payload plus the service's message lists.
///
/// `errors` being non-empty means the call failed; client methods never hand
/// such an envelope back as a success.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Envelope<T> {
    /// Primary payload.
    pub data: T,
    /// Informational messages.
    pub info: Vec<String>,
    /// Error messages.
    pub errors: Vec<String>,
}

impl<T> Envelope<T> {
    /// Whether the service reported any error.
    #[must_use]
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    /// Replace the payload, keeping the message lists.
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Envelope<U> {
        Envelope {
            data: f(self.data),
            info: self.info,
            errors: self.errors,
        }
    }
}

/// Deserialize `null` as the type's default value.
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Deserialize a boolean attribute in any of the spellings the service emits
/// (`1`, `t`, `T`, `true`, `TRUE`, `True` and their false counterparts).
pub(crate) fn lenient_bool<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    match raw.trim() {
        "1" | "t" | "T" | "true" | "TRUE" | "True" => Ok(true),
        "0" | "f" | "F" | "false" | "FALSE" | "False" => Ok(false),
        other => Err(serde::de::Error::invalid_value(
            Unexpected::Str(other),
            &"a boolean",
        )),
    }
}
