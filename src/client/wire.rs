//! Response decoding for the two Filelocker wire formats
//!
//! Login, files and groups answer in XML:
//!
//! ```xml
//! <cli_response>
//!     <messages><info>...</info><error>...</error></messages>
//!     <data>...</data>
//! </cli_response>
//! ```
//!
//! Secure-message endpoints answer in JSON:
//!
//! ```json
//! {"sMessages": [...], "fMessages": [...], "data": ...}
//! ```
//!
//! Both decode into the same [`Envelope`], so every operation shares one
//! success/failure rule.

use crate::error::{Error, Result};
use crate::models::{null_as_default, Envelope};
use serde::de::DeserializeOwned;
use serde::Deserialize;

/// A response format that can decode an [`Envelope`] from a raw body.
pub trait Wire {
    /// Value for the `Accept` request header.
    const ACCEPT: &'static str;

    /// Decode `body` into payload plus info/error message lists.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Decode`] if the body is not well-formed.
    fn decode_envelope<T>(body: &[u8]) -> Result<Envelope<T>>
    where
        T: DeserializeOwned + Default;
}

/// XML responses (`text/xml`).
#[derive(Debug, Clone, Copy)]
pub struct Xml;

/// JSON responses (`application/json`).
#[derive(Debug, Clone, Copy)]
pub struct Json;

/// Payload for endpoints that only return the message lists.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
pub struct NoData {}

#[derive(Debug, Default, Deserialize)]
struct XmlMessages {
    #[serde(default)]
    info: Vec<String>,
    #[serde(default)]
    error: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct XmlEnvelope<T: Default> {
    #[serde(default)]
    messages: XmlMessages,
    #[serde(default)]
    data: T,
}

#[derive(Debug, Deserialize)]
#[serde(bound(deserialize = "T: DeserializeOwned + Default"))]
struct JsonEnvelope<T: Default> {
    #[serde(rename = "sMessages", default, deserialize_with = "null_as_default")]
    info: Vec<String>,
    #[serde(rename = "fMessages", default, deserialize_with = "null_as_default")]
    errors: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    data: T,
}

impl Wire for Xml {
    const ACCEPT: &'static str = "text/xml";

    fn decode_envelope<T>(body: &[u8]) -> Result<Envelope<T>>
    where
        T: DeserializeOwned + Default,
    {
        let text = std::str::from_utf8(body).map_err(|e| Error::Decode {
            format: "XML",
            reason: e.to_string(),
        })?;
        // Some deployments emit whitespace before the XML declaration.
        let text = text.trim_start();
        if text.is_empty() {
            return Err(Error::Decode {
                format: "XML",
                reason: "empty response body".to_string(),
            });
        }

        let parsed: XmlEnvelope<T> = quick_xml::de::from_str(text)?;
        Ok(Envelope {
            data: parsed.data,
            info: parsed.messages.info,
            errors: parsed.messages.error,
        })
    }
}

impl Wire for Json {
    const ACCEPT: &'static str = "application/json";

    fn decode_envelope<T>(body: &[u8]) -> Result<Envelope<T>>
    where
        T: DeserializeOwned + Default,
    {
        let parsed: JsonEnvelope<T> = serde_json::from_slice(body)?;
        Ok(Envelope {
            data: parsed.data,
            info: parsed.info,
            errors: parsed.errors,
        })
    }
}

/// Turn a decoded envelope into the call result.
///
/// Any error message fails the call, whatever else the envelope holds.
pub(crate) fn check<T>(envelope: Envelope<T>, action: &'static str) -> Result<Envelope<T>> {
    if envelope.has_errors() {
        tracing::warn!(action, errors = ?envelope.errors, "service reported errors");
        return Err(Error::Remote {
            action,
            errors: envelope.errors,
            info: envelope.info,
        });
    }
    Ok(envelope)
}
