//! Command implementations
//!
//! Handlers take an open [`Session`] plus the resolved [`Settings`] and
//! print their results. Errors are wrapped with a short description of the
//! step that failed.

use crate::client::Session;
use crate::config::Settings;
use anyhow::{Context, Result};
use console::style;
use tracing::debug;

pub mod files;
pub mod groups;
pub mod messages;

/// Log in with the resolved settings.
pub fn connect(settings: &Settings) -> Result<Session> {
    debug!(url = %settings.url, timeout = ?settings.timeout, "connecting");
    Session::login(
        &settings.auth.login,
        &settings.auth.api_key,
        &settings.url,
        settings.timeout,
    )
    .context("unable to log in to filelocker")
}

/// Print the service's informational messages, one per line.
pub(crate) fn print_info(info: &[String]) {
    for line in info {
        println!("{} {line}", style("✓").green());
    }
}

/// Pretty-print a value as JSON on stdout.
pub(crate) fn print_json<T: serde::Serialize>(value: &T) -> Result<()> {
    let out = serde_json::to_string_pretty(value).context("unable to format response as JSON")?;
    println!("{out}");
    Ok(())
}
