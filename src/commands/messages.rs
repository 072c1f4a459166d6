//! `read`, `send` and `delete` commands

use super::{print_info, print_json};
use crate::client::Session;
use crate::config::Settings;
use crate::error::Error;
use crate::models::SecureMessage;
use crate::utils::parse_duration;
use anyhow::{Context, Result};
use chrono::{DateTime, Local, TimeDelta};
use console::style;
use serde::Serialize;

#[derive(Debug, Serialize)]
struct MessagesReport<'a> {
    messages: Vec<&'a SecureMessage>,
    info: &'a [String],
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct CountReport {
    new_messages: u64,
}

/// Handle `read`: count new messages, or list them (and optionally mark them read).
pub fn handle_read(session: &Session, settings: &Settings, all: bool, mark: bool) -> Result<()> {
    if !all {
        let count = session
            .count_new_messages()
            .context("unable to get message count")?;
        if settings.json {
            return print_json(&CountReport {
                new_messages: count,
            });
        }
        println!("New Messages: {count}");
        return Ok(());
    }

    let envelope = session
        .list_messages()
        .context("unable to read secure messages")?;
    // Each group holds one message; show them all in order.
    let messages: Vec<&SecureMessage> = envelope.data.iter().flatten().collect();

    if settings.json {
        print_json(&MessagesReport {
            messages: messages.clone(),
            info: &envelope.info,
        })?;
    } else if messages.is_empty() {
        println!("No messages");
    } else {
        for m in &messages {
            println!(
                "ID: {} | Expiration: {} | Subject: {} | Body: {}",
                m.id, m.expiration, m.subject, m.body
            );
        }
    }

    if mark {
        for m in &messages {
            let _ = session
                .mark_message_read(m.id)
                .with_context(|| format!("unable to mark message {} as read", m.id))?;
        }
        if !settings.json {
            println!(
                "{} Marked {} message(s) as read",
                style("✓").green(),
                messages.len()
            );
        }
    }
    Ok(())
}

/// Handle `send`.
pub fn handle_send(
    session: &Session,
    subject: &str,
    body: &str,
    recipients: &[String],
    expire_in: &str,
) -> Result<()> {
    let expire_at = expiration_from_now(expire_in).context("unable to parse expiration")?;
    let envelope = session
        .send_message(subject, body, recipients, &expire_at)
        .context("unable to send secure message")?;

    if envelope.info.is_empty() {
        println!("{} Message sent", style("✓").green());
    } else {
        print_info(&envelope.info);
    }
    Ok(())
}

/// Handle `delete`.
pub fn handle_delete(session: &Session, ids: &[u64]) -> Result<()> {
    let envelope = session
        .delete_messages(ids)
        .context("unable to delete secure messages")?;

    if envelope.info.is_empty() {
        println!("{} Deleted {} message(s)", style("✓").green(), ids.len());
    } else {
        print_info(&envelope.info);
    }
    Ok(())
}

/// Local time `expire_in` from now.
fn expiration_from_now(expire_in: &str) -> crate::Result<DateTime<Local>> {
    let duration = parse_duration(expire_in)?;
    let delta = TimeDelta::from_std(duration).map_err(|e| Error::InvalidDuration {
        input: expire_in.to_string(),
        reason: e.to_string(),
    })?;
    Local::now()
        .checked_add_signed(delta)
        .ok_or_else(|| Error::InvalidDuration {
            input: expire_in.to_string(),
            reason: "expiration is out of range".to_string(),
        })
}
