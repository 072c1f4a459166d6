//! Secure message operations against a stub server

#![allow(clippy::expect_used, clippy::panic, clippy::unwrap_used)]

mod common;

use chrono::{FixedOffset, TimeZone};
use common::{Reply, StubServer, TEST_ORIGIN};
use filelocker::client::messages::{
    COUNT_NEW_MESSAGES_PATH, CREATE_MESSAGE_PATH, DELETE_MESSAGES_PATH, LIST_MESSAGES_PATH,
    READ_MESSAGE_PATH,
};
use filelocker::{Error, Session};
use std::time::Duration;

const STUFF_BROKE: &str = r#"{"sMessages": [], "fMessages": ["stuff broke"], "data": null}"#;

const MESSAGE_LIST: &str = r#"
{
    "sMessages": [],
    "fMessages": [],
    "data": [
        [{
            "id": 1,
            "ownerId": "bossman",
            "body": "some secret message",
            "subject": "shh",
            "messageRecipients": ["peon1", "peon2"],
            "expirationDatetime": "07/07/2018",
            "viewedDatetime": null,
            "creationDatetime": "06/07/2018"
        }], [{
            "id": 2,
            "ownerId": "bossman",
            "body": "you are fired",
            "subject": "ohai",
            "messageRecipients": ["peon1"],
            "expirationDatetime": "07/07/2018",
            "viewedDatetime": "06/08/2018",
            "creationDatetime": "06/07/2018"
        }]
    ]
}
"#;

fn session(server: &StubServer) -> filelocker::Result<Session> {
    Session::with_origin(&server.url, TEST_ORIGIN, Duration::from_secs(5))
}

fn assert_stuff_broke<T: std::fmt::Debug>(result: filelocker::Result<T>) {
    match result {
        Err(Error::Remote { errors, .. }) => assert_eq!(errors, vec!["stuff broke".to_string()]),
        other => panic!("expected remote error, got {other:?}"),
    }
}

#[test]
fn list_messages_keeps_nesting() -> filelocker::Result<()> {
    let server = StubServer::start(vec![(LIST_MESSAGES_PATH, Reply::json(MESSAGE_LIST))]);

    let envelope = session(&server)?.list_messages()?;
    assert_eq!(envelope.data.len(), 2);
    assert!(envelope.data.iter().all(|group| group.len() == 1));
    assert!(envelope.info.is_empty());

    let first = &envelope.data[0][0];
    assert_eq!(first.id, 1);
    assert_eq!(first.owner_id, "bossman");
    assert_eq!(first.subject, "shh");
    assert_eq!(first.recipients, vec!["peon1".to_string(), "peon2".to_string()]);
    assert_eq!(first.created, "06/07/2018");
    assert_eq!(first.viewed, "");
    assert!(!first.is_viewed());
    assert!(envelope.data[1][0].is_viewed());

    let request = server.next_request();
    assert_eq!(request.header("accept"), Some("application/json"));
    Ok(())
}

#[test]
fn list_messages_reports_errors() -> filelocker::Result<()> {
    let server = StubServer::start(vec![(LIST_MESSAGES_PATH, Reply::json(STUFF_BROKE))]);
    assert_stuff_broke(session(&server)?.list_messages());
    Ok(())
}

#[test]
fn count_new_messages() -> filelocker::Result<()> {
    let body = r#"{"sMessages": [], "fMessages": [], "data": 1337}"#;
    let server = StubServer::start(vec![(COUNT_NEW_MESSAGES_PATH, Reply::json(body))]);

    assert_eq!(session(&server)?.count_new_messages()?, 1337);
    Ok(())
}

#[test]
fn count_new_messages_reports_errors() -> filelocker::Result<()> {
    let server = StubServer::start(vec![(COUNT_NEW_MESSAGES_PATH, Reply::json(STUFF_BROKE))]);
    assert_stuff_broke(session(&server)?.count_new_messages());
    Ok(())
}

#[test]
fn malformed_json_is_decode_error() -> filelocker::Result<()> {
    let server = StubServer::start(vec![(COUNT_NEW_MESSAGES_PATH, Reply::json("{\"data\": "))]);

    let result = session(&server)?.count_new_messages();
    assert!(matches!(result, Err(Error::Decode { format: "JSON", .. })), "{result:?}");
    Ok(())
}

#[test]
fn mark_message_read_sends_id() -> filelocker::Result<()> {
    let body = r#"{"sMessages": [], "fMessages": []}"#;
    let server = StubServer::start(vec![(READ_MESSAGE_PATH, Reply::json(body))]);

    let _ = session(&server)?.mark_message_read(5)?;
    assert_eq!(server.next_request().form("messageId").as_deref(), Some("5"));
    Ok(())
}

#[test]
fn mark_message_read_reports_errors() -> filelocker::Result<()> {
    let server = StubServer::start(vec![(READ_MESSAGE_PATH, Reply::json(STUFF_BROKE))]);
    assert_stuff_broke(session(&server)?.mark_message_read(5));
    Ok(())
}

#[test]
fn delete_messages_sends_ids_and_origin() -> filelocker::Result<()> {
    let body = r#"{"sMessages": ["Message(s) deleted"], "fMessages": []}"#;
    let server = StubServer::start(vec![(DELETE_MESSAGES_PATH, Reply::json(body))]);

    let envelope = session(&server)?.delete_messages(&[1, 2, 3])?;
    assert_eq!(envelope.info, vec!["Message(s) deleted".to_string()]);

    let request = server.next_request();
    assert_eq!(request.form("messageIds").as_deref(), Some("1,2,3"));
    assert_eq!(request.form("requestOrigin").as_deref(), Some(TEST_ORIGIN));
    Ok(())
}

#[test]
fn delete_messages_reports_errors() -> filelocker::Result<()> {
    let server = StubServer::start(vec![(DELETE_MESSAGES_PATH, Reply::json(STUFF_BROKE))]);
    assert_stuff_broke(session(&server)?.delete_messages(&[1]));
    Ok(())
}

#[test]
fn send_message_sends_fields() -> filelocker::Result<()> {
    let body = r#"{"sMessages": ["Message \"test test\" sent."], "fMessages": []}"#;
    let server = StubServer::start(vec![(CREATE_MESSAGE_PATH, Reply::json(body))]);

    // 02:00 UTC on July 5th is still July 4th five hours west.
    let offset = FixedOffset::west_opt(5 * 3600).expect("valid offset");
    let expire_at = offset
        .with_ymd_and_hms(2030, 7, 4, 21, 0, 0)
        .single()
        .expect("unambiguous time");

    let envelope =
        session(&server)?.send_message("test test", "the body", &["user1", "user2"], &expire_at)?;
    assert_eq!(envelope.info, vec!["Message \"test test\" sent.".to_string()]);

    let request = server.next_request();
    assert_eq!(request.path(), CREATE_MESSAGE_PATH);
    assert_eq!(request.form("requestOrigin").as_deref(), Some(TEST_ORIGIN));
    assert_eq!(request.form("subject").as_deref(), Some("test test"));
    assert_eq!(request.form("body").as_deref(), Some("the body"));
    assert_eq!(request.form("recipientIds").as_deref(), Some("user1,user2"));
    assert_eq!(request.form("expiration").as_deref(), Some("07/04/2030"));
    Ok(())
}

#[test]
fn send_message_reports_errors() -> filelocker::Result<()> {
    let server = StubServer::start(vec![(CREATE_MESSAGE_PATH, Reply::json(STUFF_BROKE))]);
    let expire_at = chrono::Utc::now();
    assert_stuff_broke(session(&server)?.send_message("s", "b", &["user1"], &expire_at));
    Ok(())
}
