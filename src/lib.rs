#![warn(missing_docs)]
#![forbid(unsafe_code)]
#![doc = include_str!("../README.md")]

//! # Filelocker client
//!
//! A client library and CLI for the Filelocker file and secure-message
//! locker.
//!
//! ## Architecture
//!
//! - **[`error`]** - Error types and exit codes
//! - **[`models`]** - Files, groups, secure messages and the response envelope
//! - **[`client`]** - Login session, wire decoding, and resource operations
//! - **[`config`]** - Layered configuration (file, environment, flags)
//! - **[`cli`]** / **[`commands`]** - Argument parsing and command handlers
//! - **[`utils`]** - Duration parsing and output formatting
//!
//! ## Quick Start
//!
//! ```no_run
//! use filelocker::Session;
//! use std::time::Duration;
//!
//! # fn main() -> filelocker::Result<()> {
//! let session = Session::login("jdoe", "api-key", "https://files.example.edu", Duration::from_secs(30))?;
//! let count = session.count_new_messages()?;
//! println!("{count} new messages");
//! # Ok(())
//! # }
//! ```

pub mod cli;
pub mod client;
pub mod commands;
pub mod config;
pub mod error;
pub mod models;
pub mod utils;

/// Error type alias for convenience
pub use error::{Error, Result};

/// Session type alias for convenience
pub use client::Session;

pub use models::{Envelope, File, Group, SecureMessage};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
