//! Command-line interface argument parsing
//!
//! Defines all CLI commands and their arguments using Clap.

use crate::config::{AuthConfig, Config, Settings, DEFAULT_EXPIRE_IN, DEFAULT_SUBJECT};
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Filelocker CLI - files, groups and secure messages from the terminal
#[derive(Parser, Debug)]
#[command(name = "filelocker")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "A CLI for interacting with Filelocker")]
#[command(long_about = concat!(
    "Filelocker CLI (v", env!("CARGO_PKG_VERSION"), ")\n",
    "List, upload and delete files, list groups, and read or send secure messages.\n\n",
    "Every setting can also come from a FILELOCKER_* environment variable or the\n",
    "config file (~/.config/filelocker/config.toml). Flags take precedence."
))]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalArgs,

    #[command(subcommand)]
    pub command: Commands,
}

/// Flags shared by every command
#[derive(Args, Debug, Clone, Default)]
pub struct GlobalArgs {
    /// Config file (default is ~/.config/filelocker/config.toml)
    #[arg(long, global = true, env = "FILELOCKER_CONFIG")]
    pub config: Option<PathBuf>,

    /// The user id to log in with
    #[arg(short, long, global = true, env = "FILELOCKER_LOGIN")]
    pub login: Option<String>,

    /// The API key to log in with
    #[arg(short, long, global = true, env = "FILELOCKER_KEY", hide_env_values = true)]
    pub key: Option<String>,

    /// Base URL of the Filelocker server (e.g. https://files.example.edu)
    #[arg(short, long, global = true, env = "FILELOCKER_URL")]
    pub url: Option<String>,

    /// HTTP client timeout (e.g. 30s, 1m) [default: 30s]
    #[arg(short, long, global = true, env = "FILELOCKER_TIMEOUT")]
    pub timeout: Option<String>,

    /// Format the response as JSON where applicable
    #[arg(short, long, global = true, env = "FILELOCKER_JSON")]
    pub json: bool,

    /// Enable verbose output for debugging
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Read secure messages
    ///
    /// Without --all, prints the number of new messages.
    ///
    /// Examples:
    ///   filelocker read
    ///   filelocker read --all
    ///   filelocker read --all --mark
    #[command(display_order = 1)]
    Read {
        /// Get all messages instead of a count of new messages
        #[arg(short, long)]
        all: bool,

        /// Mark the listed messages as read
        #[arg(short, long, requires = "all")]
        mark: bool,
    },

    /// Send a secure message
    ///
    /// Example:
    ///   filelocker send -s "Hello" -b "the code is 1234" -r jdoe -r asmith -e 48h
    #[command(display_order = 2)]
    Send {
        /// The message subject
        #[arg(short, long, default_value = DEFAULT_SUBJECT)]
        subject: String,

        /// The message body
        #[arg(short, long, default_value = "")]
        body: String,

        /// Message recipient (repeat for several)
        #[arg(short, long = "recipient", required = true)]
        recipients: Vec<String>,

        /// Expiration time from now (e.g. 720h, 7h30m)
        #[arg(short, long, default_value = DEFAULT_EXPIRE_IN)]
        expire_in: String,
    },

    /// Delete secure messages
    ///
    /// Example:
    ///   filelocker delete 12 13
    #[command(visible_alias = "rm")]
    #[command(display_order = 3)]
    Delete {
        /// Message ids
        #[arg(required = true)]
        ids: Vec<u64>,
    },

    /// Manage files
    #[command(subcommand)]
    #[command(display_order = 4)]
    Files(FilesCommand),

    /// List the groups you belong to
    #[command(display_order = 5)]
    Groups,

    /// Check CLI version
    #[command(display_order = 6)]
    Version,
}

/// File commands
#[derive(Subcommand, Debug)]
pub enum FilesCommand {
    /// List your files
    #[command(visible_alias = "ls")]
    List,

    /// Upload a file
    ///
    /// Example:
    ///   filelocker files upload ./report.pdf --notes "Q3" --scan
    Upload {
        /// Path of the file to upload
        path: PathBuf,

        /// Name to store the file under (defaults to the file name)
        #[arg(long)]
        name: Option<String>,

        /// Notes attached to the file
        #[arg(long)]
        notes: Option<String>,

        /// Ask the server to virus-scan the file
        #[arg(long)]
        scan: bool,
    },

    /// Delete files
    #[command(visible_alias = "rm")]
    Delete {
        /// File ids
        #[arg(required = true)]
        ids: Vec<String>,
    },
}

impl Cli {
    /// Parse command-line arguments
    pub fn parse_args() -> Self {
        <Self as Parser>::parse()
    }
}

impl GlobalArgs {
    /// The flag/environment layer of the configuration
    #[must_use]
    pub fn to_config(&self) -> Config {
        Config {
            auth: AuthConfig {
                login: self.login.clone().unwrap_or_default(),
                api_key: self.key.clone().unwrap_or_default(),
            },
            url: self.url.clone(),
            timeout: self.timeout.clone(),
            json: self.json,
        }
    }

    /// Load the config file, apply flags and environment on top, and validate.
    ///
    /// # Errors
    ///
    /// Config file and validation errors from [`Config`].
    pub fn resolve(&self) -> crate::Result<Settings> {
        let mut config = Config::load(self.config.as_deref())?;
        config.merge(&self.to_config());
        config.into_settings()
    }
}
