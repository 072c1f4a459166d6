//! Default configuration values

use std::time::Duration;

/// Default request timeout
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Default secure message lifetime, as a duration string
pub const DEFAULT_EXPIRE_IN: &str = "720h";

/// Default secure message subject
pub const DEFAULT_SUBJECT: &str = "Secure Message";

/// Config directory name under the XDG config home
pub const CONFIG_DIR_NAME: &str = "filelocker";

/// Config file name
pub const CONFIG_FILE_NAME: &str = "config.toml";
