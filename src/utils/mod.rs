//! Small helpers shared by the CLI

pub mod duration;
pub mod format;

pub use duration::parse_duration;
pub use format::format_bytes;
