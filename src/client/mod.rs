//! HTTP client for the Filelocker service
//!
//! [`Session`] performs the login and owns the cookie-carrying HTTP client.
//! The resource operations (files, groups, secure messages) are methods on
//! `Session`, each one POST round trip decoded through [`wire`].

pub mod files;
pub mod groups;
pub mod messages;
pub mod session;
pub mod wire;

pub use messages::MessageGroups;
pub use session::Session;
pub use wire::NoData;
