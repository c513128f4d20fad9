//! # Ephemera Core
//!
//! Shared directory models, the directory trait, and error handling for the
//! Ephemera identity crates. Records in `ephemera-identity` hold only
//! identifiers into a [`Directory`]; everything they resolve comes from here.

pub mod types;
pub mod traits;
pub mod error;

// Re-export commonly used types
pub use error::{CoreError, Result};
pub use traits::Directory;
pub use types::{Client, Group, Realm, Role, RoleContainer};

pub type RealmId = String;
pub type ClientId = String;
pub type GroupId = String;
pub type RoleId = String;
pub type UserId = String;
