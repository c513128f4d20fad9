//! Directory models shared between directory implementations and records

pub mod realm;
pub mod group;
pub mod role;

// Re-export commonly used types
pub use realm::{Client, Realm};
pub use group::Group;
pub use role::{Role, RoleContainer};
