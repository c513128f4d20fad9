//! # Ephemera Identity
//!
//! In-memory user records for accounts that need no durable store, such as
//! synthetic or session-scoped users.
//!
//! ## Features
//!
//! - **Attributes**: ordered multimap, `username` and `email` kept lower-case
//! - **Membership**: group and role ids resolved on demand through a
//!   [`Directory`](ephemera_core::Directory), including group ancestry and
//!   composite roles
//! - **Read-only mode**: mutators fail fast with [`IdentityError::ReadOnly`]
//! - **Defaults**: realm default roles and groups applied in one call
//!
//! ## Example
//!
//! ```rust
//! use ephemera_core::{Group, Realm, Role};
//! use ephemera_identity::{InMemoryDirectory, UserRecord};
//! use std::sync::Arc;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let directory = Arc::new(InMemoryDirectory::new());
//! let realm = Realm::new("realm-1", "demo");
//! directory.add_realm(realm.clone());
//!
//! let staff = Group::new("g1", "staff").with_role("r1");
//! directory.add_role("realm-1", Role::realm("r1", "reader", "realm-1"))?;
//! directory.add_group("realm-1", staff.clone())?;
//!
//! let mut user = UserRecord::new(directory.clone(), realm, "u1");
//! user.join_group(&staff)?;
//!
//! let reader = Role::realm("r1", "reader", "realm-1");
//! assert!(user.has_role(&reader));
//! assert!(user.realm_role_mappings().is_empty());
//! # Ok(())
//! # }
//! # example().unwrap();
//! ```

pub mod config;
pub mod directory;
pub mod error;
pub mod types;
pub mod user;

pub use config::RecordOptions;
pub use directory::InMemoryDirectory;
pub use error::{IdentityError, Result};
pub use types::RequiredAction;
pub use user::{Attributes, UserRecord, UserSnapshot};
