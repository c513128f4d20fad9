//! User records

pub mod attributes;
mod membership;
pub mod record;

pub use attributes::Attributes;
pub use record::{UserRecord, UserSnapshot};
