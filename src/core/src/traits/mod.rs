//! Shared traits for the Ephemera crates

pub mod directory;

// Re-export commonly used traits
pub use directory::Directory;
