//! Directory implementations

pub mod memory;

pub use memory::InMemoryDirectory;
