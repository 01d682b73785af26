// ABOUTME: Context registry module providing scope-isolated task metadata
// ABOUTME: Holds task descriptors, display titles, and group membership per scope

pub mod error;
pub mod scope;

pub use error::{RegistryError, Result};
pub use scope::{RegistryEntry, Scope};
