//! Plugin System Module
//!
//! The dispatcher's collaborator: plugin contracts, an in-memory registry
//! that keeps load order, and a manager that replays pending events to
//! newly loaded plugins.

// Internal modules - all access should go through api module
pub(crate) mod error;
pub(crate) mod manager;
pub(crate) mod registry;
pub(crate) mod traits;

// Public API module - the only public interface for the plugin system
pub mod api;

#[cfg(test)]
pub(crate) mod tests;
