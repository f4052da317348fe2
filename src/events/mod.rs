//! Event System Module
//!
//! A synchronous, re-entrant dispatcher that fans named events out to plugin
//! hooks and ad-hoc observers in before/normal/after order, and replays
//! pending events to plugins loaded after the fact.

// Internal modules - all access should go through api module
pub(crate) mod callback;
pub(crate) mod dispatcher;
pub(crate) mod error;
pub(crate) mod observers;

// Public API module - the only public interface for the event system
pub mod api;

#[cfg(test)]
mod tests;
