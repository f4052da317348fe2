//! Test modules for the plugin system
//!
//! Manager coordination tests, error tests, and the mock plugins shared
//! with the event system tests.

pub(crate) mod utils;
