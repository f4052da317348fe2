//! Public API for the plugin system
//!
//! This module provides the complete public API for the plugin system.
//! External modules should import from here rather than directly from internal modules.

use std::sync::LazyLock;

// Core plugin management
pub use crate::plugin::manager::PluginManager;

// Error handling
pub use crate::plugin::error::{PluginError, PluginResult};

// Plugin and collaborator contracts
pub use crate::plugin::traits::{Plugin, PluginProvider, PluginTarget};

// Plugin registry for management
pub use crate::plugin::registry::{PluginRegistry, SharedPluginRegistry};

/// Global plugin registry backing the process-wide event dispatcher
static PLUGIN_REGISTRY: LazyLock<SharedPluginRegistry> = LazyLock::new(|| {
    log::trace!("Initializing plugin registry");
    SharedPluginRegistry::new()
});

/// Handle to the global plugin registry; clones share state
pub fn get_plugin_registry() -> SharedPluginRegistry {
    PLUGIN_REGISTRY.clone()
}

/// Manager over the global registry and the process-wide dispatcher
pub fn get_plugin_manager() -> PluginManager {
    PluginManager::new(
        get_plugin_registry(),
        crate::events::api::get_event_dispatcher(),
    )
}
