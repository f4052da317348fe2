//! Plugin Manager
//!
//! Joins a plugin registry to an event dispatcher. Loading a plugin through
//! the manager registers it and then replays every pending event to it, so
//! a late plugin observes what it missed in the original order.

use crate::core::error_handling::log_error_with_context;
use crate::events::dispatcher::EventDispatcher;
use crate::plugin::error::{PluginError, PluginResult};
use crate::plugin::registry::SharedPluginRegistry;
use crate::plugin::traits::{Plugin, PluginTarget};
use std::sync::Arc;

#[derive(Debug, Clone)]
pub struct PluginManager {
    registry: SharedPluginRegistry,
    dispatcher: Arc<EventDispatcher>,
}

impl PluginManager {
    /// `dispatcher` should resolve plugins through `registry`, otherwise
    /// loaded plugins only see replays, not new events
    pub fn new(registry: SharedPluginRegistry, dispatcher: Arc<EventDispatcher>) -> Self {
        Self {
            registry,
            dispatcher,
        }
    }

    /// A manager with a fresh registry and a dispatcher bound to it
    pub fn standalone() -> Self {
        let registry = SharedPluginRegistry::new();
        let dispatcher = Arc::new(EventDispatcher::new(Arc::new(registry.clone())));
        Self::new(registry, dispatcher)
    }

    pub fn registry(&self) -> &SharedPluginRegistry {
        &self.registry
    }

    pub fn dispatcher(&self) -> &Arc<EventDispatcher> {
        &self.dispatcher
    }

    /// Register `plugin`, then replay pending events to it.
    ///
    /// The plugin stays loaded when replay fails; the failure is returned as
    /// `ReplayFailed` so the caller can decide whether to unload it.
    pub fn load_plugin(&self, plugin: Arc<dyn Plugin>) -> PluginResult<()> {
        let plugin_name = plugin.name().to_string();
        self.registry.register_plugin(Arc::clone(&plugin))?;
        log::debug!("Loaded plugin '{}'", plugin_name);

        self.dispatcher
            .post_pending_events_to(&PluginTarget::Instance(plugin))
            .map_err(|source| {
                let error = PluginError::ReplayFailed {
                    plugin_name,
                    source: Box::new(source),
                };
                log_error_with_context(&error, "Replaying pending events");
                error
            })
    }

    pub fn unload_plugin(&self, name: &str) -> PluginResult<Arc<dyn Plugin>> {
        let plugin = self.registry.unregister_plugin(name)?;
        log::debug!("Unloaded plugin '{}'", name);
        Ok(plugin)
    }

    pub fn loaded_plugin_names(&self) -> PluginResult<Vec<String>> {
        self.registry.get_plugin_names()
    }
}
