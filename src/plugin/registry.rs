//! Plugin Registry
//!
//! In-memory record of loaded plugins. Load order is preserved because it is
//! the order in which plugin hooks run within a priority group.

use crate::core::sync::{handle_rwlock_read, handle_rwlock_write};
use crate::plugin::error::{PluginError, PluginResult};
use crate::plugin::traits::{Plugin, PluginProvider};
use std::sync::{Arc, RwLock};

/// Loaded plugins in load order
#[derive(Default)]
pub struct PluginRegistry {
    plugins: Vec<Arc<dyn Plugin>>,
}

impl std::fmt::Debug for PluginRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PluginRegistry")
            .field("plugins", &self.get_plugin_names())
            .finish()
    }
}

impl PluginRegistry {
    pub fn new() -> Self {
        Self {
            plugins: Vec::new(),
        }
    }

    /// Register a plugin at the end of the load order
    pub fn register_plugin(&mut self, plugin: Arc<dyn Plugin>) -> PluginResult<()> {
        let plugin_name = plugin.name().to_string();

        if self.has_plugin(&plugin_name) {
            return Err(PluginError::AlreadyLoaded { plugin_name });
        }

        log::debug!(
            "Registered plugin '{}' at position {}",
            plugin_name,
            self.plugins.len()
        );
        self.plugins.push(plugin);
        Ok(())
    }

    pub fn get_plugin(&self, name: &str) -> Option<Arc<dyn Plugin>> {
        self.plugins
            .iter()
            .find(|plugin| plugin.name() == name)
            .cloned()
    }

    pub fn has_plugin(&self, name: &str) -> bool {
        self.plugins.iter().any(|plugin| plugin.name() == name)
    }

    /// Plugin names in load order
    pub fn get_plugin_names(&self) -> Vec<String> {
        self.plugins
            .iter()
            .map(|plugin| plugin.name().to_string())
            .collect()
    }

    /// Plugins in load order
    pub fn plugins(&self) -> Vec<Arc<dyn Plugin>> {
        self.plugins.clone()
    }

    /// Remove a plugin; later plugins keep their relative order
    pub fn unregister_plugin(&mut self, name: &str) -> PluginResult<Arc<dyn Plugin>> {
        let position = self
            .plugins
            .iter()
            .position(|plugin| plugin.name() == name)
            .ok_or_else(|| PluginError::PluginNotFound {
                plugin_name: name.to_string(),
            })?;

        log::debug!("Unregistered plugin '{}'", name);
        Ok(self.plugins.remove(position))
    }

    pub fn plugin_count(&self) -> usize {
        self.plugins.len()
    }

    pub fn clear(&mut self) {
        self.plugins.clear();
    }
}

/// Thread-safe shared plugin registry
#[derive(Debug, Clone, Default)]
pub struct SharedPluginRegistry {
    inner: Arc<RwLock<PluginRegistry>>,
}

impl SharedPluginRegistry {
    pub fn new() -> Self {
        Self {
            inner: Arc::new(RwLock::new(PluginRegistry::new())),
        }
    }

    /// Get access to the inner registry for read/write operations
    pub fn inner(&self) -> &Arc<RwLock<PluginRegistry>> {
        &self.inner
    }

    pub fn register_plugin(&self, plugin: Arc<dyn Plugin>) -> PluginResult<()> {
        let mut registry = handle_rwlock_write(self.inner.write(), PluginError::synchronisation)?;
        registry.register_plugin(plugin)
    }

    pub fn unregister_plugin(&self, name: &str) -> PluginResult<Arc<dyn Plugin>> {
        let mut registry = handle_rwlock_write(self.inner.write(), PluginError::synchronisation)?;
        registry.unregister_plugin(name)
    }

    pub fn has_plugin(&self, name: &str) -> PluginResult<bool> {
        let registry = handle_rwlock_read(self.inner.read(), PluginError::synchronisation)?;
        Ok(registry.has_plugin(name))
    }

    pub fn get_plugin_names(&self) -> PluginResult<Vec<String>> {
        let registry = handle_rwlock_read(self.inner.read(), PluginError::synchronisation)?;
        Ok(registry.get_plugin_names())
    }

    pub fn plugin_count(&self) -> PluginResult<usize> {
        let registry = handle_rwlock_read(self.inner.read(), PluginError::synchronisation)?;
        Ok(registry.plugin_count())
    }

    pub fn clear(&self) -> PluginResult<()> {
        let mut registry = handle_rwlock_write(self.inner.write(), PluginError::synchronisation)?;
        registry.clear();
        Ok(())
    }
}

impl PluginProvider for SharedPluginRegistry {
    fn loaded_plugins(&self) -> PluginResult<Vec<Arc<dyn Plugin>>> {
        let registry = handle_rwlock_read(self.inner.read(), PluginError::synchronisation)?;
        Ok(registry.plugins())
    }

    fn loaded_plugin(&self, name: &str) -> PluginResult<Arc<dyn Plugin>> {
        let registry = handle_rwlock_read(self.inner.read(), PluginError::synchronisation)?;
        registry
            .get_plugin(name)
            .ok_or_else(|| PluginError::PluginNotFound {
                plugin_name: name.to_string(),
            })
    }
}
