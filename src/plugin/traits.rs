//! Plugin Trait System
//!
//! The dispatcher sees plugins only through these two traits. [`Plugin`] is
//! what an extension unit exposes: a name, a hook table, and a way to reach
//! its own hook methods. [`PluginProvider`] is what the plugin loader exposes:
//! the loaded plugins in load order, and lookup by name.

use crate::events::callback::{CallbackResult, HookTable};
use crate::plugin::error::{PluginError, PluginResult};
use serde_json::Value;
use std::sync::Arc;

/// An independently loaded extension unit
pub trait Plugin: Send + Sync {
    /// Unique plugin name, used for lookup and targeted dispatch
    fn name(&self) -> &str;

    /// Event name -> hook mapping. At most one hook per event.
    ///
    /// Called on every dispatch that targets this plugin; the dispatcher never
    /// mutates the returned table.
    fn registered_hooks(&self) -> HookTable;

    /// Invoke one of this plugin's hook methods by name
    ///
    /// Needed only by plugins whose hook table contains `Hook::method`
    /// entries. The default rejects every method name.
    fn call_hook(&self, method: &str, _args: &[Value]) -> CallbackResult {
        Err(Box::new(PluginError::UnknownHookMethod {
            plugin_name: self.name().to_string(),
            method: method.to_string(),
        }))
    }
}

/// Read access to the set of loaded plugins
pub trait PluginProvider: Send + Sync {
    /// All loaded plugins, in load order
    fn loaded_plugins(&self) -> PluginResult<Vec<Arc<dyn Plugin>>>;

    /// A single loaded plugin by name
    fn loaded_plugin(&self, name: &str) -> PluginResult<Arc<dyn Plugin>>;
}

/// Restricts a dispatch to a specific plugin
#[derive(Clone)]
pub enum PluginTarget {
    /// Resolved through the `PluginProvider` at dispatch time
    Name(String),
    /// Used as-is, loaded or not
    Instance(Arc<dyn Plugin>),
}

impl PluginTarget {
    pub(crate) fn resolve(&self, provider: &dyn PluginProvider) -> PluginResult<Arc<dyn Plugin>> {
        match self {
            PluginTarget::Name(name) => provider.loaded_plugin(name),
            PluginTarget::Instance(plugin) => Ok(Arc::clone(plugin)),
        }
    }
}

impl std::fmt::Debug for PluginTarget {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PluginTarget::Name(name) => f.debug_tuple("Name").field(name).finish(),
            PluginTarget::Instance(plugin) => {
                f.debug_tuple("Instance").field(&plugin.name()).finish()
            }
        }
    }
}

impl From<&str> for PluginTarget {
    fn from(name: &str) -> Self {
        PluginTarget::Name(name.to_string())
    }
}

impl From<String> for PluginTarget {
    fn from(name: String) -> Self {
        PluginTarget::Name(name)
    }
}

impl From<Arc<dyn Plugin>> for PluginTarget {
    fn from(plugin: Arc<dyn Plugin>) -> Self {
        PluginTarget::Instance(plugin)
    }
}
