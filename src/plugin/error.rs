//! Plugin Error Handling
//!
//! Errors raised by the plugin registry, by plugins resolving their own hook
//! methods, and by the manager while replaying pending events.

use crate::core::error_handling::ContextualError;
use crate::events::error::DispatchError;

/// Result type alias for plugin operations
pub type PluginResult<T> = std::result::Result<T, PluginError>;

#[derive(Debug, thiserror::Error)]
pub enum PluginError {
    /// Plugin not found in registry
    #[error("Plugin not found: {plugin_name}")]
    PluginNotFound { plugin_name: String },

    /// A plugin with the same name is already loaded
    #[error("Plugin '{plugin_name}' is already loaded")]
    AlreadyLoaded { plugin_name: String },

    /// A method hook names a method the plugin does not provide
    #[error("Plugin '{plugin_name}' has no hook method '{method}'")]
    UnknownHookMethod { plugin_name: String, method: String },

    /// The plugin was loaded but replaying pending events to it failed
    #[error("Failed to replay pending events to plugin '{plugin_name}'")]
    ReplayFailed {
        plugin_name: String,
        #[source]
        source: Box<DispatchError>,
    },

    #[error("{message}")]
    Synchronisation { message: String },
}

impl PluginError {
    pub(crate) fn synchronisation(message: String) -> Self {
        PluginError::Synchronisation { message }
    }
}

impl ContextualError for PluginError {
    fn is_user_actionable(&self) -> bool {
        matches!(
            self,
            PluginError::PluginNotFound { .. }
                | PluginError::AlreadyLoaded { .. }
                | PluginError::UnknownHookMethod { .. }
        )
    }

    fn user_message(&self) -> Option<&str> {
        match self {
            PluginError::PluginNotFound { .. } => Some("The requested plugin is not loaded"),
            PluginError::AlreadyLoaded { .. } => Some("A plugin with this name is already loaded"),
            PluginError::UnknownHookMethod { .. } => {
                Some("A plugin hook refers to a method the plugin does not provide")
            }
            _ => None,
        }
    }
}
