//! Error types for event dispatch

use crate::core::error_handling::ContextualError;
use crate::events::callback::CallbackError;
use crate::plugin::error::PluginError;

#[derive(Debug, thiserror::Error)]
pub enum DispatchError {
    #[error("Event name must not be empty")]
    EmptyEventName,

    #[error("Plugin subsystem error while dispatching")]
    Plugin {
        #[from]
        #[source]
        source: PluginError,
    },

    /// A resolved callback failed; `source` is the callback's own error
    #[error("Callback for event '{event}' failed: {source}")]
    Callback {
        event: String,
        #[source]
        source: CallbackError,
    },

    #[error("{message}")]
    Synchronisation { message: String },
}

/// Result type for dispatch operations
pub type DispatchResult<T> = Result<T, DispatchError>;

impl DispatchError {
    /// Recover the error a callback returned, if that is what failed
    pub fn into_callback_error(self) -> Option<CallbackError> {
        match self {
            DispatchError::Callback { source, .. } => Some(source),
            _ => None,
        }
    }

    pub(crate) fn synchronisation(message: String) -> Self {
        DispatchError::Synchronisation { message }
    }
}

impl ContextualError for DispatchError {
    fn is_user_actionable(&self) -> bool {
        match self {
            DispatchError::EmptyEventName => true,
            DispatchError::Plugin { source } => source.is_user_actionable(),
            _ => false,
        }
    }

    fn user_message(&self) -> Option<&str> {
        match self {
            DispatchError::EmptyEventName => Some("Event name must not be empty"),
            DispatchError::Plugin { source } => source.user_message(),
            _ => None,
        }
    }
}
