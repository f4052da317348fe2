//! Public API for the event system
//!
//! External modules should import from here rather than directly from
//! internal modules. Besides the re-exports, this module owns the
//! process-wide dispatcher and the free-standing wrappers over it.

use std::sync::{Arc, LazyLock};

use crate::core::settings::{Settings, SettingsResult};
use crate::plugin::traits::PluginTarget;
use serde_json::Value;

pub use crate::events::callback::{
    hook_table_from_json, Callback, CallbackError, CallbackFn, CallbackResult, Hook, HookHandler,
    HookSpec, HookTable, Priority,
};
pub use crate::events::dispatcher::{EventDispatcher, PendingEvent};
pub use crate::events::error::{DispatchError, DispatchResult};
pub use crate::events::observers::{registered_global_observers, GlobalObserver};

/// Process-wide dispatcher, backed by the global plugin registry
static EVENT_DISPATCHER: LazyLock<Arc<EventDispatcher>> = LazyLock::new(|| {
    log::trace!("Initializing event dispatcher");
    let provider = Arc::new(crate::plugin::api::get_plugin_registry());
    let dispatcher = EventDispatcher::with_observers(provider, registered_global_observers());
    dispatcher.set_test_mode(Settings::from_env().test_mode);
    Arc::new(dispatcher)
});

/// Access the process-wide dispatcher
///
/// Every call returns the same shared instance.
///
/// # Examples
/// ```no_run
/// # use hookbus::events::api::{get_event_dispatcher, Callback};
/// # fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let dispatcher = get_event_dispatcher();
/// dispatcher.add_observer("Request.dispatch", Callback::new(|_args| Ok(())))?;
/// dispatcher.post_event("Request.dispatch", &[], false, None)?;
/// # Ok(())
/// # }
/// ```
pub fn get_event_dispatcher() -> Arc<EventDispatcher> {
    Arc::clone(&EVENT_DISPATCHER)
}

/// Post an event on the process-wide dispatcher
pub fn post_event(
    name: &str,
    args: &[Value],
    pending: bool,
    plugins: Option<&[PluginTarget]>,
) -> DispatchResult<()> {
    EVENT_DISPATCHER.post_event(name, args, pending, plugins)
}

/// Register an observer on the process-wide dispatcher
pub fn add_action(name: &str, callback: Callback) -> DispatchResult<()> {
    EVENT_DISPATCHER.add_observer(name, callback)
}

/// Post an event only while test mode is enabled; otherwise do nothing
pub fn post_test_event(
    name: &str,
    args: &[Value],
    pending: bool,
    plugins: Option<&[PluginTarget]>,
) -> DispatchResult<()> {
    if !EVENT_DISPATCHER.is_test_mode() {
        log::trace!("Skipping test event '{}' outside test mode", name);
        return Ok(());
    }
    EVENT_DISPATCHER.post_event(name, args, pending, plugins)
}

/// Toggle the process-wide test-mode marker
pub fn set_test_mode(enabled: bool) {
    EVENT_DISPATCHER.set_test_mode(enabled);
}

/// Apply loaded settings: test mode, then logging
///
/// Logging is only initialised when the settings name a level and no
/// hookbus logger is running yet.
pub fn configure(settings: &Settings) -> SettingsResult<()> {
    set_test_mode(settings.test_mode);
    if settings.logging.level.is_some() && !crate::core::logging::is_logging_initialised() {
        settings.init_logging().inspect_err(|e| {
            crate::core::error_handling::log_error_with_context(e, "Initialising logging");
        })?;
    }
    Ok(())
}
