//! EventDispatcher implementation
//!
//! Resolution collects every callback for an event into three priority
//! groups before any of them runs, so an unknown plugin name aborts the
//! dispatch cleanly instead of halfway through. State locks are released
//! before callbacks are invoked; callbacks may re-enter the dispatcher.

use crate::core::sync::handle_mutex_poison;
use crate::events::callback::{Callback, HookHandler, Priority};
use crate::events::error::{DispatchError, DispatchResult};
use crate::plugin::traits::{Plugin, PluginProvider, PluginTarget};
use serde_json::Value;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};

/// An event retained for replay to plugins loaded later
#[derive(Debug, Clone, PartialEq)]
pub struct PendingEvent {
    pub name: String,
    pub args: Vec<Value>,
}

#[derive(Default)]
struct DispatcherState {
    observers: HashMap<String, Vec<Callback>>,
    pending: Vec<PendingEvent>,
}

/// Callbacks for one dispatch, indexed by `Priority::index`
type ResolvedCallbacks = [Vec<Callback>; 3];

pub struct EventDispatcher {
    provider: Arc<dyn PluginProvider>,
    state: Mutex<DispatcherState>,
    test_mode: AtomicBool,
}

impl std::fmt::Debug for EventDispatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventDispatcher")
            .field("test_mode", &self.is_test_mode())
            .finish_non_exhaustive()
    }
}

impl EventDispatcher {
    pub fn new(provider: Arc<dyn PluginProvider>) -> Self {
        Self {
            provider,
            state: Mutex::new(DispatcherState::default()),
            test_mode: AtomicBool::new(false),
        }
    }

    /// Create a dispatcher with observers already registered, in iteration order
    pub fn with_observers<I>(provider: Arc<dyn PluginProvider>, observers: I) -> Self
    where
        I: IntoIterator<Item = (String, Callback)>,
    {
        let mut state = DispatcherState::default();
        for (name, callback) in observers {
            log::trace!("Seeding observer for '{}' ({})", name, callback.priority());
            state.observers.entry(name).or_default().push(callback);
        }

        Self {
            provider,
            state: Mutex::new(state),
            test_mode: AtomicBool::new(false),
        }
    }

    /// Announce `name` with `args`.
    ///
    /// With `pending` set, the event is recorded for
    /// [`post_pending_events_to`](Self::post_pending_events_to) before
    /// dispatch begins. `plugins` restricts plugin hooks to the listed
    /// targets; `None` means every loaded plugin. Ad-hoc observers always run.
    ///
    /// Callbacks run before -> normal -> after. The first failing callback
    /// ends the dispatch and its error is returned.
    pub fn post_event(
        &self,
        name: &str,
        args: &[Value],
        pending: bool,
        plugins: Option<&[PluginTarget]>,
    ) -> DispatchResult<()> {
        if name.is_empty() {
            return Err(DispatchError::EmptyEventName);
        }

        if pending {
            let mut state = self.lock_state()?;
            state.pending.push(PendingEvent {
                name: name.to_string(),
                args: args.to_vec(),
            });
            log::trace!(
                "Recorded pending event '{}' ({} pending)",
                name,
                state.pending.len()
            );
        }

        self.dispatch(name, args, plugins)
    }

    /// Register an ad-hoc observer. Registering the same callback twice
    /// makes it run twice.
    pub fn add_observer(&self, name: &str, callback: Callback) -> DispatchResult<()> {
        if name.is_empty() {
            return Err(DispatchError::EmptyEventName);
        }

        let mut state = self.lock_state()?;
        log::trace!("Adding {} observer for '{}'", callback.priority(), name);
        state
            .observers
            .entry(name.to_string())
            .or_default()
            .push(callback);
        Ok(())
    }

    /// Drop every ad-hoc observer for `name`. Plugin hooks are unaffected.
    pub fn clear_observers(&self, name: &str) -> DispatchResult<()> {
        let mut state = self.lock_state()?;
        state.observers.insert(name.to_string(), Vec::new());
        log::trace!("Cleared observers for '{}'", name);
        Ok(())
    }

    /// Replay every pending event, in the order it was posted, to `plugin`
    /// alone. Replays are never recorded as pending again.
    pub fn post_pending_events_to(&self, plugin: &PluginTarget) -> DispatchResult<()> {
        let pending = self.pending_events()?;
        log::debug!(
            "Replaying {} pending event(s) to {:?}",
            pending.len(),
            plugin
        );

        let targets = std::slice::from_ref(plugin);
        for event in &pending {
            self.dispatch(&event.name, &event.args, Some(targets))?;
        }
        Ok(())
    }

    /// Snapshot of the pending log, oldest first
    pub fn pending_events(&self) -> DispatchResult<Vec<PendingEvent>> {
        Ok(self.lock_state()?.pending.clone())
    }

    pub fn observer_count(&self, name: &str) -> DispatchResult<usize> {
        Ok(self
            .lock_state()?
            .observers
            .get(name)
            .map_or(0, |observers| observers.len()))
    }

    pub fn set_test_mode(&self, enabled: bool) {
        self.test_mode.store(enabled, Ordering::SeqCst);
    }

    pub fn is_test_mode(&self) -> bool {
        self.test_mode.load(Ordering::SeqCst)
    }

    fn dispatch(
        &self,
        name: &str,
        args: &[Value],
        plugins: Option<&[PluginTarget]>,
    ) -> DispatchResult<()> {
        let groups = self.resolve_callbacks(name, plugins)?;
        log::debug!(
            "Dispatching '{}' to {}/{}/{} before/normal/after callback(s)",
            name,
            groups[0].len(),
            groups[1].len(),
            groups[2].len()
        );

        for callback in groups.iter().flatten() {
            callback
                .invoke(args)
                .map_err(|source| DispatchError::Callback {
                    event: name.to_string(),
                    source,
                })?;
        }
        Ok(())
    }

    fn resolve_callbacks(
        &self,
        name: &str,
        plugins: Option<&[PluginTarget]>,
    ) -> DispatchResult<ResolvedCallbacks> {
        let targets = match plugins {
            Some(targets) => targets
                .iter()
                .map(|target| target.resolve(self.provider.as_ref()))
                .collect::<Result<Vec<_>, _>>()?,
            None => self.provider.loaded_plugins()?,
        };

        let mut groups: ResolvedCallbacks = Default::default();

        for plugin in targets {
            if let Some(hook) = plugin.registered_hooks().remove(name) {
                let callback = match hook.handler() {
                    HookHandler::Function(handle) => {
                        Callback::from_handle(Arc::clone(handle), hook.priority())
                    }
                    HookHandler::Method(method) => bind_method(plugin, method, hook.priority()),
                };
                groups[callback.priority().index()].push(callback);
            }
        }

        let state = self.lock_state()?;
        if let Some(observers) = state.observers.get(name) {
            for callback in observers {
                groups[callback.priority().index()].push(callback.clone());
            }
        }

        Ok(groups)
    }

    fn lock_state(&self) -> DispatchResult<MutexGuard<'_, DispatcherState>> {
        handle_mutex_poison(self.state.lock(), DispatchError::synchronisation)
    }
}

fn bind_method(plugin: Arc<dyn Plugin>, method: &str, priority: Priority) -> Callback {
    let method = method.to_string();
    Callback::with_priority(move |args| plugin.call_hook(&method, args), priority)
}
