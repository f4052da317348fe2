//! Tests for the event dispatcher
//!
//! Each dispatcher under test gets its own plugin registry so the suites
//! never share state; only `global_api` touches the process-wide instance.

mod failures;

use crate::events::dispatcher::EventDispatcher;
use crate::plugin::registry::SharedPluginRegistry;
use std::sync::Arc;

/// A fresh registry and a dispatcher resolving plugins through it
fn new_dispatcher() -> (SharedPluginRegistry, EventDispatcher) {
    let registry = SharedPluginRegistry::new();
    let dispatcher = EventDispatcher::new(Arc::new(registry.clone()));
    (registry, dispatcher)
}
