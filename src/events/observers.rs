//! Statically registered observers
//!
//! Code anywhere in the final binary can attach an observer to the
//! process-wide dispatcher with the `observer!` macro. Entries are collected
//! through `inventory` and registered when the dispatcher is first used.

use crate::events::callback::{Callback, CallbackResult, Priority};
use serde_json::Value;

/// Entry submitted by `observer!`
pub struct GlobalObserver {
    pub event: &'static str,
    pub priority: Priority,
    pub handler: fn(&[Value]) -> CallbackResult,
}

inventory::collect!(GlobalObserver);

/// Register a function as an observer on the process-wide dispatcher
///
/// ```ignore
/// fn on_visit(args: &[serde_json::Value]) -> hookbus::events::api::CallbackResult {
///     Ok(())
/// }
/// hookbus::observer!("Tracker.newVisit", on_visit);
/// hookbus::observer!("Tracker.end", hookbus::events::api::Priority::After, on_visit);
/// ```
#[macro_export]
macro_rules! observer {
    ($event:expr, $handler:expr) => {
        $crate::observer!($event, $crate::events::api::Priority::Normal, $handler);
    };
    ($event:expr, $priority:expr, $handler:expr) => {
        inventory::submit! {
            $crate::events::api::GlobalObserver {
                event: $event,
                priority: $priority,
                handler: $handler,
            }
        }
    };
}

/// All submitted observers as `(event, callback)` pairs
pub fn registered_global_observers() -> Vec<(String, Callback)> {
    inventory::iter::<GlobalObserver>()
        .map(|entry| {
            let handler = entry.handler;
            (
                entry.event.to_string(),
                Callback::with_priority(handler, entry.priority),
            )
        })
        .collect()
}
