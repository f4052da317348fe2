//! Fail-fast error propagation

use super::new_dispatcher;
use crate::core::error_handling::ContextualError;
use crate::events::api::{Callback, CallbackError, DispatchError, Priority};
use crate::plugin::error::PluginError;
use crate::plugin::tests::utils::{entries, new_call_log, recorder, MockPlugin};
use std::fmt;
use std::sync::Arc;

#[derive(Debug, PartialEq)]
struct QuotaExceeded {
    site: u32,
}

impl fmt::Display for QuotaExceeded {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "quota exceeded for site {}", self.site)
    }
}

impl std::error::Error for QuotaExceeded {}

#[test]
fn test_callback_error_propagates_unchanged() {
    let (_registry, dispatcher) = new_dispatcher();
    dispatcher
        .add_observer(
            "Tracker.record",
            Callback::new(|_| Err(Box::new(QuotaExceeded { site: 3 }) as CallbackError)),
        )
        .unwrap();

    let err = dispatcher
        .post_event("Tracker.record", &[], false, None)
        .unwrap_err();
    assert!(matches!(&err, DispatchError::Callback { event, .. } if event == "Tracker.record"));

    let original = err.into_callback_error().unwrap();
    assert_eq!(
        original.downcast_ref::<QuotaExceeded>(),
        Some(&QuotaExceeded { site: 3 })
    );
}

#[test]
fn test_failure_stops_remaining_callbacks() {
    let (_registry, dispatcher) = new_dispatcher();
    let log = new_call_log();

    dispatcher
        .add_observer("E", Callback::before(recorder(&log, "first")))
        .unwrap();
    dispatcher
        .add_observer("E", Callback::new(|_| Err("boom".into())))
        .unwrap();
    dispatcher
        .add_observer("E", Callback::new(recorder(&log, "same-group")))
        .unwrap();
    dispatcher
        .add_observer("E", Callback::after(recorder(&log, "later-group")))
        .unwrap();

    assert!(dispatcher.post_event("E", &[], false, None).is_err());
    assert_eq!(entries(&log), vec!["first[]"]);
}

#[test]
fn test_failing_plugin_hook_propagates() {
    let (registry, dispatcher) = new_dispatcher();
    registry
        .register_plugin(Arc::new(MockPlugin::new("Broken").with_failing_hook("E")))
        .unwrap();

    let err = dispatcher.post_event("E", &[], false, None).unwrap_err();
    let source = err.into_callback_error().unwrap();
    assert_eq!(source.to_string(), "Broken hook failed");
}

#[test]
fn test_unknown_hook_method_surfaces_plugin_error() {
    struct Sparse;

    impl crate::plugin::traits::Plugin for Sparse {
        fn name(&self) -> &str {
            "Sparse"
        }

        fn registered_hooks(&self) -> crate::events::api::HookTable {
            crate::events::api::HookTable::from([(
                "E".to_string(),
                crate::events::api::Hook::method("notImplemented").with_priority(Priority::After),
            )])
        }
    }

    let (registry, dispatcher) = new_dispatcher();
    registry.register_plugin(Arc::new(Sparse)).unwrap();

    let err = dispatcher.post_event("E", &[], false, None).unwrap_err();
    let source = err.into_callback_error().unwrap();
    assert!(matches!(
        source.downcast_ref::<PluginError>(),
        Some(PluginError::UnknownHookMethod { method, .. }) if method == "notImplemented"
    ));
}

#[test]
fn test_empty_event_name_rejected() {
    let (_registry, dispatcher) = new_dispatcher();

    let err = dispatcher.post_event("", &[], true, None).unwrap_err();
    assert!(matches!(err, DispatchError::EmptyEventName));
    assert!(err.is_user_actionable());
    assert!(dispatcher.pending_events().unwrap().is_empty());

    assert!(matches!(
        dispatcher.add_observer("", Callback::new(|_| Ok(()))),
        Err(DispatchError::EmptyEventName)
    ));
}

#[test]
#[should_panic(expected = "observer panicked")]
fn test_panicking_callback_is_not_caught() {
    let (_registry, dispatcher) = new_dispatcher();
    dispatcher
        .add_observer("E", Callback::new(|_| panic!("observer panicked")))
        .unwrap();

    let _ = dispatcher.post_event("E", &[], false, None);
}

#[test]
fn test_dispatcher_usable_after_panicking_callback() {
    let (_registry, dispatcher) = new_dispatcher();
    let dispatcher = Arc::new(dispatcher);
    let log = new_call_log();

    dispatcher
        .add_observer("Bad", Callback::new(|_| panic!("observer panicked")))
        .unwrap();
    dispatcher
        .add_observer("Good", Callback::new(recorder(&log, "good")))
        .unwrap();

    let worker = Arc::clone(&dispatcher);
    let outcome = std::thread::spawn(move || worker.post_event("Bad", &[], false, None)).join();
    assert!(outcome.is_err());

    dispatcher.post_event("Good", &[], false, None).unwrap();
    assert_eq!(entries(&log), vec!["good[]"]);
}
