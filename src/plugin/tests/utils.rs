//! Plugin Test Utilities
//!
//! Mock plugins and call recorders shared by the plugin and event test suites.

use crate::events::callback::{CallbackResult, Hook, HookTable, Priority};
use crate::plugin::traits::Plugin;
use serde_json::Value;
use std::sync::{Arc, Mutex};

/// Ordered record of callback invocations, shared across callbacks
pub type CallLog = Arc<Mutex<Vec<String>>>;

pub fn new_call_log() -> CallLog {
    Arc::new(Mutex::new(Vec::new()))
}

pub fn entries(log: &CallLog) -> Vec<String> {
    log.lock().unwrap().clone()
}

/// `label(args)` with args rendered as a JSON array, e.g. `f1[1,2]`
pub fn render_call(label: &str, args: &[Value]) -> String {
    format!("{}{}", label, Value::Array(args.to_vec()))
}

/// Callback body that appends `label(args)` to `log`
pub fn recorder(
    log: &CallLog,
    label: &str,
) -> impl Fn(&[Value]) -> CallbackResult + Send + Sync + 'static {
    let log = Arc::clone(log);
    let label = label.to_string();
    move |args| {
        log.lock().unwrap().push(render_call(&label, args));
        Ok(())
    }
}

#[derive(Debug, Clone)]
enum MockHook {
    Method(Priority),
    Function(Priority),
    Failing,
}

/// Configurable plugin whose hooks record into a call log
///
/// Method hooks and closure hooks both record `Name:event[args]`.
#[derive(Debug)]
pub struct MockPlugin {
    name: String,
    hooks: Vec<(String, MockHook)>,
    log: CallLog,
}

impl MockPlugin {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            hooks: Vec::new(),
            log: new_call_log(),
        }
    }

    pub fn with_call_log(mut self, log: &CallLog) -> Self {
        self.log = Arc::clone(log);
        self
    }

    /// Method hook for `event`; the method name is the event name
    pub fn with_hook(mut self, event: &str, priority: Priority) -> Self {
        self.hooks.push((event.to_string(), MockHook::Method(priority)));
        self
    }

    /// Closure hook for `event`
    pub fn with_function_hook(mut self, event: &str, priority: Priority) -> Self {
        self.hooks
            .push((event.to_string(), MockHook::Function(priority)));
        self
    }

    /// Method hook for `event` that always fails
    pub fn with_failing_hook(mut self, event: &str) -> Self {
        self.hooks.push((event.to_string(), MockHook::Failing));
        self
    }

    pub fn calls(&self) -> Vec<String> {
        entries(&self.log)
    }

    fn label(&self, event: &str) -> String {
        format!("{}:{}", self.name, event)
    }
}

impl Plugin for MockPlugin {
    fn name(&self) -> &str {
        &self.name
    }

    fn registered_hooks(&self) -> HookTable {
        self.hooks
            .iter()
            .map(|(event, hook)| {
                let hook = match hook {
                    MockHook::Method(priority) => Hook::method(event.clone()).with_priority(*priority),
                    MockHook::Function(priority) => {
                        Hook::function(recorder(&self.log, &self.label(event)))
                            .with_priority(*priority)
                    }
                    MockHook::Failing => Hook::method("fail"),
                };
                (event.clone(), hook)
            })
            .collect()
    }

    fn call_hook(&self, method: &str, args: &[Value]) -> CallbackResult {
        if method == "fail" {
            return Err(Box::new(std::io::Error::new(
                std::io::ErrorKind::Other,
                format!("{} hook failed", self.name),
            )));
        }
        self.log
            .lock()
            .unwrap()
            .push(render_call(&self.label(method), args));
        Ok(())
    }
}
