//! Callback descriptors
//!
//! Observers and plugin hooks are both a handler plus a [`Priority`]. The
//! priority is fixed when the descriptor is built, so dispatch never has to
//! inspect a descriptor's shape.

use serde::Deserialize;
use serde_json::Value;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

/// Error type callbacks return; passed through dispatch untouched
pub type CallbackError = Box<dyn std::error::Error + Send + Sync>;

/// Result type callbacks return
pub type CallbackResult = Result<(), CallbackError>;

/// Signature shared by every callback: positional event arguments in,
/// success or failure out
pub type CallbackFn = dyn Fn(&[Value]) -> CallbackResult + Send + Sync;

/// Invocation group within a single dispatch
///
/// Groups run in declaration order: every `Before` callback, then every
/// `Normal` callback, then every `After` callback.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Before,
    #[default]
    Normal,
    After,
}

impl Priority {
    pub const ALL: [Priority; 3] = [Priority::Before, Priority::Normal, Priority::After];

    /// Resolve flag-style markers into a priority.
    ///
    /// `before` takes precedence when both markers are set.
    pub fn from_markers(before: bool, after: bool) -> Self {
        match (before, after) {
            (true, _) => Priority::Before,
            (false, true) => Priority::After,
            (false, false) => Priority::Normal,
        }
    }

    pub(crate) fn index(self) -> usize {
        match self {
            Priority::Before => 0,
            Priority::Normal => 1,
            Priority::After => 2,
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Priority::Before => "before",
            Priority::Normal => "normal",
            Priority::After => "after",
        };
        f.write_str(label)
    }
}

/// An invocable handle with its priority
#[derive(Clone)]
pub struct Callback {
    handle: Arc<CallbackFn>,
    priority: Priority,
}

impl Callback {
    /// A bare handle; runs in the normal group
    pub fn new<F>(f: F) -> Self
    where
        F: Fn(&[Value]) -> CallbackResult + Send + Sync + 'static,
    {
        Self::with_priority(f, Priority::Normal)
    }

    pub fn before<F>(f: F) -> Self
    where
        F: Fn(&[Value]) -> CallbackResult + Send + Sync + 'static,
    {
        Self::with_priority(f, Priority::Before)
    }

    pub fn after<F>(f: F) -> Self
    where
        F: Fn(&[Value]) -> CallbackResult + Send + Sync + 'static,
    {
        Self::with_priority(f, Priority::After)
    }

    pub fn with_priority<F>(f: F, priority: Priority) -> Self
    where
        F: Fn(&[Value]) -> CallbackResult + Send + Sync + 'static,
    {
        Self {
            handle: Arc::new(f),
            priority,
        }
    }

    /// Wrap an already shared handle
    pub fn from_handle(handle: Arc<CallbackFn>, priority: Priority) -> Self {
        Self { handle, priority }
    }

    pub fn priority(&self) -> Priority {
        self.priority
    }

    pub fn invoke(&self, args: &[Value]) -> CallbackResult {
        (self.handle)(args)
    }
}

impl fmt::Debug for Callback {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Callback")
            .field("priority", &self.priority)
            .finish_non_exhaustive()
    }
}

/// What a plugin hook calls
#[derive(Clone)]
pub enum HookHandler {
    /// One of the owning plugin's methods, reached through `Plugin::call_hook`
    Method(String),
    /// A free-standing closure
    Function(Arc<CallbackFn>),
}

impl fmt::Debug for HookHandler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HookHandler::Method(name) => f.debug_tuple("Method").field(name).finish(),
            HookHandler::Function(_) => f.write_str("Function(..)"),
        }
    }
}

/// One entry of a plugin's hook table
#[derive(Debug, Clone)]
pub struct Hook {
    handler: HookHandler,
    priority: Priority,
}

impl Hook {
    /// Hook dispatched to the plugin's own method `name`
    pub fn method(name: impl Into<String>) -> Self {
        Self {
            handler: HookHandler::Method(name.into()),
            priority: Priority::Normal,
        }
    }

    /// Hook dispatched to a closure
    pub fn function<F>(f: F) -> Self
    where
        F: Fn(&[Value]) -> CallbackResult + Send + Sync + 'static,
    {
        Self {
            handler: HookHandler::Function(Arc::new(f)),
            priority: Priority::Normal,
        }
    }

    pub fn before(self) -> Self {
        self.with_priority(Priority::Before)
    }

    pub fn after(self) -> Self {
        self.with_priority(Priority::After)
    }

    pub fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = priority;
        self
    }

    pub fn handler(&self) -> &HookHandler {
        &self.handler
    }

    pub fn priority(&self) -> Priority {
        self.priority
    }
}

impl From<Callback> for Hook {
    fn from(callback: Callback) -> Self {
        Self {
            handler: HookHandler::Function(callback.handle),
            priority: callback.priority,
        }
    }
}

/// A plugin's hooks keyed by event name
pub type HookTable = HashMap<String, Hook>;

/// Declarative hook descriptor: `{ "function": "onTrack", "before": true }`
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct HookSpec {
    pub function: String,
    #[serde(default)]
    pub before: bool,
    #[serde(default)]
    pub after: bool,
}

impl HookSpec {
    pub fn into_hook(self) -> Hook {
        if self.before && self.after {
            log::warn!(
                "Hook '{}' is marked both before and after; running it in the before group",
                self.function
            );
        }
        let priority = Priority::from_markers(self.before, self.after);
        Hook::method(self.function).with_priority(priority)
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum HookEntry {
    Method(String),
    Spec(HookSpec),
}

/// Parse a JSON object of `event name -> method name | HookSpec` into a
/// hook table of method hooks
pub fn hook_table_from_json(json: &str) -> Result<HookTable, serde_json::Error> {
    let entries: HashMap<String, HookEntry> = serde_json::from_str(json)?;
    Ok(entries
        .into_iter()
        .map(|(event, entry)| {
            let hook = match entry {
                HookEntry::Method(function) => Hook::method(function),
                HookEntry::Spec(spec) => spec.into_hook(),
            };
            (event, hook)
        })
        .collect())
}
