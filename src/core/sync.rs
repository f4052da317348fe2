//! Lock poisoning helpers
//!
//! The dispatcher and plugin registry guard their state with std locks. A
//! callback that panics while another thread holds one of those locks
//! poisons it; these helpers turn that into the caller's error type so the
//! next dispatch reports a `Synchronisation` error instead of panicking.

use std::sync::{LockResult, MutexGuard, RwLockReadGuard, RwLockWriteGuard};

/// Map a poisoned `Mutex::lock()` result into an application error
///
/// # Examples
/// ```
/// use std::sync::Mutex;
/// use hookbus::core::sync::handle_mutex_poison;
/// use hookbus::events::api::DispatchError;
///
/// let mutex = Mutex::new(Vec::<String>::new());
/// let guard = handle_mutex_poison(mutex.lock(), |message| {
///     DispatchError::Synchronisation { message }
/// })
/// .unwrap();
/// assert!(guard.is_empty());
/// ```
pub fn handle_mutex_poison<'a, T, E>(
    result: LockResult<MutexGuard<'a, T>>,
    error_constructor: impl FnOnce(String) -> E,
) -> Result<MutexGuard<'a, T>, E> {
    result.map_err(|poison_err| {
        error_constructor(format!(
            "Internal synchronisation error (mutex poisoned). A callback panicked while the lock was held. PoisonError: {:?}",
            poison_err
        ))
    })
}

/// Map a poisoned `RwLock::read()` result into an application error
pub fn handle_rwlock_read<'a, T, E>(
    result: LockResult<RwLockReadGuard<'a, T>>,
    error_constructor: impl FnOnce(String) -> E,
) -> Result<RwLockReadGuard<'a, T>, E> {
    result.map_err(|poison_err| {
        error_constructor(format!(
            "Internal synchronisation error (RwLock read poisoned). A writer panicked while holding the lock. PoisonError: {:?}",
            poison_err
        ))
    })
}

/// Map a poisoned `RwLock::write()` result into an application error
pub fn handle_rwlock_write<'a, T, E>(
    result: LockResult<RwLockWriteGuard<'a, T>>,
    error_constructor: impl FnOnce(String) -> E,
) -> Result<RwLockWriteGuard<'a, T>, E> {
    result.map_err(|poison_err| {
        error_constructor(format!(
            "Internal synchronisation error (RwLock write poisoned). A thread panicked while holding the lock. PoisonError: {:?}",
            poison_err
        ))
    })
}
