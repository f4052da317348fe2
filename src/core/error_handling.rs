//! Generic error reporting
//!
//! Lets the crate log any of its subsystem errors with a detail level that
//! depends on whether the host's user can act on the message.

/// Errors that can tell user-actionable failures apart from system failures
///
/// When `is_user_actionable()` returns `true`, `user_message()` must return
/// `Some(message)`. When it returns `false`, `user_message()` returns `None`.
pub trait ContextualError: std::error::Error {
    /// True if the error carries a message the user can act on directly
    /// (an empty event name, an unknown plugin, a bad config file)
    fn is_user_actionable(&self) -> bool;

    /// The user-facing message for actionable errors
    fn user_message(&self) -> Option<&str>;
}

/// Log an error at `error` level with detail matching its specificity
///
/// User-actionable errors log their own message. System errors log the
/// operation context; the error itself goes to `debug` so that a host at
/// default verbosity is not flooded with internals.
///
/// # Examples
/// ```rust,no_run
/// # use hookbus::core::error_handling::log_error_with_context;
/// # use hookbus::plugin::api::PluginError;
/// let err = PluginError::PluginNotFound { plugin_name: "Goals".to_string() };
/// log_error_with_context(&err, "Replaying pending events");
/// // Logs: "Replaying pending events: Plugin not found: Goals"
/// ```
pub fn log_error_with_context<E: ContextualError + std::fmt::Display + std::fmt::Debug>(
    error: &E,
    operation_context: &str,
) {
    match error.user_message() {
        Some(user_msg) if error.is_user_actionable() => {
            log::error!("{}: {}", operation_context, user_msg);
        }
        _ => log::error!("{}", operation_context),
    }
    log::debug!("DETAIL: {}", error);
    log::debug!("DEBUG_DETAILS: {:?}", error);
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fmt;

    #[derive(Debug)]
    struct TestUserError {
        message: String,
    }

    impl fmt::Display for TestUserError {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            write!(f, "{}", self.message)
        }
    }

    impl std::error::Error for TestUserError {}

    impl ContextualError for TestUserError {
        fn is_user_actionable(&self) -> bool {
            true
        }

        fn user_message(&self) -> Option<&str> {
            Some(&self.message)
        }
    }

    #[derive(Debug)]
    struct TestSystemError;

    impl fmt::Display for TestSystemError {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            write!(f, "lock poisoned")
        }
    }

    impl std::error::Error for TestSystemError {}

    impl ContextualError for TestSystemError {
        fn is_user_actionable(&self) -> bool {
            false
        }

        fn user_message(&self) -> Option<&str> {
            None
        }
    }

    #[test]
    fn test_user_actionable_error_exposes_message() {
        let error = TestUserError {
            message: "Unknown plugin 'Goals'".to_string(),
        };

        assert!(error.is_user_actionable());
        assert_eq!(error.user_message(), Some("Unknown plugin 'Goals'"));
        log_error_with_context(&error, "Posting event");
    }

    #[test]
    fn test_system_error_has_no_user_message() {
        assert!(!TestSystemError.is_user_actionable());
        assert_eq!(TestSystemError.user_message(), None);
        log_error_with_context(&TestSystemError, "Posting event");
    }
}
