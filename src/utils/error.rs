//! The `error` module defines the error types used within `notibus`.
//!
//! - [`BusError`] is what the notification bus surfaces to its callers.
//! - [`HandlerError`] is what a subscriber's handler returns when it cannot
//!   process a notification.
//!
//! Duplicate subscriptions and unsubscribing an absent subscriber are normal
//! operations and never produce an error.

use thiserror::Error;

/// Errors raised by a subscriber while handling a notification.
#[non_exhaustive]
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum HandlerError {
    /// The subscriber refused the notification.
    #[error("notification rejected: {reason}")]
    Rejected {
        /// Why the subscriber refused it.
        reason: String,
    },
}

impl HandlerError {
    /// Convenience constructor for [`HandlerError::Rejected`].
    pub fn rejected(reason: impl Into<String>) -> Self {
        HandlerError::Rejected {
            reason: reason.into(),
        }
    }
}

/// Errors surfaced by the notification bus.
#[non_exhaustive]
#[derive(Error, Debug)]
pub enum BusError {
    /// An empty topic id, subscriber id or subscriber name was passed in.
    #[error("invalid argument: {what} must not be empty")]
    InvalidArgument {
        /// Which argument was rejected.
        what: &'static str,
    },

    /// A subscriber handler failed and delivery was aborted.
    #[error("subscriber '{subscriber}' failed to handle notification: {source}")]
    Handler {
        /// Id of the failing subscriber.
        subscriber: String,
        /// The handler's own error.
        #[source]
        source: HandlerError,
    },

    /// The shared bus lock was poisoned by a panicking holder.
    #[error("notification bus lock poisoned")]
    Poisoned,
}

impl BusError {
    /// Returns a short stable label (snake_case) for use in logs.
    ///
    /// # Example
    /// ```
    /// use notibus::utils::error::BusError;
    ///
    /// let err = BusError::InvalidArgument { what: "topic id" };
    /// assert_eq!(err.as_label(), "bus_invalid_argument");
    /// ```
    pub fn as_label(&self) -> &'static str {
        match self {
            BusError::InvalidArgument { .. } => "bus_invalid_argument",
            BusError::Handler { .. } => "bus_handler_failed",
            BusError::Poisoned => "bus_poisoned",
        }
    }
}

/// Rejects an empty (or whitespace-only) identifier.
pub(crate) fn require_non_empty(value: &str, what: &'static str) -> Result<(), BusError> {
    if value.trim().is_empty() {
        Err(BusError::InvalidArgument { what })
    } else {
        Ok(())
    }
}
