//! # Bus Errors
//!
//! Errors returned synchronously from registry operations.

use thiserror::Error;

/// Errors from subscribe and unsubscribe operations.
///
/// Faults raised while a callback runs are never converted into a
/// `BusError`; they unwind through whichever execution context invoked
/// the callback.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum BusError {
    /// The value offered as a handler cannot be invoked.
    #[error("Handler for topic {topic} is not invocable: {reason}")]
    InvalidHandler { topic: String, reason: String },

    /// Unsubscribe was called on a topic with no registered handlers.
    #[error("Topic {topic} doesn't exist")]
    UnknownTopic { topic: String },
}

impl BusError {
    pub(crate) fn invalid_handler(topic: &str, reason: impl Into<String>) -> Self {
        Self::InvalidHandler {
            topic: topic.to_string(),
            reason: reason.into(),
        }
    }

    pub(crate) fn unknown_topic(topic: &str) -> Self {
        Self::UnknownTopic {
            topic: topic.to_string(),
        }
    }
}
