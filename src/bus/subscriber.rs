//! Subscriber capability
//!
//! Everything that can receive notifications implements [`Subscriber`]. The
//! bus only needs the identity (`id`, `name`) and the handler, so there is
//! one trait for every kind of consumer.

use std::fmt;
use std::sync::{Arc, Mutex};

use uuid::Uuid;

use crate::bus::notification::Notification;
use crate::sink::LoggingSink;
use crate::utils::error::HandlerError;

pub type SubscriberId = String;

/// A registered recipient of notifications.
///
/// Handlers run synchronously on the publishing thread. Returning an error
/// hands the failure to the bus, which applies its delivery policy.
pub trait Subscriber: Send + Sync {
    /// Stable identity; a topic holds at most one subscriber per id.
    fn id(&self) -> &str;

    /// Human-readable name used in log lines.
    fn name(&self) -> &str;

    fn on_notification(&self, notification: &Notification) -> Result<(), HandlerError>;
}

/// Subscriber that reports each notification it receives to a sink.
pub struct SinkSubscriber {
    id: SubscriberId,
    name: String,
    sink: Arc<dyn LoggingSink>,
}

impl SinkSubscriber {
    pub fn new(id: impl Into<String>, name: impl Into<String>, sink: Arc<dyn LoggingSink>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            sink,
        }
    }

    /// Same as [`SinkSubscriber::new`] with a generated id.
    pub fn named(name: impl Into<String>, sink: Arc<dyn LoggingSink>) -> Self {
        Self::new(Uuid::new_v4().to_string(), name, sink)
    }
}

impl fmt::Debug for SinkSubscriber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SinkSubscriber")
            .field("id", &self.id)
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

impl Subscriber for SinkSubscriber {
    fn id(&self) -> &str {
        &self.id
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn on_notification(&self, notification: &Notification) -> Result<(), HandlerError> {
        self.sink.log(&format!(
            "Notification received by {}: {}",
            self.name,
            notification.content()
        ));
        Ok(())
    }
}

/// Subscriber that keeps every notification it receives, in order.
#[derive(Debug)]
pub struct Mailbox {
    id: SubscriberId,
    name: String,
    received: Mutex<Vec<Notification>>,
}

impl Mailbox {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            received: Mutex::new(Vec::new()),
        }
    }

    pub fn named(name: impl Into<String>) -> Self {
        Self::new(Uuid::new_v4().to_string(), name)
    }

    /// Snapshot of everything received so far.
    pub fn received(&self) -> Vec<Notification> {
        match self.received.lock() {
            Ok(received) => received.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    /// Contents of everything received so far.
    pub fn contents(&self) -> Vec<String> {
        self.received()
            .iter()
            .map(|n| n.content().to_string())
            .collect()
    }

    /// How many received notifications carry exactly `content`.
    pub fn count_of(&self, content: &str) -> usize {
        self.received()
            .iter()
            .filter(|n| n.content() == content)
            .count()
    }
}

impl Subscriber for Mailbox {
    fn id(&self) -> &str {
        &self.id
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn on_notification(&self, notification: &Notification) -> Result<(), HandlerError> {
        let mut received = match self.received.lock() {
            Ok(received) => received,
            Err(poisoned) => poisoned.into_inner(),
        };
        received.push(notification.clone());
        Ok(())
    }
}
