//! Topic management
//!
//! A `Topic` holds the ordered list of subscribers for one channel. The list
//! is membership only: the same subscriber may sit in many topics, and a
//! duplicate subscribe is a no-op so each id appears at most once.
//!
//! Concurrency note: callers must synchronize access to `Topic` (for example
//! via the bus lock) when modifying subscriptions.

use std::fmt;
use std::sync::Arc;

use uuid::Uuid;

use crate::bus::subscriber::Subscriber;

pub type TopicId = String;

pub struct Topic {
    pub id: TopicId,
    pub name: String,
    subscribers: Vec<Arc<dyn Subscriber>>,
}

impl Topic {
    /// Create a new topic with the given id and name.
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            subscribers: Vec::new(),
        }
    }

    /// Create a new topic with a generated id.
    pub fn named(name: impl Into<String>) -> Self {
        Self::new(Uuid::new_v4().to_string(), name)
    }

    /// Append a subscriber. Returns `false` if one with the same id is
    /// already present.
    pub fn subscribe(&mut self, subscriber: Arc<dyn Subscriber>) -> bool {
        if self.contains(subscriber.id()) {
            return false;
        }
        self.subscribers.push(subscriber);
        true
    }

    /// Remove a subscriber by id, keeping the order of the others.
    pub fn unsubscribe(&mut self, id: &str) -> Option<Arc<dyn Subscriber>> {
        let pos = self.subscribers.iter().position(|s| s.id() == id)?;
        Some(self.subscribers.remove(pos))
    }

    pub fn contains(&self, id: &str) -> bool {
        self.subscribers.iter().any(|s| s.id() == id)
    }

    /// Subscribers in registration order.
    pub fn subscribers(&self) -> &[Arc<dyn Subscriber>] {
        &self.subscribers
    }

    pub fn subscriber_ids(&self) -> Vec<&str> {
        self.subscribers.iter().map(|s| s.id()).collect()
    }

    pub fn len(&self) -> usize {
        self.subscribers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.subscribers.is_empty()
    }
}

impl fmt::Debug for Topic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Topic")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("subscribers", &self.subscriber_ids())
            .finish()
    }
}
