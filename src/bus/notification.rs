//! Notification value
//!
//! A `Notification` is created when something is published and is never
//! mutated afterwards. Subscribers only ever see it by shared reference.

use std::fmt;

use chrono::{DateTime, Utc};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    content: String,
    topic_name: Option<String>,
    created_at: DateTime<Utc>,
}

impl Notification {
    /// Create a notification that is not yet tied to a topic.
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            topic_name: None,
            created_at: Utc::now(),
        }
    }

    /// Create a notification carrying the name of the topic it belongs to.
    pub fn for_topic(content: impl Into<String>, topic_name: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            topic_name: Some(topic_name.into()),
            created_at: Utc::now(),
        }
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn topic_name(&self) -> Option<&str> {
        self.topic_name.as_deref()
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Copy of this notification attributed to `topic_name`, keeping its
    /// creation time.
    pub(crate) fn stamped(self, topic_name: &str) -> Self {
        Self {
            topic_name: Some(topic_name.to_string()),
            ..self
        }
    }
}

impl fmt::Display for Notification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.topic_name {
            Some(topic) => write!(f, "[{topic}] {}", self.content),
            None => f.write_str(&self.content),
        }
    }
}
