//! Notification bus engine
//!
//! This module contains the in-process bus responsible for:
//! - keeping topics and their ordered subscriber lists
//! - indexing which topics each subscriber belongs to
//! - fanning a published notification out to every subscriber, synchronously
//!   and in registration order
//!
//! Concurrency and usage notes:
//! - `subscribe`/`unsubscribe` take `&mut self` and `publish` takes `&self`.
//!   To share one bus between threads wrap it in a lock ([`SharedBus`]).
//! - Handlers run on the caller's thread while the bus is borrowed, so a
//!   handler cannot change subscriptions during the fan-out it is part of.

use std::collections::{BTreeSet, HashMap};
use std::fmt;
use std::str::FromStr;
use std::sync::{Arc, Mutex};

use crate::bus::notification::Notification;
use crate::bus::subscriber::{Subscriber, SubscriberId};
use crate::bus::topic::{Topic, TopicId};
use crate::config::BusSettings;
use crate::sink::LoggingSink;
use crate::utils::error::{BusError, HandlerError, require_non_empty};

/// A bus shared between threads behind one lock.
pub type SharedBus = Arc<Mutex<NotificationBus>>;

/// What happens when a subscriber's handler fails mid fan-out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DeliveryPolicy {
    /// Abort the remaining fan-out and return the handler's error.
    #[default]
    FailFast,
    /// Keep delivering and report every failure afterwards.
    BestEffort,
}

impl FromStr for DeliveryPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace('-', "_").as_str() {
            "fail_fast" | "failfast" => Ok(DeliveryPolicy::FailFast),
            "best_effort" | "besteffort" => Ok(DeliveryPolicy::BestEffort),
            other => Err(format!("unknown delivery policy '{other}'")),
        }
    }
}

impl fmt::Display for DeliveryPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DeliveryPolicy::FailFast => f.write_str("fail_fast"),
            DeliveryPolicy::BestEffort => f.write_str("best_effort"),
        }
    }
}

/// A handler failure recorded under [`DeliveryPolicy::BestEffort`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeliveryFailure {
    pub subscriber: SubscriberId,
    pub error: HandlerError,
}

/// Outcome of one `publish` call.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeliveryReport {
    pub topic: String,
    pub delivered: usize,
    pub failures: Vec<DeliveryFailure>,
}

impl DeliveryReport {
    fn new(topic: &str) -> Self {
        Self {
            topic: topic.to_string(),
            ..Self::default()
        }
    }

    /// `true` when no handler failed.
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }
}

pub struct NotificationBus {
    topics: HashMap<TopicId, Topic>,
    memberships: HashMap<SubscriberId, BTreeSet<TopicId>>,
    settings: BusSettings,
    sink: Arc<dyn LoggingSink>,
}

impl NotificationBus {
    pub fn new(sink: Arc<dyn LoggingSink>) -> Self {
        Self::with_settings(sink, BusSettings::default())
    }

    pub fn with_settings(sink: Arc<dyn LoggingSink>, settings: BusSettings) -> Self {
        Self {
            topics: HashMap::new(),
            memberships: HashMap::new(),
            settings,
            sink,
        }
    }

    pub fn settings(&self) -> &BusSettings {
        &self.settings
    }

    /// Registers a topic. An existing topic with the same id is returned
    /// as is.
    pub fn create_topic(&mut self, id: &str, name: &str) -> Result<&Topic, BusError> {
        require_non_empty(id, "topic id")?;
        require_non_empty(name, "topic name")?;

        if !self.topics.contains_key(id) {
            self.topics.insert(id.to_string(), Topic::new(id, name));
            self.sink.log(&format!("Created topic '{name}' ({id})"));
        }
        self.topics
            .get(id)
            .ok_or(BusError::InvalidArgument { what: "topic id" })
    }

    pub fn topic(&self, id: &str) -> Option<&Topic> {
        self.topics.get(id)
    }

    pub fn topic_count(&self) -> usize {
        self.topics.len()
    }

    /// Number of subscribers on a topic; zero for unknown topics.
    pub fn subscriber_count(&self, topic_id: &str) -> usize {
        self.topics.get(topic_id).map_or(0, Topic::len)
    }

    /// Ids of the topics a subscriber currently belongs to, sorted.
    pub fn topics_of(&self, subscriber_id: &str) -> Vec<TopicId> {
        self.memberships
            .get(subscriber_id)
            .map(|topics| topics.iter().cloned().collect())
            .unwrap_or_default()
    }

    /// Subscribes to a topic, creating it (named after its id) if unknown.
    ///
    /// Returns `Ok(true)` for a new membership and `Ok(false)` if the
    /// subscriber was already there. A new member immediately receives a
    /// "Subscribed to ..." acknowledgment unless acknowledgments are
    /// switched off.
    pub fn subscribe(
        &mut self,
        topic_id: &str,
        subscriber: Arc<dyn Subscriber>,
    ) -> Result<bool, BusError> {
        require_non_empty(topic_id, "topic id")?;
        require_non_empty(subscriber.id(), "subscriber id")?;
        require_non_empty(subscriber.name(), "subscriber name")?;

        let topic = self
            .topics
            .entry(topic_id.to_string())
            .or_insert_with(|| Topic::new(topic_id, topic_id));

        if !topic.subscribe(Arc::clone(&subscriber)) {
            self.sink.log(&format!(
                "{} is already subscribed to '{}'",
                subscriber.name(),
                topic.name
            ));
            return Ok(false);
        }
        let topic_name = topic.name.clone();

        self.memberships
            .entry(subscriber.id().to_string())
            .or_default()
            .insert(topic_id.to_string());
        self.sink.log(&format!(
            "{} subscribed to '{}'",
            subscriber.name(),
            topic_name
        ));

        if self.settings.acknowledge_subscriptions {
            let ack = Notification::for_topic(format!("Subscribed to {topic_name}"), &topic_name);
            if let Err(source) = subscriber.on_notification(&ack) {
                self.sink.log(&format!(
                    "{} failed to handle subscription acknowledgment: {source}",
                    subscriber.name()
                ));
                if self.settings.delivery == DeliveryPolicy::FailFast {
                    return Err(BusError::Handler {
                        subscriber: subscriber.id().to_string(),
                        source,
                    });
                }
            }
        }

        Ok(true)
    }

    /// Removes a subscriber from a topic. Returns `Ok(false)` when it was
    /// not subscribed (or the topic is unknown).
    pub fn unsubscribe(&mut self, topic_id: &str, subscriber_id: &str) -> Result<bool, BusError> {
        require_non_empty(topic_id, "topic id")?;
        require_non_empty(subscriber_id, "subscriber id")?;

        let removed = self
            .topics
            .get_mut(topic_id)
            .and_then(|topic| topic.unsubscribe(subscriber_id).map(|s| (s, topic.name.clone())));

        match removed {
            Some((subscriber, topic_name)) => {
                self.forget_membership(subscriber_id, topic_id);
                self.sink.log(&format!(
                    "{} unsubscribed from '{}'",
                    subscriber.name(),
                    topic_name
                ));
                Ok(true)
            }
            None => {
                self.sink.log(&format!(
                    "{subscriber_id} is not subscribed to '{topic_id}'; nothing to unsubscribe"
                ));
                Ok(false)
            }
        }
    }

    /// Removes a subscriber from every topic it belongs to. Returns the
    /// number of memberships dropped.
    pub fn unsubscribe_all(&mut self, subscriber_id: &str) -> usize {
        let Some(topic_ids) = self.memberships.remove(subscriber_id) else {
            return 0;
        };

        let mut removed = 0;
        for topic_id in &topic_ids {
            if let Some(topic) = self.topics.get_mut(topic_id) {
                if topic.unsubscribe(subscriber_id).is_some() {
                    removed += 1;
                    self.sink.log(&format!(
                        "Unsubscribed {subscriber_id} from '{}'",
                        topic.name
                    ));
                }
            }
        }

        self.sink
            .log(&format!("Cleaned up subscriber {subscriber_id}"));
        removed
    }

    /// Delivers `notification` to every subscriber of the topic, in
    /// subscription order.
    ///
    /// A notification without a topic name is delivered as a copy carrying
    /// the topic's name. Unknown or empty topics deliver to nobody.
    pub fn publish(
        &self,
        topic_id: &str,
        notification: Notification,
    ) -> Result<DeliveryReport, BusError> {
        require_non_empty(topic_id, "topic id")?;

        let Some(topic) = self.topics.get(topic_id) else {
            self.sink.log(&format!(
                "Topic '{topic_id}' not found; delivered to 0 subscriber(s)"
            ));
            return Ok(DeliveryReport::new(topic_id));
        };

        let notification = if notification.topic_name().is_some() {
            notification
        } else {
            notification.stamped(&topic.name)
        };

        let mut report = DeliveryReport::new(&topic.name);
        for subscriber in topic.subscribers() {
            match subscriber.on_notification(&notification) {
                Ok(()) => report.delivered += 1,
                Err(error) => match self.settings.delivery {
                    DeliveryPolicy::FailFast => {
                        self.sink.log(&format!(
                            "Delivery on '{}' aborted at {}: {error}; delivered to {} of {} subscriber(s)",
                            topic.name,
                            subscriber.name(),
                            report.delivered,
                            topic.len()
                        ));
                        return Err(BusError::Handler {
                            subscriber: subscriber.id().to_string(),
                            source: error,
                        });
                    }
                    DeliveryPolicy::BestEffort => {
                        self.sink.log(&format!(
                            "{} failed to handle notification on '{}': {error}",
                            subscriber.name(),
                            topic.name
                        ));
                        report.failures.push(DeliveryFailure {
                            subscriber: subscriber.id().to_string(),
                            error,
                        });
                    }
                },
            }
        }

        if report.is_complete() {
            self.sink.log(&format!(
                "Published to '{}': delivered to {} subscriber(s)",
                topic.name, report.delivered
            ));
        } else {
            self.sink.log(&format!(
                "Published to '{}': delivered to {} subscriber(s), {} failed",
                topic.name,
                report.delivered,
                report.failures.len()
            ));
        }
        Ok(report)
    }

    fn forget_membership(&mut self, subscriber_id: &str, topic_id: &str) {
        if let Some(topics) = self.memberships.get_mut(subscriber_id) {
            topics.remove(topic_id);
            if topics.is_empty() {
                self.memberships.remove(subscriber_id);
            }
        }
    }
}

impl fmt::Debug for NotificationBus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NotificationBus")
            .field("topics", &self.topics)
            .field("memberships", &self.memberships)
            .field("settings", &self.settings)
            .finish_non_exhaustive()
    }
}
