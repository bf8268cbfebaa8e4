//! The `bus` module is the publish-subscribe core: topics, subscribers,
//! notifications and the engine that fans notifications out.

pub mod engine;
pub mod global;
pub mod notification;
pub mod subscriber;
pub mod topic;

pub use engine::{DeliveryFailure, DeliveryPolicy, DeliveryReport, NotificationBus, SharedBus};
pub use notification::Notification;
pub use subscriber::{Mailbox, SinkSubscriber, Subscriber, SubscriberId};
pub use topic::{Topic, TopicId};
