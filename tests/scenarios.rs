use std::sync::Arc;

use notibus::bus::{Mailbox, Notification, NotificationBus, SinkSubscriber};
use notibus::sink::{MemorySink, NoopSink};

#[test]
fn single_subscriber_receives_hello_once() {
    let mut bus = NotificationBus::new(Arc::new(NoopSink));
    bus.create_topic("channel-1", "Channel1").unwrap();
    let sub1 = Arc::new(Mailbox::new("sub-1", "Sub1"));
    bus.subscribe("channel-1", sub1.clone()).unwrap();

    bus.publish("channel-1", Notification::new("hello")).unwrap();

    assert_eq!(sub1.count_of("hello"), 1);
}

#[test]
fn unsubscribed_member_misses_update() {
    let mut bus = NotificationBus::new(Arc::new(NoopSink));
    bus.create_topic("channel-2", "Channel2").unwrap();
    let sub1 = Arc::new(Mailbox::new("sub-1", "Sub1"));
    let sub2 = Arc::new(Mailbox::new("sub-2", "Sub2"));
    bus.subscribe("channel-2", sub1.clone()).unwrap();
    bus.subscribe("channel-2", sub2.clone()).unwrap();

    bus.unsubscribe("channel-2", "sub-1").unwrap();
    bus.publish("channel-2", Notification::new("update")).unwrap();

    assert_eq!(sub1.count_of("update"), 0);
    assert_eq!(sub2.count_of("update"), 1);
}

#[test]
fn double_subscribe_keeps_list_length_one() {
    let mut bus = NotificationBus::new(Arc::new(NoopSink));
    bus.create_topic("channel-1", "Channel1").unwrap();
    let sub1 = Arc::new(Mailbox::new("sub-1", "Sub1"));

    bus.subscribe("channel-1", sub1.clone()).unwrap();
    bus.subscribe("channel-1", sub1).unwrap();

    assert_eq!(bus.topic("channel-1").unwrap().len(), 1);
}

#[test]
fn publish_without_subscribers_logs_zero_deliveries() {
    let sink = Arc::new(MemorySink::new());
    let mut bus = NotificationBus::new(sink.clone());
    bus.create_topic("empty", "Empty").unwrap();

    let report = bus.publish("empty", Notification::new("echo")).unwrap();

    assert_eq!(report.delivered, 0);
    assert_eq!(
        sink.lines().last().map(String::as_str),
        Some("Published to 'Empty': delivered to 0 subscriber(s)")
    );
}

#[test]
fn channel_uploads_reach_their_subscribers() {
    let sink = Arc::new(MemorySink::new());
    let mut bus = NotificationBus::new(Arc::new(NoopSink));
    bus.create_topic("1", "Channel 1").unwrap();
    bus.create_topic("2", "Channel 2").unwrap();

    let subscriber1 = Arc::new(SinkSubscriber::new("101", "Subscriber 1", sink.clone()));
    let subscriber2 = Arc::new(SinkSubscriber::new("102", "Subscriber 2", sink.clone()));
    bus.subscribe("1", subscriber1.clone()).unwrap();
    bus.subscribe("2", subscriber1).unwrap();
    bus.subscribe("2", subscriber2).unwrap();

    bus.publish("1", Notification::new("New video on Channel 1"))
        .unwrap();
    bus.publish("2", Notification::new("New video on Channel 2"))
        .unwrap();

    let uploads: Vec<String> = sink
        .lines()
        .into_iter()
        .filter(|line| line.contains("New video"))
        .collect();
    assert_eq!(
        uploads,
        vec![
            "Notification received by Subscriber 1: New video on Channel 1",
            "Notification received by Subscriber 1: New video on Channel 2",
            "Notification received by Subscriber 2: New video on Channel 2",
        ]
    );
    assert_eq!(bus.topics_of("101"), vec!["1".to_string(), "2".to_string()]);
}
