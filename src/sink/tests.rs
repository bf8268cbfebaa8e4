use super::{LoggingSink, MemorySink, NoopSink, SinkKind, TracingSink};

#[test]
fn test_memory_sink_keeps_order() {
    let sink = MemorySink::new();
    sink.log("first");
    sink.log("second");
    assert_eq!(sink.lines(), vec!["first".to_string(), "second".to_string()]);
    assert_eq!(sink.count_containing("sec"), 1);
}

#[test]
fn test_noop_and_tracing_sinks_accept_lines() {
    crate::utils::logging::init("debug");
    NoopSink.log("dropped");
    TracingSink.log("forwarded to tracing");
}

#[test]
fn test_sink_kind_parse() {
    assert_eq!("tracing".parse::<SinkKind>(), Ok(SinkKind::Tracing));
    assert_eq!("Console".parse::<SinkKind>(), Ok(SinkKind::Console));
    assert_eq!("stdout".parse::<SinkKind>(), Ok(SinkKind::Console));
    assert_eq!("memory".parse::<SinkKind>(), Ok(SinkKind::Memory));
    assert_eq!("noop".parse::<SinkKind>(), Ok(SinkKind::None));
    assert!("syslog".parse::<SinkKind>().is_err());
}

#[test]
fn test_sink_kind_display_round_trips_through_parse() {
    for kind in [
        SinkKind::Tracing,
        SinkKind::Console,
        SinkKind::Memory,
        SinkKind::None,
    ] {
        assert_eq!(kind.to_string().parse::<SinkKind>(), Ok(kind));
    }
}

#[test]
fn test_sink_kind_builds_usable_sink() {
    let sink = SinkKind::None.build();
    sink.log("nothing happens");
}
