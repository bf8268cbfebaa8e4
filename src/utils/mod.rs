//! The `utils` module holds what the rest of `notibus` shares: the error
//! types and the tracing setup.

pub mod error;
pub mod logging;

#[cfg(test)]
mod tests {
    use super::error::{BusError, HandlerError};
    use super::logging;

    #[test]
    fn logging_init_accepts_levels() {
        logging::init("info");
        logging::init("debug");
        logging::init("warn");
    }

    #[test]
    fn parse_level_falls_back_to_info() {
        assert_eq!(logging::parse_level("ERROR"), tracing::Level::ERROR);
        assert_eq!(logging::parse_level("warning"), tracing::Level::WARN);
        assert_eq!(logging::parse_level(" trace "), tracing::Level::TRACE);
        assert_eq!(logging::parse_level("loud"), tracing::Level::INFO);
    }

    #[test]
    fn bus_error_labels_and_messages() {
        let err = BusError::InvalidArgument { what: "topic id" };
        assert_eq!(err.as_label(), "bus_invalid_argument");
        assert_eq!(err.to_string(), "invalid argument: topic id must not be empty");

        let err = BusError::Handler {
            subscriber: "101".into(),
            source: HandlerError::rejected("inbox full"),
        };
        assert_eq!(err.as_label(), "bus_handler_failed");
        assert!(err.to_string().contains("inbox full"));
        assert_eq!(BusError::Poisoned.as_label(), "bus_poisoned");
    }

    #[test]
    fn require_non_empty_rejects_blank() {
        assert!(super::error::require_non_empty("1", "topic id").is_ok());
        assert!(matches!(
            super::error::require_non_empty("  ", "topic id"),
            Err(BusError::InvalidArgument { what: "topic id" })
        ));
    }
}
