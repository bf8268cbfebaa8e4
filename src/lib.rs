//! # notibus
//!
//! `notibus` is a small, in-process publish/subscribe core. Topics hold an
//! ordered list of subscribers; publishing a notification hands it to each of
//! them synchronously, in the order they subscribed.
//!
//! ## Core Modules
//!
//! - `bus`: topics, subscribers, notifications, the fan-out engine and the
//!   process-wide bus instance.
//! - `sink`: where human-readable bus events are written.
//! - `vending`: a vending machine whose behavior is driven by its state.
//! - `config`: loading settings from files and the environment.
//! - `utils`: error types and tracing setup.

pub mod bus;
pub mod config;
pub mod sink;
pub mod utils;
pub mod vending;

pub use bus::{Notification, NotificationBus, Subscriber, Topic};
pub use utils::error::{BusError, HandlerError};
