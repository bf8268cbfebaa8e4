//! Process-wide bus
//!
//! One [`NotificationBus`] per process, created on first use. `OnceLock`
//! guarantees that concurrent first callers end up with the same instance
//! and that later calls never take an initialization lock.

use std::sync::{Arc, Mutex, OnceLock};

use tracing::info;

use crate::bus::engine::NotificationBus;
use crate::sink::TracingSink;
use crate::utils::error::BusError;

static BUS: OnceLock<Mutex<NotificationBus>> = OnceLock::new();

fn announce(bus: NotificationBus) -> Mutex<NotificationBus> {
    info!("notification bus instantiated");
    Mutex::new(bus)
}

/// Returns the process-wide bus, creating it with defaults on first call.
pub fn bus() -> &'static Mutex<NotificationBus> {
    BUS.get_or_init(|| announce(NotificationBus::new(Arc::new(TracingSink))))
}

/// Installs a configured bus as the process-wide one.
///
/// Only the first installation (or first [`bus`] call) wins. Returns `false`
/// if an instance already existed; the given bus is then dropped.
pub fn install(bus: NotificationBus) -> bool {
    let mut installed = false;
    BUS.get_or_init(|| {
        installed = true;
        announce(bus)
    });
    installed
}

pub fn is_initialized() -> bool {
    BUS.get().is_some()
}

/// Runs `f` with exclusive access to the process-wide bus.
pub fn with_bus<R>(f: impl FnOnce(&mut NotificationBus) -> R) -> Result<R, BusError> {
    let mut guard = bus().lock().map_err(|_| BusError::Poisoned)?;
    Ok(f(&mut guard))
}
