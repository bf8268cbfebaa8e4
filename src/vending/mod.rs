//! The `vending` module is a small state-driven context: a vending machine
//! whose answer to a request depends only on the state it was put in.

pub mod state;

use std::fmt;
use std::sync::Arc;

use tracing::debug;

use crate::sink::LoggingSink;

pub use state::VendingState;

pub struct VendingMachine {
    state: VendingState,
    sink: Arc<dyn LoggingSink>,
}

impl VendingMachine {
    /// A machine in the [`VendingState::Ready`] state.
    pub fn new(sink: Arc<dyn LoggingSink>) -> Self {
        Self {
            state: VendingState::default(),
            sink,
        }
    }

    pub fn state(&self) -> VendingState {
        self.state
    }

    pub fn set_state(&mut self, state: VendingState) {
        debug!(from = %self.state, to = %state, "vending machine state change");
        self.state = state;
    }

    /// Handles a request in the current state and reports it to the sink.
    pub fn request(&self) -> &'static str {
        let message = self.state.handle_request();
        self.sink.log(message);
        message
    }
}

impl fmt::Debug for VendingMachine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("VendingMachine")
            .field("state", &self.state)
            .finish_non_exhaustive()
    }
}
