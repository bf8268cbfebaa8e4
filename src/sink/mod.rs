//! The `sink` module defines where human-readable bus events go.
//!
//! The bus and the shipped subscribers never print directly; they hand a
//! line to a [`LoggingSink`]. Which sink backs a program is a configuration
//! choice ([`SinkKind`]).

use std::fmt;
use std::str::FromStr;
use std::sync::{Arc, Mutex};

use tracing::info;

/// Receives one human-readable event line at a time.
pub trait LoggingSink: Send + Sync {
    fn log(&self, message: &str);
}

/// Forwards every line to `tracing` at `INFO`.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingSink;

impl LoggingSink for TracingSink {
    fn log(&self, message: &str) {
        info!("{message}");
    }
}

/// Writes every line to stdout.
#[derive(Debug, Default, Clone, Copy)]
pub struct ConsoleSink;

impl LoggingSink for ConsoleSink {
    fn log(&self, message: &str) {
        println!("{message}");
    }
}

/// Discards everything.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopSink;

impl LoggingSink for NoopSink {
    fn log(&self, _message: &str) {}
}

/// Keeps every line in memory, in arrival order.
#[derive(Debug, Default)]
pub struct MemorySink {
    lines: Mutex<Vec<String>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the captured lines.
    pub fn lines(&self) -> Vec<String> {
        match self.lines.lock() {
            Ok(lines) => lines.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    /// Number of captured lines containing `needle`.
    pub fn count_containing(&self, needle: &str) -> usize {
        self.lines()
            .iter()
            .filter(|line| line.contains(needle))
            .count()
    }
}

impl LoggingSink for MemorySink {
    fn log(&self, message: &str) {
        let mut lines = match self.lines.lock() {
            Ok(lines) => lines,
            Err(poisoned) => poisoned.into_inner(),
        };
        lines.push(message.to_string());
    }
}

/// Configurable choice of sink.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SinkKind {
    #[default]
    Tracing,
    Console,
    Memory,
    None,
}

impl SinkKind {
    /// Builds a fresh sink of this kind.
    pub fn build(self) -> Arc<dyn LoggingSink> {
        match self {
            SinkKind::Tracing => Arc::new(TracingSink),
            SinkKind::Console => Arc::new(ConsoleSink),
            SinkKind::Memory => Arc::new(MemorySink::new()),
            SinkKind::None => Arc::new(NoopSink),
        }
    }
}

impl FromStr for SinkKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "tracing" => Ok(SinkKind::Tracing),
            "console" | "stdout" => Ok(SinkKind::Console),
            "memory" => Ok(SinkKind::Memory),
            "none" | "noop" => Ok(SinkKind::None),
            other => Err(format!("unknown sink '{other}'")),
        }
    }
}

impl fmt::Display for SinkKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SinkKind::Tracing => "tracing",
            SinkKind::Console => "console",
            SinkKind::Memory => "memory",
            SinkKind::None => "none",
        };
        f.write_str(name)
    }
}

#[cfg(test)]
mod tests;
