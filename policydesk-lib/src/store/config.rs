//! Store configuration

use std::time::Duration;

use serde::Deserialize;
use serde::Serialize;

/// Configuration for [`InMemoryStore`](super::InMemoryStore).
///
/// The latency settings let a fixture-backed store behave like a remote one,
/// so loading states can be exercised.
///
/// # Example
///
/// ```
/// use std::time::Duration;
/// use policydesk_lib::store::StoreConfig;
///
/// let config = StoreConfig::default()
///     .with_read_latency(Duration::from_millis(300))
///     .with_write_latency(Duration::from_millis(400));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// Delay before `list` and `get` answer, in milliseconds.
    ///
    /// Default: 0
    pub read_latency_ms: u64,

    /// Delay before `create`, `update` and `delete` answer, in milliseconds.
    ///
    /// Default: 0
    pub write_latency_ms: u64,
}

impl StoreConfig {
    /// Creates a config with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the read latency.
    pub fn with_read_latency(mut self, latency: Duration) -> Self {
        self.read_latency_ms = latency.as_millis() as u64;
        self
    }

    /// Sets the write latency.
    pub fn with_write_latency(mut self, latency: Duration) -> Self {
        self.write_latency_ms = latency.as_millis() as u64;
        self
    }

    pub fn read_latency(&self) -> Duration {
        Duration::from_millis(self.read_latency_ms)
    }

    pub fn write_latency(&self) -> Duration {
        Duration::from_millis(self.write_latency_ms)
    }
}
