//! Owner-loop pacing.

use std::time::Duration;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DispatchConfig {
    /// Upper bound on queued calls run per pump (valid range: 1-65536).
    pub max_tasks_per_drain: u32,
    /// How long the owner loop waits for work between pumps, in
    /// milliseconds (valid range: 1-1000).
    pub poll_interval_ms: u32,
}

impl Default for DispatchConfig {
    fn default() -> Self {
        Self {
            max_tasks_per_drain: 256,
            poll_interval_ms: 16,
        }
    }
}

impl DispatchConfig {
    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(u64::from(self.poll_interval_ms))
    }
}
