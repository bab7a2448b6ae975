//! Configuration schema types.
//!
//! All structs use `serde(default)` so partial configs work correctly.

mod buffer;
mod dispatch;
mod system;

pub use buffer::*;
pub use dispatch::*;
pub use system::*;

use serde::{Deserialize, Serialize};

/// Current config schema version.
pub const CONFIG_SCHEMA_VERSION: u32 = 1;

/// Root configuration for the host.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct EafConfig {
    pub buffer: BufferConfig,
    pub dispatch: DispatchConfig,
    pub logging: LoggingConfig,
}

// =============================================================================
// Tests
// =============================================================================
