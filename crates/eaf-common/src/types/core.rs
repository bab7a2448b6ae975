use serde::{Deserialize, Serialize};
use std::fmt;

/// Pixel dimensions of a buffer. Both sides are expected to be non-zero;
/// see [`Size::is_valid`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Size {
    pub width: u32,
    pub height: u32,
}

impl Size {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    pub fn is_valid(&self) -> bool {
        self.width > 0 && self.height > 0
    }
}

impl fmt::Display for Size {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

/// Which resize behavior a buffer gets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BufferKind {
    /// Resizes only update the stored geometry.
    Plain,
    /// Resizes are forwarded to the embedded widget.
    #[default]
    Browser,
}

/// Lifecycle of a buffer handle. Nothing leaves `Destroyed`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BufferState {
    Created,
    Active,
    Destroyed,
}
