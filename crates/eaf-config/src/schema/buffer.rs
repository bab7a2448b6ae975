//! Defaults for newly created buffers.

use eaf_common::{BufferKind, Color, Size};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BufferConfig {
    /// Width in pixels (valid range: 1-16384).
    pub default_width: u32,
    /// Height in pixels (valid range: 1-16384).
    pub default_height: u32,
    /// `#rrggbb` or `#rrggbbaa`.
    pub background_color: String,
    pub kind: BufferKind,
}

impl Default for BufferConfig {
    fn default() -> Self {
        Self {
            default_width: 800,
            default_height: 600,
            background_color: "#ffffff".into(),
            kind: BufferKind::Browser,
        }
    }
}

impl BufferConfig {
    pub fn default_size(&self) -> Size {
        Size::new(self.default_width, self.default_height)
    }

    /// Parsed background color; white if the string does not parse.
    pub fn background(&self) -> Color {
        Color::from_hex(&self.background_color).unwrap_or(Color::WHITE)
    }
}
