//! Stand-in widget for running the host without a real toolkit.

use std::sync::atomic::{AtomicU32, Ordering};

use eaf_buffer::{RenderTarget, Snapshot};
use eaf_common::Size;
use image::Rgba;
use tracing::debug;

const STRIPE: Rgba<u8> = Rgba([0x89, 0xb4, 0xfa, 0xff]);
const PERIOD: u32 = 32;

/// Draws diagonal stripes that move one pixel per frame.
#[derive(Debug, Default)]
pub struct PatternTarget {
    frame: AtomicU32,
    destroyed: AtomicU32,
}

impl PatternTarget {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn frames(&self) -> u32 {
        self.frame.load(Ordering::Relaxed)
    }

    pub fn is_destroyed(&self) -> bool {
        self.destroyed.load(Ordering::Relaxed) > 0
    }
}

impl RenderTarget for PatternTarget {
    fn render_into(&self, image: &mut Snapshot) {
        let frame = self.frame.fetch_add(1, Ordering::Relaxed);
        for (x, y, pixel) in image.enumerate_pixels_mut() {
            if (x + y + frame) % PERIOD < 4 {
                *pixel = STRIPE;
            }
        }
    }

    fn destroy(&self) {
        self.destroyed.fetch_add(1, Ordering::Relaxed);
        debug!("pattern target destroyed");
    }

    fn resize(&self, size: Size) {
        debug!(%size, "pattern target resized");
    }
}
