//! The widget side of a buffer, owned by the toolkit rather than by us.

use eaf_common::{Color, Size};
use image::{Rgba, RgbaImage};

/// Rasterized content of a buffer: 8-bit RGBA, straight alpha.
pub type Snapshot = RgbaImage;

/// A toolkit widget that can draw itself into an image.
///
/// Buffers hold only a `Weak` reference; the toolkit decides when the widget
/// dies. All methods are invoked on the owner thread.
pub trait RenderTarget: Send + Sync {
    /// Draw the current visual state into `image`, which is already sized
    /// to the buffer and filled with its background color.
    fn render_into(&self, image: &mut Snapshot);

    /// Tear the widget down.
    fn destroy(&self);

    /// Follow a buffer resize. Most widgets ignore this.
    fn resize(&self, _size: Size) {}
}

/// Allocate a snapshot of `size` filled with `background`.
pub fn new_snapshot(size: Size, background: Color) -> Snapshot {
    RgbaImage::from_pixel(size.width, size.height, Rgba(background.to_rgba8()))
}
