//! Per-kind resize behavior.

use eaf_common::{BufferKind, Size};

use crate::target::RenderTarget;

/// Hook run on the owner thread after a buffer's stored size changed.
///
/// The default does nothing, which suits views whose widget lays itself
/// out. Views backed by a live widget override it to push the new size.
pub trait Resizable: Send + Sync {
    fn resize_buffer(&self, _target: Option<&dyn RenderTarget>, _size: Size) {}
}

/// Geometry-only view; the widget is never told about resizes.
#[derive(Debug, Default, Clone, Copy)]
pub struct PlainView;

impl Resizable for PlainView {}

/// Web view whose widget must track the buffer size.
#[derive(Debug, Default, Clone, Copy)]
pub struct BrowserView;

impl Resizable for BrowserView {
    fn resize_buffer(&self, target: Option<&dyn RenderTarget>, size: Size) {
        if let Some(target) = target {
            target.resize(size);
        }
    }
}

pub fn view_for(kind: BufferKind) -> Box<dyn Resizable> {
    match kind {
        BufferKind::Plain => Box::new(PlainView),
        BufferKind::Browser => Box::new(BrowserView),
    }
}
