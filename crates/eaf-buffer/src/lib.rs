//! Embedded view buffers.
//!
//! Each buffer stands for one web-rendered view living inside the editor:
//! - identity, source URL, size and background color
//! - a cached RGBA snapshot of the last render
//! - a non-owning link to the toolkit widget that renders it
//!
//! Toolkit work (rendering, resizing the widget, tearing it down) always
//! happens on the owner thread through `eaf-dispatch`.

pub mod handle;
pub mod registry;
pub mod target;
pub mod view;

#[cfg(test)]
pub(crate) mod test_support;

pub use handle::BufferHandle;
pub use registry::{BufferRegistry, BufferSpec};
pub use target::{new_snapshot, RenderTarget, Snapshot};
pub use view::{view_for, BrowserView, PlainView, Resizable};
