//! Attach, resize, update and destroy.
//!
//! `update_content` is always queued on the owner thread. `resize_buffer`
//! and `handle_destroy` run inline when the caller already is the owner
//! thread and are queued otherwise. Argument and state checks happen on the
//! calling thread so callers still get an error back.

use std::sync::{Arc, Weak};

use eaf_common::{BufferError, BufferState, DispatchError, Event, Size};
use tracing::{debug, info, trace, warn};

use crate::target::{new_snapshot, RenderTarget};

use super::BufferHandle;

// =============================================================================
// PUBLIC OPERATIONS
// =============================================================================

impl BufferHandle {
    /// Link the toolkit widget that renders this buffer.
    ///
    /// Only a weak reference is kept; once the widget is dropped elsewhere,
    /// updates quietly become no-ops.
    pub fn attach_render_target(&self, target: Weak<dyn RenderTarget>) -> Result<(), BufferError> {
        let mut inner = self.inner();
        if inner.state == BufferState::Destroyed {
            return Err(BufferError::Destroyed(self.id.clone()));
        }
        inner.render_target = Some(target);
        inner.state = BufferState::Active;
        debug!(buffer_id = %self.id, "render target attached");
        Ok(())
    }

    /// Forget the render target without destroying it.
    pub fn detach_render_target(&self) {
        self.inner().render_target = None;
    }

    /// Change the buffer geometry.
    ///
    /// Zero dimensions are rejected and leave the buffer untouched. The new
    /// size is applied on the owner thread, so a worker caller may briefly
    /// still read the old size.
    pub fn resize_buffer(self: &Arc<Self>, width: u32, height: u32) -> Result<(), BufferError> {
        let size = Size::new(width, height);
        if !size.is_valid() {
            return Err(BufferError::InvalidSize { width, height });
        }
        self.ensure_alive()?;

        let this = Arc::clone(self);
        self.dispatcher
            .run_on_owner("resize_buffer", move || this.apply_resize(size))?;
        Ok(())
    }

    /// Tear the buffer down: destroy the widget, drop the snapshot.
    ///
    /// Idempotent and infallible. If the owner loop is already gone the
    /// teardown runs on the calling thread.
    pub fn handle_destroy(self: &Arc<Self>) {
        let this = Arc::clone(self);
        let queued = self
            .dispatcher
            .run_on_owner("handle_destroy", move || this.apply_destroy());

        if let Err(DispatchError::LoopClosed) = queued {
            warn!(buffer_id = %self.id, "owner loop closed, destroying on caller thread");
            self.apply_destroy();
        }
    }

    /// Re-render the buffer into a fresh snapshot on the owner thread.
    ///
    /// Returns once the request is queued. Without a live render target the
    /// queued body leaves the snapshot as it was.
    pub fn update_content(self: &Arc<Self>) -> Result<(), BufferError> {
        self.ensure_alive()?;
        self.update.call(Arc::clone(self), ())?;
        Ok(())
    }

    fn ensure_alive(&self) -> Result<(), BufferError> {
        if self.is_destroyed() {
            Err(BufferError::Destroyed(self.id.clone()))
        } else {
            Ok(())
        }
    }
}

// =============================================================================
// OWNER-THREAD BODIES
// =============================================================================

impl BufferHandle {
    /// Errors leave the previous snapshot in place; the owner loop logs them.
    pub(super) fn render_snapshot(&self) -> Result<(), BufferError> {
        let (size, target) = {
            let inner = self.inner();
            if inner.state == BufferState::Destroyed {
                trace!(buffer_id = %self.id, "skipping update of destroyed buffer");
                return Ok(());
            }
            let target = inner.render_target.as_ref().and_then(Weak::upgrade);
            (inner.size, target)
        };

        let Some(target) = target else {
            trace!(buffer_id = %self.id, "no render target, snapshot unchanged");
            return Ok(());
        };

        let mut image = new_snapshot(size, self.background);
        target.render_into(&mut image);

        let (width, height) = image.dimensions();
        if (width, height) != (size.width, size.height) {
            return Err(BufferError::SnapshotSize {
                id: self.id.clone(),
                expected: size,
                actual: Size::new(width, height),
            });
        }
        self.snapshot.store(Some(Arc::new(image)));

        trace!(buffer_id = %self.id, %size, "snapshot updated");
        self.publish(Event::BufferUpdated(self.id.clone()));
        Ok(())
    }

    fn apply_resize(&self, size: Size) {
        let target = {
            let mut inner = self.inner();
            if inner.state == BufferState::Destroyed {
                debug!(buffer_id = %self.id, "skipping resize of destroyed buffer");
                return;
            }
            inner.size = size;
            inner.render_target.as_ref().and_then(Weak::upgrade)
        };

        self.view.resize_buffer(target.as_deref(), size);

        debug!(buffer_id = %self.id, %size, "buffer resized");
        self.publish(Event::BufferResized {
            id: self.id.clone(),
            size,
        });
    }

    fn apply_destroy(&self) {
        let target = {
            let mut inner = self.inner();
            if inner.state == BufferState::Destroyed {
                return;
            }
            inner.state = BufferState::Destroyed;
            inner.render_target.take()
        };

        if let Some(target) = target.as_ref().and_then(Weak::upgrade) {
            target.destroy();
        }
        self.snapshot.store(None);

        info!(buffer_id = %self.id, "destroy buffer: {}", self.id);
        self.publish(Event::BufferDestroyed(self.id.clone()));
    }

    fn publish(&self, event: Event) {
        if let Some(events) = &self.events {
            events.publish(event);
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================
