//! One embedded view: identity, geometry and the cached snapshot.

use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};

use arc_swap::ArcSwapOption;
use eaf_common::{BufferId, BufferState, Color, EventBus, Size};
use eaf_dispatch::{Dispatcher, MethodRedispatch};

use crate::target::{RenderTarget, Snapshot};
use crate::view::Resizable;

mod lifecycle;

/// Mutable state touched by resize, destroy and attach.
struct Inner {
    size: Size,
    state: BufferState,
    render_target: Option<Weak<dyn RenderTarget>>,
}

/// Handle to a single embedded view buffer.
///
/// Handles are shared as `Arc<BufferHandle>`: worker threads keep one to
/// request updates, the owner thread mutates it when those requests run.
/// The snapshot is published with an atomic pointer swap, so any thread may
/// read it at any time.
pub struct BufferHandle {
    id: BufferId,
    url: String,
    background: Color,
    view: Box<dyn Resizable>,
    dispatcher: Dispatcher,
    events: Option<EventBus>,
    update: MethodRedispatch<BufferHandle, ()>,
    inner: Mutex<Inner>,
    snapshot: ArcSwapOption<Snapshot>,
}

impl BufferHandle {
    /// Create a buffer with no render target and no snapshot.
    ///
    /// `size` is taken as given; [`BufferRegistry::create`] is the checked
    /// entry point that rejects zero dimensions.
    ///
    /// [`BufferRegistry::create`]: crate::BufferRegistry::create
    pub fn new(
        id: BufferId,
        url: impl Into<String>,
        size: Size,
        background: Color,
        view: Box<dyn Resizable>,
        dispatcher: Dispatcher,
    ) -> Arc<Self> {
        Self::build(id, url.into(), size, background, view, dispatcher, None)
    }

    pub(crate) fn build(
        id: BufferId,
        url: String,
        size: Size,
        background: Color,
        view: Box<dyn Resizable>,
        dispatcher: Dispatcher,
        events: Option<EventBus>,
    ) -> Arc<Self> {
        debug_assert!(size.is_valid(), "buffer {id} created with size {size}");
        let update = MethodRedispatch::new(
            "update_content",
            dispatcher.clone(),
            |buffer: &BufferHandle, ()| buffer.render_snapshot(),
        );

        Arc::new(Self {
            id,
            url,
            background,
            view,
            dispatcher,
            events,
            update,
            inner: Mutex::new(Inner {
                size,
                state: BufferState::Created,
                render_target: None,
            }),
            snapshot: ArcSwapOption::empty(),
        })
    }

    pub fn id(&self) -> &BufferId {
        &self.id
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn background(&self) -> Color {
        self.background
    }

    pub fn size(&self) -> Size {
        self.inner().size
    }

    pub fn state(&self) -> BufferState {
        self.inner().state
    }

    pub fn is_destroyed(&self) -> bool {
        self.state() == BufferState::Destroyed
    }

    /// Whether a render target is attached and still alive.
    pub fn has_render_target(&self) -> bool {
        self.live_target().is_some()
    }

    /// The last rendered image, if any. Cheap; safe from any thread.
    pub fn snapshot(&self) -> Option<Arc<Snapshot>> {
        self.snapshot.load_full()
    }

    fn inner(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn live_target(&self) -> Option<Arc<dyn RenderTarget>> {
        self.inner()
            .render_target
            .as_ref()
            .and_then(Weak::upgrade)
    }
}

impl fmt::Debug for BufferHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let inner = self.inner();
        f.debug_struct("BufferHandle")
            .field("id", &self.id)
            .field("url", &self.url)
            .field("size", &inner.size)
            .field("state", &inner.state)
            .field("has_snapshot", &self.snapshot.load().is_some())
            .finish_non_exhaustive()
    }
}
