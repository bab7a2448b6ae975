//! All live buffers of one host, keyed by id.

use std::collections::HashMap;
use std::sync::Arc;

use eaf_common::{BufferError, BufferId, BufferKind, Color, Event, EventBus, Size};
use eaf_dispatch::Dispatcher;
use tracing::{debug, info};

use crate::handle::BufferHandle;
use crate::view::view_for;

// =============================================================================
// BUFFER SPEC
// =============================================================================

/// Parameters for creating a buffer.
#[derive(Debug, Clone)]
pub struct BufferSpec {
    pub id: BufferId,
    /// Source locator, usually a URL.
    pub url: String,
    pub size: Size,
    pub background: Color,
    pub kind: BufferKind,
}

impl Default for BufferSpec {
    fn default() -> Self {
        Self {
            id: BufferId::new(),
            url: "about:blank".to_string(),
            size: Size::new(800, 600),
            background: Color::WHITE,
            kind: BufferKind::Browser,
        }
    }
}

impl BufferSpec {
    /// A spec that loads `url`, everything else defaulted.
    pub fn with_url(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            ..Default::default()
        }
    }

    pub fn id(mut self, id: impl Into<BufferId>) -> Self {
        self.id = id.into();
        self
    }

    pub fn size(mut self, width: u32, height: u32) -> Self {
        self.size = Size::new(width, height);
        self
    }

    pub fn background(mut self, background: Color) -> Self {
        self.background = background;
        self
    }

    pub fn kind(mut self, kind: BufferKind) -> Self {
        self.kind = kind;
        self
    }
}

// =============================================================================
// REGISTRY
// =============================================================================

/// Maps buffer ids to handles and drives their full lifecycle.
///
/// The registry itself lives wherever the editor bridge runs; the handles
/// it gives out may be cloned to any thread.
pub struct BufferRegistry {
    dispatcher: Dispatcher,
    events: EventBus,
    handles: HashMap<BufferId, Arc<BufferHandle>>,
}

impl BufferRegistry {
    pub fn new(dispatcher: Dispatcher, events: EventBus) -> Self {
        Self {
            dispatcher,
            events,
            handles: HashMap::new(),
        }
    }

    /// Create and register a buffer.
    pub fn create(&mut self, spec: BufferSpec) -> Result<Arc<BufferHandle>, BufferError> {
        if !spec.size.is_valid() {
            return Err(BufferError::InvalidSize {
                width: spec.size.width,
                height: spec.size.height,
            });
        }
        if self.handles.contains_key(&spec.id) {
            return Err(BufferError::DuplicateId(spec.id));
        }

        let handle = BufferHandle::build(
            spec.id.clone(),
            spec.url,
            spec.size,
            spec.background,
            view_for(spec.kind),
            self.dispatcher.clone(),
            Some(self.events.clone()),
        );
        self.handles.insert(spec.id.clone(), Arc::clone(&handle));

        info!(buffer_id = %spec.id, url = %handle.url(), size = %spec.size, "buffer created");
        self.events.publish(Event::BufferCreated(spec.id));
        Ok(handle)
    }

    pub fn get(&self, id: &BufferId) -> Option<&Arc<BufferHandle>> {
        self.handles.get(id)
    }

    pub fn contains(&self, id: &BufferId) -> bool {
        self.handles.contains_key(id)
    }

    /// Resize a buffer by id.
    pub fn resize(&self, id: &BufferId, width: u32, height: u32) -> Result<(), BufferError> {
        self.lookup(id)?.resize_buffer(width, height)
    }

    /// Request a content update for a buffer by id.
    pub fn update(&self, id: &BufferId) -> Result<(), BufferError> {
        self.lookup(id)?.update_content()
    }

    /// Request a content update for every buffer. Returns how many were
    /// queued.
    pub fn update_all(&self) -> usize {
        self.handles
            .values()
            .filter(|handle| handle.update_content().is_ok())
            .count()
    }

    /// Destroy and unregister a buffer. Returns `false` for unknown ids.
    pub fn destroy(&mut self, id: &BufferId) -> bool {
        match self.handles.remove(id) {
            Some(handle) => {
                handle.handle_destroy();
                debug!(buffer_id = %id, "buffer unregistered");
                true
            }
            None => false,
        }
    }

    /// Destroy every buffer. Used during shutdown.
    pub fn destroy_all(&mut self) {
        let ids = self.ids();
        let count = ids.len();
        for id in ids {
            self.destroy(&id);
        }
        if count > 0 {
            info!(count, "all buffers destroyed");
        }
    }

    /// Ids of all live buffers, sorted.
    pub fn ids(&self) -> Vec<BufferId> {
        let mut ids: Vec<BufferId> = self.handles.keys().cloned().collect();
        ids.sort_by(|a, b| a.as_str().cmp(b.as_str()));
        ids
    }

    pub fn len(&self) -> usize {
        self.handles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handles.is_empty()
    }

    pub fn events(&self) -> &EventBus {
        &self.events
    }

    fn lookup(&self, id: &BufferId) -> Result<&Arc<BufferHandle>, BufferError> {
        self.handles
            .get(id)
            .ok_or_else(|| BufferError::NotFound(id.clone()))
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::RecordingTarget;
    use eaf_common::BufferState;
    use eaf_dispatch::OwnerLoop;

    fn registry() -> (OwnerLoop, BufferRegistry) {
        let (owner, dispatcher) = OwnerLoop::new();
        (owner, BufferRegistry::new(dispatcher, EventBus::new(32)))
    }

    #[test]
    fn spec_defaults() {
        let spec = BufferSpec::default();
        assert_eq!(spec.url, "about:blank");
        assert_eq!(spec.size, Size::new(800, 600));
        assert_eq!(spec.background, Color::WHITE);
        assert_eq!(spec.kind, BufferKind::Browser);
    }

    #[test]
    fn spec_builder() {
        let spec = BufferSpec::with_url("https://example.com")
            .id("b1")
            .size(1024, 768)
            .background(Color::BLACK)
            .kind(BufferKind::Plain);
        assert_eq!(spec.id, BufferId::from("b1"));
        assert_eq!(spec.url, "https://example.com");
        assert_eq!(spec.size, Size::new(1024, 768));
        assert_eq!(spec.background, Color::BLACK);
        assert_eq!(spec.kind, BufferKind::Plain);
    }

    #[test]
    fn create_registers_and_announces() {
        let (_owner, mut reg) = registry();
        let mut rx = reg.events().subscribe();

        let handle = reg
            .create(BufferSpec::with_url("https://example.com").id("b1"))
            .unwrap();

        assert_eq!(handle.state(), BufferState::Created);
        assert!(reg.contains(&BufferId::from("b1")));
        assert_eq!(reg.len(), 1);
        assert!(Arc::ptr_eq(reg.get(&BufferId::from("b1")).unwrap(), &handle));
        assert!(matches!(rx.try_recv().unwrap(), Event::BufferCreated(id) if id.as_str() == "b1"));
    }

    #[test]
    fn create_rejects_duplicate_id() {
        let (_owner, mut reg) = registry();
        reg.create(BufferSpec::default().id("b1")).unwrap();
        let err = reg.create(BufferSpec::default().id("b1")).unwrap_err();
        assert_eq!(err, BufferError::DuplicateId(BufferId::from("b1")));
        assert_eq!(reg.len(), 1);
    }

    #[test]
    fn create_rejects_zero_size() {
        let (_owner, mut reg) = registry();
        let err = reg.create(BufferSpec::default().size(0, 10)).unwrap_err();
        assert_eq!(
            err,
            BufferError::InvalidSize {
                width: 0,
                height: 10
            }
        );
        assert!(reg.is_empty());
    }

    #[test]
    fn unknown_ids_are_reported() {
        let (_owner, mut reg) = registry();
        let missing = BufferId::from("nope");
        assert_eq!(
            reg.resize(&missing, 10, 10),
            Err(BufferError::NotFound(missing.clone()))
        );
        assert_eq!(
            reg.update(&missing),
            Err(BufferError::NotFound(missing.clone()))
        );
        assert!(!reg.destroy(&missing));
        assert!(reg.get(&missing).is_none());
    }

    #[test]
    fn resize_and_update_by_id() {
        let (mut owner, mut reg) = registry();
        let handle = reg.create(BufferSpec::default().id("b1")).unwrap();
        let target = RecordingTarget::new();
        handle.attach_render_target(target.weak()).unwrap();
        let id = BufferId::from("b1");

        reg.resize(&id, 320, 240).unwrap();
        reg.update(&id).unwrap();
        owner.run_pending(usize::MAX).unwrap();

        assert_eq!(handle.snapshot().unwrap().dimensions(), (320, 240));
        assert_eq!(target.resizes(), vec![Size::new(320, 240)]);
    }

    #[test]
    fn update_all_queues_every_buffer() {
        let (mut owner, mut reg) = registry();
        let targets: Vec<_> = ["a", "b", "c"]
            .iter()
            .map(|id| {
                let handle = reg.create(BufferSpec::default().id(*id).size(4, 4)).unwrap();
                let target = RecordingTarget::new();
                handle.attach_render_target(target.weak()).unwrap();
                target
            })
            .collect();

        assert_eq!(reg.update_all(), 3);
        assert_eq!(owner.run_pending(usize::MAX).unwrap(), 3);
        assert!(targets.iter().all(|t| t.renders() == 1));
    }

    #[test]
    fn destroy_unregisters_and_tears_down() {
        let (_owner, mut reg) = registry();
        let handle = reg.create(BufferSpec::default().id("b1")).unwrap();
        let target = RecordingTarget::new();
        handle.attach_render_target(target.weak()).unwrap();
        let mut rx = reg.events().subscribe();

        assert!(reg.destroy(&BufferId::from("b1")));
        assert!(reg.is_empty());
        assert!(handle.is_destroyed());
        assert_eq!(target.destroys(), 1);
        assert!(matches!(rx.try_recv().unwrap(), Event::BufferDestroyed(_)));

        assert!(!reg.destroy(&BufferId::from("b1")));
    }

    #[test]
    fn id_is_reusable_after_destroy() {
        let (_owner, mut reg) = registry();
        reg.create(BufferSpec::default().id("b1")).unwrap();
        reg.destroy(&BufferId::from("b1"));
        assert!(reg.create(BufferSpec::default().id("b1")).is_ok());
    }

    #[test]
    fn destroy_all_is_idempotent() {
        let (_owner, mut reg) = registry();
        let a = reg.create(BufferSpec::default().id("a")).unwrap();
        let b = reg.create(BufferSpec::default().id("b")).unwrap();
        assert_eq!(reg.ids(), vec![BufferId::from("a"), BufferId::from("b")]);

        reg.destroy_all();
        reg.destroy_all();
        assert!(reg.is_empty());
        assert!(a.is_destroyed());
        assert!(b.is_destroyed());
    }
}
