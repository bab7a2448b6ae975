//! Wires the owner loop, the registry and the worker threads together.

use std::sync::{Arc, Weak};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use eaf_buffer::{BufferRegistry, BufferSpec, RenderTarget};
use eaf_common::{BufferKind, Color, ConfigError, EafError, Event, EventBus, Size};
use eaf_dispatch::OwnerLoop;
use tokio::sync::broadcast::{self, error::TryRecvError};
use tracing::{debug, info, warn};

use crate::pattern::PatternTarget;

/// Most worker threads a run may spawn.
pub const MAX_WORKERS: usize = 256;

/// Event bus ring size. Events are drained after every pump step, and one
/// step never runs more than half this many tasks.
const EVENT_CAPACITY: usize = 1024;

/// What to run.
#[derive(Debug, Clone)]
pub struct HostOptions {
    pub url: String,
    pub size: Size,
    pub background: Color,
    pub kind: BufferKind,
    pub workers: usize,
    pub updates_per_worker: usize,
    pub max_tasks_per_drain: usize,
    pub poll_interval: Duration,
}

impl HostOptions {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.workers > MAX_WORKERS {
            return Err(ConfigError::ValidationError(format!(
                "workers = {} is out of range [0, {MAX_WORKERS}]",
                self.workers
            )));
        }
        Ok(())
    }

    fn drain_limit(&self) -> usize {
        self.max_tasks_per_drain.clamp(1, EVENT_CAPACITY / 2)
    }
}

/// Running count of bus events seen by the host.
#[derive(Debug, Default)]
struct EventTally {
    updated: usize,
    lagged: u64,
}

impl EventTally {
    fn drain(&mut self, rx: &mut broadcast::Receiver<Event>) {
        loop {
            match rx.try_recv() {
                Ok(Event::BufferUpdated(_)) => self.updated += 1,
                Ok(_) => {}
                Err(TryRecvError::Lagged(missed)) => {
                    warn!(missed, "event receiver lagged");
                    self.lagged += missed;
                }
                Err(TryRecvError::Empty | TryRecvError::Closed) => break,
            }
        }
    }
}

/// What happened.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSummary {
    pub requested: usize,
    pub rendered: u32,
    pub snapshot_size: Option<Size>,
    pub updated_events: usize,
    pub lagged_events: u64,
    pub target_destroyed: bool,
}

/// Run the demo on the calling thread, which becomes the owner thread.
pub fn run(options: &HostOptions) -> Result<RunSummary, EafError> {
    options.validate()?;

    let (mut owner, dispatcher) = OwnerLoop::new();
    let events = EventBus::new(EVENT_CAPACITY);
    let mut rx = events.subscribe();
    let mut tally = EventTally::default();
    let drain_limit = options.drain_limit();
    let mut registry = BufferRegistry::new(dispatcher, events);

    let spec = BufferSpec::with_url(options.url.as_str())
        .size(options.size.width, options.size.height)
        .background(options.background)
        .kind(options.kind);
    let handle = registry.create(spec)?;

    let target = Arc::new(PatternTarget::new());
    let weak: Weak<PatternTarget> = Arc::downgrade(&target);
    handle.attach_render_target(weak as Weak<dyn RenderTarget>)?;

    let workers = (0..options.workers)
        .map(|n| {
            let handle = Arc::clone(&handle);
            let updates = options.updates_per_worker;
            thread::Builder::new()
                .name(format!("eaf-worker-{n}"))
                .spawn(move || {
                    let mut queued = 0;
                    for _ in 0..updates {
                        match handle.update_content() {
                            Ok(()) => queued += 1,
                            Err(e) => {
                                warn!(worker = n, "update request failed: {e}");
                                break;
                            }
                        }
                        thread::sleep(Duration::from_millis(1));
                    }
                    queued
                })
        })
        .collect::<Result<Vec<JoinHandle<usize>>, _>>()?;
    info!(workers = workers.len(), "workers started");

    while !workers.iter().all(JoinHandle::is_finished) {
        owner.run_timeout(options.poll_interval)?;
        tally.drain(&mut rx);
        owner.run_pending(drain_limit)?;
        tally.drain(&mut rx);
    }
    while owner.run_pending(drain_limit)? > 0 {
        tally.drain(&mut rx);
    }

    let mut requested = 0;
    for worker in workers {
        match worker.join() {
            Ok(queued) => requested += queued,
            Err(_) => warn!("worker thread panicked"),
        }
    }

    let snapshot_size = handle
        .snapshot()
        .map(|snap| Size::new(snap.width(), snap.height()));
    debug!(?snapshot_size, frames = target.frames(), "updates drained");

    registry.destroy_all();
    tally.drain(&mut rx);

    Ok(RunSummary {
        requested,
        rendered: target.frames(),
        snapshot_size,
        updated_events: tally.updated,
        lagged_events: tally.lagged,
        target_destroyed: target.is_destroyed(),
    })
}
