//! The owner-thread task queue: one `mpsc` channel, many posters, one
//! consumer bound to the thread that created it.

use std::any::Any;
use std::fmt;
use std::panic::{self, AssertUnwindSafe};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{mpsc, Arc};
use std::thread::{self, ThreadId};
use std::time::Duration;

use eaf_common::DispatchError;
use tracing::{debug, error, trace};

use crate::outcome::TaskOutcome;

type Task = Box<dyn FnOnce() + Send + 'static>;

enum Message {
    Run { name: &'static str, task: Task },
    Shutdown,
}

// =============================================================================
// DISPATCHER (POSTING SIDE)
// =============================================================================

/// Cloneable handle for posting work onto the owner thread.
#[derive(Clone)]
pub struct Dispatcher {
    tx: mpsc::Sender<Message>,
    owner: ThreadId,
    closed: Arc<AtomicBool>,
}

impl Dispatcher {
    /// Queue `task` for the owner thread. Never blocks.
    pub fn post<F, O>(&self, task: F) -> Result<(), DispatchError>
    where
        F: FnOnce() -> O + Send + 'static,
        O: TaskOutcome,
    {
        self.post_named("task", task)
    }

    /// Like [`post`](Self::post), with a name used when reporting failures.
    ///
    /// Fails with `LoopClosed` once shutdown has been requested, since the
    /// loop would never reach the task.
    pub fn post_named<F, O>(&self, name: &'static str, task: F) -> Result<(), DispatchError>
    where
        F: FnOnce() -> O + Send + 'static,
        O: TaskOutcome,
    {
        if self.is_closed() {
            return Err(DispatchError::LoopClosed);
        }
        let task: Task = Box::new(move || task().report(name));
        self.tx
            .send(Message::Run { name, task })
            .map_err(|_| DispatchError::LoopClosed)
    }

    /// Run `task` right away when already on the owner thread, otherwise
    /// queue it.
    pub fn run_on_owner<F, O>(&self, name: &'static str, task: F) -> Result<(), DispatchError>
    where
        F: FnOnce() -> O + Send + 'static,
        O: TaskOutcome,
    {
        if self.is_owner_thread() {
            execute(name, Box::new(move || task().report(name)));
            Ok(())
        } else {
            self.post_named(name, task)
        }
    }

    /// Ask the owner loop to stop once it reaches this point in the queue.
    ///
    /// Tasks already queued still run; later posts are refused.
    pub fn shutdown(&self) -> Result<(), DispatchError> {
        self.closed.store(true, Ordering::Release);
        self.tx
            .send(Message::Shutdown)
            .map_err(|_| DispatchError::LoopClosed)
    }

    /// Whether shutdown was requested or the owner loop is gone.
    pub fn is_closed(&self) -> bool {
        self.closed.load(Ordering::Acquire)
    }

    pub fn is_owner_thread(&self) -> bool {
        thread::current().id() == self.owner
    }

    pub fn owner_thread(&self) -> ThreadId {
        self.owner
    }
}

impl fmt::Debug for Dispatcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Dispatcher")
            .field("owner", &self.owner)
            .finish_non_exhaustive()
    }
}

// =============================================================================
// OWNER LOOP (CONSUMING SIDE)
// =============================================================================

/// Receiving end of the queue. Every drain method refuses to run anywhere
/// but the thread that called [`OwnerLoop::new`].
pub struct OwnerLoop {
    rx: mpsc::Receiver<Message>,
    owner: ThreadId,
    closed: bool,
    shared_closed: Arc<AtomicBool>,
}

impl OwnerLoop {
    /// Bind a new queue to the calling thread.
    pub fn new() -> (Self, Dispatcher) {
        let (tx, rx) = mpsc::channel();
        let owner = thread::current().id();
        let shared_closed = Arc::new(AtomicBool::new(false));
        debug!(?owner, "owner loop created");
        (
            Self {
                rx,
                owner,
                closed: false,
                shared_closed: Arc::clone(&shared_closed),
            },
            Dispatcher {
                tx,
                owner,
                closed: shared_closed,
            },
        )
    }

    /// Whether a shutdown request was reached or every dispatcher is gone.
    pub fn is_closed(&self) -> bool {
        self.closed
    }

    pub fn owner_thread(&self) -> ThreadId {
        self.owner
    }

    /// Run up to `limit` queued tasks without blocking.
    ///
    /// Returns how many ran. Stops early when the queue is empty.
    pub fn run_pending(&mut self, limit: usize) -> Result<usize, DispatchError> {
        self.check_owner()?;
        let mut ran = 0;

        while ran < limit && !self.closed {
            match self.rx.try_recv() {
                Ok(message) => {
                    if self.handle(message) {
                        ran += 1;
                    }
                }
                Err(mpsc::TryRecvError::Empty) => break,
                Err(mpsc::TryRecvError::Disconnected) => {
                    self.close();
                }
            }
        }

        if ran > 0 {
            trace!(ran, "drained owner queue");
        }
        Ok(ran)
    }

    /// Wait up to `timeout` for one task and run it.
    ///
    /// `Ok(false)` means nothing arrived in time.
    pub fn run_timeout(&mut self, timeout: Duration) -> Result<bool, DispatchError> {
        self.check_owner()?;
        if self.closed {
            return Err(DispatchError::LoopClosed);
        }

        match self.rx.recv_timeout(timeout) {
            Ok(message) => {
                if self.handle(message) {
                    Ok(true)
                } else {
                    Err(DispatchError::LoopClosed)
                }
            }
            Err(mpsc::RecvTimeoutError::Timeout) => Ok(false),
            Err(mpsc::RecvTimeoutError::Disconnected) => {
                self.close();
                Err(DispatchError::LoopClosed)
            }
        }
    }

    /// Block and run tasks until shutdown is requested or every
    /// [`Dispatcher`] has been dropped. Returns how many tasks ran.
    pub fn run_until_closed(&mut self) -> Result<usize, DispatchError> {
        self.check_owner()?;
        let mut ran = 0;

        while !self.closed {
            match self.rx.recv() {
                Ok(message) => {
                    if self.handle(message) {
                        ran += 1;
                    }
                }
                Err(mpsc::RecvError) => self.close(),
            }
        }

        debug!(ran, "owner loop finished");
        Ok(ran)
    }

    fn close(&mut self) {
        self.closed = true;
        self.shared_closed.store(true, Ordering::Release);
    }

    fn check_owner(&self) -> Result<(), DispatchError> {
        if thread::current().id() == self.owner {
            Ok(())
        } else {
            Err(DispatchError::NotOwnerThread)
        }
    }

    /// Returns `true` if a task ran.
    fn handle(&mut self, message: Message) -> bool {
        match message {
            Message::Run { name, task } => {
                execute(name, task);
                true
            }
            Message::Shutdown => {
                debug!("owner loop shutdown requested");
                self.close();
                false
            }
        }
    }
}

impl Drop for OwnerLoop {
    fn drop(&mut self) {
        self.shared_closed.store(true, Ordering::Release);
    }
}

fn execute(name: &'static str, task: Task) {
    trace!(task = name, "running queued task");
    if let Err(payload) = panic::catch_unwind(AssertUnwindSafe(task)) {
        error!(
            task = name,
            panic = %panic_message(payload.as_ref()),
            "queued task panicked"
        );
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> &str {
    if let Some(s) = payload.downcast_ref::<&'static str>() {
        s
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.as_str()
    } else {
        "<non-string panic payload>"
    }
}

// =============================================================================
// TESTS
// =============================================================================
