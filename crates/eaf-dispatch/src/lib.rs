//! Owner-thread call redispatch.
//!
//! Toolkit objects may only be touched from one thread. This crate lets any
//! thread hand work to that thread without blocking:
//! - [`OwnerLoop`] is the single consumer, drained on the owner thread
//! - [`Dispatcher`] is the cloneable posting side
//! - [`Redispatch`] and [`MethodRedispatch`] wrap a function so that calling
//!   the wrapper queues the body instead of running it
//!
//! Calls are fire-and-forget. A body that fails or panics is logged by the
//! owner loop and never reaches the caller.

mod outcome;
mod owner;
mod proxy;

pub use outcome::TaskOutcome;
pub use owner::{Dispatcher, OwnerLoop};
pub use proxy::{MethodRedispatch, Redispatch};
