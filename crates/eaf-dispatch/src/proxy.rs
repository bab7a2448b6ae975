//! Call proxies: calling one queues the wrapped body on the owner thread.

use std::sync::Arc;

use eaf_common::DispatchError;

use crate::outcome::TaskOutcome;
use crate::owner::Dispatcher;

// =============================================================================
// FREE-FUNCTION FORM
// =============================================================================

/// Wraps `Fn(A)` so every [`call`](Self::call) runs the body on the owner
/// thread. Pass several arguments as a tuple.
pub struct Redispatch<A> {
    name: &'static str,
    dispatcher: Dispatcher,
    body: Arc<dyn Fn(A) + Send + Sync>,
}

impl<A: Send + 'static> Redispatch<A> {
    pub fn new<F, O>(name: &'static str, dispatcher: Dispatcher, body: F) -> Self
    where
        F: Fn(A) -> O + Send + Sync + 'static,
        O: TaskOutcome,
    {
        Self {
            name,
            dispatcher,
            body: Arc::new(move |args| body(args).report(name)),
        }
    }

    /// Capture `args` and queue the body. Returns as soon as the message is
    /// queued; `Err` only means the owner loop no longer exists.
    pub fn call(&self, args: A) -> Result<(), DispatchError> {
        let body = Arc::clone(&self.body);
        self.dispatcher.post_named(self.name, move || body(args))
    }

    pub fn name(&self) -> &'static str {
        self.name
    }
}

impl<A> Clone for Redispatch<A> {
    fn clone(&self) -> Self {
        Self {
            name: self.name,
            dispatcher: self.dispatcher.clone(),
            body: Arc::clone(&self.body),
        }
    }
}

// =============================================================================
// METHOD FORM
// =============================================================================

/// Like [`Redispatch`], but the first argument is a receiver kept apart from
/// the rest and handed to the body by reference.
pub struct MethodRedispatch<R, A> {
    name: &'static str,
    dispatcher: Dispatcher,
    body: Arc<dyn Fn(&R, A) + Send + Sync>,
}

impl<R, A> MethodRedispatch<R, A>
where
    R: Send + Sync + 'static,
    A: Send + 'static,
{
    pub fn new<F, O>(name: &'static str, dispatcher: Dispatcher, body: F) -> Self
    where
        F: Fn(&R, A) -> O + Send + Sync + 'static,
        O: TaskOutcome,
    {
        Self {
            name,
            dispatcher,
            body: Arc::new(move |receiver: &R, args| body(receiver, args).report(name)),
        }
    }

    pub fn call(&self, receiver: Arc<R>, args: A) -> Result<(), DispatchError> {
        let body = Arc::clone(&self.body);
        self.dispatcher
            .post_named(self.name, move || body(&receiver, args))
    }

    pub fn name(&self) -> &'static str {
        self.name
    }
}

impl<R, A> Clone for MethodRedispatch<R, A> {
    fn clone(&self) -> Self {
        Self {
            name: self.name,
            dispatcher: self.dispatcher.clone(),
            body: Arc::clone(&self.body),
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================
