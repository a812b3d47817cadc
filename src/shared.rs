//! Thread-safe dispatcher for hosts that register while dispatching.
//!
//! The registry is copy-on-write: every dispatch works on an `Arc` snapshot
//! taken under a short read lock, and registration appends to a fresh copy
//! when a snapshot is still in use. A dispatch never sees a registration
//! that happens while it runs.

use std::sync::Arc;

use parking_lot::RwLock;
use serde::de::DeserializeOwned;

use crate::codec::{Codec, JsonCodec};
use crate::dispatcher::{Dispatch, Dispatcher};
use crate::handler::{Handler, HandlerResult};
use crate::outcome::DispatchOutcome;

/// A [`Dispatcher`] that can be registered into through `&self`.
pub struct SharedDispatcher<C = JsonCodec> {
    current: RwLock<Arc<Dispatcher<C>>>,
}

impl SharedDispatcher<JsonCodec> {
    /// Create a new empty JSON dispatcher.
    pub fn new() -> Self {
        Self::with_codec()
    }
}

impl<C: Codec> SharedDispatcher<C> {
    /// Create a new empty dispatcher using codec `C`.
    pub fn with_codec() -> Self {
        Self::from(Dispatcher::with_codec())
    }

    /// Register a handler for its message type.
    pub fn register<H: Handler>(&self, handler: H) {
        let mut current = self.current.write();
        Arc::make_mut(&mut *current).register(handler);
    }

    /// Register a closure as the handler for messages of type `T`.
    pub fn register_fn<T, F>(&self, handler: F)
    where
        F: Fn(&T) -> HandlerResult + Send + Sync + 'static,
        T: DeserializeOwned + Send + 'static,
    {
        let mut current = self.current.write();
        Arc::make_mut(&mut *current).register_fn(handler);
    }

    /// The registry as of now.
    pub fn snapshot(&self) -> Arc<Dispatcher<C>> {
        self.current.read().clone()
    }

    /// Route a payload using the current snapshot.
    ///
    /// No lock is held while handlers run, so handlers may register more
    /// handlers without deadlocking.
    pub fn dispatch(&self, payload: &[u8]) -> DispatchOutcome {
        self.snapshot().dispatch(payload)
    }

    /// Number of registered handlers.
    pub fn len(&self) -> usize {
        self.current.read().len()
    }

    /// Returns `true` if no handler is registered.
    pub fn is_empty(&self) -> bool {
        self.current.read().is_empty()
    }
}

impl<C: Codec> Dispatch for SharedDispatcher<C> {
    fn dispatch(&self, payload: &[u8]) -> DispatchOutcome {
        SharedDispatcher::dispatch(self, payload)
    }
}

impl<C: Codec> From<Dispatcher<C>> for SharedDispatcher<C> {
    fn from(dispatcher: Dispatcher<C>) -> Self {
        Self {
            current: RwLock::new(Arc::new(dispatcher)),
        }
    }
}

impl<C: Codec> Default for SharedDispatcher<C> {
    fn default() -> Self {
        Self::with_codec()
    }
}
