//! Dispatcher that routes payloads by trial decoding.
//!
//! Handlers are tried in registration order. The first handler whose
//! message type decodes the payload *and* whose `handle` succeeds wins.
//! Handlers that decode but fail are collected and only reported when no
//! later handler succeeds.
//!
//! # Example
//!
//! ```
//! use decodable_dispatch::Dispatcher;
//! use serde::Deserialize;
//!
//! #[derive(Deserialize)]
//! struct Join {
//!     room: String,
//! }
//!
//! #[derive(Deserialize)]
//! struct Say {
//!     text: String,
//! }
//!
//! let dispatcher = Dispatcher::builder()
//!     .handle(|join: &Join| {
//!         println!("joined {}", join.room);
//!         Ok(())
//!     })
//!     .handle(|say: &Say| {
//!         println!("said {}", say.text);
//!         Ok(())
//!     })
//!     .build();
//!
//! let outcome = dispatcher.dispatch(br#"{"text":"hi"}"#);
//! assert!(outcome.is_handled());
//! assert!(outcome.message().unwrap().is::<Say>());
//!
//! assert!(dispatcher.dispatch(b"42").is_unsupported());
//! ```

use std::any::type_name;
use std::marker::PhantomData;
use std::sync::Arc;

use serde::de::DeserializeOwned;

use crate::codec::{Codec, JsonCodec, MsgPackCodec};
use crate::handler::{ErasedHandler, FnHandler, Handler, HandlerRef, HandlerResult, TypedHandler};
use crate::outcome::{DispatchOutcome, OutcomeCollector};

/// Anything that can route a raw payload to a handler.
pub trait Dispatch {
    /// Route one payload and report what happened.
    fn dispatch(&self, payload: &[u8]) -> DispatchOutcome;
}

/// Ordered registry of typed handlers sharing one codec.
pub struct Dispatcher<C = JsonCodec> {
    /// Wrappers in registration order.
    handlers: Vec<Arc<dyn ErasedHandler>>,
    _codec: PhantomData<fn() -> C>,
}

/// Dispatcher decoding JSON payloads.
pub type JsonDispatcher = Dispatcher<JsonCodec>;

/// Dispatcher decoding MessagePack payloads.
pub type MsgPackDispatcher = Dispatcher<MsgPackCodec>;

impl Dispatcher<JsonCodec> {
    /// Create a new empty JSON dispatcher.
    pub fn new() -> Self {
        Self::with_codec()
    }

    /// Create a builder for a JSON dispatcher.
    pub fn builder() -> DispatcherBuilder<JsonCodec> {
        DispatcherBuilder::new()
    }
}

impl<C: Codec> Dispatcher<C> {
    /// Create a new empty dispatcher using codec `C`.
    pub fn with_codec() -> Self {
        Self {
            handlers: Vec::new(),
            _codec: PhantomData,
        }
    }

    /// Register a handler for its message type.
    ///
    /// Handlers for the same message type are not merged; each registration
    /// is tried separately, in order.
    pub fn register<H: Handler>(&mut self, handler: H) {
        let index = self.handlers.len();
        let typed = TypedHandler::<H, C>::new(index, handler);

        tracing::trace!(
            "Registered handler #{} {} for {}",
            index,
            typed.handler_ref().name(),
            type_name::<H::Message>()
        );

        self.handlers.push(Arc::new(typed));
    }

    /// Register a closure as the handler for messages of type `T`.
    pub fn register_fn<T, F>(&mut self, handler: F)
    where
        F: Fn(&T) -> HandlerResult + Send + Sync + 'static,
        T: DeserializeOwned + Send + 'static,
    {
        self.register(FnHandler::new(handler));
    }

    /// Route a payload to the first handler that decodes and handles it.
    pub fn dispatch(&self, payload: &[u8]) -> DispatchOutcome {
        let mut collector = OutcomeCollector::new();

        for handler in &self.handlers {
            if let Some(outcome) = collector.record(handler.try_handle(payload)) {
                return outcome;
            }
        }

        collector.finish()
    }

    /// Number of registered handlers.
    #[inline]
    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    /// Returns `true` if no handler is registered.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }

    /// Registered handlers, in registration order.
    pub fn handlers(&self) -> impl Iterator<Item = &HandlerRef> {
        self.handlers.iter().map(|h| h.handler_ref())
    }
}

impl<C: Codec> Dispatch for Dispatcher<C> {
    fn dispatch(&self, payload: &[u8]) -> DispatchOutcome {
        Dispatcher::dispatch(self, payload)
    }
}

// Registered wrappers are shared, so a clone is a cheap snapshot.
impl<C> Clone for Dispatcher<C> {
    fn clone(&self) -> Self {
        Self {
            handlers: self.handlers.clone(),
            _codec: PhantomData,
        }
    }
}

impl<C: Codec> Default for Dispatcher<C> {
    fn default() -> Self {
        Self::with_codec()
    }
}

/// Builder for configuring a [`Dispatcher`].
pub struct DispatcherBuilder<C = JsonCodec> {
    dispatcher: Dispatcher<C>,
}

impl DispatcherBuilder<JsonCodec> {
    /// Create a new builder for a JSON dispatcher.
    pub fn new() -> Self {
        Self::with_codec()
    }
}

impl<C: Codec> DispatcherBuilder<C> {
    /// Create a new builder using codec `C`.
    pub fn with_codec() -> Self {
        Self {
            dispatcher: Dispatcher::with_codec(),
        }
    }

    /// Register a handler.
    pub fn handler<H: Handler>(mut self, handler: H) -> Self {
        self.dispatcher.register(handler);
        self
    }

    /// Register a closure handler.
    pub fn handle<T, F>(mut self, handler: F) -> Self
    where
        F: Fn(&T) -> HandlerResult + Send + Sync + 'static,
        T: DeserializeOwned + Send + 'static,
    {
        self.dispatcher.register_fn(handler);
        self
    }

    /// Finish building.
    pub fn build(self) -> Dispatcher<C> {
        self.dispatcher
    }
}

impl Default for DispatcherBuilder<JsonCodec> {
    fn default() -> Self {
        Self::new()
    }
}
