//! Async dispatcher for handlers that need to await.
//!
//! Same routing rules as [`Dispatcher`](crate::Dispatcher): handlers are
//! awaited one at a time, in registration order, and the first success wins.
//!
//! # Example
//!
//! ```
//! use decodable_dispatch::AsyncDispatcher;
//! use serde::Deserialize;
//!
//! #[derive(Deserialize, Clone)]
//! struct Upload {
//!     path: String,
//! }
//!
//! # async fn run() {
//! let dispatcher = AsyncDispatcher::builder()
//!     .handle(|upload: Upload| async move {
//!         println!("storing {}", upload.path);
//!         Ok(())
//!     })
//!     .build();
//!
//! let outcome = dispatcher.dispatch(br#"{"path":"/tmp/a"}"#).await;
//! assert!(outcome.is_handled());
//! # }
//! ```

use std::any::type_name;
use std::future::Future;
use std::marker::PhantomData;
use std::sync::Arc;

use serde::de::DeserializeOwned;

use crate::codec::{Codec, JsonCodec};
use crate::handler::{
    AsyncFnHandler, AsyncHandler, ErasedAsyncHandler, HandlerRef, HandlerResult, TypedAsyncHandler,
};
use crate::outcome::{DispatchOutcome, OutcomeCollector};

/// Ordered registry of async handlers sharing one codec.
pub struct AsyncDispatcher<C = JsonCodec> {
    handlers: Vec<Arc<dyn ErasedAsyncHandler>>,
    _codec: PhantomData<fn() -> C>,
}

impl AsyncDispatcher<JsonCodec> {
    /// Create a new empty JSON dispatcher.
    pub fn new() -> Self {
        Self::with_codec()
    }

    /// Create a builder for a JSON dispatcher.
    pub fn builder() -> AsyncDispatcherBuilder<JsonCodec> {
        AsyncDispatcherBuilder::with_codec()
    }
}

impl<C: Codec> AsyncDispatcher<C> {
    /// Create a new empty dispatcher using codec `C`.
    pub fn with_codec() -> Self {
        Self {
            handlers: Vec::new(),
            _codec: PhantomData,
        }
    }

    /// Register a handler for its message type.
    pub fn register<H: AsyncHandler>(&mut self, handler: H) {
        let index = self.handlers.len();
        let typed = TypedAsyncHandler::<H, C>::new(index, handler);

        tracing::trace!(
            "Registered async handler #{} {} for {}",
            index,
            typed.handler_ref().name(),
            type_name::<H::Message>()
        );

        self.handlers.push(Arc::new(typed));
    }

    /// Register an async closure as the handler for messages of type `T`.
    ///
    /// The closure gets a clone of the decoded message.
    pub fn register_fn<T, F, Fut>(&mut self, handler: F)
    where
        F: Fn(T) -> Fut + Send + Sync + 'static,
        T: DeserializeOwned + Clone + Send + Sync + 'static,
        Fut: Future<Output = HandlerResult> + Send + 'static,
    {
        self.register(AsyncFnHandler::new(handler));
    }

    /// Route a payload to the first handler that decodes and handles it.
    pub async fn dispatch(&self, payload: &[u8]) -> DispatchOutcome {
        let mut collector = OutcomeCollector::new();

        for handler in &self.handlers {
            if let Some(outcome) = collector.record(handler.try_handle(payload).await) {
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

impl<C: Codec> Default for AsyncDispatcher<C> {
    fn default() -> Self {
        Self::with_codec()
    }
}

/// Builder for configuring an [`AsyncDispatcher`].
pub struct AsyncDispatcherBuilder<C = JsonCodec> {
    dispatcher: AsyncDispatcher<C>,
}

impl<C: Codec> AsyncDispatcherBuilder<C> {
    /// Create a new builder using codec `C`.
    pub fn with_codec() -> Self {
        Self {
            dispatcher: AsyncDispatcher::with_codec(),
        }
    }

    /// Register a handler.
    pub fn handler<H: AsyncHandler>(mut self, handler: H) -> Self {
        self.dispatcher.register(handler);
        self
    }

    /// Register an async closure handler.
    pub fn handle<T, F, Fut>(mut self, handler: F) -> Self
    where
        F: Fn(T) -> Fut + Send + Sync + 'static,
        T: DeserializeOwned + Clone + Send + Sync + 'static,
        Fut: Future<Output = HandlerResult> + Send + 'static,
    {
        self.dispatcher.register_fn(handler);
        self
    }

    /// Finish building.
    pub fn build(self) -> AsyncDispatcher<C> {
        self.dispatcher
    }
}
