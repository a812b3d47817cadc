//! Handler traits and closure adapters.

use std::any::type_name;
use std::future::Future;
use std::marker::PhantomData;
use std::pin::Pin;

use serde::de::DeserializeOwned;

use crate::error::BoxError;

/// Result type for handler functions.
pub type HandlerResult = std::result::Result<(), BoxError>;

/// Boxed future for handler results.
pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// A consumer of one message type.
pub trait Handler: Send + Sync + 'static {
    /// The message shape this handler accepts.
    type Message: DeserializeOwned + Send + 'static;

    /// Handle one decoded message.
    fn handle(&self, message: &Self::Message) -> HandlerResult;

    /// Name reported in outcomes and logs.
    fn name(&self) -> &'static str {
        type_name::<Self>()
    }
}

/// Asynchronous counterpart of [`Handler`].
pub trait AsyncHandler: Send + Sync + 'static {
    /// The message shape this handler accepts.
    type Message: DeserializeOwned + Send + Sync + 'static;

    /// Handle one decoded message.
    fn handle<'a>(&'a self, message: &'a Self::Message) -> BoxFuture<'a, HandlerResult>;

    /// Name reported in outcomes and logs.
    fn name(&self) -> &'static str {
        type_name::<Self>()
    }
}

/// Adapter that turns a closure `Fn(&T) -> HandlerResult` into a [`Handler`].
pub struct FnHandler<F, T> {
    handler: F,
    _phantom: PhantomData<fn(&T)>,
}

impl<F, T> FnHandler<F, T>
where
    F: Fn(&T) -> HandlerResult + Send + Sync + 'static,
    T: DeserializeOwned + Send + 'static,
{
    /// Create a new closure handler.
    pub fn new(handler: F) -> Self {
        Self {
            handler,
            _phantom: PhantomData,
        }
    }
}

impl<F, T> Handler for FnHandler<F, T>
where
    F: Fn(&T) -> HandlerResult + Send + Sync + 'static,
    T: DeserializeOwned + Send + 'static,
{
    type Message = T;

    #[inline]
    fn handle(&self, message: &T) -> HandlerResult {
        (self.handler)(message)
    }

    fn name(&self) -> &'static str {
        type_name::<F>()
    }
}

/// Adapter that turns an async closure `Fn(T) -> Fut` into an [`AsyncHandler`].
///
/// The closure receives its own clone of the message, since the decoded
/// original is returned to the caller in the dispatch outcome.
pub struct AsyncFnHandler<F, T, Fut> {
    handler: F,
    _phantom: PhantomData<fn(T) -> Fut>,
}

impl<F, T, Fut> AsyncFnHandler<F, T, Fut>
where
    F: Fn(T) -> Fut + Send + Sync + 'static,
    T: DeserializeOwned + Clone + Send + Sync + 'static,
    Fut: Future<Output = HandlerResult> + Send + 'static,
{
    /// Create a new async closure handler.
    pub fn new(handler: F) -> Self {
        Self {
            handler,
            _phantom: PhantomData,
        }
    }
}

impl<F, T, Fut> AsyncHandler for AsyncFnHandler<F, T, Fut>
where
    F: Fn(T) -> Fut + Send + Sync + 'static,
    T: DeserializeOwned + Clone + Send + Sync + 'static,
    Fut: Future<Output = HandlerResult> + Send + 'static,
{
    type Message = T;

    fn handle<'a>(&'a self, message: &'a T) -> BoxFuture<'a, HandlerResult> {
        Box::pin((self.handler)(message.clone()))
    }

    fn name(&self) -> &'static str {
        type_name::<F>()
    }
}
