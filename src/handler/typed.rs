//! Type-erased wrappers that trial-decode a payload for one handler.
//!
//! A [`TypedHandler`] is created per registration. It knows the handler's
//! message type and the dispatcher's codec, and exposes both behind
//! [`ErasedHandler::try_handle`], so a dispatcher can keep handlers for
//! different message types in one `Vec`.

use std::any::type_name;
use std::future::ready;
use std::marker::PhantomData;
use std::sync::Arc;

use super::{AsyncHandler, BoxFuture, Handler, HandlerRef};
use crate::codec::Codec;
use crate::error::BoxError;
use crate::message::DecodedMessage;

/// Result of offering a payload to one wrapper.
#[derive(Debug)]
pub enum Trial {
    /// The payload decoded and the handler succeeded.
    Handled {
        message: DecodedMessage,
        handler: HandlerRef,
    },
    /// The payload decoded but the handler returned an error.
    Failed {
        message: DecodedMessage,
        handler: HandlerRef,
        error: BoxError,
    },
    /// The payload is not this handler's message type.
    NotDecoded,
}

/// Uniform interface over handlers of any message type.
pub trait ErasedHandler: Send + Sync {
    /// Decode the payload and, if that works, run the handler once.
    fn try_handle(&self, payload: &[u8]) -> Trial;

    /// The wrapped handler.
    fn handler_ref(&self) -> &HandlerRef;
}

/// Async counterpart of [`ErasedHandler`].
pub trait ErasedAsyncHandler: Send + Sync {
    /// Decode the payload and, if that works, run the handler once.
    fn try_handle<'a>(&'a self, payload: &'a [u8]) -> BoxFuture<'a, Trial>;

    /// The wrapped handler.
    fn handler_ref(&self) -> &HandlerRef;
}

/// Wrapper that decodes the payload with `C` before calling the handler.
pub struct TypedHandler<H, C> {
    handler: Arc<H>,
    reference: HandlerRef,
    _codec: PhantomData<fn() -> C>,
}

impl<H: Handler, C: Codec> TypedHandler<H, C> {
    /// Wrap `handler`, registered at position `index`.
    pub fn new(index: usize, handler: H) -> Self {
        let handler = Arc::new(handler);
        let reference = HandlerRef::new(index, handler.name(), handler.clone());
        Self {
            handler,
            reference,
            _codec: PhantomData,
        }
    }
}

impl<H: Handler, C: Codec> ErasedHandler for TypedHandler<H, C> {
    fn try_handle(&self, payload: &[u8]) -> Trial {
        let message: H::Message = match C::decode(payload) {
            Ok(m) => m,
            Err(e) => {
                tracing::trace!(
                    "{} payload is not a {}: {}",
                    C::NAME,
                    type_name::<H::Message>(),
                    e
                );
                return Trial::NotDecoded;
            }
        };

        match self.handler.handle(&message) {
            Ok(()) => Trial::Handled {
                message: DecodedMessage::new(message),
                handler: self.reference.clone(),
            },
            Err(error) => Trial::Failed {
                message: DecodedMessage::new(message),
                handler: self.reference.clone(),
                error,
            },
        }
    }

    fn handler_ref(&self) -> &HandlerRef {
        &self.reference
    }
}

/// Wrapper that decodes the payload with `C` before awaiting the handler.
pub struct TypedAsyncHandler<H, C> {
    handler: Arc<H>,
    reference: HandlerRef,
    _codec: PhantomData<fn() -> C>,
}

impl<H: AsyncHandler, C: Codec> TypedAsyncHandler<H, C> {
    /// Wrap `handler`, registered at position `index`.
    pub fn new(index: usize, handler: H) -> Self {
        let handler = Arc::new(handler);
        let reference = HandlerRef::new(index, handler.name(), handler.clone());
        Self {
            handler,
            reference,
            _codec: PhantomData,
        }
    }
}

impl<H: AsyncHandler, C: Codec> ErasedAsyncHandler for TypedAsyncHandler<H, C> {
    fn try_handle<'a>(&'a self, payload: &'a [u8]) -> BoxFuture<'a, Trial> {
        let message: H::Message = match C::decode(payload) {
            Ok(m) => m,
            Err(e) => {
                tracing::trace!(
                    "{} payload is not a {}: {}",
                    C::NAME,
                    type_name::<H::Message>(),
                    e
                );
                return Box::pin(ready(Trial::NotDecoded));
            }
        };

        Box::pin(async move {
            let result = self.handler.handle(&message).await;
            match result {
                Ok(()) => Trial::Handled {
                    message: DecodedMessage::new(message),
                    handler: self.reference.clone(),
                },
                Err(error) => Trial::Failed {
                    message: DecodedMessage::new(message),
                    handler: self.reference.clone(),
                    error,
                },
            }
        })
    }

    fn handler_ref(&self) -> &HandlerRef {
        &self.reference
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::{JsonCodec, MsgPackCodec};
    use crate::handler::{FnHandler, HandlerResult};
    use serde::{Deserialize, Serialize};
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
    struct Order {
        sku: String,
        qty: u32,
    }

    struct OrderBook {
        calls: AtomicUsize,
    }

    impl Handler for OrderBook {
        type Message = Order;

        fn handle(&self, order: &Order) -> HandlerResult {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if order.qty == 0 {
                return Err("empty order".into());
            }
            Ok(())
        }
    }

    struct AsyncOrderBook;

    impl AsyncHandler for AsyncOrderBook {
        type Message = Order;

        fn handle<'a>(&'a self, order: &'a Order) -> BoxFuture<'a, HandlerResult> {
            Box::pin(async move {
                if order.qty == 0 {
                    return Err(BoxError::from("empty order"));
                }
                Ok(())
            })
        }
    }

    fn book() -> OrderBook {
        OrderBook {
            calls: AtomicUsize::new(0),
        }
    }

    #[test]
    fn test_decoded_and_handled() {
        let wrapper = TypedHandler::<_, JsonCodec>::new(0, book());

        match wrapper.try_handle(br#"{"sku":"A-1","qty":2}"#) {
            Trial::Handled { message, handler } => {
                assert_eq!(message.downcast_ref::<Order>().unwrap().qty, 2);
                assert_eq!(handler, *wrapper.handler_ref());
            }
            other => panic!("Expected Handled, got {:?}", other),
        }
    }

    #[test]
    fn test_decoded_but_handler_failed() {
        let wrapper = TypedHandler::<_, JsonCodec>::new(3, book());

        match wrapper.try_handle(br#"{"sku":"A-1","qty":0}"#) {
            Trial::Failed {
                message,
                handler,
                error,
            } => {
                assert_eq!(message.downcast_ref::<Order>().unwrap().sku, "A-1");
                assert_eq!(handler.index(), 3);
                assert_eq!(error.to_string(), "empty order");
            }
            other => panic!("Expected Failed, got {:?}", other),
        }
    }

    #[test]
    fn test_not_decoded_skips_handler() {
        let wrapper = TypedHandler::<_, JsonCodec>::new(0, book());

        assert!(matches!(
            wrapper.try_handle(br#"{"sku":"A-1"}"#),
            Trial::NotDecoded
        ));
        assert!(matches!(wrapper.try_handle(b"\xff\x00"), Trial::NotDecoded));

        let calls = wrapper
            .handler_ref()
            .downcast_ref::<OrderBook>()
            .unwrap()
            .calls
            .load(Ordering::SeqCst);
        assert_eq!(calls, 0);
    }

    #[test]
    fn test_handler_invoked_once_per_trial() {
        let wrapper = TypedHandler::<_, JsonCodec>::new(0, book());

        wrapper.try_handle(br#"{"sku":"A-1","qty":0}"#);
        wrapper.try_handle(br#"{"sku":"A-1","qty":1}"#);

        let book = wrapper.handler_ref().downcast_ref::<OrderBook>().unwrap();
        assert_eq!(book.calls.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_codec_is_respected() {
        let wrapper = TypedHandler::<_, MsgPackCodec>::new(0, FnHandler::new(|_: &Order| Ok(())));

        let json = br#"{"sku":"A-1","qty":1}"#;
        assert!(matches!(wrapper.try_handle(json), Trial::NotDecoded));

        let msgpack = MsgPackCodec::encode(&Order {
            sku: "A-1".to_string(),
            qty: 1,
        })
        .unwrap();
        assert!(matches!(wrapper.try_handle(&msgpack), Trial::Handled { .. }));
    }

    #[tokio::test]
    async fn test_async_trial_outcomes() {
        let wrapper = TypedAsyncHandler::<_, JsonCodec>::new(1, AsyncOrderBook);

        assert!(matches!(
            wrapper.try_handle(br#"{"sku":"B","qty":4}"#).await,
            Trial::Handled { .. }
        ));
        assert!(matches!(
            wrapper.try_handle(br#"{"sku":"B","qty":0}"#).await,
            Trial::Failed { .. }
        ));
        assert!(matches!(
            wrapper.try_handle(b"[1,2,3]").await,
            Trial::NotDecoded
        ));
        assert_eq!(wrapper.handler_ref().index(), 1);
    }
}
