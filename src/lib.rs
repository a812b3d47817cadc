//! # decodable-dispatch
//!
//! Route serialized payloads to typed handlers without knowing in advance
//! which message type arrived.
//!
//! Each handler declares the message type it accepts. A dispatcher offers
//! an incoming payload to its handlers in registration order: a handler
//! whose message type cannot be decoded from the payload is skipped, and
//! the first handler that decodes it *and* processes it successfully wins.
//!
//! ## Outcomes
//!
//! - [`DispatchOutcome::Handled`] - decoded and handled
//! - [`DispatchOutcome::HandlerFailed`] - decoded, but every matching handler failed
//! - [`DispatchOutcome::Unsupported`] - no handler could decode the payload
//!
//! ## Example
//!
//! ```
//! use decodable_dispatch::{DispatchOutcome, Dispatcher};
//! use serde::Deserialize;
//!
//! #[derive(Deserialize, Debug)]
//! struct Resize {
//!     width: u32,
//!     height: u32,
//! }
//!
//! #[derive(Deserialize, Debug)]
//! struct Close {
//!     force: bool,
//! }
//!
//! let dispatcher = Dispatcher::builder()
//!     .handle(|r: &Resize| {
//!         if r.width == 0 || r.height == 0 {
//!             return Err("empty window".into());
//!         }
//!         Ok(())
//!     })
//!     .handle(|_: &Close| Ok(()))
//!     .build();
//!
//! match dispatcher.dispatch(br#"{"width":0,"height":10}"#) {
//!     DispatchOutcome::HandlerFailed { message, failures } => {
//!         assert_eq!(message.downcast_ref::<Resize>().unwrap().height, 10);
//!         assert_eq!(failures[0].error.to_string(), "empty window");
//!     }
//!     other => panic!("unexpected outcome: {:?}", other),
//! }
//!
//! assert!(dispatcher.dispatch(br#"{"force":true}"#).is_handled());
//! assert!(dispatcher.dispatch(br#"{"title":"x"}"#).is_unsupported());
//! ```

pub mod codec;
pub mod error;
pub mod handler;

mod async_dispatcher;
mod dispatcher;
mod message;
mod outcome;
mod shared;

pub use async_dispatcher::{AsyncDispatcher, AsyncDispatcherBuilder};
pub use dispatcher::{Dispatch, Dispatcher, DispatcherBuilder, JsonDispatcher, MsgPackDispatcher};
pub use error::{BoxError, DispatchError};
pub use handler::{AsyncHandler, Handler, HandlerFailure, HandlerRef, HandlerResult};
pub use message::DecodedMessage;
pub use outcome::DispatchOutcome;
pub use shared::SharedDispatcher;
