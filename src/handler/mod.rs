//! Handler module - typed handlers and their type-erased wrappers.
//!
//! Provides:
//! - [`Handler`] / [`AsyncHandler`] - implemented by message consumers
//! - [`TypedHandler`] / [`TypedAsyncHandler`] - bind a handler to its codec
//!   and erase the message type behind [`ErasedHandler`] / [`ErasedAsyncHandler`]
//! - [`HandlerRef`] - identifies a registered handler in dispatch outcomes
//!
//! # Example
//!
//! ```
//! use decodable_dispatch::handler::{Handler, HandlerResult};
//! use serde::Deserialize;
//!
//! #[derive(Deserialize)]
//! struct Ping {
//!     seq: u64,
//! }
//!
//! struct PingHandler;
//!
//! impl Handler for PingHandler {
//!     type Message = Ping;
//!
//!     fn handle(&self, message: &Ping) -> HandlerResult {
//!         if message.seq == 0 {
//!             return Err("sequence numbers start at 1".into());
//!         }
//!         Ok(())
//!     }
//! }
//! ```

mod reference;
mod traits;
mod typed;

pub use reference::{HandlerFailure, HandlerRef};
pub use traits::{AsyncFnHandler, AsyncHandler, BoxFuture, FnHandler, Handler, HandlerResult};
pub use typed::{ErasedAsyncHandler, ErasedHandler, Trial, TypedAsyncHandler, TypedHandler};
