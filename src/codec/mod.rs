//! Codec module - the decode capability used for trial decoding.
//!
//! This module provides codecs a dispatcher can be parameterised with:
//!
//! - [`JsonCodec`] - JSON using `serde_json` (the default)
//! - [`MsgPackCodec`] - MessagePack using `rmp-serde` (`to_vec_named`)
//!
//! # Design
//!
//! Codecs are marker structs with static methods rather than trait objects.
//! The codec is a type parameter of the dispatcher, so every registered
//! handler shares it without any per-call state.
//!
//! # Example
//!
//! ```
//! use decodable_dispatch::codec::{Codec, JsonCodec, MsgPackCodec};
//!
//! let encoded = JsonCodec::encode(&"hello").unwrap();
//! let decoded: String = JsonCodec::decode(&encoded).unwrap();
//! assert_eq!(decoded, "hello");
//!
//! let encoded = MsgPackCodec::encode(&42u32).unwrap();
//! let decoded: u32 = MsgPackCodec::decode(&encoded).unwrap();
//! assert_eq!(decoded, 42);
//! ```

mod json;
mod msgpack;

pub use json::JsonCodec;
pub use msgpack::MsgPackCodec;

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::Result;

/// A serialization format that payloads can be trial-decoded with.
///
/// Decoding must be deterministic and side-effect free. A decode error is
/// read by the dispatcher as "not this shape" and nothing more.
pub trait Codec: Send + Sync + 'static {
    /// Short name used in log output.
    const NAME: &'static str;

    /// Decode bytes into a value of type `T`.
    fn decode<T: DeserializeOwned>(bytes: &[u8]) -> Result<T>;

    /// Encode a value into bytes.
    fn encode<T: Serialize>(value: &T) -> Result<Vec<u8>>;
}
