//! JSON codec using `serde_json`.
//!
//! Structs decode from JSON objects and unknown fields are ignored, so a
//! payload can structurally match more than one registered shape. The
//! dispatcher resolves that by registration order.

use serde::de::DeserializeOwned;
use serde::Serialize;

use super::Codec;
use crate::error::Result;

/// JSON codec for structured data.
pub struct JsonCodec;

impl Codec for JsonCodec {
    const NAME: &'static str = "json";

    #[inline]
    fn decode<T: DeserializeOwned>(bytes: &[u8]) -> Result<T> {
        Ok(serde_json::from_slice(bytes)?)
    }

    #[inline]
    fn encode<T: Serialize>(value: &T) -> Result<Vec<u8>> {
        Ok(serde_json::to_vec(value)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DispatchError;
    use serde::Deserialize;

    #[derive(Deserialize, Debug, PartialEq)]
    struct Login {
        user: String,
    }

    #[derive(Deserialize, Debug, PartialEq)]
    struct Logout {
        user: String,
        reason: String,
    }

    #[test]
    fn test_decode_struct() {
        let decoded: Login = JsonCodec::decode(br#"{"user":"ada"}"#).unwrap();
        assert_eq!(
            decoded,
            Login {
                user: "ada".to_string()
            }
        );
    }

    #[test]
    fn test_unknown_fields_are_ignored() {
        // A Logout payload is also a structurally valid Login.
        let payload = br#"{"user":"ada","reason":"idle"}"#;

        let login: Login = JsonCodec::decode(payload).unwrap();
        assert_eq!(login.user, "ada");

        let logout: Logout = JsonCodec::decode(payload).unwrap();
        assert_eq!(logout.reason, "idle");
    }

    #[test]
    fn test_missing_field_is_a_mismatch() {
        let result: Result<Logout> = JsonCodec::decode(br#"{"user":"ada"}"#);
        assert!(matches!(result, Err(DispatchError::Json(_))));
    }

    #[test]
    fn test_primitive_shapes_do_not_overlap() {
        assert!(JsonCodec::decode::<i64>(b"7").is_ok());
        assert!(JsonCodec::decode::<String>(b"7").is_err());
        assert!(JsonCodec::decode::<String>(br#""7""#).is_ok());
        assert!(JsonCodec::decode::<i64>(br#""7""#).is_err());
    }

    #[test]
    fn test_decode_error_on_invalid_data() {
        let result: Result<Login> = JsonCodec::decode(b"not json at all");
        assert!(result.is_err());
    }

    #[test]
    fn test_encode_produces_object() {
        #[derive(Serialize)]
        struct Ping {
            seq: u32,
        }

        let encoded = JsonCodec::encode(&Ping { seq: 3 }).unwrap();
        assert_eq!(encoded, br#"{"seq":3}"#);
    }
}
