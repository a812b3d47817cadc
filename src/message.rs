//! Type-erased decoded messages.

use std::any::{type_name, Any};
use std::fmt;

/// A message decoded by one of the registered handlers' codecs.
///
/// The concrete type is only known to the handler that decoded it, so the
/// value is stored as [`Any`]. Use [`downcast_ref`](Self::downcast_ref) or
/// [`downcast`](Self::downcast) to get it back.
pub struct DecodedMessage {
    type_name: &'static str,
    value: Box<dyn Any + Send>,
}

impl DecodedMessage {
    pub(crate) fn new<T: Any + Send>(value: T) -> Self {
        Self {
            type_name: type_name::<T>(),
            value: Box::new(value),
        }
    }

    /// Name of the concrete message type.
    #[inline]
    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    /// Returns `true` if the message is a `T`.
    #[inline]
    pub fn is<T: Any>(&self) -> bool {
        self.value.is::<T>()
    }

    /// Borrow the message as a `T`.
    #[inline]
    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        self.value.downcast_ref::<T>()
    }

    /// Take the message as a `T`, or get `self` back if it is not one.
    pub fn downcast<T: Any>(self) -> Result<T, Self> {
        let type_name = self.type_name;
        self.value
            .downcast::<T>()
            .map(|boxed| *boxed)
            .map_err(|value| Self { type_name, value })
    }
}

impl fmt::Debug for DecodedMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DecodedMessage")
            .field("type_name", &self.type_name)
            .finish_non_exhaustive()
    }
}
