//! References to registered handlers.

use std::any::Any;
use std::fmt;
use std::sync::Arc;

use crate::error::BoxError;

/// Identifies one registered handler.
///
/// Cloning is cheap. Two references are equal when they point at the same
/// registered handler instance.
#[derive(Clone)]
pub struct HandlerRef {
    index: usize,
    name: &'static str,
    handler: Arc<dyn Any + Send + Sync>,
}

impl HandlerRef {
    pub(crate) fn new(index: usize, name: &'static str, handler: Arc<dyn Any + Send + Sync>) -> Self {
        Self {
            index,
            name,
            handler,
        }
    }

    /// Position of the handler in registration order (0-based).
    #[inline]
    pub fn index(&self) -> usize {
        self.index
    }

    /// Handler name as reported by `Handler::name`.
    #[inline]
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Borrow the handler as its concrete type.
    pub fn downcast_ref<H: Any>(&self) -> Option<&H> {
        self.handler.downcast_ref::<H>()
    }
}

impl PartialEq for HandlerRef {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::addr_eq(Arc::as_ptr(&self.handler), Arc::as_ptr(&other.handler))
    }
}

impl Eq for HandlerRef {}

impl fmt::Debug for HandlerRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HandlerRef")
            .field("index", &self.index)
            .field("name", &self.name)
            .finish()
    }
}

/// A handler that decoded the payload but failed to process it.
#[derive(Debug)]
pub struct HandlerFailure {
    /// The handler that failed.
    pub handler: HandlerRef,
    /// The error it returned.
    pub error: BoxError,
}
