//! Dispatch outcomes and the first-success-wins accumulation rule.

use crate::error::{DispatchError, Result};
use crate::handler::{HandlerFailure, HandlerRef, Trial};
use crate::message::DecodedMessage;

/// What happened to one payload.
#[derive(Debug)]
pub enum DispatchOutcome {
    /// A handler decoded the payload and processed it successfully.
    Handled {
        /// The decoded message.
        message: DecodedMessage,
        /// The handler that processed it.
        handler: HandlerRef,
    },

    /// The payload decoded for at least one handler, but every such handler
    /// failed.
    HandlerFailed {
        /// The message decoded for the last failing handler.
        message: DecodedMessage,
        /// Every failure, in registration order.
        failures: Vec<HandlerFailure>,
    },

    /// No registered handler could decode the payload.
    Unsupported,
}

impl DispatchOutcome {
    /// Returns `true` for [`DispatchOutcome::Handled`].
    #[inline]
    pub fn is_handled(&self) -> bool {
        matches!(self, Self::Handled { .. })
    }

    /// Returns `true` for [`DispatchOutcome::HandlerFailed`].
    #[inline]
    pub fn is_handler_failed(&self) -> bool {
        matches!(self, Self::HandlerFailed { .. })
    }

    /// Returns `true` for [`DispatchOutcome::Unsupported`].
    #[inline]
    pub fn is_unsupported(&self) -> bool {
        matches!(self, Self::Unsupported)
    }

    /// The decoded message, unless the payload was unsupported.
    pub fn message(&self) -> Option<&DecodedMessage> {
        match self {
            Self::Handled { message, .. } | Self::HandlerFailed { message, .. } => Some(message),
            Self::Unsupported => None,
        }
    }

    /// Take the decoded message, unless the payload was unsupported.
    pub fn into_message(self) -> Option<DecodedMessage> {
        match self {
            Self::Handled { message, .. } | Self::HandlerFailed { message, .. } => Some(message),
            Self::Unsupported => None,
        }
    }

    /// The handler that succeeded, if any.
    pub fn handler(&self) -> Option<&HandlerRef> {
        match self {
            Self::Handled { handler, .. } => Some(handler),
            _ => None,
        }
    }

    /// Collected handler failures (empty unless `HandlerFailed`).
    pub fn failures(&self) -> &[HandlerFailure] {
        match self {
            Self::HandlerFailed { failures, .. } => failures.as_slice(),
            _ => &[],
        }
    }

    /// Convert into a `Result`, turning the unresolved outcomes into errors.
    pub fn into_result(self) -> Result<(DecodedMessage, HandlerRef)> {
        match self {
            Self::Handled { message, handler } => Ok((message, handler)),
            Self::HandlerFailed { message, failures } => Err(DispatchError::HandlerFailed {
                message_type: message.type_name(),
                failures,
            }),
            Self::Unsupported => Err(DispatchError::Unsupported),
        }
    }
}

/// Folds trials, in registration order, into a single outcome.
#[derive(Default)]
pub(crate) struct OutcomeCollector {
    message: Option<DecodedMessage>,
    failures: Vec<HandlerFailure>,
}

impl OutcomeCollector {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Record one trial. Returns the final outcome as soon as a handler succeeds.
    pub(crate) fn record(&mut self, trial: Trial) -> Option<DispatchOutcome> {
        match trial {
            Trial::Handled { message, handler } => {
                if !self.failures.is_empty() {
                    tracing::debug!(
                        "Handler #{} {} handled {} after {} failed handler(s)",
                        handler.index(),
                        handler.name(),
                        message.type_name(),
                        self.failures.len()
                    );
                }
                Some(DispatchOutcome::Handled { message, handler })
            }
            Trial::Failed {
                message,
                handler,
                error,
            } => {
                tracing::debug!(
                    "Handler #{} {} failed for {}: {}",
                    handler.index(),
                    handler.name(),
                    message.type_name(),
                    error
                );
                self.message = Some(message);
                self.failures.push(HandlerFailure { handler, error });
                None
            }
            Trial::NotDecoded => None,
        }
    }

    /// Outcome once every handler has been tried.
    pub(crate) fn finish(self) -> DispatchOutcome {
        match self.message {
            Some(message) => DispatchOutcome::HandlerFailed {
                message,
                failures: self.failures,
            },
            None => {
                tracing::debug!("No registered handler could decode the payload");
                DispatchOutcome::Unsupported
            }
        }
    }
}
