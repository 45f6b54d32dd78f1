//! Cooperative cancellation for long-running searches.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use thiserror::Error;

/// Shared abort flag polled by the searches once per expansion step.
///
/// Clones share the same flag, so one clone can be handed to a signal
/// handler while another is passed into the search.
#[derive(Clone, Debug, Default)]
pub struct CancelToken {
    flag: Arc<AtomicBool>,
}

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    /// Requests that any search polling this token stop.
    pub fn cancel(&self) {
        self.flag.store(true, Ordering::Relaxed);
    }

    #[inline]
    pub fn is_cancelled(&self) -> bool {
        self.flag.load(Ordering::Relaxed)
    }
}

/// Returned by a search that observed its [`CancelToken`] and aborted.
///
/// Kept apart from [`crate::Error`] so "aborted" never reads as a failure or
/// as an unreachable goal.
#[derive(Clone, Copy, Debug, Error, PartialEq, Eq)]
#[error("search cancelled")]
pub struct Cancelled;

/// Polls an optional token, mapping a raised flag to [`Cancelled`].
#[inline(always)]
pub(crate) fn check(cancel: Option<&CancelToken>) -> Result<(), Cancelled> {
    match cancel {
        Some(token) if token.is_cancelled() => Err(Cancelled),
        _ => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clones_share_flag() {
        let token = CancelToken::new();
        let handle = token.clone();
        assert!(!token.is_cancelled());

        handle.cancel();
        assert!(token.is_cancelled());
        assert_eq!(check(Some(&token)), Err(Cancelled));
    }

    #[test]
    fn test_missing_token_never_cancels() {
        assert_eq!(check(None), Ok(()));
    }
}
