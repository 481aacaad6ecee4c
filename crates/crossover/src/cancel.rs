//! Cooperative cancellation for long batch runs.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use cruise_common::{CrossoverError, CrossoverResult};

/// Shared flag checked by the batch driver between comparisons.
///
/// Clones share the same flag, so one clone can be handed to a signal
/// handler while another is passed to the checker.
#[derive(Debug, Clone, Default)]
pub struct CancelToken {
    cancelled: Arc<AtomicBool>,
}

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Relaxed)
    }

    /// `Err(Cancelled)` once [`CancelToken::cancel`] has been called.
    pub fn check(&self) -> CrossoverResult<()> {
        if self.is_cancelled() {
            Err(CrossoverError::Cancelled)
        } else {
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clones_share_state() {
        let token = CancelToken::new();
        let handle = token.clone();
        assert!(token.check().is_ok());
        handle.cancel();
        assert!(token.is_cancelled());
        assert!(matches!(token.check(), Err(CrossoverError::Cancelled)));
    }
}
