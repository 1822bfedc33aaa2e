//! Cooperative cancellation.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crate::GenerateError;

/// Shared cancellation flag.
///
/// Checked at resolver lookups and validator stages. Text rewriting is not
/// interrupted; a cancellation observed afterwards aborts the whole pass.
#[derive(Clone, Debug, Default)]
pub struct CancellationToken {
    cancelled: Arc<AtomicBool>,
}

impl CancellationToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Relaxed)
    }

    /// `Err(Cancelled)` once [`cancel`](Self::cancel) has been called.
    #[inline]
    pub fn check(&self) -> Result<(), GenerateError> {
        if self.is_cancelled() {
            Err(GenerateError::Cancelled)
        } else {
            Ok(())
        }
    }
}
