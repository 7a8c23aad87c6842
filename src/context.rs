//! Per-request cancellation and deadline propagation.

use std::future::Future;
use std::time::Duration;

use tokio::time::{Instant, timeout_at};
use tokio_util::sync::CancellationToken;

use crate::backend::InventoryError;

/// Cancellation token plus optional deadline handed to every remote call.
///
/// Cloning shares the token, so cancelling any clone cancels them all. Use
/// [`RequestContext::child`] to derive a context that can be cancelled
/// independently of its parent.
#[derive(Clone, Debug, Default)]
pub struct RequestContext {
    token: CancellationToken,
    deadline: Option<Instant>,
}

impl RequestContext {
    /// Creates a context with no deadline.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets a deadline relative to now.
    ///
    /// A timeout too large to represent as an instant leaves the context
    /// without a deadline.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.deadline = Instant::now().checked_add(timeout);
        self
    }

    /// Derives a context whose cancellation follows this one but can also be
    /// cancelled on its own.
    #[must_use]
    pub fn child(&self) -> Self {
        Self {
            token: self.token.child_token(),
            deadline: self.deadline,
        }
    }

    /// Cancels this context and every child derived from it.
    pub fn cancel(&self) {
        self.token.cancel();
    }

    /// Returns `true` once the context has been cancelled.
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.token.is_cancelled()
    }

    /// Deadline attached to the context, if any.
    #[must_use]
    pub const fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    /// Drives `operation` to completion unless the context is cancelled or
    /// its deadline elapses first.
    ///
    /// # Errors
    ///
    /// Returns [`InventoryError::Cancelled`] or
    /// [`InventoryError::DeadlineExceeded`] when the caller gives up, and
    /// otherwise whatever `operation` returns.
    pub async fn run<T, F>(&self, operation: F) -> Result<T, InventoryError>
    where
        F: Future<Output = Result<T, InventoryError>>,
    {
        if self.token.is_cancelled() {
            return Err(InventoryError::Cancelled);
        }
        if self
            .deadline
            .is_some_and(|deadline| deadline <= Instant::now())
        {
            return Err(InventoryError::DeadlineExceeded);
        }

        let bounded = async {
            let Some(deadline) = self.deadline else {
                return operation.await;
            };
            timeout_at(deadline, operation)
                .await
                .unwrap_or_else(|_elapsed| Err(InventoryError::DeadlineExceeded))
        };

        self.token
            .run_until_cancelled(bounded)
            .await
            .unwrap_or(Err(InventoryError::Cancelled))
    }
}
