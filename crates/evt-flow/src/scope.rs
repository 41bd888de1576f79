//! Explicit cancellation for screen-owned async work.

use std::future::Future;

use tokio_util::sync::CancellationToken;

use crate::error::FlowError;

/// Lifetime of one mounted screen.
///
/// Clones share the same cancellation; [`ScreenScope::child`] creates a scope
/// that is cancelled with its parent but can also be cancelled alone.
#[derive(Debug, Clone, Default)]
pub struct ScreenScope {
    token: CancellationToken,
}

impl ScreenScope {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn child(&self) -> Self {
        Self {
            token: self.token.child_token(),
        }
    }

    /// Race `fut` against unmount.
    ///
    /// Cancellation is checked again after `fut` completes, so a result that
    /// lands after unmount is never handed back to the caller.
    ///
    /// # Errors
    ///
    /// Returns [`FlowError::Cancelled`] if the scope is unmounted before or
    /// while `fut` runs.
    pub async fn run<F: Future>(&self, fut: F) -> Result<F::Output, FlowError> {
        if self.token.is_cancelled() {
            return Err(FlowError::Cancelled);
        }
        let output = tokio::select! {
            biased;
            () = self.token.cancelled() => return Err(FlowError::Cancelled),
            output = fut => output,
        };
        if self.token.is_cancelled() {
            return Err(FlowError::Cancelled);
        }
        Ok(output)
    }

    pub fn unmount(&self) {
        self.token.cancel();
    }

    #[must_use]
    pub fn is_unmounted(&self) -> bool {
        self.token.is_cancelled()
    }

    /// Resolves once the scope is unmounted.
    pub async fn unmounted(&self) {
        self.token.cancelled().await;
    }
}
