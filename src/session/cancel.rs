use tokio_util::sync::CancellationToken;

/// Cancellation handle for one run (scripted or live).
///
/// Cancelling drops the run's producer task at its next await point; for a
/// live run that aborts the in-flight HTTP request.
#[derive(Debug, Clone)]
pub struct CancelHandle {
    generation: u64,
    token: CancellationToken,
}

impl CancelHandle {
    pub fn new(generation: u64) -> Self {
        Self {
            generation,
            token: CancellationToken::new(),
        }
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn cancel(&self) {
        self.token.cancel();
    }

    pub fn is_cancelled(&self) -> bool {
        self.token.is_cancelled()
    }

    /// Resolves once [`CancelHandle::cancel`] has been called.
    pub async fn cancelled(&self) {
        self.token.cancelled().await
    }
}
