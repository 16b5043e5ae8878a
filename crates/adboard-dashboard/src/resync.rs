//! Backend resync followed by a delayed reload.
//!
//! The sync endpoints acknowledge acceptance and keep working in the
//! background; there is no completion signal to wait on. [`ResyncTask`]
//! makes the workaround explicit: trigger, wait out a fixed uncertainty
//! window, reload once. The window can be too short (the reload shows
//! pre-sync data) or too long (the user waits for nothing).

use std::future::Future;
use std::time::Duration;

use adboard_client::{ClientError, SyncAck};

/// Trigger-then-reload with a declared uncertainty window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResyncTask {
    uncertainty_window: Duration,
}

impl ResyncTask {
    #[must_use]
    pub fn new(uncertainty_window: Duration) -> Self {
        Self { uncertainty_window }
    }

    #[must_use]
    pub fn uncertainty_window(&self) -> Duration {
        self.uncertainty_window
    }

    /// Runs `trigger`, sleeps for the uncertainty window, then runs `reload`
    /// exactly once.
    ///
    /// # Errors
    ///
    /// Returns the trigger's error without waiting or reloading.
    pub async fn run<T, TF, R, RF, O>(&self, trigger: T, reload: R) -> Result<(SyncAck, O), ClientError>
    where
        T: FnOnce() -> TF,
        TF: Future<Output = Result<SyncAck, ClientError>>,
        R: FnOnce() -> RF,
        RF: Future<Output = O>,
    {
        let ack = trigger().await?;
        tracing::info!(
            window_ms = u64::try_from(self.uncertainty_window.as_millis()).unwrap_or(u64::MAX),
            message = ack.message.as_deref().unwrap_or(""),
            "resync accepted; waiting before reload"
        );
        tokio::time::sleep(self.uncertainty_window).await;
        let reloaded = reload().await;
        Ok((ack, reloaded))
    }
}
