//! One-shot expiry scheduling.

use chrono::{DateTime, Utc};
use tokio::task::JoinHandle;
use tracing::debug;

/// Cancellation handle for a scheduled callback.
///
/// The view that arranged the callback owns the handle; dropping or
/// cancelling it before the instant arrives means the callback never
/// runs. A handle whose callback already fired (or fired immediately at
/// schedule time) cancels to a no-op.
pub struct ExpiryTimer {
    handle: Option<JoinHandle<()>>,
}

impl ExpiryTimer {
    pub fn cancel(&mut self) {
        if let Some(handle) = self.handle.take() {
            handle.abort();
        }
    }
}

impl Drop for ExpiryTimer {
    fn drop(&mut self) {
        self.cancel();
    }
}

/// Arrange for `on_expire` to run once at `expires_at`.
///
/// If the instant is already in the past the callback is invoked
/// immediately, before this returns. Either way the returned handle can
/// be used (or dropped) to guarantee no stale callback fires after the
/// owning view is gone.
pub fn schedule_expiry<F>(expires_at: DateTime<Utc>, on_expire: F) -> ExpiryTimer
where
    F: FnOnce() + Send + 'static,
{
    let remaining = expires_at - Utc::now();
    match remaining.to_std() {
        Ok(delay) => {
            debug!(delay_secs = delay.as_secs(), "Expiry callback scheduled");
            let handle = tokio::spawn(async move {
                tokio::time::sleep(delay).await;
                on_expire();
            });
            ExpiryTimer {
                handle: Some(handle),
            }
        }
        Err(_) => {
            debug!("Expiry instant already passed, firing immediately");
            on_expire();
            ExpiryTimer { handle: None }
        }
    }
}
