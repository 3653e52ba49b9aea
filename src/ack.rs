//! Acknowledgment tracking for windowed transfers.
//!
//! The device acknowledges each window through a notification frame on a
//! separate characteristic. [`AckManager`] turns those frames into two
//! set-only signals that the transport engine waits on:
//!
//! - **window**: the current window was accepted (status 0, 1 or 3)
//! - **final**: the whole transfer completed (status 3)
//!
//! # Usage
//!
//! One manager per connection session. Clone it into the notification
//! callback and hand the manager itself to the engine; clones share state.
//!
//! ```
//! use pixelwire::AckManager;
//!
//! let acks = AckManager::new();
//! let notify = acks.clone();
//! notify.on_notification(&[0x05, 0x00, 0x00, 0x00, 0x03]);
//! assert!(acks.window_acked());
//! assert!(acks.transfer_complete());
//! ```

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::Notify;

use crate::codec::to_hex;
use crate::protocol::NotifyOutcome;

/// Default time to wait for an acknowledgment.
pub const DEFAULT_ACK_TIMEOUT: Duration = Duration::from_secs(8);

/// Returned by a wait that ran out of time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Elapsed;

/// A binary event: unset until `set`, back to unset only via `clear`.
#[derive(Debug, Default)]
struct Signal {
    flag: AtomicBool,
    notify: Notify,
}

impl Signal {
    fn set(&self) {
        self.flag.store(true, Ordering::Release);
        self.notify.notify_waiters();
    }

    fn clear(&self) {
        self.flag.store(false, Ordering::Release);
    }

    #[inline]
    fn is_set(&self) -> bool {
        self.flag.load(Ordering::Acquire)
    }

    async fn wait(&self) {
        loop {
            // Register before checking the flag so a concurrent `set` is
            // never missed.
            let notified = self.notify.notified();
            tokio::pin!(notified);
            notified.as_mut().enable();

            if self.is_set() {
                return;
            }
            notified.await;
        }
    }

    async fn wait_timeout(&self, timeout: Duration) -> Result<(), Elapsed> {
        tokio::time::timeout(timeout, self.wait())
            .await
            .map_err(|_| Elapsed)
    }
}

#[derive(Debug, Default)]
struct Signals {
    window: Signal,
    complete: Signal,
}

/// Window and transfer-complete signals fed by device notifications.
///
/// Cheap to clone; all clones observe the same signals.
#[derive(Debug, Clone, Default)]
pub struct AckManager {
    signals: Arc<Signals>,
}

impl AckManager {
    /// Create a manager with both signals unset.
    pub fn new() -> Self {
        Self::default()
    }

    /// Unset both signals.
    ///
    /// Only call this between windows, when no wait is outstanding.
    pub fn reset(&self) {
        self.signals.window.clear();
        self.signals.complete.clear();
    }

    /// Feed one inbound notification frame.
    ///
    /// Safe to call from any thread or task while a wait is pending.
    pub fn on_notification(&self, frame: &[u8]) -> NotifyOutcome {
        if frame.is_empty() {
            return NotifyOutcome::Ignored;
        }
        tracing::debug!("Notify frame: {}", to_hex(frame));

        let outcome = NotifyOutcome::classify(frame);
        match outcome {
            NotifyOutcome::WindowAck => self.signals.window.set(),
            NotifyOutcome::TransferComplete => {
                self.signals.window.set();
                self.signals.complete.set();
            }
            NotifyOutcome::UnknownStatus(code) => {
                tracing::warn!("Ignoring notification with unknown status {}", code);
            }
            NotifyOutcome::Ignored => {}
        }
        outcome
    }

    /// Whether the current window has been acknowledged.
    #[inline]
    pub fn window_acked(&self) -> bool {
        self.signals.window.is_set()
    }

    /// Whether the device reported the transfer complete.
    #[inline]
    pub fn transfer_complete(&self) -> bool {
        self.signals.complete.is_set()
    }

    /// Wait for the window signal.
    pub async fn wait_window(&self, timeout: Duration) -> Result<(), Elapsed> {
        self.signals.window.wait_timeout(timeout).await
    }

    /// Wait for the transfer-complete signal.
    pub async fn wait_final(&self, timeout: Duration) -> Result<(), Elapsed> {
        self.signals.complete.wait_timeout(timeout).await
    }
}

/// Resets an [`AckManager`] when dropped, unless disarmed.
///
/// The engine holds one for the duration of a send so a cancelled transfer
/// leaves the manager ready for the next command.
pub struct ResetGuard {
    acks: AckManager,
    armed: bool,
}

impl ResetGuard {
    /// Create an armed guard.
    pub fn new(acks: AckManager) -> Self {
        Self { acks, armed: true }
    }

    /// Don't reset on drop.
    pub fn disarm(&mut self) {
        self.armed = false;
    }
}

impl Drop for ResetGuard {
    fn drop(&mut self) {
        if self.armed {
            self.acks.reset();
        }
    }
}
