//! Windowed, acknowledged delivery of a [`SendPlan`].
//!
//! For each window, in order:
//!
//! ```text
//! reset acks ─► write chunks (link-confirmed) ─► wait window ack ─► next
//!                                                     │
//!                                           timeout ──┴─► AckTimeout, stop
//! ```
//!
//! After the last window the engine waits once more for the
//! transfer-complete status. That wait is best effort: a timeout there is
//! logged and the send still succeeds.

use std::time::Duration;

use super::ByteLink;
use crate::ack::{AckManager, ResetGuard, DEFAULT_ACK_TIMEOUT};
use crate::error::{PixelError, Result};
use crate::protocol::SendPlan;

/// Configuration for the transport engine.
#[derive(Debug, Clone)]
pub struct TransportConfig {
    /// How long to wait for each acknowledgment.
    /// Default: 8 seconds
    pub ack_timeout: Duration,
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self {
            ack_timeout: DEFAULT_ACK_TIMEOUT,
        }
    }
}

/// Statistics from a completed send.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SendReport {
    pub windows: usize,
    pub chunks: usize,
    pub bytes: usize,
    /// Whether the device reported the transfer complete.
    pub confirmed: bool,
}

/// Streams plans to a link, one acknowledged window at a time.
///
/// The engine is not re-entrant: one send per session at a time. Sessions
/// enforce this by requiring `&mut` access to the link.
#[derive(Debug, Clone)]
pub struct TransportEngine {
    acks: AckManager,
    config: TransportConfig,
}

impl TransportEngine {
    pub fn new(acks: AckManager) -> Self {
        Self::with_config(acks, TransportConfig::default())
    }

    pub fn with_config(acks: AckManager, config: TransportConfig) -> Self {
        Self { acks, config }
    }

    /// The acknowledgment manager this engine waits on.
    pub fn acks(&self) -> &AckManager {
        &self.acks
    }

    pub fn config(&self) -> &TransportConfig {
        &self.config
    }

    /// Deliver `plan` over `link`.
    ///
    /// # Errors
    ///
    /// - [`PixelError::LinkWrite`] if the link rejects a chunk
    /// - [`PixelError::AckTimeout`] if a window that requires an ack is not
    ///   acknowledged in time; later windows are never written
    ///
    /// Dropping the returned future mid-send resets the ack state.
    pub async fn send<L>(&self, plan: SendPlan, link: &mut L) -> Result<SendReport>
    where
        L: ByteLink + ?Sized,
    {
        let timeout = self.config.ack_timeout;
        let policy = plan.ack_policy();
        let mut guard = ResetGuard::new(self.acks.clone());
        let mut report = SendReport::default();

        tracing::info!(
            "Sending '{}': {} bytes in {} window(s)",
            plan.id(),
            plan.total_len(),
            plan.windows().len()
        );

        for (index, window) in plan.windows().iter().enumerate() {
            self.acks.reset();

            for chunk in window.chunks(plan.chunk_size()) {
                link.write(&chunk)
                    .await
                    .map_err(|source| PixelError::LinkWrite {
                        window: index,
                        source,
                    })?;
                report.chunks += 1;
                report.bytes += chunk.len();
            }

            if policy.ack_per_window && window.requires_ack() {
                if self.acks.wait_window(timeout).await.is_err() {
                    tracing::error!(
                        "No ack for window {} of '{}' within {:?}",
                        index,
                        plan.id(),
                        timeout
                    );
                    return Err(PixelError::AckTimeout {
                        window: index,
                        timeout,
                    });
                }
                tracing::debug!("Window {} of '{}' acknowledged", index, plan.id());
            }
            report.windows += 1;
        }

        if policy.ack_final {
            match self.acks.wait_final(timeout).await {
                Ok(()) => report.confirmed = true,
                Err(_) => tracing::warn!(
                    "No completion status for '{}' within {:?}, assuming delivered",
                    plan.id(),
                    timeout
                ),
            }
        }

        guard.disarm();
        tracing::info!(
            "Sent '{}': {} chunk(s), {} bytes",
            plan.id(),
            report.chunks,
            report.bytes
        );
        Ok(report)
    }
}
