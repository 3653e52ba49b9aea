//! Send plans: the pre-computed description of a transfer.
//!
//! A [`SendPlan`] is built once by a command encoder and consumed once by
//! the transport engine. Window payloads are `bytes::Bytes`, so chunking a
//! window to the link MTU is a series of zero-copy slices.
//!
//! # Example
//!
//! ```
//! use pixelwire::protocol::{SendPlan, DEFAULT_CHUNK_SIZE};
//!
//! let plan = SendPlan::single_window("set_brightness", vec![0x05, 0x00, 0x04, 0x80, 0x32], true);
//! assert_eq!(plan.windows().len(), 1);
//! assert_eq!(plan.chunk_size(), DEFAULT_CHUNK_SIZE);
//! ```

use bytes::Bytes;

use crate::error::{PixelError, Result};

/// Default link write size (BLE MTU payload).
pub const DEFAULT_CHUNK_SIZE: usize = 244;

/// Default window size for multi-window transfers (12 KiB).
pub const DEFAULT_WINDOW_SIZE: usize = 12 * 1024;

/// A logically atomic piece of a transfer, acknowledged at most once.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Window {
    data: Bytes,
    requires_ack: bool,
}

impl Window {
    /// Create a new window.
    pub fn new(data: impl Into<Bytes>, requires_ack: bool) -> Self {
        Self {
            data: data.into(),
            requires_ack,
        }
    }

    /// The window payload.
    #[inline]
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Whether the device must acknowledge this window.
    #[inline]
    pub fn requires_ack(&self) -> bool {
        self.requires_ack
    }

    /// Payload length in bytes.
    #[inline]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Whether the payload is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Split the payload into slices of at most `size` bytes.
    ///
    /// `size` must be non-zero; [`SendPlan`] guarantees this for its own
    /// chunk size.
    pub fn chunks(&self, size: usize) -> impl Iterator<Item = Bytes> + '_ {
        let size = size.max(1);
        (0..self.data.len())
            .step_by(size)
            .map(move |start| self.data.slice(start..(start + size).min(self.data.len())))
    }
}

/// Which acknowledgments the engine waits for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AckPolicy {
    /// Wait for a window ack after each window that requires one.
    pub ack_per_window: bool,
    /// Wait (best effort) for a transfer-complete status after the last window.
    pub ack_final: bool,
}

impl Default for AckPolicy {
    fn default() -> Self {
        Self {
            ack_per_window: true,
            ack_final: true,
        }
    }
}

/// Ordered windows plus the acknowledgment expectations for a transfer.
#[derive(Debug, Clone)]
pub struct SendPlan {
    id: String,
    windows: Vec<Window>,
    chunk_size: usize,
    window_size: usize,
    ack_policy: AckPolicy,
}

impl SendPlan {
    /// Create a plan, checking its invariants.
    ///
    /// # Errors
    ///
    /// Returns [`PixelError::InvalidPlan`] if `windows` is empty or
    /// `chunk_size` / `window_size` is zero.
    pub fn new(
        id: impl Into<String>,
        windows: Vec<Window>,
        chunk_size: usize,
        window_size: usize,
        ack_policy: AckPolicy,
    ) -> Result<Self> {
        let id = id.into();
        if windows.is_empty() {
            return Err(PixelError::InvalidPlan(format!("plan '{id}' has no windows")));
        }
        if chunk_size == 0 {
            return Err(PixelError::InvalidPlan(format!(
                "plan '{id}' has a zero chunk size"
            )));
        }
        if window_size == 0 {
            return Err(PixelError::InvalidPlan(format!(
                "plan '{id}' has a zero window size"
            )));
        }
        Ok(Self {
            id,
            windows,
            chunk_size,
            window_size,
            ack_policy,
        })
    }

    /// Plan with one window and default sizes and policy.
    pub fn single_window(id: impl Into<String>, data: impl Into<Bytes>, requires_ack: bool) -> Self {
        Self {
            id: id.into(),
            windows: vec![Window::new(data, requires_ack)],
            chunk_size: DEFAULT_CHUNK_SIZE,
            window_size: DEFAULT_WINDOW_SIZE,
            ack_policy: AckPolicy::default(),
        }
    }

    /// Replace the chunk size.
    ///
    /// # Errors
    ///
    /// Returns [`PixelError::InvalidPlan`] if `chunk_size` is zero.
    pub fn with_chunk_size(mut self, chunk_size: usize) -> Result<Self> {
        if chunk_size == 0 {
            return Err(PixelError::InvalidPlan(format!(
                "plan '{}' has a zero chunk size",
                self.id
            )));
        }
        self.chunk_size = chunk_size;
        Ok(self)
    }

    /// Replace the acknowledgment policy.
    pub fn with_ack_policy(mut self, ack_policy: AckPolicy) -> Self {
        self.ack_policy = ack_policy;
        self
    }

    #[inline]
    pub fn id(&self) -> &str {
        &self.id
    }

    #[inline]
    pub fn windows(&self) -> &[Window] {
        &self.windows
    }

    #[inline]
    pub fn chunk_size(&self) -> usize {
        self.chunk_size
    }

    #[inline]
    pub fn window_size(&self) -> usize {
        self.window_size
    }

    #[inline]
    pub fn ack_policy(&self) -> AckPolicy {
        self.ack_policy
    }

    /// Total payload bytes across all windows.
    pub fn total_len(&self) -> usize {
        self.windows.iter().map(Window::len).sum()
    }
}
