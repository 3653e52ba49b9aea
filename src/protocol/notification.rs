//! Inbound notification frames.
//!
//! Acknowledgments arrive on the notify characteristic as frames of at
//! least 5 bytes whose first byte is `0x05`; byte 4 carries the status:
//!
//! | status | meaning                              |
//! |--------|--------------------------------------|
//! | 0, 1   | window acknowledged                  |
//! | 3      | window acknowledged, transfer done   |
//! | other  | undefined, reported as unknown       |

/// First byte of an acknowledgment frame.
pub const ACK_FRAME_TAG: u8 = 0x05;

/// Offset of the status byte in an acknowledgment frame.
pub const ACK_STATUS_OFFSET: usize = 4;

/// What an inbound notification frame means for the transfer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotifyOutcome {
    /// The current window was accepted.
    WindowAck,
    /// The current window was accepted and the transfer is complete.
    TransferComplete,
    /// Ack-shaped frame with a status the protocol does not define.
    UnknownStatus(u8),
    /// Not an acknowledgment frame.
    Ignored,
}

impl NotifyOutcome {
    /// Classify a raw notification frame.
    pub fn classify(frame: &[u8]) -> Self {
        if frame.len() <= ACK_STATUS_OFFSET || frame[0] != ACK_FRAME_TAG {
            return Self::Ignored;
        }
        match frame[ACK_STATUS_OFFSET] {
            0 | 1 => Self::WindowAck,
            3 => Self::TransferComplete,
            other => Self::UnknownStatus(other),
        }
    }

    /// Whether this outcome releases the window wait.
    #[inline]
    pub fn acks_window(self) -> bool {
        matches!(self, Self::WindowAck | Self::TransferComplete)
    }

    /// Whether this outcome releases the final wait.
    #[inline]
    pub fn completes_transfer(self) -> bool {
        matches!(self, Self::TransferComplete)
    }
}
