//! # pixelwire
//!
//! Protocol codec and windowed transport for BLE LED matrix displays.
//!
//! The crate turns display operations (brightness, pixels, text screens,
//! PNG/GIF uploads, clock and rhythm modes) into the exact byte frames the
//! panel firmware expects, and streams them over an MTU-limited link that
//! acknowledges data one window at a time.
//!
//! ## Architecture
//!
//! - **Codec**: byte/bit reordering, CRC-32, little-endian length fields
//! - **Protocol**: send plans, glyph packing, notification frames
//! - **Commands**: validated operations encoded into send plans
//! - **Transport**: chunked writes gated on per-window acknowledgments
//!
//! Device discovery, font rendering and image resizing live outside this
//! crate; plug them in through [`ByteLink`] and [`GlyphSource`].
//!
//! ## Example
//!
//! ```ignore
//! use pixelwire::{Command, SessionBuilder};
//!
//! #[tokio::main]
//! async fn main() -> pixelwire::Result<()> {
//!     let mut session = SessionBuilder::new().build(ble_link);
//!
//!     let acks = session.acks();
//!     ble_link_on_notify(move |frame| {
//!         acks.on_notification(frame);
//!     });
//!
//!     session.execute(&Command::SetBrightness { level: 50 }).await?;
//!     Ok(())
//! }
//! ```

pub mod codec;
pub mod command;
pub mod control;
pub mod error;
pub mod protocol;
pub mod transport;

mod ack;
mod session;

pub use ack::{AckManager, Elapsed, ResetGuard, DEFAULT_ACK_TIMEOUT};
pub use command::{Command, CommandEncoder, EncoderConfig, GlyphSource};
pub use error::{PixelError, Result};
pub use protocol::{NotifyOutcome, SendPlan};
pub use session::{Session, SessionBuilder};
pub use transport::{ByteLink, SendReport, StreamLink, TransportConfig, TransportEngine};
