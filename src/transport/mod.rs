//! Transport module - link abstraction and the windowed send engine.
//!
//! - [`ByteLink`]: where chunks go (BLE characteristic, stream, test double)
//! - [`TransportEngine`]: writes a plan window by window, waiting for the
//!   device to acknowledge each one

mod engine;
mod link;

pub use engine::{SendReport, TransportConfig, TransportEngine};
pub use link::{ByteLink, StreamLink};
