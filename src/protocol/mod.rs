//! Protocol module - plans, glyph blocks and notification frames.
//!
//! This module holds the wire-level building blocks shared by the command
//! encoders and the transport engine:
//! - [`SendPlan`] / [`Window`] / [`AckPolicy`] describing what to send
//! - glyph packing into the device's scan order
//! - classification of inbound notification frames
//! - the [`Rgb`] color value used by several commands

mod color;
mod glyph;
mod notification;
mod plan;

pub use color::Rgb;
pub use glyph::{glyph_block, pack_bitmap, pack_glyph, GlyphBitmap, GLYPH_TAG};
pub use notification::{NotifyOutcome, ACK_FRAME_TAG, ACK_STATUS_OFFSET};
pub use plan::{AckPolicy, SendPlan, Window, DEFAULT_CHUNK_SIZE, DEFAULT_WINDOW_SIZE};
