//! Dry run - execute JSON commands against a simulated panel.
//!
//! This example demonstrates:
//! - Building a session with the builder pattern
//! - Wiring device notifications into the session's ack manager
//! - Serving the JSON command envelope over stdin/stdout
//!
//! Each frame that reaches the "panel" is printed to stderr as hex and
//! acknowledged as complete.
//!
//! ```sh
//! echo '{"command": "set_brightness", "params": {"level": 50}}' \
//!     | cargo run --example dry_run
//! ```

use std::io;

use pixelwire::codec::to_hex;
use pixelwire::control::serve_stdio;
use pixelwire::{AckManager, ByteLink, SessionBuilder};

/// Reassembles frames from chunks using their 2-byte length prefix.
struct LoopbackPanel {
    acks: AckManager,
    pending: Vec<u8>,
}

impl ByteLink for LoopbackPanel {
    async fn write(&mut self, chunk: &[u8]) -> io::Result<()> {
        self.pending.extend_from_slice(chunk);
        while self.pending.len() >= 2 {
            let len = u16::from_le_bytes([self.pending[0], self.pending[1]]) as usize;
            if len < 2 || self.pending.len() < len {
                break;
            }
            let frame: Vec<u8> = self.pending.drain(..len).collect();
            eprintln!("panel <- {}", to_hex(&frame));
            self.acks.on_notification(&[0x05, 0x00, 0x00, 0x00, 0x03]);
        }
        Ok(())
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let mut session = SessionBuilder::new()
        .device_size(32, 32)
        .build(LoopbackPanel {
            acks: AckManager::new(),
            pending: Vec::new(),
        });

    // Notifications from the panel feed the session's manager.
    let acks = session.acks();
    session.link_mut().acks = acks;

    let handled = serve_stdio(&mut session).await?;
    eprintln!("{handled} command(s) handled");

    Ok(())
}
