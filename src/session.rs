//! Session builder and command execution.
//!
//! A [`Session`] owns one link and everything needed to drive it:
//! 1. Encode the command into a plan
//! 2. Stream the plan window by window
//! 3. Wait for the device's acknowledgments
//!
//! Notifications reach the session through the [`AckManager`] returned by
//! [`Session::acks`]; hook it to the link's notify callback.
//!
//! # Example
//!
//! ```no_run
//! use std::time::Duration;
//! use pixelwire::{Command, SessionBuilder, StreamLink};
//!
//! # async fn run(port: tokio::io::DuplexStream) -> pixelwire::Result<()> {
//! let mut session = SessionBuilder::new()
//!     .ack_timeout(Duration::from_secs(5))
//!     .device_size(32, 32)
//!     .build(StreamLink::new(port));
//!
//! let acks = session.acks();
//! // feed device notifications: acks.on_notification(&frame);
//! # let _ = acks;
//!
//! session.execute(&Command::SetBrightness { level: 50 }).await?;
//! # Ok(())
//! # }
//! ```

use std::sync::Arc;
use std::time::Duration;

use crate::ack::AckManager;
use crate::command::{Command, CommandEncoder, DeviceProfile, EncoderConfig, GlyphSource};
use crate::error::Result;
use crate::protocol::SendPlan;
use crate::transport::{ByteLink, SendReport, TransportConfig, TransportEngine};

/// Builder for configuring and creating a [`Session`].
pub struct SessionBuilder {
    encoder_config: EncoderConfig,
    transport_config: TransportConfig,
    glyphs: Option<Arc<dyn GlyphSource>>,
}

impl SessionBuilder {
    /// Create a new builder with default sizes and timeouts.
    pub fn new() -> Self {
        Self {
            encoder_config: EncoderConfig::default(),
            transport_config: TransportConfig::default(),
            glyphs: None,
        }
    }

    /// Set the bytes per link write.
    ///
    /// Default: 244
    pub fn chunk_size(mut self, size: usize) -> Self {
        self.encoder_config.chunk_size = size;
        self
    }

    /// Set the bytes of image data per acknowledged window.
    ///
    /// Default: 12288
    pub fn window_size(mut self, size: usize) -> Self {
        self.encoder_config.window_size = size;
        self
    }

    /// Set how long to wait for each acknowledgment.
    ///
    /// Default: 8 seconds
    pub fn ack_timeout(mut self, timeout: Duration) -> Self {
        self.transport_config.ack_timeout = timeout;
        self
    }

    /// Declare the panel size, enabling pixel coordinate checks.
    pub fn device_size(mut self, width: u16, height: u16) -> Self {
        self.encoder_config.device = DeviceProfile::new(width, height);
        self
    }

    /// Render text with `glyphs` instead of the built-in block glyphs.
    pub fn glyph_source(mut self, glyphs: impl GlyphSource + 'static) -> Self {
        self.glyphs = Some(Arc::new(glyphs));
        self
    }

    /// Build a session over `link`.
    pub fn build<L: ByteLink>(self, link: L) -> Session<L> {
        let encoder = match self.glyphs {
            Some(glyphs) => CommandEncoder::with_glyph_source(self.encoder_config, glyphs),
            None => CommandEncoder::new(self.encoder_config),
        };
        let engine = TransportEngine::with_config(AckManager::new(), self.transport_config);
        Session {
            link,
            encoder,
            engine,
        }
    }
}

impl Default for SessionBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// A link plus the encoder and engine that drive it.
pub struct Session<L> {
    link: L,
    encoder: CommandEncoder,
    engine: TransportEngine,
}

impl<L: ByteLink> Session<L> {
    /// Create a new session builder.
    pub fn builder() -> SessionBuilder {
        SessionBuilder::new()
    }

    /// Handle for feeding device notifications into this session.
    pub fn acks(&self) -> AckManager {
        self.engine.acks().clone()
    }

    pub fn encoder(&self) -> &CommandEncoder {
        &self.encoder
    }

    /// Encode and deliver `command`.
    ///
    /// Validation errors are returned before anything is written.
    pub async fn execute(&mut self, command: &Command) -> Result<SendReport> {
        let plan = self.encoder.encode(command)?;
        tracing::debug!("Executing '{}'", command.name());
        self.send_plan(plan).await
    }

    /// Deliver a pre-built plan.
    pub async fn send_plan(&mut self, plan: SendPlan) -> Result<SendReport> {
        self.engine.send(plan, &mut self.link).await
    }

    pub fn link(&self) -> &L {
        &self.link
    }

    pub fn link_mut(&mut self) -> &mut L {
        &mut self.link
    }

    /// Consume the session, returning the link.
    pub fn into_link(self) -> L {
        self.link
    }
}
