//! Command module - validated display operations and their encoders.
//!
//! Every operation the device understands is a variant of [`Command`].
//! [`CommandEncoder`] validates a command and turns it into a [`SendPlan`]
//! sized for the link; nothing here touches the link itself.
//!
//! # Example
//!
//! ```
//! use pixelwire::command::{Command, CommandEncoder, EncoderConfig};
//!
//! let encoder = CommandEncoder::new(EncoderConfig::default());
//! let plan = encoder.encode(&Command::SetBrightness { level: 50 }).unwrap();
//! assert_eq!(plan.windows()[0].data(), &[0x05, 0x00, 0x04, 0x80, 0x32]);
//! ```

mod basic;
mod image;
mod modes;
mod params;
mod text;

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::protocol::{Rgb, SendPlan, DEFAULT_CHUNK_SIZE, DEFAULT_WINDOW_SIZE};

pub use basic::{
    clear, delete_screen, set_brightness, set_fun_mode, set_orientation, set_pixel, set_power,
};
pub use image::{encode_gif, encode_image, encode_png, ImageKind, IMAGE_HEADER_LEN, MAX_FRAME_BODY};
pub use modes::{
    set_clock_mode, set_clock_mode_on, set_rhythm_mode, set_rhythm_mode_2, set_time, set_time_at,
    ClockSettings, TimeSettings, RHYTHM_LEVELS,
};
pub use text::{
    encode_text, FallbackGlyphs, FontSpec, GlyphSource, TextOptions, FALLBACK_GLYPH_WIDTH,
    MAX_TEXT_CHARS,
};

/// A display operation.
///
/// Serialized as `{"command": "<name>", "params": {...}}`. Clock mode and
/// set time may leave out `params` to use the local date and time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "command", content = "params", rename_all = "snake_case")]
pub enum Command {
    Clear,
    SetBrightness {
        level: u8,
    },
    SetFunMode {
        enabled: bool,
    },
    SetOrientation {
        orientation: u8,
    },
    SetPower {
        on: bool,
    },
    SetPixel {
        x: u8,
        y: u8,
        #[serde(default)]
        color: Rgb,
    },
    DeleteScreen {
        index: u8,
    },
    SetClockMode(Option<ClockSettings>),
    SetRhythmMode {
        style: u8,
        levels: [u8; RHYTHM_LEVELS],
    },
    #[serde(rename = "set_rhythm_mode_2")]
    SetRhythmMode2 {
        style: u8,
        t: u8,
    },
    SetTime(Option<TimeSettings>),
    SendText {
        text: String,
        #[serde(default)]
        options: TextOptions,
    },
    SendImage {
        #[serde(with = "hex_bytes")]
        data: Vec<u8>,
        #[serde(default)]
        kind: Option<ImageKind>,
    },
}

impl Command {
    /// The wire name of this command, as used in the JSON envelope.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Clear => "clear",
            Self::SetBrightness { .. } => "set_brightness",
            Self::SetFunMode { .. } => "set_fun_mode",
            Self::SetOrientation { .. } => "set_orientation",
            Self::SetPower { .. } => "set_power",
            Self::SetPixel { .. } => "set_pixel",
            Self::DeleteScreen { .. } => "delete_screen",
            Self::SetClockMode(_) => "set_clock_mode",
            Self::SetRhythmMode { .. } => "set_rhythm_mode",
            Self::SetRhythmMode2 { .. } => "set_rhythm_mode_2",
            Self::SetTime(_) => "set_time",
            Self::SendText { .. } => "send_text",
            Self::SendImage { .. } => "send_image",
        }
    }
}

/// Image bytes travel as a hex string in JSON.
mod hex_bytes {
    use serde::{Deserialize, Deserializer, Serializer};

    use crate::codec::{from_hex, to_hex};

    pub fn serialize<S: Serializer>(data: &[u8], serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(&to_hex(data))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Vec<u8>, D::Error> {
        let encoded = String::deserialize(deserializer)?;
        from_hex(&encoded).map_err(serde::de::Error::custom)
    }
}

/// Known panel dimensions, used for coordinate checks.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DeviceProfile {
    pub width: Option<u16>,
    pub height: Option<u16>,
}

impl DeviceProfile {
    /// Profile for a panel of known size.
    pub fn new(width: u16, height: u16) -> Self {
        Self {
            width: Some(width),
            height: Some(height),
        }
    }
}

/// Sizing used when building plans.
#[derive(Debug, Clone)]
pub struct EncoderConfig {
    /// Bytes per link write.
    /// Default: 244
    pub chunk_size: usize,

    /// Bytes of image data per acknowledged window.
    /// Default: 12288
    pub window_size: usize,

    /// Panel dimensions, when known.
    /// Default: unknown
    pub device: DeviceProfile,
}

impl Default for EncoderConfig {
    fn default() -> Self {
        Self {
            chunk_size: DEFAULT_CHUNK_SIZE,
            window_size: DEFAULT_WINDOW_SIZE,
            device: DeviceProfile::default(),
        }
    }
}

/// Turns [`Command`]s into [`SendPlan`]s.
#[derive(Clone)]
pub struct CommandEncoder {
    config: EncoderConfig,
    glyphs: Arc<dyn GlyphSource>,
}

impl std::fmt::Debug for CommandEncoder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CommandEncoder")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl CommandEncoder {
    /// Encoder that renders text with [`FallbackGlyphs`].
    pub fn new(config: EncoderConfig) -> Self {
        Self::with_glyph_source(config, Arc::new(FallbackGlyphs))
    }

    /// Encoder that renders text with `glyphs`.
    pub fn with_glyph_source(config: EncoderConfig, glyphs: Arc<dyn GlyphSource>) -> Self {
        Self { config, glyphs }
    }

    pub fn config(&self) -> &EncoderConfig {
        &self.config
    }

    /// Validate `command` and build its plan.
    ///
    /// # Errors
    ///
    /// Any validation failure, raised before a plan exists.
    pub fn encode(&self, command: &Command) -> Result<SendPlan> {
        let plan = match command {
            Command::Clear => clear(),
            Command::SetBrightness { level } => set_brightness(*level)?,
            Command::SetFunMode { enabled } => set_fun_mode(*enabled),
            Command::SetOrientation { orientation } => set_orientation(*orientation)?,
            Command::SetPower { on } => set_power(*on),
            Command::SetPixel { x, y, color } => set_pixel(*x, *y, *color, &self.config.device)?,
            Command::DeleteScreen { index } => delete_screen(*index),
            Command::SetClockMode(clock) => set_clock_mode(&clock.unwrap_or_default())?,
            Command::SetRhythmMode { style, levels } => set_rhythm_mode(*style, levels)?,
            Command::SetRhythmMode2 { style, t } => set_rhythm_mode_2(*style, *t)?,
            Command::SetTime(time) => set_time(&time.unwrap_or_default())?,
            Command::SendText { text, options } => encode_text(text, options, self.glyphs.as_ref())?,
            Command::SendImage { data, kind } => encode_image(data, *kind, self.config.window_size)?,
        };
        plan.with_chunk_size(self.config.chunk_size)
    }
}

impl Default for CommandEncoder {
    fn default() -> Self {
        Self::new(EncoderConfig::default())
    }
}
