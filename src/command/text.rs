//! Text screens.
//!
//! A text screen is one window:
//!
//! ```text
//! len1(2 LE) 00 01 00 len2(2 LE) 00 00 crc(4 LE) slot(2 BE) count props glyphs...
//! ```
//!
//! `props` is `00 01 01 anim speed rainbow R G B 00 00 00 00` and the CRC
//! covers `count ++ props ++ glyphs`. Glyph rasterization happens outside
//! this crate, behind [`GlyphSource`].

use serde::{Deserialize, Serialize};

use super::params::check_range;
use crate::codec::{crc32_le, length_field};
use crate::error::{PixelError, Result};
use crate::protocol::{glyph_block, GlyphBitmap, Rgb, SendPlan};

/// Fixed bytes in the frame besides the glyph blocks.
const FRAME_BASE: u64 = 0x1D;

/// Bytes covered by the CRC besides the glyph blocks.
const PAYLOAD_BASE: u64 = 0x0E;

/// Width of the glyphs produced by [`FallbackGlyphs`].
pub const FALLBACK_GLYPH_WIDTH: usize = 9;

/// Most characters a single text screen can hold.
pub const MAX_TEXT_CHARS: usize = 100;

/// Packed bytes per glyph row; the header lengths count glyphs 9 to 16
/// pixels wide.
const GLYPH_ROW_BYTES: usize = 2;

/// Font request forwarded to the glyph source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FontSpec {
    pub name: String,
    /// Point size; 0 means the matrix height.
    pub size: u8,
    pub offset_x: i16,
    pub offset_y: i16,
}

impl Default for FontSpec {
    fn default() -> Self {
        Self {
            name: "default".to_string(),
            size: 0,
            offset_x: 0,
            offset_y: 0,
        }
    }
}

impl FontSpec {
    /// Size to render at, substituting the matrix height for 0.
    pub fn effective_size(&self, matrix_height: usize) -> usize {
        match self.size {
            0 => matrix_height,
            size => size as usize,
        }
    }
}

/// Turns a character into an on/off pixel grid.
pub trait GlyphSource: Send + Sync {
    /// Rasterize `ch`. The returned bitmap must be `matrix_height` rows tall
    /// and 9 to 16 pixels wide.
    fn rasterize(&self, ch: char, font: &FontSpec, matrix_height: usize) -> Result<GlyphBitmap>;
}

impl<F> GlyphSource for F
where
    F: Fn(char, &FontSpec, usize) -> Result<GlyphBitmap> + Send + Sync,
{
    fn rasterize(&self, ch: char, font: &FontSpec, matrix_height: usize) -> Result<GlyphBitmap> {
        self(ch, font, matrix_height)
    }
}

/// Glyph source used when no font is available: every character is a fully
/// lit 9-pixel-wide block.
#[derive(Debug, Clone, Copy, Default)]
pub struct FallbackGlyphs;

impl GlyphSource for FallbackGlyphs {
    fn rasterize(&self, _ch: char, _font: &FontSpec, matrix_height: usize) -> Result<GlyphBitmap> {
        GlyphBitmap::filled(FALLBACK_GLYPH_WIDTH, matrix_height, true)
    }
}

/// Display options for [`encode_text`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TextOptions {
    pub rainbow_mode: u8,
    /// 0-7; modes 3 and 4 are not supported by the firmware.
    pub animation: u8,
    pub save_slot: u8,
    pub speed: u8,
    pub color: Rgb,
    pub font: FontSpec,
    pub matrix_height: u8,
}

impl Default for TextOptions {
    fn default() -> Self {
        Self {
            rainbow_mode: 0,
            animation: 0,
            save_slot: 1,
            speed: 80,
            color: Rgb::WHITE,
            font: FontSpec::default(),
            matrix_height: 16,
        }
    }
}

impl TextOptions {
    fn validate(&self) -> Result<()> {
        check_range("rainbow mode", self.rainbow_mode, 0..=9)?;
        check_range("animation", self.animation, 0..=7)?;
        if matches!(self.animation, 3 | 4) {
            return Err(PixelError::invalid(
                "animation",
                self.animation,
                "0..=7 except 3 and 4",
            ));
        }
        check_range("save slot", self.save_slot, 1..=10)?;
        check_range("speed", self.speed, 0..=100)?;
        check_range("matrix height", self.matrix_height, 1..=128)?;
        Ok(())
    }

    fn properties(&self) -> [u8; 13] {
        let [r, g, b] = self.color.to_bytes();
        [
            0x00,
            0x01,
            0x01,
            self.animation,
            self.speed,
            self.rainbow_mode,
            r,
            g,
            b,
            0x00,
            0x00,
            0x00,
            0x00,
        ]
    }
}

/// Build the text screen for `text`.
///
/// # Errors
///
/// [`PixelError::InvalidParameter`] for empty or over-long text and for any
/// out-of-range option; [`PixelError::InvalidGlyphSize`] for a glyph that
/// is not `matrix_height` rows of 9 to 16 pixels. Errors from `glyphs` are
/// passed through.
pub fn encode_text(text: &str, options: &TextOptions, glyphs: &dyn GlyphSource) -> Result<SendPlan> {
    let count = text.chars().count();
    if count == 0 || count > MAX_TEXT_CHARS {
        return Err(PixelError::invalid(
            "text length",
            count,
            format!("1..={MAX_TEXT_CHARS} characters"),
        ));
    }
    options.validate()?;

    let height = options.matrix_height as usize;
    let font = FontSpec {
        size: options.font.effective_size(height).min(u8::MAX as usize) as u8,
        ..options.font.clone()
    };

    let mut payload = Vec::with_capacity(14 + count * (6 + 2 * height));
    payload.push(count as u8);
    payload.extend_from_slice(&options.properties());
    for ch in text.chars() {
        let bitmap = glyphs.rasterize(ch, &font, height)?;
        check_glyph(&bitmap, height)?;
        payload.extend_from_slice(&glyph_block(&bitmap, options.color)?);
    }

    let per_glyph = (6 + 2 * height) as u64;
    let len1 = length_field(FRAME_BASE + count as u64 * per_glyph, 2)?;
    let len2 = length_field(PAYLOAD_BASE + count as u64 * per_glyph, 2)?;

    let mut frame = Vec::with_capacity(15 + payload.len());
    frame.extend_from_slice(&len1);
    frame.extend_from_slice(&[0x00, 0x01, 0x00]);
    frame.extend_from_slice(&len2);
    frame.extend_from_slice(&[0x00, 0x00]);
    frame.extend_from_slice(&crc32_le(&payload));
    frame.extend_from_slice(&u16::from(options.save_slot).to_be_bytes());
    frame.extend_from_slice(&payload);

    tracing::debug!(
        "Encoded text screen: {} chars, {} bytes, slot {}",
        count,
        frame.len(),
        options.save_slot
    );
    Ok(SendPlan::single_window("send_text", frame, true))
}

fn check_glyph(bitmap: &GlyphBitmap, matrix_height: usize) -> Result<()> {
    if bitmap.height() != matrix_height || bitmap.width().div_ceil(8) != GLYPH_ROW_BYTES {
        return Err(PixelError::InvalidGlyphSize {
            width: bitmap.width(),
            height: bitmap.height(),
        });
    }
    Ok(())
}
