//! Glyph packing.
//!
//! A rasterized character is packed row by row into a byte-padded bitmap,
//! then reordered into the device's scan order:
//!
//! ```text
//! rows (MSB = leftmost pixel) ─► swap_word_order ─► byte_swap ─► reverse_bits_per_word
//! ```
//!
//! The resulting glyph block is:
//!
//! ```text
//! ┌──────┬───────────┬───────┬────────┬─────────────┐
//! │ 0x80 │ R  G  B   │ width │ height │ wire bitmap │
//! │ 1    │ 3 bytes   │ 1     │ 1      │ H*ceil(W/8) │
//! └──────┴───────────┴───────┴────────┴─────────────┘
//! ```

use super::Rgb;
use crate::codec::{byte_swap, reverse_bits_per_word, swap_word_order};
use crate::error::{PixelError, Result};

/// Tag byte that opens every glyph block.
pub const GLYPH_TAG: u8 = 0x80;

/// An on/off pixel grid for one character, produced by a rasterizer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GlyphBitmap {
    width: usize,
    height: usize,
    pixels: Vec<bool>,
}

impl GlyphBitmap {
    /// Build a bitmap from row-major pixels.
    ///
    /// # Errors
    ///
    /// [`PixelError::InvalidGlyphSize`] if a dimension is zero or `pixels`
    /// does not hold exactly `width * height` entries.
    pub fn new(width: usize, height: usize, pixels: Vec<bool>) -> Result<Self> {
        if width == 0 || height == 0 || pixels.len() != width * height {
            return Err(PixelError::InvalidGlyphSize { width, height });
        }
        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    /// Build a bitmap by sampling `pixel_on(x, y)` once per pixel.
    pub fn from_fn<F>(width: usize, height: usize, mut pixel_on: F) -> Result<Self>
    where
        F: FnMut(usize, usize) -> bool,
    {
        let pixels = (0..height)
            .flat_map(|y| (0..width).map(move |x| (x, y)))
            .map(|(x, y)| pixel_on(x, y))
            .collect();
        Self::new(width, height, pixels)
    }

    /// A bitmap with every pixel set to `on`.
    pub fn filled(width: usize, height: usize, on: bool) -> Result<Self> {
        Self::new(width, height, vec![on; width * height])
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    /// Pixel at `(x, y)`; out-of-range coordinates read as off.
    #[inline]
    pub fn pixel(&self, x: usize, y: usize) -> bool {
        x < self.width && y < self.height && self.pixels[y * self.width + x]
    }
}

/// Pack a `width` x `height` glyph into its wire bitmap.
///
/// `pixel_on` is called once per in-range pixel, row by row.
///
/// # Errors
///
/// - [`PixelError::InvalidGlyphSize`] if a dimension is zero.
/// - [`PixelError::InvalidLength`] if the padded bitmap has an odd byte
///   count (one-byte rows with an odd height).
pub fn pack_bitmap<F>(width: usize, height: usize, mut pixel_on: F) -> Result<Vec<u8>>
where
    F: FnMut(usize, usize) -> bool,
{
    if width == 0 || height == 0 {
        return Err(PixelError::InvalidGlyphSize { width, height });
    }

    let row_bytes = width.div_ceil(8);
    let mut raw = vec![0u8; row_bytes * height];

    for y in 0..height {
        let row = &mut raw[y * row_bytes..(y + 1) * row_bytes];
        for x in 0..width {
            if pixel_on(x, y) {
                row[x / 8] |= 0x80 >> (x % 8);
            }
        }
    }

    let words = swap_word_order(&raw)?;
    reverse_bits_per_word(&byte_swap(&words))
}

/// Pack a glyph and wrap it in a glyph block.
pub fn pack_glyph<F>(width: usize, height: usize, color: Rgb, pixel_on: F) -> Result<Vec<u8>>
where
    F: FnMut(usize, usize) -> bool,
{
    let bitmap = pack_bitmap(width, height, pixel_on)?;

    let mut block = Vec::with_capacity(6 + bitmap.len());
    block.push(GLYPH_TAG);
    block.extend_from_slice(&color.to_bytes());
    block.push((width & 0xFF) as u8);
    block.push((height & 0xFF) as u8);
    block.extend_from_slice(&bitmap);
    Ok(block)
}

/// Glyph block for an already rasterized bitmap.
pub fn glyph_block(bitmap: &GlyphBitmap, color: Rgb) -> Result<Vec<u8>> {
    pack_glyph(bitmap.width(), bitmap.height(), color, |x, y| {
        bitmap.pixel(x, y)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_off_glyph_is_zero() {
        let bitmap = pack_bitmap(9, 16, |_, _| false).unwrap();
        assert_eq!(bitmap, vec![0u8; 32]);
    }

    #[test]
    fn test_all_on_byte_aligned_glyph_is_all_ones() {
        let bitmap = pack_bitmap(16, 16, |_, _| true).unwrap();
        assert_eq!(bitmap, vec![0xFF; 32]);

        let bitmap = pack_bitmap(8, 16, |_, _| true).unwrap();
        assert_eq!(bitmap, vec![0xFF; 16]);
    }

    #[test]
    fn test_all_on_nine_wide_keeps_padding_clear() {
        // Rows are FF 80; after reordering each word reads FF 01.
        let bitmap = pack_bitmap(9, 16, |_, _| true).unwrap();
        assert_eq!(bitmap.len(), 32);
        for word in bitmap.chunks_exact(2) {
            assert_eq!(word, &[0xFF, 0x01]);
        }
    }

    #[test]
    fn test_single_top_left_pixel() {
        // Raw 80 00 00 00; word swap gives 00 00 80 00, byte swap gives
        // 00 80 00 00, and bit reversal of 0x0080 gives 0x0100.
        let bitmap = pack_bitmap(16, 2, |x, y| x == 0 && y == 0).unwrap();
        assert_eq!(bitmap, vec![0x01, 0x00, 0x00, 0x00]);
    }

    #[test]
    fn test_pixel_on_called_once_per_pixel() {
        let mut calls = 0;
        pack_bitmap(12, 20, |_, _| {
            calls += 1;
            false
        })
        .unwrap();
        assert_eq!(calls, 12 * 20);
    }

    #[test]
    fn test_zero_size_rejected() {
        assert!(matches!(
            pack_bitmap(0, 16, |_, _| true),
            Err(PixelError::InvalidGlyphSize { width: 0, height: 16 })
        ));
        assert!(matches!(
            pack_bitmap(9, 0, |_, _| true),
            Err(PixelError::InvalidGlyphSize { width: 9, height: 0 })
        ));
    }

    #[test]
    fn test_odd_byte_count_rejected() {
        let result = pack_bitmap(8, 3, |_, _| true);
        assert!(matches!(result, Err(PixelError::InvalidLength { len: 3 })));
    }

    #[test]
    fn test_glyph_block_layout() {
        let block = pack_glyph(9, 16, Rgb::new(0x12, 0x34, 0x56), |_, _| false).unwrap();
        assert_eq!(&block[..6], &[0x80, 0x12, 0x34, 0x56, 9, 16]);
        assert_eq!(block.len(), 6 + 32);
    }

    #[test]
    fn test_glyph_block_from_bitmap_matches_closure() {
        let bitmap = GlyphBitmap::from_fn(10, 8, |x, y| (x + y) % 3 == 0).unwrap();
        let a = glyph_block(&bitmap, Rgb::WHITE).unwrap();
        let b = pack_glyph(10, 8, Rgb::WHITE, |x, y| (x + y) % 3 == 0).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_bitmap_rejects_wrong_pixel_count() {
        assert!(GlyphBitmap::new(3, 3, vec![true; 8]).is_err());
        assert!(GlyphBitmap::filled(0, 3, true).is_err());
    }
}
