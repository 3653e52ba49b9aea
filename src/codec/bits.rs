//! Byte, word and bit reordering.
//!
//! The device scans glyph bitmaps in a different order than they are drawn,
//! so packed rows go through a word-order swap, a full byte swap and a
//! per-word bit reversal before they hit the wire.

use crate::error::{PixelError, Result};

/// Reverse the byte order of `buf`. Identity on empty input.
pub fn byte_swap(buf: &[u8]) -> Vec<u8> {
    buf.iter().rev().copied().collect()
}

/// Reverse the order of the 2-byte groups in `buf`.
///
/// Bytes inside each group keep their order.
///
/// # Errors
///
/// Returns [`PixelError::InvalidLength`] if `buf` has an odd length.
pub fn swap_word_order(buf: &[u8]) -> Result<Vec<u8>> {
    check_even(buf)?;
    Ok(buf.chunks_exact(2).rev().flatten().copied().collect())
}

/// Bit-reversal of a 16-bit word.
///
/// Swaps byte halves, then nibbles, then bit pairs, then single bits.
#[inline]
pub const fn reverse_bits16(n: u16) -> u16 {
    let n = ((n & 0xFF00) >> 8) | ((n & 0x00FF) << 8);
    let n = ((n & 0xF0F0) >> 4) | ((n & 0x0F0F) << 4);
    let n = ((n & 0xCCCC) >> 2) | ((n & 0x3333) << 2);
    ((n & 0xAAAA) >> 1) | ((n & 0x5555) << 1)
}

/// Apply [`reverse_bits16`] to each big-endian word of `buf`.
///
/// # Errors
///
/// Returns [`PixelError::InvalidLength`] if `buf` has an odd length.
pub fn reverse_bits_per_word(buf: &[u8]) -> Result<Vec<u8>> {
    check_even(buf)?;
    Ok(buf
        .chunks_exact(2)
        .flat_map(|w| reverse_bits16(u16::from_be_bytes([w[0], w[1]])).to_be_bytes())
        .collect())
}

#[inline]
fn check_even(buf: &[u8]) -> Result<()> {
    if buf.len() % 2 != 0 {
        return Err(PixelError::InvalidLength { len: buf.len() });
    }
    Ok(())
}
