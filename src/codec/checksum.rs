//! CRC-32 and length fields.
//!
//! Both are emitted little-endian on the wire.

use crate::error::{PixelError, Result};

/// Standard CRC-32 (reflected, polynomial 0xEDB88320) as little-endian bytes.
pub fn crc32_le(buf: &[u8]) -> [u8; 4] {
    let mut hasher = crc32fast::Hasher::new();
    hasher.update(buf);
    hasher.finalize().to_le_bytes()
}

/// Encode `value` as a `width`-byte little-endian field.
///
/// # Errors
///
/// Returns [`PixelError::ValueTooLarge`] if `value` needs more than `width`
/// bytes.
pub fn length_field(value: u64, width: usize) -> Result<Vec<u8>> {
    let fits = match width {
        0 => value == 0,
        1..=7 => value >> (8 * width) == 0,
        _ => true,
    };
    if !fits {
        return Err(PixelError::ValueTooLarge { value, width });
    }

    let le = value.to_le_bytes();
    let mut field = vec![0u8; width];
    let n = width.min(le.len());
    field[..n].copy_from_slice(&le[..n]);
    Ok(field)
}
