//! Codec module - byte, word and bit reordering plus checksums.
//!
//! Every checksum and length field on the wire is built from the functions
//! in this module. They are pure and never look at device state.
//!
//! - `bits` - byte swap, word-order swap, 16-bit bit reversal
//! - `checksum` - CRC-32 in little-endian order and length fields
//!
//! # Example
//!
//! ```
//! use pixelwire::codec::{byte_swap, crc32_le, length_field};
//!
//! assert_eq!(byte_swap(&[1, 2, 3]), vec![3, 2, 1]);
//! assert_eq!(length_field(256, 2).unwrap(), vec![0x00, 0x01]);
//! assert_eq!(crc32_le(b"123456789"), [0x26, 0x39, 0xF4, 0xCB]);
//! ```

mod bits;
mod checksum;

pub use bits::{byte_swap, reverse_bits16, reverse_bits_per_word, swap_word_order};
pub use checksum::{crc32_le, length_field};

/// Render bytes as lowercase hex for logs.
///
/// Hex is a display concern only; nothing on the wire is built from it.
pub fn to_hex(data: &[u8]) -> String {
    data.iter().map(|b| format!("{b:02x}")).collect()
}

/// Decode a hex string into bytes.
///
/// Used by the JSON command envelope, which carries image data as hex.
pub fn from_hex(encoded: &str) -> crate::error::Result<Vec<u8>> {
    let encoded = encoded.trim();
    if encoded.len() % 2 != 0 || !encoded.is_ascii() {
        return Err(crate::error::PixelError::invalid(
            "hex",
            format!("{} chars", encoded.len()),
            "an even number of hex digits",
        ));
    }
    (0..encoded.len())
        .step_by(2)
        .map(|i| {
            u8::from_str_radix(&encoded[i..i + 2], 16).map_err(|_| {
                crate::error::PixelError::invalid("hex", &encoded[i..i + 2], "hex digits")
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hex_round_trip() {
        let input = [0x00, 0x0a, 0xff, 0x32];
        assert_eq!(to_hex(&input), "000aff32");
        assert_eq!(from_hex("000aff32").unwrap(), input);
        assert_eq!(from_hex("000AFF32").unwrap(), input);
    }

    #[test]
    fn test_from_hex_rejects_odd_length() {
        assert!(from_hex("abc").is_err());
    }

    #[test]
    fn test_from_hex_rejects_non_hex() {
        assert!(from_hex("zz").is_err());
    }
}
