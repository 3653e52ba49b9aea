//! RGB color value.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::PixelError;

/// A 24-bit color, sent on the wire as three bytes in R, G, B order.
///
/// Parses from six hex digits with an optional leading `#`.
///
/// ```
/// use pixelwire::protocol::Rgb;
///
/// let c: Rgb = "ff8000".parse().unwrap();
/// assert_eq!(c.to_bytes(), [0xFF, 0x80, 0x00]);
/// assert_eq!(c.to_string(), "ff8000");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Rgb(pub [u8; 3]);

impl Rgb {
    pub const WHITE: Rgb = Rgb([0xFF, 0xFF, 0xFF]);
    pub const BLACK: Rgb = Rgb([0x00, 0x00, 0x00]);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self([r, g, b])
    }

    #[inline]
    pub const fn to_bytes(self) -> [u8; 3] {
        self.0
    }
}

impl Default for Rgb {
    fn default() -> Self {
        Self::WHITE
    }
}

impl FromStr for Rgb {
    type Err = PixelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let digits = s.strip_prefix('#').unwrap_or(s);
        let reject = || PixelError::invalid("color", s, "6 hex digits (RRGGBB)");

        if digits.len() != 6 || !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(reject());
        }

        let mut out = [0u8; 3];
        for (i, byte) in out.iter_mut().enumerate() {
            *byte = u8::from_str_radix(&digits[i * 2..i * 2 + 2], 16).map_err(|_| reject())?;
        }
        Ok(Self(out))
    }
}

impl TryFrom<String> for Rgb {
    type Error = PixelError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Rgb> for String {
    fn from(value: Rgb) -> Self {
        value.to_string()
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [r, g, b] = self.0;
        write!(f, "{r:02x}{g:02x}{b:02x}")
    }
}
