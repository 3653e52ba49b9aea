//! Parameter validation helpers shared by the command encoders.

use std::fmt::Display;
use std::ops::RangeInclusive;

use crate::error::{PixelError, Result};

/// Check that `value` lies in `range`.
pub(crate) fn check_range<T>(field: &'static str, value: T, range: RangeInclusive<T>) -> Result<T>
where
    T: PartialOrd + Display + Copy,
{
    if range.contains(&value) {
        Ok(value)
    } else {
        Err(PixelError::invalid(
            field,
            value,
            format!("{}..={}", range.start(), range.end()),
        ))
    }
}

/// Wire encoding of a boolean flag.
#[inline]
pub(crate) fn flag(on: bool) -> u8 {
    u8::from(on)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_range_accepts_bounds() {
        assert_eq!(check_range("level", 0u8, 0..=100).unwrap(), 0);
        assert_eq!(check_range("level", 100u8, 0..=100).unwrap(), 100);
    }

    #[test]
    fn test_check_range_rejects_outside() {
        let err = check_range("level", 101u8, 0..=100).unwrap_err();
        match err {
            PixelError::InvalidParameter {
                field,
                value,
                allowed,
            } => {
                assert_eq!(field, "level");
                assert_eq!(value, "101");
                assert_eq!(allowed, "0..=100");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_flag() {
        assert_eq!(flag(true), 1);
        assert_eq!(flag(false), 0);
    }
}
