//! Fixed-layout display commands.
//!
//! Each of these is a single window built directly from validated fields:
//!
//! | Command        | Bytes                                 |
//! |----------------|---------------------------------------|
//! | clear          | `04 00 03 80`                         |
//! | brightness     | `05 00 04 80` + level                 |
//! | fun mode       | `05 00 04 01` + on                    |
//! | orientation    | `05 00 06 80` + orientation           |
//! | power          | `05 00 07 01` + on                    |
//! | pixel          | `0a 00 05 01 00` + R G B + x + y      |
//! | delete screen  | `07 00 02 01 01 00` + index           |

use super::params::{check_range, flag};
use super::DeviceProfile;
use crate::error::{PixelError, Result};
use crate::protocol::{Rgb, SendPlan};

const CLEAR: [u8; 4] = [0x04, 0x00, 0x03, 0x80];
const BRIGHTNESS: [u8; 4] = [0x05, 0x00, 0x04, 0x80];
const FUN_MODE: [u8; 4] = [0x05, 0x00, 0x04, 0x01];
const ORIENTATION: [u8; 4] = [0x05, 0x00, 0x06, 0x80];
const POWER: [u8; 4] = [0x05, 0x00, 0x07, 0x01];
const PIXEL: [u8; 5] = [0x0A, 0x00, 0x05, 0x01, 0x00];
const DELETE_SCREEN: [u8; 6] = [0x07, 0x00, 0x02, 0x01, 0x01, 0x00];

fn frame(header: &[u8], params: &[u8]) -> Vec<u8> {
    let mut data = Vec::with_capacity(header.len() + params.len());
    data.extend_from_slice(header);
    data.extend_from_slice(params);
    data
}

/// Clear the stored screens.
pub fn clear() -> SendPlan {
    SendPlan::single_window("clear", CLEAR.to_vec(), true)
}

/// Set the panel brightness, 0-100.
pub fn set_brightness(level: u8) -> Result<SendPlan> {
    let level = check_range("brightness", level, 0..=100)?;
    Ok(SendPlan::single_window(
        "set_brightness",
        frame(&BRIGHTNESS, &[level]),
        true,
    ))
}

/// Enter or leave DIY drawing mode.
pub fn set_fun_mode(enabled: bool) -> SendPlan {
    SendPlan::single_window("set_fun_mode", frame(&FUN_MODE, &[flag(enabled)]), true)
}

/// Rotate the display, 0-3.
pub fn set_orientation(orientation: u8) -> Result<SendPlan> {
    let orientation = check_range("orientation", orientation, 0..=3)?;
    Ok(SendPlan::single_window(
        "set_orientation",
        frame(&ORIENTATION, &[orientation]),
        true,
    ))
}

/// Switch the LEDs on or off.
pub fn set_power(on: bool) -> SendPlan {
    SendPlan::single_window("set_power", frame(&POWER, &[flag(on)]), true)
}

/// Light one pixel. Coordinates are checked against `device` when its size
/// is known.
pub fn set_pixel(x: u8, y: u8, color: Rgb, device: &DeviceProfile) -> Result<SendPlan> {
    if let Some(width) = device.width {
        if u16::from(x) >= width {
            return Err(PixelError::invalid("x", x, format!("0..{width}")));
        }
    }
    if let Some(height) = device.height {
        if u16::from(y) >= height {
            return Err(PixelError::invalid("y", y, format!("0..{height}")));
        }
    }

    let [r, g, b] = color.to_bytes();
    Ok(SendPlan::single_window(
        "set_pixel",
        frame(&PIXEL, &[r, g, b, x, y]),
        true,
    ))
}

/// Delete a stored screen from device memory.
pub fn delete_screen(index: u8) -> SendPlan {
    SendPlan::single_window("delete_screen", frame(&DELETE_SCREEN, &[index]), true)
}
