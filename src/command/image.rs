//! PNG and GIF uploads.
//!
//! Both formats share one frame shape; only the command byte, the option
//! byte and the two-byte tail differ:
//!
//! ```text
//! len(2 LE) cmd 00 option size(4 LE) crc(4 LE) tail(2) body...
//! ```
//!
//! `len` counts the whole frame including itself. A PNG is one frame. A GIF
//! is cut into `window_size` pieces, each framed separately but all carrying
//! the size and CRC of the whole file.

use serde::{Deserialize, Serialize};

use crate::codec::{crc32_le, length_field};
use crate::error::{PixelError, Result};
use crate::protocol::{AckPolicy, SendPlan, Window, DEFAULT_CHUNK_SIZE};

/// Bytes of framing in front of every image body.
pub const IMAGE_HEADER_LEN: usize = 15;

/// Largest body that still fits the 2-byte frame length.
pub const MAX_FRAME_BODY: usize = u16::MAX as usize - IMAGE_HEADER_LEN;

const PNG_MAGIC: [u8; 4] = [0x89, 0x50, 0x4E, 0x47];
const GIF_MAGIC: [u8; 4] = *b"GIF8";

const PNG_COMMAND: u8 = 0x02;
const GIF_COMMAND: u8 = 0x03;
const PNG_TAIL: [u8; 2] = [0x00, 0x65];
const GIF_FIRST_TAIL: [u8; 2] = [0x02, 0x01];
const GIF_NEXT_TAIL: [u8; 2] = [0x02, 0x65];

/// Image container format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImageKind {
    Png,
    Gif,
}

impl ImageKind {
    /// Sniff the format from the file signature.
    pub fn detect(data: &[u8]) -> Option<Self> {
        if data.starts_with(&PNG_MAGIC) {
            Some(Self::Png)
        } else if data.starts_with(&GIF_MAGIC) {
            Some(Self::Gif)
        } else {
            None
        }
    }
}

/// Frame one image body.
fn image_frame(command: u8, option: u8, size: &[u8], crc: &[u8; 4], tail: [u8; 2], body: &[u8]) -> Result<Vec<u8>> {
    let len = length_field((IMAGE_HEADER_LEN + body.len()) as u64, 2)?;

    let mut frame = Vec::with_capacity(IMAGE_HEADER_LEN + body.len());
    frame.extend_from_slice(&len);
    frame.extend_from_slice(&[command, 0x00, option]);
    frame.extend_from_slice(size);
    frame.extend_from_slice(crc);
    frame.extend_from_slice(&tail);
    frame.extend_from_slice(body);
    Ok(frame)
}

fn check_not_empty(data: &[u8]) -> Result<()> {
    if data.is_empty() {
        return Err(PixelError::invalid("image size", 0, "at least 1 byte"));
    }
    Ok(())
}

/// Build the single-window upload for a PNG file.
pub fn encode_png(data: &[u8]) -> Result<SendPlan> {
    check_not_empty(data)?;
    if data.len() > MAX_FRAME_BODY {
        return Err(PixelError::invalid(
            "png size",
            data.len(),
            format!("1..={MAX_FRAME_BODY} bytes"),
        ));
    }

    let size = length_field(data.len() as u64, 4)?;
    let frame = image_frame(PNG_COMMAND, 0x00, &size, &crc32_le(data), PNG_TAIL, data)?;
    Ok(SendPlan::single_window("send_png", frame, true))
}

/// Build the windowed upload for a GIF file.
pub fn encode_gif(data: &[u8], window_size: usize) -> Result<SendPlan> {
    check_not_empty(data)?;
    if window_size == 0 || window_size > MAX_FRAME_BODY {
        return Err(PixelError::invalid(
            "window size",
            window_size,
            format!("1..={MAX_FRAME_BODY}"),
        ));
    }

    let size = length_field(data.len() as u64, 4)?;
    let crc = crc32_le(data);

    let windows = data
        .chunks(window_size)
        .enumerate()
        .map(|(index, chunk)| {
            let (option, tail) = if index == 0 {
                (0x00, GIF_FIRST_TAIL)
            } else {
                (0x02, GIF_NEXT_TAIL)
            };
            image_frame(GIF_COMMAND, option, &size, &crc, tail, chunk).map(|frame| Window::new(frame, true))
        })
        .collect::<Result<Vec<_>>>()?;

    tracing::debug!(
        "Encoded GIF: {} bytes in {} window(s) of up to {} bytes",
        data.len(),
        windows.len(),
        window_size
    );
    SendPlan::new("send_gif", windows, DEFAULT_CHUNK_SIZE, window_size, AckPolicy::default())
}

/// Build the upload for `data`, sniffing the format when `kind` is `None`.
pub fn encode_image(data: &[u8], kind: Option<ImageKind>, window_size: usize) -> Result<SendPlan> {
    let kind = match kind.or_else(|| ImageKind::detect(data)) {
        Some(kind) => kind,
        None => {
            return Err(PixelError::invalid(
                "image format",
                "unrecognised signature",
                "png or gif",
            ))
        }
    };
    match kind {
        ImageKind::Png => encode_png(data),
        ImageKind::Gif => encode_gif(data, window_size),
    }
}
