//! Integration tests for pixelwire.
//!
//! These drive full sessions against a simulated panel that reassembles
//! frames from link writes and acknowledges them the way the firmware does.

use std::io;
use std::time::Duration;

use pixelwire::codec::crc32_le;
use pixelwire::command::{ClockSettings, TextOptions};
use pixelwire::control::{handle_request, CommandReply};
use pixelwire::{
    AckManager, ByteLink, Command, NotifyOutcome, PixelError, Session, SessionBuilder, StreamLink,
};

const GIF_COMMAND: u8 = 0x03;

/// A panel on the other side of the link.
///
/// Every frame starts with its own 2-byte little-endian length, so the
/// simulator can split the byte stream back into frames. Each complete
/// frame is acknowledged with status 3, except GIF windows before the last,
/// which get status 1.
#[derive(Default)]
struct SimPanel {
    acks: Option<AckManager>,
    chunks: Vec<Vec<u8>>,
    pending: Vec<u8>,
    frames: Vec<Vec<u8>>,
    gif_received: usize,
    /// Stop acknowledging after this many frames.
    ack_limit: Option<usize>,
    /// Report completion on this chunk, then never finish writing it.
    stall_at_chunk: Option<usize>,
    /// Both signals were up when the panel stalled.
    stalled_with_signals: bool,
}

impl SimPanel {
    fn take_frames(&mut self) -> Vec<Vec<u8>> {
        let mut done = Vec::new();
        while self.pending.len() >= 2 {
            let len = u16::from_le_bytes([self.pending[0], self.pending[1]]) as usize;
            if self.pending.len() < len {
                break;
            }
            done.push(self.pending.drain(..len).collect::<Vec<u8>>());
        }
        done
    }

    fn status_for(&mut self, frame: &[u8]) -> u8 {
        if frame[2] != GIF_COMMAND {
            return 3;
        }
        let total = u32::from_le_bytes([frame[5], frame[6], frame[7], frame[8]]) as usize;
        self.gif_received += frame.len() - 15;
        if self.gif_received >= total {
            self.gif_received = 0;
            3
        } else {
            1
        }
    }
}

impl ByteLink for SimPanel {
    async fn write(&mut self, chunk: &[u8]) -> io::Result<()> {
        self.chunks.push(chunk.to_vec());
        self.pending.extend_from_slice(chunk);

        if self.stall_at_chunk == Some(self.chunks.len()) {
            if let Some(acks) = &self.acks {
                acks.on_notification(&[0x05, 0x00, 0x00, 0x00, 0x03]);
                self.stalled_with_signals = acks.window_acked() && acks.transfer_complete();
            }
            return std::future::pending().await;
        }

        for frame in self.take_frames() {
            let status = self.status_for(&frame);
            self.frames.push(frame);
            let silent = self.ack_limit.is_some_and(|limit| self.frames.len() > limit);
            if let (Some(acks), false) = (&self.acks, silent) {
                acks.on_notification(&[0x05, 0x00, 0x00, 0x00, status]);
            }
        }
        Ok(())
    }
}

fn connect(builder: SessionBuilder, ack_limit: Option<usize>) -> Session<SimPanel> {
    let mut session = builder.build(SimPanel {
        ack_limit,
        ..SimPanel::default()
    });
    let acks = session.acks();
    session.link_mut().acks = Some(acks);
    session
}

fn fake_gif(len: usize) -> Vec<u8> {
    let mut data = b"GIF89a".to_vec();
    data.extend((0..len - 6).map(|i| (i * 7 % 256) as u8));
    data
}

/// Brightness 50 reaches the panel as a single 5-byte frame.
#[tokio::test(start_paused = true)]
async fn test_brightness_end_to_end() {
    let mut session = connect(SessionBuilder::new(), None);

    let report = session
        .execute(&Command::SetBrightness { level: 50 })
        .await
        .unwrap();

    assert_eq!(session.link().frames, vec![vec![0x05, 0x00, 0x04, 0x80, 0x32]]);
    assert_eq!(report.windows, 1);
    assert!(report.confirmed);
}

/// A GIF of two full windows plus 10 bytes becomes three acknowledged
/// windows that share the whole-file size and CRC.
#[tokio::test(start_paused = true)]
async fn test_gif_three_windows_end_to_end() {
    let data = fake_gif(12288 * 2 + 10);
    let mut session = connect(SessionBuilder::new(), None);

    let report = session
        .execute(&Command::SendImage {
            data: data.clone(),
            kind: None,
        })
        .await
        .unwrap();

    assert_eq!(report.windows, 3);
    assert!(report.confirmed);

    let panel = session.link();
    assert!(panel.chunks.iter().all(|c| c.len() <= 244));
    assert_eq!(panel.frames.len(), 3);

    let crc = crc32_le(&data);
    let total = (data.len() as u32).to_le_bytes();
    let mut body = Vec::new();
    for (index, frame) in panel.frames.iter().enumerate() {
        assert_eq!(&frame[5..9], &total);
        assert_eq!(&frame[9..13], &crc);
        let tail: [u8; 2] = if index == 0 { [0x02, 0x01] } else { [0x02, 0x65] };
        assert_eq!(&frame[13..15], &tail);
        body.extend_from_slice(&frame[15..]);
    }
    assert_eq!(body, data);
}

/// When a window goes unacknowledged the send fails after the default
/// timeout and the next window is never written.
#[tokio::test(start_paused = true)]
async fn test_missing_ack_stops_before_next_window() {
    let data = fake_gif(12288 * 2 + 10);
    let mut session = connect(SessionBuilder::new(), Some(1));

    let start = tokio::time::Instant::now();
    let err = session
        .execute(&Command::SendImage { data, kind: None })
        .await
        .unwrap_err();
    let elapsed = start.elapsed();

    assert!(matches!(err, PixelError::AckTimeout { window: 1, .. }));
    assert!(elapsed >= Duration::from_secs(8));
    assert!(elapsed < Duration::from_secs(9));
    assert_eq!(session.link().frames.len(), 2);
    assert!(session.link().pending.is_empty());
}

/// Text animations 3 and 4 are refused before anything is written.
#[tokio::test(start_paused = true)]
async fn test_text_animation_validation() {
    let mut session = connect(SessionBuilder::new(), None);

    for animation in [3, 4] {
        let err = session
            .execute(&Command::SendText {
                text: "hi".to_string(),
                options: TextOptions {
                    animation,
                    ..TextOptions::default()
                },
            })
            .await
            .unwrap_err();
        assert!(err.is_invalid_parameter());
    }
    assert!(session.link().chunks.is_empty());

    for animation in [0, 1, 2, 5, 6, 7] {
        session
            .execute(&Command::SendText {
                text: "hi".to_string(),
                options: TextOptions {
                    animation,
                    ..TextOptions::default()
                },
            })
            .await
            .unwrap();
    }
    assert_eq!(session.link().frames.len(), 6);
}

/// A text screen split over several chunks reassembles into one frame.
#[tokio::test(start_paused = true)]
async fn test_text_screen_chunked() {
    let mut session = connect(SessionBuilder::new().chunk_size(20), None);

    session
        .execute(&Command::SendText {
            text: "Hello".to_string(),
            options: TextOptions::default(),
        })
        .await
        .unwrap();

    let panel = session.link();
    assert_eq!(panel.frames.len(), 1);
    let frame = &panel.frames[0];
    assert_eq!(frame.len(), 0x1D + 5 * (6 + 2 * 16));
    assert!(panel.chunks.len() > 1);
    assert!(panel.chunks.iter().all(|c| c.len() <= 20));
}

/// Clock mode needs no window ack; the completion wait is best effort.
/// The weekday byte follows from the date: 2025-06-01 is a Sunday.
#[tokio::test(start_paused = true)]
async fn test_clock_mode_over_stream_link() {
    let mut session = SessionBuilder::new().build(StreamLink::new(Vec::new()));
    let clock = ClockSettings {
        style: 0,
        format_24: true,
        show_date: true,
        year: Some(25),
        month: Some(6),
        day: Some(1),
    };

    let start = tokio::time::Instant::now();
    let report = session
        .execute(&Command::SetClockMode(Some(clock)))
        .await
        .unwrap();

    assert!(!report.confirmed);
    assert!(start.elapsed() >= Duration::from_secs(8));
    assert_eq!(
        session.into_link().into_inner(),
        vec![0x0B, 0x00, 0x06, 0x01, 0, 1, 1, 25, 6, 1, 7]
    );
}

/// Notification frames drive the two signals independently.
#[test]
fn test_notification_signals() {
    let acks = AckManager::new();

    assert_eq!(acks.on_notification(&[5, 0, 0, 0, 1]), NotifyOutcome::WindowAck);
    assert!(acks.window_acked());
    assert!(!acks.transfer_complete());

    acks.reset();
    assert_eq!(
        acks.on_notification(&[5, 0, 0, 0, 3]),
        NotifyOutcome::TransferComplete
    );
    assert!(acks.window_acked());
    assert!(acks.transfer_complete());

    acks.reset();
    assert_eq!(
        acks.on_notification(&[5, 0, 0, 0, 9]),
        NotifyOutcome::UnknownStatus(9)
    );
    assert!(!acks.window_acked());
}

/// A send abandoned after the panel signalled mid-window leaves both
/// signals clear, and the session usable for the next command.
#[tokio::test(start_paused = true)]
async fn test_cancelled_send_resets_state() {
    let mut session = connect(SessionBuilder::new().chunk_size(20), None);
    session.link_mut().stall_at_chunk = Some(3);
    let acks = session.acks();

    let result = tokio::time::timeout(
        Duration::from_secs(1),
        session.execute(&Command::SendText {
            text: "Hello".to_string(),
            options: TextOptions::default(),
        }),
    )
    .await;
    assert!(result.is_err());
    assert!(session.link().stalled_with_signals);
    assert!(!acks.window_acked());
    assert!(!acks.transfer_complete());

    let panel = session.link_mut();
    panel.stall_at_chunk = None;
    panel.pending.clear();
    let report = session.execute(&Command::Clear).await.unwrap();
    assert!(report.confirmed);
    assert_eq!(session.link().frames.last().unwrap(), &vec![0x04, 0x00, 0x03, 0x80]);
}

/// JSON requests run through the session and come back as replies.
#[tokio::test(start_paused = true)]
async fn test_json_request_round_trip() {
    let mut session = connect(SessionBuilder::new(), None);

    let reply = handle_request(
        &mut session,
        r#"{"command": "set_time", "params": {"hour": 12, "minute": 30, "second": 0}}"#,
    )
    .await;
    assert_eq!(
        reply,
        CommandReply::Success {
            command: "set_time".to_string(),
            windows: 1,
            bytes: 8,
            confirmed: true,
        }
    );

    let reply = handle_request(
        &mut session,
        r#"{"command": "set_orientation", "params": {"orientation": 7}}"#,
    )
    .await;
    match reply {
        CommandReply::Error { message } => assert!(message.contains("orientation")),
        other => panic!("expected error reply, got {other:?}"),
    }
    assert_eq!(session.link().frames.len(), 1);

    // Without params the panel clock is set from the local time.
    let reply = handle_request(&mut session, r#"{"command": "set_time"}"#).await;
    assert!(reply.is_success());
    let frame = session.link().frames.last().unwrap();
    assert_eq!(&frame[..4], &[0x08, 0x00, 0x01, 0x80]);
    assert!(frame[4] <= 23 && frame[5] <= 59 && frame[6] <= 59);
}
