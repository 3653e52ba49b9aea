//! Line-oriented stdio for the JSON envelope.
//!
//! - **stdin**: one request per line
//! - **stdout**: one reply per line
//! - **stderr**: logs only
//!
//! Replies end in a bare `\n` on every platform.

use std::io::Write;

use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader};

use super::envelope::{handle_request, CommandReply};
use crate::error::Result;
use crate::session::Session;
use crate::transport::ByteLink;

/// Write `reply` to `out` as one JSON line, in a single `write_all`, and
/// flush.
pub fn write_reply<W: Write + ?Sized>(out: &mut W, reply: &CommandReply) -> Result<()> {
    let mut line = serde_json::to_vec(reply)?;
    line.push(b'\n');
    out.write_all(&line)?;
    out.flush()?;
    Ok(())
}

/// Execute each non-blank line of `input` in order, writing every reply to
/// `output`. Returns the number of requests handled once `input` ends.
pub async fn serve_lines<R, W, L>(
    session: &mut Session<L>,
    input: R,
    output: &mut W,
) -> Result<usize>
where
    R: AsyncBufRead + Unpin,
    W: Write + ?Sized,
    L: ByteLink,
{
    let mut lines = input.lines();
    let mut handled = 0;
    while let Some(line) = lines.next_line().await? {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let reply = handle_request(session, line).await;
        write_reply(output, &reply)?;
        handled += 1;
    }
    tracing::debug!("Input closed after {} request(s)", handled);
    Ok(handled)
}

/// [`serve_lines`] over the process's stdin and stdout.
pub async fn serve_stdio<L: ByteLink>(session: &mut Session<L>) -> Result<usize> {
    let stdin = BufReader::new(tokio::io::stdin());
    serve_lines(session, stdin, &mut std::io::stdout()).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::SessionBuilder;
    use crate::transport::StreamLink;
    use std::time::Duration;

    fn reply_lines(output: &[u8]) -> Vec<serde_json::Value> {
        std::str::from_utf8(output)
            .unwrap()
            .split_terminator('\n')
            .map(|line| serde_json::from_str(line).unwrap())
            .collect()
    }

    #[test]
    fn test_write_reply_is_one_json_line() {
        let mut out = Vec::new();
        let reply = CommandReply::Error {
            message: "bad request".to_string(),
        };
        write_reply(&mut out, &reply).unwrap();

        assert_eq!(out.last(), Some(&b'\n'));
        assert_eq!(out.iter().filter(|&&b| b == b'\n').count(), 1);
        assert!(!out.contains(&b'\r'));
        let lines = reply_lines(&out);
        assert_eq!(lines[0]["status"], "error");
        assert_eq!(lines[0]["message"], "bad request");
    }

    #[test]
    fn test_write_reply_surfaces_io_errors() {
        struct Closed;

        impl Write for Closed {
            fn write(&mut self, _buf: &[u8]) -> std::io::Result<usize> {
                Err(std::io::ErrorKind::BrokenPipe.into())
            }

            fn flush(&mut self) -> std::io::Result<()> {
                Ok(())
            }
        }

        let reply = CommandReply::Error {
            message: "x".to_string(),
        };
        let err = write_reply(&mut Closed, &reply).unwrap_err();
        assert!(matches!(err, crate::error::PixelError::Io(_)));
    }

    #[tokio::test(start_paused = true)]
    async fn test_serve_lines_replies_per_request() {
        let mut session = SessionBuilder::new()
            .ack_timeout(Duration::from_millis(10))
            .build(StreamLink::new(Vec::new()));

        let input: &[u8] = b"{\"command\": \"set_brightness\", \"params\": {\"level\": 200}}\n\n\
            not json\n";
        let mut output = Vec::new();
        let handled = serve_lines(&mut session, input, &mut output).await.unwrap();

        assert_eq!(handled, 2);
        let lines = reply_lines(&output);
        assert_eq!(lines.len(), 2);
        assert!(lines.iter().all(|line| line["status"] == "error"));
        assert!(lines[0]["message"].as_str().unwrap().contains("brightness"));
        assert!(session.link().get_ref().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_serve_lines_reports_success() {
        let mut session = SessionBuilder::new()
            .ack_timeout(Duration::from_millis(10))
            .build(StreamLink::new(Vec::new()));

        // Clock mode needs no window ack, so a silent link still succeeds.
        let input: &[u8] =
            b"{\"command\": \"set_clock_mode\", \"params\": {\"year\": 25, \"month\": 6, \"day\": 1}}\n";
        let mut output = Vec::new();
        serve_lines(&mut session, input, &mut output).await.unwrap();

        let lines = reply_lines(&output);
        assert_eq!(lines[0]["status"], "success");
        assert_eq!(lines[0]["command"], "set_clock_mode");
        assert_eq!(lines[0]["confirmed"], false);
        assert_eq!(
            session.link().get_ref(),
            &vec![0x0B, 0x00, 0x06, 0x01, 1, 1, 1, 25, 6, 1, 7]
        );
    }
}
