//! JSON request/reply envelope.
//!
//! Requests name a command and carry its parameters:
//!
//! ```json
//! {"command": "set_brightness", "params": {"level": 50}}
//! ```
//!
//! Replies report the outcome:
//!
//! ```json
//! {"status": "success", "command": "set_brightness", "windows": 1, "bytes": 5}
//! {"status": "error", "message": "invalid brightness: 101 (allowed: 0..=100)"}
//! ```

use serde::{Deserialize, Serialize};

use crate::command::Command;
use crate::error::{PixelError, Result};
use crate::session::Session;
use crate::transport::{ByteLink, SendReport};

/// A parsed request line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CommandRequest {
    pub command: Command,
}

impl CommandRequest {
    /// Parse one JSON request.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn into_command(self) -> Command {
        self.command
    }
}

impl From<Command> for CommandRequest {
    fn from(command: Command) -> Self {
        Self { command }
    }
}

/// Outcome of one request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum CommandReply {
    Success {
        command: String,
        windows: usize,
        bytes: usize,
        confirmed: bool,
    },
    Error {
        message: String,
    },
}

impl CommandReply {
    pub fn success(command: &str, report: &SendReport) -> Self {
        Self::Success {
            command: command.to_string(),
            windows: report.windows,
            bytes: report.bytes,
            confirmed: report.confirmed,
        }
    }

    pub fn error(err: &PixelError) -> Self {
        Self::Error {
            message: err.to_string(),
        }
    }

    #[inline]
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }

    /// Serialize as a single JSON line (no trailing newline).
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}

/// Parse `line`, run it on `session` and describe the outcome.
///
/// Never fails: parse and transfer errors become [`CommandReply::Error`].
pub async fn handle_request<L: ByteLink>(session: &mut Session<L>, line: &str) -> CommandReply {
    let request = match CommandRequest::from_json(line) {
        Ok(request) => request,
        Err(e) => {
            tracing::warn!("Rejected request: {}", e);
            return CommandReply::error(&e);
        }
    };

    let name = request.command.name();
    match session.execute(&request.command).await {
        Ok(report) => CommandReply::success(name, &report),
        Err(e) => {
            tracing::error!("Command '{}' failed: {}", name, e);
            CommandReply::error(&e)
        }
    }
}
