//! Control module - JSON commands over stdio.
//!
//! Outside tools drive a session by writing one JSON request per line and
//! reading one JSON reply per line.
//!
//! # Example
//!
//! ```
//! use pixelwire::control::{CommandReply, CommandRequest};
//! use pixelwire::Command;
//!
//! let request = CommandRequest::from_json(r#"{"command": "clear"}"#).unwrap();
//! assert_eq!(request.command, Command::Clear);
//!
//! let reply = CommandReply::Error { message: "no device".into() };
//! assert_eq!(reply.to_json().unwrap(), r#"{"status":"error","message":"no device"}"#);
//! ```

mod envelope;
mod stdio;

pub use envelope::{handle_request, CommandReply, CommandRequest};
pub use stdio::{serve_lines, serve_stdio, write_reply};
