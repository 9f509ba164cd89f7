//! # mailpress-mime
//!
//! MIME message composition and serialization for email.
//!
//! ## Features
//!
//! - **Message builder**: envelope fields, plain-text or HTML body, keyed
//!   attachments
//! - **Header encoding**: RFC 2047 encoded-words for non-ASCII subjects and
//!   filenames
//! - **Multipart framing**: `multipart/mixed` with base64 content transfer
//!   encoding for attachments
//! - **Line-separator discipline**: LF output for local submission, CRLF for
//!   the SMTP wire
//!
//! ## Quick Start
//!
//! ```
//! use mailpress_mime::{LineEnding, Mailbox, Message};
//!
//! let message = Message::plain("Greetings", "Hello from mailpress!")
//!     .sender(Mailbox::with_name("Postmaster", "postmaster@example.com"))
//!     .to("someone@example.com");
//!
//! let wire = message.to_bytes(LineEnding::Crlf);
//! assert!(wire.starts_with(b"From: \"Postmaster\" <postmaster@example.com>\r\n"));
//! ```
//!
//! ## Attachments
//!
//! ```
//! use mailpress_mime::{LineEnding, Message};
//!
//! let mut message = Message::plain("Report", "See attached.").to("team@example.com");
//! message.attach_buffer("report.csv", b"a,b\n1,2\n".to_vec(), false);
//!
//! let text = String::from_utf8(message.to_bytes(LineEnding::Lf)).unwrap();
//! assert!(text.contains("Content-Type: multipart/mixed"));
//! assert!(text.contains("Content-Transfer-Encoding: base64"));
//! ```
//!
//! An attachment marked inline is emitted as a nested `message/rfc822` part
//! with its raw bytes and no transfer encoding: the "forwarded message"
//! sense of inline, not a Content-ID-referenced body image.
//!
//! Serialization is a pure function of the message plus the wall clock (the
//! `Date:` header); it performs no I/O. Reading attachment files happens
//! once, at [`Message::attach_file`] time.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![forbid(unsafe_code)]

mod error;
mod message;
mod render;

pub mod encoding;

pub use error::{Error, Result};
pub use message::{Attachment, Mailbox, Message};
pub use render::{BOUNDARY, LineEnding};
