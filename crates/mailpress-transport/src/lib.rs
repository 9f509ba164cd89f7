//! # mailpress-transport
//!
//! Delivery adapters for composed mail messages.
//!
//! The serializer in `mailpress-mime` produces a finished octet stream; this
//! crate hands it to a delivery channel:
//!
//! - [`smtp::submit`] passes the CRLF serialization, the envelope sender and
//!   the flattened recipient list to an external SMTP submission primitive
//!   behind the [`SmtpSubmission`] trait.
//! - [`SendmailTransport`] pipes the LF serialization into a local
//!   mail-submission binary, `/usr/sbin/sendmail` by default.
//!
//! Bcc concealment falls out of this split: blind recipients are part of the
//! envelope both adapters receive, but never of the serialized headers.
//!
//! ## Quick Start
//!
//! ```no_run
//! use mailpress_mime::{Mailbox, Message};
//! use mailpress_transport::SendmailTransport;
//!
//! # async fn run() -> mailpress_transport::Result<()> {
//! let message = Message::plain("Subject", "Body")
//!     .sender(Mailbox::new("me@example.com"))
//!     .to("you@example.com");
//!
//! SendmailTransport::new().send("me@example.com", &message).await?;
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![forbid(unsafe_code)]

mod error;
pub mod sendmail;
pub mod smtp;

pub use error::{Error, Result};
pub use sendmail::{SENDMAIL_PATH, SendmailTransport};
pub use smtp::{Credentials, SmtpSubmission};
