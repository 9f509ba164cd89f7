//! SMTP delivery adapter.
//!
//! The SMTP dialog itself (connection, authentication, the command/response
//! exchange) lives outside this crate; [`SmtpSubmission`] is its boundary
//! contract. The adapter contributes what the dialog cannot know: the
//! envelope sender, the flattened recipient list and the CRLF serialization
//! of the message.

use crate::error::{Error, Result};
use mailpress_mime::{LineEnding, Message};
use tracing::debug;

/// Authentication credentials for an SMTP submission server.
#[derive(Debug, Clone)]
pub struct Credentials {
    /// Account name, usually the sender's address.
    pub username: String,
    /// Account password or app token.
    pub password: String,
}

impl Credentials {
    /// Creates credentials from a username and password.
    #[must_use]
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }
}

/// External SMTP submission primitive.
///
/// Implementations own the entire SMTP dialog. They receive the finished
/// message bytes and the envelope, nothing else; the Bcc recipients are
/// present in `recipients` but absent from `data`.
pub trait SmtpSubmission {
    /// Error type surfaced by the dialog.
    type Error: std::error::Error;

    /// Submits `data` from `from` to `recipients` through `server`.
    fn send_mail(
        &self,
        server: &str,
        credentials: Option<&Credentials>,
        from: &str,
        recipients: &[String],
        data: &[u8],
    ) -> impl Future<Output = std::result::Result<(), Self::Error>> + Send;
}

/// Sends `message` through an SMTP submission primitive.
///
/// The envelope is the sender's addr-spec plus [`Message::to_list`] (To, Cc
/// and Bcc, in that order); the payload is the CRLF serialization.
///
/// # Errors
///
/// Returns [`Error::Smtp`] carrying the primitive's error message when the
/// dialog fails.
pub async fn submit<T: SmtpSubmission>(
    transport: &T,
    server: &str,
    credentials: Option<&Credentials>,
    message: &Message,
) -> Result<()> {
    let from = message
        .from
        .as_ref()
        .map(|mailbox| mailbox.address.clone())
        .unwrap_or_default();
    let recipients = message.to_list();
    let data = message.to_bytes(LineEnding::Crlf);

    debug!(
        server,
        recipients = recipients.len(),
        bytes = data.len(),
        "submitting message"
    );

    transport
        .send_mail(server, credentials, &from, &recipients, &data)
        .await
        .map_err(|e| Error::Smtp(e.to_string()))
}
