//! Local mail submission through the sendmail interface.
//!
//! Pipes the LF serialization into the MTA binary. qmail requires locally
//! injected messages to use bare LF line endings, and postfix strips CRLF
//! only on the SMTP path, so LF is the safe choice here.

use crate::error::{Error, Result};
use mailpress_mime::{LineEnding, Message};
use std::path::PathBuf;
use std::process::Stdio;
use tokio::io::AsyncWriteExt;
use tokio::process::Command;
use tracing::debug;

/// Default location of the local mail-submission binary.
pub const SENDMAIL_PATH: &str = "/usr/sbin/sendmail";

/// Delivery through a local sendmail-compatible binary.
#[derive(Debug, Clone)]
pub struct SendmailTransport {
    command: PathBuf,
}

impl Default for SendmailTransport {
    fn default() -> Self {
        Self {
            command: PathBuf::from(SENDMAIL_PATH),
        }
    }
}

impl SendmailTransport {
    /// Creates a transport using [`SENDMAIL_PATH`].
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a transport using a custom sendmail-compatible binary.
    #[must_use]
    pub fn with_command(command: impl Into<PathBuf>) -> Self {
        Self {
            command: command.into(),
        }
    }

    /// Sends `message` with envelope sender `from`.
    ///
    /// Invokes `<command> -i -f <from> -- <recipient>...` with every
    /// recipient from [`Message::to_list`], pipes the LF serialization to
    /// its stdin, closes the pipe and waits for it to exit.
    ///
    /// # Errors
    ///
    /// Returns an error if the binary cannot be spawned, the message cannot
    /// be written to it, or it exits with a non-zero status.
    pub async fn send(&self, from: &str, message: &Message) -> Result<()> {
        let recipients = message.to_list();

        debug!(
            command = %self.command.display(),
            from,
            recipients = recipients.len(),
            "spawning sendmail"
        );

        let mut child = Command::new(&self.command)
            .arg("-i")
            .arg("-f")
            .arg(from)
            .arg("--")
            .args(&recipients)
            .stdin(Stdio::piped())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .map_err(|source| Error::Spawn {
                path: self.command.clone(),
                source,
            })?;

        if let Some(mut stdin) = child.stdin.take() {
            stdin
                .write_all(&message.to_bytes(LineEnding::Lf))
                .await
                .map_err(Error::Stdin)?;
            // Dropping the handle closes the pipe; the child sees EOF.
        }

        let status = child.wait().await.map_err(Error::Wait)?;
        if !status.success() {
            return Err(Error::Exit(status));
        }

        Ok(())
    }
}
