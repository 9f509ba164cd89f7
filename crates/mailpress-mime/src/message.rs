//! Message model and builder.

use crate::error::{Error, Result};
use std::fmt;
use std::fs;
use std::path::Path;

/// A display name paired with an addr-spec.
///
/// Values are emitted verbatim into the `From:` header; callers supply
/// already-validated addresses.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mailbox {
    /// Display name (optional).
    pub name: Option<String>,
    /// Email address (`local@domain`).
    pub address: String,
}

impl Mailbox {
    /// Creates a mailbox with just an address.
    #[must_use]
    pub fn new(address: impl Into<String>) -> Self {
        Self {
            name: None,
            address: address.into(),
        }
    }

    /// Creates a mailbox with a display name and address.
    #[must_use]
    pub fn with_name(name: impl Into<String>, address: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            address: address.into(),
        }
    }
}

/// Renders `"Name" <addr>` when a name is present, else the bare addr-spec.
impl fmt::Display for Mailbox {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.name {
            Some(name) => {
                f.write_str("\"")?;
                for ch in name.chars() {
                    if ch == '"' || ch == '\\' {
                        f.write_str("\\")?;
                    }
                    write!(f, "{ch}")?;
                }
                write!(f, "\" <{}>", self.address)
            }
            None => f.write_str(&self.address),
        }
    }
}

/// An email attachment.
///
/// `inline` selects the nested-message disposition: the part goes out as
/// `Content-Type: message/rfc822` with the raw bytes and no transfer
/// encoding. This is the "forwarded message" sense of inline, not the
/// Content-ID-referenced inline image sense. Non-inline attachments get an
/// extension-derived content type, a base64 payload and
/// `Content-Disposition: attachment`.
#[derive(Debug, Clone)]
pub struct Attachment {
    /// Name used in the `filename=` parameter and for type inference.
    pub filename: String,
    /// Raw payload, held in memory in full.
    pub data: Vec<u8>,
    /// Emit as a nested `message/rfc822` part instead of a base64 attachment.
    pub inline: bool,
}

/// A mail message under construction.
///
/// Built incrementally, then serialized any number of times. Serialization
/// never mutates the message; only the `Date:` header tracks the clock.
#[derive(Debug, Clone, Default)]
pub struct Message {
    /// Sender mailbox; the `From:` header is empty without one.
    pub from: Option<Mailbox>,
    /// Primary recipients.
    pub to: Vec<String>,
    /// Carbon-copy recipients.
    pub cc: Vec<String>,
    /// Blind-carbon-copy recipients; part of the envelope, never of a header.
    pub bcc: Vec<String>,
    /// Optional `Reply-To:` address.
    pub reply_to: Option<String>,
    /// Subject line; may contain non-ASCII text.
    pub subject: String,
    /// Message body.
    pub body: String,
    /// MIME type of the body part; the charset is always utf-8.
    pub body_content_type: String,
    attachments: Vec<Attachment>,
}

impl Message {
    fn with_content_type(
        subject: impl Into<String>,
        body: impl Into<String>,
        body_content_type: &str,
    ) -> Self {
        Self {
            subject: subject.into(),
            body: body.into(),
            body_content_type: body_content_type.to_string(),
            ..Self::default()
        }
    }

    /// Creates a plain-text message.
    #[must_use]
    pub fn plain(subject: impl Into<String>, body: impl Into<String>) -> Self {
        Self::with_content_type(subject, body, "text/plain")
    }

    /// Creates an HTML message.
    #[must_use]
    pub fn html(subject: impl Into<String>, body: impl Into<String>) -> Self {
        Self::with_content_type(subject, body, "text/html")
    }

    /// Sets the sender mailbox.
    #[must_use]
    pub fn sender(mut self, mailbox: Mailbox) -> Self {
        self.from = Some(mailbox);
        self
    }

    /// Adds a recipient.
    #[must_use]
    pub fn to(mut self, recipient: impl Into<String>) -> Self {
        self.to.push(recipient.into());
        self
    }

    /// Adds a CC recipient.
    #[must_use]
    pub fn cc(mut self, recipient: impl Into<String>) -> Self {
        self.cc.push(recipient.into());
        self
    }

    /// Adds a BCC recipient.
    #[must_use]
    pub fn bcc(mut self, recipient: impl Into<String>) -> Self {
        self.bcc.push(recipient.into());
        self
    }

    /// Sets the Reply-To address.
    #[must_use]
    pub fn reply_to(mut self, address: impl Into<String>) -> Self {
        self.reply_to = Some(address.into());
        self
    }

    /// Attaches the file at `path` under its basename.
    ///
    /// Re-attaching the same basename overwrites the earlier attachment.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read; the message is left
    /// unchanged.
    pub fn attach_file(&mut self, path: impl AsRef<Path>) -> Result<()> {
        self.attach(path.as_ref(), false)
    }

    /// Attaches the file at `path` as a nested `message/rfc822` part.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read; the message is left
    /// unchanged.
    pub fn inline_file(&mut self, path: impl AsRef<Path>) -> Result<()> {
        self.attach(path.as_ref(), true)
    }

    fn attach(&mut self, path: &Path, inline: bool) -> Result<()> {
        let data = fs::read(path).map_err(|source| Error::FileRead {
            path: path.to_path_buf(),
            source,
        })?;
        let filename = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();
        self.attach_buffer(filename, data, inline);
        Ok(())
    }

    /// Stores an in-memory attachment, overwriting any prior attachment with
    /// the same filename. The earlier position is kept on overwrite, so
    /// serialized part order stays deterministic.
    pub fn attach_buffer(&mut self, filename: impl Into<String>, data: Vec<u8>, inline: bool) {
        let attachment = Attachment {
            filename: filename.into(),
            data,
            inline,
        };
        if let Some(existing) = self
            .attachments
            .iter_mut()
            .find(|a| a.filename == attachment.filename)
        {
            *existing = attachment;
        } else {
            self.attachments.push(attachment);
        }
    }

    /// Returns the attachments in insertion order.
    #[must_use]
    pub fn attachments(&self) -> &[Attachment] {
        &self.attachments
    }

    /// Returns every envelope recipient: To, then Cc, then Bcc.
    ///
    /// This is the list for the transport's `RCPT` phase. Bcc recipients
    /// appear here and only here; the serialized headers never mention them.
    #[must_use]
    pub fn to_list(&self) -> Vec<String> {
        let mut recipients =
            Vec::with_capacity(self.to.len() + self.cc.len() + self.bcc.len());
        recipients.extend(self.to.iter().cloned());
        recipients.extend(self.cc.iter().cloned());
        recipients.extend(self.bcc.iter().cloned());
        recipients
    }
}
