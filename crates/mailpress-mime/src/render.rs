//! Wire-format serialization: header emission and multipart framing.

use crate::encoding::{write_base64_wrapped, write_header_value};
use crate::message::Message;
use chrono::{DateTime, FixedOffset, Local};

/// Multipart boundary token.
///
/// A fixed token keeps output deterministic; no body content in normal use
/// matches 28 hex characters.
pub const BOUNDARY: &str = "f46d043c813270fc6b04c2d223da";

/// Fallback content type for attachments with unknown extensions.
const OCTET_STREAM: &str = "application/octet-stream";

/// Line separator for a serialized message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineEnding {
    /// `\n`, for local mail submission.
    Lf,
    /// `\r\n`, for the SMTP wire.
    Crlf,
}

impl LineEnding {
    /// Returns the separator as a string slice.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Lf => "\n",
            Self::Crlf => "\r\n",
        }
    }
}

impl Message {
    /// Serializes the message with the given line separator.
    ///
    /// The `Date:` header reflects the moment of serialization.
    /// Serialization is total: a missing sender or empty recipient lists
    /// produce hollow headers, never errors.
    #[must_use]
    pub fn to_bytes(&self, ending: LineEnding) -> Vec<u8> {
        self.render_at(ending, Local::now().fixed_offset())
    }

    pub(crate) fn render_at(&self, ending: LineEnding, date: DateTime<FixedOffset>) -> Vec<u8> {
        let sep = ending.as_str();
        let mut out = Vec::new();

        let from = self
            .from
            .as_ref()
            .map(ToString::to_string)
            .unwrap_or_default();
        push(&mut out, &["From: ", &from, sep]);

        // RFC 1123 with numeric zone, e.g. "Mon, 02 Jan 2006 15:04:05 -0700".
        let date = date.format("%a, %d %b %Y %H:%M:%S %z").to_string();
        push(&mut out, &["Date: ", &date, sep]);

        push(&mut out, &["To: ", &self.to.join(","), sep]);
        if !self.cc.is_empty() {
            push(&mut out, &["Cc: ", &self.cc.join(","), sep]);
        }

        push(&mut out, &["Subject: "]);
        write_header_value(&self.subject, sep, &mut out);
        push(&mut out, &[sep]);

        if let Some(reply_to) = self.reply_to.as_deref()
            && !reply_to.is_empty()
        {
            push(&mut out, &["Reply-To: ", reply_to, sep]);
        }

        push(&mut out, &["MIME-Version: 1.0", sep]);

        let multipart = !self.attachments().is_empty();
        if multipart {
            push(
                &mut out,
                &["Content-Type: multipart/mixed; boundary=\"", BOUNDARY, "\"", sep],
            );
            push(&mut out, &[sep, "--", BOUNDARY, sep]);
        }

        push(
            &mut out,
            &["Content-Type: ", &self.body_content_type, "; charset=utf-8", sep, sep],
        );
        push(&mut out, &[&self.body, sep]);

        if multipart {
            for attachment in self.attachments() {
                push(&mut out, &[sep, sep, "--", BOUNDARY, sep]);

                if attachment.inline {
                    push(&mut out, &["Content-Type: message/rfc822", sep]);
                    push(&mut out, &["Content-Disposition: inline; filename=\""]);
                    write_header_value(&attachment.filename, sep, &mut out);
                    push(&mut out, &["\"", sep, sep]);

                    out.extend_from_slice(&attachment.data);
                } else {
                    let content_type = content_type_for(&attachment.filename);
                    push(&mut out, &["Content-Type: ", &content_type, sep]);
                    push(&mut out, &["Content-Transfer-Encoding: base64", sep]);
                    // Disposition folds onto two lines, filename on the
                    // continuation.
                    push(&mut out, &["Content-Disposition: attachment;", sep, " filename=\""]);
                    write_header_value(&attachment.filename, sep, &mut out);
                    push(&mut out, &["\"", sep, sep]);

                    write_base64_wrapped(&attachment.data, sep, &mut out);
                }

                push(&mut out, &[sep, "--", BOUNDARY]);
            }
            push(&mut out, &["--"]);
        }

        out
    }
}

/// Infers an attachment content type from the filename extension.
///
/// Text types carry the `charset=utf-8` parameter the platform MIME
/// registries attach to them.
fn content_type_for(filename: &str) -> String {
    let inferred = mime_guess::from_path(filename)
        .first_raw()
        .unwrap_or(OCTET_STREAM);
    if inferred.starts_with("text/") {
        format!("{inferred}; charset=utf-8")
    } else {
        inferred.to_string()
    }
}

fn push(out: &mut Vec<u8>, pieces: &[&str]) {
    for piece in pieces {
        out.extend_from_slice(piece.as_bytes());
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::redundant_clone, clippy::manual_string_new)]
mod tests {
    use super::*;
    use crate::message::Mailbox;

    const LOREM: &[u8] = b"Lorem ipsum dolor sit amet, consetetur sadipscing elitr, \
                           sed diam nonumy eirmod tempor invidunt ut labore et dolore magna aliquyam";

    fn date() -> DateTime<FixedOffset> {
        DateTime::parse_from_rfc2822("Mon, 02 Jan 2006 15:04:05 -0700").unwrap()
    }

    fn render(message: &Message, ending: LineEnding) -> String {
        String::from_utf8(message.render_at(ending, date())).unwrap()
    }

    #[test]
    fn test_plain_message_single_part() {
        let message = Message::plain("Subject", "Body")
            .sender(Mailbox::with_name("From", "from@example.com"))
            .to("to@example.com");

        let expected = concat!(
            "From: \"From\" <from@example.com>\n",
            "Date: Mon, 02 Jan 2006 15:04:05 -0700\n",
            "To: to@example.com\n",
            "Subject: Subject\n",
            "MIME-Version: 1.0\n",
            "Content-Type: text/plain; charset=utf-8\n",
            "\n",
            "Body\n",
        );
        let output = render(&message, LineEnding::Lf);
        assert_eq!(output, expected);
        assert!(!output.contains("multipart/mixed"));
    }

    // Ported verbatim from the reference implementation's encoding test,
    // with the wall-clock date pinned.
    #[test]
    fn test_non_ascii_attachment_reference_output() {
        let mut message = Message::plain("Subject", "Body")
            .sender(Mailbox::with_name("From", "from@example.com"))
            .to("to@example.com");
        message.attach_buffer(
            format!("\u{e4}\u{f6}\u{fc}{}.txt", "1234567890".repeat(7)),
            LOREM.to_vec(),
            false,
        );

        let expected = concat!(
            "From: \"From\" <from@example.com>\n",
            "Date: Mon, 02 Jan 2006 15:04:05 -0700\n",
            "To: to@example.com\n",
            "Subject: Subject\n",
            "MIME-Version: 1.0\n",
            "Content-Type: multipart/mixed; boundary=\"f46d043c813270fc6b04c2d223da\"\n",
            "\n",
            "--f46d043c813270fc6b04c2d223da\n",
            "Content-Type: text/plain; charset=utf-8\n",
            "\n",
            "Body\n",
            "\n",
            "\n",
            "--f46d043c813270fc6b04c2d223da\n",
            "Content-Type: text/plain; charset=utf-8\n",
            "Content-Transfer-Encoding: base64\n",
            "Content-Disposition: attachment;\n",
            " filename=\"=?UTF-8?b?w6TDtsO8MTIzNDU2Nzg5MDEyMzQ1Njc4OTAxMjM0NTY3ODkwMTIzNDU2Nzg5?=\n",
            " =?UTF-8?b?MDEyMzQ1Njc4OTAxMjM0NTY3ODkwMTIzNDU2Nzg5MC50eHQ=?=\"\n",
            "\n",
            "TG9yZW0gaXBzdW0gZG9sb3Igc2l0IGFtZXQsIGNvbnNldGV0dXIgc2FkaXBzY2luZyBlbGl0ciwg\n",
            "c2VkIGRpYW0gbm9udW15IGVpcm1vZCB0ZW1wb3IgaW52aWR1bnQgdXQgbGFib3JlIGV0IGRvbG9y\n",
            "ZSBtYWduYSBhbGlxdXlhbQ==\n",
            "--f46d043c813270fc6b04c2d223da--",
        );
        assert_eq!(render(&message, LineEnding::Lf), expected);
    }

    #[test]
    fn test_bcc_in_envelope_not_in_headers() {
        let message = Message::plain("Subject", "Body")
            .to("a@x")
            .cc("b@x")
            .bcc("c@x");

        let output = render(&message, LineEnding::Lf);
        assert!(output.contains("To: a@x\n"));
        assert!(output.contains("Cc: b@x\n"));
        assert!(!output.contains("Bcc"));
        assert_eq!(message.to_list(), vec!["a@x", "b@x", "c@x"]);
    }

    #[test]
    fn test_inline_attachment_is_nested_message() {
        let mut message = Message::plain("Subject", "Body").to("to@example.com");
        message.attach_buffer("forwarded.eml", b"From: x\n\nhi".to_vec(), true);

        let output = render(&message, LineEnding::Lf);
        assert!(output.contains("Content-Type: message/rfc822\n"));
        assert!(output.contains("Content-Disposition: inline; filename=\"forwarded.eml\"\n"));
        assert!(!output.contains("Content-Transfer-Encoding"));
        // Raw payload, then the closing boundary.
        assert!(output.ends_with("From: x\n\nhi\n--f46d043c813270fc6b04c2d223da--"));
    }

    #[test]
    fn test_unknown_extension_falls_back_to_octet_stream() {
        let mut message = Message::plain("Subject", "Body").to("to@example.com");
        message.attach_buffer("blob.xyzzy", vec![0, 1, 2], false);

        let output = render(&message, LineEnding::Lf);
        assert!(output.contains("Content-Type: application/octet-stream\n"));
    }

    #[test]
    fn test_crlf_serialization_mirrors_lf() {
        let message = Message::plain("Subject", "Body")
            .sender(Mailbox::with_name("From", "from@example.com"))
            .to("to@example.com");

        let lf = render(&message, LineEnding::Lf);
        let crlf = render(&message, LineEnding::Crlf);
        assert_eq!(crlf, lf.replace('\n', "\r\n"));
    }

    #[test]
    fn test_crlf_output_has_no_lone_newlines() {
        let mut message = Message::plain("Subject", "Body")
            .sender(Mailbox::new("from@example.com"))
            .to("to@example.com")
            .reply_to("reply@example.com");
        message.attach_buffer("data.bin", LOREM.to_vec(), false);

        let output = message.render_at(LineEnding::Crlf, date());
        let mut previous = 0u8;
        for byte in output {
            if byte == b'\n' {
                assert_eq!(previous, b'\r');
            }
            previous = byte;
        }
    }

    #[test]
    fn test_header_order() {
        let message = Message::plain("Subject", "Body")
            .sender(Mailbox::new("from@example.com"))
            .to("to@example.com")
            .cc("cc@example.com")
            .reply_to("reply@example.com");

        let output = render(&message, LineEnding::Lf);
        let head = output.split("\n\n").next().unwrap();
        let positions: Vec<usize> = [
            "From: ",
            "Date: ",
            "To: ",
            "Cc: ",
            "Subject: ",
            "Reply-To: ",
            "MIME-Version: ",
            "Content-Type: ",
        ]
        .iter()
        .map(|header| head.find(header).unwrap())
        .collect();
        assert!(positions.windows(2).all(|pair| pair[0] < pair[1]));
    }

    #[test]
    fn test_multipart_closure() {
        let mut message = Message::plain("Subject", "Body").to("to@example.com");
        message.attach_buffer("a.txt", b"a".to_vec(), false);
        message.attach_buffer("b.txt", b"b".to_vec(), false);

        let output = render(&message, LineEnding::Lf);
        let opening = format!("--{BOUNDARY}\n");
        let closing = format!("--{BOUNDARY}--");
        assert_eq!(output.matches(&opening).count(), 3); // body + 2 attachments
        assert_eq!(output.matches(&closing).count(), 1);
        assert!(output.ends_with(&closing));
    }

    #[test]
    fn test_no_boundary_without_attachments() {
        let message = Message::plain("Subject", "Body").to("to@example.com");
        assert!(!render(&message, LineEnding::Lf).contains(BOUNDARY));
    }

    #[test]
    fn test_long_ascii_subject_wraps_at_sixty() {
        let subject = "x".repeat(130);
        let message = Message::plain(subject, "Body").to("to@example.com");

        let output = render(&message, LineEnding::Lf);
        let wrapped = format!(
            "Subject: {}\n {}\n {}\n",
            "x".repeat(60),
            "x".repeat(60),
            "x".repeat(10)
        );
        assert!(output.contains(&wrapped));
    }

    #[test]
    fn test_empty_fields_serialize_without_error() {
        let message = Message::default();
        let output = render(&message, LineEnding::Lf);
        assert!(output.starts_with("From: \n"));
        assert!(output.contains("To: \n"));
        assert!(output.contains("Subject: \n"));
    }

    #[test]
    fn test_reply_to_only_when_non_empty() {
        let message = Message::plain("Subject", "Body").reply_to("");
        assert!(!render(&message, LineEnding::Lf).contains("Reply-To"));

        let message = Message::plain("Subject", "Body").reply_to("r@example.com");
        assert!(render(&message, LineEnding::Lf).contains("Reply-To: r@example.com\n"));
    }
}
