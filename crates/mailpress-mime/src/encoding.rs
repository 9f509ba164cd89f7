//! Header and payload encoding for outgoing messages.
//!
//! Covers Base64 content transfer encoding with RFC 2045 line wrapping and
//! RFC 2047 encoded-word generation for non-ASCII header text.

use base64::Engine;
use base64::engine::general_purpose::STANDARD;

/// Maximum length of a single RFC 2047 encoded-word, delimiters included.
const MAX_ENCODED_WORD_LEN: usize = 75;

/// Hard line width for base64 attachment payloads (RFC 2045).
const BASE64_LINE_LEN: usize = 76;

/// Column at which plain ASCII header values are folded.
const ASCII_FOLD_LEN: usize = 60;

/// Encodes data as Base64.
#[must_use]
pub fn encode_base64(data: &[u8]) -> String {
    STANDARD.encode(data)
}

/// Returns true when `raw` cannot travel in a header as-is.
///
/// Anything outside printable ASCII, HT excepted, forces encoded-word
/// treatment.
pub(crate) fn needs_encoding(raw: &str) -> bool {
    raw.bytes().any(|b| !(b' '..=b'~').contains(&b) && b != b'\t')
}

/// Splits `raw` into RFC 2047 B-encoded words of at most 75 characters.
///
/// Each word carries at most `(75 - charset - overhead) / 4 * 3` bytes of
/// raw input (45 for UTF-8), so `=?UTF-8?b?` plus base64 plus `?=` stays
/// within the limit. Splits land on character boundaries only.
pub(crate) fn b_encode_words(charset: &str, raw: &str) -> Vec<String> {
    let max_chunk = (MAX_ENCODED_WORD_LEN - charset.len() - 7) / 4 * 3;

    let mut words = Vec::new();
    let mut start = 0;
    let mut chunk_len = 0;
    for (i, ch) in raw.char_indices() {
        let ch_len = ch.len_utf8();
        if chunk_len + ch_len > max_chunk {
            words.push(encode_word(charset, &raw[start..i]));
            start = i;
            chunk_len = 0;
        }
        chunk_len += ch_len;
    }
    words.push(encode_word(charset, &raw[start..]));
    words
}

fn encode_word(charset: &str, text: &str) -> String {
    format!("=?{charset}?b?{}?=", STANDARD.encode(text))
}

/// Writes a header value, folding with `sep` plus a space where needed.
///
/// Non-ASCII values become a run of encoded-words, each continuation on its
/// own line (RFC 2047: CRLF SPACE between words). Plain ASCII values are
/// hard-wrapped every 60 characters instead.
pub(crate) fn write_header_value(raw: &str, sep: &str, out: &mut Vec<u8>) {
    if needs_encoding(raw) {
        for (i, word) in b_encode_words("UTF-8", raw).iter().enumerate() {
            if i > 0 {
                out.extend_from_slice(sep.as_bytes());
                out.push(b' ');
            }
            out.extend_from_slice(word.as_bytes());
        }
    } else {
        let mut rest = raw;
        while rest.len() > ASCII_FOLD_LEN {
            let (chunk, tail) = rest.split_at(ASCII_FOLD_LEN);
            out.extend_from_slice(chunk.as_bytes());
            out.extend_from_slice(sep.as_bytes());
            out.push(b' ');
            rest = tail;
        }
        out.extend_from_slice(rest.as_bytes());
    }
}

/// Writes the base64 encoding of `data`, hard-wrapped at 76 octets.
///
/// While more than 60 encoded octets remain, the next line plus `sep` goes
/// out; the final remainder is emitted without a trailing separator. The
/// `> 60` guard means no short final line appears unless the whole payload
/// is short.
pub(crate) fn write_base64_wrapped(data: &[u8], sep: &str, out: &mut Vec<u8>) {
    let encoded = STANDARD.encode(data);
    let mut rest = encoded.as_str();
    while rest.len() > 60 {
        let (line, tail) = rest.split_at(rest.len().min(BASE64_LINE_LEN));
        out.extend_from_slice(line.as_bytes());
        if !tail.is_empty() {
            out.extend_from_slice(sep.as_bytes());
        }
        rest = tail;
    }
    out.extend_from_slice(rest.as_bytes());
}
