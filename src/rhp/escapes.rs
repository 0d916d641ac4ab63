//! Double- and single-quoted string escape decoding, and the binary-payload
//! policy applied when the raw decoded bytes aren't valid UTF-8 (§4.2).

use crate::rhp::error::{RhpError, RhpResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryStrategy {
    Base64,
    Array,
    Replacement,
    Error,
}

/// Decoded string body plus the raw bytes seen, so the binary-payload policy
/// can inspect them after escape processing but before UTF-8 is assumed.
pub struct DecodedString {
    pub bytes: Vec<u8>,
}

/// Decode a single-quoted Ruby string body: only `\\` and `\'` are escapes,
/// everything else (including other backslashes) is preserved verbatim.
pub fn decode_single_quoted(body: &str) -> String {
    let mut out = String::with_capacity(body.len());
    let mut chars = body.chars().peekable();
    while let Some(ch) = chars.next() {
        if ch == '\\' {
            match chars.peek() {
                Some('\\') => {
                    out.push('\\');
                    chars.next();
                }
                Some('\'') => {
                    out.push('\'');
                    chars.next();
                }
                _ => out.push('\\'),
            }
        } else {
            out.push(ch);
        }
    }
    out
}

/// Decode a double-quoted Ruby string body, returning raw bytes: octal/hex
/// escapes and `\M-x` (meta, codepoint | 0x80) can produce values outside
/// valid UTF-8 scalar range, so this operates byte-wise rather than char-wise.
pub fn decode_double_quoted(body: &str) -> DecodedString {
    let chars: Vec<char> = body.chars().collect();
    let mut out: Vec<u8> = Vec::with_capacity(body.len());
    let mut i = 0;
    while i < chars.len() {
        let ch = chars[i];
        if ch != '\\' {
            push_char_utf8(&mut out, ch);
            i += 1;
            continue;
        }
        i += 1;
        if i >= chars.len() {
            out.push(b'\\');
            break;
        }
        let esc = chars[i];
        match esc {
            'n' => {
                out.push(b'\n');
                i += 1;
            }
            't' => {
                out.push(b'\t');
                i += 1;
            }
            'r' => {
                out.push(b'\r');
                i += 1;
            }
            '\\' => {
                out.push(b'\\');
                i += 1;
            }
            '"' => {
                out.push(b'"');
                i += 1;
            }
            '\'' => {
                out.push(b'\'');
                i += 1;
            }
            'a' => {
                out.push(0x07);
                i += 1;
            }
            'b' => {
                out.push(0x08);
                i += 1;
            }
            'e' => {
                out.push(0x1b);
                i += 1;
            }
            'f' => {
                out.push(0x0c);
                i += 1;
            }
            'v' => {
                out.push(0x0b);
                i += 1;
            }
            's' => {
                out.push(b' ');
                i += 1;
            }
            '0' => {
                out.push(0x00);
                i += 1;
            }
            'x' => {
                i += 1;
                let mut digits = String::new();
                for _ in 0..2 {
                    if i < chars.len() && chars[i].is_ascii_hexdigit() {
                        digits.push(chars[i]);
                        i += 1;
                    } else {
                        break;
                    }
                }
                if let Ok(byte) = u8::from_str_radix(&digits, 16) {
                    out.push(byte);
                }
            }
            'u' => {
                i += 1;
                if i < chars.len() && chars[i] == '{' {
                    i += 1;
                    let mut digits = String::new();
                    while i < chars.len() && chars[i] != '}' {
                        digits.push(chars[i]);
                        i += 1;
                    }
                    if i < chars.len() {
                        i += 1; // consume '}'
                    }
                    if let Ok(cp) = u32::from_str_radix(digits.trim(), 16) {
                        if let Some(c) = char::from_u32(cp) {
                            push_char_utf8(&mut out, c);
                        }
                    }
                } else {
                    let mut digits = String::new();
                    for _ in 0..4 {
                        if i < chars.len() && chars[i].is_ascii_hexdigit() {
                            digits.push(chars[i]);
                            i += 1;
                        } else {
                            break;
                        }
                    }
                    if let Ok(cp) = u32::from_str_radix(&digits, 16) {
                        if let Some(c) = char::from_u32(cp) {
                            push_char_utf8(&mut out, c);
                        }
                    }
                }
            }
            'C' => {
                // \C-x
                i += 1;
                if i < chars.len() && chars[i] == '-' {
                    i += 1;
                }
                if i < chars.len() {
                    out.push((chars[i] as u32 & 0x1F) as u8);
                    i += 1;
                }
            }
            'c' => {
                i += 1;
                if i < chars.len() {
                    out.push((chars[i] as u32 & 0x1F) as u8);
                    i += 1;
                }
            }
            'M' => {
                // \M-x
                i += 1;
                if i < chars.len() && chars[i] == '-' {
                    i += 1;
                }
                if i < chars.len() {
                    out.push(((chars[i] as u32) | 0x80) as u8);
                    i += 1;
                }
            }
            d if d.is_digit(8) => {
                let mut digits = String::new();
                for _ in 0..3 {
                    if i < chars.len() && chars[i].is_digit(8) {
                        digits.push(chars[i]);
                        i += 1;
                    } else {
                        break;
                    }
                }
                if let Ok(byte) = u32::from_str_radix(&digits, 8) {
                    out.push((byte & 0xFF) as u8);
                }
            }
            other => {
                // Unknown escape: emit the character following the backslash
                // literally.
                push_char_utf8(&mut out, other);
                i += 1;
            }
        }
    }
    DecodedString { bytes: out }
}

fn push_char_utf8(out: &mut Vec<u8>, ch: char) {
    let mut buf = [0u8; 4];
    out.extend_from_slice(ch.encode_utf8(&mut buf).as_bytes());
}

/// True when the decoded byte sequence is not itself valid UTF-8, treated as
/// an indicator that the source was not pure UTF-8 (§4.2). This must run on
/// the raw decoded bytes: a stray escape byte such as `\x80` is a lone
/// continuation byte (invalid on its own), while an ordinary multi-byte
/// character like "Ä" (`0xC3 0x84`, produced by `push_char_utf8`) is always
/// well-formed UTF-8 regardless of which 0x80..=0x9F bytes it happens to
/// contain — so a raw byte-range scan would misflag legitimate text once a
/// lossy re-encode has already masked genuine binary payloads.
pub fn has_flagged_bytes(bytes: &[u8]) -> bool {
    std::str::from_utf8(bytes).is_err()
}

pub enum BinaryPayload {
    Utf8(String),
    Base64(String),
    ByteArray(Vec<u8>),
}

/// Apply the binary-payload policy once a decoded string has been flagged as
/// containing non-UTF-8-looking bytes.
pub fn apply_binary_strategy(bytes: Vec<u8>, strategy: BinaryStrategy) -> RhpResult<BinaryPayload> {
    match strategy {
        BinaryStrategy::Base64 => {
            use base64::Engine;
            Ok(BinaryPayload::Base64(
                base64::engine::general_purpose::STANDARD.encode(&bytes),
            ))
        }
        BinaryStrategy::Array => Ok(BinaryPayload::ByteArray(bytes)),
        BinaryStrategy::Replacement => {
            let mut s = String::new();
            let mut rest = &bytes[..];
            loop {
                match std::str::from_utf8(rest) {
                    Ok(valid) => {
                        s.push_str(valid);
                        break;
                    }
                    Err(e) => {
                        let valid_len = e.valid_up_to();
                        s.push_str(std::str::from_utf8(&rest[..valid_len]).unwrap());
                        s.push('\u{FFFD}');
                        let skip = e.error_len().unwrap_or(1);
                        rest = &rest[valid_len + skip..];
                    }
                }
            }
            Ok(BinaryPayload::Utf8(s))
        }
        BinaryStrategy::Error => Err(RhpError::BinaryData { bytes }),
    }
}

/// Best-effort UTF-8 decode used when bytes are NOT flagged (the common
/// case): lossless for valid UTF-8 source text.
pub fn bytes_to_string_lossless(bytes: &[u8]) -> String {
    String::from_utf8_lossy(bytes).into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_quoted_escapes_are_minimal() {
        assert_eq!(decode_single_quoted(r"a\nb"), r"a\nb");
        assert_eq!(decode_single_quoted(r"a\'b"), "a'b");
        assert_eq!(decode_single_quoted(r"a\\b"), r"a\b");
    }

    #[test]
    fn double_quoted_common_escapes() {
        let d = decode_double_quoted(r"a\nb\tc");
        assert_eq!(bytes_to_string_lossless(&d.bytes), "a\nb\tc");
    }

    #[test]
    fn unicode_escape_forms() {
        let d = decode_double_quoted(r"é");
        assert_eq!(bytes_to_string_lossless(&d.bytes), "\u{e9}");
        let d2 = decode_double_quoted(r"\u{1F600}");
        assert_eq!(bytes_to_string_lossless(&d2.bytes), "\u{1F600}");
    }

    #[test]
    fn unknown_escape_is_literal() {
        let d = decode_double_quoted(r"\@");
        assert_eq!(bytes_to_string_lossless(&d.bytes), "@");
    }
}
