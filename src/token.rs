//! Scrapes the Okta `stateToken` out of the login page.
//!
//! The login page bootstraps the Okta sign-in widget from an inline script:
//!
//! ```js
//! var oktaData = {"redirectUri": "...", "stateToken": "00Qx\x2D...", ...};
//! ```
//!
//! This is a best-effort pattern match against the raw markup, not a parse of
//! the script. Any page the pattern does not recognize is reported as
//! [`LoginError::StateTokenNotFound`]; there is no fallback.

use std::sync::LazyLock;

use regex::bytes::Regex;

use crate::error::{LoginError, LoginResult, UnescapeError};

/// `oktaData = { ... "stateToken": "<literal>" ... }` on a single line, with
/// optional whitespace around `=` and `:`. Group 1 is the quoted literal.
/// Matching is byte-oriented so non-UTF-8 pages still reach the unescaper.
static STATE_TOKEN_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?-u)oktaData\s*=\s*\{.*"stateToken"\s*:\s*("(?:[^"\\]|\\.)*").*\}"#)
        .expect("stateToken pattern is a valid regex")
});

/// Extract and unescape the `stateToken` value from the login page bytes.
pub fn extract_state_token(page: &[u8]) -> LoginResult<String> {
    let literal = STATE_TOKEN_RE
        .captures(page)
        .and_then(|cap| cap.get(1))
        .ok_or(LoginError::StateTokenNotFound)?;

    Ok(unquote(literal.as_bytes())?)
}

/// Decode a double-quoted string literal with C-style escapes.
///
/// Accepts the single-character escapes `\a \b \f \n \r \t \v \\ \" \' \/`,
/// `\xHH` and three-digit octal `\NNN` (both yield one raw byte), and
/// `\uXXXX` / `\UXXXXXXXX` (both yield a code point). The decoded bytes must
/// be valid UTF-8.
fn unquote(literal: &[u8]) -> Result<String, UnescapeError> {
    let inner = literal
        .strip_prefix(b"\"")
        .and_then(|s| s.strip_suffix(b"\""))
        .ok_or(UnescapeError::Unquoted)?;

    let mut out = Vec::with_capacity(inner.len());
    let mut i = 0;
    while i < inner.len() {
        let b = inner[i];
        if b == b'\n' {
            return Err(UnescapeError::RawNewline { offset: i });
        }
        if b != b'\\' {
            out.push(b);
            i += 1;
            continue;
        }

        let start = i;
        let invalid = UnescapeError::InvalidEscape { offset: start };
        let esc = *inner.get(start + 1).ok_or(invalid.clone())?;
        i = start + 2;

        match esc {
            b'a' => out.push(0x07),
            b'b' => out.push(0x08),
            b'f' => out.push(0x0c),
            b'n' => out.push(b'\n'),
            b'r' => out.push(b'\r'),
            b't' => out.push(b'\t'),
            b'v' => out.push(0x0b),
            b'\\' | b'"' | b'\'' | b'/' => out.push(esc),
            b'x' => {
                let value = hex_value(inner, i, 2).ok_or(invalid)?;
                out.push(value as u8);
                i += 2;
            }
            b'u' | b'U' => {
                let len = if esc == b'u' { 4 } else { 8 };
                let value = hex_value(inner, i, len).ok_or(invalid)?;
                let ch = char::from_u32(value)
                    .ok_or(UnescapeError::InvalidCodePoint { offset: start })?;
                let mut buf = [0u8; 4];
                out.extend_from_slice(ch.encode_utf8(&mut buf).as_bytes());
                i += len;
            }
            b'0'..=b'7' => {
                let digits = inner.get(start + 1..start + 4).ok_or(invalid.clone())?;
                if !digits.iter().all(|d| (b'0'..=b'7').contains(d)) {
                    return Err(invalid);
                }
                let value = digits
                    .iter()
                    .fold(0u32, |acc, d| acc * 8 + u32::from(d - b'0'));
                let byte = u8::try_from(value).map_err(|_| invalid)?;
                out.push(byte);
                i = start + 4;
            }
            _ => return Err(invalid),
        }
    }

    String::from_utf8(out).map_err(|_| UnescapeError::InvalidUtf8)
}

/// Parse exactly `len` hex digits starting at `at`.
fn hex_value(s: &[u8], at: usize, len: usize) -> Option<u32> {
    let digits = s.get(at..at + len)?;
    if !digits.iter().all(u8::is_ascii_hexdigit) {
        return None;
    }
    u32::from_str_radix(std::str::from_utf8(digits).ok()?, 16).ok()
}
