//! Strict `application/x-www-form-urlencoded` decoding.
//!
//! Unlike lenient decoders, a malformed percent escape or a `;` separator is
//! reported as an error instead of being passed through, so callers can tell
//! the sender that its payload is broken.

use crate::error::DecodeError;

/// Decoded form data.
///
/// Keys may repeat. Pairs keep their insertion order and [`FormData::get`]
/// returns the first value for a key.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormData {
    pairs: Vec<(String, String)>,
}

impl FormData {
    /// Creates empty form data.
    pub fn new() -> Self {
        Self::default()
    }

    /// Decodes a form-encoded byte string.
    ///
    /// Segments are separated by `&`, empty segments are skipped and each
    /// segment splits into key and value at its first `=`. `+` decodes to a
    /// space and `%XX` to the byte `0xXX`. Bytes that do not form valid
    /// UTF-8 after decoding are replaced rather than rejected.
    ///
    /// # Errors
    ///
    /// Every segment is scanned before failing. A `;` anywhere yields
    /// `DecodeError::InvalidSemicolon`; otherwise the first `%` not followed
    /// by two hex digits yields `DecodeError::InvalidEscape`.
    pub fn parse(input: &[u8]) -> Result<Self, DecodeError> {
        let mut form = Self::new();
        let mut error = None;
        for segment in input.split(|b| *b == b'&') {
            if segment.contains(&b';') {
                error = Some(DecodeError::InvalidSemicolon);
                continue;
            }
            if segment.is_empty() {
                continue;
            }
            let (key, value) = match segment.iter().position(|b| *b == b'=') {
                Some(idx) => (&segment[..idx], &segment[idx + 1..]),
                None => (segment, &[][..]),
            };
            match (unescape(key), unescape(value)) {
                (Ok(key), Ok(value)) => form.pairs.push((key, value)),
                (Err(e), _) | (_, Err(e)) => {
                    error.get_or_insert(e);
                }
            }
        }
        match error {
            Some(e) => Err(e),
            None => Ok(form),
        }
    }

    /// Returns the first value stored under `key`.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Returns every value stored under `key`, in order.
    pub fn get_all<'a>(&'a self, key: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        self.pairs
            .iter()
            .filter(move |(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Appends a pair after the existing ones.
    pub fn append(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.pairs.push((key.into(), value.into()));
    }

    /// Appends all pairs of `other`. Existing values keep precedence.
    pub fn merge(&mut self, other: FormData) {
        self.pairs.extend(other.pairs);
    }

    /// Number of decoded pairs.
    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    /// Whether no pairs were decoded.
    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }
}

/// Decodes one form key or value.
fn unescape(raw: &[u8]) -> Result<String, DecodeError> {
    let mut out = Vec::with_capacity(raw.len());
    let mut i = 0;
    while i < raw.len() {
        match raw[i] {
            b'%' => {
                let hi = raw.get(i + 1).and_then(|b| hex_value(*b));
                let lo = raw.get(i + 2).and_then(|b| hex_value(*b));
                let (Some(hi), Some(lo)) = (hi, lo) else {
                    let end = (i + 3).min(raw.len());
                    let seq = String::from_utf8_lossy(&raw[i..end]).into_owned();
                    return Err(DecodeError::InvalidEscape(seq));
                };
                out.push(hi << 4 | lo);
                i += 3;
            }
            b'+' => {
                out.push(b' ');
                i += 1;
            }
            b => {
                out.push(b);
                i += 1;
            }
        }
    }
    Ok(match String::from_utf8(out) {
        Ok(s) => s,
        Err(e) => String::from_utf8_lossy(e.as_bytes()).into_owned(),
    })
}

fn hex_value(b: u8) -> Option<u8> {
    match b {
        b'0'..=b'9' => Some(b - b'0'),
        b'a'..=b'f' => Some(b - b'a' + 10),
        b'A'..=b'F' => Some(b - b'A' + 10),
        _ => None,
    }
}
