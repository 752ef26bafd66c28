//! `Content-Type` parsing.
//!
//! Follows RFC 2045 section 5.1: a `type/subtype` token pair followed by
//! `;`-separated `name=value` parameters, where a value is a token or a
//! quoted string.

use std::collections::HashSet;

use crate::error::DecodeError;

/// A parsed `Content-Type` header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct MediaType {
    /// Lowercased `type/subtype`.
    pub essence: String,
    /// Set when the media type is sound but a parameter is malformed.
    pub parameter_error: Option<DecodeError>,
}

/// Parses a `Content-Type` value.
///
/// A malformed parameter does not hide the media type; it is reported in
/// [`MediaType::parameter_error`] instead.
///
/// # Errors
///
/// Returns a `DecodeError` if the media type itself is malformed or a
/// parameter name repeats.
pub(crate) fn parse_media_type(value: &str) -> Result<MediaType, DecodeError> {
    let base = value.split(';').next().unwrap_or_default();
    let essence = base.to_lowercase().trim().to_string();
    check_essence(&essence)?;

    let mut seen = HashSet::new();
    let mut rest = &value[base.len()..];
    loop {
        rest = rest.trim_start();
        if rest.is_empty() {
            break;
        }
        let Some((name, after)) = consume_parameter(rest) else {
            // A lone trailing `;` is tolerated.
            if rest.trim() == ";" {
                break;
            }
            return Ok(MediaType {
                essence,
                parameter_error: Some(DecodeError::InvalidMediaParameter),
            });
        };
        if !seen.insert(name) {
            return Err(DecodeError::DuplicateMediaParameter);
        }
        rest = after;
    }

    Ok(MediaType {
        essence,
        parameter_error: None,
    })
}

fn check_essence(essence: &str) -> Result<(), DecodeError> {
    let (kind, rest) = consume_token(essence);
    if kind.is_empty() {
        return Err(DecodeError::MissingMediaType);
    }
    if rest.is_empty() {
        return Ok(());
    }
    let Some(rest) = rest.strip_prefix('/') else {
        return Err(DecodeError::MediaTypeMissingSlash);
    };
    let (subtype, rest) = consume_token(rest);
    if subtype.is_empty() {
        return Err(DecodeError::MediaTypeMissingSubtype);
    }
    if !rest.is_empty() {
        return Err(DecodeError::MediaTypeTrailingContent);
    }
    Ok(())
}

/// Consumes `; name=value`, returning the lowercased name and the rest.
fn consume_parameter(input: &str) -> Option<(String, &str)> {
    let rest = input.trim_start().strip_prefix(';')?.trim_start();
    let (name, rest) = consume_token(rest);
    if name.is_empty() {
        return None;
    }
    let rest = rest.trim_start().strip_prefix('=')?.trim_start();
    let (value_len, after) = consume_value(rest)?;
    if value_len == 0 && after.len() == rest.len() {
        return None;
    }
    Some((name.to_lowercase(), after))
}

/// Consumes a token or quoted string, returning its decoded length.
fn consume_value(input: &str) -> Option<(usize, &str)> {
    let Some(quoted) = input.strip_prefix('"') else {
        let (token, rest) = consume_token(input);
        return Some((token.len(), rest));
    };
    let mut len = 0;
    let mut chars = quoted.char_indices();
    while let Some((idx, c)) = chars.next() {
        match c {
            '"' => return Some((len, &quoted[idx + 1..])),
            '\\' if quoted[idx + 1..].starts_with(is_tspecial) => {
                chars.next();
                len += 1;
            }
            '\r' | '\n' => return None,
            _ => len += c.len_utf8(),
        }
    }
    None
}

fn consume_token(input: &str) -> (&str, &str) {
    let end = input
        .find(|c: char| !is_token_char(c))
        .unwrap_or(input.len());
    input.split_at(end)
}

fn is_token_char(c: char) -> bool {
    c > ' ' && c < '\u{7f}' && !is_tspecial(c)
}

fn is_tspecial(c: char) -> bool {
    "()<>@,;:\\\"/[]?=".contains(c)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn essence(value: &str) -> String {
        parse_media_type(value).expect("media type").essence
    }

    #[test]
    fn lowercases_and_trims() {
        assert_eq!(
            essence("  Application/X-WWW-Form-URLEncoded "),
            "application/x-www-form-urlencoded"
        );
    }

    #[test]
    fn accepts_parameters() {
        let mt = parse_media_type("text/plain; charset=utf-8; format=\"flowed \\\" x\"")
            .expect("media type");
        assert_eq!(mt.essence, "text/plain");
        assert_eq!(mt.parameter_error, None);
    }

    #[test]
    fn trailing_semicolon_tolerated() {
        let mt = parse_media_type("text/plain;").expect("media type");
        assert_eq!(mt.parameter_error, None);
    }

    #[test]
    fn bare_type_is_accepted() {
        assert_eq!(essence("text"), "text");
    }

    #[test]
    fn empty_type_rejected() {
        assert_eq!(
            parse_media_type("; charset=utf-8"),
            Err(DecodeError::MissingMediaType)
        );
        assert_eq!(parse_media_type("\u{FFFD}/x"), Err(DecodeError::MissingMediaType));
    }

    #[test]
    fn malformed_type_rejected() {
        assert_eq!(
            parse_media_type("text /plain"),
            Err(DecodeError::MediaTypeMissingSlash)
        );
        assert_eq!(
            parse_media_type("text/"),
            Err(DecodeError::MediaTypeMissingSubtype)
        );
        assert_eq!(
            parse_media_type("text/plain/x"),
            Err(DecodeError::MediaTypeTrailingContent)
        );
    }

    #[test]
    fn bad_parameter_keeps_media_type() {
        let mt = parse_media_type("text/plain; foo").expect("media type");
        assert_eq!(mt.essence, "text/plain");
        assert_eq!(mt.parameter_error, Some(DecodeError::InvalidMediaParameter));
    }

    #[test]
    fn unterminated_quote_is_bad_parameter() {
        let mt = parse_media_type("text/plain; a=\"open").expect("media type");
        assert_eq!(mt.parameter_error, Some(DecodeError::InvalidMediaParameter));
    }

    #[test]
    fn duplicate_parameter_rejected() {
        assert_eq!(
            parse_media_type("text/plain; a=1; A=2"),
            Err(DecodeError::DuplicateMediaParameter)
        );
    }
}
