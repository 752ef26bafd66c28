//! Form decoding errors.

use gack_types::ErrorKind;
use thiserror::Error;

/// Reasons a request could not be decoded as form data.
///
/// The `Display` text of each variant is what the caller sees as the
/// response body, so the messages stay short and literal.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    /// A `%` was not followed by two hex digits.
    #[error("invalid URL escape {0:?}")]
    InvalidEscape(String),
    /// A form segment contained a `;`.
    #[error("invalid semicolon separator in query")]
    InvalidSemicolon,
    /// The `Content-Type` header had no media type.
    #[error("mime: no media type")]
    MissingMediaType,
    /// The media type had no `/` after its first token.
    #[error("mime: expected slash after first token")]
    MediaTypeMissingSlash,
    /// The media type had nothing after its `/`.
    #[error("mime: expected token after slash")]
    MediaTypeMissingSubtype,
    /// Something followed the media subtype before the parameters.
    #[error("mime: unexpected content after media subtype")]
    MediaTypeTrailingContent,
    /// A `Content-Type` parameter was malformed.
    #[error("mime: invalid media parameter")]
    InvalidMediaParameter,
    /// A `Content-Type` parameter name appeared twice.
    #[error("mime: duplicate parameter name")]
    DuplicateMediaParameter,
    /// The form body exceeded [`MAX_FORM_BODY`](crate::MAX_FORM_BODY).
    #[error("http: POST too large")]
    BodyTooLarge,
    /// The body could not be read from the connection.
    #[error("{0}")]
    BodyRead(String),
}

impl DecodeError {
    /// Classifies the error for logging.
    pub fn kind(&self) -> ErrorKind {
        match self {
            DecodeError::BodyRead(_) => ErrorKind::Unavailable,
            _ => ErrorKind::InvalidInput,
        }
    }
}
