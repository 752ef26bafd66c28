//! Extraction of a [`SlashCommand`] from an HTTP request.

use http::{header, HeaderMap, Method, Request};

use gack_types::SlashCommand;

use crate::error::DecodeError;
use crate::form::FormData;
use crate::media::{parse_media_type, MediaType};

/// Largest form body that will be decoded (10 MiB).
pub const MAX_FORM_BODY: usize = 10 << 20;

const FORM_MEDIA_TYPE: &str = "application/x-www-form-urlencoded";

/// Decodes the form data of a request, from both its body and query string.
///
/// The query string is always decoded. The body is decoded only when
/// [`reads_form_body`] holds; other bodies are ignored. Body values come
/// before query values, so lookups prefer the body.
///
/// # Errors
///
/// Returns a `DecodeError` if either part is malformed, if the
/// `Content-Type` header of a `POST`, `PUT` or `PATCH` is malformed, or if
/// the body exceeds [`MAX_FORM_BODY`]. An oversized body is reported first,
/// then a `Content-Type` problem, then a body error, then a query error.
pub fn parse_form<B: AsRef<[u8]>>(request: &Request<B>) -> Result<FormData, DecodeError> {
    let (reads_body, media_error) = match body_media_type(request.method(), request.headers())? {
        Some(media) => (media.essence == FORM_MEDIA_TYPE, media.parameter_error),
        None => (false, None),
    };

    let body = if reads_body {
        let bytes = request.body().as_ref();
        if bytes.len() > MAX_FORM_BODY {
            return Err(DecodeError::BodyTooLarge);
        }
        FormData::parse(bytes)
    } else {
        Ok(FormData::new())
    };
    if let Some(e) = media_error {
        return Err(e);
    }

    let query = FormData::parse(request.uri().query().unwrap_or_default().as_bytes());

    let mut form = body?;
    form.merge(query?);
    Ok(form)
}

/// Parses a request into a [`SlashCommand`].
///
/// Missing fields are left empty; only malformed form data fails.
///
/// # Errors
///
/// Propagates any `DecodeError` from [`parse_form`].
pub fn parse_slash_command<B: AsRef<[u8]>>(
    request: &Request<B>,
) -> Result<SlashCommand, DecodeError> {
    let form = parse_form(request)?;
    Ok(SlashCommand::from_lookup(|key| form.get(key)))
}

/// Whether a request with this method and these headers has its body
/// decoded as form data.
///
/// Only `POST`, `PUT` and `PATCH` bodies with a form-urlencoded media type
/// are read. Transports use this to skip buffering bodies that
/// [`parse_form`] would ignore.
pub fn reads_form_body(method: &Method, headers: &HeaderMap) -> bool {
    matches!(
        body_media_type(method, headers),
        Ok(Some(media)) if media.essence == FORM_MEDIA_TYPE
    )
}

/// The media type of a body that may carry form data.
fn body_media_type(method: &Method, headers: &HeaderMap) -> Result<Option<MediaType>, DecodeError> {
    if method != Method::POST && method != Method::PUT && method != Method::PATCH {
        return Ok(None);
    }

    // An absent or empty Content-Type is treated as an opaque octet stream.
    let raw = match headers.get(header::CONTENT_TYPE) {
        Some(value) if !value.is_empty() => String::from_utf8_lossy(value.as_bytes()).into_owned(),
        _ => return Ok(None),
    };
    parse_media_type(&raw).map(Some)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn post(content_type: Option<&str>, body: &'static str) -> Request<&'static str> {
        let mut builder = Request::builder().method(Method::POST).uri("/");
        if let Some(ct) = content_type {
            builder = builder.header(header::CONTENT_TYPE, ct);
        }
        builder.body(body).expect("request")
    }

    #[test]
    fn parses_all_fields_from_body() {
        let body = "channel_id=C2147483705&channel_name=test&command=%2Fweather\
                    &team_domain=example&team_id=T0001&text=94070\
                    &token=gIkuvaNzQIHg97ATvDxqgjtO&user_id=U2147483697&user_name=Steve";
        let req = post(Some(FORM_MEDIA_TYPE), body);
        let cmd = parse_slash_command(&req).expect("parse");
        assert_eq!(cmd.channel_id, "C2147483705");
        assert_eq!(cmd.channel_name, "test");
        assert_eq!(cmd.command, "/weather");
        assert_eq!(cmd.team_domain, "example");
        assert_eq!(cmd.team_id, "T0001");
        assert_eq!(cmd.text, "94070");
        assert_eq!(cmd.token, "gIkuvaNzQIHg97ATvDxqgjtO");
        assert_eq!(cmd.user_id, "U2147483697");
        assert_eq!(cmd.user_name, "Steve");
    }

    #[test]
    fn content_type_parameters_are_ignored() {
        let req = post(Some("application/x-www-form-urlencoded; param=value"), "text=a");
        assert_eq!(parse_slash_command(&req).expect("parse").text, "a");
    }

    #[test]
    fn media_type_is_case_insensitive() {
        let req = post(Some("Application/X-WWW-Form-URLEncoded"), "text=a");
        assert_eq!(parse_slash_command(&req).expect("parse").text, "a");
    }

    #[test]
    fn missing_content_type_ignores_body() {
        let req = post(None, "text=a");
        let cmd = parse_slash_command(&req).expect("parse");
        assert_eq!(cmd, SlashCommand::default());
    }

    #[test]
    fn other_media_types_ignore_body() {
        let req = post(Some("application/json"), r#"{"text":"a"}"#);
        assert_eq!(parse_slash_command(&req).expect("parse"), SlashCommand::default());
    }

    #[test]
    fn empty_media_type_is_an_error() {
        let req = post(Some("; charset=utf-8"), "text=a");
        assert_eq!(parse_slash_command(&req), Err(DecodeError::MissingMediaType));
    }

    #[test]
    fn malformed_media_parameter_is_an_error() {
        let req = post(Some("text/plain; foo"), "text=a");
        assert_eq!(
            parse_slash_command(&req),
            Err(DecodeError::InvalidMediaParameter)
        );
    }

    #[test]
    fn malformed_media_type_is_an_error() {
        let req = post(Some("text /plain"), "text=a");
        assert_eq!(
            parse_slash_command(&req),
            Err(DecodeError::MediaTypeMissingSlash)
        );
    }

    #[test]
    fn non_ascii_media_type_is_an_error() {
        let req = Request::builder()
            .method(Method::POST)
            .uri("/")
            .header(
                header::CONTENT_TYPE,
                http::HeaderValue::from_bytes(b"\xffform/x").expect("header"),
            )
            .body("text=a")
            .expect("request");
        assert_eq!(parse_slash_command(&req), Err(DecodeError::MissingMediaType));
    }

    #[test]
    fn empty_content_type_ignores_body() {
        let req = post(Some(""), "text=a");
        assert_eq!(parse_slash_command(&req).expect("parse"), SlashCommand::default());
    }

    #[test]
    fn media_parameter_error_beats_body_error() {
        let req = post(Some("application/x-www-form-urlencoded; x"), "text=%zz");
        assert_eq!(parse_form(&req), Err(DecodeError::InvalidMediaParameter));
    }

    #[test]
    fn oversized_body_beats_media_parameter_error() {
        let req = Request::builder()
            .method(Method::POST)
            .uri("/")
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded; x")
            .body(vec![b'a'; MAX_FORM_BODY + 1])
            .expect("request");
        assert_eq!(parse_form(&req), Err(DecodeError::BodyTooLarge));
    }

    #[test]
    fn get_ignores_malformed_content_type() {
        let req = Request::builder()
            .uri("/?text=q")
            .header(header::CONTENT_TYPE, "text /plain")
            .body("")
            .expect("request");
        assert_eq!(parse_slash_command(&req).expect("parse").text, "q");
    }

    #[test]
    fn reads_form_body_only_for_form_posts() {
        let form = |method: Method, ct: Option<&str>| {
            let mut headers = HeaderMap::new();
            if let Some(ct) = ct {
                headers.insert(header::CONTENT_TYPE, ct.parse().expect("header"));
            }
            reads_form_body(&method, &headers)
        };
        assert!(form(Method::POST, Some(FORM_MEDIA_TYPE)));
        assert!(form(Method::PATCH, Some("application/x-www-form-urlencoded; charset=utf-8")));
        assert!(!form(Method::GET, Some(FORM_MEDIA_TYPE)));
        assert!(!form(Method::POST, Some("application/json")));
        assert!(!form(Method::POST, None));
        assert!(!form(Method::POST, Some("text /plain")));
    }

    #[test]
    fn get_reads_query_string() {
        let req = Request::builder()
            .uri("/?command=%2Fecho&text=hi+there&token=aaa")
            .body("")
            .expect("request");
        let cmd = parse_slash_command(&req).expect("parse");
        assert_eq!(cmd.command, "/echo");
        assert_eq!(cmd.text, "hi there");
        assert_eq!(cmd.token, "aaa");
    }

    #[test]
    fn get_ignores_body() {
        let req = Request::builder()
            .uri("/")
            .header(header::CONTENT_TYPE, FORM_MEDIA_TYPE)
            .body("text=ignored")
            .expect("request");
        assert_eq!(parse_slash_command(&req).expect("parse").text, "");
    }

    #[test]
    fn body_takes_precedence_over_query() {
        let req = Request::builder()
            .method(Method::POST)
            .uri("/?token=query&user_name=q")
            .header(header::CONTENT_TYPE, FORM_MEDIA_TYPE)
            .body("token=body")
            .expect("request");
        let cmd = parse_slash_command(&req).expect("parse");
        assert_eq!(cmd.token, "body");
        assert_eq!(cmd.user_name, "q");
    }

    #[test]
    fn malformed_body_fails() {
        let req = post(Some(FORM_MEDIA_TYPE), "text=%zz");
        assert_eq!(
            parse_slash_command(&req),
            Err(DecodeError::InvalidEscape("%zz".into()))
        );
    }

    #[test]
    fn malformed_query_fails() {
        let req = Request::builder()
            .uri("/?a=1;b=2")
            .body("")
            .expect("request");
        assert_eq!(parse_slash_command(&req), Err(DecodeError::InvalidSemicolon));
    }

    #[test]
    fn body_error_reported_before_query_error() {
        let req = Request::builder()
            .method(Method::POST)
            .uri("/?a=1;b=2")
            .header(header::CONTENT_TYPE, FORM_MEDIA_TYPE)
            .body("text=%zz")
            .expect("request");
        assert_eq!(
            parse_slash_command(&req),
            Err(DecodeError::InvalidEscape("%zz".into()))
        );
    }

    #[test]
    fn oversized_body_fails() {
        let body = vec![b'a'; MAX_FORM_BODY + 1];
        let req = Request::builder()
            .method(Method::POST)
            .uri("/")
            .header(header::CONTENT_TYPE, FORM_MEDIA_TYPE)
            .body(body)
            .expect("request");
        assert_eq!(parse_form(&req), Err(DecodeError::BodyTooLarge));
    }

    #[test]
    fn put_and_patch_read_body() {
        for method in [Method::PUT, Method::PATCH] {
            let req = Request::builder()
                .method(method)
                .uri("/")
                .header(header::CONTENT_TYPE, FORM_MEDIA_TYPE)
                .body("text=x")
                .expect("request");
            assert_eq!(parse_slash_command(&req).expect("parse").text, "x");
        }
    }
}
