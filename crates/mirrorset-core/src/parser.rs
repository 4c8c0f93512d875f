//! Payload parser — decomposes one raw HTTP-like string into [`RequestFields`].
//!
//! Classification is ordered and first-match-wins:
//! method line → structured body → query string → fallback.
//! The result is heuristic; it is never an error, whatever the input.

use url::Url;

use crate::types::RequestFields;

/// Request-line prefixes recognized by [`classify`]. The trailing space is
/// part of the token.
const METHOD_PREFIXES: [&str; 4] = ["GET ", "POST ", "PUT ", "DELETE "];

/// The shape a raw payload was classified as.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PayloadShape {
    /// `METHOD url [body]`, access-log style.
    MethodLine,
    /// A bare JSON object or array.
    StructuredBody,
    /// A bare `k=v&k2=v2` string with no spaces.
    QueryString,
    /// Anything else; carried verbatim as the path.
    Fallback,
}

/// Decide which [`PayloadShape`] `payload` has.
pub fn classify(payload: &str) -> PayloadShape {
    if METHOD_PREFIXES.iter().any(|p| payload.starts_with(p)) {
        PayloadShape::MethodLine
    } else if payload.starts_with('{') || payload.starts_with('[') {
        PayloadShape::StructuredBody
    } else if payload.contains(['=', '&']) && !payload.contains(' ') {
        PayloadShape::QueryString
    } else {
        PayloadShape::Fallback
    }
}

/// Parse a raw payload into structured request fields.
///
/// Empty or absent input yields the all-default fields (`GET /`).
///
/// ```
/// use mirrorset_core::parser::parse_request;
///
/// let req = parse_request("GET /api/x?y=1 body");
/// assert_eq!(req.path, "/api/x");
/// assert_eq!(req.query, "y=1");
/// assert_eq!(req.body, "body");
/// ```
pub fn parse_request<'a>(payload: impl Into<Option<&'a str>>) -> RequestFields {
    let mut row = RequestFields::default();
    let payload = match payload.into() {
        Some(p) if !p.is_empty() => p,
        _ => return row,
    };

    match classify(payload) {
        PayloadShape::MethodLine => {
            let mut parts = payload.splitn(3, ' ');
            if let Some(method) = parts.next() {
                row.method = method.to_string();
            }
            if let Some(url_part) = parts.next() {
                match split_url(url_part) {
                    Some((path, query)) => {
                        row.path = path;
                        row.query = query;
                    }
                    None => row.path = url_part.to_string(),
                }
            }
            if let Some(body) = parts.next() {
                row.body = body.to_string();
            }
        }
        PayloadShape::StructuredBody => {
            row.method = "POST".to_string();
            row.body = payload.to_string();
        }
        PayloadShape::QueryString => row.query = payload.to_string(),
        PayloadShape::Fallback => row.path = payload.to_string(),
    }

    row
}

/// Split the URL token of a request line into `(path, query)`.
///
/// Origin-form targets (`/a/b?c=d`) are split textually so payload bytes in
/// the path (`../`, quotes, angle brackets) survive untouched. Absolute and
/// network-path references go through [`Url`]; `None` means that parse
/// failed and the caller should keep the token verbatim.
fn split_url(url_part: &str) -> Option<(String, String)> {
    let absolute = if url_part.starts_with("//") {
        Some(format!("http:{url_part}"))
    } else if url_part.contains("://") {
        Some(url_part.to_string())
    } else {
        None
    };

    if let Some(absolute) = absolute {
        let url = Url::parse(&absolute).ok()?;
        return Some((
            url.path().to_string(),
            url.query().unwrap_or_default().to_string(),
        ));
    }

    let without_fragment = url_part.split_once('#').map_or(url_part, |(head, _)| head);
    let (path, query) = without_fragment
        .split_once('?')
        .unwrap_or((without_fragment, ""));
    Some((path.to_string(), query.to_string()))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
