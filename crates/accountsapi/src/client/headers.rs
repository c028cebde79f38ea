//! Request header decoration.

use chrono::{DateTime, Utc};
use reqwest::header::{ACCEPT, CONTENT_LENGTH, CONTENT_TYPE, DATE, HeaderMap, HeaderValue};

use crate::error::Result;

/// Media type of every request and response body.
pub const API_CONTENT_TYPE: &str = "application/vnd.api+json";

/// Formats a timestamp as an RFC 1123 HTTP date, e.g. `Wed, 06 May 2020 09:28:13 GMT`.
pub(crate) fn http_date(now: DateTime<Utc>) -> String {
    now.format("%a, %d %b %Y %H:%M:%S GMT").to_string()
}

/// Adds the headers the service expects. Body headers only go on requests that
/// carry a body.
pub(crate) fn decorate(
    headers: &mut HeaderMap,
    body_len: usize,
    now: DateTime<Utc>,
) -> Result<()> {
    headers.insert(ACCEPT, HeaderValue::from_static(API_CONTENT_TYPE));
    headers.insert(DATE, HeaderValue::from_str(&http_date(now))?);

    if body_len > 0 {
        headers.insert(CONTENT_TYPE, HeaderValue::from_static(API_CONTENT_TYPE));
        headers.insert(CONTENT_LENGTH, HeaderValue::from(body_len));
    }

    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn fixed_time() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2020, 5, 6, 9, 28, 13).unwrap()
    }

    #[test]
    fn test_http_date() {
        assert_eq!(http_date(fixed_time()), "Wed, 06 May 2020 09:28:13 GMT");
    }

    #[test]
    fn test_decorate_without_body() {
        let mut headers = HeaderMap::new();
        decorate(&mut headers, 0, fixed_time()).unwrap();

        assert_eq!(headers[ACCEPT], API_CONTENT_TYPE);
        assert_eq!(headers[DATE], "Wed, 06 May 2020 09:28:13 GMT");
        assert!(headers.get(CONTENT_TYPE).is_none());
        assert!(headers.get(CONTENT_LENGTH).is_none());
    }

    #[test]
    fn test_decorate_with_body() {
        let body = r#"{"data":{"key":"value"}}"#;
        let mut headers = HeaderMap::new();
        decorate(&mut headers, body.len(), fixed_time()).unwrap();

        assert_eq!(headers[CONTENT_TYPE], API_CONTENT_TYPE);
        assert_eq!(headers[CONTENT_LENGTH], body.len().to_string().as_str());
    }
}
