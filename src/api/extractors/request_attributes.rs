/*
 * Responsibility
 * - Turn the forwarded request headers into the attribute map the
 *   decision service works on
 *
 * Notes
 * - Names are lower-case (HeaderName is normalized by `http`)
 * - For repeated headers the first value wins
 * - Values that are not visible ASCII/UTF-8 are skipped
 */
use std::collections::HashMap;
use std::convert::Infallible;

use axum::extract::FromRequestParts;
use axum::http::{HeaderMap, request::Parts};
use tracing::debug;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestAttributes(pub HashMap<String, String>);

impl RequestAttributes {
    pub fn from_headers(headers: &HeaderMap) -> Self {
        let mut attributes = HashMap::with_capacity(headers.keys_len());

        for (name, value) in headers {
            let Ok(value) = value.to_str() else {
                debug!(header = %name, "skipping non-text header value");
                continue;
            };
            attributes
                .entry(name.as_str().to_string())
                .or_insert_with(|| value.to_string());
        }

        Self(attributes)
    }

    /// Attribute value, empty when absent.
    pub fn get_or_empty(&self, name: &str) -> &str {
        self.0.get(name).map(String::as_str).unwrap_or_default()
    }

    pub fn get_non_empty(&self, name: &str) -> Option<&str> {
        self.0
            .get(name)
            .map(String::as_str)
            .filter(|v| !v.is_empty())
    }
}

impl<S> FromRequestParts<S> for RequestAttributes
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(Self::from_headers(&parts.headers))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn lower_cases_names_and_keeps_first_value() {
        let mut headers = HeaderMap::new();
        headers.insert("Authorization", HeaderValue::from_static("a.b.c"));
        headers.append("x-api-name", HeaderValue::from_static("first"));
        headers.append("x-api-name", HeaderValue::from_static("second"));

        let attrs = RequestAttributes::from_headers(&headers);
        assert_eq!(attrs.get_or_empty("authorization"), "a.b.c");
        assert_eq!(attrs.get_or_empty("x-api-name"), "first");
        assert_eq!(attrs.get_or_empty("api-version"), "");
    }

    #[test]
    fn skips_non_text_values() {
        let mut headers = HeaderMap::new();
        headers.insert("x-bin", HeaderValue::from_bytes(&[0xfa, 0xfb]).unwrap());

        let attrs = RequestAttributes::from_headers(&headers);
        assert!(attrs.0.is_empty());
        assert_eq!(attrs.get_non_empty("x-bin"), None);
    }
}
