//! Compact credential splitting (`header.payload.signature`).

use super::error::TokenError;

/// A credential split into its three segments.
///
/// Segment contents are not inspected here; decoding happens in later steps.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CompactToken<'a> {
    pub header: &'a str,
    pub payload: &'a str,
    pub signature: &'a str,
}

impl<'a> CompactToken<'a> {
    pub fn parse(credential: &'a str) -> Result<Self, TokenError> {
        let segments: Vec<&str> = credential.split('.').collect();

        match segments.as_slice() {
            &[header, payload, signature] => Ok(Self {
                header,
                payload,
                signature,
            }),
            _ => Err(TokenError::MalformedCredential {
                segments: segments.len(),
            }),
        }
    }

    /// Bytes covered by the signature: `header "." payload`.
    pub fn signed_content(&self) -> String {
        format!("{}.{}", self.header, self.payload)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_three_segments() {
        let token = CompactToken::parse("aaa.bbb.ccc").unwrap();
        assert_eq!(token.header, "aaa");
        assert_eq!(token.payload, "bbb");
        assert_eq!(token.signature, "ccc");
        assert_eq!(token.signed_content(), "aaa.bbb");
    }

    #[test]
    fn empty_segments_still_count() {
        let token = CompactToken::parse("..").unwrap();
        assert_eq!(token.signed_content(), ".");
    }

    #[test]
    fn rejects_wrong_segment_count() {
        let cases = [("", 1), ("abc", 1), ("a.b", 2), ("a.b.c.d", 4), ("a.b.c.d.e", 5)];
        for (input, expected) in cases {
            match CompactToken::parse(input) {
                Err(TokenError::MalformedCredential { segments }) => {
                    assert_eq!(segments, expected)
                }
                other => panic!("unexpected result for {input:?}: {other:?}"),
            }
        }
    }

    #[test]
    fn bearer_prefix_is_not_stripped() {
        let token = CompactToken::parse("Bearer aaa.bbb.ccc").unwrap();
        assert_eq!(token.header, "Bearer aaa");
    }
}
