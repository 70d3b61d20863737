use jsonwebtoken::{Algorithm, DecodingKey};
use tracing::error;

use super::error::TokenError;

/// Signing scheme accepted by the filter.
///
/// Fixed on purpose: the `alg` field of the token header is never consulted.
pub const SIGNING_ALGORITHM: Algorithm = Algorithm::RS256;

/// Verify `signed_content` against the base64url `signature` with an RSA public key.
///
/// `public_key_pem` is the raw PEM as handed over by the key provider
/// (SPKI `PUBLIC KEY` or PKCS#1 `RSA PUBLIC KEY`).
pub fn verify_signature(
    public_key_pem: &[u8],
    signed_content: &str,
    signature: &str,
) -> Result<(), TokenError> {
    let key = DecodingKey::from_rsa_pem(public_key_pem).map_err(|e| {
        error!(error = %e, "error in parsing the public key");
        TokenError::InvalidKeyMaterial(e)
    })?;

    let verified =
        jsonwebtoken::crypto::verify(signature, signed_content.as_bytes(), &key, SIGNING_ALGORITHM);

    match verified {
        Ok(true) => Ok(()),
        Ok(false) => Err(TokenError::SignatureInvalid(None)),
        // Undecodable signature bytes end up here as well.
        Err(e) => Err(TokenError::SignatureInvalid(Some(e))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::authz::credential::CompactToken;
    use crate::services::authz::testing::{
        OTHER_PRIVATE_PEM, OTHER_PUBLIC_PEM, SIGNING_PUBLIC_PEM, sample_claims, sign, sign_with,
    };

    fn verify(public_pem: &str, token: &str) -> Result<(), TokenError> {
        let parts = CompactToken::parse(token)?;
        verify_signature(
            public_pem.as_bytes(),
            &parts.signed_content(),
            parts.signature,
        )
    }

    #[test]
    fn accepts_token_signed_with_matching_key() {
        let token = sign(&sample_claims(4_000_000_000));
        verify(SIGNING_PUBLIC_PEM, &token).unwrap();
    }

    #[test]
    fn rejects_token_signed_with_other_key() {
        let token = sign_with(OTHER_PRIVATE_PEM, &sample_claims(4_000_000_000));
        assert!(matches!(
            verify(SIGNING_PUBLIC_PEM, &token),
            Err(TokenError::SignatureInvalid(_))
        ));
        verify(OTHER_PUBLIC_PEM, &token).unwrap();
    }

    #[test]
    fn rejects_tampered_payload() {
        let token = sign(&sample_claims(4_000_000_000));
        let parts = CompactToken::parse(&token).unwrap();

        // Flip one character of the payload segment.
        let mut payload = parts.payload.as_bytes().to_vec();
        payload[10] = if payload[10] == b'A' { b'B' } else { b'A' };
        let payload = String::from_utf8(payload).unwrap();
        let tampered = format!("{}.{}.{}", parts.header, payload, parts.signature);

        assert!(matches!(
            verify(SIGNING_PUBLIC_PEM, &tampered),
            Err(TokenError::SignatureInvalid(_))
        ));
    }

    #[test]
    fn rejects_garbage_signature() {
        let token = sign(&sample_claims(4_000_000_000));
        let parts = CompactToken::parse(&token).unwrap();
        let forged = format!("{}.{}.not*base64", parts.header, parts.payload);

        assert!(matches!(
            verify(SIGNING_PUBLIC_PEM, &forged),
            Err(TokenError::SignatureInvalid(_))
        ));
    }

    #[test]
    fn rejects_invalid_key_material() {
        let token = sign(&sample_claims(4_000_000_000));
        let parts = CompactToken::parse(&token).unwrap();

        let result = verify_signature(
            b"-----BEGIN PUBLIC KEY-----\nnot a key\n-----END PUBLIC KEY-----\n",
            &parts.signed_content(),
            parts.signature,
        );
        assert!(matches!(result, Err(TokenError::InvalidKeyMaterial(_))));
    }
}
