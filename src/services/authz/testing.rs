//! Fixtures shared by the unit tests: RSA keypairs and an RS256 token minter.
use jsonwebtoken::{EncodingKey, Header};
use serde_json::json;

use super::signature::SIGNING_ALGORITHM;

pub(crate) const SIGNING_PRIVATE_PEM: &str =
    include_str!("../../../tests/fixtures/signing_private.pem");
pub(crate) const SIGNING_PUBLIC_PEM: &str =
    include_str!("../../../tests/fixtures/signing_public.pem");
pub(crate) const OTHER_PRIVATE_PEM: &str = include_str!("../../../tests/fixtures/other_private.pem");
pub(crate) const OTHER_PUBLIC_PEM: &str = include_str!("../../../tests/fixtures/other_public.pem");

pub(crate) fn sign(claims: &serde_json::Value) -> String {
    sign_with(SIGNING_PRIVATE_PEM, claims)
}

pub(crate) fn sign_with(private_key_pem: &str, claims: &serde_json::Value) -> String {
    let key = EncodingKey::from_rsa_pem(private_key_pem.as_bytes()).expect("fixture key");
    jsonwebtoken::encode(&Header::new(SIGNING_ALGORITHM), claims, &key).expect("sign")
}

/// Claim set as issued by the key manager, subscribed to `weatherapi` 1.0.
pub(crate) fn sample_claims(exp: i64) -> serde_json::Value {
    json!({
        "aud": "http://org.wso2.apimgt/gateway",
        "sub": "admin",
        "application": {
            "owner": "admin",
            "tier": "Unlimited",
            "name": "DefaultApplication",
            "id": 3,
            "uuid": null
        },
        "scope": "am_application_scope default",
        "iss": "https://localhost:9443/oauth2/token",
        "tierInfo": {},
        "keytype": "PRODUCTION",
        "subscribedAPIs": [{
            "name": "weatherapi",
            "context": "/weather/1.0",
            "version": "1.0",
            "publisher": "publisher-1",
            "subscriptionTier": "Gold",
            "subscriberTenantDomain": "carbon.super"
        }],
        "consumerKey": "Ig9xJq2yY7CPW6OzE1S0h2jhfXsa",
        "exp": exp,
        "iat": exp - 3600,
        "jti": "2b6b2ba4-6a2f-4c52-a6c0-0a1a8bcd6c3e"
    })
}
