//! Claim set carried in the token payload, and its decoder.
//!
//! Field names follow the issuer's JSON (`consumerKey`, `subscribedAPIs`, ...).
//! Missing or `null` fields fall back to their zero value; unknown fields are ignored so
//! that issuers can add claims without breaking the filter.

use base64::Engine as _;
use serde::{Deserialize, Deserializer};

use super::error::TokenError;

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ClaimSet {
    #[serde(deserialize_with = "null_as_default")]
    pub sub: String,
    #[serde(deserialize_with = "null_as_default")]
    pub aud: String,
    #[serde(deserialize_with = "null_as_default")]
    pub iss: String,
    #[serde(deserialize_with = "null_as_default")]
    pub keytype: String,
    // Space-delimited.
    #[serde(deserialize_with = "null_as_default")]
    pub scope: String,
    #[serde(deserialize_with = "null_as_default")]
    pub iat: i64,
    // Seconds since the Unix epoch.
    #[serde(deserialize_with = "null_as_default")]
    pub exp: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub jti: String,
    #[serde(rename = "consumerKey", deserialize_with = "null_as_default")]
    pub consumer_key: String,
    #[serde(deserialize_with = "null_as_default")]
    pub application: Application,
    #[serde(rename = "subscribedAPIs", deserialize_with = "null_as_default")]
    pub subscribed_apis: Vec<SubscriptionRecord>,
}

impl ClaimSet {
    pub fn scopes(&self) -> impl Iterator<Item = &str> {
        self.scope.split(' ').filter(|s| !s.is_empty())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Application {
    #[serde(deserialize_with = "null_as_default")]
    pub id: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(deserialize_with = "null_as_default")]
    pub tier: String,
    #[serde(deserialize_with = "null_as_default")]
    pub owner: String,
    #[serde(deserialize_with = "deserialize_app_identifier")]
    pub uuid: Option<AppIdentifier>,
}

/// Loosely typed application identifier.
///
/// Issuers send either a number or a string here; anything else is treated as absent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppIdentifier {
    Number(i64),
    Text(String),
}

fn deserialize_app_identifier<'de, D>(deserializer: D) -> Result<Option<AppIdentifier>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(match value {
        serde_json::Value::Number(n) => n.as_i64().map(AppIdentifier::Number),
        serde_json::Value::String(s) => Some(AppIdentifier::Text(s)),
        _ => None,
    })
}

// `null` decodes to the zero value, the same as a missing field.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// One API entitlement embedded in the token.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct SubscriptionRecord {
    #[serde(deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(deserialize_with = "null_as_default")]
    pub context: String,
    #[serde(deserialize_with = "null_as_default")]
    pub version: String,
    #[serde(deserialize_with = "null_as_default")]
    pub publisher: String,
    #[serde(rename = "subscriptionTier", deserialize_with = "null_as_default")]
    pub subscription_tier: String,
    #[serde(rename = "subscriberTenantDomain", deserialize_with = "null_as_default")]
    pub subscriber_tenant_domain: String,
}

/// Decode the (unpadded base64url) payload segment into a [`ClaimSet`].
pub fn decode_payload(payload: &str) -> Result<ClaimSet, TokenError> {
    let data = base64::engine::general_purpose::URL_SAFE_NO_PAD.decode(payload)?;
    let claims = serde_json::from_slice(&data)?;
    Ok(claims)
}
