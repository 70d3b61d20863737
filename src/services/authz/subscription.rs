use super::claims::{ClaimSet, SubscriptionRecord};

/// The API a request is routed to.
///
/// Routing is decided outside the filter; callers pass whatever their
/// routing metadata says. Empty values only match empty subscription entries.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ApiTarget {
    pub name: String,
    pub version: String,
}

impl ApiTarget {
    pub fn new(name: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            version: version.into(),
        }
    }
}

/// First subscription whose name matches case-insensitively and whose version matches exactly.
pub fn find_subscription<'a>(
    claims: &'a ClaimSet,
    target: &ApiTarget,
) -> Option<&'a SubscriptionRecord> {
    claims.subscribed_apis.iter().find(|api| {
        api.name.to_lowercase() == target.name.to_lowercase() && api.version == target.version
    })
}
