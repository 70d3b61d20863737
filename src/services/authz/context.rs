/*
 * Responsibility
 * - Caller-facing authorization context derived from a validated token
 * - Populated once per successful decision; request-scoped value
 *
 * Notes
 * - `None` means "unknown": the data could not be derived for this request.
 *   `UNKNOWN` is only the textual form used when writing a field out.
 */

use super::claims::{ClaimSet, SubscriptionRecord};

/// Wire marker for a field whose value could not be determined.
pub const UNKNOWN: &str = "__unknown__";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AuthorizationContext {
    pub client_type: Option<String>,
    pub application_consumer_key: Option<String>,
    pub application_name: Option<String>,
    pub application_id: Option<String>,
    pub application_owner: Option<String>,
    pub api_creator: Option<String>,
    pub api_creator_tenant_domain: Option<String>,
    pub api_tier: Option<String>,
    pub username: Option<String>,
    pub user_tenant_domain: Option<String>,
    // Not computed yet; always false.
    pub throttled_out: bool,
    // Not computed yet; always 0.
    pub service_time: i64,
    pub authorized: bool,
}

impl AuthorizationContext {
    /// Build the context for a token that already passed signature and expiry checks.
    ///
    /// - application fields are copied from the `application` claim (`id` as decimal)
    /// - `username` is the token subject
    /// - creator / tenant / tier come from the matched subscription, unknown without one
    /// - `api_creator_tenant_domain` and `user_tenant_domain` share the subscriber tenant domain
    pub fn from_claims(claims: &ClaimSet, subscription: Option<&SubscriptionRecord>) -> Self {
        let app = &claims.application;

        Self {
            client_type: Some(claims.keytype.clone()),
            application_consumer_key: Some(claims.consumer_key.clone()),
            application_name: Some(app.name.clone()),
            application_id: Some(app.id.to_string()),
            application_owner: Some(app.owner.clone()),
            api_creator: subscription.map(|s| s.publisher.clone()),
            api_creator_tenant_domain: subscription.map(|s| s.subscriber_tenant_domain.clone()),
            api_tier: subscription.map(|s| s.subscription_tier.clone()),
            username: Some(claims.sub.clone()),
            user_tenant_domain: subscription.map(|s| s.subscriber_tenant_domain.clone()),
            throttled_out: false,
            service_time: 0,
            authorized: true,
        }
    }

    /// Identity fields with their header names, unknown ones rendered as [`UNKNOWN`].
    pub fn fields(&self) -> [(&'static str, &str); 10] {
        fn render(value: &Option<String>) -> &str {
            value.as_deref().unwrap_or(UNKNOWN)
        }

        [
            ("x-authz-client-type", render(&self.client_type)),
            ("x-authz-consumer-key", render(&self.application_consumer_key)),
            ("x-authz-application-name", render(&self.application_name)),
            ("x-authz-application-id", render(&self.application_id)),
            ("x-authz-application-owner", render(&self.application_owner)),
            ("x-authz-api-creator", render(&self.api_creator)),
            (
                "x-authz-api-creator-tenant-domain",
                render(&self.api_creator_tenant_domain),
            ),
            ("x-authz-api-tier", render(&self.api_tier)),
            ("x-authz-username", render(&self.username)),
            ("x-authz-user-tenant-domain", render(&self.user_tenant_domain)),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::authz::claims::Application;

    fn claims() -> ClaimSet {
        ClaimSet {
            sub: "admin@carbon.super".into(),
            keytype: "PRODUCTION".into(),
            consumer_key: "ck-123".into(),
            application: Application {
                id: 42,
                name: "DefaultApplication".into(),
                tier: "Unlimited".into(),
                owner: "admin".into(),
                uuid: None,
            },
            ..ClaimSet::default()
        }
    }

    #[test]
    fn copies_identity_and_subscription_fields() {
        let subscription = SubscriptionRecord {
            name: "weatherapi".into(),
            version: "1.0".into(),
            publisher: "publisher-1".into(),
            subscription_tier: "Gold".into(),
            subscriber_tenant_domain: "tenant.com".into(),
            ..SubscriptionRecord::default()
        };

        let ctx = AuthorizationContext::from_claims(&claims(), Some(&subscription));

        assert!(ctx.authorized);
        assert!(!ctx.throttled_out);
        assert_eq!(ctx.service_time, 0);
        assert_eq!(ctx.client_type.as_deref(), Some("PRODUCTION"));
        assert_eq!(ctx.application_consumer_key.as_deref(), Some("ck-123"));
        assert_eq!(ctx.application_name.as_deref(), Some("DefaultApplication"));
        assert_eq!(ctx.application_id.as_deref(), Some("42"));
        assert_eq!(ctx.application_owner.as_deref(), Some("admin"));
        assert_eq!(ctx.username.as_deref(), Some("admin@carbon.super"));
        assert_eq!(ctx.api_creator.as_deref(), Some("publisher-1"));
        assert_eq!(ctx.api_tier.as_deref(), Some("Gold"));
        assert_eq!(ctx.api_creator_tenant_domain.as_deref(), Some("tenant.com"));
        assert_eq!(ctx.user_tenant_domain.as_deref(), Some("tenant.com"));
    }

    #[test]
    fn without_subscription_fields_are_unknown() {
        let ctx = AuthorizationContext::from_claims(&claims(), None);

        assert!(ctx.authorized);
        assert_eq!(ctx.api_creator, None);
        assert_eq!(ctx.api_creator_tenant_domain, None);
        assert_eq!(ctx.api_tier, None);
        assert_eq!(ctx.user_tenant_domain, None);

        let fields = ctx.fields();
        assert!(fields.contains(&("x-authz-api-tier", UNKNOWN)));
        assert!(fields.contains(&("x-authz-application-id", "42")));
    }

    #[test]
    fn default_context_is_not_authorized() {
        let ctx = AuthorizationContext::default();
        assert!(!ctx.authorized);
        assert!(ctx.fields().iter().all(|(_, v)| *v == UNKNOWN));
    }
}
