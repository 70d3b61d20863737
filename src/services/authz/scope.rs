use super::claims::ClaimSet;

/// Whether the token grants `required` (exact match on one space-delimited scope).
///
/// No required scope means nothing to check.
pub fn scope_granted(claims: &ClaimSet, required: Option<&str>) -> bool {
    match required {
        Some(scope) if !scope.is_empty() => claims.scopes().any(|s| s == scope),
        _ => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn with_scope(scope: &str) -> ClaimSet {
        ClaimSet {
            scope: scope.into(),
            ..ClaimSet::default()
        }
    }

    #[test]
    fn no_required_scope_passes() {
        assert!(scope_granted(&with_scope(""), None));
        assert!(scope_granted(&with_scope(""), Some("")));
    }

    #[test]
    fn exact_scope_match() {
        let claims = with_scope("read:weather  write:weather");
        assert!(scope_granted(&claims, Some("write:weather")));
        assert!(!scope_granted(&claims, Some("write")));
        assert!(!scope_granted(&claims, Some("READ:weather")));
    }
}
