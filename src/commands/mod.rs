pub mod auth;
pub mod config;
pub mod exercises;
pub mod history;
pub mod log;

use crate::config::Config;
use crate::error::IdentityError;
use crate::identity::IdentityProvider;
use crate::store::SanityClient;
use anyhow::Result;

/// Build the store client from config, honouring the test URL override.
pub fn store_client(config: &Config) -> SanityClient {
    let store = &config.store;
    let client = SanityClient::new(
        &store.project_id,
        &store.dataset,
        &store.api_version,
        store.use_cdn,
    )
    .with_token(config.store_token());

    match &store.api_url {
        Some(url) => client.with_base_url(url),
        None => client,
    }
}

pub fn require_user(identity: &dyn IdentityProvider) -> Result<String> {
    identity
        .current_user_id()?
        .ok_or_else(|| IdentityError::NotSignedIn.into())
}

/// Cut `s` to at most `max` characters, marking the cut with "..."
pub fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        return s.to_string();
    }
    let kept: String = s.chars().take(max.saturating_sub(3)).collect();
    format!("{}...", kept)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::identity::StaticIdentity;

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("Squat", 10), "Squat");
        assert_eq!(truncate("Romanian Deadlift", 10), "Romania...");
    }

    #[test]
    fn test_require_user() {
        assert_eq!(
            require_user(&StaticIdentity(Some("u1".to_string()))).unwrap(),
            "u1"
        );
        let err = require_user(&StaticIdentity(None)).unwrap_err();
        assert!(err.to_string().contains("not signed in"));
    }
}
