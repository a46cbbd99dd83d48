//! OAuth providers a user can log in with, and the photo APIs behind them.

use std::collections::HashMap;
use std::sync::Arc;

use api_types::{ProviderKind, photo::Photo};
use async_trait::async_trait;

pub use error::ProviderError;
pub use facebook::FacebookProvider;
pub use instagram::InstagramProvider;

mod error;
mod facebook;
mod graph;
mod instagram;
mod oauth;

/// Application credentials registered with a provider.
#[derive(Clone, Debug)]
pub struct Credentials {
    pub client_id: String,
    pub client_secret: String,
    /// Callback URL registered for this application.
    pub redirect_uri: String,
}

/// Provider endpoints. Defaults target the public APIs.
#[derive(Clone, Debug)]
pub struct Endpoints {
    pub authorize: String,
    pub token: String,
    pub graph: String,
}

impl Endpoints {
    pub fn instagram() -> Self {
        Self {
            authorize: "https://api.instagram.com/oauth/authorize".to_string(),
            token: "https://api.instagram.com/oauth/access_token".to_string(),
            graph: "https://graph.instagram.com".to_string(),
        }
    }

    pub fn facebook() -> Self {
        Self {
            authorize: "https://www.facebook.com/v19.0/dialog/oauth".to_string(),
            token: "https://graph.facebook.com/v19.0/oauth/access_token".to_string(),
            graph: "https://graph.facebook.com/v19.0".to_string(),
        }
    }
}

/// Where to send the user, and the state the callback must echo back.
#[derive(Clone, Debug)]
pub struct Authorization {
    pub url: String,
    pub csrf_state: String,
}

/// Identity returned by the provider once the handshake is complete.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Profile {
    pub id: String,
    pub username: String,
}

#[async_trait]
pub trait OAuthProvider: Send + Sync {
    fn kind(&self) -> ProviderKind;

    /// Generates the authorization URL and a fresh CSRF state.
    fn authorization(&self) -> Authorization;

    /// Exchanges an authorization code for an access token.
    async fn exchange_code(&self, code: String) -> Result<String, ProviderError>;

    /// Fetches the user's profile using an access token.
    async fn profile(&self, access_token: &str) -> Result<Profile, ProviderError>;

    /// Lists the user's photos.
    async fn photos(&self, access_token: &str) -> Result<Vec<Photo>, ProviderError>;
}

#[derive(Clone, Default)]
pub struct Providers {
    providers: HashMap<ProviderKind, Arc<dyn OAuthProvider>>,
}

impl Providers {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `provider`, replacing any provider of the same kind.
    pub fn add(&mut self, provider: Arc<dyn OAuthProvider>) {
        tracing::info!("registered {} provider", provider.kind());
        self.providers.insert(provider.kind(), provider);
    }

    pub fn get(&self, kind: ProviderKind) -> Result<Arc<dyn OAuthProvider>, ProviderError> {
        self.providers
            .get(&kind)
            .cloned()
            .ok_or(ProviderError::NotConfigured(kind))
    }

    /// Registered kinds, sorted by name.
    pub fn kinds(&self) -> Vec<ProviderKind> {
        let mut kinds: Vec<_> = self.providers.keys().copied().collect();
        kinds.sort_by_key(|kind| kind.as_str());
        kinds
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn credentials(name: &str) -> Credentials {
        Credentials {
            client_id: format!("{name}-id"),
            client_secret: format!("{name}-secret"),
            redirect_uri: format!("http://localhost:3000/auth/{name}/callback"),
        }
    }

    #[test]
    fn registry_returns_registered_providers() {
        let mut providers = Providers::new();
        providers.add(Arc::new(
            InstagramProvider::new(credentials("instagram")).unwrap(),
        ));

        assert_eq!(providers.kinds(), vec![ProviderKind::Instagram]);
        assert_eq!(
            providers.get(ProviderKind::Instagram).unwrap().kind(),
            ProviderKind::Instagram
        );
        assert!(matches!(
            providers.get(ProviderKind::Facebook),
            Err(ProviderError::NotConfigured(ProviderKind::Facebook))
        ));
    }

    #[test]
    fn kinds_are_sorted_by_name() {
        let mut providers = Providers::new();
        providers.add(Arc::new(
            InstagramProvider::new(credentials("instagram")).unwrap(),
        ));
        providers.add(Arc::new(
            FacebookProvider::new(credentials("facebook")).unwrap(),
        ));

        assert_eq!(
            providers.kinds(),
            vec![ProviderKind::Facebook, ProviderKind::Instagram]
        );
    }
}
