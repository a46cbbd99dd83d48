use api_types::{ProviderKind, photo::Photo};
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;

use crate::graph::{GraphClient, Page};
use crate::oauth::OAuthApp;
use crate::{Authorization, Credentials, Endpoints, OAuthProvider, Profile, ProviderError};

const SCOPE: &str = "public_profile,user_photos";

#[derive(Debug, Clone)]
pub struct FacebookProvider {
    oauth: OAuthApp,
    graph: GraphClient,
}

#[derive(Debug, Deserialize)]
struct FacebookProfile {
    id: String,
    name: String,
}

#[derive(Debug, Deserialize)]
struct FacebookPhoto {
    #[serde(default)]
    images: Vec<Image>,
}

#[derive(Debug, Deserialize)]
struct Image {
    source: String,
    width: u32,
}

impl FacebookProvider {
    pub fn new(credentials: Credentials) -> Result<Self, ProviderError> {
        Self::with_endpoints(credentials, Endpoints::facebook())
    }

    pub fn with_endpoints(
        credentials: Credentials,
        endpoints: Endpoints,
    ) -> Result<Self, ProviderError> {
        let http = Client::new();
        Ok(Self {
            oauth: OAuthApp::new(credentials, &endpoints, http.clone())?,
            graph: GraphClient::new(http, endpoints.graph),
        })
    }
}

/// Facebook lists every rendition of a photo; the narrowest one is used.
fn photos_from_page(page: Page<FacebookPhoto>) -> Vec<Photo> {
    page.data
        .into_iter()
        .filter_map(|photo| photo.images.into_iter().min_by_key(|image| image.width))
        .map(|image| Photo {
            url: image.source,
            caption: None,
        })
        .collect()
}

#[async_trait]
impl OAuthProvider for FacebookProvider {
    fn kind(&self) -> ProviderKind {
        ProviderKind::Facebook
    }

    fn authorization(&self) -> Authorization {
        self.oauth.authorization(SCOPE)
    }

    async fn exchange_code(&self, code: String) -> Result<String, ProviderError> {
        self.oauth.exchange_code(code).await
    }

    /// The Graph API no longer exposes usernames, the display name stands in.
    async fn profile(&self, access_token: &str) -> Result<Profile, ProviderError> {
        let profile: FacebookProfile = self
            .graph
            .get("me", access_token, &[("fields", "id,name")])
            .await?;

        Ok(Profile {
            id: profile.id,
            username: profile.name,
        })
    }

    async fn photos(&self, access_token: &str) -> Result<Vec<Photo>, ProviderError> {
        let page: Page<FacebookPhoto> = self
            .graph
            .get(
                "me/photos",
                access_token,
                &[("type", "uploaded"), ("fields", "images")],
            )
            .await?;

        Ok(photos_from_page(page))
    }
}
