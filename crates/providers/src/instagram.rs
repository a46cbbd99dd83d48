use api_types::{ProviderKind, photo::Photo};
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;

use crate::graph::{GraphClient, Page};
use crate::oauth::OAuthApp;
use crate::{Authorization, Credentials, Endpoints, OAuthProvider, Profile, ProviderError};

const SCOPE: &str = "user_profile,user_media";

#[derive(Debug, Clone)]
pub struct InstagramProvider {
    oauth: OAuthApp,
    graph: GraphClient,
}

#[derive(Debug, Deserialize)]
struct InstagramProfile {
    id: String,
    username: String,
}

#[derive(Debug, Deserialize)]
struct Media {
    media_url: Option<String>,
    caption: Option<String>,
}

impl InstagramProvider {
    pub fn new(credentials: Credentials) -> Result<Self, ProviderError> {
        Self::with_endpoints(credentials, Endpoints::instagram())
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

/// Media without a URL (e.g. removed for copyright) is skipped.
fn photos_from_media(page: Page<Media>) -> Vec<Photo> {
    page.data
        .into_iter()
        .filter_map(|item| {
            item.media_url.map(|url| Photo {
                url,
                caption: item.caption,
            })
        })
        .collect()
}

#[async_trait]
impl OAuthProvider for InstagramProvider {
    fn kind(&self) -> ProviderKind {
        ProviderKind::Instagram
    }

    fn authorization(&self) -> Authorization {
        self.oauth.authorization(SCOPE)
    }

    async fn exchange_code(&self, code: String) -> Result<String, ProviderError> {
        self.oauth.exchange_code(code).await
    }

    async fn profile(&self, access_token: &str) -> Result<Profile, ProviderError> {
        let profile: InstagramProfile = self
            .graph
            .get("me", access_token, &[("fields", "id,username")])
            .await?;

        Ok(Profile {
            id: profile.id,
            username: profile.username,
        })
    }

    async fn photos(&self, access_token: &str) -> Result<Vec<Photo>, ProviderError> {
        let page: Page<Media> = self
            .graph
            .get(
                "me/media",
                access_token,
                &[("fields", "id,caption,media_url")],
            )
            .await?;

        Ok(photos_from_media(page))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn credentials() -> Credentials {
        Credentials {
            client_id: "ig-client".to_string(),
            client_secret: "ig-secret".to_string(),
            redirect_uri: "http://localhost:3000/auth/instagram/callback".to_string(),
        }
    }

    #[test]
    fn authorization_points_to_instagram() {
        let provider = InstagramProvider::new(credentials()).unwrap();

        let auth = provider.authorization();

        assert!(auth.url.starts_with("https://api.instagram.com/oauth/authorize?"));
        assert!(auth.url.contains("client_id=ig-client"));
        assert!(auth.url.contains("scope=user_profile%2Cuser_media"));
        assert_eq!(provider.kind(), ProviderKind::Instagram);
    }

    #[tokio::test]
    async fn unreachable_graph_error_hides_the_token() {
        let provider = InstagramProvider::with_endpoints(
            credentials(),
            Endpoints {
                graph: "http://127.0.0.1:9".to_string(),
                ..Endpoints::instagram()
            },
        )
        .unwrap();

        let err = provider.photos("SECRET-TOKEN-123").await.unwrap_err();

        assert!(matches!(err, ProviderError::Http(_)));
        assert!(!err.to_string().contains("SECRET-TOKEN-123"));
    }

    #[test]
    fn media_keeps_url_and_caption() {
        let page: Page<Media> = serde_json::from_str(
            r#"{
                "data": [
                    {"id": "1", "caption": "sunset", "media_url": "https://cdn.example.com/1.jpg"},
                    {"id": "2", "media_url": "https://cdn.example.com/2.jpg"},
                    {"id": "3", "caption": "gone"}
                ],
                "paging": {"cursors": {"before": "a", "after": "b"}}
            }"#,
        )
        .unwrap();

        let photos = photos_from_media(page);

        assert_eq!(
            photos,
            vec![
                Photo {
                    url: "https://cdn.example.com/1.jpg".to_string(),
                    caption: Some("sunset".to_string()),
                },
                Photo {
                    url: "https://cdn.example.com/2.jpg".to_string(),
                    caption: None,
                },
            ]
        );
    }
}
