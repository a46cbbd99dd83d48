//! Authorization-code flow shared by every provider.

use oauth2::basic::BasicClient;
use oauth2::{AuthUrl, ClientId, ClientSecret, CsrfToken, RedirectUrl, Scope};
use reqwest::Client;
use serde::Deserialize;

use crate::{Authorization, Credentials, Endpoints, ProviderError, graph};

#[derive(Debug, Clone)]
pub(crate) struct OAuthApp {
    client_id: ClientId,
    client_secret: ClientSecret,
    auth_url: AuthUrl,
    redirect_url: RedirectUrl,
    token_url: String,
    http: Client,
}

#[derive(Deserialize)]
struct TokenBody {
    access_token: String,
}

impl OAuthApp {
    pub(crate) fn new(
        credentials: Credentials,
        endpoints: &Endpoints,
        http: Client,
    ) -> Result<Self, ProviderError> {
        Ok(Self {
            client_id: ClientId::new(credentials.client_id),
            client_secret: ClientSecret::new(credentials.client_secret),
            auth_url: AuthUrl::new(endpoints.authorize.clone())?,
            redirect_url: RedirectUrl::new(credentials.redirect_uri)?,
            token_url: endpoints.token.clone(),
            http,
        })
    }

    /// Builds the provider authorization URL. `scope` is sent verbatim.
    pub(crate) fn authorization(&self, scope: &str) -> Authorization {
        let (url, csrf_token) = BasicClient::new(self.client_id.clone())
            .set_client_secret(self.client_secret.clone())
            .set_auth_uri(self.auth_url.clone())
            .set_redirect_uri(self.redirect_url.clone())
            .authorize_url(CsrfToken::new_random)
            .add_scope(Scope::new(scope.to_string()))
            .url();

        Authorization {
            url: url.to_string(),
            csrf_state: csrf_token.secret().to_string(),
        }
    }

    /// Exchanges an authorization code for an access token.
    ///
    /// Instagram answers without `token_type`, so the body is read by hand
    /// instead of through the oauth2 token response.
    pub(crate) async fn exchange_code(&self, code: String) -> Result<String, ProviderError> {
        let params = [
            ("client_id", self.client_id.as_str()),
            ("client_secret", self.client_secret.secret().as_str()),
            ("grant_type", "authorization_code"),
            ("redirect_uri", self.redirect_url.as_str()),
            ("code", code.as_str()),
        ];

        let resp = self.http.post(&self.token_url).form(&params).send().await?;
        if !resp.status().is_success() {
            let err = graph::api_error(resp).await;
            tracing::error!("token exchange failed: {err}");
            return Err(ProviderError::TokenExchange(err.to_string()));
        }

        let body: TokenBody = resp
            .json()
            .await
            .map_err(|err| ProviderError::TokenExchange(err.without_url().to_string()))?;
        Ok(body.access_token)
    }
}
