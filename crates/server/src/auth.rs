//! Login, OAuth handshake and logout endpoints

use api_types::{
    ProviderKind,
    user::{Home, LoginPage, SessionUser},
};
use axum::{
    Json,
    extract::{Path, Query, State},
    response::Redirect,
};
use axum_extra::extract::cookie::SignedCookieJar;
use directory::Identity;
use serde::Deserialize;

use crate::{ServerError, server::ServerState, session};

/// Query string the provider redirects back with.
#[derive(Debug, Deserialize)]
pub struct Callback {
    pub code: Option<String>,
    pub state: Option<String>,
    pub error: Option<String>,
}

pub(crate) fn login_path(provider: ProviderKind) -> String {
    format!("/login/{provider}")
}

/// Where a fresh login lands.
fn landing_path(provider: ProviderKind) -> String {
    match provider {
        ProviderKind::Instagram => format!("/photos/{provider}"),
        ProviderKind::Facebook => format!("/account/{provider}"),
    }
}

pub async fn home(State(state): State<ServerState>, jar: SignedCookieJar) -> Json<Home> {
    Json(Home {
        user: session::user(&jar),
        providers: state.providers.kinds(),
    })
}

pub async fn login_page(
    State(state): State<ServerState>,
    Path(provider): Path<ProviderKind>,
    jar: SignedCookieJar,
) -> Result<Json<LoginPage>, ServerError> {
    state.providers.get(provider)?;

    Ok(Json(LoginPage {
        provider,
        login_url: format!("/auth/{provider}"),
        user: session::user(&jar),
    }))
}

/// Redirects to the provider authorization page.
pub async fn authorize(
    State(state): State<ServerState>,
    Path(provider): Path<ProviderKind>,
    jar: SignedCookieJar,
) -> Result<(SignedCookieJar, Redirect), ServerError> {
    let authorization = state.providers.get(provider)?.authorization();

    Ok((
        session::remember_state(jar, authorization.csrf_state),
        Redirect::to(&authorization.url),
    ))
}

/// Completes the handshake and records the login.
///
/// A denied authorization, a missing code or a state that does not match the
/// one handed out by [`authorize`] sends the user back to the login page.
pub async fn callback(
    State(state): State<ServerState>,
    Path(provider): Path<ProviderKind>,
    jar: SignedCookieJar,
    Query(params): Query<Callback>,
) -> Result<(SignedCookieJar, Redirect), ServerError> {
    let client = state.providers.get(provider)?;
    let (jar, expected_state) = session::take_state(jar);
    let failure = Redirect::to(&login_path(provider));

    if let Some(error) = params.error {
        tracing::warn!("{provider} authorization failed: {error}");
        return Ok((jar, failure));
    }
    let Some(code) = params.code else {
        tracing::warn!("{provider} callback without code");
        return Ok((jar, failure));
    };
    if expected_state.is_none() || params.state != expected_state {
        tracing::warn!("{provider} callback with unexpected state");
        return Ok((jar, failure));
    }

    let access_token = client.exchange_code(code).await?;
    let profile = client.profile(&access_token).await?;
    let identity = Identity {
        name: profile.username,
        id: profile.id,
        access_token,
    };

    let login = state.directory.record_login(&identity).await?;
    tracing::info!(
        created = login.created,
        "{provider} login for {}",
        identity.name
    );

    let user = SessionUser {
        provider,
        username: identity.name,
    };
    Ok((session::login(jar, &user), Redirect::to(&landing_path(provider))))
}

pub async fn logout(jar: SignedCookieJar) -> (SignedCookieJar, Redirect) {
    (session::logout(jar), Redirect::to("/"))
}
