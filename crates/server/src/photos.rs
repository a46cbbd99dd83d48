//! Account and photo endpoints. Both need a session for the provider in the
//! path, otherwise the user is sent to that provider's login page.

use api_types::{
    ProviderKind,
    photo::PhotoList,
    user::{Account, SessionUser},
};
use axum::{
    Json,
    extract::{Path, State},
    response::{IntoResponse, Redirect, Response},
};
use axum_extra::extract::cookie::SignedCookieJar;
use directory::User;

use crate::{ServerError, auth::login_path, server::ServerState, session};

/// Stored record of the session user, looked up by name.
async fn stored_user(state: &ServerState, user: &SessionUser) -> Result<User, ServerError> {
    state
        .directory
        .find_by_name(&user.username)
        .await?
        .ok_or_else(|| ServerError::NotFound(format!("user {} not found", user.username)))
}

pub async fn account(
    State(state): State<ServerState>,
    Path(provider): Path<ProviderKind>,
    jar: SignedCookieJar,
) -> Result<Response, ServerError> {
    let Some(user) = session::user_for(&jar, provider) else {
        return Ok(Redirect::to(&login_path(provider)).into_response());
    };

    let stored = stored_user(&state, &user).await?;
    Ok(Json(Account {
        provider,
        name: stored.name,
        id: stored.id,
    })
    .into_response())
}

pub async fn list(
    State(state): State<ServerState>,
    Path(provider): Path<ProviderKind>,
    jar: SignedCookieJar,
) -> Result<Response, ServerError> {
    let Some(user) = session::user_for(&jar, provider) else {
        return Ok(Redirect::to(&login_path(provider)).into_response());
    };

    let client = state.providers.get(provider)?;
    let stored = stored_user(&state, &user).await?;
    let photos = client.photos(&stored.access_token).await?;

    Ok(Json(PhotoList {
        provider,
        user: user.username,
        photos,
    })
    .into_response())
}
