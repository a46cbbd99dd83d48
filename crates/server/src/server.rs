use axum::{Router, extract::FromRef, routing::get};
use axum_extra::extract::cookie::Key;
use directory::UserDirectory;
use providers::Providers;

use std::{future::Future, sync::Arc};

use crate::{auth, photos};

#[derive(Clone)]
pub struct ServerState {
    pub directory: Arc<UserDirectory>,
    pub providers: Arc<Providers>,
    key: Key,
}

impl ServerState {
    /// `key` signs the session and OAuth state cookies.
    pub fn new(directory: Arc<UserDirectory>, providers: Providers, key: Key) -> Self {
        Self {
            directory,
            providers: Arc::new(providers),
            key,
        }
    }
}

impl FromRef<ServerState> for Key {
    fn from_ref(state: &ServerState) -> Self {
        state.key.clone()
    }
}

pub fn router(state: ServerState) -> Router {
    Router::new()
        .route("/", get(auth::home))
        .route("/login/{provider}", get(auth::login_page))
        .route("/auth/{provider}", get(auth::authorize))
        .route("/auth/{provider}/callback", get(auth::callback))
        .route("/account/{provider}", get(photos::account))
        .route("/photos/{provider}", get(photos::list))
        .route("/logout", get(auth::logout))
        .with_state(state)
}

/// Serves until `shutdown` resolves, then lets in-flight requests finish.
pub async fn run_with_listener<F>(
    state: ServerState,
    listener: tokio::net::TcpListener,
    shutdown: F,
) -> Result<(), std::io::Error>
where
    F: Future<Output = ()> + Send + 'static,
{
    let addr = listener.local_addr()?;
    tracing::info!("Server listening on {}", addr);

    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown)
        .await
}
