use axum::{Json, http::StatusCode, response::IntoResponse};
use directory::DirectoryError;
use providers::ProviderError;

use serde::Serialize;
pub use axum_extra::extract::cookie::Key;
pub use server::{ServerState, router, run_with_listener};

mod auth;
mod photos;
mod server;
mod session;

pub enum ServerError {
    Directory(DirectoryError),
    Provider(ProviderError),
    NotFound(String),
}

#[derive(Serialize)]
struct Error {
    error: String,
}

fn status_for_provider_error(err: &ProviderError) -> StatusCode {
    match err {
        ProviderError::NotConfigured(_) => StatusCode::NOT_FOUND,
        ProviderError::InvalidUrl(_) => StatusCode::INTERNAL_SERVER_ERROR,
        ProviderError::Http(_) | ProviderError::TokenExchange(_) | ProviderError::Api { .. } => {
            StatusCode::BAD_GATEWAY
        }
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> axum::response::Response {
        let (status, error) = match self {
            ServerError::Directory(err) => {
                tracing::error!("directory error: {err}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal server error".to_string(),
                )
            }
            ServerError::Provider(err) => {
                let status = status_for_provider_error(&err);
                if status != StatusCode::NOT_FOUND {
                    tracing::error!("provider error: {err}");
                }
                (status, err.to_string())
            }
            ServerError::NotFound(err) => (StatusCode::NOT_FOUND, err),
        };

        (status, Json(Error { error })).into_response()
    }
}

impl From<DirectoryError> for ServerError {
    fn from(value: DirectoryError) -> Self {
        Self::Directory(value)
    }
}

impl From<ProviderError> for ServerError {
    fn from(value: ProviderError) -> Self {
        Self::Provider(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use api_types::ProviderKind;

    #[test]
    fn directory_error_maps_to_500() {
        let err = DirectoryError::Database(sea_orm::DbErr::Custom("disk".to_string()));
        let res = ServerError::from(err).into_response();
        assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn unconfigured_provider_maps_to_404() {
        let res = ServerError::from(ProviderError::NotConfigured(ProviderKind::Facebook))
            .into_response();
        assert_eq!(res.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn upstream_failure_maps_to_502() {
        let res = ServerError::from(ProviderError::Api {
            status: StatusCode::UNAUTHORIZED,
            message: "token expired".to_string(),
        })
        .into_response();
        assert_eq!(res.status(), StatusCode::BAD_GATEWAY);

        let res = ServerError::from(ProviderError::TokenExchange("bad code".to_string()))
            .into_response();
        assert_eq!(res.status(), StatusCode::BAD_GATEWAY);
    }

    #[test]
    fn not_found_maps_to_404() {
        let res = ServerError::NotFound("x".to_string()).into_response();
        assert_eq!(res.status(), StatusCode::NOT_FOUND);
    }
}
