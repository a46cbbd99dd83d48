use std::sync::Arc;

use base64::{Engine as _, engine::general_purpose::STANDARD};
use directory::UserDirectory;
use migration::{Migrator, MigratorTrait};
use providers::{Credentials, FacebookProvider, InstagramProvider, ProviderError, Providers};
use server::{Key, ServerState};
use settings::Database;

mod settings;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let settings = settings::Settings::new()?;

    tracing_subscriber::fmt()
        .with_env_filter(format!(
            "photolog={level},server={level},directory={level},providers={level}",
            level = settings.app.level
        ))
        .init();

    let db = parse_database(&settings.server.database).await?;
    let directory = Arc::new(UserDirectory::builder().database(db).build());
    let providers = parse_providers(&settings)?;
    let key = Key::try_from(STANDARD.decode(&settings.server.session_secret)?.as_slice())?;

    let bind = settings
        .server
        .bind
        .clone()
        .unwrap_or_else(|| "127.0.0.1".to_string());
    let addr = format!("{}:{}", bind, settings.server.port);
    let listener = tokio::net::TcpListener::bind(addr).await?;

    let state = ServerState::new(directory.clone(), providers, key);
    if let Err(err) = server::run_with_listener(state, listener, shutdown_signal()).await {
        tracing::error!("server failed: {err}");
    }

    match Arc::try_unwrap(directory) {
        Ok(directory) => directory.close().await?,
        Err(_) => tracing::warn!("directory still in use at shutdown, leaving it open"),
    }

    Ok(())
}

async fn parse_database(
    config: &Database,
) -> Result<sea_orm::DatabaseConnection, Box<dyn std::error::Error + Send + Sync>> {
    let url = match config {
        Database::Memory => String::from("sqlite::memory:"),
        Database::Sqlite(path) => format!("sqlite:{}?mode=rwc", path),
    };

    let database = sea_orm::Database::connect(url).await?;
    Migrator::up(&database, None).await?;
    tracing::info!("Database ready");
    Ok(database)
}

fn parse_providers(settings: &settings::Settings) -> Result<Providers, ProviderError> {
    fn credentials(provider: &settings::Provider) -> Credentials {
        Credentials {
            client_id: provider.client_id.clone(),
            client_secret: provider.client_secret.clone(),
            redirect_uri: provider.callback_url.clone(),
        }
    }

    let mut providers = Providers::new();
    if let Some(instagram) = &settings.instagram {
        providers.add(Arc::new(InstagramProvider::new(credentials(instagram))?));
    }
    if let Some(facebook) = &settings.facebook {
        providers.add(Arc::new(FacebookProvider::new(credentials(facebook))?));
    }

    if providers.kinds().is_empty() {
        tracing::warn!("no OAuth provider configured, nobody will be able to log in");
    }
    Ok(providers)
}

/// Resolves on SIGINT (Ctrl+C) or SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            tracing::error!("failed to install Ctrl+C handler: {err}");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{SignalKind, signal};

        match signal(SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(err) => {
                tracing::error!("failed to install SIGTERM handler: {err}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => tracing::info!("Received SIGINT, shutting down"),
        _ = terminate => tracing::info!("Received SIGTERM, shutting down"),
    }
}
