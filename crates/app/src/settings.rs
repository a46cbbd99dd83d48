//! Handles settings for the application. Configuration is written in
//! `settings.toml`, every key can be overridden from the environment with the
//! `PHOTOLOG` prefix (e.g. `PHOTOLOG_SERVER__PORT=8080`).
use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Database {
    Memory,
    Sqlite(String),
}

#[derive(Debug, Deserialize)]
pub struct App {
    #[serde(default = "default_level")]
    pub level: String,
}

#[derive(Debug, Deserialize)]
pub struct Server {
    pub bind: Option<String>,
    #[serde(default = "default_port")]
    pub port: u16,
    pub database: Database,
    /// Base64 key signing the session cookies, at least 64 bytes once decoded.
    pub session_secret: String,
}

/// OAuth application registered with a provider.
#[derive(Debug, Deserialize)]
pub struct Provider {
    pub client_id: String,
    pub client_secret: String,
    pub callback_url: String,
}

#[derive(Debug, Deserialize)]
pub struct Settings {
    pub app: App,
    pub server: Server,
    pub instagram: Option<Provider>,
    pub facebook: Option<Provider>,
}

fn default_level() -> String {
    "info".to_string()
}

fn default_port() -> u16 {
    3000
}

impl Settings {
    pub fn new() -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .set_default("app.level", default_level())?
            .add_source(File::with_name("settings").required(false))
            .add_source(
                Environment::with_prefix("PHOTOLOG")
                    .prefix_separator("_")
                    .separator("__"),
            )
            .build()?;

        settings.try_deserialize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use config::FileFormat;

    fn parse(raw: &str) -> Settings {
        Config::builder()
            .set_default("app.level", default_level())
            .unwrap()
            .add_source(File::from_str(raw, FileFormat::Toml))
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap()
    }

    #[test]
    fn minimal_settings_use_defaults() {
        let settings = parse(
            r#"
            [server]
            database = "memory"
            session_secret = "c2VjcmV0"
            "#,
        );

        assert_eq!(settings.app.level, "info");
        assert_eq!(settings.server.port, 3000);
        assert!(settings.server.bind.is_none());
        assert!(matches!(settings.server.database, Database::Memory));
        assert!(settings.instagram.is_none());
        assert!(settings.facebook.is_none());
    }

    #[test]
    fn providers_and_sqlite_path_are_read() {
        let settings = parse(
            r#"
            [app]
            level = "debug"

            [server]
            port = 8080
            database = { sqlite = "photolog.db" }
            session_secret = "c2VjcmV0"

            [instagram]
            client_id = "ig"
            client_secret = "ig-secret"
            callback_url = "http://localhost:8080/auth/instagram/callback"
            "#,
        );

        assert_eq!(settings.app.level, "debug");
        assert_eq!(settings.server.port, 8080);
        assert!(matches!(settings.server.database, Database::Sqlite(ref path) if path == "photolog.db"));
        let instagram = settings.instagram.unwrap();
        assert_eq!(instagram.client_id, "ig");
        assert!(settings.facebook.is_none());
    }
}
