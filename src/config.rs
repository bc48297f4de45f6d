use std::path::{Path, PathBuf};
use std::str::FromStr;

use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use serde_aux::field_attributes::deserialize_number_from_string;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;

pub const DEFAULT_QUESTIONS_PER_PAGE: u32 = 10;
const DEFAULT_CONFIG_FILE: &str = "configuration.toml";

#[derive(Deserialize, Debug)]
pub struct Settings {
    pub application: ApplicationSettings,
    pub database: DatabaseSettings,
}

#[derive(Deserialize, Clone, Debug)]
pub struct ApplicationSettings {
    pub host: String,
    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub port: u16,
    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub questions_per_page: u32,
}

#[derive(Deserialize, Debug)]
pub struct DatabaseSettings {
    pub url: SecretString,
    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub max_connections: u32,
}

impl ApplicationSettings {
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl DatabaseSettings {
    pub fn connect_options(&self) -> Result<SqliteConnectOptions, sqlx::Error> {
        Ok(SqliteConnectOptions::from_str(self.url.expose_secret())?.create_if_missing(true))
    }

    pub async fn connect(&self) -> Result<SqlitePool, sqlx::Error> {
        SqlitePoolOptions::new()
            .max_connections(self.max_connections)
            .connect_with(self.connect_options()?)
            .await
    }
}

impl Settings {
    /// Reads `.env`, then the configuration file named by `TRIVIA_CONFIG`
    /// (or `configuration.toml`), then `TRIVIA__SECTION__KEY` variables.
    pub fn load() -> Result<Self, config::ConfigError> {
        dotenv::dotenv().ok();
        let path = dotenv::var("TRIVIA_CONFIG")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(DEFAULT_CONFIG_FILE));
        Self::from_sources(&path)
    }

    pub fn from_sources(path: &Path) -> Result<Self, config::ConfigError> {
        config::Config::builder()
            .set_default("application.host", "0.0.0.0")?
            .set_default("application.port", 8080)?
            .set_default(
                "application.questions_per_page",
                i64::from(DEFAULT_QUESTIONS_PER_PAGE),
            )?
            .set_default("database.url", "sqlite:trivia.db")?
            .set_default("database.max_connections", 5)?
            .add_source(config::File::from(path).required(false))
            .add_source(
                config::Environment::with_prefix("TRIVIA")
                    .prefix_separator("__")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()
    }
}
