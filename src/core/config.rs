use secrecy::{ExposeSecret, Secret};
use serde::Deserialize;

use sqlx::mysql::MySqlConnectOptions;
use sqlx::ConnectOptions;

#[derive(Deserialize, Clone)]
pub struct AppConfig {
    pub application: ApplicationConfig,
    pub mysql: MySqlConfig,
}

impl AppConfig {
    pub fn new() -> Result<Self, config::ConfigError> {
        let base_path = std::env::current_dir().map_err(|e| {
            config::ConfigError::Message(format!("Failed to find the current dir: {}", e))
        })?;
        let config_dir = base_path.join("src/core/configurations");

        let app_environment: Environment = std::env::var("INSTALLMENT_RECEIPTS_APP_ENVIRONMENT")
            .unwrap_or_else(|_| "local".into())
            .try_into()
            .map_err(config::ConfigError::Message)?;

        let configurations = config::Config::builder()
            .add_source(
                config::File::from(config_dir.join(app_environment.as_str())).required(true),
            )
            .add_source(
                config::Environment::with_prefix("INSTALLMENT_RECEIPTS")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        configurations.try_deserialize()
    }
}

#[derive(Deserialize, Clone)]
pub struct ApplicationConfig {
    pub port: u16,
    pub host: String,
    pub log_directory: String,
    pub manage_payment_settings_base_url: String,
}

impl ApplicationConfig {
    /// Where a buyer manages payment settings for one installment plan.
    pub fn manage_payment_settings_url(&self, subscription_id: uuid::Uuid) -> String {
        format!(
            "{}/{}/manage",
            self.manage_payment_settings_base_url.trim_end_matches('/'),
            subscription_id
        )
    }
}

#[derive(Deserialize, Clone)]
pub struct MySqlConfig {
    pub username: String,
    pub password: Secret<String>,
    pub host: String,
    pub port: u16,
    pub database_name: String,
}

impl MySqlConfig {
    pub fn connect(&self) -> MySqlConnectOptions {
        let options = MySqlConnectOptions::new()
            .host(&self.host)
            .username(&self.username)
            .password(self.password.expose_secret())
            .port(self.port)
            .database(&self.database_name);

        options.log_statements(tracing::log::LevelFilter::Trace)
    }
}

pub enum Environment {
    Local,
    Sandbox,
    Production,
}

impl Environment {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Local => "local",
            Self::Sandbox => "sandbox",
            Self::Production => "production",
        }
    }
}

impl TryFrom<String> for Environment {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        match value.to_lowercase().as_str() {
            "local" => Ok(Self::Local),
            "sandbox" => Ok(Self::Sandbox),
            "production" => Ok(Self::Production),
            other => Err(format!(
                "{} is not supported environment. Use either `local`, `sandbox` or `production` ",
                other
            )),
        }
    }
}
