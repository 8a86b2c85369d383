use std::path::Path;

use crate::telemetry::LoggerFormat;

#[derive(serde::Deserialize, Debug)]
pub struct Settings {
    pub application: AppSettings,
}

#[derive(serde::Deserialize, Debug)]
pub struct AppSettings {
    pub port: u16,
    pub host: String,
    pub logger_format: LoggerFormat,
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_log_level() -> String {
    "info".into()
}

impl AppSettings {
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Load settings from `./configurations` under the current directory.
///
/// Layers, later wins: `base`, then the file named by `APP_ENV` (`local` when unset),
/// then `APP_`-prefixed environment variables such as `APP_APPLICATION__PORT=8080`.
pub fn get_configurations() -> Result<Settings, config::ConfigError> {
    let base_path = std::env::current_dir().map_err(|e| {
        config::ConfigError::Message(format!("Failed to determine the current directory: {e}"))
    })?;

    let environment: Environment = std::env::var("APP_ENV")
        .unwrap_or_else(|_| "local".into())
        .try_into()
        .map_err(config::ConfigError::Message)?;

    load_configurations(
        &base_path.join("configurations"),
        &environment,
        env_overrides(),
    )
}

/// The `APP_` variable source, read from the process environment.
pub fn env_overrides() -> config::Environment {
    config::Environment::with_prefix("APP")
        .prefix_separator("_")
        .separator("__")
}

/// Layer `base`, the environment's file from `configuration_directory`, then `overrides`.
pub fn load_configurations(
    configuration_directory: &Path,
    environment: &Environment,
    overrides: config::Environment,
) -> Result<Settings, config::ConfigError> {
    let base_file = config_path(configuration_directory, "base")?;
    let environment_file = config_path(configuration_directory, environment.as_str())?;

    config::Config::builder()
        .add_source(config::File::with_name(&base_file).required(false))
        .add_source(config::File::with_name(&environment_file).required(false))
        .add_source(overrides)
        .build()?
        .try_deserialize()
}

fn config_path(dir: &Path, name: &str) -> Result<String, config::ConfigError> {
    let path = dir.join(name);
    path.to_str().map(String::from).ok_or_else(|| {
        config::ConfigError::Message(format!("Path contains invalid unicode: {path:?}"))
    })
}

/// The possible runtime environment for our application.
#[derive(Debug, PartialEq, Eq)]
pub enum Environment {
    Local,
    Production,
}

impl Environment {
    pub fn as_str(&self) -> &'static str {
        match self {
            Environment::Local => "local",
            Environment::Production => "production",
        }
    }
}

impl TryFrom<String> for Environment {
    type Error = String;
    fn try_from(s: String) -> Result<Self, Self::Error> {
        match s.to_lowercase().as_str() {
            "local" => Ok(Self::Local),
            "production" => Ok(Self::Production),
            other => Err(format!(
                "{} is not a supported environment. Use either `local` or `production`.",
                other
            )),
        }
    }
}
