use std::{path::PathBuf, time::Duration};

use config::{builder::DefaultState, ConfigBuilder, ConfigError};
use serde::Deserialize;
use serde_aux::field_attributes::deserialize_number_from_string;

use crate::services::JitterRange;

/// Legacy variables honoured on top of the `APP_*` layer.
pub const SHEET_ID_VAR: &str = "GOOGLE_SHEET_ID";
pub const SHEET_NAME_VAR: &str = "GOOGLE_SHEET_NAME";
pub const CREDENTIALS_JSON_VAR: &str = "GOOGLE_CREDENTIALS_JSON";

#[derive(Deserialize, Clone, Debug)]
pub struct Settings {
    pub application: ApplicationSettings,
    pub sheet: SheetSettings,
    pub delays: DelaySettings,
    pub enumeration: EnumerationSettings,
}

#[derive(Deserialize, Clone, Debug)]
pub struct ApplicationSettings {
    pub webdriver_url: String,
    pub headless: bool,
    pub user_agent: String,
    pub locale: String,
    pub timezone: String,
    pub search_base_url: String,
    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub navigation_timeout_secs: u64,
    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub max_scrolls: u32,
}

impl ApplicationSettings {
    pub fn navigation_timeout(&self) -> Duration {
        Duration::from_secs(self.navigation_timeout_secs)
    }
}

#[derive(Deserialize, Clone, Debug)]
pub struct SheetSettings {
    pub sheet_id: String,
    pub worksheet_name: String,
    pub credentials_file: PathBuf,
    pub credentials_json: Option<String>,
    pub api_base_url: String,
}

#[derive(Deserialize, Clone, Debug)]
pub struct DelaySettings {
    pub scroll: JitterRange,
    pub between_queries: JitterRange,
}

impl DelaySettings {
    pub fn none() -> Self {
        DelaySettings {
            scroll: JitterRange::zero(),
            between_queries: JitterRange::zero(),
        }
    }
}

#[derive(Deserialize, Clone, Debug)]
pub struct EnumerationSettings {
    pub query_templates: Vec<String>,
    pub cities: Vec<String>,
}

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

pub fn get_configuration() -> Result<Settings, ConfigError> {
    let base_path = std::env::current_dir()
        .map_err(|e| ConfigError::Message(format!("Failed to determine the current directory: {}", e)))?;
    let configuration_directory = base_path.join("configuration");

    let environment: Environment = std::env::var("APP_ENVIRONMENT")
        .unwrap_or_else(|_| "local".into())
        .try_into()
        .map_err(ConfigError::Message)?;
    let environment_filename = format!("{}.yaml", environment.as_str());

    let builder = config::Config::builder()
        .add_source(config::File::from(configuration_directory.join("base.yaml")))
        .add_source(
            config::File::from(configuration_directory.join(environment_filename)).required(false),
        )
        .add_source(app_environment());

    build_settings(builder, |key| std::env::var(key).ok())
}

fn app_environment() -> config::Environment {
    config::Environment::with_prefix("APP")
        .prefix_separator("_")
        .separator("__")
}

/// Applies the legacy sheet variables and deserializes the result.
///
/// An empty `GOOGLE_SHEET_NAME` falls back to whatever the files configured.
pub fn build_settings<F>(
    builder: ConfigBuilder<DefaultState>,
    lookup: F,
) -> Result<Settings, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

    let settings = builder
        .set_override_option("sheet.sheet_id", non_empty(SHEET_ID_VAR))?
        .set_override_option("sheet.worksheet_name", non_empty(SHEET_NAME_VAR))?
        .set_override_option("sheet.credentials_json", non_empty(CREDENTIALS_JSON_VAR))?
        .build()?
        .try_deserialize::<Settings>()?;

    if settings.sheet.sheet_id.trim().is_empty() {
        return Err(ConfigError::Message(format!(
            "{} must be set to the target spreadsheet id",
            SHEET_ID_VAR
        )));
    }

    Ok(settings)
}
