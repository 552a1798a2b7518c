use std::env;
use std::fmt;

/// Counties kept by the filters when `KENYA_COUNTIES` is not set.
pub const DEFAULT_COUNTIES: &[&str] = &["THARAKA-NITHI", "EMBU", "KIRINYAGA", "MERU"];

/// Property key and CSV column that hold the county name by default.
pub const DEFAULT_COUNTY_KEY: &str = "county";

/// Distinguishes runtime behavior for different stages of the tooling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnvironment {
    Development,
    Test,
    Production,
}

impl AppEnvironment {
    fn from_str(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "prod" | "production" => Self::Production,
            "test" | "ci" => Self::Test,
            _ => Self::Development,
        }
    }
}

/// Top-level configuration for the command line tools.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: AppEnvironment,
    pub telemetry: TelemetryConfig,
    pub filter: FilterConfig,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let environment = AppEnvironment::from_str(
            &env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()),
        );

        let log_level = env::var("APP_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        let counties = match env::var("KENYA_COUNTIES") {
            Ok(raw) => parse_county_list(&raw),
            Err(_) => DEFAULT_COUNTIES.iter().map(|name| name.to_string()).collect(),
        };
        if counties.is_empty() {
            return Err(ConfigError::EmptyCountyList);
        }

        let county_property = read_key("KENYA_COUNTY_PROPERTY")?;
        let csv_county_column = read_key("KENYA_CSV_COUNTY_COLUMN")?;

        Ok(Self {
            environment,
            telemetry: TelemetryConfig { log_level },
            filter: FilterConfig {
                counties,
                county_property,
                csv_county_column,
            },
        })
    }
}

fn parse_county_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(str::to_string)
        .collect()
}

fn read_key(variable: &'static str) -> Result<String, ConfigError> {
    match env::var(variable) {
        Ok(value) if value.trim().is_empty() => Err(ConfigError::EmptyKey { variable }),
        Ok(value) => Ok(value.trim().to_string()),
        Err(_) => Ok(DEFAULT_COUNTY_KEY.to_string()),
    }
}

/// Tracing controls.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
}

/// Allow-list and column/property names used by the county filters.
#[derive(Debug, Clone)]
pub struct FilterConfig {
    pub counties: Vec<String>,
    pub county_property: String,
    pub csv_county_column: String,
}

#[derive(Debug)]
pub enum ConfigError {
    EmptyCountyList,
    EmptyKey { variable: &'static str },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::EmptyCountyList => {
                write!(f, "KENYA_COUNTIES must name at least one county")
            }
            ConfigError::EmptyKey { variable } => write!(f, "{variable} must not be blank"),
        }
    }
}

impl std::error::Error for ConfigError {}
