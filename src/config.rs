/*
 * Responsibility
 * - Read settings from the environment (.env is loaded first)
 * - Validate values; anything missing or malformed fails startup
 */
use std::fmt;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnv {
    Development,
    Production,
}

impl AppEnv {
    pub fn from_env() -> Self {
        match std::env::var("APP_ENV")
            .unwrap_or_else(|_| "development".to_string())
            .to_ascii_lowercase()
            .as_str()
        {
            "production" | "prod" => Self::Production,
            _ => Self::Development,
        }
    }

    pub fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }
}

#[derive(Debug)]
pub enum ConfigError {
    Invalid(&'static str),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Invalid(key) => write!(f, "invalid configuration: {}", key),
        }
    }
}

impl std::error::Error for ConfigError {}

/// Where the token verification key comes from.
#[derive(Clone, PartialEq, Eq)]
pub enum PublicKeySource {
    Inline(String),
    // `reload`: re-read the file for every request instead of once at startup.
    File { path: PathBuf, reload: bool },
}

impl fmt::Debug for PublicKeySource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            // Do not print key material
            Self::Inline(_) => f.write_str("Inline(..)"),
            Self::File { path, reload } => f
                .debug_struct("File")
                .field("path", path)
                .field("reload", reload)
                .finish(),
        }
    }
}

/// Request attributes carrying routing metadata for the check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttributeNames {
    pub api_name: String,
    pub api_version: String,
    pub request_scope: String,
}

impl Default for AttributeNames {
    fn default() -> Self {
        Self {
            api_name: "api-name".to_string(),
            api_version: "api-version".to_string(),
            request_scope: "request-scope".to_string(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub addr: SocketAddr,
    pub app_env: AppEnv,

    pub public_key: PublicKeySource,
    pub validate_subscription: bool,
    pub attributes: AttributeNames,

    pub request_timeout: Duration,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let port: u16 = match std::env::var("PORT") {
            Ok(s) => s.parse().map_err(|_| ConfigError::Invalid("PORT"))?,
            Err(_) => 8081,
        };

        let addr: SocketAddr = SocketAddr::from_str(&format!("0.0.0.0:{}", port))
            .map_err(|_| ConfigError::Invalid("PORT"))?;

        let app_env = AppEnv::from_env();

        let public_key = match std::env::var("AUTHZ_PUBLIC_KEY_PEM") {
            Ok(pem) if !pem.trim().is_empty() => PublicKeySource::Inline(pem.replace("\\n", "\n")),
            _ => PublicKeySource::File {
                path: std::env::var("AUTHZ_PUBLIC_KEY_PATH")
                    .map(PathBuf::from)
                    .unwrap_or_else(|_| PathBuf::from("./artifacts/server.pem")),
                reload: env_bool("AUTHZ_PUBLIC_KEY_RELOAD", true)?,
            },
        };

        let validate_subscription = env_bool("AUTHZ_VALIDATE_SUBSCRIPTION", false)?;

        let defaults = AttributeNames::default();
        let attributes = AttributeNames {
            api_name: env_attribute("AUTHZ_API_NAME_ATTRIBUTE", defaults.api_name)?,
            api_version: env_attribute("AUTHZ_API_VERSION_ATTRIBUTE", defaults.api_version)?,
            request_scope: env_attribute(
                "AUTHZ_REQUEST_SCOPE_ATTRIBUTE",
                defaults.request_scope,
            )?,
        };

        let request_timeout_seconds = match std::env::var("AUTHZ_REQUEST_TIMEOUT_SECONDS") {
            Ok(s) => s
                .parse::<u64>()
                .ok()
                .filter(|v| *v > 0)
                .ok_or(ConfigError::Invalid("AUTHZ_REQUEST_TIMEOUT_SECONDS"))?,
            Err(_) => 5,
        };

        Ok(Self {
            addr,
            app_env,
            public_key,
            validate_subscription,
            attributes,
            request_timeout: Duration::from_secs(request_timeout_seconds),
        })
    }
}

fn env_bool(key: &'static str, default: bool) -> Result<bool, ConfigError> {
    match std::env::var(key) {
        Ok(v) => parse_bool(&v).ok_or(ConfigError::Invalid(key)),
        Err(_) => Ok(default),
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

// Attribute names are matched against lower-cased header names.
fn env_attribute(key: &'static str, default: String) -> Result<String, ConfigError> {
    match std::env::var(key) {
        Ok(v) if v.trim().is_empty() => Err(ConfigError::Invalid(key)),
        Ok(v) => Ok(v.trim().to_ascii_lowercase()),
        Err(_) => Ok(default),
    }
}
