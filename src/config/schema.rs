//! Configuration section definitions.
//!
//! Each section mirrors one declarative source file of the application
//! (`app`, `cors`, `database`, `mail`, `endpoints`). Sections are built
//! from the process environment with sensible defaults, then serialized
//! together into the on-disk snapshot.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

fn env_flag(key: &str, default: bool) -> bool {
    match std::env::var(key) {
        Ok(v) => !matches!(v.to_ascii_lowercase().as_str(), "0" | "false" | "off" | ""),
        Err(_) => default,
    }
}

/// General application settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AppSection {
    /// Application display name.
    pub name: String,
    /// Private application key.
    pub key: String,
    /// Deployment environment (local, staging, production).
    pub environment: String,
    /// Whether verbose diagnostics are enabled.
    pub debug: bool,
    /// Application version string.
    pub version: String,
    /// Whether an execution log is written.
    pub logger: bool,
}

impl Default for AppSection {
    fn default() -> Self {
        Self {
            name: "clarity".to_string(),
            key: String::new(),
            environment: "local".to_string(),
            debug: true,
            version: "1.0.0".to_string(),
            logger: true,
        }
    }
}

impl AppSection {
    pub fn from_env() -> Self {
        Self {
            name: env_or("APP_NAME", "clarity"),
            key: env_or("APP_KEY", ""),
            environment: env_or("APP_ENVIRONMENT", "local"),
            debug: env_flag("APP_DEBUG", true),
            version: env_or("APP_VERSION", "1.0.0"),
            logger: env_flag("APP_LOGGER", true),
        }
    }
}

/// Cross-origin resource sharing settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CorsSection {
    pub allowed_methods: Vec<String>,
    pub allowed_origins: String,
    pub allowed_headers: String,
    pub exposed_headers: Option<String>,
    /// Preflight cache lifetime in seconds.
    pub max_age: Option<u64>,
}

impl Default for CorsSection {
    fn default() -> Self {
        Self {
            allowed_methods: ["GET", "HEAD", "POST", "OPTIONS", "PUT", "PATCH", "DELETE"]
                .iter()
                .map(|m| m.to_string())
                .collect(),
            allowed_origins: "*".to_string(),
            allowed_headers: "*".to_string(),
            exposed_headers: None,
            max_age: None,
        }
    }
}

impl CorsSection {
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            allowed_origins: env_or("CORS_ALLOWED_ORIGINS", &defaults.allowed_origins),
            allowed_headers: env_or("CORS_ALLOWED_HEADERS", &defaults.allowed_headers),
            ..defaults
        }
    }
}

/// One Oracle connection entry.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct OracleConnection {
    pub username: String,
    pub password: String,
    pub host: String,
    pub service: String,
}

/// One SQL Server connection entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SqlServerConnection {
    pub username: String,
    pub password: String,
    pub host: String,
    pub database: String,
    pub port: u16,
}

impl Default for SqlServerConnection {
    fn default() -> Self {
        Self {
            username: String::new(),
            password: String::new(),
            host: String::new(),
            database: String::new(),
            port: 1433,
        }
    }
}

/// Database connection settings, keyed by connection name.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DatabaseSection {
    pub oracle: BTreeMap<String, OracleConnection>,
    pub sqlserver: BTreeMap<String, SqlServerConnection>,
}

impl DatabaseSection {
    pub fn from_env() -> Self {
        let mut oracle = BTreeMap::new();
        oracle.insert(
            "default".to_string(),
            OracleConnection {
                username: env_or("DB_ORACLE_USERNAME", ""),
                password: env_or("DB_ORACLE_PASSWORD", ""),
                host: env_or("DB_ORACLE_HOST", ""),
                service: env_or("DB_ORACLE_SERVICE", ""),
            },
        );

        let mut sqlserver = BTreeMap::new();
        sqlserver.insert(
            "default".to_string(),
            SqlServerConnection {
                username: env_or("DB_SQLSERVER_USERNAME", ""),
                password: env_or("DB_SQLSERVER_PASSWORD", ""),
                host: env_or("DB_SQLSERVER_HOST", ""),
                database: env_or("DB_SQLSERVER_DATABASE", ""),
                port: 1433,
            },
        );

        Self { oracle, sqlserver }
    }
}

/// One outbound mail account.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct MailAccount {
    pub host: String,
    pub port: String,
    pub username: String,
    pub password: String,
    pub address: String,
}

/// Mail accounts, keyed by account name.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MailSection {
    pub accounts: BTreeMap<String, MailAccount>,
}

impl MailSection {
    pub fn from_env() -> Self {
        let mut accounts = BTreeMap::new();
        accounts.insert(
            "default".to_string(),
            MailAccount {
                host: env_or("MAIL_HOST", ""),
                port: env_or("MAIL_PORT", ""),
                username: env_or("MAIL_USERNAME", ""),
                password: env_or("MAIL_PASSWORD", ""),
                address: env_or("MAIL_FROM_ADDRESS", ""),
            },
        );
        Self { accounts }
    }
}

/// External endpoint URIs, keyed by a short name.
///
/// Populated from environment variables with the `ENDPOINT_` prefix:
/// `ENDPOINT_BILLING=https://...` becomes the `billing` entry.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EndpointsSection {
    pub uris: BTreeMap<String, String>,
}

impl EndpointsSection {
    pub fn from_env() -> Self {
        let uris = std::env::vars()
            .filter_map(|(key, value)| {
                key.strip_prefix("ENDPOINT_")
                    .map(|name| (name.to_ascii_lowercase(), value))
            })
            .collect();
        Self { uris }
    }
}

/// All configuration sections, merged into one snapshot by the cache.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ConfigSections {
    pub app: AppSection,
    pub cors: CorsSection,
    pub database: DatabaseSection,
    pub endpoints: EndpointsSection,
    pub mail: MailSection,
}

impl ConfigSections {
    /// Build every section from the current process environment.
    pub fn from_env() -> Self {
        Self {
            app: AppSection::from_env(),
            cors: CorsSection::from_env(),
            database: DatabaseSection::from_env(),
            endpoints: EndpointsSection::from_env(),
            mail: MailSection::from_env(),
        }
    }
}
