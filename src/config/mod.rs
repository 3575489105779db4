//! Configuration loading from environment variables
//!
//! `AppConfig::from_env()` loads `.env` (when present) and reads the process
//! environment. Every section is parsed through [`AppConfig::from_lookup`],
//! which takes any key lookup so tests never touch the real environment.

use std::fmt;
use std::net::{IpAddr, SocketAddr};
use std::time::Duration;
use thiserror::Error;

const DEV_JWT_SECRET: &str = "gestor-development-secret";

/// Distinguishes runtime behavior for different stages of the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnvironment {
    Development,
    Test,
    Production,
}

impl AppEnvironment {
    fn parse(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "prod" | "production" => Self::Production,
            "test" | "ci" => Self::Test,
            _ => Self::Development,
        }
    }

    pub fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }
}

/// Top-level configuration for the application.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: AppEnvironment,
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub jwt: JwtConfig,
    pub aws: AwsConfig,
    pub cors: CorsConfig,
    pub upload: UploadConfig,
    pub telemetry: TelemetryConfig,
}

impl AppConfig {
    /// Load `.env` and read the process environment
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build the configuration from an arbitrary key lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let environment = AppEnvironment::parse(&get("NODE_ENV").unwrap_or_default());

        let server = ServerConfig {
            host: get("HOST").unwrap_or_else(|| "0.0.0.0".to_string()),
            port: match get("PORT") {
                Some(value) => value
                    .parse::<u16>()
                    .map_err(|_| ConfigError::InvalidPort { value })?,
                None => 3000,
            },
        };

        let database = DatabaseConfig {
            url: get("DATABASE_URL"),
            max_connections: parse_number(&get, "DATABASE_MAX_CONNECTIONS", 10)?,
        };

        let secret = match get("JWT_SECRET") {
            Some(secret) => secret,
            None if environment.is_production() => {
                return Err(ConfigError::Missing { key: "JWT_SECRET" });
            }
            None => DEV_JWT_SECRET.to_string(),
        };
        let jwt = JwtConfig {
            refresh_secret: get("JWT_REFRESH_SECRET").unwrap_or_else(|| secret.clone()),
            secret,
            expires_in: parse_duration_var(&get, "JWT_EXPIRES_IN", "1d")?,
            refresh_expires_in: parse_duration_var(&get, "JWT_REFRESH_EXPIRES_IN", "7d")?,
        };

        let aws = AwsConfig {
            region: get("AWS_REGION").unwrap_or_else(|| "us-east-1".to_string()),
            access_key_id: get("AWS_ACCESS_KEY_ID"),
            secret_access_key: get("AWS_SECRET_ACCESS_KEY"),
            bucket: get("AWS_S3_BUCKET_NAME"),
            endpoint: get("AWS_S3_ENDPOINT"),
        };

        let cors = CorsConfig {
            allowed_origins: get("FRONTEND_URL")
                .unwrap_or_else(|| "http://localhost:5173".to_string())
                .split(',')
                .map(|origin| origin.trim().trim_end_matches('/').to_string())
                .filter(|origin| !origin.is_empty())
                .collect(),
        };

        let max_mb: usize = parse_number(&get, "UPLOAD_MAX_SIZE_MB", 10)?;
        let upload = UploadConfig {
            max_bytes: max_mb
                .checked_mul(1024 * 1024)
                .ok_or_else(|| ConfigError::InvalidNumber {
                    key: "UPLOAD_MAX_SIZE_MB",
                    value: max_mb.to_string(),
                })?,
        };

        let telemetry = TelemetryConfig {
            log_level: get("RUST_LOG")
                .or_else(|| get("LOG_LEVEL"))
                .unwrap_or_else(|| "info".to_string()),
        };

        Ok(Self {
            environment,
            server,
            database,
            jwt,
            aws,
            cors,
            upload,
            telemetry,
        })
    }
}

fn parse_number<G, N>(get: &G, key: &'static str, default: N) -> Result<N, ConfigError>
where
    G: Fn(&str) -> Option<String>,
    N: std::str::FromStr,
{
    match get(key) {
        Some(value) => value
            .parse::<N>()
            .map_err(|_| ConfigError::InvalidNumber { key, value }),
        None => Ok(default),
    }
}

fn parse_duration_var<G>(get: &G, key: &'static str, default: &str) -> Result<Duration, ConfigError>
where
    G: Fn(&str) -> Option<String>,
{
    let value = get(key).unwrap_or_else(|| default.to_string());
    // Token expiry is an i64 timestamp
    match parse_duration(&value) {
        Some(duration) if i64::try_from(duration.as_secs()).is_ok() => Ok(duration),
        _ => Err(ConfigError::InvalidDuration { key, value }),
    }
}

/// Parse `30`, `45s`, `15m`, `12h` or `7d`
pub fn parse_duration(value: &str) -> Option<Duration> {
    let value = value.trim();
    let split = value
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(value.len());
    let (amount, unit) = value.split_at(split);
    let amount: u64 = amount.parse().ok()?;
    let seconds = match unit {
        "" | "s" => amount,
        "m" => amount.checked_mul(60)?,
        "h" => amount.checked_mul(3_600)?,
        "d" => amount.checked_mul(86_400)?,
        _ => return None,
    };
    Some(Duration::from_secs(seconds))
}

/// Settings controlling the HTTP server binding.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl ServerConfig {
    pub fn socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        if self.host.eq_ignore_ascii_case("localhost") {
            return Ok(SocketAddr::new(IpAddr::from([127, 0, 0, 1]), self.port));
        }

        let ip: IpAddr = self
            .host
            .parse()
            .map_err(|source| ConfigError::InvalidHost { source })?;

        Ok(SocketAddr::new(ip, self.port))
    }
}

/// Persistence settings; no URL means the in-memory backend.
#[derive(Clone)]
pub struct DatabaseConfig {
    pub url: Option<String>,
    pub max_connections: u32,
}

impl fmt::Debug for DatabaseConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DatabaseConfig")
            .field("url", &self.url.as_ref().map(|_| "***"))
            .field("max_connections", &self.max_connections)
            .finish()
    }
}

/// Token signing settings.
#[derive(Clone)]
pub struct JwtConfig {
    pub secret: String,
    pub expires_in: Duration,
    pub refresh_secret: String,
    pub refresh_expires_in: Duration,
}

impl fmt::Debug for JwtConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("JwtConfig")
            .field("secret", &"***")
            .field("expires_in", &self.expires_in)
            .field("refresh_secret", &"***")
            .field("refresh_expires_in", &self.refresh_expires_in)
            .finish()
    }
}

/// S3 credentials and bucket for file uploads.
#[derive(Clone)]
pub struct AwsConfig {
    pub region: String,
    pub access_key_id: Option<String>,
    pub secret_access_key: Option<String>,
    pub bucket: Option<String>,
    pub endpoint: Option<String>,
}

impl AwsConfig {
    /// Bucket and both keys are present
    pub fn is_configured(&self) -> bool {
        self.bucket.is_some() && self.access_key_id.is_some() && self.secret_access_key.is_some()
    }
}

impl fmt::Debug for AwsConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AwsConfig")
            .field("region", &self.region)
            .field("access_key_id", &self.access_key_id)
            .field("secret_access_key", &self.secret_access_key.as_ref().map(|_| "***"))
            .field("bucket", &self.bucket)
            .field("endpoint", &self.endpoint)
            .finish()
    }
}

/// Origins allowed to call the API from a browser.
#[derive(Debug, Clone)]
pub struct CorsConfig {
    pub allowed_origins: Vec<String>,
}

/// Limits for multipart uploads.
#[derive(Debug, Clone)]
pub struct UploadConfig {
    pub max_bytes: usize,
}

impl Default for UploadConfig {
    fn default() -> Self {
        Self {
            max_bytes: 10 * 1024 * 1024,
        }
    }
}

/// Tracing controls.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("PORT must be a valid u16, got '{value}'")]
    InvalidPort { value: String },

    #[error("HOST must parse to an IPv4 or IPv6 address")]
    InvalidHost { source: std::net::AddrParseError },

    #[error("{key} must be a number, got '{value}'")]
    InvalidNumber { key: &'static str, value: String },

    #[error("{key} must be a duration like 3600, 15m, 12h or 7d, got '{value}'")]
    InvalidDuration { key: &'static str, value: String },

    #[error("{key} is required in production")]
    Missing { key: &'static str },
}
