use std::path::PathBuf;

use stayio_core::messages::Locale;

use crate::auth::jwt::JwtConfig;

/// Server configuration loaded from environment variables.
///
/// All fields except the token key have defaults suitable for local
/// development. In production, override via environment variables.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `3001`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS` env var.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// Grace period for in-flight requests after a shutdown signal (default: `30`).
    pub shutdown_timeout_secs: u64,
    /// Largest accepted request body, photos included (default: 25 MiB).
    pub max_upload_bytes: usize,
    /// Language of error messages returned to clients (default: `en`).
    pub locale: Locale,
    /// Where uploaded listing photos live and how they are addressed.
    pub storage: StorageConfig,
    /// ID-token verification settings.
    pub jwt: JwtConfig,
}

/// Local photo storage settings.
#[derive(Debug, Clone)]
pub struct StorageConfig {
    /// Directory photos are written to and served from.
    pub upload_dir: PathBuf,
    /// Public URL prefix under which `upload_dir` is reachable.
    pub public_base_url: String,
}

/// Default maximum request body size: 25 MiB.
const DEFAULT_MAX_UPLOAD_BYTES: usize = 25 * 1024 * 1024;

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                 | Default                          |
    /// |-------------------------|----------------------------------|
    /// | `HOST`                  | `0.0.0.0`                        |
    /// | `PORT`                  | `3001`                           |
    /// | `CORS_ORIGINS`          | `http://localhost:3000`          |
    /// | `REQUEST_TIMEOUT_SECS`  | `30`                             |
    /// | `SHUTDOWN_TIMEOUT_SECS` | `30`                             |
    /// | `MAX_UPLOAD_BYTES`      | `26214400`                       |
    /// | `APP_LOCALE`            | `en`                             |
    /// | `UPLOAD_DIR`            | `storage/uploads`                |
    /// | `PUBLIC_ASSET_BASE_URL` | `http://localhost:3001/uploads`  |
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());

        let port: u16 = std::env::var("PORT")
            .unwrap_or_else(|_| "3001".into())
            .parse()
            .expect("PORT must be a valid u16");

        let cors_origins: Vec<String> = std::env::var("CORS_ORIGINS")
            .unwrap_or_else(|_| "http://localhost:3000".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let request_timeout_secs: u64 = std::env::var("REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("REQUEST_TIMEOUT_SECS must be a valid u64");

        let shutdown_timeout_secs: u64 = std::env::var("SHUTDOWN_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("SHUTDOWN_TIMEOUT_SECS must be a valid u64");

        let max_upload_bytes: usize = std::env::var("MAX_UPLOAD_BYTES")
            .unwrap_or_else(|_| DEFAULT_MAX_UPLOAD_BYTES.to_string())
            .parse()
            .expect("MAX_UPLOAD_BYTES must be a valid usize");

        let locale: Locale = std::env::var("APP_LOCALE")
            .unwrap_or_else(|_| "en".into())
            .parse()
            .expect("APP_LOCALE must be a supported locale");

        let storage = StorageConfig {
            upload_dir: std::env::var("UPLOAD_DIR")
                .unwrap_or_else(|_| "storage/uploads".into())
                .into(),
            public_base_url: std::env::var("PUBLIC_ASSET_BASE_URL")
                .unwrap_or_else(|_| format!("http://localhost:{port}/uploads"))
                .trim_end_matches('/')
                .to_string(),
        };

        let jwt = JwtConfig::from_env();

        Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            shutdown_timeout_secs,
            max_upload_bytes,
            locale,
            storage,
            jwt,
        }
    }
}
