use std::{env, path::PathBuf};

/// Default upload size cap in bytes (10 MiB).
const DEFAULT_MAX_UPLOAD_BYTES: u64 = 10 * 1024 * 1024;

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// Postgres connection string (required).
    pub database_url: String,
    /// Remote image host credentials. None means uploads are stored in the
    /// local public directory instead.
    pub cloudinary: Option<CloudinaryConfig>,
    /// Maximum accepted upload size in bytes (default: 10 MiB).
    pub max_upload_bytes: u64,
    /// Directory where uploads are spooled before placement (default: "uploads").
    pub upload_tmp_dir: PathBuf,
    /// Root of the publicly served asset tree (default: "public").
    pub public_dir: PathBuf,
}

/// Credential triple for the remote image host.
#[derive(Debug, Clone)]
pub struct CloudinaryConfig {
    pub cloud_name: String,
    pub api_key: String,
    pub api_secret: String,
}

impl CloudinaryConfig {
    /// Reads the credentials from the environment.
    ///
    /// Returns None unless all three variables are present and non-empty.
    pub fn from_env() -> Option<Self> {
        let cloud_name = env::var("CLOUDINARY_CLOUD_NAME")
            .ok()
            .filter(|v| !v.is_empty())?;
        let api_key = env::var("CLOUDINARY_API_KEY")
            .ok()
            .filter(|v| !v.is_empty())?;
        let api_secret = env::var("CLOUDINARY_API_SECRET")
            .ok()
            .filter(|v| !v.is_empty())?;

        Some(Self {
            cloud_name,
            api_key,
            api_secret,
        })
    }
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Environment variables:
    /// - `DATABASE_URL` - Postgres connection string (required)
    /// - `CLOUDINARY_CLOUD_NAME`, `CLOUDINARY_API_KEY`, `CLOUDINARY_API_SECRET`
    ///   - remote image host credentials (all three required to enable it)
    /// - `MAX_UPLOAD_BYTES` - Upload size cap in bytes (default: 10485760)
    /// - `UPLOAD_TMP_DIR` - Upload spool directory (default: "uploads")
    /// - `PUBLIC_DIR` - Public asset root (default: "public")
    pub fn from_env() -> Result<Self, env::VarError> {
        dotenvy::dotenv().ok();

        Ok(Self {
            database_url: env::var("DATABASE_URL")?,
            cloudinary: CloudinaryConfig::from_env(),
            max_upload_bytes: env::var("MAX_UPLOAD_BYTES")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(DEFAULT_MAX_UPLOAD_BYTES),
            upload_tmp_dir: env::var("UPLOAD_TMP_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("uploads")),
            public_dir: env::var("PUBLIC_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("public")),
        })
    }
}
